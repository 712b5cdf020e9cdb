//! Analytics Engine - orchestrates the insight pipeline
//!
//! One call runs: ingestion → aggregation → oracle (optional) → scenarios,
//! personality and achievements. The engine holds no per-request state, so a
//! single instance can serve concurrent callers.

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use crate::achievements;
use crate::aggregate::{aggregate, Aggregates};
use crate::error::Result;
use crate::ingest::coerce_all;
use crate::models::{AnalysisReport, RawTransaction, Transaction};
use crate::oracle::OracleHandle;
use crate::personality;
use crate::scenarios::ScenarioGenerator;

pub struct AnalyticsEngine {
    oracle: OracleHandle,
    scenarios: ScenarioGenerator,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new(OracleHandle::none())
    }
}

impl AnalyticsEngine {
    /// Create an engine around an (optionally empty) oracle handle
    pub fn new(oracle: OracleHandle) -> Self {
        Self {
            oracle,
            scenarios: ScenarioGenerator::new(),
        }
    }

    pub fn oracle(&self) -> &OracleHandle {
        &self.oracle
    }

    /// Whether predictions can be attempted
    pub fn ai_powered(&self) -> bool {
        self.oracle.is_loaded()
    }

    pub fn model_version(&self) -> Option<&str> {
        self.oracle.version()
    }

    /// Analyze raw records using the current local time for oracle features
    pub fn analyze(&self, records: &[RawTransaction]) -> Result<AnalysisReport> {
        self.analyze_at(records, Local::now().naive_local())
    }

    /// Analyze raw records as of `now`.
    ///
    /// Fails with `MalformedTransaction` if any record cannot be coerced or
    /// the income or expense total is not finite; no partial report is
    /// produced in that case. Empty input behaves as in
    /// [`analyze_transactions`](Self::analyze_transactions).
    pub fn analyze_at(&self, records: &[RawTransaction], now: NaiveDateTime) -> Result<AnalysisReport> {
        let transactions = coerce_all(records)?;
        Ok(self.analyze_transactions(&transactions, now))
    }

    /// Analyze already-validated transactions as of `now`.
    ///
    /// An empty list yields no scenarios and no personality, and skips the
    /// oracle. Achievements are still evaluated against zero totals, so all
    /// five come back with only "AI Powered" unlocked.
    pub fn analyze_transactions(&self, transactions: &[Transaction], now: NaiveDateTime) -> AnalysisReport {
        if transactions.is_empty() {
            debug!("No transactions, returning empty analysis");
            return AnalysisReport {
                scenarios: vec![],
                personality: None,
                achievements: achievements::evaluate(&Aggregates::default(), 0),
            };
        }

        let aggregates = aggregate(transactions);
        debug!(
            count = aggregates.transaction_count,
            income = aggregates.total_income,
            expense = aggregates.total_expense,
            categories = aggregates.distinct_expense_categories(),
            "Aggregated transactions"
        );

        let prediction = self.oracle.predict(&aggregates, now);
        let scenarios = self.scenarios.generate(&aggregates, prediction.as_ref());
        let personality = personality::classify(aggregates.savings_rate);
        let achievements = achievements::evaluate(&aggregates, transactions.len());

        debug!(
            scenarios = scenarios.len(),
            personality = %personality.kind,
            unlocked = achievements.iter().filter(|a| a.unlocked).count(),
            "Analysis complete"
        );

        AnalysisReport {
            scenarios,
            personality: Some(personality),
            achievements,
        }
    }
}
