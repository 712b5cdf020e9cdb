//! Scenario generation
//!
//! Scenarios are short, gamified narratives derived from spending aggregates
//! and, when available, an oracle prediction. Each [`ScenarioRule`] measures
//! the numbers it needs and hands them to a pure formatting function in
//! [`templates`], so wording changes never touch the rule math.
//!
//! ## Built-in rules (evaluation order)
//!
//! 1. **Prediction Alert** - only when the oracle produced a prediction
//! 2. **Weekend Warrior** - share of spending on weekends
//! 3. **Wealth Builder** - savings and one-year projection
//! 4. **Category Lover** - dominant expense category
//! 5. **Future Millionaire** - ten-year growth of positive savings
//!
//! Output order is evaluation order; equal probabilities never reorder.

pub mod rules;
pub mod templates;

use std::fmt;

use tracing::debug;

use crate::aggregate::Aggregates;
use crate::models::{PredictionResult, Scenario};

pub use rules::{
    CategoryLoverRule, FutureMillionaireRule, PredictionAlertRule, WealthBuilderRule,
    WeekendWarriorRule,
};

/// Maximum number of scenarios returned per analysis
pub const MAX_SCENARIOS: usize = 6;

/// Upper bound for any scenario probability
pub const MAX_PROBABILITY: u8 = 95;

/// Identifies a scenario rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioKind {
    PredictionAlert,
    WeekendWarrior,
    WealthBuilder,
    CategoryLover,
    FutureMillionaire,
}

impl ScenarioKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioKind::PredictionAlert => "prediction_alert",
            ScenarioKind::WeekendWarrior => "weekend_warrior",
            ScenarioKind::WealthBuilder => "wealth_builder",
            ScenarioKind::CategoryLover => "category_lover",
            ScenarioKind::FutureMillionaire => "future_millionaire",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inputs available to every rule
#[derive(Debug, Clone, Copy)]
pub struct ScenarioContext<'a> {
    pub aggregates: &'a Aggregates,
    pub prediction: Option<&'a PredictionResult>,
}

/// A single scenario rule
pub trait ScenarioRule: Send + Sync {
    fn kind(&self) -> ScenarioKind;

    /// Produce a scenario, or `None` when the rule's guard is not met
    fn evaluate(&self, ctx: &ScenarioContext<'_>) -> Option<Scenario>;
}

/// Runs rules in registration order and caps the result
pub struct ScenarioGenerator {
    rules: Vec<Box<dyn ScenarioRule>>,
}

impl Default for ScenarioGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioGenerator {
    /// Create a generator with the built-in rules
    pub fn new() -> Self {
        let mut generator = Self { rules: vec![] };

        generator.register(Box::new(PredictionAlertRule));
        generator.register(Box::new(WeekendWarriorRule));
        generator.register(Box::new(WealthBuilderRule));
        generator.register(Box::new(CategoryLoverRule));
        generator.register(Box::new(FutureMillionaireRule));

        generator
    }

    pub fn register(&mut self, rule: Box<dyn ScenarioRule>) {
        self.rules.push(rule);
    }

    pub fn kinds(&self) -> Vec<ScenarioKind> {
        self.rules.iter().map(|r| r.kind()).collect()
    }

    pub fn generate(
        &self,
        aggregates: &Aggregates,
        prediction: Option<&PredictionResult>,
    ) -> Vec<Scenario> {
        let ctx = ScenarioContext {
            aggregates,
            prediction,
        };

        let mut scenarios = Vec::new();
        for rule in &self.rules {
            if let Some(scenario) = rule.evaluate(&ctx) {
                debug!(
                    rule = rule.kind().as_str(),
                    probability = scenario.probability,
                    "Scenario emitted"
                );
                scenarios.push(scenario);
            }
        }

        scenarios.truncate(MAX_SCENARIOS);
        scenarios
    }
}

/// Round a percentage to a probability within `0..=cap`
pub fn probability(percent: f64, cap: u8) -> u8 {
    if !percent.is_finite() || percent <= 0.0 {
        return 0;
    }
    percent.round().min(f64::from(cap)) as u8
}
