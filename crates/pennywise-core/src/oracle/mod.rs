//! Prediction oracle
//!
//! An oracle is an opaque, versioned model that estimates the next expense
//! (amount and likely category). It is optional: when none is loaded the
//! engine produces rule-based insights only.
//!
//! ## Components
//!
//! - [`PredictionOracle`] - trait implemented by model artifacts
//! - [`ModelBundle`] - JSON bundle produced by offline training
//! - [`OracleHandle`] - immutable, shareable handle the engine consults; it
//!   swallows prediction faults so they never reach the caller
//! - [`mock`] - stub oracles for tests

pub mod bundle;
pub mod mock;

use std::path::Path;
use std::sync::Arc;

use chrono::{Datelike, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::aggregate::Aggregates;
use crate::error::{Error, Result};
use crate::models::PredictionResult;

pub use bundle::{LinearClassifier, LinearRegressor, ModelBundle};

/// Number of features in the amount regression input
pub const AMOUNT_FEATURES: usize = 4;

/// Number of features in the category classifier input
pub const CATEGORY_FEATURES: usize = 3;

/// Confidence reported when an oracle has no calibrated value
pub const DEFAULT_CONFIDENCE: f64 = 0.85;

/// Category index fed to the amount model.
///
/// Always the first label rather than the user's dominant category; kept for
/// compatibility with bundles trained against this layout.
pub const PLACEHOLDER_CATEGORY_INDEX: f64 = 0.0;

/// A loaded predictive model
pub trait PredictionOracle: Send + Sync {
    /// Predict the next expense amount from
    /// `[weekday, month, category_index, recent_spending]`
    fn predict_amount(&self, features: &[f64; AMOUNT_FEATURES]) -> Result<f64>;

    /// Predict the index (into [`Self::categories`]) of the most likely
    /// expense category from `[weekday, month, recent_spending]`
    fn classify_category(&self, features: &[f64; CATEGORY_FEATURES]) -> Result<usize>;

    /// Category labels the classifier indexes into
    fn categories(&self) -> &[String];

    /// Semantic version of the model artifact
    fn version(&self) -> &str;

    /// Confidence attached to predictions, within 0.0..=1.0
    fn confidence(&self) -> f64 {
        DEFAULT_CONFIDENCE
    }
}

/// Feature vector derived from aggregates and the current time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OracleFeatures {
    /// 0 = Monday
    pub weekday: u32,
    /// 1..=12
    pub month: u32,
    /// Aggregate expense total of the submitted history
    pub recent_spending: f64,
}

impl OracleFeatures {
    pub fn from_aggregates(aggregates: &Aggregates, now: NaiveDateTime) -> Self {
        Self {
            weekday: now.weekday().num_days_from_monday(),
            month: now.month(),
            recent_spending: aggregates.total_expense,
        }
    }

    pub fn amount_vector(&self) -> [f64; AMOUNT_FEATURES] {
        [
            self.weekday as f64,
            self.month as f64,
            PLACEHOLDER_CATEGORY_INDEX,
            self.recent_spending,
        ]
    }

    pub fn category_vector(&self) -> [f64; CATEGORY_FEATURES] {
        [self.weekday as f64, self.month as f64, self.recent_spending]
    }
}

/// Shared handle to an optional oracle.
///
/// Built once at startup and cloned (cheaply) into every consumer. A handle
/// either holds a fully constructed oracle or nothing.
#[derive(Clone, Default)]
pub struct OracleHandle {
    oracle: Option<Arc<dyn PredictionOracle>>,
}

impl std::fmt::Debug for OracleHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleHandle")
            .field("version", &self.version())
            .finish()
    }
}

impl OracleHandle {
    /// A handle with no oracle (rule-based analysis only)
    pub fn none() -> Self {
        Self { oracle: None }
    }

    pub fn new(oracle: impl PredictionOracle + 'static) -> Self {
        Self {
            oracle: Some(Arc::new(oracle)),
        }
    }

    /// Load a model bundle, failing if it is missing or invalid
    pub fn load(path: &Path) -> Result<Self> {
        let bundle = ModelBundle::load(path)?;
        info!(
            path = %path.display(),
            version = bundle.version(),
            categories = ?bundle.categories(),
            "Prediction oracle loaded"
        );
        Ok(Self::new(bundle))
    }

    /// Load a model bundle, falling back to no oracle when it is unavailable
    pub fn load_optional(path: &Path) -> Self {
        if !path.exists() {
            info!(
                path = %path.display(),
                "No oracle model found, using rule-based analysis"
            );
            return Self::none();
        }

        match Self::load(path) {
            Ok(handle) => handle,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load oracle model");
                Self::none()
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.oracle.is_some()
    }

    pub fn version(&self) -> Option<&str> {
        self.oracle.as_deref().map(|o| o.version())
    }

    pub fn categories(&self) -> &[String] {
        self.oracle.as_deref().map(|o| o.categories()).unwrap_or(&[])
    }

    /// Ask the oracle for a prediction.
    ///
    /// Returns `None` when no oracle is loaded or when the oracle faults;
    /// faults are logged and never propagated.
    pub fn predict(&self, aggregates: &Aggregates, now: NaiveDateTime) -> Option<PredictionResult> {
        let oracle = self.oracle.as_deref()?;
        let features = OracleFeatures::from_aggregates(aggregates, now);

        match invoke(oracle, &features) {
            Ok(prediction) => {
                debug!(
                    amount = prediction.predicted_amount,
                    category = %prediction.predicted_category,
                    "Oracle prediction"
                );
                Some(prediction)
            }
            Err(e) => {
                warn!(
                    version = oracle.version(),
                    error = %e,
                    "Oracle prediction failed, continuing without it"
                );
                None
            }
        }
    }
}

fn invoke(oracle: &dyn PredictionOracle, features: &OracleFeatures) -> Result<PredictionResult> {
    let amount = oracle.predict_amount(&features.amount_vector())?;
    if !amount.is_finite() {
        return Err(Error::OraclePrediction(format!(
            "amount model returned {}",
            amount
        )));
    }

    let index = oracle.classify_category(&features.category_vector())?;
    let category = oracle.categories().get(index).ok_or_else(|| {
        Error::OraclePrediction(format!(
            "category index {} outside {} labels",
            index,
            oracle.categories().len()
        ))
    })?;

    let confidence = oracle.confidence();
    if !confidence.is_finite() {
        return Err(Error::OraclePrediction(format!(
            "confidence {} is not finite",
            confidence
        )));
    }

    Ok(PredictionResult {
        predicted_amount: round_cents(amount),
        predicted_category: category.clone(),
        confidence: confidence.clamp(0.0, 1.0),
        model_version: oracle.version().to_string(),
    })
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::mock::{FailingOracle, StaticOracle};
    use super::*;
    use chrono::NaiveDate;

    fn monday_in_march() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn aggregates_with_expense(total_expense: f64) -> Aggregates {
        Aggregates {
            total_expense,
            ..Default::default()
        }
    }

    #[test]
    fn test_feature_vectors() {
        let sunday = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let features = OracleFeatures::from_aggregates(&aggregates_with_expense(750.0), sunday);

        assert_eq!(features.amount_vector(), [6.0, 3.0, 0.0, 750.0]);
        assert_eq!(features.category_vector(), [6.0, 3.0, 750.0]);
    }

    #[test]
    fn test_no_oracle_returns_none() {
        let handle = OracleHandle::none();
        assert!(!handle.is_loaded());
        assert!(handle.version().is_none());
        assert!(handle.categories().is_empty());
        assert!(handle
            .predict(&aggregates_with_expense(10.0), monday_in_march())
            .is_none());
    }

    #[test]
    fn test_prediction_is_rounded_and_labelled() {
        let handle = OracleHandle::new(StaticOracle::new(412.3456, 1).with_confidence(0.5));
        let prediction = handle
            .predict(&aggregates_with_expense(10.0), monday_in_march())
            .unwrap();

        assert_eq!(prediction.predicted_amount, 412.35);
        assert_eq!(prediction.predicted_category, "Transport");
        assert_eq!(prediction.confidence, 0.5);
        assert_eq!(prediction.model_version, "test-1.0");
    }

    #[test]
    fn test_oracle_fault_degrades_to_none() {
        let handle = OracleHandle::new(FailingOracle::new("feature mismatch"));
        assert!(handle.is_loaded());
        assert!(handle
            .predict(&aggregates_with_expense(10.0), monday_in_march())
            .is_none());
    }

    #[test]
    fn test_out_of_range_category_degrades_to_none() {
        let handle = OracleHandle::new(StaticOracle::new(10.0, 99));
        assert!(handle
            .predict(&aggregates_with_expense(10.0), monday_in_march())
            .is_none());
    }

    #[test]
    fn test_non_finite_amount_degrades_to_none() {
        let handle = OracleHandle::new(StaticOracle::new(f64::NAN, 0));
        assert!(handle
            .predict(&aggregates_with_expense(10.0), monday_in_march())
            .is_none());
    }

    #[test]
    fn test_confidence_is_clamped() {
        let handle = OracleHandle::new(StaticOracle::new(10.0, 0).with_confidence(1.7));
        let prediction = handle
            .predict(&aggregates_with_expense(10.0), monday_in_march())
            .unwrap();
        assert_eq!(prediction.confidence, 1.0);
    }

    #[test]
    fn test_load_optional_missing_file() {
        let handle = OracleHandle::load_optional(Path::new("/definitely/not/here.json"));
        assert!(!handle.is_loaded());
    }
}
