//! Stub oracles for testing
//!
//! Return fixed predictions (or fixed failures) so the pipeline can be
//! exercised without a trained model artifact.

use crate::error::{Error, Result};

use super::{PredictionOracle, AMOUNT_FEATURES, CATEGORY_FEATURES, DEFAULT_CONFIDENCE};

/// Labels used by stub oracles
pub const STUB_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Shopping",
    "Entertainment",
    "Bills",
    "Healthcare",
];

/// Oracle that always predicts the same amount and category index
#[derive(Debug, Clone)]
pub struct StaticOracle {
    pub amount: f64,
    pub category_index: usize,
    pub categories: Vec<String>,
    pub version: String,
    pub confidence: f64,
}

impl StaticOracle {
    pub fn new(amount: f64, category_index: usize) -> Self {
        Self {
            amount,
            category_index,
            categories: STUB_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            version: "test-1.0".to_string(),
            confidence: DEFAULT_CONFIDENCE,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

impl PredictionOracle for StaticOracle {
    fn predict_amount(&self, _features: &[f64; AMOUNT_FEATURES]) -> Result<f64> {
        Ok(self.amount)
    }

    fn classify_category(&self, _features: &[f64; CATEGORY_FEATURES]) -> Result<usize> {
        Ok(self.category_index)
    }

    fn categories(&self) -> &[String] {
        &self.categories
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn confidence(&self) -> f64 {
        self.confidence
    }
}

/// Oracle whose every prediction fails
#[derive(Debug, Clone)]
pub struct FailingOracle {
    pub reason: String,
    categories: Vec<String>,
}

impl FailingOracle {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            categories: STUB_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl PredictionOracle for FailingOracle {
    fn predict_amount(&self, _features: &[f64; AMOUNT_FEATURES]) -> Result<f64> {
        Err(Error::OraclePrediction(self.reason.clone()))
    }

    fn classify_category(&self, _features: &[f64; CATEGORY_FEATURES]) -> Result<usize> {
        Err(Error::OraclePrediction(self.reason.clone()))
    }

    fn categories(&self) -> &[String] {
        &self.categories
    }

    fn version(&self) -> &str {
        "failing"
    }
}
