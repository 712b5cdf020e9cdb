//! Model bundle artifact
//!
//! The offline training step exports a JSON bundle holding a linear amount
//! regressor, a linear one-vs-rest category classifier, the category labels,
//! and a version tag. Shape is validated on load so a bundle that cannot
//! score the engine's feature layout is rejected before serving.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::{PredictionOracle, AMOUNT_FEATURES, CATEGORY_FEATURES, DEFAULT_CONFIDENCE};

fn default_confidence() -> f64 {
    DEFAULT_CONFIDENCE
}

/// `intercept + weights · features`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub intercept: f64,
    pub weights: Vec<f64>,
}

impl LinearRegressor {
    pub fn predict(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.weights.len() {
            return Err(Error::OraclePrediction(format!(
                "amount model expects {} features, got {}",
                self.weights.len(),
                features.len()
            )));
        }
        Ok(self.intercept + dot(&self.weights, features))
    }
}

/// One linear scorer per class; the highest score wins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearClassifier {
    pub intercepts: Vec<f64>,
    pub weights: Vec<Vec<f64>>,
}

impl LinearClassifier {
    pub fn classes(&self) -> usize {
        self.weights.len()
    }

    /// Index of the best-scoring class (first index on ties)
    pub fn predict(&self, features: &[f64]) -> Result<usize> {
        if self.intercepts.len() != self.weights.len() {
            return Err(Error::OraclePrediction(format!(
                "category model has {} intercepts for {} classes",
                self.intercepts.len(),
                self.weights.len()
            )));
        }

        let mut best: Option<(usize, f64)> = None;
        for (index, (row, intercept)) in self.weights.iter().zip(&self.intercepts).enumerate() {
            if row.len() != features.len() {
                return Err(Error::OraclePrediction(format!(
                    "category model class {} expects {} features, got {}",
                    index,
                    row.len(),
                    features.len()
                )));
            }

            let score = intercept + dot(row, features);
            if score.is_nan() {
                return Err(Error::OraclePrediction(format!(
                    "category model class {} scored NaN",
                    index
                )));
            }

            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((index, score)),
            }
        }

        best.map(|(index, _)| index)
            .ok_or_else(|| Error::OraclePrediction("category model has no classes".into()))
    }
}

fn dot(weights: &[f64], features: &[f64]) -> f64 {
    weights.iter().zip(features).map(|(w, x)| w * x).sum()
}

/// Versioned oracle artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBundle {
    pub version: String,
    /// When the bundle was trained (informational)
    #[serde(default)]
    pub created: Option<String>,
    pub categories: Vec<String>,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    pub amount_model: LinearRegressor,
    pub category_model: LinearClassifier,
}

impl ModelBundle {
    /// Load and validate a bundle from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::OracleLoad(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate a bundle from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        let bundle: ModelBundle = serde_json::from_str(content)
            .map_err(|e| Error::OracleLoad(format!("Invalid model bundle: {}", e)))?;
        bundle.validate()?;
        Ok(bundle)
    }

    /// Check the bundle can score the engine's feature layout
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(Error::OracleLoad("Bundle has no version".into()));
        }
        if self.categories.is_empty() {
            return Err(Error::OracleLoad("Bundle has no categories".into()));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(Error::OracleLoad(format!(
                "Confidence {} outside 0..=1",
                self.confidence
            )));
        }
        if self.amount_model.weights.len() != AMOUNT_FEATURES {
            return Err(Error::OracleLoad(format!(
                "Amount model has {} weights, expected {}",
                self.amount_model.weights.len(),
                AMOUNT_FEATURES
            )));
        }

        let classes = self.category_model.classes();
        if classes != self.categories.len() || self.category_model.intercepts.len() != classes {
            return Err(Error::OracleLoad(format!(
                "Category model has {} classes and {} intercepts for {} labels",
                classes,
                self.category_model.intercepts.len(),
                self.categories.len()
            )));
        }
        if let Some(row) = self
            .category_model
            .weights
            .iter()
            .find(|row| row.len() != CATEGORY_FEATURES)
        {
            return Err(Error::OracleLoad(format!(
                "Category model row has {} weights, expected {}",
                row.len(),
                CATEGORY_FEATURES
            )));
        }

        Ok(())
    }
}

impl PredictionOracle for ModelBundle {
    fn predict_amount(&self, features: &[f64; AMOUNT_FEATURES]) -> Result<f64> {
        self.amount_model.predict(features)
    }

    fn classify_category(&self, features: &[f64; CATEGORY_FEATURES]) -> Result<usize> {
        self.category_model.predict(features)
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
