//! Pennywise Core Library
//!
//! Transaction analytics for the Pennywise personal finance app:
//! - Ingestion of loosely-typed transaction records (JSON, CSV)
//! - Spending aggregation (totals, categories, weekend share, savings rate)
//! - Optional prediction oracle loaded from a trained model bundle
//! - Gamified scenario narratives, spending personality, and achievements
//! - Layered TOML configuration

pub mod achievements;
pub mod aggregate;
pub mod config;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod models;
pub mod oracle;
pub mod personality;
pub mod scenarios;

pub use aggregate::{aggregate, Aggregates};
pub use config::{AppConfig, OracleSettings, ServerSettings};
pub use engine::AnalyticsEngine;
pub use error::{Error, Result};
pub use models::{
    Achievement, AnalysisReport, Personality, PredictionResult, RawAmount, RawTransaction,
    Scenario, Transaction, TransactionId, TransactionType,
};
pub use oracle::{ModelBundle, OracleHandle, PredictionOracle};
pub use scenarios::{ScenarioGenerator, ScenarioRule};
