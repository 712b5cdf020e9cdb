//! Data models for Pennywise

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

/// Caller-supplied record identifier (clients send either numbers or strings).
/// Anything else lands in `Other` so coercion can report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransactionId {
    Number(i64),
    Text(String),
    Other(Value),
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionId::Number(n) => write!(f, "{}", n),
            TransactionId::Text(s) => write!(f, "{}", s),
            TransactionId::Other(v) => write!(f, "{}", v),
        }
    }
}

/// Amount as it arrives on the wire, before numeric coercion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
    Other(Value),
}

/// A loosely-typed transaction record as supplied by a client or file.
///
/// Every field is optional and accepts any JSON value at this layer, so a
/// wrong-typed field never fails deserialization. [`crate::ingest`] turns the
/// record into a validated [`Transaction`] or fails with
/// `MalformedTransaction`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub id: Option<TransactionId>,
    #[serde(default, rename = "type")]
    pub kind: Option<Value>,
    #[serde(default)]
    pub amount: Option<RawAmount>,
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub timestamp: Option<Value>,
}

/// A validated transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Option<TransactionId>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Always finite and non-negative
    pub amount: f64,
    pub category: String,
    /// Wall-clock time in the offset the record was written in
    pub timestamp: NaiveDateTime,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// Saturday or Sunday (weekday index >= 5 in a Monday-start week)
    pub fn is_weekend(&self) -> bool {
        self.timestamp.weekday().num_days_from_monday() >= 5
    }
}

/// A gamified narrative insight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub title: String,
    pub description: String,
    /// Always within 0..=95
    pub probability: u8,
    pub icon: String,
    pub color: String,
}

/// Spending personality, one per analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personality {
    #[serde(rename = "type")]
    pub kind: String,
    pub badge: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub title: String,
    pub icon: String,
    pub unlocked: bool,
}

/// Point prediction produced by a loaded oracle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Rounded to two decimals
    pub predicted_amount: f64,
    pub predicted_category: String,
    /// Within 0.0..=1.0
    pub confidence: f64,
    pub model_version: String,
}

/// Everything produced by one `analyze` call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub scenarios: Vec<Scenario>,
    pub personality: Option<Personality>,
    pub achievements: Vec<Achievement>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx_at(y: i32, m: u32, d: u32) -> Transaction {
        Transaction {
            id: None,
            kind: TransactionType::Expense,
            amount: 10.0,
            category: "Food".to_string(),
            timestamp: NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_transaction_type_parsing() {
        assert_eq!(
            TransactionType::from_str("income").unwrap(),
            TransactionType::Income
        );
        assert_eq!(
            TransactionType::from_str(" Expense ").unwrap(),
            TransactionType::Expense
        );
        assert!(TransactionType::from_str("transfer").is_err());
    }

    #[test]
    fn test_direction_helpers() {
        let mut tx = tx_at(2022, 1, 3);
        assert!(tx.is_expense());
        assert!(!tx.is_income());

        tx.kind = TransactionType::Income;
        assert!(tx.is_income());
        assert!(!tx.is_expense());
    }

    #[test]
    fn test_weekend_detection() {
        // 2022-01-01 was a Saturday
        assert!(tx_at(2022, 1, 1).is_weekend());
        assert!(tx_at(2022, 1, 2).is_weekend());
        assert!(!tx_at(2022, 1, 3).is_weekend());
        assert!(!tx_at(2022, 1, 7).is_weekend());
    }

    #[test]
    fn test_raw_transaction_accepts_mixed_shapes() {
        let raw: RawTransaction = serde_json::from_value(serde_json::json!({
            "id": 7,
            "type": "expense",
            "amount": "12.50",
            "category": "Food",
            "timestamp": "2024-03-02T10:00:00"
        }))
        .unwrap();
        assert_eq!(raw.id, Some(TransactionId::Number(7)));
        assert_eq!(raw.amount, Some(RawAmount::Text("12.50".to_string())));

        let raw: RawTransaction = serde_json::from_value(serde_json::json!({
            "id": "tx-1",
            "amount": 3
        }))
        .unwrap();
        assert_eq!(raw.id, Some(TransactionId::Text("tx-1".to_string())));
        assert_eq!(raw.amount, Some(RawAmount::Number(3.0)));
        assert!(raw.kind.is_none());
    }

    #[test]
    fn test_raw_transaction_keeps_wrong_typed_fields() {
        let raw: RawTransaction = serde_json::from_value(serde_json::json!({
            "id": 1.5,
            "type": 3,
            "amount": true,
            "category": 7,
            "timestamp": 1704067200000_i64
        }))
        .unwrap();
        assert_eq!(raw.id, Some(TransactionId::Other(serde_json::json!(1.5))));
        assert_eq!(raw.kind, Some(serde_json::json!(3)));
        assert_eq!(raw.amount, Some(RawAmount::Other(Value::Bool(true))));
        assert_eq!(raw.category, Some(serde_json::json!(7)));
        assert_eq!(raw.timestamp, Some(serde_json::json!(1704067200000_i64)));
        assert_eq!(raw.id.unwrap().to_string(), "1.5");

        let raw: RawTransaction = serde_json::from_value(serde_json::json!({
            "id": 18446744073709551615_u64,
            "category": null
        }))
        .unwrap();
        assert!(matches!(raw.id, Some(TransactionId::Other(_))));
        assert!(raw.category.is_none());
    }

    #[test]
    fn test_personality_serializes_type_field() {
        let p = Personality {
            kind: "🔥 YOLO Spender".to_string(),
            badge: "🔥".to_string(),
            description: "x".to_string(),
        };
        let value = serde_json::to_value(&p).unwrap();
        assert_eq!(value["type"], "🔥 YOLO Spender");
    }
}
