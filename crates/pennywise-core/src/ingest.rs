//! Transaction ingestion
//!
//! Turns loosely-typed records (API bodies, JSON files, CSV exports) into
//! validated [`Transaction`]s. Coercion fails fast: the first record whose
//! type, amount, category or timestamp cannot be coerced aborts the batch with
//! `MalformedTransaction` naming that record.

use std::io::Read;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{RawAmount, RawTransaction, Transaction, TransactionId, TransactionType};

/// Naive layouts tried after RFC 3339, most specific first
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

impl Transaction {
    /// Validate a raw record. `index` identifies the record in error messages
    /// when it carries no id.
    pub fn from_raw(raw: &RawTransaction, index: usize) -> Result<Self> {
        let record = record_label(raw.id.as_ref(), index);

        if let Some(TransactionId::Other(value)) = &raw.id {
            if !value.is_number() {
                return Err(Error::malformed(
                    &record,
                    "id",
                    format!("{} is not a number or string", value),
                ));
            }
        }

        let kind = text_field(raw.kind.as_ref(), &record, "type")?
            .parse::<TransactionType>()
            .map_err(|e| Error::malformed(&record, "type", e))?;

        let amount = match &raw.amount {
            Some(value) => parse_amount(value).map_err(|e| Error::malformed(&record, "amount", e))?,
            None => return Err(Error::malformed(&record, "amount", "missing")),
        };

        let category = text_field(raw.category.as_ref(), &record, "category")?.trim();
        if category.is_empty() {
            return Err(Error::malformed(&record, "category", "missing"));
        }

        let timestamp = parse_timestamp(text_field(raw.timestamp.as_ref(), &record, "timestamp")?)
            .map_err(|e| Error::malformed(&record, "timestamp", e))?;

        Ok(Self {
            id: raw.id.clone(),
            kind,
            amount,
            category: category.to_string(),
            timestamp,
        })
    }
}

/// A field that must be present and a JSON string
fn text_field<'a>(value: Option<&'a Value>, record: &str, field: &'static str) -> Result<&'a str> {
    match value {
        None | Some(Value::Null) => Err(Error::malformed(record, field, "missing")),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(Error::malformed(
            record,
            field,
            format!("expected a string, got {}", other),
        )),
    }
}

fn record_label(id: Option<&TransactionId>, index: usize) -> String {
    match id {
        Some(id) => id.to_string(),
        None => format!("#{}", index),
    }
}

/// Coerce a JSON number or numeric string into a finite, non-negative amount
pub fn parse_amount(value: &RawAmount) -> std::result::Result<f64, String> {
    let amount = match value {
        RawAmount::Number(n) => *n,
        RawAmount::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("'{}' is not a number", s))?,
        RawAmount::Other(v) => return Err(format!("{} is not a number", v)),
    };

    if !amount.is_finite() {
        return Err(format!("{} is not finite", amount));
    }
    if amount < 0.0 {
        return Err(format!("{} is negative", amount));
    }
    Ok(amount)
}

/// Parse a timestamp into wall-clock time.
///
/// Offset-qualified timestamps keep the local time of their own offset, so a
/// Saturday evening in `+05:30` stays a Saturday.
pub fn parse_timestamp(value: &str) -> std::result::Result<NaiveDateTime, String> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }

    Err(format!("'{}' is not a recognised date-time", value))
}

/// Coerce every record in order, stopping at the first malformed one.
///
/// Income and expense totals must stay finite; the record that pushes either
/// past `f64::MAX` is rejected on its amount.
pub fn coerce_all(raw: &[RawTransaction]) -> Result<Vec<Transaction>> {
    let mut income = 0.0_f64;
    let mut expense = 0.0_f64;
    let mut transactions = Vec::with_capacity(raw.len());

    for (index, record) in raw.iter().enumerate() {
        let tx = Transaction::from_raw(record, index)?;
        let total = if tx.is_income() { &mut income } else { &mut expense };
        *total += tx.amount;
        if !total.is_finite() {
            return Err(Error::malformed(
                record_label(record.id.as_ref(), index),
                "amount",
                format!("{} total overflows", tx.kind),
            ));
        }
        transactions.push(tx);
    }

    Ok(transactions)
}

/// Read raw records from JSON. See [`records_from_value`] for the accepted
/// layouts.
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<RawTransaction>> {
    let document: Value = serde_json::from_reader(reader)?;
    let records = records_from_value(document)?;
    debug!(count = records.len(), "Parsed JSON transactions");
    Ok(records)
}

/// Extract raw records from a decoded JSON document.
///
/// Accepts a bare array or the `/analyze` body shape `{"transactions": [...]}`
/// (a missing key is an empty list). Each element is decoded on its own, so an
/// element that is not an object is reported as that record's error.
pub fn records_from_value(document: Value) -> Result<Vec<RawTransaction>> {
    let items = match document {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("transactions") {
            Some(Value::Array(items)) => items,
            None | Some(Value::Null) => Vec::new(),
            Some(other) => {
                return Err(Error::InvalidDocument(format!(
                    "`transactions` must be a list, got {}",
                    other
                )))
            }
        },
        other => {
            return Err(Error::InvalidDocument(format!(
                "expected a list or an object, got {}",
                other
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<RawTransaction>(item)
                .map_err(|e| Error::malformed(format!("#{}", index), "record", e.to_string()))
        })
        .collect()
}

#[derive(Deserialize)]
struct CsvRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    amount: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
}

impl From<CsvRecord> for RawTransaction {
    fn from(record: CsvRecord) -> Self {
        let id = record.id.map(|id| match id.parse::<i64>() {
            Ok(n) => TransactionId::Number(n),
            Err(_) => TransactionId::Text(id),
        });

        RawTransaction {
            id,
            kind: record.kind.map(Value::String),
            amount: record.amount.map(RawAmount::Text),
            category: record.category.map(Value::String),
            timestamp: record.timestamp.map(Value::String),
        }
    }
}

/// Read raw records from a headered CSV.
/// Columns are matched by name: `id,type,amount,category,timestamp`.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<RawTransaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.deserialize::<CsvRecord>() {
        records.push(result?.into());
    }

    debug!(count = records.len(), "Parsed CSV transactions");
    Ok(records)
}
