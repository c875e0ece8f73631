use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use crate::domain::model::{RawTable, Record, Transaction};
use crate::utils::error::{EtlError, Result};

const REQUIRED_COLUMNS: [&str; 4] = ["user_id", "transaction_type", "amount", "timestamp"];

/// Coerces the raw table into normalized transactions: `amount` is cast to
/// f64 with null/missing values filled as 0.0. No rows are dropped.
pub fn normalize(table: &RawTable) -> Result<Vec<Transaction>> {
    for column in REQUIRED_COLUMNS {
        if !table.has_column(column) {
            return Err(EtlError::SchemaError {
                column: column.to_string(),
            });
        }
    }

    let mut transactions = Vec::with_capacity(table.rows.len());
    for record in &table.rows {
        transactions.push(Transaction {
            user_id: string_field(record, "user_id"),
            transaction_type: string_field(record, "transaction_type"),
            amount_double: amount_field(record),
            timestamp: timestamp_field(record)?,
        });
    }

    Ok(transactions)
}

fn string_field(record: &Record, name: &str) -> String {
    match record.data.get(name) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn amount_field(record: &Record) -> f64 {
    record
        .data
        .get("amount")
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

fn timestamp_field(record: &Record) -> Result<DateTime<Utc>> {
    let raw = match record.data.get("timestamp") {
        Some(Value::String(s)) if !s.is_empty() => s,
        _ => {
            return Err(EtlError::AggregationError {
                message: "row has no evaluable 'timestamp' value".to_string(),
            })
        }
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }

    Err(EtlError::AggregationError {
        message: format!("cannot evaluate timestamp '{}'", raw),
    })
}
