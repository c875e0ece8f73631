use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use crate::domain::model::{RawTable, Record};
use crate::domain::ports::{DatasetSource, ObjectStore};
use crate::utils::error::{EtlError, Result};

/// Dataset source backed by the object store: a catalog entity
/// `{database}/{table}` resolves to the prefix `{database}/{table}/`, under
/// which the table is stored as one or more CSV part objects sharing a
/// header row.
#[derive(Debug, Clone)]
pub struct CatalogSource<S: ObjectStore> {
    store: S,
}

impl<S: ObjectStore> CatalogSource<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: ObjectStore> DatasetSource for CatalogSource<S> {
    async fn read_table(&self, database: &str, table: &str) -> Result<RawTable> {
        let prefix = format!("{}/{}/", database, table);
        let keys = self.store.list(&prefix).await?;
        let parts: Vec<&String> = keys.iter().filter(|key| key.ends_with(".csv")).collect();

        if parts.is_empty() {
            return Err(EtlError::AggregationError {
                message: format!("catalog table {}/{} has no data objects", database, table),
            });
        }

        let mut result = RawTable::default();
        for part in parts {
            tracing::debug!("reading catalog part: {}", part);
            let bytes = self.store.get(part).await?;
            parse_part(part, &bytes, &mut result)?;
        }

        tracing::debug!(
            "catalog table {}/{}: {} rows, {} columns",
            database,
            table,
            result.row_count(),
            result.columns.len()
        );
        Ok(result)
    }
}

fn parse_part(key: &str, bytes: &[u8], table: &mut RawTable) -> Result<()> {
    let mut reader = csv::Reader::from_reader(bytes);
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    if table.columns.is_empty() {
        table.columns = headers.clone();
    } else if table.columns != headers {
        return Err(EtlError::AggregationError {
            message: format!("part {} disagrees with the table header row", key),
        });
    }

    for record in reader.records() {
        let record = record?;
        let mut data = HashMap::new();
        for (column, raw) in headers.iter().zip(record.iter()) {
            data.insert(column.clone(), infer_cell(raw));
        }
        table.rows.push(Record { data });
    }

    Ok(())
}

// The catalog types columns; CSV does not. Empty cells become null, numeric
// text becomes numbers, everything else stays a string.
fn infer_cell(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    if let Ok(integer) = raw.parse::<i64>() {
        return Value::from(integer);
    }
    if let Ok(float) = raw.parse::<f64>() {
        return Value::from(float);
    }
    Value::String(raw.to_string())
}

/// In-memory dataset source: hands back a fixed table regardless of the
/// requested entity. Lets the aggregation pipeline run without any storage
/// behind it.
#[derive(Debug, Clone)]
pub struct StaticSource {
    table: RawTable,
}

impl StaticSource {
    pub fn new(table: RawTable) -> Self {
        Self { table }
    }
}

#[async_trait]
impl DatasetSource for StaticSource {
    async fn read_table(&self, _database: &str, _table: &str) -> Result<RawTable> {
        Ok(self.table.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_cell_types() {
        assert_eq!(infer_cell(""), Value::Null);
        assert_eq!(infer_cell("125"), Value::from(125_i64));
        assert_eq!(infer_cell("12.5"), Value::from(12.5));
        assert_eq!(infer_cell("TRANSFER"), Value::from("TRANSFER"));
    }

    #[test]
    fn test_parse_part_builds_records() {
        let mut table = RawTable::default();
        let csv = b"user_id,amount\nu1,100\nu2,\n";

        parse_part("db/t/part-0.csv", csv, &mut table).unwrap();

        assert_eq!(table.columns, vec!["user_id", "amount"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0].data["amount"], Value::from(100_i64));
        assert_eq!(table.rows[1].data["amount"], Value::Null);
    }

    #[test]
    fn test_parse_part_rejects_header_mismatch() {
        let mut table = RawTable::default();
        parse_part("db/t/part-0.csv", b"user_id,amount\nu1,1\n", &mut table).unwrap();

        let err = parse_part("db/t/part-1.csv", b"amount,user_id\n1,u1\n", &mut table).unwrap_err();
        assert!(matches!(err, EtlError::AggregationError { .. }));
    }
}
