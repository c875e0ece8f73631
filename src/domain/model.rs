use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::utils::error::EtlError;

/// One row as delivered by the catalog. Values are untyped so that null and
/// missing cells survive until the normalizer decides what to do with them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

/// A materialized catalog table: the column names the catalog reports plus
/// the record rows. A column can be present here while individual records
/// lack a value for it.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
}

impl RawTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A transaction after type and null normalization. `amount_double` is
/// always finite; null amounts were replaced by 0.0.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub user_id: String,
    pub transaction_type: String,
    pub amount_double: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummaryRow {
    pub user_id: String,
    pub max_amount: f64,
    pub min_amount: f64,
    pub average_amount: f64,
    pub total_amount: f64,
    pub transaction_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTrendRow {
    pub date: NaiveDate,
    pub total_amount: f64,
    pub transaction_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeSummaryRow {
    pub transaction_type: String,
    pub total_amount: f64,
    pub count: u64,
}

/// The four aggregate views computed from one normalized table.
#[derive(Debug, Clone)]
pub struct AnalyticsBundle {
    pub user_summary: Vec<UserSummaryRow>,
    pub daily_trend: Vec<DailyTrendRow>,
    pub top_users: Vec<UserSummaryRow>,
    pub type_summary: Vec<TypeSummaryRow>,
}

/// A single cell of a rendered view. `render` is the one rendering used for
/// both CSV serialization and spreadsheet column-width measurement, so the
/// two export paths agree on what a value looks like.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Float(f64),
    Int(u64),
    Date(NaiveDate),
}

impl CellValue {
    pub fn render(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Float(v) => v.to_string(),
            CellValue::Int(v) => v.to_string(),
            CellValue::Date(d) => d.to_string(),
        }
    }
}

/// A named view materialized into tabular form: sheet name, column headers
/// in schema order, rows in view order.
#[derive(Debug, Clone)]
pub struct DataTable {
    pub name: &'static str,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<CellValue>>,
}

impl UserSummaryRow {
    pub fn cells(&self) -> Vec<CellValue> {
        vec![
            CellValue::Text(self.user_id.clone()),
            CellValue::Float(self.max_amount),
            CellValue::Float(self.min_amount),
            CellValue::Float(self.average_amount),
            CellValue::Float(self.total_amount),
            CellValue::Int(self.transaction_count),
        ]
    }
}

impl DailyTrendRow {
    pub fn cells(&self) -> Vec<CellValue> {
        vec![
            CellValue::Date(self.date),
            CellValue::Float(self.total_amount),
            CellValue::Int(self.transaction_count),
        ]
    }
}

impl TypeSummaryRow {
    pub fn cells(&self) -> Vec<CellValue> {
        vec![
            CellValue::Text(self.transaction_type.clone()),
            CellValue::Float(self.total_amount),
            CellValue::Int(self.count),
        ]
    }
}

pub const USER_SUMMARY_COLUMNS: [&str; 6] = [
    "User ID",
    "Max Amount",
    "Min Amount",
    "Average Amount",
    "Total Amount",
    "Transaction Count",
];

pub const DAILY_TREND_COLUMNS: [&str; 3] = ["Date", "Total Amount", "Transaction Count"];

pub const TYPE_SUMMARY_COLUMNS: [&str; 3] = ["Transaction Type", "Total Amount", "Count"];

pub fn user_summary_table(name: &'static str, rows: &[UserSummaryRow]) -> DataTable {
    DataTable {
        name,
        columns: USER_SUMMARY_COLUMNS.to_vec(),
        rows: rows.iter().map(UserSummaryRow::cells).collect(),
    }
}

impl AnalyticsBundle {
    /// The four views in workbook sheet order.
    pub fn sheets(&self) -> Vec<DataTable> {
        vec![
            user_summary_table("User_Summary", &self.user_summary),
            DataTable {
                name: "Daily_Trend",
                columns: DAILY_TREND_COLUMNS.to_vec(),
                rows: self.daily_trend.iter().map(DailyTrendRow::cells).collect(),
            },
            user_summary_table("Top_Users", &self.top_users),
            DataTable {
                name: "Type_Summary",
                columns: TYPE_SUMMARY_COLUMNS.to_vec(),
                rows: self.type_summary.iter().map(TypeSummaryRow::cells).collect(),
            },
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Xlsx,
    Csv,
}

impl FromStr for ReportFormat {
    type Err = EtlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xlsx" | "excel" => Ok(ReportFormat::Xlsx),
            "csv" => Ok(ReportFormat::Csv),
            other => Err(EtlError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Supported report formats are 'xlsx' and 'csv'".to_string(),
            }),
        }
    }
}

/// Resolved job configuration passed into the pipeline. Built once from the
/// CLI flags, a TOML file, or the Lambda environment; nothing reads global
/// state after this point.
#[derive(Debug, Clone)]
pub struct JobSettings {
    pub job_name: String,
    pub folder: String,
    pub database: String,
    pub table: String,
    pub format: ReportFormat,
}
