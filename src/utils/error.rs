use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Schema error: required column '{column}' is missing from the source table")]
    SchemaError { column: String },

    #[error("Aggregation failed: {message}")]
    AggregationError { message: String },

    #[error("Export incomplete: no data part found under '{prefix}'")]
    ExportIncompleteError { prefix: String },

    #[error("Storage operation failed: {message}")]
    StorageError { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration file error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, EtlError>;
