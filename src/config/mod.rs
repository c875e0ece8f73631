pub mod cli;
pub mod lambda;
pub mod toml_config;

use crate::domain::model::{JobSettings, ReportFormat};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_object_folder, Validate};
use clap::Parser;
use std::str::FromStr;

#[derive(Debug, Clone, Parser)]
#[command(name = "analytics-etl")]
#[command(about = "Aggregates the transaction table and publishes analytics reports")]
pub struct CliConfig {
    #[arg(long)]
    pub job_name: String,

    #[arg(long, default_value = "analytics-output")]
    pub folder: String,

    #[arg(long, default_value = "wmndb")]
    pub database: String,

    #[arg(long, default_value = "transaction")]
    pub table: String,

    #[arg(long, default_value = "xlsx", help = "Report format: xlsx or csv")]
    pub format: String,

    #[arg(
        long,
        default_value = "./data",
        help = "Base directory of the local object store"
    )]
    pub data_dir: String,

    #[arg(long, help = "Path to a TOML job configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn job_settings(&self) -> Result<JobSettings> {
        Ok(JobSettings {
            job_name: self.job_name.clone(),
            folder: self.folder.clone(),
            database: self.database.clone(),
            table: self.table.clone(),
            format: ReportFormat::from_str(&self.format)?,
        })
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("job_name", &self.job_name)?;
        validate_object_folder("folder", &self.folder)?;
        validate_non_empty_string("database", &self.database)?;
        validate_non_empty_string("table", &self.table)?;
        ReportFormat::from_str(&self.format)?;
        validate_non_empty_string("data_dir", &self.data_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CliConfig {
        CliConfig {
            job_name: "transaction-analytics".to_string(),
            folder: "analytics-output".to_string(),
            database: "wmndb".to_string(),
            table: "transaction".to_string(),
            format: "xlsx".to_string(),
            data_dir: "./data".to_string(),
            config: None,
            verbose: false,
        }
    }

    #[test]
    fn test_valid_config_resolves_settings() {
        let config = config();
        assert!(config.validate().is_ok());

        let settings = config.job_settings().unwrap();
        assert_eq!(settings.format, ReportFormat::Xlsx);
        assert_eq!(settings.table, "transaction");
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let mut config = config();
        config.format = "parquet".to_string();
        assert!(config.validate().is_err());
        assert!(config.job_settings().is_err());
    }

    #[test]
    fn test_slashed_folder_is_rejected() {
        let mut config = config();
        config.folder = "analytics-output/".to_string();
        assert!(config.validate().is_err());
    }
}
