use crate::domain::model::{JobSettings, ReportFormat};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_object_folder, Validate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Job configuration loaded from a TOML file; an alternative to spelling
/// everything out as CLI flags.
///
/// ```toml
/// [job]
/// name = "transaction-analytics"
/// format = "csv"
///
/// [catalog]
/// database = "wmndb"
/// table = "transaction"
///
/// [output]
/// folder = "analytics-output"
/// data_dir = "./data"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlJobConfig {
    pub job: JobSection,
    pub catalog: CatalogSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSection {
    pub name: String,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSection {
    pub database: String,
    pub table: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    pub folder: String,
    pub data_dir: Option<String>,
}

impl TomlJobConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    pub fn job_settings(&self) -> Result<JobSettings> {
        Ok(JobSettings {
            job_name: self.job.name.clone(),
            folder: self.output.folder.clone(),
            database: self.catalog.database.clone(),
            table: self.catalog.table.clone(),
            format: ReportFormat::from_str(self.job.format.as_deref().unwrap_or("xlsx"))?,
        })
    }
}

impl Validate for TomlJobConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("job.name", &self.job.name)?;
        validate_object_folder("output.folder", &self.output.folder)?;
        validate_non_empty_string("catalog.database", &self.catalog.database)?;
        validate_non_empty_string("catalog.table", &self.catalog.table)?;
        if let Some(format) = &self.job.format {
            ReportFormat::from_str(format)?;
        }
        Ok(())
    }
}
