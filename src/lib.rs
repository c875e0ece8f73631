pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalObjectStore, toml_config::TomlJobConfig, CliConfig};

#[cfg(feature = "lambda")]
pub use config::lambda::{LambdaConfig, S3ObjectStore};

pub use core::{
    catalog::{CatalogSource, StaticSource},
    etl::EtlEngine,
    pipeline::ReportPipeline,
};
pub use domain::model::{JobSettings, ReportFormat};
pub use utils::error::{EtlError, Result};
