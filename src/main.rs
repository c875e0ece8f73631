use analytics_etl::utils::{logger, validation::Validate};
use analytics_etl::{
    CatalogSource, CliConfig, EtlEngine, LocalObjectStore, ReportPipeline, TomlJobConfig,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting analytics-etl job '{}'", config.job_name);
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    // A TOML job file, when given, replaces the per-flag job settings
    let (settings, data_dir) = match &config.config {
        Some(path) => {
            let file = TomlJobConfig::from_file(path)?;
            file.validate()?;
            let data_dir = file
                .output
                .data_dir
                .clone()
                .unwrap_or_else(|| config.data_dir.clone());
            (file.job_settings()?, data_dir)
        }
        None => (config.job_settings()?, config.data_dir.clone()),
    };

    let store = LocalObjectStore::new(data_dir);
    let source = CatalogSource::new(store.clone());
    let pipeline = ReportPipeline::new(source, store, settings);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(uri) => {
            tracing::info!("Run completed successfully");
            println!("✅ Analytics report published successfully!");
            println!("📁 Report location: {}", uri);
        }
        Err(e) => {
            tracing::error!("ETL run failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
