#[cfg(feature = "lambda")]
use analytics_etl::config::lambda::{LambdaConfig, S3ObjectStore};
#[cfg(feature = "lambda")]
use analytics_etl::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use analytics_etl::{CatalogSource, EtlEngine, ReportPipeline};
#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_s3::config::Region;
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "lambda")]
#[derive(Deserialize)]
pub struct Request {
    pub job_name: Option<String>,
    pub bucket: Option<String>,
    pub folder: Option<String>,
    pub format: Option<String>,
}

#[cfg(feature = "lambda")]
#[derive(Serialize)]
pub struct Response {
    pub message: String,
    pub report_uri: String,
}

#[cfg(feature = "lambda")]
fn boxed(e: analytics_etl::EtlError) -> Error {
    Box::new(e) as Box<dyn std::error::Error + Send + Sync>
}

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    tracing::info!("Starting analytics ETL Lambda function");

    // Event fields override the environment when present
    if let Some(bucket) = &event.payload.bucket {
        std::env::set_var("ANALYTICS_BUCKET", bucket);
    }
    if let Some(folder) = &event.payload.folder {
        std::env::set_var("ANALYTICS_FOLDER", folder);
    }
    if let Some(format) = &event.payload.format {
        std::env::set_var("REPORT_FORMAT", format);
    }

    let lambda_config = LambdaConfig::from_env().map_err(boxed)?;
    lambda_config.validate().map_err(boxed)?;

    let job_name = event
        .payload
        .job_name
        .clone()
        .unwrap_or_else(|| "transaction-analytics".to_string());
    let settings = lambda_config.job_settings(&job_name).map_err(boxed)?;

    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let region = Region::new(lambda_config.s3_region.clone());
    let config = aws_sdk_s3::config::Builder::from(&config)
        .region(region)
        .force_path_style(true)
        .build();
    let s3_client = S3Client::from_conf(config);

    let store = S3ObjectStore::new(s3_client, lambda_config.s3_bucket.clone());
    let source = CatalogSource::new(store.clone());
    let pipeline = ReportPipeline::new(source, store, settings);
    let engine = EtlEngine::new(pipeline);

    let report_uri = engine.run().await.map_err(boxed)?;

    tracing::info!("Analytics ETL Lambda function completed successfully");
    Ok(Response {
        message: "Analytics report published successfully".to_string(),
        report_uri,
    })
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
