use crate::core::Pipeline;
use crate::utils::error::Result;

/// Drives one pipeline run. A run either ends with the report published
/// (the returned URI) or fails before anything is visible under the final
/// key.
pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Reading source table...");
        let raw = self.pipeline.extract().await?;
        tracing::info!("Extracted {} rows", raw.row_count());

        tracing::info!("Computing aggregate views...");
        let bundle = self.pipeline.transform(raw).await?;
        tracing::info!(
            "Aggregated {} users, {} days, {} transaction types",
            bundle.user_summary.len(),
            bundle.daily_trend.len(),
            bundle.type_summary.len()
        );

        tracing::info!("Publishing report...");
        let uri = self.pipeline.load(bundle).await?;
        tracing::info!("Report published to: {}", uri);

        Ok(uri)
    }
}
