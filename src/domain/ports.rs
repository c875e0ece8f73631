use crate::domain::model::{AnalyticsBundle, RawTable};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Durable object storage as seen by the pipeline. Keys are '/'-separated
/// strings; the namespace (bucket or base directory) belongs to the
/// implementation. `list` returns keys in lexicographic order. `delete` of
/// an absent key is not an error.
pub trait ObjectStore: Send + Sync {
    fn put(
        &self,
        key: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
    fn get(&self, key: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn list(&self, prefix: &str) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
    fn copy(
        &self,
        src_key: &str,
        dst_key: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn delete(&self, key: &str) -> impl std::future::Future<Output = Result<()>> + Send;
    fn uri(&self, key: &str) -> String;
}

/// Supplies the raw transaction table for a catalog entity.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn read_table(&self, database: &str, table: &str) -> Result<RawTable>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<RawTable>;
    async fn transform(&self, raw: RawTable) -> Result<AnalyticsBundle>;
    async fn load(&self, bundle: AnalyticsBundle) -> Result<String>;
}
