#[cfg(feature = "lambda")]
use crate::domain::model::{JobSettings, ReportFormat};
#[cfg(feature = "lambda")]
use crate::domain::ports::ObjectStore;
#[cfg(feature = "lambda")]
use crate::utils::error::{EtlError, Result};
#[cfg(feature = "lambda")]
use crate::utils::validation::{
    validate_non_empty_string, validate_object_folder, validate_s3_bucket_name, Validate,
};
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use std::env;
#[cfg(feature = "lambda")]
use std::str::FromStr;

#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub s3_bucket: String,
    pub folder: String,
    pub database: String,
    pub table: String,
    pub format: String,
    pub s3_region: String,
}

#[cfg(feature = "lambda")]
impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            s3_bucket: env::var("ANALYTICS_BUCKET").map_err(|_| EtlError::MissingConfigError {
                field: "ANALYTICS_BUCKET".to_string(),
            })?,
            folder: env::var("ANALYTICS_FOLDER")
                .unwrap_or_else(|_| "analytics-output".to_string()),
            database: env::var("CATALOG_DATABASE").unwrap_or_else(|_| "wmndb".to_string()),
            table: env::var("CATALOG_TABLE").unwrap_or_else(|_| "transaction".to_string()),
            format: env::var("REPORT_FORMAT").unwrap_or_else(|_| "xlsx".to_string()),
            s3_region: env::var("S3_REGION").unwrap_or_else(|_| "ap-southeast-2".to_string()),
        })
    }

    pub fn job_settings(&self, job_name: &str) -> Result<JobSettings> {
        Ok(JobSettings {
            job_name: job_name.to_string(),
            folder: self.folder.clone(),
            database: self.database.clone(),
            table: self.table.clone(),
            format: ReportFormat::from_str(&self.format)?,
        })
    }
}

#[cfg(feature = "lambda")]
impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_s3_bucket_name("s3_bucket", &self.s3_bucket)?;
        validate_object_folder("folder", &self.folder)?;
        validate_non_empty_string("database", &self.database)?;
        validate_non_empty_string("table", &self.table)?;
        ReportFormat::from_str(&self.format)?;
        validate_non_empty_string("s3_region", &self.s3_region)?;

        tracing::info!("Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
}

#[cfg(feature = "lambda")]
impl S3ObjectStore {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    fn storage_error(operation: &str, key: &str, error: impl std::fmt::Display) -> EtlError {
        EtlError::StorageError {
            message: format!("{} failed for '{}': {}", operation, key, error),
        }
    }
}

#[cfg(feature = "lambda")]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, data: &[u8]) -> Result<String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(data.to_vec().into())
            .send()
            .await
            .map_err(|e| Self::storage_error("put", key, e))?;
        Ok(self.uri(key))
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| Self::storage_error("get", key, e))?;

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| Self::storage_error("get", key, e))?;
        Ok(data.into_bytes().to_vec())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let resp = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .send()
            .await
            .map_err(|e| Self::storage_error("list", prefix, e))?;

        // S3 already returns keys in lexicographic order
        Ok(resp
            .contents()
            .iter()
            .filter_map(|object| object.key().map(str::to_string))
            .collect())
    }

    async fn copy(&self, src_key: &str, dst_key: &str) -> Result<()> {
        self.client
            .copy_object()
            .bucket(&self.bucket)
            .copy_source(format!("{}/{}", self.bucket, src_key))
            .key(dst_key)
            .send()
            .await
            .map_err(|e| Self::storage_error("copy", src_key, e))?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        // S3 treats deletion of an absent key as success
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| Self::storage_error("delete", key, e))?;
        Ok(())
    }

    fn uri(&self, key: &str) -> String {
        format!("s3://{}/{}", self.bucket, key)
    }
}
