use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::{aggregate, export, normalize, render};
use crate::domain::model::{
    user_summary_table, AnalyticsBundle, JobSettings, RawTable, ReportFormat,
};
use crate::domain::ports::{DatasetSource, ObjectStore, Pipeline};
use crate::utils::error::Result;

pub fn generation_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}

pub fn xlsx_key(folder: &str, timestamp: &str) -> String {
    format!("{}/Combined_Analytics_{}.xlsx", folder, timestamp)
}

pub fn csv_key(folder: &str, timestamp: &str) -> String {
    format!("{}/Analytical_Report_{}.csv", folder, timestamp)
}

pub fn temp_prefix(folder: &str, timestamp: &str) -> String {
    format!("{}/temp_{}/", folder, timestamp)
}

/// Wires the dataset source, the normalizer, the aggregation engine and one
/// of the two export paths into the extract/transform/load stages.
pub struct ReportPipeline<D: DatasetSource, S: ObjectStore> {
    source: D,
    store: S,
    settings: JobSettings,
    generated_at: DateTime<Utc>,
}

impl<D: DatasetSource, S: ObjectStore> ReportPipeline<D, S> {
    pub fn new(source: D, store: S, settings: JobSettings) -> Self {
        Self {
            source,
            store,
            settings,
            generated_at: Utc::now(),
        }
    }
}

#[async_trait]
impl<D: DatasetSource, S: ObjectStore> Pipeline for ReportPipeline<D, S> {
    async fn extract(&self) -> Result<RawTable> {
        tracing::debug!(
            "reading catalog table {}/{}",
            self.settings.database,
            self.settings.table
        );
        self.source
            .read_table(&self.settings.database, &self.settings.table)
            .await
    }

    async fn transform(&self, raw: RawTable) -> Result<AnalyticsBundle> {
        let transactions = normalize::normalize(&raw)?;
        Ok(aggregate::aggregate(&transactions))
    }

    async fn load(&self, bundle: AnalyticsBundle) -> Result<String> {
        let timestamp = generation_timestamp(self.generated_at);
        let folder = &self.settings.folder;

        match self.settings.format {
            ReportFormat::Xlsx => {
                let bytes = render::render_workbook(&bundle.sheets())?;
                self.store.put(&xlsx_key(folder, &timestamp), &bytes).await
            }
            ReportFormat::Csv => {
                let ordered = aggregate::order_by_total_desc(&bundle.user_summary);
                export::export_single_csv(
                    &self.store,
                    &user_summary_table("User_Summary", &ordered),
                    &temp_prefix(folder, &timestamp),
                    &csv_key(folder, &timestamp),
                )
                .await
            }
        }
    }
}
