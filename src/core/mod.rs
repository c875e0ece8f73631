pub mod aggregate;
pub mod catalog;
pub mod etl;
pub mod export;
pub mod normalize;
pub mod pipeline;
pub mod render;

pub use crate::domain::model::{AnalyticsBundle, JobSettings, RawTable, Record, ReportFormat};
pub use crate::domain::ports::{DatasetSource, ObjectStore, Pipeline};
pub use crate::utils::error::Result;
