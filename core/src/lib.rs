pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use config::AppConfig;
pub use error::ComplianceError;
pub use model::entry::{Direction, LogEntry, TestKind};
pub use model::grid::{CellStyle, GridCell, ReportGrid};
pub use model::month::MonthKey;
pub use model::record::RawRecord;
pub use model::stats::{MonthStats, RunStats};
pub use repository::{ConfigRepository, FileConfigRepository, JsonRecordSource, RecordSource};
pub use service::classifier::EntryClassifier;
pub use service::compliance::{check_compliance, ComplianceOutcome};
pub use service::detect::SageDetector;
pub use time::{parse_device_timestamp, week_start};
pub use usecase::report::{MonthFile, MonthReport, ReportSink, ReportUseCase, RunReport};
