use crate::config::AppConfig;
use crate::error::ComplianceError;
use crate::model::record::RawRecord;
use anyhow::Result;

pub trait ConfigRepository {
    fn load(&self) -> Result<AppConfig>;
    fn save(&self, config: &AppConfig) -> Result<()>;
}

/// Supplier of decoded raw records for one run.
pub trait RecordSource {
    /// Fails with [`ComplianceError::EmptyInput`] when nothing usable is found.
    fn records(&self) -> Result<Vec<RawRecord>, ComplianceError>;
}
