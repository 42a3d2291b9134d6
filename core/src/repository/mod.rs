pub mod config;
pub mod records;
pub mod traits;

// Re-export
pub use config::FileConfigRepository;
pub use records::{discover_records, JsonRecordSource};
pub use traits::{ConfigRepository, RecordSource};
