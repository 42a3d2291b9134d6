//! Errors that end a whole run.
//!
//! Record-level problems (unknown direction, no test marker, bad date) are not
//! errors: the classifier simply drops the record.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComplianceError {
    /// The decoded input held no records at all.
    #[error("no log records found in input{}", .0.as_deref().map(|s| format!(" ({})", s)).unwrap_or_default())]
    EmptyInput(Option<String>),

    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Failure raised by a renderer or archive collaborator, passed through as-is.
    #[error(transparent)]
    Sink(#[from] anyhow::Error),
}
