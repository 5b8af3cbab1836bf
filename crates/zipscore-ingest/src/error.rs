//! Error types for dataset ingestion.

use std::path::PathBuf;
use thiserror::Error;
use zipscore_model::MetricKey;

/// Errors that can occur while loading a dataset or resolving its header.
///
/// All of these are load-time failures: an engine cannot be built from a
/// dataset that produced one.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Dataset file does not exist.
    #[error("dataset not found: {path}")]
    ResourceNotFound { path: PathBuf },

    /// Failed to read the dataset file.
    #[error("failed to read dataset {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// The CSV reader rejected the file (for example invalid UTF-8).
    #[error("failed to parse dataset {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Fewer than a header line and one data line remain after filtering.
    #[error("dataset {path} is empty: {lines} non-empty line(s), need a header and at least one row")]
    EmptyDataset { path: PathBuf, lines: usize },

    // === Header Errors ===
    /// A required metric has no matching header column.
    #[error(
        "required header \"{expected}\" for {key} not found in dataset; available headers: {}",
        .available.join(", ")
    )]
    RequiredHeaderMissing {
        key: MetricKey,
        expected: String,
        available: Vec<String>,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
