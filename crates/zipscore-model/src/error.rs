//! Error types for scoring configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a [`ScoringConfig`](crate::ScoringConfig).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read the configuration file.
    #[error("failed to read config {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration is not valid TOML or has unknown fields.
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Weight vector is negative, non-finite, or does not sum to 1.0.
    #[error("invalid category weights ({reason}): sum is {sum}")]
    InvalidWeights { reason: &'static str, sum: f64 },

    /// Delimiter must be a single ASCII character.
    #[error("delimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(char),

    /// Header override is empty after trimming.
    #[error("expected header text for {key} is empty")]
    EmptyHeaderText { key: String },
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
