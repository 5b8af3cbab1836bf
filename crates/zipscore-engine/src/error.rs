//! Error types for the scoring engine.

use thiserror::Error;
use zipscore_ingest::IngestError;
use zipscore_model::{ConfigError, MetricKey};

/// Load-time failures. Fatal to engine construction.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

/// Postal code lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No record carries the normalized postal code.
    #[error("postal code not found: {code}")]
    NotFound { code: String },
}

/// Metric coercion failure under the strict policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("metric {key} is missing")]
    MissingMetric { key: MetricKey },

    #[error("metric {key} has invalid percentile value {raw:?}")]
    InvalidMetric { key: MetricKey, raw: String },
}

/// Per-request failure for scoring and comparison.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// One or more postal codes were not found.
    #[error("postal code(s) not found: {}", .missing_codes.join(", "))]
    NotFound { missing_codes: Vec<String> },

    #[error(transparent)]
    Score(#[from] ScoreError),
}

impl From<LookupError> for RequestError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound { code } => Self::NotFound {
                missing_codes: vec![code],
            },
        }
    }
}

impl RequestError {
    /// Postal codes that failed lookup, empty for scoring failures.
    pub fn missing_codes(&self) -> &[String] {
        match self {
            Self::NotFound { missing_codes } => missing_codes,
            Self::Score(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_codes() {
        let err = RequestError::NotFound {
            missing_codes: vec!["99999".to_string(), "00000".to_string()],
        };
        assert_eq!(err.to_string(), "postal code(s) not found: 99999, 00000");
        assert_eq!(err.missing_codes(), &["99999", "00000"]);
    }

    #[test]
    fn test_lookup_converts() {
        let err: RequestError = LookupError::NotFound {
            code: "99999".to_string(),
        }
        .into();
        assert_eq!(err.missing_codes(), &["99999"]);
    }
}
