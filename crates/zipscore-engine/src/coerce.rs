//! Percentile coercion policies.

use zipscore_model::MetricKey;

use crate::error::ScoreError;

/// Lower bound of a percentile.
pub const PERCENTILE_MIN: f64 = 0.0;
/// Upper bound of a percentile.
pub const PERCENTILE_MAX: f64 = 100.0;

/// Permissive coercion: absent, empty, non-numeric or non-finite values are 0
/// (low burden assumed), numeric values are clamped to the percentile range.
///
/// Never fails. Malformed input degrades the score silently.
pub fn coerce_metric_or_default(raw: Option<&str>) -> f64 {
    raw.map(str::trim)
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .map_or(PERCENTILE_MIN, |value| value.clamp(PERCENTILE_MIN, PERCENTILE_MAX))
}

/// Strict coercion: the value must be present and a finite percentile in range.
pub fn coerce_metric_strict(key: MetricKey, raw: Option<&str>) -> Result<f64, ScoreError> {
    let value = raw.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(ScoreError::MissingMetric { key });
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && (PERCENTILE_MIN..=PERCENTILE_MAX).contains(v))
        .ok_or_else(|| ScoreError::InvalidMetric {
            key,
            raw: value.to_string(),
        })
}
