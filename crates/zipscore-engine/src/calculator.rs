//! Weighted composite scoring.
//!
//! Each category's goodness is `100 - mean(burden percentiles)`. The composite
//! is the weighted sum of the goodness values (0-100), rounded to the nearest
//! integer and then expressed on the configured output scale.

use std::collections::BTreeMap;

use zipscore_ingest::LocationRecord;
use zipscore_model::{
    Category, CategoryScores, ConfigError, MetricKey, MetricPolicy, OutputScale, Score,
    ScoringConfig, Weights,
};

use crate::coerce::{PERCENTILE_MAX, coerce_metric_or_default, coerce_metric_strict};
use crate::error::ScoreError;

/// Converts a record's percentile metrics into a [`Score`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreCalculator {
    weights: Weights,
    scale: OutputScale,
    policy: MetricPolicy,
}

impl ScoreCalculator {
    /// Create a calculator, validating the weight vector.
    pub fn new(
        weights: Weights,
        scale: OutputScale,
        policy: MetricPolicy,
    ) -> Result<Self, ConfigError> {
        weights.validate()?;
        Ok(Self {
            weights,
            scale,
            policy,
        })
    }

    pub fn from_config(config: &ScoringConfig) -> Result<Self, ConfigError> {
        Self::new(config.weights, config.scale, config.policy)
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn scale(&self) -> OutputScale {
        self.scale
    }

    pub fn policy(&self) -> MetricPolicy {
        self.policy
    }

    /// Score a record under the configured metric policy.
    ///
    /// Only [`MetricPolicy::Strict`] can fail.
    pub fn score(&self, record: &LocationRecord<'_>) -> Result<Score, ScoreError> {
        match self.policy {
            MetricPolicy::Permissive => Ok(self.score_permissive(record)),
            MetricPolicy::Strict => {
                let mut values = BTreeMap::new();
                for key in MetricKey::PERCENTILES {
                    values.insert(key, coerce_metric_strict(key, record.get(key))?);
                }
                Ok(self.compose(&values))
            }
        }
    }

    /// Score a record with [`coerce_metric_or_default`], whatever the configured policy.
    pub fn score_permissive(&self, record: &LocationRecord<'_>) -> Score {
        let values: BTreeMap<MetricKey, f64> = MetricKey::PERCENTILES
            .into_iter()
            .map(|key| (key, coerce_metric_or_default(record.get(key))))
            .collect();
        self.compose(&values)
    }

    /// Combine coerced percentile values into a score.
    pub fn compose(&self, values: &BTreeMap<MetricKey, f64>) -> Score {
        let goodness = |category: Category| {
            let metrics = category.metrics();
            let total: f64 = metrics
                .iter()
                .map(|key| values.get(key).copied().unwrap_or_default())
                .sum();
            PERCENTILE_MAX - total / metrics.len() as f64
        };
        let categories = CategoryScores {
            pollution: goodness(Category::Pollution),
            health: goodness(Category::Health),
            socioeconomic: goodness(Category::Socioeconomic),
            accessibility: goodness(Category::Accessibility),
        };
        let composite: f64 = Category::ALL
            .iter()
            .map(|category| categories.get(*category) * self.weights.get(*category))
            .sum();
        let rounded = composite.round().clamp(0.0, PERCENTILE_MAX) as u32;

        Score {
            composite,
            rounded,
            value: self.scale.display(rounded),
            scale: self.scale,
            categories,
        }
    }
}

/// Score a record with the default weights, 0-10 scale and permissive policy.
pub fn score(record: &LocationRecord<'_>) -> Score {
    ScoreCalculator::default().score_permissive(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zipscore_ingest::{Dataset, HeaderIndex};

    const HEADER: [&str; 7] = [
        "zip",
        "pm2.5 pctl",
        "diesel pm pctl",
        "asthma pctl",
        "poverty pctl",
        "unemployment pctl",
        "traffic pctl",
    ];

    fn index() -> HeaderIndex {
        HeaderIndex::from_columns([
            (MetricKey::PostalCode, 0),
            (MetricKey::Pm25, 1),
            (MetricKey::DieselPm, 2),
            (MetricKey::Asthma, 3),
            (MetricKey::Poverty, 4),
            (MetricKey::Unemployment, 5),
            (MetricKey::Traffic, 6),
        ])
    }

    fn dataset(row: [&str; 7]) -> Dataset {
        Dataset::new(
            HEADER.iter().map(|h| (*h).to_string()).collect(),
            vec![row.iter().map(|v| (*v).to_string()).collect()],
        )
    }

    #[test]
    fn test_worked_example() {
        let dataset = dataset(["90012", "80", "60", "50", "40", "20", "30"]);
        let index = index();
        let record = dataset.record(&index, 0).unwrap();
        let result = score(&record);

        assert_eq!(result.categories.pollution, 30.0);
        assert_eq!(result.categories.health, 50.0);
        assert_eq!(result.categories.socioeconomic, 70.0);
        assert_eq!(result.categories.accessibility, 70.0);
        assert!((result.composite - 52.0).abs() < 1e-9);
        assert_eq!(result.rounded, 52);
        assert_eq!(result.value, 5.2);
    }

    #[test]
    fn test_hundred_scale() {
        let dataset = dataset(["90012", "80", "60", "50", "40", "20", "30"]);
        let index = index();
        let record = dataset.record(&index, 0).unwrap();
        let calculator =
            ScoreCalculator::new(Weights::default(), OutputScale::Hundred, MetricPolicy::Permissive)
                .unwrap();
        let result = calculator.score(&record).unwrap();

        assert_eq!(result.value, 52.0);
        assert_eq!(result.scale, OutputScale::Hundred);
    }

    #[test]
    fn test_missing_metrics_count_as_zero_burden() {
        let dataset = dataset(["90012", "", "NA", "", "", "", ""]);
        let index = index();
        let record = dataset.record(&index, 0).unwrap();
        let result = score(&record);

        assert_eq!(result.rounded, 100);
        assert_eq!(result.value, 10.0);
    }

    #[test]
    fn test_maximum_burden() {
        let dataset = dataset(["90012", "100", "100", "100", "100", "100", "100"]);
        let index = index();
        let record = dataset.record(&index, 0).unwrap();

        assert_eq!(score(&record).value, 0.0);
    }

    #[test]
    fn test_strict_policy_fails_on_malformed() {
        let dataset = dataset(["90012", "80", "NA", "50", "40", "20", "30"]);
        let index = index();
        let record = dataset.record(&index, 0).unwrap();
        let calculator =
            ScoreCalculator::new(Weights::default(), OutputScale::Ten, MetricPolicy::Strict).unwrap();

        assert_eq!(
            calculator.score(&record),
            Err(ScoreError::InvalidMetric {
                key: MetricKey::DieselPm,
                raw: "NA".to_string()
            })
        );
        // The permissive path still scores it.
        assert_eq!(calculator.score_permissive(&record).rounded, 61);
    }

    #[test]
    fn test_custom_weights() {
        let dataset = dataset(["90012", "80", "60", "50", "40", "20", "30"]);
        let index = index();
        let record = dataset.record(&index, 0).unwrap();
        let weights = Weights {
            pollution: 1.0,
            health: 0.0,
            socioeconomic: 0.0,
            accessibility: 0.0,
        };
        let calculator =
            ScoreCalculator::new(weights, OutputScale::Ten, MetricPolicy::Permissive).unwrap();

        assert_eq!(calculator.score(&record).unwrap().value, 3.0);
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let weights = Weights {
            pollution: 0.5,
            ..Weights::default()
        };
        assert!(ScoreCalculator::new(weights, OutputScale::Ten, MetricPolicy::Permissive).is_err());
    }
}
