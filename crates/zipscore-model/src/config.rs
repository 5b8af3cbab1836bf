//! Scoring configuration.
//!
//! Weights, output scale, expected header texts, numeric coercion policy and
//! the dataset delimiter. Configuration is read from TOML; every field has a
//! default, so an empty file yields [`ScoringConfig::default`].
//!
//! ```toml
//! scale = "hundred"
//! policy = "strict"
//!
//! [weights]
//! pollution = 0.4
//! health = 0.2
//! socioeconomic = 0.3
//! accessibility = 0.1
//!
//! [headers]
//! postal_code = "zip code"
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::metric::{Category, MetricKey};

/// Tolerance applied to the weight-sum invariant.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Presentation scale for the displayed score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputScale {
    /// Rounded composite divided by ten (0.0 - 10.0).
    #[default]
    Ten,
    /// Rounded composite as-is (0 - 100).
    Hundred,
}

impl OutputScale {
    /// Upper bound of the displayed value.
    #[must_use]
    pub const fn max(&self) -> f64 {
        match self {
            Self::Ten => 10.0,
            Self::Hundred => 100.0,
        }
    }

    /// Convert a rounded 0-100 composite to the display unit.
    #[must_use]
    pub fn display(&self, rounded: u32) -> f64 {
        match self {
            Self::Ten => f64::from(rounded) / 10.0,
            Self::Hundred => f64::from(rounded),
        }
    }
}

/// How absent or malformed percentile fields are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricPolicy {
    /// Absent or non-numeric values count as 0 (low burden assumed).
    #[default]
    Permissive,
    /// Absent or non-numeric values fail the score.
    Strict,
}

impl fmt::Display for MetricPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permissive => f.write_str("permissive"),
            Self::Strict => f.write_str("strict"),
        }
    }
}

/// Category weights for the composite score. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Weights {
    pub pollution: f64,
    pub health: f64,
    pub socioeconomic: f64,
    pub accessibility: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            pollution: 0.30,
            health: 0.30,
            socioeconomic: 0.30,
            accessibility: 0.10,
        }
    }
}

impl Weights {
    #[must_use]
    pub const fn get(&self, category: Category) -> f64 {
        match category {
            Category::Pollution => self.pollution,
            Category::Health => self.health,
            Category::Socioeconomic => self.socioeconomic,
            Category::Accessibility => self.accessibility,
        }
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        Category::ALL.iter().map(|c| self.get(*c)).sum()
    }

    /// Check that every weight is finite and non-negative and that they sum to 1.0.
    pub fn validate(&self) -> Result<()> {
        let sum = self.sum();
        if Category::ALL.iter().any(|c| !self.get(*c).is_finite()) {
            return Err(ConfigError::InvalidWeights {
                reason: "weights must be finite",
                sum,
            });
        }
        if Category::ALL.iter().any(|c| self.get(*c) < 0.0) {
            return Err(ConfigError::InvalidWeights {
                reason: "weights must not be negative",
                sum,
            });
        }
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeights {
                reason: "weights must sum to 1.0",
                sum,
            });
        }
        Ok(())
    }
}

/// Expected header text overrides. Unset keys use [`MetricKey::default_header`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pm25: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diesel_pm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asthma: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poverty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unemployment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traffic: Option<String>,
}

impl HeaderOverrides {
    #[must_use]
    pub fn get(&self, key: MetricKey) -> Option<&str> {
        let value = match key {
            MetricKey::PostalCode => &self.postal_code,
            MetricKey::County => &self.county,
            MetricKey::Population => &self.population,
            MetricKey::Pm25 => &self.pm25,
            MetricKey::DieselPm => &self.diesel_pm,
            MetricKey::Asthma => &self.asthma,
            MetricKey::Poverty => &self.poverty,
            MetricKey::Unemployment => &self.unemployment,
            MetricKey::Traffic => &self.traffic,
        };
        value.as_deref()
    }

    pub fn set(&mut self, key: MetricKey, text: impl Into<String>) {
        let slot = match key {
            MetricKey::PostalCode => &mut self.postal_code,
            MetricKey::County => &mut self.county,
            MetricKey::Population => &mut self.population,
            MetricKey::Pm25 => &mut self.pm25,
            MetricKey::DieselPm => &mut self.diesel_pm,
            MetricKey::Asthma => &mut self.asthma,
            MetricKey::Poverty => &mut self.poverty,
            MetricKey::Unemployment => &mut self.unemployment,
            MetricKey::Traffic => &mut self.traffic,
        };
        *slot = Some(text.into());
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    /// Field delimiter of the dataset file.
    pub delimiter: char,
    pub scale: OutputScale,
    pub policy: MetricPolicy,
    pub weights: Weights,
    pub headers: HeaderOverrides,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            scale: OutputScale::default(),
            policy: MetricPolicy::default(),
            weights: Weights::default(),
            headers: HeaderOverrides::default(),
        }
    }
}

impl ScoringConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        self.delimiter_byte()?;
        for key in MetricKey::ALL {
            if self.headers.get(key).is_some_and(|text| text.trim().is_empty()) {
                return Err(ConfigError::EmptyHeaderText {
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(ConfigError::InvalidDelimiter(self.delimiter))
    }

    /// Expected header text for a key, falling back to the built-in default.
    #[must_use]
    pub fn header_text(&self, key: MetricKey) -> &str {
        self.headers.get(key).unwrap_or(key.default_header())
    }

    /// Header requirements for every key, in resolution order.
    #[must_use]
    pub fn header_requirements(&self) -> Vec<(MetricKey, String)> {
        MetricKey::ALL
            .into_iter()
            .map(|key| (key, self.header_text(key).trim().to_lowercase()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        let weights = Weights::default();
        assert!((weights.sum() - 1.0).abs() < WEIGHT_SUM_TOLERANCE);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn weights_must_sum_to_one() {
        let weights = Weights {
            pollution: 0.5,
            health: 0.5,
            socioeconomic: 0.5,
            accessibility: 0.0,
        };
        let err = weights.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWeights { .. }));
        assert!(err.to_string().contains("sum to 1.0"));
    }

    #[test]
    fn negative_weights_rejected() {
        let weights = Weights {
            pollution: 1.2,
            health: -0.2,
            socioeconomic: 0.0,
            accessibility: 0.0,
        };
        assert!(matches!(
            weights.validate(),
            Err(ConfigError::InvalidWeights {
                reason: "weights must not be negative",
                ..
            })
        ));
    }

    #[test]
    fn empty_toml_is_default() {
        let config = ScoringConfig::from_toml_str("").unwrap();
        assert_eq!(config, ScoringConfig::default());
    }

    #[test]
    fn toml_overrides() {
        let config = ScoringConfig::from_toml_str(
            r#"
delimiter = ";"
scale = "hundred"
policy = "strict"

[weights]
pollution = 0.4
health = 0.2
socioeconomic = 0.3
accessibility = 0.1

[headers]
postal_code = "Zip Code"
"#,
        )
        .unwrap();
        assert_eq!(config.delimiter_byte().unwrap(), b';');
        assert_eq!(config.scale, OutputScale::Hundred);
        assert_eq!(config.policy, MetricPolicy::Strict);
        assert_eq!(config.weights.pollution, 0.4);
        assert_eq!(config.header_text(MetricKey::PostalCode), "Zip Code");
        assert_eq!(config.header_text(MetricKey::Traffic), "traffic pctl");
    }

    #[test]
    fn requirements_are_lowercased() {
        let mut config = ScoringConfig::default();
        config.headers.set(MetricKey::PostalCode, "  ZIP Code ");
        let requirements = config.header_requirements();
        assert_eq!(requirements.len(), MetricKey::ALL.len());
        assert_eq!(
            requirements[0],
            (MetricKey::PostalCode, "zip code".to_string())
        );
    }

    #[test]
    fn unknown_fields_rejected() {
        let result = ScoringConfig::from_toml_str("weight = 1");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn non_ascii_delimiter_rejected() {
        let config = ScoringConfig {
            delimiter: '§',
            ..ScoringConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDelimiter('§'))
        ));
    }

    #[test]
    fn blank_header_override_rejected() {
        let result = ScoringConfig::from_toml_str("[headers]\nasthma = \"  \"\n");
        assert!(matches!(result, Err(ConfigError::EmptyHeaderText { .. })));
    }

    #[test]
    fn scale_display() {
        assert_eq!(OutputScale::Ten.display(52), 5.2);
        assert_eq!(OutputScale::Hundred.display(52), 52.0);
    }
}
