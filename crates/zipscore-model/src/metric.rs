//! Logical metric keys and the scoring categories they feed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical column identifiers resolved against a dataset header.
///
/// The declaration order is the resolution order used by the header
/// resolver and the order keys appear in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    /// Area identifier used as the lookup key.
    PostalCode,
    /// County name, descriptive only.
    County,
    /// Total population, descriptive only.
    Population,
    /// Fine particulate matter (PM2.5) percentile.
    Pm25,
    /// Diesel particulate matter percentile.
    DieselPm,
    /// Asthma emergency visit percentile.
    Asthma,
    /// Poverty percentile.
    Poverty,
    /// Unemployment percentile.
    Unemployment,
    /// Traffic density percentile.
    Traffic,
}

impl MetricKey {
    /// Every key, in resolution order.
    pub const ALL: [MetricKey; 9] = [
        MetricKey::PostalCode,
        MetricKey::County,
        MetricKey::Population,
        MetricKey::Pm25,
        MetricKey::DieselPm,
        MetricKey::Asthma,
        MetricKey::Poverty,
        MetricKey::Unemployment,
        MetricKey::Traffic,
    ];

    /// Percentile metrics consumed by the score calculator.
    pub const PERCENTILES: [MetricKey; 6] = [
        MetricKey::Pm25,
        MetricKey::DieselPm,
        MetricKey::Asthma,
        MetricKey::Poverty,
        MetricKey::Unemployment,
        MetricKey::Traffic,
    ];

    /// Snake-case name, matching the serialized form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PostalCode => "postal_code",
            Self::County => "county",
            Self::Population => "population",
            Self::Pm25 => "pm25",
            Self::DieselPm => "diesel_pm",
            Self::Asthma => "asthma",
            Self::Poverty => "poverty",
            Self::Unemployment => "unemployment",
            Self::Traffic => "traffic",
        }
    }

    /// Header text expected in CalEnviroScreen-style datasets.
    #[must_use]
    pub const fn default_header(&self) -> &'static str {
        match self {
            Self::PostalCode => "zip",
            Self::County => "california county",
            Self::Population => "total population",
            Self::Pm25 => "pm2.5 pctl",
            Self::DieselPm => "diesel pm pctl",
            Self::Asthma => "asthma pctl",
            Self::Poverty => "poverty pctl",
            Self::Unemployment => "unemployment pctl",
            Self::Traffic => "traffic pctl",
        }
    }

    /// Whether dataset loading must fail when this key has no column.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        !matches!(self, Self::County | Self::Population)
    }

    /// Scoring category for percentile metrics, `None` for descriptive keys.
    #[must_use]
    pub const fn category(&self) -> Option<Category> {
        match self {
            Self::Pm25 | Self::DieselPm => Some(Category::Pollution),
            Self::Asthma => Some(Category::Health),
            Self::Poverty | Self::Unemployment => Some(Category::Socioeconomic),
            Self::Traffic => Some(Category::Accessibility),
            Self::PostalCode | Self::County | Self::Population => None,
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Burden categories combined into the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Pollution,
    Health,
    Socioeconomic,
    Accessibility,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Pollution,
        Category::Health,
        Category::Socioeconomic,
        Category::Accessibility,
    ];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pollution => "Pollution",
            Self::Health => "Health",
            Self::Socioeconomic => "Socioeconomic",
            Self::Accessibility => "Accessibility",
        }
    }

    /// Percentile metrics averaged into this category.
    #[must_use]
    pub const fn metrics(&self) -> &'static [MetricKey] {
        match self {
            Self::Pollution => &[MetricKey::Pm25, MetricKey::DieselPm],
            Self::Health => &[MetricKey::Asthma],
            Self::Socioeconomic => &[MetricKey::Poverty, MetricKey::Unemployment],
            Self::Accessibility => &[MetricKey::Traffic],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_metrics() {
        for category in Category::ALL {
            assert!(!category.metrics().is_empty(), "{category} has no metrics");
        }
        assert_eq!(
            Category::Pollution.metrics(),
            &[MetricKey::Pm25, MetricKey::DieselPm]
        );
    }

    #[test]
    fn category_metrics_match_metric_categories() {
        for category in Category::ALL {
            for key in category.metrics() {
                assert_eq!(key.category(), Some(category), "{key}");
            }
        }
        let total: usize = Category::ALL.iter().map(|c| c.metrics().len()).sum();
        assert_eq!(total, MetricKey::PERCENTILES.len());
    }

    #[test]
    fn descriptive_keys_are_optional() {
        assert!(MetricKey::PostalCode.is_required());
        assert!(!MetricKey::County.is_required());
        assert!(!MetricKey::Population.is_required());
        assert!(MetricKey::PERCENTILES.iter().all(MetricKey::is_required));
    }

    #[test]
    fn display_matches_serde_name() {
        for key in MetricKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{key}\""));
        }
    }
}
