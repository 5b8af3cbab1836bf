//! Shared types for the location scoring engine.
//!
//! - [`MetricKey`] and [`Category`]: the logical columns and the burden groups
//!   they are averaged into.
//! - [`ScoringConfig`]: weights, output scale, header texts and coercion policy.
//! - [`Score`] and [`ComparisonResult`]: per-request results.

pub mod config;
pub mod error;
pub mod metric;
pub mod score;

pub use config::{
    HeaderOverrides, MetricPolicy, OutputScale, ScoringConfig, WEIGHT_SUM_TOLERANCE, Weights,
};
pub use error::{ConfigError, Result};
pub use metric::{Category, MetricKey};
pub use score::{AreaScore, CategoryScores, ComparisonResult, Higher, Score};
