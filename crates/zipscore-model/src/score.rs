//! Score and comparison result types.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::OutputScale;
use crate::metric::Category;

/// Per-category goodness values on the 0-100 scale (higher is better).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub pollution: f64,
    pub health: f64,
    pub socioeconomic: f64,
    pub accessibility: f64,
}

impl CategoryScores {
    #[must_use]
    pub const fn get(&self, category: Category) -> f64 {
        match category {
            Category::Pollution => self.pollution,
            Category::Health => self.health,
            Category::Socioeconomic => self.socioeconomic,
            Category::Accessibility => self.accessibility,
        }
    }
}

/// Desirability score for one area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Weighted composite on the canonical 0-100 scale, before rounding.
    pub composite: f64,
    /// Composite rounded to the nearest integer.
    pub rounded: u32,
    /// Rounded composite expressed on [`Score::scale`].
    pub value: f64,
    pub scale: OutputScale,
    pub categories: CategoryScores,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scale {
            OutputScale::Ten => write!(f, "{:.1}/10", self.value),
            OutputScale::Hundred => write!(f, "{}/100", self.rounded),
        }
    }
}

/// A scored area together with its descriptive fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaScore {
    pub postal_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    pub score: Score,
}

/// Which side of a comparison scored higher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Higher {
    A,
    B,
    Tie,
}

impl Higher {
    /// `Greater` means side A.
    #[must_use]
    pub const fn from_ordering(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Greater => Self::A,
            Ordering::Less => Self::B,
            Ordering::Equal => Self::Tie,
        }
    }
}

/// Outcome of comparing two postal codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub a: AreaScore,
    pub b: AreaScore,
    pub higher: Higher,
    /// Side with the larger population, `None` unless both sides report one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub larger_population: Option<Higher>,
}

impl ComparisonResult {
    /// Build a result, ordering on the rounded composite so equal displayed
    /// scores are a tie.
    #[must_use]
    pub fn new(a: AreaScore, b: AreaScore) -> Self {
        let higher = Higher::from_ordering(a.score.rounded.cmp(&b.score.rounded));
        let larger_population = match (a.population, b.population) {
            (Some(pa), Some(pb)) => Some(Higher::from_ordering(pa.cmp(&pb))),
            _ => None,
        };
        Self {
            a,
            b,
            higher,
            larger_population,
        }
    }

    /// Postal code of the higher-scoring side, `None` on a tie.
    #[must_use]
    pub fn higher_code(&self) -> Option<&str> {
        match self.higher {
            Higher::A => Some(&self.a.postal_code),
            Higher::B => Some(&self.b.postal_code),
            Higher::Tie => None,
        }
    }

    #[must_use]
    pub fn is_tie(&self) -> bool {
        self.higher == Higher::Tie
    }
}
