//! Location scoring engine.
//!
//! Looks up areas by postal code in a loaded dataset, converts their burden
//! percentiles into a weighted desirability score and compares two areas.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use zipscore_engine::LocationEngine;
//! use zipscore_model::ScoringConfig;
//!
//! let engine = LocationEngine::load(Path::new("data/cali_dataset.csv"), ScoringConfig::default())?;
//! let result = engine.compare("90012", "90210")?;
//! println!("{:?} is higher", result.higher_code());
//! ```

mod calculator;
mod coerce;
mod compare;
mod engine;
mod error;
mod locate;
mod shared;

// === Error Types ===
pub use error::{EngineError, LookupError, RequestError, ScoreError};

// === Row Locator ===
pub use locate::{POSTAL_CODE_LEN, PostalIndex, find_by_postal_code, normalize_postal_code};

// === Score Calculator ===
pub use calculator::{ScoreCalculator, score};
pub use coerce::{PERCENTILE_MAX, PERCENTILE_MIN, coerce_metric_or_default, coerce_metric_strict};

// === Comparator ===
pub use compare::{area_score, compare, compare_with, parse_population};

// === Engine ===
pub use engine::LocationEngine;
pub use shared::SharedEngine;
