//! Dataset ingestion for the location scoring engine.
//!
//! # Features
//!
//! - **Dataset Loading**: Read a delimited text file into equal-width string records
//! - **Header Resolution**: Map logical metric keys to column positions
//! - **Record Views**: Borrowed per-row access through a resolved header
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use zipscore_ingest::{build_header_index, load_dataset};
//! use zipscore_model::ScoringConfig;
//!
//! let dataset = load_dataset(Path::new("data/cali_dataset.csv"))?;
//! let index = build_header_index(&dataset, &ScoringConfig::default().header_requirements())?;
//! ```

mod dataset;
mod error;
mod header;
mod loader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Dataset ===
pub use dataset::{Dataset, LocationRecord};

// === Loading ===
pub use loader::{LoadOptions, load_dataset, load_dataset_with, normalize_field};

// === Header Resolution ===
pub use header::{HeaderIndex, build_header_index, normalize_header, resolve_headers};
