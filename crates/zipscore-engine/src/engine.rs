//! Immutable engine snapshot: dataset, header index, postal index and calculator.

use std::path::Path;

use zipscore_ingest::{
    Dataset, HeaderIndex, LoadOptions, LocationRecord, build_header_index, load_dataset_with,
};
use zipscore_model::{AreaScore, ComparisonResult, ScoringConfig};

use crate::calculator::ScoreCalculator;
use crate::compare::{area_score, compare_with};
use crate::error::{EngineError, LookupError, RequestError};
use crate::locate::PostalIndex;

/// Everything a request needs, built once and shared read-only.
#[derive(Debug, Clone)]
pub struct LocationEngine {
    config: ScoringConfig,
    dataset: Dataset,
    index: HeaderIndex,
    postal: PostalIndex,
    calculator: ScoreCalculator,
}

impl LocationEngine {
    /// Validate `config`, load the dataset at `path` and resolve its header.
    pub fn load(path: &Path, config: ScoringConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let options = LoadOptions::default().with_delimiter(config.delimiter_byte()?);
        let dataset = load_dataset_with(path, options)?;
        Self::from_dataset(dataset, config)
    }

    /// Build an engine over an already loaded dataset.
    pub fn from_dataset(dataset: Dataset, config: ScoringConfig) -> Result<Self, EngineError> {
        let calculator = ScoreCalculator::from_config(&config)?;
        let index = build_header_index(&dataset, &config.header_requirements())?;
        let postal = PostalIndex::build(&dataset, &index);
        tracing::info!(
            rows = dataset.len(),
            postal_codes = postal.len(),
            resolved_headers = index.len(),
            scale = ?calculator.scale(),
            policy = %calculator.policy(),
            "location engine ready"
        );
        Ok(Self {
            config,
            dataset,
            index,
            postal,
            calculator,
        })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn index(&self) -> &HeaderIndex {
        &self.index
    }

    pub fn calculator(&self) -> &ScoreCalculator {
        &self.calculator
    }

    /// Find the record for a raw postal code through the postal index.
    pub fn locate(&self, code: &str) -> Result<LocationRecord<'_>, LookupError> {
        self.postal.find(&self.dataset, &self.index, code)
    }

    /// Locate and score one postal code.
    pub fn score_code(&self, code: &str) -> Result<AreaScore, RequestError> {
        let record = self.locate(code)?;
        area_score(&self.calculator, &record)
    }

    /// Compare two postal codes.
    pub fn compare(&self, code_a: &str, code_b: &str) -> Result<ComparisonResult, RequestError> {
        compare_with(&self.calculator, |code| self.locate(code), code_a, code_b)
    }
}
