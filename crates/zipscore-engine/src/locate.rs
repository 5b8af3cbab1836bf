//! Postal code normalization and record lookup.

use std::collections::HashMap;

use zipscore_ingest::{Dataset, HeaderIndex, LocationRecord};

use crate::error::LookupError;

/// Fixed width of the postal codes in this domain.
pub const POSTAL_CODE_LEN: usize = 5;

/// Trim and keep at most the first [`POSTAL_CODE_LEN`] characters.
///
/// Digits are not enforced here; boundary callers validate format.
pub fn normalize_postal_code(raw: &str) -> String {
    raw.trim().chars().take(POSTAL_CODE_LEN).collect()
}

/// Linear scan for the first record whose postal code equals the normalized input.
///
/// Comparison is exact string equality, so leading zeros are significant.
pub fn find_by_postal_code<'a>(
    dataset: &'a Dataset,
    index: &'a HeaderIndex,
    code: &str,
) -> Result<LocationRecord<'a>, LookupError> {
    let code = normalize_postal_code(code);
    dataset
        .records(index)
        .find(|record| record.postal_code() == Some(code.as_str()))
        .ok_or(LookupError::NotFound { code })
}

/// Postal code to row position, built once per dataset.
///
/// Same contract as [`find_by_postal_code`]: the first row carrying a code wins.
#[derive(Debug, Clone, Default)]
pub struct PostalIndex {
    positions: HashMap<String, usize>,
}

impl PostalIndex {
    pub fn build(dataset: &Dataset, index: &HeaderIndex) -> Self {
        let mut positions = HashMap::with_capacity(dataset.len());
        let mut duplicates = 0usize;
        for record in dataset.records(index) {
            let Some(code) = record.postal_code() else {
                continue;
            };
            if positions.contains_key(code) {
                duplicates += 1;
            } else {
                positions.insert(code.to_string(), record.position());
            }
        }
        if duplicates > 0 {
            tracing::debug!(duplicates, "duplicate postal codes, first occurrence kept");
        }
        Self { positions }
    }

    /// Row position for an already-normalized code.
    pub fn position(&self, normalized: &str) -> Option<usize> {
        self.positions.get(normalized).copied()
    }

    /// Look up a raw postal code.
    pub fn find<'a>(
        &self,
        dataset: &'a Dataset,
        index: &'a HeaderIndex,
        code: &str,
    ) -> Result<LocationRecord<'a>, LookupError> {
        let code = normalize_postal_code(code);
        self.position(&code)
            .and_then(|position| dataset.record(index, position))
            .ok_or(LookupError::NotFound { code })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
