//! Header resolution: logical metric keys to column positions.
//!
//! Matching is case-insensitive substring matching against the trimmed header
//! field, applied the same way to every key, so headers carrying units or
//! qualifiers ("PM2.5 Pctl", "Total Population (2010)") still resolve. When
//! several columns match, the lowest index wins.

use std::collections::BTreeMap;

use zipscore_model::MetricKey;

use crate::dataset::Dataset;
use crate::error::{IngestError, Result};

/// Resolved column position for each metric key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderIndex {
    columns: BTreeMap<MetricKey, usize>,
}

impl HeaderIndex {
    /// Build an index from explicit positions.
    pub fn from_columns(columns: impl IntoIterator<Item = (MetricKey, usize)>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
        }
    }

    /// Column position for a key, `None` if the key did not resolve.
    pub fn column(&self, key: MetricKey) -> Option<usize> {
        self.columns.get(&key).copied()
    }

    pub fn contains(&self, key: MetricKey) -> bool {
        self.columns.contains_key(&key)
    }

    /// Resolved keys and their columns, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, usize)> + '_ {
        self.columns.iter().map(|(key, column)| (*key, *column))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Normalizes a header value for matching: trimmed and lower-cased.
pub fn normalize_header(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Resolve the header of `dataset` against `requirements`.
///
/// Fails on the first required key with no matching column. Optional keys
/// ([`MetricKey::is_required`] is false) are left out of the index when absent.
pub fn build_header_index(
    dataset: &Dataset,
    requirements: &[(MetricKey, String)],
) -> Result<HeaderIndex> {
    resolve_headers(dataset.header(), requirements)
}

/// Resolve a raw header record against `requirements`.
pub fn resolve_headers(header: &[String], requirements: &[(MetricKey, String)]) -> Result<HeaderIndex> {
    let normalized: Vec<String> = header
        .iter()
        .map(String::as_str)
        .map(normalize_header)
        .collect();
    let mut columns = BTreeMap::new();

    for (key, expected) in requirements {
        let expected = normalize_header(expected);
        let mut matches = normalized
            .iter()
            .enumerate()
            .filter(|(_, field)| field.contains(expected.as_str()))
            .map(|(column, _)| column);

        match matches.next() {
            Some(column) => {
                let shadowed: Vec<usize> = matches.collect();
                if !shadowed.is_empty() {
                    tracing::debug!(
                        key = %key,
                        expected = %expected,
                        column,
                        ?shadowed,
                        "header matched several columns, using the first"
                    );
                }
                columns.insert(*key, column);
            }
            None if key.is_required() => {
                return Err(IngestError::RequiredHeaderMissing {
                    key: *key,
                    expected,
                    available: normalized,
                });
            }
            None => {
                tracing::debug!(key = %key, expected = %expected, "optional header not present");
            }
        }
    }

    tracing::debug!(resolved = columns.len(), "header index built");
    Ok(HeaderIndex { columns })
}
