//! In-memory dataset and the per-row record view.

use std::path::{Path, PathBuf};

use zipscore_model::MetricKey;

use crate::header::HeaderIndex;

/// A loaded table: one header record plus equal-width data records.
///
/// Immutable after construction; share it by reference or behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    source: Option<PathBuf>,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    dropped_rows: usize,
}

impl Dataset {
    /// Build a dataset, discarding rows whose width differs from the header.
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = header.len();
        let total = rows.len();
        let rows: Vec<Vec<String>> = rows.into_iter().filter(|row| row.len() == width).collect();
        let dropped_rows = total - rows.len();
        if dropped_rows > 0 {
            tracing::debug!(
                dropped_rows,
                expected_width = width,
                "discarded rows with mismatched field count"
            );
        }
        Self {
            source: None,
            header,
            rows,
            dropped_rows,
        }
    }

    /// Attach the file the dataset was read from.
    #[must_use]
    pub fn with_source(mut self, path: &Path) -> Self {
        self.source = Some(path.to_path_buf());
        self
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows discarded for having the wrong number of fields.
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// Record view over the row at `position`.
    pub fn record<'a>(&'a self, index: &'a HeaderIndex, position: usize) -> Option<LocationRecord<'a>> {
        self.rows
            .get(position)
            .map(|fields| LocationRecord::new(fields, index, position))
    }

    /// Record views over every row, in file order.
    pub fn records<'a>(&'a self, index: &'a HeaderIndex) -> impl Iterator<Item = LocationRecord<'a>> {
        self.rows
            .iter()
            .enumerate()
            .map(move |(position, fields)| LocationRecord::new(fields, index, position))
    }
}

/// A borrowed view of one data row through a resolved [`HeaderIndex`].
#[derive(Debug, Clone, Copy)]
pub struct LocationRecord<'a> {
    fields: &'a [String],
    index: &'a HeaderIndex,
    position: usize,
}

impl<'a> LocationRecord<'a> {
    pub fn new(fields: &'a [String], index: &'a HeaderIndex, position: usize) -> Self {
        Self {
            fields,
            index,
            position,
        }
    }

    /// Raw value of a metric, `None` when the key is unresolved.
    pub fn get(&self, key: MetricKey) -> Option<&'a str> {
        self.index
            .column(key)
            .and_then(|column| self.fields.get(column))
            .map(String::as_str)
    }

    /// Raw postal code field.
    pub fn postal_code(&self) -> Option<&'a str> {
        self.get(MetricKey::PostalCode)
    }

    /// Zero-based data row position within the dataset.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn fields(&self) -> &'a [String] {
        self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_mismatched_rows_dropped() {
        let dataset = Dataset::new(
            strings(&["zip", "asthma pctl"]),
            vec![
                strings(&["90012", "50"]),
                strings(&["90013"]),
                strings(&["90014", "20", "extra"]),
                strings(&["90015", "10"]),
            ],
        );
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.dropped_rows(), 2);
        assert_eq!(dataset.rows()[1][0], "90015");
    }

    #[test]
    fn test_record_view() {
        let dataset = Dataset::new(
            strings(&["asthma pctl", "zip"]),
            vec![strings(&["50", "90012"])],
        );
        let index = HeaderIndex::from_columns([(MetricKey::PostalCode, 1), (MetricKey::Asthma, 0)]);
        let record = dataset.record(&index, 0).unwrap();
        assert_eq!(record.postal_code(), Some("90012"));
        assert_eq!(record.get(MetricKey::Asthma), Some("50"));
        assert_eq!(record.get(MetricKey::Traffic), None);
        assert!(dataset.record(&index, 1).is_none());
    }
}
