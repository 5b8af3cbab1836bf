//! Delimited text loading.

use std::path::Path;

use crate::dataset::Dataset;
use crate::error::{IngestError, Result};

/// Options for [`load_dataset_with`].
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl LoadOptions {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Normalizes a field: strips surrounding whitespace and quote characters.
pub fn normalize_field(value: &str) -> String {
    value
        .trim_matches(|c: char| c.is_whitespace() || c == '"')
        .to_string()
}

/// Load a comma-delimited dataset.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    load_dataset_with(path, LoadOptions::default())
}

/// Load a delimited dataset.
///
/// Lines are split on the delimiter without quote handling; quote characters
/// are stripped from each field afterwards. Empty lines are discarded, the
/// first remaining line is the header, and rows whose width differs from the
/// header are dropped. Fails with
/// [`IngestError::ResourceNotFound`] when `path` does not exist and with
/// [`IngestError::EmptyDataset`] when fewer than two lines remain.
pub fn load_dataset_with(path: &Path, options: LoadOptions) -> Result<Dataset> {
    if let Err(e) = std::fs::metadata(path) {
        return Err(if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::ResourceNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .delimiter(options.delimiter)
        .from_path(path)
        .map_err(|e| map_csv_error(path, e))?;

    let mut records: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| map_csv_error(path, e))?;
        let mut fields: Vec<String> = record.iter().map(normalize_field).collect();
        if is_blank_line(&fields) {
            continue;
        }
        if records.is_empty()
            && let Some(first) = fields.first_mut()
        {
            *first = normalize_field(first.trim_start_matches('\u{feff}'));
        }
        records.push(fields);
    }

    if records.len() < 2 {
        return Err(IngestError::EmptyDataset {
            path: path.to_path_buf(),
            lines: records.len(),
        });
    }

    let mut records = records.into_iter();
    let header = records.next().unwrap_or_default();
    let dataset = Dataset::new(header, records.collect()).with_source(path);

    tracing::info!(
        path = %path.display(),
        columns = dataset.header().len(),
        rows = dataset.len(),
        dropped_rows = dataset.dropped_rows(),
        "dataset loaded"
    );

    Ok(dataset)
}

/// A whitespace-only line parses as a single empty field.
fn is_blank_line(fields: &[String]) -> bool {
    matches!(fields, [only] if only.is_empty())
}

fn map_csv_error(path: &Path, error: csv::Error) -> IngestError {
    match error.kind() {
        csv::ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
            IngestError::ResourceNotFound {
                path: path.to_path_buf(),
            }
        }
        _ => IngestError::CsvParse {
            path: path.to_path_buf(),
            source: error,
        },
    }
}
