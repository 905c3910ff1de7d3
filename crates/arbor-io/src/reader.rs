//! CSV example reader with full input validation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use arbor_id3::Example;
use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::ExampleDataset;

/// Header name of the label column unless overridden.
pub const DEFAULT_LABEL_COLUMN: &str = "label";

/// Reads categorical examples from a CSV file.
///
/// Expected CSV format:
/// - Header row required; one column holds the label, every other column is
///   an attribute
/// - `Alt,Bar,...,label`
/// - All rows must have the same number of columns as the header
/// - An empty attribute cell means the example lacks that attribute
/// - An empty label cell makes the row an unlabeled query
///
/// Cells are trimmed of surrounding whitespace.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::InvalidHeader`] | Header name is empty or repeated |
/// | [`IoError::MissingLabelColumn`] | Header lacks the label column |
/// | [`IoError::NoAttributeColumns`] | Header has only the label column |
/// | [`IoError::EmptyDataset`] | Zero data rows after header |
/// | [`IoError::InconsistentRowLength`] | Row has different column count than header |
pub struct ExampleReader {
    path: PathBuf,
    label_column: String,
}

impl ExampleReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
        }
    }

    /// Use `name` as the label column instead of [`DEFAULT_LABEL_COLUMN`].
    #[must_use]
    pub fn with_label_column(mut self, name: impl Into<String>) -> Self {
        self.label_column = name.into();
        self
    }

    /// Read and validate the CSV file, returning an [`ExampleDataset`].
    #[instrument(skip(self), fields(path = %self.path.display(), label = %self.label_column))]
    pub fn read(&self) -> Result<ExampleDataset, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true) lets our own InconsistentRowLength check fire
        // instead of a low-level CsvParse error.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let header = rdr
            .headers()
            .map_err(|e| self.parse_error(e))?
            .clone();
        let expected_cols = header.len();

        let mut seen = HashSet::with_capacity(expected_cols);
        for (col_index, name) in header.iter().enumerate() {
            if name.is_empty() || !seen.insert(name) {
                return Err(IoError::InvalidHeader {
                    path: self.path.clone(),
                    col_index,
                    name: name.to_string(),
                });
            }
        }

        let label_index = header
            .iter()
            .position(|name| name == self.label_column)
            .ok_or_else(|| IoError::MissingLabelColumn {
                path: self.path.clone(),
                column: self.label_column.clone(),
            })?;
        let attribute_names: Vec<String> = header
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != label_index)
            .map(|(_, name)| name.to_string())
            .collect();
        if attribute_names.is_empty() {
            return Err(IoError::NoAttributeColumns {
                path: self.path.clone(),
            });
        }
        debug!(expected_cols, label_index, "read CSV header");

        let mut examples = Vec::new();
        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| self.parse_error(e))?;
            if record.len() != expected_cols {
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    row_index,
                    expected: expected_cols,
                    got: record.len(),
                });
            }

            let attributes = header
                .iter()
                .zip(record.iter())
                .enumerate()
                .filter(|&(i, (_, value))| i != label_index && !value.is_empty())
                .map(|(_, pair)| pair);
            let label = record.get(label_index).unwrap_or("");
            examples.push(Example::new(attributes, label));
        }

        if examples.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        let dataset = ExampleDataset::new(attribute_names, examples);
        info!(
            n_examples = dataset.n_examples(),
            n_labeled = dataset.n_labeled(),
            n_attributes = dataset.n_attributes(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    fn parse_error(&self, e: csv::Error) -> IoError {
        IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        }
    }
}
