//! JSON report writer for prediction runs.

use std::fs;
use std::path::{Path, PathBuf};

use arbor_id3::Example;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::ExperimentName;

/// One predicted row, paired with its true label when known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PredictionRecord<'a> {
    /// Label produced by the tree.
    pub predicted: &'a str,
    /// True label, if the input row carried one.
    pub actual: Option<&'a str>,
}

impl<'a> PredictionRecord<'a> {
    /// Pair a prediction with the example it was made for.
    #[must_use]
    pub fn new(example: &'a Example, predicted: &'a str) -> Self {
        Self {
            predicted,
            actual: example.is_labeled().then(|| example.label()),
        }
    }

    /// Whether the prediction matches a known true label.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.actual == Some(self.predicted)
    }
}

/// Writes prediction reports to JSON files.
///
/// Creates the output directory on construction if it does not exist.
/// Output files are named `{experiment}_predictions.json`.
pub struct ReportWriter {
    output_dir: PathBuf,
    experiment: ExperimentName,
}

impl ReportWriter {
    /// Create a new writer targeting the given directory and experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), experiment = %experiment))]
    pub fn new(output_dir: &Path, experiment: ExperimentName) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            experiment,
        })
    }

    /// Return the path of the predictions report.
    #[must_use]
    pub fn predictions_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}_predictions.json", self.experiment.as_str()))
    }

    /// Write predictions to `{experiment}_predictions.json` and return its path.
    ///
    /// `accuracy` is computed over rows with a true label and is `null`
    /// when no row has one.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::Serialize`] | Report cannot be encoded |
    /// | [`IoError::WriteFile`] | File cannot be written |
    #[instrument(skip_all, fields(n_rows = records.len()))]
    pub fn write_predictions(&self, records: &[PredictionRecord<'_>]) -> Result<PathBuf, IoError> {
        let path = self.predictions_path();

        let n_labeled = records.iter().filter(|r| r.actual.is_some()).count();
        let n_correct = records.iter().filter(|r| r.is_correct()).count();
        let accuracy = (n_labeled > 0).then(|| n_correct as f64 / n_labeled as f64);

        let entries: Vec<PredictionEntry<'_>> = records
            .iter()
            .enumerate()
            .map(|(row, r)| PredictionEntry {
                row,
                predicted: r.predicted,
                actual: r.actual,
            })
            .collect();

        let artifact = PredictionsArtifact {
            experiment: self.experiment.as_str(),
            n_rows: records.len(),
            n_labeled,
            accuracy,
            predictions: entries,
        };

        let json = serde_json::to_string_pretty(&artifact).map_err(|e| IoError::Serialize {
            path: path.clone(),
            source: e,
        })?;
        fs::write(&path, &json).map_err(|e| IoError::WriteFile {
            path: path.clone(),
            source: e,
        })?;

        info!(path = %path.display(), ?accuracy, "predictions written");
        Ok(path)
    }
}

// --- Shadow structs for JSON serialization ---

#[derive(Serialize)]
struct PredictionsArtifact<'a> {
    experiment: &'a str,
    n_rows: usize,
    n_labeled: usize,
    accuracy: Option<f64>,
    predictions: Vec<PredictionEntry<'a>>,
}

#[derive(Serialize)]
struct PredictionEntry<'a> {
    row: usize,
    predicted: &'a str,
    actual: Option<&'a str>,
}
