//! CSV loading and JSON reports for the arbor pipeline.

mod domain;
mod error;
mod reader;
mod writer;

pub use domain::{ExampleDataset, ExperimentName};
pub use error::IoError;
pub use reader::{DEFAULT_LABEL_COLUMN, ExampleReader};
pub use writer::{PredictionRecord, ReportWriter};
