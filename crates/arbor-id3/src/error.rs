/// Errors from ID3 training and its statistics.
#[derive(Debug, thiserror::Error)]
pub enum Id3Error {
    /// Returned when a statistic that needs at least one example gets none.
    #[error("{operation} requires at least one example")]
    EmptyExamples {
        /// The operation that received the empty collection.
        operation: &'static str,
    },

    /// Returned when attribute selection is asked to choose from an empty set.
    #[error("cannot choose a splitting attribute from an empty attribute set")]
    EmptyAttributes,

    /// Returned when training is given zero examples.
    #[error("training set has zero examples")]
    EmptyDataset,

    /// Returned when an example without a label is used where a label is required.
    #[error("example {index} has an empty label")]
    UnlabeledExample {
        /// The zero-based position of the example in its collection.
        index: usize,
    },

    /// Returned when a configured fallback or unknown label is empty.
    #[error("{parameter} must be a non-empty label")]
    EmptyConfiguredLabel {
        /// The configuration parameter holding the empty label.
        parameter: &'static str,
    },

    /// Returned when the true and predicted label slices differ in length.
    #[error("got {predicted} predictions for {expected} labels")]
    LabelCountMismatch {
        /// Number of true labels.
        expected: usize,
        /// Number of predicted labels.
        predicted: usize,
    },
}
