//! Domain types for arbor-io.

use arbor_id3::{AttributeSet, Example};

use crate::IoError;

/// A validated experiment name for output file naming.
///
/// Must match `[a-zA-Z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentName(String);

impl ExperimentName {
    /// Parse and validate an experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidExperimentName`] if the name is empty or
    /// contains characters outside `[a-zA-Z0-9_-]`.
    pub fn new(name: String) -> Result<Self, IoError> {
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(IoError::InvalidExperimentName { name });
        }
        Ok(Self(name))
    }

    /// Return the experiment name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExperimentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Categorical examples loaded from a CSV file.
///
/// Produced by [`ExampleReader`](crate::ExampleReader). Attribute names keep
/// header order; examples keep row order.
#[derive(Debug)]
pub struct ExampleDataset {
    /// Attribute column names, label column excluded.
    attribute_names: Vec<String>,
    /// One example per data row.
    examples: Vec<Example>,
}

impl ExampleDataset {
    /// Create a new example dataset.
    pub(crate) fn new(attribute_names: Vec<String>, examples: Vec<Example>) -> Self {
        Self {
            attribute_names,
            examples,
        }
    }

    /// Return the attribute column names in header order.
    #[must_use]
    pub fn attribute_names(&self) -> &[String] {
        &self.attribute_names
    }

    /// Return the attribute names as a splitting set.
    #[must_use]
    pub fn attributes(&self) -> AttributeSet {
        AttributeSet::new(self.attribute_names.iter().cloned())
    }

    /// Return the examples in row order.
    #[must_use]
    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    /// Consume the dataset and return its examples.
    #[must_use]
    pub fn into_examples(self) -> Vec<Example> {
        self.examples
    }

    /// Return the number of examples.
    #[must_use]
    pub fn n_examples(&self) -> usize {
        self.examples.len()
    }

    /// Return the number of examples with a non-empty label.
    #[must_use]
    pub fn n_labeled(&self) -> usize {
        self.examples.iter().filter(|e| e.is_labeled()).count()
    }

    /// Return the number of attribute columns.
    #[must_use]
    pub fn n_attributes(&self) -> usize {
        self.attribute_names.len()
    }
}
