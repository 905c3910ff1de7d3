use std::borrow::Borrow;
use std::collections::BTreeMap;

use tracing::{debug, instrument, warn};

use crate::{
    Id3Error,
    example::{AttributeSet, Example},
    node::Node,
    select::{Importance, partition},
    stats::{plurality_value, same_classification},
};

/// Label returned by prediction when the tree has no branch for an example.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Leaf label policy for a branch that receives no examples.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EmptyBranch {
    /// Plurality label of the examples at the parent node.
    #[default]
    ParentPlurality,
    /// A fixed label, independent of the parent.
    Fixed(String),
}

/// Configuration for ID3 tree induction.
///
/// Construct via [`DecisionTreeConfig::new`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter       | Default                         |
/// |-----------------|---------------------------------|
/// | `importance`    | `InformationGain`               |
/// | `empty_branch`  | `ParentPlurality`               |
/// | `unknown_label` | [`UNKNOWN_LABEL`] (`"Unknown"`) |
#[derive(Debug, Clone)]
pub struct DecisionTreeConfig {
    pub(crate) importance: Importance,
    pub(crate) empty_branch: EmptyBranch,
    pub(crate) unknown_label: String,
}

impl DecisionTreeConfig {
    /// Create a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            importance: Importance::InformationGain,
            empty_branch: EmptyBranch::ParentPlurality,
            unknown_label: UNKNOWN_LABEL.to_string(),
        }
    }

    /// Set the attribute selection policy.
    #[must_use]
    pub fn with_importance(mut self, importance: Importance) -> Self {
        self.importance = importance;
        self
    }

    /// Set the leaf label policy for branches that receive no examples.
    #[must_use]
    pub fn with_empty_branch(mut self, empty_branch: EmptyBranch) -> Self {
        self.empty_branch = empty_branch;
        self
    }

    /// Set the label returned when prediction falls off the tree.
    #[must_use]
    pub fn with_unknown_label(mut self, unknown_label: impl Into<String>) -> Self {
        self.unknown_label = unknown_label.into();
        self
    }

    // --- Getters ---

    /// Return the attribute selection policy.
    #[must_use]
    pub fn importance(&self) -> Importance {
        self.importance
    }

    /// Return the empty-branch leaf policy.
    #[must_use]
    pub fn empty_branch(&self) -> &EmptyBranch {
        &self.empty_branch
    }

    /// Return the label used for unpredictable examples.
    #[must_use]
    pub fn unknown_label(&self) -> &str {
        &self.unknown_label
    }

    /// Train a decision tree on labeled examples.
    ///
    /// # Errors
    ///
    /// | Variant                            | When                                    |
    /// |------------------------------------|-----------------------------------------|
    /// | [`Id3Error::EmptyDataset`]         | `examples` is empty                     |
    /// | [`Id3Error::UnlabeledExample`]     | an example has an empty label           |
    /// | [`Id3Error::EmptyConfiguredLabel`] | the unknown or fixed fallback label is empty |
    #[instrument(skip(self, examples, attributes), fields(n_examples = examples.len(), n_attributes = attributes.len()))]
    pub fn fit<E: Borrow<Example>>(
        &self,
        examples: &[E],
        attributes: &AttributeSet,
    ) -> Result<DecisionTree, Id3Error> {
        // --- Validate inputs ---
        if examples.is_empty() {
            return Err(Id3Error::EmptyDataset);
        }
        if let Some(index) = examples.iter().position(|e| !e.borrow().is_labeled()) {
            return Err(Id3Error::UnlabeledExample { index });
        }

        // --- Validate config ---
        if self.unknown_label.is_empty() {
            return Err(Id3Error::EmptyConfiguredLabel {
                parameter: "unknown_label",
            });
        }
        if let EmptyBranch::Fixed(label) = &self.empty_branch
            && label.is_empty()
        {
            return Err(Id3Error::EmptyConfiguredLabel {
                parameter: "empty_branch",
            });
        }

        debug!(
            importance = ?self.importance,
            empty_branch = ?self.empty_branch,
            attributes = %attributes,
            "fitting decision tree"
        );

        let root = self.learn_decision_tree::<E>(examples, attributes, &[])?;

        debug!(
            n_nodes = root.n_nodes(),
            n_leaves = root.n_leaves(),
            depth = root.depth(),
            "decision tree built"
        );

        Ok(DecisionTree {
            root,
            attributes: attributes.clone(),
            unknown_label: self.unknown_label.clone(),
            n_examples: examples.len(),
        })
    }

    /// Run ID3 on `examples` without the input validation of [`fit`](Self::fit).
    ///
    /// `parent_examples` supplies the fallback label when `examples` is empty.
    ///
    /// # Errors
    ///
    /// Propagates statistic errors: an empty `examples` with an empty
    /// `parent_examples` under [`EmptyBranch::ParentPlurality`] yields
    /// [`Id3Error::EmptyExamples`], and unlabeled examples reaching a
    /// plurality vote or gain computation yield [`Id3Error::UnlabeledExample`].
    pub fn learn_decision_tree<E: Borrow<Example>>(
        &self,
        examples: &[E],
        attributes: &AttributeSet,
        parent_examples: &[E],
    ) -> Result<Node, Id3Error> {
        let examples: Vec<&Example> = examples.iter().map(Borrow::borrow).collect();
        let parent: Vec<&Example> = parent_examples.iter().map(Borrow::borrow).collect();
        self.grow(&examples, attributes, &parent, 0)
    }

    fn grow(
        &self,
        examples: &[&Example],
        attributes: &AttributeSet,
        parent_examples: &[&Example],
        depth: usize,
    ) -> Result<Node, Id3Error> {
        if examples.is_empty() {
            let label = match &self.empty_branch {
                EmptyBranch::ParentPlurality => plurality_value(parent_examples)?,
                EmptyBranch::Fixed(label) => label.clone(),
            };
            return Ok(Node::leaf(label, 0));
        }

        if same_classification(examples) {
            return Ok(Node::leaf(examples[0].label(), examples.len()));
        }

        // Attributes no example here holds would split into zero branches.
        let observed: AttributeSet = attributes
            .iter()
            .filter(|a| examples.iter().any(|e| e.value(a).is_some()))
            .collect();
        if observed.is_empty() {
            return Ok(Node::leaf(plurality_value(examples)?, examples.len()));
        }

        let (attribute, gain) = self.importance.choose(examples, &observed)?;
        let (groups, dropped) = partition(examples, attribute);
        if dropped > 0 {
            warn!(
                attribute,
                dropped,
                depth,
                n_examples = examples.len(),
                "examples missing the split attribute were dropped from every branch"
            );
        }
        debug!(attribute, gain, depth, n_branches = groups.len(), "split");

        let remaining = observed.without(attribute);
        let mut children = BTreeMap::new();
        for (value, group) in groups {
            let child = self.grow(&group, &remaining, examples, depth + 1)?;
            children.insert(value.to_string(), child);
        }

        Ok(Node::Internal {
            attribute: attribute.to_string(),
            children,
            n_samples: examples.len(),
            gain,
        })
    }
}

impl Default for DecisionTreeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Run ID3 with the default configuration.
///
/// See [`DecisionTreeConfig::learn_decision_tree`].
///
/// # Errors
///
/// As [`DecisionTreeConfig::learn_decision_tree`].
pub fn learn_decision_tree<E: Borrow<Example>>(
    examples: &[E],
    attributes: &AttributeSet,
    parent_examples: &[E],
) -> Result<Node, Id3Error> {
    DecisionTreeConfig::new().learn_decision_tree(examples, attributes, parent_examples)
}

/// A fitted ID3 decision tree.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    pub(crate) root: Node,
    pub(crate) attributes: AttributeSet,
    pub(crate) unknown_label: String,
    pub(crate) n_examples: usize,
}

impl DecisionTree {
    /// Borrow the root node.
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Return the attribute set the tree was trained over.
    #[must_use]
    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// Return the label produced for examples the tree cannot route.
    #[must_use]
    pub fn unknown_label(&self) -> &str {
        &self.unknown_label
    }

    /// Return the number of training examples.
    #[must_use]
    pub fn n_examples(&self) -> usize {
        self.n_examples
    }

    /// Return the total number of nodes (internal and leaves).
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.root.n_nodes()
    }

    /// Return the number of leaves.
    #[must_use]
    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }

    /// Return the maximum depth; a single-leaf tree has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::restaurant;

    fn rows(labels: &[&str]) -> Vec<Example> {
        labels
            .iter()
            .map(|&l| Example::new([("A", "x")], l))
            .collect()
    }

    #[test]
    fn empty_dataset_error() {
        let examples: Vec<Example> = vec![];
        let err = DecisionTreeConfig::new()
            .fit(&examples, &AttributeSet::new(["A"]))
            .unwrap_err();
        assert!(matches!(err, Id3Error::EmptyDataset));
    }

    #[test]
    fn unlabeled_training_example_error() {
        let examples = vec![
            Example::new([("A", "x")], "Yes"),
            Example::unlabeled([("A", "y")]),
        ];
        let err = DecisionTreeConfig::new()
            .fit(&examples, &AttributeSet::new(["A"]))
            .unwrap_err();
        assert!(matches!(err, Id3Error::UnlabeledExample { index: 1 }));
    }

    #[test]
    fn empty_configured_labels_rejected() {
        let examples = rows(&["Yes"]);
        let attrs = AttributeSet::new(["A"]);

        let err = DecisionTreeConfig::new()
            .with_unknown_label("")
            .fit(&examples, &attrs)
            .unwrap_err();
        assert!(matches!(
            err,
            Id3Error::EmptyConfiguredLabel {
                parameter: "unknown_label"
            }
        ));

        let err = DecisionTreeConfig::new()
            .with_empty_branch(EmptyBranch::Fixed(String::new()))
            .fit(&examples, &attrs)
            .unwrap_err();
        assert!(matches!(
            err,
            Id3Error::EmptyConfiguredLabel {
                parameter: "empty_branch"
            }
        ));
    }

    #[test]
    fn pure_examples_make_single_leaf() {
        let tree = DecisionTreeConfig::new()
            .fit(&rows(&["Yes", "Yes"]), &AttributeSet::new(["A"]))
            .unwrap();
        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(tree.root().label(), Some("Yes"));
        assert_eq!(tree.root().n_samples(), 2);
    }

    #[test]
    fn empty_attributes_use_plurality() {
        let node =
            learn_decision_tree(&rows(&["Yes", "No", "Yes"]), &AttributeSet::default(), &[])
                .unwrap();
        assert_eq!(node, Node::leaf("Yes", 3));
    }

    #[test]
    fn identical_values_stay_in_one_partition() {
        // Both rows hold A = x; the single child cannot split further and
        // falls back to the first-encountered plurality label.
        let node =
            learn_decision_tree(&rows(&["Yes", "No"]), &AttributeSet::new(["A"]), &[]).unwrap();
        assert_eq!(node.attribute(), Some("A"));
        let Node::Internal { children, .. } = &node else {
            panic!("expected an internal node");
        };
        assert_eq!(children.len(), 1);
        assert_eq!(children["x"], Node::leaf("Yes", 2));
    }

    #[test]
    fn empty_examples_use_parent_plurality() {
        let parent = rows(&["No", "No", "Yes"]);
        let node = learn_decision_tree(&[], &AttributeSet::new(["A"]), &parent).unwrap();
        assert_eq!(node, Node::leaf("No", 0));
    }

    #[test]
    fn empty_examples_with_fixed_fallback() {
        let parent = rows(&["No", "No", "Yes"]);
        let node = DecisionTreeConfig::new()
            .with_empty_branch(EmptyBranch::Fixed(UNKNOWN_LABEL.to_string()))
            .learn_decision_tree(&[], &AttributeSet::new(["A"]), &parent)
            .unwrap();
        assert_eq!(node, Node::leaf("Unknown", 0));
    }

    #[test]
    fn empty_examples_without_parent_is_error() {
        let err = learn_decision_tree::<Example>(&[], &AttributeSet::new(["A"]), &[]).unwrap_err();
        assert!(matches!(err, Id3Error::EmptyExamples { .. }));
    }

    #[test]
    fn split_removes_attribute_for_children() {
        // A and B tie on gain, so A is chosen; its y-branch needs B.
        let examples = vec![
            Example::new([("A", "x"), ("B", "p")], "Yes"),
            Example::new([("A", "y"), ("B", "p")], "Yes"),
            Example::new([("A", "y"), ("B", "q")], "No"),
            Example::new([("A", "x"), ("B", "q")], "Yes"),
        ];
        let tree = DecisionTreeConfig::new()
            .fit(&examples, &AttributeSet::new(["A", "B"]))
            .unwrap();
        let root = tree.root();
        assert_eq!(root.attribute(), Some("A"));
        assert_eq!(root.child("x").and_then(Node::label), Some("Yes"));
        let below = root.child("y").unwrap();
        assert_eq!(below.attribute(), Some("B"));
        assert_eq!(below.child("q").and_then(Node::label), Some("No"));
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn first_attribute_policy_splits_in_name_order() {
        let examples = vec![
            Example::new([("A", "x"), ("B", "p")], "Yes"),
            Example::new([("A", "y"), ("B", "q")], "No"),
        ];
        let tree = DecisionTreeConfig::new()
            .with_importance(Importance::FirstAttribute)
            .fit(&examples, &AttributeSet::new(["B", "A"]))
            .unwrap();
        assert_eq!(tree.root().attribute(), Some("A"));
    }

    #[test]
    fn missing_split_value_drops_example() {
        let examples = vec![
            Example::new([("A", "x")], "Yes"),
            Example::new([("A", "y")], "No"),
            Example::new([("B", "z")], "No"),
        ];
        let tree = DecisionTreeConfig::new()
            .fit(&examples, &AttributeSet::new(["A"]))
            .unwrap();
        let root = tree.root();
        assert_eq!(root.n_samples(), 3);
        let reached: usize = ["x", "y"]
            .iter()
            .filter_map(|v| root.child(v))
            .map(Node::n_samples)
            .sum();
        assert_eq!(reached, 2);
    }

    #[test]
    fn absent_attribute_never_becomes_a_split() {
        let mut attrs: Vec<&str> = restaurant::ATTRIBUTES.to_vec();
        attrs.push("Aaa");
        let examples = restaurant::examples();
        let tree = DecisionTreeConfig::new()
            .fit(&examples, &AttributeSet::new(attrs))
            .unwrap();
        assert_eq!(tree.root().attribute(), Some("Patrons"));
        for e in &examples {
            assert_eq!(tree.predict(e), e.label());
        }
    }

    #[test]
    fn only_absent_attributes_yield_plurality_leaf() {
        let examples = vec![
            Example::new([("A", "x")], "No"),
            Example::new([("A", "y")], "Yes"),
            Example::new([("A", "y")], "No"),
        ];
        for importance in [Importance::InformationGain, Importance::FirstAttribute] {
            let tree = DecisionTreeConfig::new()
                .with_importance(importance)
                .fit(&examples, &AttributeSet::new(["Rain", "Zed"]))
                .unwrap();
            assert_eq!(tree.root(), &Node::leaf("No", 3));
        }
    }

    #[test]
    fn sparse_column_does_not_hijack_root() {
        let examples = vec![
            Example::new([("A", "x"), ("0note", "n")], "Yes"),
            Example::new([("A", "x")], "Yes"),
            Example::new([("A", "x")], "Yes"),
            Example::new([("A", "y")], "No"),
            Example::new([("A", "y")], "No"),
            Example::new([("A", "y")], "No"),
        ];
        let tree = DecisionTreeConfig::new()
            .fit(&examples, &AttributeSet::new(["0note", "A"]))
            .unwrap();
        assert_eq!(tree.root().attribute(), Some("A"));
        for e in &examples {
            assert_eq!(tree.predict(e), e.label());
        }
    }
}
