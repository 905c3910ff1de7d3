//! Inference over a fitted tree.

use std::borrow::Borrow;

use crate::example::Example;
use crate::node::Node;
use crate::tree::DecisionTree;

/// Route `example` from `node` down to a leaf and return its label.
///
/// Returns `unknown_label` when the example lacks the attribute tested at
/// some node, or holds a value that node never saw during training.
#[must_use]
pub fn predict<'a>(node: &'a Node, example: &Example, unknown_label: &'a str) -> &'a str {
    let mut current = node;
    loop {
        match current {
            Node::Leaf { label, .. } => return label,
            Node::Internal {
                attribute,
                children,
                ..
            } => {
                let Some(next) = example.value(attribute).and_then(|v| children.get(v)) else {
                    return unknown_label;
                };
                current = next;
            }
        }
    }
}

impl DecisionTree {
    /// Predict the label of a single example.
    ///
    /// Never fails: examples the tree cannot route get
    /// [`unknown_label`](DecisionTree::unknown_label).
    #[must_use]
    pub fn predict(&self, example: &Example) -> &str {
        predict(&self.root, example, &self.unknown_label)
    }

    /// Predict the label of every example, in input order.
    #[must_use]
    pub fn predict_batch<E: Borrow<Example>>(&self, examples: &[E]) -> Vec<&str> {
        examples.iter().map(|e| self.predict(e.borrow())).collect()
    }
}
