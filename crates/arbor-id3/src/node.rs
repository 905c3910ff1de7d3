use std::collections::BTreeMap;

/// A node of an ID3 decision tree.
///
/// Each internal node owns its children outright, keyed by the attribute
/// value that leads to them. Children only exist for values observed in the
/// training examples that reached the node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A terminal node carrying a class label.
    Leaf {
        /// Predicted class label.
        label: String,
        /// Number of training examples that reached this leaf.
        n_samples: usize,
    },
    /// A branching node splitting on one attribute.
    Internal {
        /// Attribute tested at this node.
        attribute: String,
        /// Child subtree per observed attribute value, sorted by value.
        children: BTreeMap<String, Node>,
        /// Number of training examples that reached this node.
        n_samples: usize,
        /// Information gain of the split, in bits.
        gain: f64,
    },
}

impl Node {
    /// Create a leaf node.
    pub(crate) fn leaf(label: impl Into<String>, n_samples: usize) -> Self {
        Node::Leaf {
            label: label.into(),
            n_samples,
        }
    }

    /// Return `true` if this node is a leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Return the number of training examples that reached this node.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        match self {
            Node::Leaf { n_samples, .. } | Node::Internal { n_samples, .. } => *n_samples,
        }
    }

    /// Return the label of a leaf, `None` for an internal node.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Node::Leaf { label, .. } => Some(label),
            Node::Internal { .. } => None,
        }
    }

    /// Return the splitting attribute of an internal node, `None` for a leaf.
    #[must_use]
    pub fn attribute(&self) -> Option<&str> {
        match self {
            Node::Internal { attribute, .. } => Some(attribute),
            Node::Leaf { .. } => None,
        }
    }

    /// Return the child reached by `value`, if this is an internal node with
    /// such a branch.
    #[must_use]
    pub fn child(&self, value: &str) -> Option<&Node> {
        match self {
            Node::Internal { children, .. } => children.get(value),
            Node::Leaf { .. } => None,
        }
    }

    /// Total number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { children, .. } => {
                1 + children.values().map(Node::n_nodes).sum::<usize>()
            }
        }
    }

    /// Number of leaves in this subtree.
    #[must_use]
    pub fn n_leaves(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { children, .. } => children.values().map(Node::n_leaves).sum(),
        }
    }

    /// Length of the longest root-to-leaf path; a lone leaf has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { children, .. } => {
                1 + children.values().map(Node::depth).max().unwrap_or(0)
            }
        }
    }
}
