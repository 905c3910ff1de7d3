//! ID3 decision trees over categorical examples: train, print, predict.
//!
//! Trees are grown top-down by information gain (or by attribute order),
//! branch on every attribute value observed during training, and route
//! unseen values to an explicit unknown label instead of failing.

mod confusion;
mod error;
mod example;
mod importance;
mod node;
mod predict;
mod print;
pub mod restaurant;
mod select;
mod stats;
mod tree;

pub use confusion::{ClassMetrics, ConfusionMatrix};
pub use error::Id3Error;
pub use example::{AttributeSet, Example};
pub use importance::RankedAttribute;
pub use node::Node;
pub use predict::predict;
pub use print::print_tree;
pub use select::{Importance, choose_best_attribute, information_gain, partition};
pub use stats::{entropy, label_counts, plurality_value, same_classification};
pub use tree::{DecisionTree, DecisionTreeConfig, EmptyBranch, UNKNOWN_LABEL, learn_decision_tree};
