//! Information-gain attribute importance.

use std::collections::BTreeMap;

use crate::node::Node;
use crate::tree::DecisionTree;

/// A ranked attribute with name, importance score, and rank.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RankedAttribute {
    /// Attribute name.
    pub name: String,
    /// Normalized importance score (sums to 1.0 unless every score is zero).
    pub importance: f64,
    /// 1-based rank (1 = most important).
    pub rank: usize,
}

impl DecisionTree {
    /// Rank the training attributes by sample-weighted information gain.
    ///
    /// Every internal node adds `n_samples * gain` to its attribute; totals
    /// are normalized to sum to 1.0 and sorted descending. Attributes never
    /// split on score 0.0. Equal scores keep attribute-name order.
    #[must_use]
    pub fn attribute_importances(&self) -> Vec<RankedAttribute> {
        let mut totals: BTreeMap<&str, f64> =
            self.attributes.iter().map(|a| (a, 0.0)).collect();
        accumulate(&self.root, &mut totals);

        let sum: f64 = totals.values().sum();
        if sum > 0.0 {
            totals.values_mut().for_each(|v| *v /= sum);
        }

        let mut ranked: Vec<RankedAttribute> = totals
            .into_iter()
            .map(|(name, importance)| RankedAttribute {
                name: name.to_string(),
                importance,
                rank: 0, // set after sorting
            })
            .collect();

        // Stable sort keeps name order among ties.
        ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));
        for (i, attr) in ranked.iter_mut().enumerate() {
            attr.rank = i + 1;
        }
        ranked
    }
}

fn accumulate<'a>(node: &'a Node, totals: &mut BTreeMap<&'a str, f64>) {
    if let Node::Internal {
        attribute,
        children,
        n_samples,
        gain,
    } = node
    {
        *totals.entry(attribute.as_str()).or_insert(0.0) += *n_samples as f64 * gain;
        for child in children.values() {
            accumulate(child, totals);
        }
    }
}
