use std::borrow::Borrow;
use std::collections::BTreeMap;

use tracing::debug;

use crate::error::Id3Error;
use crate::example::{AttributeSet, Example};
use crate::stats::{entropy, entropy_of};

/// Policy for choosing the attribute to split on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Importance {
    /// Highest information gain; the first attribute in set order wins ties.
    #[default]
    InformationGain,
    /// The first attribute in set order, without looking at the examples.
    FirstAttribute,
}

impl Importance {
    /// Choose an attribute from `attributes` for `examples` under this policy.
    ///
    /// Returns the attribute and the information gain it achieves
    /// (reported as 0.0 by [`Importance::FirstAttribute`]).
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`Id3Error::EmptyAttributes`] | `attributes` is empty |
    /// | [`Id3Error::EmptyExamples`] | `examples` is empty (gain policy only) |
    /// | [`Id3Error::UnlabeledExample`] | an example has no label (gain policy only) |
    pub fn choose<'a, E: Borrow<Example>>(
        &self,
        examples: &[E],
        attributes: &'a AttributeSet,
    ) -> Result<(&'a str, f64), Id3Error> {
        match self {
            Importance::InformationGain => best_by_gain(examples, attributes),
            Importance::FirstAttribute => attributes
                .first()
                .map(|a| (a, 0.0))
                .ok_or(Id3Error::EmptyAttributes),
        }
    }
}

/// Group examples by the value they hold for `attribute`.
///
/// Groups are keyed by value in sorted order and keep the input order of
/// examples within each group. Examples lacking `attribute` belong to no
/// group; the second element of the tuple counts them.
pub fn partition<'e, E: Borrow<Example>>(
    examples: &'e [E],
    attribute: &str,
) -> (BTreeMap<&'e str, Vec<&'e Example>>, usize) {
    let mut groups: BTreeMap<&str, Vec<&Example>> = BTreeMap::new();
    let mut dropped = 0usize;
    for e in examples {
        let e = e.borrow();
        match e.value(attribute) {
            Some(v) => groups.entry(v).or_default().push(e),
            None => dropped += 1,
        }
    }
    (groups, dropped)
}

/// Information gain from splitting `examples` on `attribute`, in bits.
///
/// Only examples holding `attribute` take part: partition entropies are
/// weighted by `|group| / |known|`, subtracted from the entropy of the known
/// examples, and the result is scaled by the fraction `|known| / |examples|`.
/// With no missing values this is the plain ID3 gain. An attribute no
/// example holds has gain 0.0.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`Id3Error::EmptyExamples`] | `examples` is empty |
/// | [`Id3Error::UnlabeledExample`] | some example has an empty label |
pub fn information_gain<E: Borrow<Example>>(
    examples: &[E],
    attribute: &str,
) -> Result<f64, Id3Error> {
    entropy(examples)?;
    Ok(split_gain(examples, attribute).unwrap_or(0.0))
}

/// Choose the attribute with the greatest information gain.
///
/// Attributes no example holds are never chosen while another attribute is
/// observed. If none is observed the first attribute is returned.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`Id3Error::EmptyAttributes`] | `attributes` is empty |
/// | [`Id3Error::EmptyExamples`] | `examples` is empty |
/// | [`Id3Error::UnlabeledExample`] | some example has an empty label |
pub fn choose_best_attribute<'a, E: Borrow<Example>>(
    examples: &[E],
    attributes: &'a AttributeSet,
) -> Result<&'a str, Id3Error> {
    best_by_gain(examples, attributes).map(|(a, _)| a)
}

fn best_by_gain<'a, E: Borrow<Example>>(
    examples: &[E],
    attributes: &'a AttributeSet,
) -> Result<(&'a str, f64), Id3Error> {
    let first = attributes.first().ok_or(Id3Error::EmptyAttributes)?;
    entropy(examples)?;

    let mut best_gain = f64::NEG_INFINITY;
    let mut best: Option<&str> = None;
    for attribute in attributes.iter() {
        let Some(gain) = split_gain(examples, attribute) else {
            continue;
        };
        if gain > best_gain {
            best_gain = gain;
            best = Some(attribute);
        }
    }

    Ok(best.map_or((first, 0.0), |a| (a, best_gain)))
}

/// Gain over the examples holding `attribute`, scaled by their share.
/// `None` when no example holds it.
fn split_gain<E: Borrow<Example>>(examples: &[E], attribute: &str) -> Option<f64> {
    let (groups, dropped) = partition(examples, attribute);
    let known: usize = groups.values().map(Vec::len).sum();
    if known == 0 {
        return None;
    }
    if dropped > 0 {
        debug!(
            attribute,
            dropped,
            known,
            "examples missing attribute excluded from gain computation"
        );
    }

    let known_examples: Vec<&Example> = groups.values().flatten().copied().collect();
    let n_known = known as f64;
    let remainder: f64 = groups
        .values()
        .map(|group| group.len() as f64 / n_known * entropy_of(group))
        .sum();
    let coverage = n_known / examples.len() as f64;
    Some(coverage * (entropy_of(&known_examples) - remainder))
}
