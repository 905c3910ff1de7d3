//! Label statistics over a collection of examples.
//!
//! Every function accepts `&[Example]` as well as `&[&Example]`, so the
//! builder can hand in partitions without cloning records.

use std::borrow::Borrow;
use std::collections::HashMap;

use crate::error::Id3Error;
use crate::example::Example;

/// Count label occurrences, in order of first appearance.
///
/// Unlabeled examples are counted under the empty label.
#[must_use]
pub fn label_counts<E: Borrow<Example>>(examples: &[E]) -> Vec<(&str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();
    for e in examples {
        let label = e.borrow().label();
        match slots.get(label) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(label, counts.len());
                counts.push((label, 1));
            }
        }
    }
    counts
}

/// Return the most frequent label.
///
/// Ties go to the label encountered first while scanning `examples` in order.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`Id3Error::EmptyExamples`] | `examples` is empty |
/// | [`Id3Error::UnlabeledExample`] | some example has an empty label |
pub fn plurality_value<E: Borrow<Example>>(examples: &[E]) -> Result<String, Id3Error> {
    require_labeled(examples, "plurality_value")?;

    let mut best: Option<(&str, usize)> = None;
    for (label, count) in label_counts(examples) {
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label.to_string())
        .ok_or(Id3Error::EmptyExamples {
            operation: "plurality_value",
        })
}

/// Return `true` if `examples` is empty or every label equals the first one.
///
/// The empty case is vacuously true; it does not mean a label is available.
#[must_use]
pub fn same_classification<E: Borrow<Example>>(examples: &[E]) -> bool {
    match examples.split_first() {
        None => true,
        Some((first, rest)) => {
            let label = first.borrow().label();
            rest.iter().all(|e| e.borrow().label() == label)
        }
    }
}

/// Shannon entropy of the label distribution, in bits.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`Id3Error::EmptyExamples`] | `examples` is empty |
/// | [`Id3Error::UnlabeledExample`] | some example has an empty label |
pub fn entropy<E: Borrow<Example>>(examples: &[E]) -> Result<f64, Id3Error> {
    require_labeled(examples, "entropy")?;
    Ok(entropy_of(examples))
}

/// Entropy without precondition checks; callers guarantee a non-empty,
/// fully labeled collection.
pub(crate) fn entropy_of<E: Borrow<Example>>(examples: &[E]) -> f64 {
    let n = examples.len() as f64;
    -label_counts(examples)
        .iter()
        .map(|&(_, c)| {
            let p = c as f64 / n;
            p * p.log2()
        })
        .sum::<f64>()
}

fn require_labeled<E: Borrow<Example>>(
    examples: &[E],
    operation: &'static str,
) -> Result<(), Id3Error> {
    if examples.is_empty() {
        return Err(Id3Error::EmptyExamples { operation });
    }
    if let Some(index) = examples.iter().position(|e| !e.borrow().is_labeled()) {
        return Err(Id3Error::UnlabeledExample { index });
    }
    Ok(())
}
