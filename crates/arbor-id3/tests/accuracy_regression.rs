//! Accuracy regression tests for arbor-id3.
//!
//! A deterministic synthetic dataset with two informative attributes and
//! four noise attributes guards against changes that degrade tree quality.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use arbor_id3::{AttributeSet, DecisionTreeConfig, Example, Importance};

// ---------------------------------------------------------------------------
// Helper: deterministic synthetic categorical dataset
// ---------------------------------------------------------------------------

const VALUES: [&str; 3] = ["a", "b", "c"];

/// Generate `n_samples` rows over attributes `c0`..`c5`, each valued in
/// {a, b, c}. The label is "Yes" when `c4 = a` or `c5 = b`, else "No";
/// `c0`..`c3` are noise.
fn make_classification(n_samples: usize, seed: u64) -> (Vec<Example>, AttributeSet) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let names: Vec<String> = (0..6).map(|i| format!("c{i}")).collect();
    let examples = (0..n_samples)
        .map(|_| {
            let values: Vec<&str> = (0..names.len())
                .map(|_| VALUES[rng.gen_range(0..VALUES.len())])
                .collect();
            let label = if values[4] == "a" || values[5] == "b" {
                "Yes"
            } else {
                "No"
            };
            Example::new(names.iter().cloned().zip(values), label)
        })
        .collect();
    (examples, AttributeSet::new(names))
}

// ---------------------------------------------------------------------------
// a) training_fit_is_exact
// ---------------------------------------------------------------------------

/// Labels are a function of the attributes, so an unpruned tree must fit
/// every training row.
#[test]
fn training_fit_is_exact() {
    let (examples, attributes) = make_classification(200, 42);
    let tree = DecisionTreeConfig::new().fit(&examples, &attributes).unwrap();
    let cm = tree.evaluate(&examples).unwrap();
    assert!(
        (cm.accuracy() - 1.0).abs() < f64::EPSILON,
        "training accuracy {}",
        cm.accuracy()
    );
}

// ---------------------------------------------------------------------------
// b) held_out_accuracy_above_threshold
// ---------------------------------------------------------------------------

/// Held-out accuracy must exceed 0.95.
///
/// Reference: the gain policy recovers the generating rule exactly.
#[test]
fn held_out_accuracy_above_threshold() {
    let (train, attributes) = make_classification(200, 42);
    let (test, _) = make_classification(100, 7);
    let tree = DecisionTreeConfig::new().fit(&train, &attributes).unwrap();
    let accuracy = tree.evaluate(&test).unwrap().accuracy();
    assert!(accuracy > 0.95, "held-out accuracy {accuracy} <= 0.95");
}

// ---------------------------------------------------------------------------
// c) informative_attributes_rank_first
// ---------------------------------------------------------------------------

#[test]
fn informative_attributes_rank_first() {
    let (examples, attributes) = make_classification(200, 42);
    let tree = DecisionTreeConfig::new().fit(&examples, &attributes).unwrap();
    let ranked = tree.attribute_importances();
    let mut top: Vec<&str> = ranked[..2].iter().map(|r| r.name.as_str()).collect();
    top.sort_unstable();
    assert_eq!(top, ["c4", "c5"]);
}

// ---------------------------------------------------------------------------
// d) gain_tree_is_smaller_than_first_attribute_tree
// ---------------------------------------------------------------------------

/// Splitting in name order puts the noise attributes first, so the tree
/// it grows must be larger than the gain-driven one.
#[test]
fn gain_tree_is_smaller_than_first_attribute_tree() {
    let (examples, attributes) = make_classification(200, 42);
    let gain = DecisionTreeConfig::new().fit(&examples, &attributes).unwrap();
    let first = DecisionTreeConfig::new()
        .with_importance(Importance::FirstAttribute)
        .fit(&examples, &attributes)
        .unwrap();
    assert!(
        gain.n_nodes() < first.n_nodes(),
        "gain {} nodes vs first-attribute {} nodes",
        gain.n_nodes(),
        first.n_nodes()
    );
}
