//! The restaurant-wait dataset: twelve labeled visits, ten attributes.
//!
//! Each example records whether the diner decided to wait for a table.

use crate::example::{AttributeSet, Example};

/// Attribute names, in column order of [`examples`].
pub const ATTRIBUTES: [&str; 10] = [
    "Alt",
    "Bar",
    "Fri/Sat",
    "Hungry",
    "Patrons",
    "Price",
    "Rain",
    "Reservation",
    "Type",
    "WaitEstimate",
];

/// The ten restaurant attributes as a splitting set.
#[must_use]
pub fn attributes() -> AttributeSet {
    AttributeSet::new(ATTRIBUTES)
}

/// The twelve labeled training examples.
#[must_use]
pub fn examples() -> Vec<Example> {
    vec![
        row(["Yes", "No", "No", "Yes", "Some", "$$$", "No", "Yes", "French", "0-10"], "Yes"),
        row(["Yes", "No", "No", "Yes", "Full", "$", "No", "No", "Thai", "30-60"], "No"),
        row(["No", "Yes", "No", "No", "Some", "$", "No", "No", "Burger", "0-10"], "Yes"),
        row(["Yes", "No", "Yes", "Yes", "Full", "$", "Yes", "No", "Thai", "10-30"], "Yes"),
        row(["Yes", "No", "Yes", "No", "Full", "$$$", "No", "Yes", "French", ">60"], "No"),
        row(["No", "Yes", "No", "Yes", "Some", "$$", "Yes", "Yes", "Italian", "0-10"], "Yes"),
        row(["No", "Yes", "No", "No", "None", "$", "Yes", "No", "Burger", "0-10"], "No"),
        row(["No", "No", "No", "Yes", "Some", "$", "Yes", "Yes", "Thai", "0-10"], "Yes"),
        row(["No", "Yes", "Yes", "No", "Full", "$", "Yes", "No", "Burger", ">60"], "No"),
        row(["Yes", "Yes", "Yes", "Yes", "Full", "$$$", "No", "Yes", "Italian", "10-30"], "Yes"),
        row(["No", "No", "No", "No", "None", "$", "No", "No", "Thai", "0-10"], "No"),
        row(["Yes", "Yes", "Yes", "Yes", "Full", "$", "No", "No", "Burger", "30-60"], "Yes"),
    ]
}

/// An unlabeled visit: a hungry party on a full Friday night at a cheap
/// Thai place with a 30-60 minute wait.
#[must_use]
pub fn query() -> Example {
    Example::unlabeled(ATTRIBUTES.into_iter().zip([
        "Yes", "No", "Yes", "Yes", "Full", "$", "No", "No", "Thai", "30-60",
    ]))
}

fn row(values: [&str; 10], label: &str) -> Example {
    Example::new(ATTRIBUTES.into_iter().zip(values), label)
}
