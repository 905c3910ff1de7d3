use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A single categorical record: attribute values plus a class label.
///
/// An empty label marks an unlabeled (query) example. Examples are never
/// mutated once built; the builder and statistics only borrow them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    attributes: BTreeMap<String, String>,
    label: String,
}

impl Example {
    /// Create an example from attribute `(name, value)` pairs and a label.
    ///
    /// A repeated attribute name keeps the last value.
    pub fn new<I, K, V>(attributes: I, label: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            label: label.into(),
        }
    }

    /// Create an unlabeled example, used as a prediction query.
    pub fn unlabeled<I, K, V>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(attributes, String::new())
    }

    /// Return the value this example holds for `attribute`, if any.
    #[must_use]
    pub fn value(&self, attribute: &str) -> Option<&str> {
        self.attributes.get(attribute).map(String::as_str)
    }

    /// Return the class label (empty for a query example).
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Return `true` if the example carries a non-empty label.
    #[must_use]
    pub fn is_labeled(&self) -> bool {
        !self.label.is_empty()
    }

    /// Iterate over `(attribute, value)` pairs in attribute-name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// The attribute names still available for splitting.
///
/// Iteration is lexicographic, which fixes the tie-breaking order of
/// attribute selection. The set is a value: [`AttributeSet::without`]
/// returns a new set and leaves `self` untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet(BTreeSet<String>);

impl AttributeSet {
    /// Create an attribute set from names. Duplicates collapse.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Return a copy of this set with `name` removed.
    #[must_use]
    pub fn without(&self, name: &str) -> Self {
        let mut names = self.0.clone();
        names.remove(name);
        Self(names)
    }

    /// Return `true` if `name` is in the set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Return the first name in iteration order.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Iterate over the names in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Return the number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return `true` if no names remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(name)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::{AttributeSet, Example};

    #[test]
    fn value_lookup() {
        let e = Example::new([("Alt", "Yes"), ("Bar", "No")], "Yes");
        assert_eq!(e.value("Alt"), Some("Yes"));
        assert_eq!(e.value("Rain"), None);
        assert_eq!(e.label(), "Yes");
        assert!(e.is_labeled());
    }

    #[test]
    fn unlabeled_example() {
        let e = Example::unlabeled([("Alt", "Yes")]);
        assert!(!e.is_labeled());
        assert_eq!(e.label(), "");
    }

    #[test]
    fn without_leaves_receiver_intact() {
        let attrs = AttributeSet::new(["Bar", "Alt", "Rain"]);
        let child = attrs.without("Bar");
        assert_eq!(attrs.len(), 3);
        assert_eq!(child.len(), 2);
        assert!(!child.contains("Bar"));
        assert!(attrs.contains("Bar"));
    }

    #[test]
    fn iteration_is_lexicographic() {
        let attrs = AttributeSet::new(["Type", "Alt", "Patrons"]);
        let names: Vec<&str> = attrs.iter().collect();
        assert_eq!(names, ["Alt", "Patrons", "Type"]);
        assert_eq!(attrs.first(), Some("Alt"));
    }

    #[test]
    fn display_lists_names() {
        let attrs: AttributeSet = ["B", "A"].into_iter().collect();
        assert_eq!(format!("{attrs}"), "{A, B}");
        assert_eq!(format!("{}", AttributeSet::default()), "{}");
    }
}
