//! Indented text rendering of a tree.

use std::fmt;
use std::io;

use crate::node::Node;
use crate::tree::DecisionTree;

/// Write `node` as indented text, pre-order, children sorted by value.
///
/// ```text
/// Attribute: Patrons
///   If Patrons = None:
///     Leaf: No
/// ```
///
/// # Errors
///
/// Returns any I/O error raised by `out`.
pub fn print_tree<W: io::Write>(node: &Node, indent: &str, out: &mut W) -> io::Result<()> {
    let mut text = String::new();
    // Writing into a String cannot fail.
    let _ = render_node(node, indent, &mut text);
    out.write_all(text.as_bytes())
}

fn render_node<W: fmt::Write>(node: &Node, indent: &str, out: &mut W) -> fmt::Result {
    match node {
        Node::Leaf { label, .. } => writeln!(out, "{indent}Leaf: {label}"),
        Node::Internal {
            attribute,
            children,
            ..
        } => {
            writeln!(out, "{indent}Attribute: {attribute}")?;
            let nested = format!("{indent}    ");
            for (value, child) in children {
                writeln!(out, "{indent}  If {attribute} = {value}:")?;
                render_node(child, &nested, out)?;
            }
            Ok(())
        }
    }
}

impl DecisionTree {
    /// Render the tree as indented text.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render_node(&self.root, "", f)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render_node(self, "", f)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::print_tree;
    use crate::node::Node;

    fn sample() -> Node {
        let mut hungry = BTreeMap::new();
        hungry.insert("Yes".to_string(), Node::leaf("Yes", 2));
        hungry.insert("No".to_string(), Node::leaf("No", 1));
        let mut children = BTreeMap::new();
        children.insert("Some".to_string(), Node::leaf("Yes", 3));
        children.insert("None".to_string(), Node::leaf("No", 2));
        children.insert(
            "Full".to_string(),
            Node::Internal {
                attribute: "Hungry".to_string(),
                children: hungry,
                n_samples: 3,
                gain: 0.9,
            },
        );
        Node::Internal {
            attribute: "Patrons".to_string(),
            children,
            n_samples: 8,
            gain: 0.5,
        }
    }

    #[test]
    fn renders_sorted_and_indented() {
        let expected = "\
Attribute: Patrons
  If Patrons = Full:
    Attribute: Hungry
      If Hungry = No:
        Leaf: No
      If Hungry = Yes:
        Leaf: Yes
  If Patrons = None:
    Leaf: No
  If Patrons = Some:
    Leaf: Yes
";
        assert_eq!(sample().to_string(), expected);
    }

    #[test]
    fn print_tree_honours_indent() {
        let mut out = Vec::new();
        print_tree(&Node::leaf("Yes", 1), ">>", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), ">>Leaf: Yes\n");
    }

    #[test]
    fn print_matches_display() {
        let node = sample();
        let mut out = Vec::new();
        print_tree(&node, "", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), node.to_string());
    }
}
