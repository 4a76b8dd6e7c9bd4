//! Tree visualization
//!
//! Renders a parsed template as an indented outline, one node per line.
//!
//! ```text
//! Sequence
//!     Literal "id-"
//!     CharacterSet {4} [0123456789]
//!     Alternation
//!         Literal "a"
//!         Literal "b"
//! ```

use super::node::{Node, Repeat};
use std::fmt::Write;

/// Members shown for a character set before the listing is abbreviated
const MAX_MEMBERS_SHOWN: usize = 32;

/// Template tree pretty printer
pub struct TreePrinter {
    /// Indentation string
    indent: String,
    /// Maximum depth to print
    max_depth: Option<usize>,
}

impl TreePrinter {
    /// Create a new tree printer
    pub fn new() -> Self {
        Self {
            indent: "    ".to_string(),
            max_depth: None,
        }
    }

    /// Set the indentation string
    pub fn indent(mut self, indent: &str) -> Self {
        self.indent = indent.to_string();
        self
    }

    /// Set the maximum depth to print
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Print a node and everything below it
    pub fn print(&self, node: &Node) -> String {
        let mut output = String::new();
        self.print_node(node, 0, &mut output);
        output
    }

    fn print_node(&self, node: &Node, depth: usize, output: &mut String) {
        let indent = self.indent.repeat(depth);

        if let Some(max) = self.max_depth {
            if depth > max {
                let _ = writeln!(output, "{}...", indent);
                return;
            }
        }

        match node {
            Node::Literal { text } => {
                let _ = writeln!(output, "{}Literal {:?}", indent, text);
            }
            Node::CharacterSet { chars, repeat } => {
                let _ = writeln!(
                    output,
                    "{}CharacterSet {} {}",
                    indent,
                    format_repeat(repeat),
                    format_members(chars)
                );
            }
            Node::ExternalSource { name } => {
                let _ = writeln!(output, "{}ExternalSource ${{{}}}", indent, name);
            }
            Node::Sequence { children } => {
                let _ = writeln!(output, "{}Sequence", indent);
                for child in children {
                    self.print_node(child, depth + 1, output);
                }
            }
            Node::Alternation { operands } => {
                let _ = writeln!(output, "{}Alternation", indent);
                for operand in operands {
                    self.print_node(operand, depth + 1, output);
                }
            }
            Node::Permutation { operands } => {
                let _ = writeln!(output, "{}Permutation", indent);
                for operand in operands {
                    self.print_node(operand, depth + 1, output);
                }
            }
        }
    }
}

impl Default for TreePrinter {
    fn default() -> Self {
        Self::new()
    }
}

fn format_repeat(repeat: &Repeat) -> String {
    match repeat {
        Repeat::Exactly(n) => format!("{{{}}}", n),
        Repeat::Between(low, high) => format!("{{{}:{}}}", low, high),
    }
}

fn format_members(chars: &[char]) -> String {
    let shown: String = chars
        .iter()
        .take(MAX_MEMBERS_SHOWN)
        .flat_map(|c| c.escape_debug())
        .collect();

    if chars.len() > MAX_MEMBERS_SHOWN {
        format!("[{}...] ({} members)", shown, chars.len())
    } else {
        format!("[{}]", shown)
    }
}
