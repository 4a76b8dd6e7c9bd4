//! Render tree
//!
//! A parsed pattern is a tree of [`Node`]s. The tree is built once and never
//! mutated; every render walks it with the generator's randomness provider
//! and the caller's bindings.
//!
//! Nodes derive `Serialize`/`Deserialize` so a tree can be exported as JSON
//! for inspection.

use super::error::{Result, TemplateError};
use super::random::Randomness;
use super::source::Bindings;
use serde::{Deserialize, Serialize};

/// How many characters a character set contributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Repeat {
    /// Always exactly this many
    Exactly(usize),
    /// Uniformly chosen in `low..=high`
    Between(usize, usize),
}

impl Repeat {
    /// Smallest possible count
    pub fn low(&self) -> usize {
        match *self {
            Repeat::Exactly(n) => n,
            Repeat::Between(low, _) => low,
        }
    }

    /// Largest possible count
    pub fn high(&self) -> usize {
        match *self {
            Repeat::Exactly(n) => n,
            Repeat::Between(_, high) => high,
        }
    }

    /// Draw a count
    fn draw(&self, randomness: &mut dyn Randomness) -> usize {
        match *self {
            Repeat::Exactly(n) => n,
            Repeat::Between(low, high) => randomness.int_in(low, high),
        }
    }
}

impl Default for Repeat {
    fn default() -> Self {
        Repeat::Exactly(1)
    }
}

/// Binary operators joining neighbouring operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `|`: pick one operand
    Or,
    /// `&`: shuffle the characters of all operands together
    And,
}

impl Operator {
    /// Operator for a pattern character
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '|' => Some(Operator::Or),
            '&' => Some(Operator::And),
            _ => None,
        }
    }

    /// Pattern character for this operator
    pub fn as_char(&self) -> char {
        match self {
            Operator::Or => '|',
            Operator::And => '&',
        }
    }

    /// Combine a run of operands into one node
    ///
    /// A single operand is returned unwrapped, so composite operator nodes
    /// always hold at least two operands.
    pub fn combine(&self, mut operands: Vec<Node>) -> Node {
        if operands.len() == 1 {
            if let Some(only) = operands.pop() {
                return only;
            }
        }
        match self {
            Operator::Or => Node::Alternation { operands },
            Operator::And => Node::Permutation { operands },
        }
    }
}

/// A node of the render tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    /// Fixed text
    Literal {
        /// The text, possibly empty
        text: String,
    },

    /// Random characters drawn with replacement
    CharacterSet {
        /// Members in order; duplicates raise a member's probability
        chars: Vec<char>,
        /// Count of characters to draw
        repeat: Repeat,
    },

    /// Children rendered in order and concatenated
    Sequence {
        /// Child nodes
        children: Vec<Node>,
    },

    /// Exactly one operand rendered, chosen uniformly
    Alternation {
        /// At least two operands
        operands: Vec<Node>,
    },

    /// All operands rendered, then their characters shuffled together
    Permutation {
        /// At least two operands
        operands: Vec<Node>,
    },

    /// A value looked up in the caller's bindings at render time
    ExternalSource {
        /// Binding name
        name: String,
    },
}

impl Node {
    /// Create a literal node
    pub fn literal(text: impl Into<String>) -> Self {
        Node::Literal { text: text.into() }
    }

    /// Create a character set node
    pub fn character_set(chars: Vec<char>, repeat: Repeat) -> Self {
        Node::CharacterSet { chars, repeat }
    }

    /// Create a sequence node
    pub fn sequence(children: Vec<Node>) -> Self {
        Node::Sequence { children }
    }

    /// Render this node to a fresh string
    pub fn render(&self, bindings: &Bindings, randomness: &mut dyn Randomness) -> String {
        let mut out = String::new();
        self.render_into(bindings, randomness, &mut out);
        out
    }

    /// Render this node, appending to `out`
    pub fn render_into(&self, bindings: &Bindings, randomness: &mut dyn Randomness, out: &mut String) {
        match self {
            Node::Literal { text } => out.push_str(text),

            Node::CharacterSet { chars, repeat } => {
                if chars.is_empty() {
                    return;
                }
                let count = repeat.draw(randomness);
                for _ in 0..count {
                    out.push(chars[randomness.next_index(chars.len())]);
                }
            }

            Node::Sequence { children } => {
                for child in children {
                    child.render_into(bindings, randomness, out);
                }
            }

            Node::Alternation { operands } => {
                if operands.is_empty() {
                    return;
                }
                let chosen = randomness.next_index(operands.len());
                operands[chosen].render_into(bindings, randomness, out);
            }

            Node::Permutation { operands } => {
                let mut combined = String::new();
                for operand in operands {
                    operand.render_into(bindings, randomness, &mut combined);
                }
                let mut chars: Vec<char> = combined.chars().collect();
                randomness.shuffle_chars(&mut chars);
                out.extend(chars);
            }

            Node::ExternalSource { name } => {
                out.push_str(&bindings.resolve(name, randomness));
            }
        }
    }

    /// Number of distinct outcomes this node can produce
    ///
    /// Literals count once, character sets count every string of every
    /// allowed length, sequences multiply and alternations add. Duplicate
    /// class members are counted as distinct, so the figure is an upper
    /// bound for sets like `[aab]`.
    ///
    /// Permutations are only countable over flat operands. When all operands
    /// are literals the count of distinct arrangements is exact; with
    /// character sets involved it is computed from one sample render and
    /// is only an estimate. Trees holding external sources cannot be
    /// counted at all.
    pub fn count(&self, randomness: &mut dyn Randomness) -> Result<u128> {
        match self {
            Node::Literal { .. } => Ok(1),

            Node::CharacterSet { chars, repeat } => {
                count_strings(chars.len() as u128, repeat.low(), repeat.high())
            }

            Node::Sequence { children } => children.iter().try_fold(1u128, |acc, child| {
                acc.checked_mul(child.count(randomness)?).ok_or_else(overflow)
            }),

            Node::Alternation { operands } => operands.iter().try_fold(0u128, |acc, operand| {
                acc.checked_add(operand.count(randomness)?).ok_or_else(overflow)
            }),

            Node::Permutation { operands } => permutation_count(operands, randomness),

            Node::ExternalSource { name } => Err(TemplateError::capability(format!(
                "cannot count outcomes of external source ${{{}}}",
                name
            ))),
        }
    }

    /// True if an external source appears anywhere in this subtree
    pub fn has_external_source(&self) -> bool {
        match self {
            Node::ExternalSource { .. } => true,
            Node::Literal { .. } | Node::CharacterSet { .. } => false,
            Node::Sequence { children } => children.iter().any(Node::has_external_source),
            Node::Alternation { operands } | Node::Permutation { operands } => {
                operands.iter().any(Node::has_external_source)
            }
        }
    }

    /// Total number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        match self {
            Node::Sequence { children } => 1 + children.iter().map(Node::node_count).sum::<usize>(),
            Node::Alternation { operands } | Node::Permutation { operands } => {
                1 + operands.iter().map(Node::node_count).sum::<usize>()
            }
            _ => 1,
        }
    }
}

fn overflow() -> TemplateError {
    TemplateError::capability("outcome count does not fit in 128 bits")
}

/// `base^low + base^(low+1) + ... + base^high`
fn count_strings(base: u128, low: usize, high: usize) -> Result<u128> {
    match base {
        0 => Ok(u128::from(low == 0)),
        1 => Ok((high - low) as u128 + 1),
        _ => {
            // Terminates within 128 terms: base^r overflows past that.
            let mut total: u128 = 0;
            for r in low..=high {
                total = total.checked_add(checked_pow(base, r)?).ok_or_else(overflow)?;
            }
            Ok(total)
        }
    }
}

fn checked_pow(base: u128, exp: usize) -> Result<u128> {
    let exp = u32::try_from(exp).map_err(|_| overflow())?;
    base.checked_pow(exp).ok_or_else(overflow)
}

/// Distinct arrangements of the characters of flat permutation operands
fn permutation_count(operands: &[Node], randomness: &mut dyn Randomness) -> Result<u128> {
    for operand in operands {
        match operand {
            Node::Literal { .. } | Node::CharacterSet { .. } => {}
            Node::ExternalSource { name } => {
                return Err(TemplateError::capability(format!(
                    "cannot count outcomes of external source ${{{}}}",
                    name
                )))
            }
            _ => {
                return Err(TemplateError::capability(
                    "permutation counts are only supported over literal and character class operands",
                ))
            }
        }
    }

    let empty = Bindings::new();
    let mut sample = String::new();
    for operand in operands {
        operand.render_into(&empty, randomness, &mut sample);
    }

    let mut chars: Vec<char> = sample.chars().collect();
    chars.sort_unstable();

    let mut group_sizes = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let mut j = i + 1;
        while j < chars.len() && chars[j] == chars[i] {
            j += 1;
        }
        group_sizes.push((j - i) as u128);
        i = j;
    }

    multinomial(&group_sizes)
}

/// `(k1 + k2 + ...)! / (k1! k2! ...)` as a product of binomials
fn multinomial(group_sizes: &[u128]) -> Result<u128> {
    let mut total: u128 = 1;
    let mut placed: u128 = 0;
    for &k in group_sizes {
        placed += k;
        total = total.checked_mul(binomial(placed, k)?).ok_or_else(overflow)?;
    }
    Ok(total)
}

fn binomial(n: u128, k: u128) -> Result<u128> {
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 1..=k {
        // result * (n - k + i) is divisible by i at every step
        result = result.checked_mul(n - k + i).ok_or_else(overflow)? / i;
    }
    Ok(result)
}
