//! Template parser
//!
//! A hand-written recursive-descent parser that turns a pattern into a
//! [`Node`] tree. It reads the pattern through a [`Cursor`] one code point
//! at a time; every routine is entered with the cursor on the character
//! that selected it and leaves the cursor on the last character it consumed.
//!
//! # Grammar
//!
//! ```text
//! sequence   := (literal | charclass | group | source)*
//! group      := '(' sequence ')'
//! charclass  := '[' classbody ']' quantifier?
//! quantifier := '{' NUMBER (('-'|':') NUMBER)? '}'
//! source     := '$' '{' IDENTIFIER '}'
//! operator   := '|' | '&'
//! escape     := '\' ANY
//! ```
//!
//! Operators bind the nodes immediately on either side. Consecutive uses of
//! the same operator collect into one node (`a|b|c` is a single three-way
//! alternation); switching operators closes the current run and makes it
//! the left operand of the next one, so `a|b&c` shuffles `c` with the
//! result of `a|b`.

use super::char_class::{expand_range, ClassCode, RangeError, DEFAULT_MAX_RANGE_SPAN};
use super::cursor::Cursor;
use super::error::{Result, TemplateError};
use super::node::{Node, Operator, Repeat};
use super::regex_cache::is_identifier;

/// Characters with structural meaning outside of escapes
pub const META_CHARS: [char; 9] = ['[', ']', '{', '}', '(', ')', '|', '&', '$'];

/// Default maximum group nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Default largest count a quantifier may request
pub const DEFAULT_MAX_REPEAT: usize = 1_000_000;

/// Check whether a character is structural
#[inline]
pub fn is_meta(c: char) -> bool {
    META_CHARS.contains(&c)
}

/// Parser limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting depth of parenthesized groups
    pub max_depth: usize,

    /// Maximum number of code points a class range may span
    pub max_range_span: u32,

    /// Largest upper bound a quantifier may use
    pub max_repeat: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_range_span: DEFAULT_MAX_RANGE_SPAN,
            max_repeat: DEFAULT_MAX_REPEAT,
        }
    }
}

impl ParserConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum group nesting depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the maximum range span
    pub fn with_max_range_span(mut self, span: u32) -> Self {
        self.max_range_span = span;
        self
    }

    /// Set the largest quantifier count
    pub fn with_max_repeat(mut self, repeat: usize) -> Self {
        self.max_repeat = repeat;
        self
    }
}

/// Parse a pattern with default limits
pub fn parse(pattern: &str) -> Result<Node> {
    TemplateParser::new(pattern).parse()
}

/// Parse a pattern with custom limits
pub fn parse_with_config(pattern: &str, config: ParserConfig) -> Result<Node> {
    TemplateParser::with_config(pattern, config).parse()
}

/// Single-pass parser over one pattern
pub struct TemplateParser {
    cursor: Cursor,
    config: ParserConfig,
}

impl TemplateParser {
    /// Create a parser with default limits
    pub fn new(pattern: &str) -> Self {
        Self::with_config(pattern, ParserConfig::default())
    }

    /// Create a parser with custom limits
    pub fn with_config(pattern: &str, config: ParserConfig) -> Self {
        Self {
            cursor: Cursor::new(pattern),
            config,
        }
    }

    /// Parse the whole pattern into a root sequence
    pub fn parse(mut self) -> Result<Node> {
        log_debug!("parsing template");
        let tree = self.parse_sequence(0)?;
        log_debug!("parsed template into {} nodes", tree.node_count());
        Ok(tree)
    }

    fn error(&self, message: impl Into<String>) -> TemplateError {
        TemplateError::syntax(message, self.cursor.position())
    }

    /// Parse nodes until end of input (depth 0) or the closing `)`
    fn parse_sequence(&mut self, depth: usize) -> Result<Node> {
        if depth > self.config.max_depth {
            return Err(self.error(format!(
                "groups nested deeper than {} levels",
                self.config.max_depth
            )));
        }

        let mut builder = SequenceBuilder::default();
        let mut closed = false;

        while let Some(c) = self.cursor.advance() {
            let item = match c {
                '$' if self.cursor.peek_next() == Some('{') => self.parse_source()?,
                '[' => self.parse_character_set()?,
                '(' => self.parse_sequence(depth + 1)?,
                ')' => {
                    if depth == 0 {
                        return Err(self.error("extra closing parenthesis"));
                    }
                    closed = true;
                    break;
                }
                '|' | '&' => {
                    if let Some(op) = Operator::from_char(c) {
                        builder.push_operator(op).map_err(|m| self.error(m))?;
                    }
                    continue;
                }
                c if is_meta(c) => {
                    return Err(self.error(format!("un-escaped special character: {}", c)));
                }
                _ => self.parse_literal()?,
            };
            builder.push_item(item);
        }

        if let Some(op) = builder.dangling_operator() {
            return Err(self.error(format!("operator {} with no right operand", op.as_char())));
        }
        if depth > 0 && !closed {
            return Err(self.error("missing closing parenthesis"));
        }

        Ok(Node::sequence(builder.finish()))
    }

    /// Consecutive non-meta characters; a backslash escapes anything
    fn parse_literal(&mut self) -> Result<Node> {
        let mut text = String::new();

        loop {
            match self.cursor.current() {
                Some('\\') => match self.cursor.advance() {
                    Some(escaped) => text.push(escaped),
                    None => return Err(self.error("dangling escape at end of pattern")),
                },
                Some(c) => text.push(c),
                None => break,
            }

            match self.cursor.peek_next() {
                Some(next) if !is_meta(next) => {
                    self.cursor.advance();
                }
                _ => break,
            }
        }

        Ok(Node::literal(text))
    }

    /// `[...]` with members, ranges and class codes, plus an optional quantifier
    fn parse_character_set(&mut self) -> Result<Node> {
        let mut chars: Vec<char> = Vec::new();

        loop {
            let c = self
                .cursor
                .advance()
                .ok_or_else(|| self.error("unterminated character class"))?;

            match c {
                ']' => break,
                '\\' => {
                    let escaped = self
                        .cursor
                        .advance()
                        .ok_or_else(|| self.error("unterminated character class"))?;
                    match ClassCode::from_code(escaped) {
                        Some(class) => chars.extend(class.members().chars()),
                        None => chars.push(escaped),
                    }
                }
                c if self.cursor.peek_next() == Some('-') => {
                    if is_meta(c) {
                        return Err(self.error(format!(
                            "un-escaped character in class definition: {}",
                            c
                        )));
                    }
                    self.cursor.advance();
                    let end = match self.cursor.advance() {
                        Some(end) if !is_meta(end) => end,
                        _ => return Err(self.error("unexpected end of class range")),
                    };
                    let range = expand_range(c, end, self.config.max_range_span).map_err(
                        |RangeError::TooLarge { span }| {
                            self.error(format!(
                                "character range too large: {}-{} spans {} code points",
                                c, end, span
                            ))
                        },
                    )?;
                    chars.extend(range);
                }
                c if is_meta(c) => {
                    return Err(self.error(format!(
                        "un-escaped character in class definition: {}",
                        c
                    )));
                }
                c => chars.push(c),
            }
        }

        if chars.is_empty() {
            return Err(self.error("empty character class"));
        }

        let repeat = if self.cursor.peek_next() == Some('{') {
            self.cursor.advance();
            self.parse_quantifier()?
        } else {
            Repeat::Exactly(1)
        };

        Ok(Node::character_set(chars, repeat))
    }

    /// `{n}`, `{low:high}` or `{low-high}`; the upper bound is mandatory
    fn parse_quantifier(&mut self) -> Result<Repeat> {
        let mut low: Option<usize> = None;
        let mut digits = String::new();

        loop {
            let c = self
                .cursor
                .advance()
                .ok_or_else(|| self.error("unexpected end of input in quantifier"))?;

            match c {
                ':' | '-' => {
                    if low.is_some() {
                        return Err(self.error("quantifier has more than one range separator"));
                    }
                    low = Some(self.quantity(&digits)?);
                    digits.clear();
                }
                '}' => {
                    if matches!(self.cursor.peek_previous(), Some(':') | Some('-')) {
                        return Err(self.error("quantifier range must be closed"));
                    }
                    break;
                }
                c if c.is_ascii_digit() => digits.push(c),
                c => return Err(self.error(format!("non-digit in quantifier: '{}'", c))),
            }
        }

        let high = self.quantity(&digits)?;
        if high > self.config.max_repeat {
            return Err(self.error(format!(
                "quantifier {} exceeds the maximum of {}",
                high, self.config.max_repeat
            )));
        }
        match low {
            None => Ok(Repeat::Exactly(high)),
            Some(low) if low > high => Err(self.error(format!(
                "quantifier lower bound {} exceeds upper bound {}",
                low, high
            ))),
            Some(low) => Ok(Repeat::Between(low, high)),
        }
    }

    fn quantity(&self, digits: &str) -> Result<usize> {
        if digits.is_empty() {
            return Ok(0);
        }
        digits
            .parse()
            .map_err(|_| self.error(format!("quantifier too large: {}", digits)))
    }

    /// `${name}`
    fn parse_source(&mut self) -> Result<Node> {
        self.cursor.advance();

        let mut name = String::new();
        loop {
            match self.cursor.advance() {
                Some('}') => break,
                Some(c) => name.push(c),
                None => return Err(self.error("unterminated source reference")),
            }
        }

        if !is_identifier(&name) {
            return Err(self.error(format!("not a valid identifier: '{}'", name)));
        }

        Ok(Node::ExternalSource { name })
    }
}

/// Accumulates the nodes of one sequence and groups operator runs
#[derive(Default)]
struct SequenceBuilder {
    nodes: Vec<Node>,
    run: Option<(Operator, Vec<Node>)>,
    awaiting_operand: bool,
}

impl SequenceBuilder {
    fn push_item(&mut self, node: Node) {
        if self.awaiting_operand {
            if let Some((_, operands)) = self.run.as_mut() {
                operands.push(node);
            }
            self.awaiting_operand = false;
        } else {
            self.flush();
            self.nodes.push(node);
        }
    }

    fn push_operator(&mut self, op: Operator) -> std::result::Result<(), String> {
        if self.awaiting_operand {
            return Err(format!("operator {} with no left operand", op.as_char()));
        }

        self.run = match self.run.take() {
            Some((pending, operands)) if pending == op => Some((pending, operands)),
            Some((pending, operands)) => Some((op, vec![pending.combine(operands)])),
            None => match self.nodes.pop() {
                Some(left) => Some((op, vec![left])),
                None => return Err(format!("operator {} with no left operand", op.as_char())),
            },
        };
        self.awaiting_operand = true;
        Ok(())
    }

    fn dangling_operator(&self) -> Option<Operator> {
        if self.awaiting_operand {
            self.run.as_ref().map(|(op, _)| *op)
        } else {
            None
        }
    }

    fn flush(&mut self) {
        if let Some((op, operands)) = self.run.take() {
            self.nodes.push(op.combine(operands));
        }
    }

    fn finish(mut self) -> Vec<Node> {
        self.flush();
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Node {
        Node::literal(s)
    }

    fn seq(children: Vec<Node>) -> Node {
        Node::sequence(children)
    }

    fn children(node: Node) -> Vec<Node> {
        match node {
            Node::Sequence { children } => children,
            other => panic!("expected sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_literal() {
        assert_eq!(parse("hello world").unwrap(), seq(vec![lit("hello world")]));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse("").unwrap(), seq(vec![]));
    }

    #[test]
    fn test_parse_escaped_meta_in_literal() {
        assert_eq!(parse(r"\{\}").unwrap(), seq(vec![lit("{}")]));
        assert_eq!(parse(r"a\|b").unwrap(), seq(vec![lit("a|b")]));
    }

    #[test]
    fn test_parse_character_set_default_count() {
        let nodes = children(parse("[abc]").unwrap());
        assert_eq!(
            nodes,
            vec![Node::character_set(vec!['a', 'b', 'c'], Repeat::Exactly(1))]
        );
    }

    #[test]
    fn test_parse_character_set_range_and_codes() {
        let nodes = children(parse(r"[a-c\d]{2:5}").unwrap());
        match &nodes[0] {
            Node::CharacterSet { chars, repeat } => {
                assert_eq!(chars.len(), 13);
                assert_eq!(*repeat, Repeat::Between(2, 5));
            }
            other => panic!("expected character set, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_repeated_code_biases() {
        let nodes = children(parse(r"[\d\d]").unwrap());
        match &nodes[0] {
            Node::CharacterSet { chars, .. } => assert_eq!(chars.len(), 20),
            other => panic!("expected character set, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_escaped_backslash_in_class() {
        let nodes = children(parse(r"[\\]").unwrap());
        assert_eq!(
            nodes,
            vec![Node::character_set(vec!['\\'], Repeat::Exactly(1))]
        );
    }

    #[test]
    fn test_parse_quantifier_forms() {
        let repeat_of = |pattern: &str| match &children(parse(pattern).unwrap())[0] {
            Node::CharacterSet { repeat, .. } => *repeat,
            other => panic!("expected character set, got {:?}", other),
        };
        assert_eq!(repeat_of("[a]{8}"), Repeat::Exactly(8));
        assert_eq!(repeat_of("[a]{0:8}"), Repeat::Between(0, 8));
        assert_eq!(repeat_of("[a]{6-10}"), Repeat::Between(6, 10));
        assert_eq!(repeat_of("[a]{:6}"), Repeat::Between(0, 6));
        assert_eq!(repeat_of("[a]{-6}"), Repeat::Between(0, 6));
    }

    #[test]
    fn test_parse_alternation_run() {
        let nodes = children(parse("(a|b|c)").unwrap());
        let inner = children(nodes[0].clone());
        assert_eq!(
            inner,
            vec![Node::Alternation {
                operands: vec![lit("a"), lit("b"), lit("c")]
            }]
        );
    }

    #[test]
    fn test_parse_operator_switch_groups_left_run() {
        let nodes = children(parse("a|b&c").unwrap());
        assert_eq!(
            nodes,
            vec![Node::Permutation {
                operands: vec![
                    Node::Alternation {
                        operands: vec![lit("a"), lit("b")]
                    },
                    lit("c"),
                ]
            }]
        );
    }

    #[test]
    fn test_parse_operator_binds_adjacent_nodes() {
        let nodes = children(parse(r"[\d]{8}xxx&yyy").unwrap());
        assert_eq!(nodes.len(), 2);
        assert!(matches!(nodes[0], Node::CharacterSet { .. }));
        assert_eq!(
            nodes[1],
            Node::Permutation {
                operands: vec![lit("xxx"), lit("yyy")]
            }
        );
    }

    #[test]
    fn test_parse_run_ends_at_next_item() {
        let nodes = children(parse("a|b[x]").unwrap());
        assert_eq!(nodes.len(), 2);
        assert!(matches!(nodes[0], Node::Alternation { .. }));
        assert!(matches!(nodes[1], Node::CharacterSet { .. }));
    }

    #[test]
    fn test_parse_source() {
        let nodes = children(parse("id-${names}").unwrap());
        assert_eq!(
            nodes,
            vec![
                lit("id-"),
                Node::ExternalSource {
                    name: "names".to_string()
                }
            ]
        );
    }

    #[test]
    fn test_parse_nested_groups() {
        let nodes = children(parse("((a))").unwrap());
        assert_eq!(nodes, vec![seq(vec![seq(vec![lit("a")])])]);
    }

    #[test]
    fn test_syntax_errors() {
        for pattern in [
            "[a-z]{a}",
            "[a-]",
            "[[1-9]",
            "((foo)(bar)))",
            "foo&",
            "|foo",
            r"[\w]{10:}",
            "(abc",
            "[abc",
            "[a]{3",
            "[]",
            "a||b",
            "${}",
            "${1abc}",
            "${name",
            "$",
            "{",
            "abc\\",
            "[a]{5:2}",
            "[a]{1:2:3}",
        ] {
            let err = parse(pattern).unwrap_err();
            assert!(err.is_syntax(), "{} should be a syntax error", pattern);
        }
    }

    #[test]
    fn test_range_span_limit() {
        let config = ParserConfig::new().with_max_range_span(10);
        assert!(parse_with_config("[a-k]", config).is_ok());
        assert!(parse_with_config("[a-l]", config).unwrap_err().is_syntax());
    }

    #[test]
    fn test_repeat_limit() {
        let config = ParserConfig::new().with_max_repeat(50);
        assert!(parse_with_config("[a]{50}", config).is_ok());
        assert!(parse_with_config("[a]{0:51}", config).unwrap_err().is_syntax());
        assert!(parse("[a]{18446744073709551615}").unwrap_err().is_syntax());
    }

    #[test]
    fn test_depth_limit() {
        let config = ParserConfig::new().with_max_depth(2);
        assert!(parse_with_config("((a))", config).is_ok());
        assert!(parse_with_config("(((a)))", config).unwrap_err().is_syntax());
    }

    #[test]
    fn test_error_position() {
        let err = parse("abc)").unwrap_err();
        let pos = err.position().unwrap();
        assert_eq!(pos.column, 4);
    }
}
