//! Error reporting for template parsing and rendering
//!
//! Three kinds of failure reach callers:
//!
//! - **Syntax** errors are raised while a pattern is parsed. Parsing happens
//!   eagerly when a generator is built, so a bad pattern never yields a
//!   generator.
//! - **Uniqueness** errors are raised by [`render_list`] when the attempt
//!   budget runs out before enough distinct strings were collected.
//! - **Capability** errors signal an operation the tree cannot support, such
//!   as counting outcomes of an external source.
//!
//! # Example Output
//!
//! ```text
//! Syntax error at line 1, column 7: non-digit in quantifier: 'a'
//! [a-z]{a}
//!       ^
//! ```
//!
//! [`render_list`]: crate::StringGenerator::render_list

use super::cursor::SourcePosition;
use std::fmt;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Distinguishes the three error families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed pattern
    Syntax,
    /// Batch generation could not collect enough distinct strings
    Uniqueness,
    /// Operation not supported by the render tree
    Capability,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Syntax => "syntax",
            ErrorKind::Uniqueness => "uniqueness",
            ErrorKind::Capability => "capability",
        };
        f.write_str(name)
    }
}

/// Error type for template operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The pattern is malformed
    Syntax {
        /// What went wrong
        message: String,
        /// Where in the pattern it went wrong
        position: SourcePosition,
    },

    /// The uniqueness attempt budget was exhausted
    Uniqueness {
        /// Number of distinct strings requested
        requested: usize,
        /// Number of distinct strings collected before giving up
        produced: usize,
        /// Number of render attempts made
        attempts: usize,
    },

    /// The render tree cannot perform the requested operation
    Capability {
        /// Description of the unsupported operation
        message: String,
    },
}

impl TemplateError {
    /// Create a syntax error at a position
    #[inline]
    pub fn syntax(message: impl Into<String>, position: SourcePosition) -> Self {
        TemplateError::Syntax {
            message: message.into(),
            position,
        }
    }

    /// Create a capability error
    #[inline]
    pub fn capability(message: impl Into<String>) -> Self {
        TemplateError::Capability {
            message: message.into(),
        }
    }

    /// Which family this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            TemplateError::Syntax { .. } => ErrorKind::Syntax,
            TemplateError::Uniqueness { .. } => ErrorKind::Uniqueness,
            TemplateError::Capability { .. } => ErrorKind::Capability,
        }
    }

    /// True for syntax errors
    pub fn is_syntax(&self) -> bool {
        self.kind() == ErrorKind::Syntax
    }

    /// True for uniqueness errors
    pub fn is_uniqueness(&self) -> bool {
        self.kind() == ErrorKind::Uniqueness
    }

    /// True for capability errors
    pub fn is_capability(&self) -> bool {
        self.kind() == ErrorKind::Capability
    }

    /// Position of a syntax error
    pub fn position(&self) -> Option<SourcePosition> {
        match self {
            TemplateError::Syntax { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Format the error together with the offending pattern line
    ///
    /// Syntax errors get the pattern line and a `^` under the failing
    /// column; other kinds are formatted like [`Display`](fmt::Display).
    pub fn format_with_source(&self, pattern: &str) -> String {
        let position = match self {
            TemplateError::Syntax { position, .. } => *position,
            _ => return self.to_string(),
        };

        let mut output = format!("{}\n", self);

        let line = pattern
            .lines()
            .nth(position.line.saturating_sub(1))
            .unwrap_or("");
        output.push_str(line);
        output.push('\n');

        for _ in 0..position.column.saturating_sub(1) {
            output.push(' ');
        }
        output.push_str("^\n");

        output
    }
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::Syntax { message, position } => {
                write!(f, "Syntax error at {}: {}", position, message)
            }
            TemplateError::Uniqueness {
                requested,
                produced,
                attempts,
            } => {
                write!(
                    f,
                    "Couldn't satisfy uniqueness: {} of {} distinct strings after {} attempts",
                    produced, requested, attempts
                )
            }
            TemplateError::Capability { message } => {
                write!(f, "Unsupported operation: {}", message)
            }
        }
    }
}

impl std::error::Error for TemplateError {}
