//! Template engine
//!
//! Parses patterns into render trees and renders them into random strings.
//!
//! # Module Organization
//!
//! ## Parsing
//! - [`cursor`] - Code point cursor and source positions
//! - [`char_class`] - Class codes and character ranges
//! - [`parser`] - Recursive-descent pattern parser
//! - [`regex_cache`] - Cached identifier validation
//!
//! ## Rendering
//! - [`node`] - Render tree, rendering and outcome counting
//! - [`random`] - Randomness providers
//! - [`source`] - Bindings for `${name}` references
//!
//! ## Facade
//! - [`generator`] - [`StringGenerator`] and [`GeneratorConfig`]
//!
//! ## Error Handling and Debugging
//! - [`error`] - Error types
//! - [`debug`] - Tree pretty printer

// ============================================================================
// Logging
// ============================================================================

/// Logging macros - no-ops unless the logging feature is enabled
#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

/// Logging macros - use log crate when logging feature is enabled
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(feature = "logging")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

// ============================================================================
// Module Declarations
// ============================================================================

pub mod char_class;
pub mod cursor;
pub mod debug;
pub mod error;
pub mod generator;
pub mod node;
pub mod parser;
pub mod random;
pub mod regex_cache;
pub mod source;

// ============================================================================
// Re-exports
// ============================================================================

pub use char_class::ClassCode;
pub use cursor::{Cursor, SourcePosition};
pub use debug::TreePrinter;
pub use error::{ErrorKind, Result, TemplateError};
pub use generator::{GeneratorConfig, StringGenerator};
pub use node::{Node, Operator, Repeat};
pub use parser::{parse, parse_with_config, ParserConfig, TemplateParser};
pub use random::Randomness;
pub use source::{Bindings, SourceValue};
