//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from strgen.
//! Importing this module with a wildcard import brings them into scope:
//!
//! ```
//! use strgen::prelude::*;
//!
//! let mut generator = StringGenerator::new("(yes|no)").unwrap();
//! assert!(["yes", "no"].contains(&generator.render().as_str()));
//! ```
//!
//! # Re-exported Items
//!
//! ## Core Types
//! - [`StringGenerator`] - Parsed template and its randomness
//! - [`GeneratorConfig`] - Generator configuration
//! - [`ParserConfig`] - Parser limits
//! - [`Node`] - Render tree node
//!
//! ## External Sources
//! - [`Bindings`] - Values for `${name}` references
//! - [`SourceValue`] - One bound value
//!
//! ## Randomness
//! - [`Randomness`] - Provider trait
//!
//! ## Error Handling
//! - [`TemplateError`] - Error type
//! - [`ErrorKind`] - Error family

// ============================================================================
// Core Types
// ============================================================================

pub use crate::template::{GeneratorConfig, Node, ParserConfig, StringGenerator};

// ============================================================================
// External Sources
// ============================================================================

pub use crate::template::{Bindings, SourceValue};

// ============================================================================
// Randomness
// ============================================================================

pub use crate::template::Randomness;

// ============================================================================
// Error Handling
// ============================================================================

pub use crate::template::{ErrorKind, TemplateError};
