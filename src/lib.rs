//! strgen - Random strings from compact templates
//!
//! A template describes how to build a string: literal text, character
//! classes with repetition counts, alternation and permutation. The
//! template is parsed once into a render tree which can then be rendered
//! any number of times. It provides:
//! - A hand-written recursive-descent parser with positioned syntax errors
//! - Character classes with ranges and named class codes (`\d`, `\w`, ...)
//! - Alternation (`|`) and character-level permutation (`&`)
//! - `${name}` references filled from caller-supplied bindings
//! - Batch rendering with bounded uniqueness retries
//! - Outcome counting
//! - Seeded, reproducible rendering or OS-backed randomness
//!
//! ## Quick Start
//!
//! ```rust
//! use strgen::StringGenerator;
//!
//! let mut generator = StringGenerator::new(r"[\w]{8:12}").unwrap();
//! let password = generator.render();
//! let len = password.chars().count();
//! assert!((8..=12).contains(&len));
//! ```
//!
//! ## Template Syntax
//!
//! | Syntax | Meaning |
//! |--------|---------|
//! | `abc` | literal text |
//! | `[a-z0-9_]` | one character from the class |
//! | `[\d]{8}` | exactly eight digits |
//! | `[\l]{4:8}` | four to eight letters (`{4-8}` is equivalent) |
//! | `(a\|b)` | `a` or `b` |
//! | `[\d]{3}&[\u]{2}` | three digits and two uppercase letters, shuffled together |
//! | `${name}` | value taken from the bindings |
//! | `\[` | escaped meta character |
//!
//! Class codes: `\d` digits, `\w` word characters, `\W` non-word
//! characters, `\s` whitespace, `\p` punctuation, `\l` letters, `\u` or
//! `\U` uppercase, `\c` lowercase, `\o` octal digits, `\h` hex digits,
//! `\r` printable characters.
//!
//! ## Batches
//!
//! ```rust
//! use strgen::{Bindings, GeneratorConfig, StringGenerator};
//!
//! let config = GeneratorConfig::new().with_seed(7);
//! let mut generator = StringGenerator::with_config(r"[\h]{8}", config).unwrap();
//! let ids = generator
//!     .render_list(20, true, None, &Bindings::new())
//!     .unwrap();
//! assert_eq!(ids.len(), 20);
//! ```
//!
//! ## Feature Flags
//!
//! - `logging` - Enable debug logging using the `log` crate

// Lint configuration for production quality
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
#![allow(clippy::new_without_default)]
#![allow(clippy::module_inception)]

// Prelude module for convenient imports
pub mod prelude;

pub mod template;

/// Re-export commonly used types for convenience
pub use template::{
    // Debug tools
    debug::TreePrinter,
    // Randomness
    random::{seeded, strong, Randomness},
    Bindings,
    ErrorKind,
    GeneratorConfig,
    Node,
    ParserConfig,
    Repeat,
    Result,
    SourcePosition,
    SourceValue,
    StringGenerator,
    TemplateError,
};
