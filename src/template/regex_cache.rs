//! Thread-local identifier regex
//!
//! The `${name}` identifier regex is compiled once per thread so the parser
//! can validate every source reference without recompiling.

use regex::Regex;

/// A valid `${name}` identifier: a letter or underscore, then letters,
/// digits or underscores
pub const IDENTIFIER_PATTERN: &str = r"^[\p{L}_][\p{L}\p{Nd}_]*$";

thread_local! {
    static IDENTIFIER_REGEX: Option<Regex> = Regex::new(IDENTIFIER_PATTERN).ok();
}

/// Check that `name` can be used in a `${name}` reference
#[inline]
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER_REGEX.with(|re| re.as_ref().map(|re| re.is_match(name)).unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_pattern_compiles() {
        assert!(Regex::new(IDENTIFIER_PATTERN).is_ok());
    }

    #[test]
    fn test_identifiers() {
        assert!(is_identifier("countries"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("name_2"));
        assert!(is_identifier("państwa"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2names"));
        assert!(!is_identifier("first-name"));
        assert!(!is_identifier("a b"));
    }
}
