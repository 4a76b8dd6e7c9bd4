//! Integration tests for error reporting
//!
//! These tests cover the three error kinds, their positions and their
//! formatting.

use strgen::{Bindings, ErrorKind, GeneratorConfig, StringGenerator, TemplateError};

// ============================================================================
// Syntax Error Tests
// ============================================================================

#[test]
fn test_malformed_patterns_fail_construction() {
    let patterns = [
        "[a-z]{a}",
        "[a-]",
        "[[1-9]",
        "((foo)(bar)))",
        "foo&",
        "|foo",
        r"[\w]{10:}",
    ];
    for pattern in patterns {
        let err = StringGenerator::new(pattern).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax, "pattern {:?}", pattern);
    }
}

#[test]
fn test_syntax_error_position() {
    let err = StringGenerator::new("[a-z]{a}").unwrap_err();
    let position = err.position().expect("syntax errors carry a position");
    assert_eq!(position.offset, 6);
    assert_eq!(position.line, 1);
    assert_eq!(position.column, 7);
}

#[test]
fn test_syntax_error_display() {
    let err = StringGenerator::new("((foo)(bar)))").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Syntax error at line 1, column 13: extra closing parenthesis"
    );
}

#[test]
fn test_format_with_source_points_at_column() {
    let pattern = "abc[x";
    let err = StringGenerator::new(pattern).unwrap_err();
    let formatted = err.format_with_source(pattern);
    let lines: Vec<&str> = formatted.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], pattern);
    assert_eq!(lines[2], "     ^");
}

#[test]
fn test_multiline_pattern_position() {
    let err = StringGenerator::new("line one\nline [two").unwrap_err();
    let position = err.position().unwrap();
    assert_eq!(position.line, 2);
}

// ============================================================================
// Uniqueness Error Tests
// ============================================================================

#[test]
fn test_uniqueness_error_kind() {
    let mut generator = StringGenerator::new("[123]").unwrap();
    let err = generator
        .render_list(100, true, None, &Bindings::new())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Uniqueness);
    assert!(err.position().is_none());
    assert!(err.to_string().starts_with("Couldn't satisfy uniqueness"));
}

#[test]
fn test_uniqueness_budget_follows_factor() {
    let config = GeneratorConfig::new()
        .with_seed(11)
        .with_unique_attempts_factor(3);
    let mut generator = StringGenerator::with_config("[ab]", config).unwrap();
    match generator.render_list(10, true, None, &Bindings::new()) {
        Err(TemplateError::Uniqueness { attempts, .. }) => assert_eq!(attempts, 30),
        other => panic!("expected uniqueness error, got {:?}", other),
    }
}

// ============================================================================
// Capability Error Tests
// ============================================================================

#[test]
fn test_count_with_source_is_capability_error() {
    let mut generator = StringGenerator::new("id-${names}").unwrap();
    let err = generator.count().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Capability);
    assert!(err.to_string().starts_with("Unsupported operation"));
}

#[test]
fn test_count_nested_permutation_is_capability_error() {
    let mut generator = StringGenerator::new("(a|b)&c").unwrap();
    assert!(generator.count().unwrap_err().is_capability());
}

#[test]
fn test_count_overflow_is_capability_error() {
    let mut generator = StringGenerator::new(r"[\r]{100}").unwrap();
    assert!(generator.count().unwrap_err().is_capability());
}

#[test]
fn test_error_kind_display() {
    assert_eq!(ErrorKind::Syntax.to_string(), "syntax");
    assert_eq!(ErrorKind::Uniqueness.to_string(), "uniqueness");
    assert_eq!(ErrorKind::Capability.to_string(), "capability");
}
