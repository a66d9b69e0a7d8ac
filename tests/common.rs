//! Integration tests for upl-common crate.

use upl_common::{BytePos, Limits, Span};

#[test]
fn test_span_merge() {
    let a = Span::from_usize(10, 20);
    let b = Span::from_usize(15, 30);
    let merged = a.merge(b);
    assert_eq!(merged.start.0, 10);
    assert_eq!(merged.end.0, 30);
}

#[test]
fn test_span_merge_is_symmetric() {
    let a = Span::from_usize(4, 6);
    let b = Span::from_usize(0, 2);
    assert_eq!(a.merge(b), b.merge(a));
    assert_eq!(a.merge(b).range(), 0..6);
}

#[test]
fn test_dummy_span_is_zero_width() {
    assert_eq!(Span::DUMMY.range(), 0..0);
    assert_eq!(Span::from_usize(5, 5).merge(Span::DUMMY).range(), 0..5);
}

#[test]
fn test_byte_pos_conversions() {
    let pos = BytePos::from(42usize);
    assert!(pos == BytePos(42));
    assert_eq!(usize::from(pos), 42);
}

#[test]
fn test_limits_builder() {
    let limits = Limits::new()
        .max_lexeme_len(8)
        .max_stmts_per_block(3)
        .max_diagnostics(2)
        .max_symbols(1)
        .initial_token_capacity(16);
    assert_eq!(limits.lexeme_keep(), 7);
    assert_eq!(limits.max_stmts_per_block, 3);
    assert_eq!(limits.max_diagnostics, 2);
    assert_eq!(limits.max_symbols, 1);
    assert_eq!(limits.initial_token_capacity, 16);
}

#[test]
fn test_limits_defaults() {
    let limits = Limits::default();
    assert_eq!(limits.max_lexeme_len, 100);
    assert_eq!(limits.max_stmts_per_block, 100);
    assert_eq!(limits.initial_token_capacity, 2000);
    assert_eq!(Limits::new(), limits);
}

#[test]
fn test_lexeme_keep_never_underflows() {
    assert_eq!(Limits::new().max_lexeme_len(0).lexeme_keep(), 0);
}
