//! Integration tests for upl-lexer crate.

use upl_common::Limits;
use upl_lexer::{Lexer, TokenKind, is_valid_identifier};

fn lex(source: &str) -> Vec<TokenKind> {
    let lexer = Lexer::new(source, Limits::default());
    let (tokens, _) = lexer.tokenize();
    tokens.kinds()
}

fn lex_with_errors(source: &str) -> (Vec<TokenKind>, Vec<(u32, String)>) {
    let lexer = Lexer::new(source, Limits::default());
    let (tokens, diagnostics) = lexer.tokenize();
    let errors = diagnostics
        .iter()
        .map(|d| (d.line, d.message.clone()))
        .collect();
    (tokens.kinds(), errors)
}

// ============================================================================
// Basic Token Tests
// ============================================================================

#[test]
fn test_keywords() {
    assert_eq!(
        lex("begin end if then else do while for print int bool true false"),
        vec![
            TokenKind::Begin,
            TokenKind::End,
            TokenKind::If,
            TokenKind::Then,
            TokenKind::Else,
            TokenKind::Do,
            TokenKind::While,
            TokenKind::For,
            TokenKind::Print,
            TokenKind::Int,
            TokenKind::Bool,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_keywords_are_case_sensitive() {
    assert_eq!(lex("Begin END"), vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]);
}

#[test]
fn test_operators() {
    assert_eq!(
        lex("== = >= > + * ( ) { } ;"),
        vec![
            TokenKind::EqEq,
            TokenKind::Eq,
            TokenKind::GtEq,
            TokenKind::Gt,
            TokenKind::Plus,
            TokenKind::Star,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_operators_without_spaces() {
    assert_eq!(
        lex("x==y>=1"),
        vec![
            TokenKind::Ident,
            TokenKind::EqEq,
            TokenKind::Ident,
            TokenKind::GtEq,
            TokenKind::Num,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_number_then_identifier() {
    let (tokens, _) = Lexer::new("123abc", Limits::default()).tokenize();
    let pairs: Vec<_> = tokens.iter().map(|t| (t.kind, t.lexeme.as_str())).collect();
    assert_eq!(
        pairs,
        vec![
            (TokenKind::Num, "123"),
            (TokenKind::Ident, "abc"),
            (TokenKind::Eof, ""),
        ]
    );
}

// ============================================================================
// Error Tests
// ============================================================================

#[test]
fn test_less_than_is_unsupported() {
    let (kinds, errors) = lex_with_errors("a < b");
    assert_eq!(
        kinds,
        vec![TokenKind::Ident, TokenKind::Error, TokenKind::Ident, TokenKind::Eof]
    );
    assert_eq!(errors, vec![(1, "Unsupported operator: <".to_string())]);
}

#[test]
fn test_underscore_is_unsupported() {
    let (kinds, errors) = lex_with_errors("a_b");
    assert_eq!(
        kinds,
        vec![TokenKind::Ident, TokenKind::Error, TokenKind::Ident, TokenKind::Eof]
    );
    assert_eq!(errors, vec![(1, "Unsupported operator: _".to_string())]);
}

#[test]
fn test_invalid_identifier() {
    let (kinds, errors) = lex_with_errors("\nx1y");
    assert_eq!(kinds, vec![TokenKind::Error, TokenKind::Eof]);
    assert_eq!(errors, vec![(2, "Invalid identifier: x1y".to_string())]);
}

#[test]
fn test_second_error_on_line_is_suppressed() {
    let (kinds, errors) = lex_with_errors("a1b < c2d\n<");
    assert_eq!(kinds.iter().filter(|k| **k == TokenKind::Error).count(), 4);
    assert_eq!(
        errors,
        vec![
            (1, "Invalid identifier: a1b".to_string()),
            (2, "Unsupported operator: <".to_string()),
        ]
    );
}

#[test]
fn test_unterminated_block_comment() {
    let (kinds, errors) = lex_with_errors("x /* never closed\n\n");
    assert_eq!(kinds, vec![TokenKind::Ident, TokenKind::Eof]);
    assert_eq!(errors, vec![(3, "Unterminated block comment".to_string())]);
}

#[test]
fn test_block_comment_counts_lines() {
    let (tokens, _) = Lexer::new("/* a\nb\n*/ x", Limits::default()).tokenize();
    assert_eq!(tokens.get(0).map(|t| t.line), Some(3));
}

#[test]
fn test_line_comment_skipped() {
    assert_eq!(
        lex("x // begin end\ny"),
        vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]
    );
}

// ============================================================================
// Limits
// ============================================================================

#[test]
fn test_keyword_matched_after_truncation() {
    let limits = Limits::new().max_lexeme_len(6);
    let (tokens, diagnostics) = Lexer::new("beginx", limits).tokenize();
    assert_eq!(tokens.kinds(), vec![TokenKind::Begin, TokenKind::Eof]);
    assert_eq!(tokens.get(0).map(|t| t.lexeme.as_str()), Some("begin"));
    assert!(diagnostics.is_empty());
}

#[test]
fn test_diagnostic_capacity() {
    let limits = Limits::new().max_diagnostics(1);
    let (_, diagnostics) = Lexer::new("<\n<\n<", limits).tokenize();
    assert_eq!(diagnostics.len(), 1);
}

// ============================================================================
// Properties
// ============================================================================

/// Every string over `alphabet` with length in `1..=max_len`.
fn strings(alphabet: &[char], max_len: usize) -> Vec<String> {
    let mut all = Vec::new();
    let mut current = vec![String::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for prefix in &current {
            for &ch in alphabet {
                let mut s = prefix.clone();
                s.push(ch);
                next.push(s);
            }
        }
        all.extend(next.iter().cloned());
        current = next;
    }
    all
}

#[test]
fn test_stream_ends_with_single_eof() {
    for source in strings(&['a', '1', '/', '*', '\n', ' ', '<', '='], 4) {
        let (tokens, _) = Lexer::new(&source, Limits::default()).tokenize();
        let kinds = tokens.kinds();
        assert_eq!(kinds.last(), Some(&TokenKind::Eof), "source {:?}", source);
        let eofs = kinds.iter().filter(|k| **k == TokenKind::Eof).count();
        assert_eq!(eofs, 1, "source {:?}", source);

        let lines = 1 + source.matches('\n').count() as u32;
        assert_eq!(tokens.eof_line(), lines, "source {:?}", source);
    }
}

#[test]
fn test_identifier_classification() {
    for source in strings(&['a', 'b', '1', '2'], 5) {
        if !source.starts_with(|c: char| c.is_ascii_alphabetic()) {
            continue;
        }
        let letters_then_digits = source
            .trim_end_matches(|c: char| c.is_ascii_digit())
            .chars()
            .all(|c| c.is_ascii_alphabetic());
        assert_eq!(is_valid_identifier(&source), letters_then_digits);

        let (kinds, errors) = lex_with_errors(&source);
        let expected = if letters_then_digits {
            TokenKind::Ident
        } else {
            TokenKind::Error
        };
        assert_eq!(kinds, vec![expected, TokenKind::Eof], "source {:?}", source);
        assert_eq!(errors.is_empty(), letters_then_digits, "source {:?}", source);
    }
}
