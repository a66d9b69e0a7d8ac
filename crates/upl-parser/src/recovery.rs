//! Error recovery for the parser.
//!
//! Recovery is line-granular: after a local failure the parser discards
//! every remaining token on the current physical line and resumes with the
//! first token of the next line. It never searches for a balancing
//! delimiter or a statement keyword.

use upl_lexer::{TokenKind, TokenStream};

/// Tokens that close a statement list.
pub const BLOCK_ENDS: &[TokenKind] = &[TokenKind::End, TokenKind::RBrace, TokenKind::Eof];

/// Check if a token kind is in a set.
pub fn is_in_set(kind: TokenKind, set: &[TokenKind]) -> bool {
    set.contains(&kind)
}

/// Check if a token closes a statement list.
pub fn is_block_end(kind: TokenKind) -> bool {
    is_in_set(kind, BLOCK_ENDS)
}

/// Index of the first token after `pos` that lies on a different line than
/// the token at `pos`. Returns `tokens.len()` when the rest of the stream,
/// including `Eof`, shares that line.
pub fn skip_line(tokens: &TokenStream, pos: usize) -> usize {
    let Some(line) = tokens.get(pos).map(|t| t.line) else {
        return pos;
    };

    let mut next = pos;
    while tokens.get(next).is_some_and(|t| t.line == line) {
        next += 1;
    }
    next
}
