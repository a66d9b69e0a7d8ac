//! Token definitions for UPL.

use std::fmt;

use upl_common::Span;

/// A token with its kind, lexeme and source line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: u32,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            span,
        }
    }
}

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Begin,
    End,
    If,
    Then,
    Else,
    Do,
    While,
    For,
    Print,
    Int,
    Bool,
    True,
    False,

    // Literals and names
    Ident,
    Num,

    // Operators
    EqEq,  // ==
    Gt,    // >
    GtEq,  // >=
    Plus,  // +
    Star,  // *
    Eq,    // =

    // Delimiters
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    Semicolon, // ;

    // Special
    Eof,
    Error,
}

impl TokenKind {
    /// Returns the keyword for an identifier, if any.
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        match s {
            "begin" => Some(TokenKind::Begin),
            "end" => Some(TokenKind::End),
            "if" => Some(TokenKind::If),
            "then" => Some(TokenKind::Then),
            "else" => Some(TokenKind::Else),
            "do" => Some(TokenKind::Do),
            "while" => Some(TokenKind::While),
            "for" => Some(TokenKind::For),
            "print" => Some(TokenKind::Print),
            "int" => Some(TokenKind::Int),
            "bool" => Some(TokenKind::Bool),
            "true" => Some(TokenKind::True),
            "false" => Some(TokenKind::False),
            _ => None,
        }
    }

    /// Short upper-case name used by the token dump.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Begin => "BEGIN",
            TokenKind::End => "END",
            TokenKind::If => "IF",
            TokenKind::Then => "THEN",
            TokenKind::Else => "ELSE",
            TokenKind::Do => "DO",
            TokenKind::While => "WHILE",
            TokenKind::For => "FOR",
            TokenKind::Print => "PRINT",
            TokenKind::Int => "INT",
            TokenKind::Bool => "BOOL",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Ident => "ID",
            TokenKind::Num => "NUM",
            TokenKind::EqEq => "EQ",
            TokenKind::Gt => "GT",
            TokenKind::GtEq => "GTE",
            TokenKind::Plus => "PLUS",
            TokenKind::Star => "MUL",
            TokenKind::Eq => "ASSIGN",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Eof => "EOF",
            TokenKind::Error => "ERROR",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An append-only token sequence terminated by exactly one `Eof` token.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tokens: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }

    /// Line of the terminating `Eof` token.
    pub fn eof_line(&self) -> u32 {
        self.tokens.last().map_or(1, |t| t.line)
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
