//! Diagnostic types and builders.

use crate::ErrorCode;
use upl_common::Span;

/// Kind of diagnostic for categorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Lexer,
    Parser,
    Semantic,
}

/// A line-tagged diagnostic message.
///
/// Only `line` and `message` take part in deduplication and in the
/// plain-text report; `span` and `code` feed the rich renderer.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub code: Option<ErrorCode>,
    pub line: u32,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, line: u32, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: None,
            line,
            message: message.into(),
            span,
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }
}
