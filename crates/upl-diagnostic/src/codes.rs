//! Error codes for UPL diagnostics.

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Lexer errors (E0001 - E0099)
    UnsupportedOperator,
    InvalidIdentifier,
    UnterminatedComment,

    // Parser errors (E0100 - E0199)
    UnexpectedToken,
    ExpectedExpression,
    TooManyStatements,
    NestingTooDeep,

    // Semantic errors (E0200 - E0299)
    UndeclaredVariable,
    DuplicateDeclaration,
    TooManySymbols,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::UnsupportedOperator => "E0001",
            ErrorCode::InvalidIdentifier => "E0002",
            ErrorCode::UnterminatedComment => "E0003",

            // Parser
            ErrorCode::UnexpectedToken => "E0100",
            ErrorCode::ExpectedExpression => "E0101",
            ErrorCode::TooManyStatements => "E0102",
            ErrorCode::NestingTooDeep => "E0103",

            // Semantic
            ErrorCode::UndeclaredVariable => "E0200",
            ErrorCode::DuplicateDeclaration => "E0201",
            ErrorCode::TooManySymbols => "E0202",
        }
    }

    /// Get a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::UnsupportedOperator => "character is not an operator of the language",
            ErrorCode::InvalidIdentifier => "identifier mixes letters after digits",
            ErrorCode::UnterminatedComment => "block comment is not terminated",
            ErrorCode::UnexpectedToken => "unexpected token",
            ErrorCode::ExpectedExpression => "expected an expression",
            ErrorCode::TooManyStatements => "block holds too many statements",
            ErrorCode::NestingTooDeep => "blocks and parentheses nest too deeply",
            ErrorCode::UndeclaredVariable => "variable used before its declaration",
            ErrorCode::DuplicateDeclaration => "variable declared more than once",
            ErrorCode::TooManySymbols => "symbol table is full",
        }
    }

    /// Get a suggested fix for the error, if available.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ErrorCode::UnterminatedComment => Some("add `*/` to close the comment"),
            ErrorCode::InvalidIdentifier => {
                Some("identifiers are letters optionally followed by trailing digits")
            }
            ErrorCode::UnsupportedOperator => {
                Some("supported operators are `+ * = == > >=` and `( ) { } ;`")
            }
            ErrorCode::UndeclaredVariable => Some("declare the variable with `int` or `bool` first"),
            ErrorCode::DuplicateDeclaration => Some("assign to the existing variable instead"),
            ErrorCode::NestingTooDeep => Some("split the expression with temporary variables"),
            _ => None,
        }
    }
}
