//! Parser for UPL.
//!
//! This crate provides a recursive descent parser that converts tokens into
//! an abstract syntax tree, checking declarations against a flat symbol
//! table as it goes.
//!
//! ## Error Recovery
//!
//! After a local failure the parser discards the rest of the current
//! physical line and continues, so several errors can be reported in a
//! single pass. Reports landing on the line of the previous report are
//! suppressed.

mod parser;
mod recovery;
mod symbols;

pub use parser::{PResult, Parser, Recovered};
pub use recovery::{BLOCK_ENDS, is_block_end, is_in_set, skip_line};
pub use symbols::{Symbol, SymbolError, SymbolTable};

use upl_common::Limits;
use upl_diagnostic::{Diagnostics, report_lines};
use upl_lexer::{Lexer, TokenStream};
use upl_syntax::Program;

/// Everything produced by one run over a source text.
#[derive(Debug)]
pub struct ParseOutcome {
    /// The tree, present only when the source has correct syntax.
    pub program: Option<Program>,
    pub diagnostics: Diagnostics,
    pub symbols: SymbolTable,
    pub tokens: TokenStream,
}

impl ParseOutcome {
    pub fn is_success(&self) -> bool {
        self.program.is_some()
    }

    /// The verdict line followed by the tree dump or the error lines.
    pub fn render(&self) -> String {
        let mut out = String::new();
        match &self.program {
            Some(program) => {
                out.push_str("- source code has correct syntax: yes\n");
                out.push_str(&program.to_string());
            }
            None => {
                out.push_str("- source code has correct syntax: no\n");
                for line in report_lines(&self.diagnostics) {
                    out.push_str(&line);
                    out.push('\n');
                }
            }
        }
        out
    }
}

/// Parse source code into an AST.
pub fn parse(source: &str, limits: &Limits) -> ParseOutcome {
    let lexer = Lexer::new(source, *limits);
    let (tokens, diagnostics) = lexer.tokenize();

    let mut parser = Parser::new(tokens, diagnostics, *limits);
    let program = parser.parse_file();
    let (tokens, diagnostics, symbols) = parser.finish();

    ParseOutcome {
        program,
        diagnostics,
        symbols,
        tokens,
    }
}
