//! AST and syntax definitions for UPL.
//!
//! This crate defines the owned syntax tree produced by the parser and
//! the depth-indented dump used to present it.

mod ast;
mod expr;
mod printer;

pub use ast::*;
pub use expr::*;
pub use printer::TreePrinter;
