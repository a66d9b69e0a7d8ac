//! Common utilities and data structures for UPL.
//!
//! This crate provides foundational types used across the UPL front-end:
//! - `Span`: Source code location tracking
//! - `Limits`: The tunable capacity limits shared by the lexer and parser

mod limits;
mod span;

pub use limits::Limits;
pub use span::{BytePos, Span};
