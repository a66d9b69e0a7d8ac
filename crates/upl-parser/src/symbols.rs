//! The flat symbol table.
//!
//! One global scope for the whole program: no nesting, no shadowing and no
//! removal. A name is declared at most once.

use std::collections::HashMap;

use thiserror::Error;
use upl_syntax::TypeName;

/// A declared variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub ty: TypeName,
    pub line: u32,
}

/// Why a declaration was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("Too many variables declared")]
    TooMany,

    #[error("Variable {0} already declared")]
    AlreadyDeclared(String),
}

/// Declared names with their type and declaration line.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    by_name: HashMap<String, usize>,
    capacity: usize,
}

impl SymbolTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            symbols: Vec::new(),
            by_name: HashMap::new(),
            capacity,
        }
    }

    /// Insert `name` if absent. A full table refuses before the duplicate
    /// check runs; a refused insert leaves the table unchanged.
    pub fn declare(&mut self, name: &str, ty: TypeName, line: u32) -> Result<(), SymbolError> {
        if self.symbols.len() >= self.capacity {
            return Err(SymbolError::TooMany);
        }
        if self.by_name.contains_key(name) {
            return Err(SymbolError::AlreadyDeclared(name.to_string()));
        }

        log::debug!("declared {} {} at line {}", ty.as_str(), name, line);
        self.by_name.insert(name.to_string(), self.symbols.len());
        self.symbols.push(Symbol {
            name: name.to_string(),
            ty,
            line,
        });
        Ok(())
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.by_name.get(name).map(|&i| &self.symbols[i])
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }
}
