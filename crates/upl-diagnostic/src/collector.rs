//! The capacity-bounded diagnostic collector.

use std::collections::HashSet;

use crate::Diagnostic;

/// An ordered, capacity-bounded list of diagnostics.
///
/// A report is dropped when the collector is full, when it lands on the
/// same line as the most recently accepted diagnostic, or when the exact
/// `(line, message)` pair is already present.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    capacity: usize,
    last_line: Option<u32>,
}

impl Diagnostics {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
            last_line: None,
        }
    }

    /// Record a diagnostic. Returns whether it was accepted.
    pub fn report(&mut self, diagnostic: Diagnostic) -> bool {
        if self.entries.len() >= self.capacity {
            log::debug!("diagnostic dropped, collector full: {}", diagnostic.message);
            return false;
        }
        if self.last_line == Some(diagnostic.line) {
            log::debug!(
                "diagnostic suppressed on line {}: {}",
                diagnostic.line,
                diagnostic.message
            );
            return false;
        }
        if self
            .entries
            .iter()
            .any(|d| d.line == diagnostic.line && d.message == diagnostic.message)
        {
            return false;
        }

        self.last_line = Some(diagnostic.line);
        self.entries.push(diagnostic);
        true
    }

    /// Line of the most recently accepted diagnostic, unless reset since.
    pub fn last_line(&self) -> Option<u32> {
        self.last_line
    }

    /// Whether a report on `line` would be swallowed as a cascade.
    pub fn is_cascade(&self, line: u32) -> bool {
        self.last_line == Some(line)
    }

    /// Forget the most recent line so the next report opens a new cascade window.
    pub fn reset_cascade(&mut self) {
        self.last_line = None;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// The first diagnostic of every distinct line, in collector order.
    pub fn first_per_line(&self) -> Vec<&Diagnostic> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|d| seen.insert(d.line))
            .collect()
    }
}
