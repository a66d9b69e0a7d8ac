//! Capacity limits for a single front-end run.
//! 单次前端运行的容量限制。

/// Tunable caps shared by the lexer, parser, symbol table and collector.
/// 词法分析器、语法分析器、符号表和诊断收集器共享的可调上限。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Lexeme buffer size; a lexeme keeps at most `max_lexeme_len - 1` characters.
    pub max_lexeme_len: usize,
    /// Maximum statements accepted in one block.
    pub max_stmts_per_block: usize,
    /// Maximum diagnostics recorded before further reports are dropped.
    pub max_diagnostics: usize,
    /// Maximum distinct names in the symbol table.
    pub max_symbols: usize,
    /// Maximum open blocks and parentheses at any point of the parse.
    pub max_nesting_depth: usize,
    /// Initial capacity of the token buffer.
    pub initial_token_capacity: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_lexeme_len: 100,
            max_stmts_per_block: 100,
            max_diagnostics: 100,
            max_symbols: 100,
            max_nesting_depth: 100,
            initial_token_capacity: 2000,
        }
    }
}

impl Limits {
    /// Create limits with the default caps.
    /// 使用默认值创建限制。
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_lexeme_len(mut self, len: usize) -> Self {
        self.max_lexeme_len = len;
        self
    }

    pub fn max_stmts_per_block(mut self, count: usize) -> Self {
        self.max_stmts_per_block = count;
        self
    }

    pub fn max_diagnostics(mut self, count: usize) -> Self {
        self.max_diagnostics = count;
        self
    }

    pub fn max_symbols(mut self, count: usize) -> Self {
        self.max_symbols = count;
        self
    }

    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    pub fn initial_token_capacity(mut self, capacity: usize) -> Self {
        self.initial_token_capacity = capacity;
        self
    }

    /// Number of characters a lexeme may keep after truncation.
    /// 截断后词素可保留的字符数。
    pub fn lexeme_keep(&self) -> usize {
        self.max_lexeme_len.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let limits = Limits::default();
        assert_eq!(limits.max_diagnostics, 100);
        assert_eq!(limits.max_symbols, 100);
        assert_eq!(limits.max_nesting_depth, 100);
        assert_eq!(limits.lexeme_keep(), 99);
    }

    #[test]
    fn test_builder() {
        let limits = Limits::new().max_symbols(3).max_stmts_per_block(2);
        assert_eq!(limits.max_symbols, 3);
        assert_eq!(limits.max_stmts_per_block, 2);
        assert_eq!(limits.max_lexeme_len, 100);
    }
}
