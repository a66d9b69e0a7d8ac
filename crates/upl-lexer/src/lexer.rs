//! The UPL lexer.
//! UPL 词法分析器。

use crate::token::{Token, TokenKind, TokenStream};
use upl_common::{Limits, Span};
use upl_diagnostic::{Diagnostic, DiagnosticKind, Diagnostics, ErrorCode};

/// The UPL lexer.
/// UPL 词法分析器。
///
/// Converts source code into a sequence of tokens, recording lexical
/// diagnostics as it goes.
/// 将源代码转换为 token 序列，并同时记录词法诊断。
pub struct Lexer<'src> {
    source: &'src str,
    /// Character iterator with position info
    /// 带位置信息的字符迭代器
    chars: std::iter::Peekable<std::str::CharIndices<'src>>,
    /// Current byte position in source
    /// 当前在源码中的字节位置
    pos: usize,
    /// Current physical line, starting at 1
    /// 当前物理行号，从 1 开始
    line: u32,
    limits: Limits,
    /// Collected diagnostics, shared later with the parser
    /// 收集的诊断信息，之后与语法分析器共享
    diagnostics: Diagnostics,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source code.
    /// 为给定的源代码创建新的词法分析器。
    pub fn new(source: &'src str, limits: Limits) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            pos: 0,
            line: 1,
            limits,
            diagnostics: Diagnostics::new(limits.max_diagnostics),
        }
    }

    /// Tokenize the entire source and return tokens and diagnostics.
    /// 对整个源代码进行词法分析，返回 token 列表和诊断信息。
    pub fn tokenize(mut self) -> (TokenStream, Diagnostics) {
        let mut tokens = TokenStream::with_capacity(self.limits.initial_token_capacity);

        while let Some(token) = self.next_token() {
            log::trace!("token {} {:?} at line {}", token.kind, token.lexeme, token.line);
            tokens.push(token);
        }

        let end = Span::from_usize(self.pos, self.pos);
        tokens.push(Token::new(TokenKind::Eof, "", self.line, end));
        log::debug!("lexed {} tokens over {} lines", tokens.len(), self.line);

        (tokens, self.diagnostics)
    }

    /// Get the next token, or `None` at end of input.
    /// 获取下一个 token，输入结束时返回 `None`。
    fn next_token(&mut self) -> Option<Token> {
        loop {
            self.skip_whitespace();

            let start = self.pos;
            let (_, ch) = self.advance()?;

            let kind = match ch {
                // Single character tokens - 单字符 token
                '+' => TokenKind::Plus,
                '*' => TokenKind::Star,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                '{' => TokenKind::LBrace,
                '}' => TokenKind::RBrace,
                ';' => TokenKind::Semicolon,

                // Comment or lone slash - 注释或单独的斜杠
                '/' => match self.peek_char() {
                    Some('/') => {
                        self.advance();
                        self.skip_line_comment();
                        continue;
                    }
                    Some('*') => {
                        self.advance();
                        self.skip_block_comment(start);
                        continue;
                    }
                    _ => {
                        self.error_unsupported(ch, start);
                        TokenKind::Error
                    }
                },

                // Assignment or equality - 赋值或相等
                '=' => {
                    if self.peek_char() == Some('=') {
                        self.advance();
                        TokenKind::EqEq
                    } else {
                        TokenKind::Eq
                    }
                }

                // Greater than - 大于号
                '>' => {
                    if self.peek_char() == Some('=') {
                        self.advance();
                        TokenKind::GtEq
                    } else {
                        TokenKind::Gt
                    }
                }

                // Numbers - 数字
                '0'..='9' => return Some(self.number(start)),

                // Identifiers and keywords - 标识符和关键字
                'a'..='z' | 'A'..='Z' => return Some(self.identifier(start)),

                // Includes `<`, which the language does not support.
                // 包括语言不支持的 `<`。
                _ => {
                    self.error_unsupported(ch, start);
                    TokenKind::Error
                }
            };

            return Some(self.make_token(kind, start));
        }
    }

    fn make_token(&self, kind: TokenKind, start: usize) -> Token {
        let span = Span::from_usize(start, self.pos);
        // Lexemes keep at most `max_lexeme_len - 1` characters.
        let lexeme: String = self.source[start..self.pos]
            .chars()
            .take(self.limits.lexeme_keep())
            .collect();
        Token::new(kind, lexeme, self.line, span)
    }

    /// Advance to the next character.
    /// 前进到下一个字符。
    fn advance(&mut self) -> Option<(usize, char)> {
        let result = self.chars.next();
        if let Some((pos, ch)) = result {
            self.pos = pos + ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
            }
        }
        result
    }

    /// Peek at the next character without consuming it.
    /// 查看下一个字符但不消耗它。
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, ch)| *ch)
    }

    /// Skip whitespace characters.
    /// 跳过空白字符。
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C') {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Skip a line comment (// to end of line).
    /// 跳过行注释（// 到行尾）。
    fn skip_line_comment(&mut self) {
        while let Some((_, ch)) = self.advance() {
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip a block comment (/* ... */).
    /// 跳过块注释（/* ... */）。
    fn skip_block_comment(&mut self, start: usize) {
        let mut prev = None;
        loop {
            match self.advance() {
                Some((_, '/')) if prev == Some('*') => break,
                Some((_, ch)) => prev = Some(ch),
                None => {
                    // Unterminated comment - 未终止的注释
                    let span = Span::from_usize(start, self.pos);
                    self.diagnostics.report(
                        Diagnostic::error(
                            DiagnosticKind::Lexer,
                            self.line,
                            span,
                            "Unterminated block comment",
                        )
                        .with_code(ErrorCode::UnterminatedComment),
                    );
                    break;
                }
            }
        }
    }

    /// Parse a number literal.
    /// 解析数字字面量。
    fn number(&mut self, start: usize) -> Token {
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }

        self.make_token(TokenKind::Num, start)
    }

    /// Parse an identifier or keyword.
    /// 解析标识符或关键字。
    fn identifier(&mut self, start: usize) -> Token {
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_alphanumeric() {
                self.advance();
            } else {
                break;
            }
        }

        let token = self.make_token(TokenKind::Ident, start);

        // Check for keywords - 检查是否为关键字
        if let Some(keyword) = TokenKind::keyword_from_str(&token.lexeme) {
            return Token { kind: keyword, ..token };
        }

        if is_valid_identifier(&token.lexeme) {
            token
        } else {
            self.diagnostics.report(
                Diagnostic::error(
                    DiagnosticKind::Lexer,
                    token.line,
                    token.span,
                    format!("Invalid identifier: {}", token.lexeme),
                )
                .with_code(ErrorCode::InvalidIdentifier),
            );
            Token {
                kind: TokenKind::Error,
                ..token
            }
        }
    }

    /// Report an unsupported operator character.
    /// 报告不支持的运算符字符。
    fn error_unsupported(&mut self, ch: char, pos: usize) {
        let span = Span::from_usize(pos, self.pos);
        self.diagnostics.report(
            Diagnostic::error(
                DiagnosticKind::Lexer,
                self.line,
                span,
                format!("Unsupported operator: {}", ch),
            )
            .with_code(ErrorCode::UnsupportedOperator),
        );
    }
}

/// Whether `text` is a well-formed identifier: a letter, then letters, then
/// an optional trailing run of digits with no letter after the first digit.
/// 判断 `text` 是否为合法标识符：以字母开头，数字只能出现在末尾且其后不能再有字母。
pub fn is_valid_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    let mut seen_digit = false;
    for ch in chars {
        if ch.is_ascii_digit() {
            seen_digit = true;
        } else if !ch.is_ascii_alphabetic() || seen_digit {
            return false;
        }
    }
    true
}
