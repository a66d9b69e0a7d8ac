//! The UPL parser.

use upl_common::{Limits, Span};
use upl_diagnostic::{Diagnostic, DiagnosticKind, Diagnostics, ErrorCode};
use upl_lexer::{Token, TokenKind, TokenStream};
use upl_syntax::*;

use crate::recovery::{is_block_end, skip_line};
use crate::symbols::{SymbolError, SymbolTable};

/// Marker for a failed rule. The diagnostic has been reported (subject to
/// suppression) and the cursor has already been resynchronised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recovered;

pub type PResult<T> = Result<T, Recovered>;

/// The UPL parser.
pub struct Parser {
    tokens: TokenStream,
    /// Index of the current token; `tokens.len()` once recovery ran past `Eof`.
    pos: usize,
    /// Returned by `current` when the cursor is past the stream.
    eof: Token,
    diagnostics: Diagnostics,
    symbols: SymbolTable,
    limits: Limits,
    /// Blocks and parentheses currently open.
    depth: usize,
}

impl Parser {
    /// Create a parser over `tokens`, continuing into the lexer's collector.
    pub fn new(mut tokens: TokenStream, diagnostics: Diagnostics, limits: Limits) -> Self {
        let last = tokens.iter().last().map(|t| (t.kind, t.line, t.span));
        let eof = match last {
            Some((TokenKind::Eof, line, span)) => Token::new(TokenKind::Eof, "", line, span),
            _ => {
                let line = last.map_or(1, |(_, line, _)| line);
                let token = Token::new(TokenKind::Eof, "", line, Span::DUMMY);
                tokens.push(token.clone());
                token
            }
        };

        Self {
            tokens,
            pos: 0,
            eof,
            diagnostics,
            symbols: SymbolTable::new(limits.max_symbols),
            limits,
            depth: 0,
        }
    }

    /// Parse a complete program.
    ///
    /// Returns the tree only when `Prog` completed, no diagnostic was
    /// recorded, and the cursor sits on `Eof`.
    pub fn parse_file(&mut self) -> Option<Program> {
        let program = self.parse_prog().ok();

        if !self.diagnostics.is_empty() || !self.at_end() {
            log::debug!(
                "parse failed: {} diagnostic(s), cursor at {}",
                self.diagnostics.len(),
                self.current_kind()
            );
            return None;
        }
        program
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn finish(self) -> (TokenStream, Diagnostics, SymbolTable) {
        (self.tokens, self.diagnostics, self.symbols)
    }

    // ========== Program and Statements ==========

    fn parse_prog(&mut self) -> PResult<Program> {
        self.expect(TokenKind::Begin, "Expected 'begin'")?;
        let body = self.parse_stmts();
        self.expect(TokenKind::End, "Expected 'end'")?;
        Ok(Program { body })
    }

    /// `Stmt*`. Never fails; a block with no parsed statement is empty.
    fn parse_stmts(&mut self) -> Block {
        let mut stmts = Vec::new();

        while !is_block_end(self.current_kind()) {
            if stmts.len() >= self.limits.max_stmts_per_block {
                self.report(
                    DiagnosticKind::Semantic,
                    ErrorCode::TooManyStatements,
                    "Too many statements",
                );
                self.skip_to_sync();
                break;
            }

            match self.parse_stmt() {
                Ok(stmt) => stmts.push(stmt),
                Err(Recovered) => {
                    if !self.diagnostics.is_cascade(self.current_line()) {
                        self.skip_to_sync();
                    }
                }
            }
        }

        Block::new(stmts)
    }

    fn parse_stmt(&mut self) -> PResult<Stmt> {
        // Each statement on a fresh line opens a new cascade window.
        if !self.diagnostics.is_cascade(self.current_line()) {
            self.diagnostics.reset_cascade();
        }

        match self.current_kind() {
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::Do => self.parse_do_while_stmt(),
            TokenKind::Print => self.parse_print_stmt(),
            TokenKind::Int | TokenKind::Bool => self.parse_decl_stmt(),
            TokenKind::For => self.parse_for_stmt(),
            TokenKind::Ident if self.peek_kind() == TokenKind::Eq => {
                self.parse_assign_stmt().map(Stmt::Assign)
            }
            TokenKind::Ident => {
                self.fail("Expected 'int' or 'bool' for declaration or '=' for assignment")
            }
            _ => self.fail("Expected 'int', 'bool', identifier, or statement keyword"),
        }
    }

    fn parse_if_stmt(&mut self) -> PResult<Stmt> {
        self.expect(TokenKind::If, "Expected 'if'")?;
        self.expect(TokenKind::LParen, "Expected '('")?;
        let cond = self.resync(Self::parse_expr)?;
        self.expect(TokenKind::RParen, "Expected ')'")?;
        self.expect(TokenKind::Then, "Expected 'then'")?;
        let then_block = self.parse_braced_block("Expected '{'", "Expected '}'")?;

        // A malformed else part still yields the if statement; its
        // diagnostic already fails the run.
        let else_block = self.parse_else_opt().unwrap_or(None);

        Ok(Stmt::If(IfStmt {
            cond,
            then_block,
            else_block,
        }))
    }

    fn parse_else_opt(&mut self) -> PResult<Option<Block>> {
        if !self.eat(TokenKind::Else) {
            return Ok(None);
        }
        self.parse_braced_block("Expected '{'", "Expected '}'").map(Some)
    }

    fn parse_do_while_stmt(&mut self) -> PResult<Stmt> {
        self.expect(TokenKind::Do, "Expected 'do'")?;
        let body = self.parse_braced_block("Expected '{'", "Expected '}'")?;
        self.expect(TokenKind::While, "Expected 'while'")?;
        self.expect(TokenKind::LParen, "Expected '('")?;
        let cond = self.resync(Self::parse_expr)?;
        self.expect(TokenKind::RParen, "Expected ')'")?;
        self.expect(TokenKind::Semicolon, "Expected ';'")?;
        Ok(Stmt::DoWhile { body, cond })
    }

    fn parse_print_stmt(&mut self) -> PResult<Stmt> {
        self.expect(TokenKind::Print, "Expected 'print'")?;
        self.expect(TokenKind::LParen, "Expected '('")?;
        let expr = self.resync(Self::parse_expr)?;
        self.expect(TokenKind::RParen, "Expected ')'")?;
        self.expect(TokenKind::Semicolon, "Expected ';'")?;
        Ok(Stmt::Print(expr))
    }

    fn parse_decl_stmt(&mut self) -> PResult<Stmt> {
        let decl = self.parse_typed_decl()?;

        if !self.check(TokenKind::Semicolon) {
            // Reported against the declared name, not the offending token.
            let line = decl.init.name_line;
            self.report_at(
                line,
                decl.init.inner.name.span,
                DiagnosticKind::Parser,
                ErrorCode::UnexpectedToken,
                "Expected ';'",
            );
            self.skip_to_sync();
            return Err(Recovered);
        }
        self.advance();

        Ok(Stmt::Decl(Decl {
            ty: decl.ty,
            init: decl.init.inner,
        }))
    }

    /// `Type InitDecl`, shared by declarations and `for` initializers.
    fn parse_typed_decl(&mut self) -> PResult<TypedDecl> {
        let ty = self.resync(Self::parse_type)?;
        let init = self.resync(|p| p.parse_init_decl(ty))?;
        Ok(TypedDecl { ty, init })
    }

    fn parse_type(&mut self) -> PResult<TypeName> {
        let ty = match self.current_kind() {
            TokenKind::Int => TypeName::Int,
            TokenKind::Bool => TypeName::Bool,
            _ => return self.fail("Expected 'int' or 'bool'"),
        };
        self.advance();
        Ok(ty)
    }

    /// `ID ('=' Expr)?`, registering the name once the initializer parsed.
    fn parse_init_decl(&mut self, ty: TypeName) -> PResult<Located<InitDecl>> {
        if !self.check(TokenKind::Ident) {
            return self.fail("Expected identifier");
        }
        let token = self.current().clone();
        let name = Ident::new(token.lexeme, token.span);
        self.advance();

        let value = if self.eat(TokenKind::Eq) {
            Some(self.resync(Self::parse_expr)?)
        } else {
            None
        };

        self.declare(&name, ty, token.line);
        Ok(Located {
            inner: InitDecl { name, value },
            name_line: token.line,
        })
    }

    fn parse_assign_stmt(&mut self) -> PResult<Assign> {
        if !self.check(TokenKind::Ident) {
            return self.fail("Expected identifier");
        }
        let target = self.parse_declared_ident()?;
        self.expect(TokenKind::Eq, "Expected '='")?;
        let value = self.resync(Self::parse_expr)?;
        self.expect(TokenKind::Semicolon, "Expected ';'")?;
        Ok(Assign { target, value })
    }

    fn parse_for_stmt(&mut self) -> PResult<Stmt> {
        self.expect(TokenKind::For, "Expected 'for'")?;
        self.expect(TokenKind::LParen, "Expected '('")?;

        let init = match self.current_kind() {
            TokenKind::Int | TokenKind::Bool => {
                let decl = self.parse_typed_decl()?;
                ForInit::Decl(Decl {
                    ty: decl.ty,
                    init: decl.init.inner,
                })
            }
            TokenKind::Ident => {
                let target = self.parse_declared_ident()?;
                self.expect(TokenKind::Eq, "Expected '='")?;
                let value = self.resync(Self::parse_expr)?;
                ForInit::Assign(Assign { target, value })
            }
            _ => {
                return self
                    .fail("Expected 'int', 'bool', or identifier for for-loop initialization");
            }
        };
        self.expect(
            TokenKind::Semicolon,
            "Expected ';' after for-loop initialization",
        )?;

        let cond = self.resync(Self::parse_expr)?;
        self.expect(TokenKind::Semicolon, "Expected ';' after for-loop condition")?;

        if !self.check(TokenKind::Ident) {
            return self.fail("Expected identifier in for-loop update");
        }
        let target = self.parse_declared_ident()?;
        self.expect(TokenKind::Eq, "Expected '=' in for-loop update")?;
        let value = self.resync(Self::parse_expr)?;
        let update = Assign { target, value };

        self.expect(TokenKind::RParen, "Expected ')' after for-loop update")?;
        let body = self.parse_braced_block(
            "Expected '{' for for-loop body",
            "Expected '}' after for-loop body",
        )?;

        Ok(Stmt::For(ForStmt {
            init,
            cond,
            update,
            body,
        }))
    }

    /// `'{' Stmts '}'` with the caller's wording for each brace.
    fn parse_braced_block(&mut self, open: &str, close: &str) -> PResult<Block> {
        self.nested(|p| {
            p.expect(TokenKind::LBrace, open)?;
            let block = p.parse_stmts();
            p.expect(TokenKind::RBrace, close)?;
            Ok(block)
        })
    }

    // ========== Expression Parsing ==========

    fn parse_expr(&mut self) -> PResult<Expr> {
        self.parse_eq_expr()
    }

    fn parse_eq_expr(&mut self) -> PResult<Expr> {
        let mut left = self.parse_rel_expr()?;

        while self.eat(TokenKind::EqEq) {
            let right = self.resync(Self::parse_rel_expr)?;
            left = Expr::binary(BinOp::Eq, left, right);
        }

        Ok(left)
    }

    fn parse_rel_expr(&mut self) -> PResult<Expr> {
        let mut left = self.parse_add_expr()?;

        loop {
            let op = match self.current_kind() {
                TokenKind::Gt => BinOp::Gt,
                TokenKind::GtEq => BinOp::Ge,
                _ => break,
            };
            self.advance();
            let right = self.resync(Self::parse_add_expr)?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_add_expr(&mut self) -> PResult<Expr> {
        let mut left = self.parse_mul_expr()?;

        while self.eat(TokenKind::Plus) {
            let right = self.resync(Self::parse_mul_expr)?;
            left = Expr::binary(BinOp::Add, left, right);
        }

        Ok(left)
    }

    fn parse_mul_expr(&mut self) -> PResult<Expr> {
        let mut left = self.parse_primary_expr()?;

        while self.eat(TokenKind::Star) {
            let right = self.resync(Self::parse_primary_expr)?;
            left = Expr::binary(BinOp::Mul, left, right);
        }

        Ok(left)
    }

    fn parse_primary_expr(&mut self) -> PResult<Expr> {
        let span = self.current().span;
        let kind = match self.current_kind() {
            TokenKind::Ident => {
                let ident = self.parse_declared_ident()?;
                return Ok(Expr::new(ExprKind::Identifier(ident), span));
            }
            TokenKind::Num => ExprKind::NumberLiteral(self.current().lexeme.clone()),
            TokenKind::True => ExprKind::BoolLiteral(true),
            TokenKind::False => ExprKind::BoolLiteral(false),
            TokenKind::LParen => {
                return self.nested(|p| {
                    p.advance();
                    let expr = p.resync(Self::parse_expr)?;
                    p.expect(TokenKind::RParen, "Expected ')'")?;
                    Ok(expr)
                });
            }
            _ => {
                return self.fail_with(
                    DiagnosticKind::Parser,
                    ErrorCode::ExpectedExpression,
                    "Invalid primary expression",
                );
            }
        };
        self.advance();
        Ok(Expr::new(kind, span))
    }

    // ========== Declarations ==========

    /// Consume the current identifier, which must already be declared.
    fn parse_declared_ident(&mut self) -> PResult<Ident> {
        let token = self.current().clone();
        if !self.symbols.is_declared(&token.lexeme) {
            return self.fail_with(
                DiagnosticKind::Semantic,
                ErrorCode::UndeclaredVariable,
                format!("Undeclared variable: {}", token.lexeme),
            );
        }
        self.advance();
        Ok(Ident::new(token.lexeme, token.span))
    }

    fn declare(&mut self, name: &Ident, ty: TypeName, line: u32) {
        if let Err(err) = self.symbols.declare(&name.name, ty, line) {
            let code = match err {
                SymbolError::TooMany => ErrorCode::TooManySymbols,
                SymbolError::AlreadyDeclared(_) => ErrorCode::DuplicateDeclaration,
            };
            self.report_at(
                line,
                name.span,
                DiagnosticKind::Semantic,
                code,
                err.to_string(),
            );
        }
    }

    // ========== Token Helpers ==========

    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    fn current_line(&self) -> u32 {
        self.current().line
    }

    fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map_or(self.current_kind(), |t| t.kind)
    }

    fn at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Move to the next token; the cursor never moves past `Eof` this way.
    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> PResult<()> {
        if self.eat(kind) {
            Ok(())
        } else {
            self.fail(message)
        }
    }

    // ========== Error Reporting and Recovery ==========

    fn report(&mut self, kind: DiagnosticKind, code: ErrorCode, message: impl Into<String>) {
        let token = self.current();
        let (line, span) = (token.line, token.span);
        self.report_at(line, span, kind, code, message);
    }

    fn report_at(
        &mut self,
        line: u32,
        span: Span,
        kind: DiagnosticKind,
        code: ErrorCode,
        message: impl Into<String>,
    ) {
        self.diagnostics
            .report(Diagnostic::error(kind, line, span, message).with_code(code));
    }

    /// Report at the current token, resynchronise and fail.
    fn fail<T>(&mut self, message: &str) -> PResult<T> {
        self.fail_with(DiagnosticKind::Parser, ErrorCode::UnexpectedToken, message)
    }

    fn fail_with<T>(
        &mut self,
        kind: DiagnosticKind,
        code: ErrorCode,
        message: impl Into<String>,
    ) -> PResult<T> {
        self.report(kind, code, message);
        self.skip_to_sync();
        Err(Recovered)
    }

    /// Run a child rule; if it fails, skip the current line once more.
    fn resync<T>(&mut self, rule: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        let result = rule(self);
        if result.is_err() {
            self.skip_to_sync();
        }
        result
    }

    /// Run a rule one nesting level deeper, failing at the current token
    /// once `max_nesting_depth` levels are open.
    fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= self.limits.max_nesting_depth {
            return self.fail_with(
                DiagnosticKind::Parser,
                ErrorCode::NestingTooDeep,
                "Nesting too deep",
            );
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// Discard the rest of the current physical line.
    fn skip_to_sync(&mut self) {
        let from = self.pos;
        self.pos = skip_line(&self.tokens, self.pos);
        if self.pos > from {
            log::debug!(
                "recovery skipped {} token(s), resuming at line {}",
                self.pos - from,
                self.current_line()
            );
        }
    }
}

/// A parsed `InitDecl` with the line of its identifier.
struct Located<T> {
    inner: T,
    name_line: u32,
}

/// The `Type InitDecl` pair before it is wrapped as a statement or initializer.
struct TypedDecl {
    ty: TypeName,
    init: Located<InitDecl>,
}
