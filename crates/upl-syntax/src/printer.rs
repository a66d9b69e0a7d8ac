//! Depth-indented tree dump of a program.
//! 程序的按深度缩进的树形输出。
//!
//! Every node is written on its own line, two spaces of indentation per
//! level, in pre-order. Identifiers and number literals appear as leaf
//! lines holding their source text.
//! 每个节点单独占一行，每层缩进两个空格，按先序输出。

use std::fmt;

use crate::{Assign, Block, Decl, Expr, ExprKind, ForInit, IfStmt, InitDecl, Program, Stmt};

const INDENT: &str = "  ";

/// Builds the tree dump line by line.
/// 逐行构建树形输出。
#[derive(Default)]
pub struct TreePrinter {
    /// Output buffer. / 输出缓冲区。
    output: String,
    /// Current depth. / 当前深度。
    indent_level: usize,
}

impl TreePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the dump of `program`.
    /// 获取 `program` 的树形输出。
    pub fn print(program: &Program) -> String {
        let mut printer = Self::new();
        printer.program(program);
        printer.finish()
    }

    pub fn finish(self) -> String {
        self.output
    }

    /// Write one node line at the current depth.
    /// 在当前深度写入一行节点。
    fn line(&mut self, label: &str) {
        for _ in 0..self.indent_level {
            self.output.push_str(INDENT);
        }
        self.output.push_str(label);
        self.output.push('\n');
    }

    /// Write a node line, then its children one level deeper.
    /// 写入节点行，然后在下一层写入其子节点。
    fn node(&mut self, label: &str, children: impl FnOnce(&mut Self)) {
        self.line(label);
        self.indent_level += 1;
        children(self);
        self.indent_level -= 1;
    }

    pub fn program(&mut self, program: &Program) {
        self.node("Prog", |p| p.block(&program.body));
    }

    pub fn block(&mut self, block: &Block) {
        self.node("Stmts", |p| {
            for stmt in &block.stmts {
                p.stmt(stmt);
            }
        });
    }

    pub fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::If(if_stmt) => self.if_stmt(if_stmt),
            Stmt::DoWhile { body, cond } => self.node("DoWhileStmt", |p| {
                p.block(body);
                p.expr(cond);
            }),
            Stmt::Print(expr) => self.node("PrintStmt", |p| p.expr(expr)),
            Stmt::Decl(decl) => self.node("DeclStmt", |p| p.decl(decl)),
            Stmt::Assign(assign) => self.node("AssignStmt", |p| p.assign(assign)),
            Stmt::For(for_stmt) => self.node("ForStmt", |p| {
                match &for_stmt.init {
                    ForInit::Decl(decl) => p.node("ForInit", |p| p.decl(decl)),
                    ForInit::Assign(assign) => p.node("ForInit", |p| p.assign(assign)),
                }
                p.expr(&for_stmt.cond);
                p.node("Update", |p| p.assign(&for_stmt.update));
                p.block(&for_stmt.body);
            }),
        }
    }

    fn if_stmt(&mut self, if_stmt: &IfStmt) {
        self.node("IfStmt", |p| {
            p.node("IfThen", |p| {
                p.expr(&if_stmt.cond);
                p.block(&if_stmt.then_block);
            });
            if let Some(else_block) = &if_stmt.else_block {
                p.node("ElseOpt", |p| p.block(else_block));
            }
        });
    }

    fn decl(&mut self, decl: &Decl) {
        self.line(&format!("Type_{}", decl.ty.as_str()));
        self.init_decl(&decl.init);
    }

    fn init_decl(&mut self, init: &InitDecl) {
        self.node("InitDecl", |p| {
            p.line(&init.name.name);
            if let Some(value) = &init.value {
                p.expr(value);
            }
        });
    }

    /// The target leaf followed by the value; the caller supplies the wrapper.
    fn assign(&mut self, assign: &Assign) {
        self.line(&assign.target.name);
        self.expr(&assign.value);
    }

    pub fn expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Identifier(ident) => self.node("Id", |p| p.line(&ident.name)),
            ExprKind::NumberLiteral(digits) => self.node("Num", |p| p.line(digits)),
            ExprKind::BoolLiteral(true) => self.line("True"),
            ExprKind::BoolLiteral(false) => self.line("False"),
            ExprKind::Binary { op, left, right } => self.node(op.label(), |p| {
                p.expr(left);
                p.expr(right);
            }),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&TreePrinter::print(self))
    }
}
