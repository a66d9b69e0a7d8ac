//! Statement-level AST definitions.
//! 语句级 AST 定义。

use crate::Expr;
use upl_common::Span;

/// A complete program: `begin Stmts end`.
/// 完整的程序：`begin Stmts end`。
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Block,
}

/// A statement list. May be empty.
/// 语句列表，可以为空。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self { stmts }
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

/// A statement.
/// 语句。
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `if (c) then { .. } else { .. }` / 条件语句
    If(IfStmt),
    /// `do { .. } while (c);` / do-while 循环
    DoWhile { body: Block, cond: Expr },
    /// `print(e);` / 打印语句
    Print(Expr),
    /// `int x = e;` / 声明语句
    Decl(Decl),
    /// `x = e;` / 赋值语句
    Assign(Assign),
    /// `for (init; cond; update) { .. }` / for 循环
    For(ForStmt),
}

/// An `if` statement with its optional `else` block.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub cond: Expr,
    pub then_block: Block,
    pub else_block: Option<Block>,
}

/// The declared type of a variable.
/// 变量的声明类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeName {
    Int,
    Bool,
}

impl TypeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeName::Int => "int",
            TypeName::Bool => "bool",
        }
    }
}

/// `Type InitDecl`, as used by declarations and `for` initializers.
#[derive(Debug, Clone, PartialEq)]
pub struct Decl {
    pub ty: TypeName,
    pub init: InitDecl,
}

/// `ID ('=' Expr)?`
#[derive(Debug, Clone, PartialEq)]
pub struct InitDecl {
    pub name: Ident,
    pub value: Option<Expr>,
}

/// `ID '=' Expr`, shared by assignments, `for` initializers and updates.
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub target: Ident,
    pub value: Expr,
}

/// A C-style `for` loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: ForInit,
    pub cond: Expr,
    pub update: Assign,
    pub body: Block,
}

/// The initializer clause of a `for` loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    Decl(Decl),
    Assign(Assign),
}

/// An identifier.
/// 标识符。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}
