//! Expression AST nodes.
//! 表达式 AST 节点。

use crate::Ident;
use upl_common::Span;

/// An expression.
/// 表达式。
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        let span = left.span.merge(right.span);
        Self::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        )
    }
}

/// Expression kind.
/// 表达式类型。
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Variable reference / 变量引用
    Identifier(Ident),
    /// Number literal, kept as its source digits / 数字字面量（保留源码文本）
    NumberLiteral(String),
    /// `true` or `false` / 布尔字面量
    BoolLiteral(bool),
    /// Binary operation / 二元运算
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

/// Binary operators, loosest binding first.
/// 二元运算符。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Eq,
    Gt,
    Ge,
    Add,
    Mul,
}

impl BinOp {
    /// The node label used by the tree dump.
    pub fn label(&self) -> &'static str {
        match self {
            BinOp::Eq => "EqExpr",
            BinOp::Gt => "Gt",
            BinOp::Ge => "Gte",
            BinOp::Add => "AddExpr",
            BinOp::Mul => "MulExpr",
        }
    }
}
