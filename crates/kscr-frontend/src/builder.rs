// src/builder.rs
//
// Node-id allocation for externally-built ASTs. One builder per analyzed
// file set keeps NodeIds unique across files.

use crate::ast::*;
use crate::span::Span;

/// Hands out monotonically increasing [`NodeId`]s and wraps expression
/// construction. The external parser drives this; tests use the same API.
#[derive(Debug, Default)]
pub struct AstBuilder {
    next_node_id: u32,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// One past the highest id handed out so far.
    pub fn next_node_id(&self) -> u32 {
        self.next_node_id
    }

    pub fn expr(&mut self, kind: ExprKind, span: Span) -> Expr {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        Expr { id, kind, span }
    }

    pub fn int(&mut self, value: i64, span: Span) -> Expr {
        self.expr(ExprKind::IntLiteral(value), span)
    }

    pub fn string(&mut self, value: impl Into<String>, span: Span) -> Expr {
        self.expr(ExprKind::StringLiteral(value.into()), span)
    }

    pub fn ident(&mut self, name: Symbol, span: Span) -> Expr {
        self.expr(
            ExprKind::Ident(Box::new(IdentExpr {
                receiver: None,
                name,
            })),
            span,
        )
    }

    pub fn ident_on(&mut self, receiver: Expr, name: Symbol, span: Span) -> Expr {
        self.expr(
            ExprKind::Ident(Box::new(IdentExpr {
                receiver: Some(receiver),
                name,
            })),
            span,
        )
    }

    pub fn call(&mut self, name: Symbol, args: Vec<Expr>, span: Span) -> Expr {
        self.expr(
            ExprKind::Call(Box::new(CallExpr {
                receiver: None,
                name,
                args,
            })),
            span,
        )
    }

    pub fn call_on(&mut self, receiver: Expr, name: Symbol, args: Vec<Expr>, span: Span) -> Expr {
        self.expr(
            ExprKind::Call(Box::new(CallExpr {
                receiver: Some(receiver),
                name,
                args,
            })),
            span,
        )
    }

    pub fn binary(&mut self, left: Expr, op: BinaryOp, right: Expr, span: Span) -> Expr {
        self.expr(ExprKind::Binary(Box::new(BinaryExpr { left, op, right })), span)
    }

    pub fn paren(&mut self, inner: Expr, span: Span) -> Expr {
        self.expr(ExprKind::Paren(Box::new(inner)), span)
    }
}
