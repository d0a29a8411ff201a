//! Bound statement definitions

use super::BoundExpr;

/// A bound statement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BoundStmt {
    /// Expression statement (expr;), value discarded
    Expression(BoundExpr),

    /// Return statement; `None` for `return;`
    Return(Option<BoundExpr>),
}

impl BoundStmt {
    pub fn is_return(&self) -> bool {
        matches!(self, BoundStmt::Return(_))
    }
}
