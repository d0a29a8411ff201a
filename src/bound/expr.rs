//! Bound expression definitions

use super::LocalSymbol;
use crate::symbols::{MethodId, ParameterSymbol, TypeId};

/// A typed bound expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundExpr {
    pub kind: BoundExprKind,
    /// Resolved type
    pub ty: TypeId,
}

impl BoundExpr {
    pub fn new(kind: BoundExprKind, ty: TypeId) -> Self {
        Self { kind, ty }
    }

    pub fn parameter(parameter: &ParameterSymbol) -> Self {
        Self::new(BoundExprKind::Parameter(parameter.clone()), parameter.ty)
    }

    pub fn local(local: LocalSymbol) -> Self {
        let ty = local.ty;
        Self::new(BoundExprKind::Local(local), ty)
    }

    /// Invocation of `method`; `ty` is the method's return type.
    pub fn call(receiver: Option<BoundExpr>, method: MethodId, arguments: Vec<BoundExpr>, ty: TypeId) -> Self {
        Self::new(
            BoundExprKind::Call {
                receiver: receiver.map(Box::new),
                method,
                arguments,
            },
            ty,
        )
    }

    /// `new T(arguments)`; `ty` is the constructed type.
    pub fn object_creation(constructor: MethodId, arguments: Vec<BoundExpr>, ty: TypeId) -> Self {
        Self::new(BoundExprKind::ObjectCreation { constructor, arguments }, ty)
    }

    /// `target = value`, typed as the target.
    pub fn assignment(target: BoundExpr, value: BoundExpr) -> Self {
        let ty = target.ty;
        Self::new(
            BoundExprKind::Assignment {
                target: Box::new(target),
                value: Box::new(value),
            },
            ty,
        )
    }
}

/// Expression kinds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BoundExprKind {
    /// Reference to a parameter of the enclosing method
    Parameter(ParameterSymbol),

    /// Reference to a local of the enclosing block
    Local(LocalSymbol),

    /// Method invocation; `receiver` is `None` for static calls
    Call {
        receiver: Option<Box<BoundExpr>>,
        method: MethodId,
        arguments: Vec<BoundExpr>,
    },

    /// Object construction
    ObjectCreation {
        constructor: MethodId,
        arguments: Vec<BoundExpr>,
    },

    /// Simple assignment
    Assignment {
        target: Box<BoundExpr>,
        value: Box<BoundExpr>,
    },
}
