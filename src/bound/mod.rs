//! Bound-tree IR for synthesized method bodies.
//!
//! This is a small, immutable tree: locals, expression statements, returns, assignment, object construction,
//! invocation and parameter/local references. Every expression carries its resolved type.
//!
//! ## Compiler-generated code
//!
//! Trees produced by the entry-point synthesizers are handed out as [`Synthesized<BoundBlock>`]. The wrapper can only
//! be created inside this crate, so holding one proves that every node below it is compiler-generated; there is no
//! per-node flag to forget.
//!
//! ## See also
//! - [`render`]: C#-like text rendering used by the CLI and snapshot tests

mod expr;
pub mod render;
mod stmt;

use std::ops::Deref;

pub use expr::{BoundExpr, BoundExprKind};
pub use stmt::BoundStmt;

use crate::symbols::TypeId;

/// Why a synthesized local exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SynthesizedLocalKind {
    /// Temporary introduced while building a body; never visible to user code.
    LoweringTemp,
}

/// A local declared by a block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalSymbol {
    /// Position in the declaring block's local list.
    pub slot: usize,
    pub ty: TypeId,
    pub kind: SynthesizedLocalKind,
}

impl LocalSymbol {
    pub fn temp(slot: usize, ty: TypeId) -> Self {
        Self {
            slot,
            ty,
            kind: SynthesizedLocalKind::LoweringTemp,
        }
    }
}

/// A block: its locals plus statements, in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BoundBlock {
    pub locals: Vec<LocalSymbol>,
    pub statements: Vec<BoundStmt>,
}

impl BoundBlock {
    pub fn new(locals: Vec<LocalSymbol>, statements: Vec<BoundStmt>) -> Self {
        Self { locals, statements }
    }

    /// Whether the last statement is a return (every synthesized body ends in exactly one).
    pub fn ends_with_return(&self) -> bool {
        self.statements.last().is_some_and(BoundStmt::is_return)
    }

    pub fn return_count(&self) -> usize {
        self.statements.iter().filter(|s| s.is_return()).count()
    }
}

/// A node produced by the compiler rather than bound from source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Synthesized<T> {
    node: T,
}

impl<T> Synthesized<T> {
    pub(crate) fn new(node: T) -> Self {
        Self { node }
    }

    /// Always `true`; lets downstream stages suppress diagnostics on generated code without matching on types.
    pub fn was_compiler_generated(&self) -> bool {
        true
    }

    pub fn node(&self) -> &T {
        &self.node
    }

    pub fn into_inner(self) -> T {
        self.node
    }
}

impl<T> Deref for Synthesized<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.node
    }
}
