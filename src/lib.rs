#![forbid(unsafe_code)]
//! Compiler-synthesized program entry points
//!
//! Builds the entry point a compiler inserts when the user's code cannot be started directly: a synchronous
//! `<Main>` forwarding to an `async` main, a `<Main>` running a script, or a `<Factory>` running an interactive
//! submission. The result is a method-like symbol plus an immutable bound body for the emitter.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Synthesizer misuse**: Inputs a synthesizer must never see are returned as
//!   [`EntryPointError`](entry_point::EntryPointError), never panics and never user diagnostics.
//!
//! - **True invariants**: If a panic represents a bug (logic error), use `.expect("INVARIANT: reason")` with a clear
//!   explanation.

pub mod bound;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod entry_point;
pub mod manifest;
pub mod symbols;

pub use config::SynthesisConfig;
pub use diagnostics::{Diagnostic, DiagnosticBag, Location};
pub use entry_point::{CompilationKind, EntryPointError, EntryPointOutput, MethodLike, synthesize_entry_point};
pub use symbols::{TypeEnvironment, TypeTable};
