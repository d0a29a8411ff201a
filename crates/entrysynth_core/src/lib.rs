//! Provide the canonical vocabulary shared by the entry-point synthesizer and its tooling.
//!
//! This crate is intentionally small and dependency-free. It contains:
//! - the reserved names given to compiler-synthesized members (`<Main>`, `<Factory>`, ...),
//! - the well-known member spellings of the awaitable protocol (`GetAwaiter`, `GetResult`), and
//! - the diagnostic code registry with message templates.
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global state, and no compiler-specific types.
//! - Callers work with stable ids (`SyntheticNameId`, `WellKnownMemberId`, `DiagnosticCodeId`) and look up spellings
//!   through the registry tables instead of scattering string literals across the synthesizer.

pub mod lang;
