//! Vocabulary registries.
//!
//! ## Examples
//! ```rust
//! use entrysynth_core::lang::members::{self, WellKnownMemberId};
//!
//! assert_eq!(members::from_str("GetAwaiter"), Some(WellKnownMemberId::GetAwaiter));
//! assert_eq!(members::as_str(WellKnownMemberId::GetResult), "GetResult");
//! ```

pub mod diagnostics;
pub mod members;
pub mod registry;
pub mod synthetic;
