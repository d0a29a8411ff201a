//! Define error types for entry-point synthesis.
//!
//! These are *defects*, not user errors: user-facing problems (a future type without `GetAwaiter`, a missing
//! platform type) go into the [`DiagnosticBag`](crate::diagnostics::DiagnosticBag). An `EntryPointError` means a
//! caller handed the synthesizer inputs it must never see, and the current synthesis call is abandoned without
//! producing a tree.

use miette::Diagnostic;
use thiserror::Error;

/// Synthesizer that raised an error.
pub type SynthesizerName = &'static str;

pub const FORWARDER: SynthesizerName = "async main forwarder";
pub const SCRIPT: SynthesizerName = "script entry point";
pub const SUBMISSION: SynthesizerName = "submission factory";

/// Error during entry-point synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum EntryPointError {
    #[error("internal consistency violation in {synthesizer}: {message}")]
    #[diagnostic(
        code(entrysynth::internal_consistency),
        help("the entry-point selector passed inputs this synthesizer cannot accept")
    )]
    InternalConsistency {
        synthesizer: SynthesizerName,
        message: String,
    },

    #[error("{synthesizer} used before its prerequisites were resolved: missing {prerequisite}")]
    #[diagnostic(
        code(entrysynth::missing_prerequisite),
        help("check the entry point is viable (no protocol diagnostics) before building its body")
    )]
    MissingPrerequisite {
        synthesizer: SynthesizerName,
        prerequisite: &'static str,
    },

    #[error("`{operation}` is not supported on synthesized entry points")]
    #[diagnostic(code(entrysynth::unsupported))]
    Unsupported { operation: &'static str },
}

impl EntryPointError {
    pub fn internal(synthesizer: SynthesizerName, message: impl Into<String>) -> Self {
        EntryPointError::InternalConsistency {
            synthesizer,
            message: message.into(),
        }
    }

    pub fn missing(synthesizer: SynthesizerName, prerequisite: &'static str) -> Self {
        EntryPointError::MissingPrerequisite {
            synthesizer,
            prerequisite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_synthesizer() {
        let err = EntryPointError::internal(SUBMISSION, "return type mismatch");
        assert_eq!(
            err.to_string(),
            "internal consistency violation in submission factory: return type mismatch"
        );
        let err = EntryPointError::missing(SCRIPT, "await protocol");
        assert!(err.to_string().contains("missing await protocol"));
    }

    #[test]
    fn diagnostic_codes_are_stable() {
        let err = EntryPointError::Unsupported {
            operation: "calculate_local_syntax_offset",
        };
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("entrysynth::unsupported"));
    }
}
