//! Reserved names for compiler-synthesized members and parameters.
//!
//! Entry-point names are wrapped in angle brackets, which no user identifier can contain, so a synthesized
//! member never collides with user code.

use crate::lang::registry::{LangItemInfo, stable};

/// Stable identifier for reserved synthetic names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntheticNameId {
    /// Entry point of a regular (async main) or script compilation.
    Main,
    /// Entry point of an interactive submission.
    Factory,
    /// Conventional name of the string-array parameter of a forwarded main.
    ArgsParameter,
    /// Name of the prior-submissions array parameter of a submission factory.
    SubmissionArrayParameter,
}

/// Metadata entry for a reserved synthetic name.
pub type SyntheticNameInfo = LangItemInfo<SyntheticNameId>;

/// Registry of reserved synthetic names.
pub const SYNTHETIC_NAMES: &[SyntheticNameInfo] = &[
    stable(
        SyntheticNameId::Main,
        "<Main>",
        "Synthesized entry point forwarding to an async main or running a script.",
    ),
    stable(
        SyntheticNameId::Factory,
        "<Factory>",
        "Synthesized factory constructing and running an interactive submission.",
    ),
    stable(
        SyntheticNameId::ArgsParameter,
        "args",
        "Command-line arguments forwarded to the user main.",
    ),
    stable(
        SyntheticNameId::SubmissionArrayParameter,
        "submissionArray",
        "State slots of the previous submissions in the chain.",
    ),
];

/// Resolve a spelling to its reserved-name id.
pub fn from_str(name: &str) -> Option<SyntheticNameId> {
    SYNTHETIC_NAMES.iter().find(|n| n.matches(name)).map(|n| n.id)
}

/// Return the canonical spelling for a reserved synthetic name.
pub fn as_str(id: SyntheticNameId) -> &'static str {
    info_for(id).canonical
}

/// Return the metadata entry for a reserved synthetic name.
pub fn info_for(id: SyntheticNameId) -> &'static SyntheticNameInfo {
    SYNTHETIC_NAMES
        .iter()
        .find(|n| n.id == id)
        .expect("INVARIANT: every SyntheticNameId has a registry entry")
}

/// Whether `name` is a reserved member name that user code can never declare.
pub fn is_reserved_member_name(name: &str) -> bool {
    name.starts_with('<') && name.ends_with('>')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_point_names_are_reserved() {
        assert!(is_reserved_member_name(as_str(SyntheticNameId::Main)));
        assert!(is_reserved_member_name(as_str(SyntheticNameId::Factory)));
        assert!(!is_reserved_member_name("Main"));
    }
}
