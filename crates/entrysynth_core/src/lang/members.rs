//! Well-known member spellings the synthesizer looks up by name.

use crate::lang::registry::{LangItemInfo, stable};

/// Stable identifier for well-known members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnownMemberId {
    /// First step of the awaitable protocol, called on the future-like value.
    GetAwaiter,
    /// Second step of the awaitable protocol, called on the awaiter.
    GetResult,
    /// Compiler-generated initializer of a script or submission class.
    ScriptInitializer,
    /// Instance constructor.
    Constructor,
}

/// Metadata entry for a well-known member.
pub type WellKnownMemberInfo = LangItemInfo<WellKnownMemberId>;

/// Registry of well-known members.
pub const WELL_KNOWN_MEMBERS: &[WellKnownMemberInfo] = &[
    stable(
        WellKnownMemberId::GetAwaiter,
        "GetAwaiter",
        "Zero-argument method returning the awaiter of a future-like value.",
    ),
    stable(
        WellKnownMemberId::GetResult,
        "GetResult",
        "Zero-argument awaiter method that blocks for and returns the awaited result.",
    ),
    stable(
        WellKnownMemberId::ScriptInitializer,
        "<Initialize>",
        "Generated initializer running the top-level statements of a script or submission.",
    ),
    stable(WellKnownMemberId::Constructor, ".ctor", "Instance constructor."),
];

/// Resolve a member spelling to its stable id.
pub fn from_str(name: &str) -> Option<WellKnownMemberId> {
    WELL_KNOWN_MEMBERS.iter().find(|m| m.matches(name)).map(|m| m.id)
}

/// Return the canonical spelling for a well-known member.
pub fn as_str(id: WellKnownMemberId) -> &'static str {
    info_for(id).canonical
}

/// Return the metadata entry for a well-known member.
pub fn info_for(id: WellKnownMemberId) -> &'static WellKnownMemberInfo {
    WELL_KNOWN_MEMBERS
        .iter()
        .find(|m| m.id == id)
        .expect("INVARIANT: every WellKnownMemberId has a registry entry")
}
