//! Diagnostic code registry.
//!
//! Each entry pairs a stable id with a numeric code and a positional message template (`{0}`, `{1}`, ...). The
//! compiler side owns severity, location and argument values; this table owns spelling.

use crate::lang::registry::{LangItemInfo, stable};

/// Stable identifier for diagnostics the synthesizer can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCodeId {
    /// A member required by the compiler is absent, ambiguous, or has the wrong shape.
    MissingPredefinedMember,
    /// A predefined platform type could not be found.
    PredefinedTypeNotFound,
    /// A referenced type is unusable at this site (e.g. it comes from a malformed reference).
    BogusType,
}

/// Registry entry: shared metadata plus the code and message template.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticCodeInfo {
    pub item: LangItemInfo<DiagnosticCodeId>,
    /// Stable numeric code, shown to users.
    pub code: &'static str,
    /// Message template with positional `{N}` placeholders.
    pub template: &'static str,
    /// Number of arguments the template expects.
    pub arity: usize,
}

/// Registry of diagnostic codes.
pub const DIAGNOSTIC_CODES: &[DiagnosticCodeInfo] = &[
    DiagnosticCodeInfo {
        item: stable(
            DiagnosticCodeId::MissingPredefinedMember,
            "missing_predefined_member",
            "A member the compiler needs to synthesize code is missing or ambiguous.",
        ),
        code: "E0656",
        template: "Missing compiler required member '{0}.{1}'",
        arity: 2,
    },
    DiagnosticCodeInfo {
        item: stable(
            DiagnosticCodeId::PredefinedTypeNotFound,
            "predefined_type_not_found",
            "A platform type the compiler needs is not defined or imported.",
        ),
        code: "E0518",
        template: "Predefined type '{0}' is not defined or imported",
        arity: 1,
    },
    DiagnosticCodeInfo {
        item: stable(
            DiagnosticCodeId::BogusType,
            "bogus_type",
            "A referenced type is not supported by the language.",
        ),
        code: "E0648",
        template: "'{0}' is a type not supported by the language",
        arity: 1,
    },
];

/// Return the registry entry for a diagnostic id.
pub fn info_for(id: DiagnosticCodeId) -> &'static DiagnosticCodeInfo {
    DIAGNOSTIC_CODES
        .iter()
        .find(|d| d.item.id == id)
        .expect("INVARIANT: every DiagnosticCodeId has a registry entry")
}

/// Resolve a numeric code (e.g. `"E0656"`) back to its id.
pub fn from_code(code: &str) -> Option<DiagnosticCodeId> {
    DIAGNOSTIC_CODES.iter().find(|d| d.code == code).map(|d| d.item.id)
}

/// Return the numeric code for a diagnostic id.
pub fn code(id: DiagnosticCodeId) -> &'static str {
    info_for(id).code
}

/// Render the message template of `id` with positional arguments.
///
/// Placeholders without a matching argument are left verbatim so a malformed call is visible rather than silently
/// dropped.
///
/// ## Examples
/// ```rust
/// use entrysynth_core::lang::diagnostics::{self, DiagnosticCodeId};
///
/// let msg = diagnostics::render(DiagnosticCodeId::MissingPredefinedMember, &["Task", "GetAwaiter"]);
/// assert_eq!(msg, "Missing compiler required member 'Task.GetAwaiter'");
/// ```
pub fn render<S: AsRef<str>>(id: DiagnosticCodeId, args: &[S]) -> String {
    let mut out = info_for(id).template.to_string();
    for (i, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{i}}}"), arg.as_ref());
    }
    out
}
