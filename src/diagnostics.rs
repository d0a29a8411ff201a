//! Diagnostics issued during entry-point synthesis.
//!
//! Synthesized code has no source text, so most diagnostics here attach to [`Location::None`]. The
//! [`DiagnosticBag`] is append-only and may be shared by reference across threads; the synthesizer only ever
//! appends to it.

use std::fmt;

use entrysynth_core::lang::diagnostics::{self as codes, DiagnosticCodeId};
use parking_lot::Mutex;

/// Where a diagnostic points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Location {
    /// Sentinel for compiler-generated code with no source position.
    #[default]
    None,
    /// Byte range in a source file.
    Source { start: usize, end: usize },
}

impl Location {
    pub fn is_none(&self) -> bool {
        matches!(self, Location::None)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::None => write!(f, "<no location>"),
            Location::Source { start, end } => write!(f, "{}..{}", start, end),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Hidden,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Hidden => write!(f, "hidden"),
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic that has not been placed yet: code plus arguments.
///
/// Types carry one of these as their use-site diagnostic; it becomes a [`Diagnostic`] once reported at a location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiagnosticInfo {
    pub code: DiagnosticCodeId,
    pub args: Vec<String>,
}

impl DiagnosticInfo {
    pub fn new(code: DiagnosticCodeId, args: Vec<String>) -> Self {
        Self { code, args }
    }

    pub fn at(&self, location: Location) -> Diagnostic {
        Diagnostic::new(self.code, location, self.args.clone())
    }
}

/// A placed diagnostic record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub code: DiagnosticCodeId,
    pub severity: Severity,
    pub location: Location,
    pub args: Vec<String>,
}

impl Diagnostic {
    /// Create an error-severity diagnostic.
    pub fn new(code: DiagnosticCodeId, location: Location, args: Vec<String>) -> Self {
        Self {
            code,
            severity: Severity::Error,
            location,
            args,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Numeric code, e.g. `E0656`.
    pub fn code_str(&self) -> &'static str {
        codes::code(self.code)
    }

    /// Rendered message text.
    pub fn message(&self) -> String {
        codes::render(self.code, self.args.as_slice())
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.severity, self.code_str(), self.message())?;
        if !self.location.is_none() {
            write!(f, " (at {})", self.location)?;
        }
        Ok(())
    }
}

/// Append-only, ordered diagnostics sink.
///
/// Appends take `&self` so one bag can be handed to several independent passes.
#[derive(Debug, Default)]
pub struct DiagnosticBag {
    records: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an error-severity diagnostic.
    pub fn add(&self, code: DiagnosticCodeId, location: Location, args: Vec<String>) {
        self.push(Diagnostic::new(code, location, args));
    }

    /// Append an already-built diagnostic.
    pub fn push(&self, diagnostic: Diagnostic) {
        tracing::debug!(code = diagnostic.code_str(), message = %diagnostic.message(), "diagnostic reported");
        self.records.lock().push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.records.lock().iter().any(Diagnostic::is_error)
    }

    /// Copy of the records appended so far, in order.
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.records.lock().clone()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.records.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_and_message() {
        let diag = Diagnostic::new(
            DiagnosticCodeId::MissingPredefinedMember,
            Location::None,
            vec!["MyTask".into(), "GetAwaiter".into()],
        );
        assert_eq!(
            diag.to_string(),
            "error E0656: Missing compiler required member 'MyTask.GetAwaiter'"
        );
    }

    #[test]
    fn display_appends_source_location() {
        let diag = Diagnostic::new(
            DiagnosticCodeId::BogusType,
            Location::Source { start: 4, end: 9 },
            vec!["Broken".into()],
        )
        .with_severity(Severity::Warning);
        assert!(diag.to_string().starts_with("warning E0648"));
        assert!(diag.to_string().ends_with("(at 4..9)"));
    }

    #[test]
    fn bag_preserves_append_order() {
        let bag = DiagnosticBag::new();
        bag.add(DiagnosticCodeId::BogusType, Location::None, vec!["A".into()]);
        bag.add(DiagnosticCodeId::BogusType, Location::None, vec!["B".into()]);
        let args: Vec<_> = bag.into_vec().into_iter().map(|d| d.args[0].clone()).collect();
        assert_eq!(args, vec!["A", "B"]);
    }

    #[test]
    fn bag_accepts_concurrent_appends() {
        let bag = DiagnosticBag::new();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..25 {
                        bag.add(DiagnosticCodeId::BogusType, Location::None, vec!["T".into()]);
                    }
                });
            }
        });
        assert_eq!(bag.len(), 100);
        assert!(bag.has_errors());
    }
}
