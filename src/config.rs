//! Synthesis configuration

use entrysynth_core::lang::synthetic::{self, SyntheticNameId};

use crate::symbols::Accessibility;

/// Knobs for entry-point synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisConfig {
    /// Declared accessibility of every synthesized entry point
    pub accessibility: Accessibility,
    /// Name of the `object[]` parameter of a submission factory
    pub submission_parameter_name: String,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            accessibility: Accessibility::Private,
            submission_parameter_name: synthetic::as_str(SyntheticNameId::SubmissionArrayParameter).to_string(),
        }
    }
}

impl SynthesisConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entry-point accessibility
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Set the submission-array parameter name
    pub fn with_submission_parameter_name(mut self, name: impl Into<String>) -> Self {
        self.submission_parameter_name = name.into();
        self
    }
}
