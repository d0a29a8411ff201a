//! CLI module for the entry-point synthesizer
//!
//! ## Commands
//!
//! - `synthesize <manifest.json>` - Synthesize the entry point and print it
//! - `check <manifest.json>` - Report synthesis diagnostics only
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::SynthesisConfig;
use crate::symbols::Accessibility;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Compiler-synthesized entry points
#[derive(Parser, Debug)]
#[command(name = "entrysynth")]
#[command(version = VERSION)]
#[command(about = "Synthesize program entry points for async mains, scripts and submissions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Synthesize the entry point and print its signature and body
    Synthesize {
        /// Compilation manifest (JSON)
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,
        /// Declared accessibility of the synthesized entry point
        #[arg(long, value_enum, default_value_t = AccessibilityArg::Private)]
        accessibility: AccessibilityArg,
        /// Name of the submission factory's array parameter
        #[arg(long, value_name = "NAME")]
        submission_parameter: Option<String>,
    },

    /// Report synthesis diagnostics without printing the entry point
    Check {
        /// Compilation manifest (JSON)
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,
    },
}

/// `--accessibility` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AccessibilityArg {
    Private,
    Internal,
    Protected,
    Public,
}

impl From<AccessibilityArg> for Accessibility {
    fn from(arg: AccessibilityArg) -> Self {
        match arg {
            AccessibilityArg::Private => Accessibility::Private,
            AccessibilityArg::Internal => Accessibility::Internal,
            AccessibilityArg::Protected => Accessibility::Protected,
            AccessibilityArg::Public => Accessibility::Public,
        }
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Synthesize {
            manifest,
            accessibility,
            submission_parameter,
        } => {
            let mut config = SynthesisConfig::new().with_accessibility(accessibility.into());
            if let Some(name) = submission_parameter {
                config = config.with_submission_parameter_name(name);
            }
            commands::synthesize(&manifest, &config)
        }
        Command::Check { manifest } => commands::check(&manifest),
    }
}

// ============================================================================
// Tests
// ============================================================================
