//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::Path;

use crate::config::SynthesisConfig;
use crate::diagnostics::{Diagnostic, DiagnosticBag};
use crate::entry_point::{EntryPointError, select, synthesize_entry_point};
use crate::manifest::{LoadedCompilation, Manifest};

use super::{CliError, CliResult, ExitCode};

/// Outcome of running synthesis over one manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisReport {
    /// Whether the compilation needs a synthesized entry point at all
    pub needed: bool,
    /// Rendered signature and body, if an entry point was produced
    pub rendered: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl SynthesisReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Run synthesis over a loaded compilation.
pub fn run_synthesis(loaded: &LoadedCompilation, config: &SynthesisConfig) -> Result<SynthesisReport, EntryPointError> {
    let needed = select(&loaded.table, &loaded.kind, loaded.candidate).is_some();
    let bag = DiagnosticBag::new();
    let output = synthesize_entry_point(&loaded.table, &loaded.kind, loaded.candidate, config, &bag)?;
    Ok(SynthesisReport {
        needed,
        rendered: output.map(|o| o.render(&loaded.table)),
        diagnostics: bag.into_vec(),
    })
}

/// Synthesize and print the entry point for a manifest.
pub fn synthesize(path: &Path, config: &SynthesisConfig) -> CliResult<ExitCode> {
    let loaded = load(path)?;
    let report = run_synthesis(&loaded, config).map_err(synthesis_failure)?;
    print_diagnostics(&report.diagnostics);
    finish_synthesis(path, report)
}

/// Print the rendered entry point, or fail when one was needed but not produced.
fn finish_synthesis(path: &Path, report: SynthesisReport) -> CliResult<ExitCode> {
    match report.rendered {
        Some(text) => {
            print!("{}", text);
            Ok(ExitCode::SUCCESS)
        }
        None if report.needed => Err(CliError::failure(format!(
            "no entry point synthesized for {}",
            path.display()
        ))),
        None => {
            println!("no entry point synthesis needed");
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Report diagnostics only; non-zero exit when any error was reported.
pub fn check(path: &Path) -> CliResult<ExitCode> {
    let loaded = load(path)?;
    let report = run_synthesis(&loaded, &SynthesisConfig::default()).map_err(synthesis_failure)?;
    print_diagnostics(&report.diagnostics);

    let errors = report.diagnostics.iter().filter(|d| d.is_error()).count();
    if errors > 0 {
        return Err(CliError::failure(format!("{}: {} error(s)", path.display(), errors)));
    }
    if report.needed && report.rendered.is_none() {
        return Err(CliError::failure(format!("{}: entry point suppressed", path.display())));
    }
    println!("{}: ok", path.display());
    Ok(ExitCode::SUCCESS)
}

fn load(path: &Path) -> CliResult<LoadedCompilation> {
    Manifest::load(path)
        .and_then(|m| m.build())
        .map_err(|e| CliError::failure(format!("Error: {}", e)))
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{}", diagnostic);
    }
}

fn synthesis_failure(err: EntryPointError) -> CliError {
    CliError::failure(format!("{:?}", miette::Report::new(err)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entry_point::CompilationKind;
    use crate::symbols::{MethodSignature, TypeEnvironment, TypeTable};

    #[test]
    fn missing_manifest_is_a_cli_failure() {
        let err = check(Path::new("does/not/exist.json")).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.starts_with("Error: failed to read manifest"));
    }

    fn error_typed_async_main() -> LoadedCompilation {
        let mut table = TypeTable::with_platform_tasks();
        let error = table.error_type();
        let program = table.define_class("Program");
        let main = table.define_method(program, MethodSignature::ordinary("Main", error).as_static().as_async());
        LoadedCompilation {
            table,
            kind: CompilationKind::Regular,
            candidate: Some(main),
        }
    }

    #[test]
    fn suppressed_entry_point_without_diagnostics_still_fails() {
        let report = run_synthesis(&error_typed_async_main(), &SynthesisConfig::default()).unwrap();
        assert!(report.needed);
        assert!(report.rendered.is_none());
        assert!(report.diagnostics.is_empty());

        let err = finish_synthesis(Path::new("app.json"), report).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert_eq!(err.message, "no entry point synthesized for app.json");
    }

    #[test]
    fn unneeded_entry_point_succeeds() {
        let mut loaded = error_typed_async_main();
        loaded.candidate = None;
        let report = run_synthesis(&loaded, &SynthesisConfig::default()).unwrap();
        assert!(!report.needed);
        assert_eq!(finish_synthesis(Path::new("app.json"), report).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn synthesis_errors_render_with_their_code() {
        let err = synthesis_failure(EntryPointError::Unsupported {
            operation: "security_information",
        });
        assert!(err.message.contains("security_information"));
    }
}
