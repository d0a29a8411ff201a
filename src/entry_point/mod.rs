//! Entry-point synthesis.
//!
//! Given the compilation kind and the user's candidate `Main` (if any), decide whether a compiler-generated entry
//! point is needed and build it:
//!
//! - **Forwarder**: an `async` user main gets a synchronous `<Main>` that blocks on its result.
//! - **Script initializer**: a script gets a parameterless `<Main>` that constructs the script class and runs its
//!   `<Initialize>` to completion.
//! - **Submission factory**: an interactive submission gets `<Factory>(object[])`, which constructs the submission
//!   and returns its `<Initialize>` result.
//!
//! ## Errors
//!
//! User-facing problems (a future without `GetAwaiter`, a missing `Task` type) are appended to the
//! [`DiagnosticBag`]; the entry point is then not viable and no body is built. Misuse of the synthesizers by their
//! caller is an [`EntryPointError`].
//!
//! ## Examples
//! ```rust
//! use entrysynth::config::SynthesisConfig;
//! use entrysynth::diagnostics::DiagnosticBag;
//! use entrysynth::entry_point::{CompilationKind, MethodLike, synthesize_entry_point};
//! use entrysynth::symbols::{MethodSignature, SpecialType, TypeEnvironment, TypeTable};
//!
//! let mut table = TypeTable::with_platform_tasks();
//! let int = table.special_type(SpecialType::Int32);
//! let task_int = table.task_of(int);
//! let program = table.define_class("Program");
//! let main = table.define_method(program, MethodSignature::ordinary("Main", task_int).as_static().as_async());
//!
//! let bag = DiagnosticBag::new();
//! let output = synthesize_entry_point(&table, &CompilationKind::Regular, Some(main), &SynthesisConfig::default(), &bag)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(output.entry_point.name(), "<Main>");
//! assert_eq!(output.entry_point.return_type(), int);
//! ```

pub mod awaitable;
pub mod errors;
pub mod forwarder;
pub mod script;
pub mod selector;
pub mod submission;
pub mod symbol;

pub use awaitable::{AwaitProtocol, resolve_await_protocol};
pub use errors::EntryPointError;
pub use selector::{CompilationKind, EntryPointStrategy, select};
pub use symbol::{EntryPointVariant, MethodLike, SynthesizedEntryPoint, render_signature};

use crate::bound::render::{BodyWriter, write_block};
use crate::bound::{BoundBlock, Synthesized};
use crate::config::SynthesisConfig;
use crate::diagnostics::DiagnosticBag;
use crate::symbols::{MethodId, TypeEnvironment};

/// A synthesized entry point together with its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPointOutput {
    pub entry_point: SynthesizedEntryPoint,
    pub body: Synthesized<BoundBlock>,
}

impl EntryPointOutput {
    /// Render signature and body as C#-like text.
    pub fn render(&self, env: &dyn TypeEnvironment) -> String {
        let mut writer = BodyWriter::new();
        writer.line(&render_signature(env, &self.entry_point));
        write_block(&mut writer, env, &self.body);
        writer.finish()
    }
}

/// Select a strategy, resolve its prerequisites and build the body.
///
/// Returns `Ok(None)` when no entry point needs synthesizing, or when one does but diagnostics were reported that make
/// it unusable.
#[tracing::instrument(skip_all, fields(kind = ?kind))]
pub fn synthesize_entry_point(
    env: &dyn TypeEnvironment,
    kind: &CompilationKind,
    candidate: Option<MethodId>,
    config: &SynthesisConfig,
    diagnostics: &DiagnosticBag,
) -> Result<Option<EntryPointOutput>, EntryPointError> {
    let Some(strategy) = select(env, kind, candidate) else {
        tracing::debug!("no entry point synthesis needed");
        return Ok(None);
    };

    let entry_point = SynthesizedEntryPoint::create(env, strategy, config, diagnostics)?;
    if !entry_point.is_viable() {
        tracing::warn!(
            strategy = strategy.name(),
            diagnostics = diagnostics.len(),
            "entry point suppressed by protocol diagnostics"
        );
        return Ok(None);
    }

    let body = entry_point.create_body(env)?;
    tracing::debug!(
        name = entry_point.name(),
        return_type = %env.display_name(entry_point.return_type()),
        statements = body.statements.len(),
        "entry point synthesized"
    );
    Ok(Some(EntryPointOutput { entry_point, body }))
}
