//! Parameterless `<Main>` running a script class.
//!
//! ```text
//! static void <Main>()
//! {
//!     var script = new Script();
//!     script.<Initialize>().GetAwaiter().GetResult();
//! }
//! ```
//!
//! The await protocol is resolved once, against the platform `Task` type, when the entry point is created. The
//! initializer returns `Task` or `Task<T>`; both inherit `Task.GetAwaiter`.

use super::awaitable::{AwaitProtocol, parameterless_call, report_use_site_diagnostics, resolve_await_protocol};
use super::errors::{EntryPointError, SCRIPT};
use crate::bound::{BoundBlock, BoundExpr, BoundStmt, LocalSymbol, Synthesized};
use crate::diagnostics::DiagnosticBag;
use crate::symbols::{MethodId, NamedTypeKind, SpecialType, TypeEnvironment, TypeId, WellKnownType};

/// Script entry point state resolved at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptEntryPoint {
    pub script_class: TypeId,
    pub initializer: MethodId,
    /// `Task.GetAwaiter` / `TaskAwaiter.GetResult`; `None` when `Task` is missing or malformed.
    pub protocol: Option<AwaitProtocol>,
    /// Always `void`.
    pub return_type: TypeId,
}

impl ScriptEntryPoint {
    #[tracing::instrument(skip_all, fields(script = %env.display_name(script_class)))]
    pub fn new(
        env: &dyn TypeEnvironment,
        script_class: TypeId,
        diagnostics: &DiagnosticBag,
    ) -> Result<Self, EntryPointError> {
        if env.type_symbol(script_class).named_kind() != Some(NamedTypeKind::Script) {
            return Err(EntryPointError::internal(
                SCRIPT,
                format!("`{}` is not a script class", env.display_name(script_class)),
            ));
        }
        let initializer = env
            .script_initializer(script_class)
            .ok_or_else(|| EntryPointError::missing(SCRIPT, "script initializer"))?;

        let task = env.well_known_type(WellKnownType::Task);
        let task_is_error = env.type_symbol(task).is_error();
        let init_return = env.method(initializer).return_type;
        if !task_is_error && !env.is_derived_from(init_return, task) {
            return Err(EntryPointError::internal(
                SCRIPT,
                format!(
                    "script initializer returns `{}`, which does not derive from `{}`",
                    env.display_name(init_return),
                    env.display_name(task)
                ),
            ));
        }

        report_use_site_diagnostics(env, task, diagnostics);
        // An error-typed Task resolves to no protocol without further diagnostics.
        let protocol = resolve_await_protocol(env, task, diagnostics);

        Ok(Self {
            script_class,
            initializer,
            protocol,
            return_type: env.special_type(SpecialType::Void),
        })
    }

    pub fn is_viable(&self) -> bool {
        self.protocol.is_some()
    }

    /// One local, three statements: construct, run the initializer to completion, `return;`.
    pub fn create_body(&self, env: &dyn TypeEnvironment) -> Result<Synthesized<BoundBlock>, EntryPointError> {
        let protocol = self
            .protocol
            .ok_or_else(|| EntryPointError::missing(SCRIPT, "await protocol"))?;
        let ctor = env
            .script_constructor(self.script_class)
            .filter(|&c| env.method(c).parameters.is_empty())
            .ok_or_else(|| EntryPointError::missing(SCRIPT, "parameterless script constructor"))?;
        let initializer = env.method(self.initializer);
        if !initializer.parameters.is_empty() {
            return Err(EntryPointError::internal(SCRIPT, "script initializer takes parameters"));
        }

        let script_local = LocalSymbol::temp(0, self.script_class);

        // script = new Script();
        let construct = BoundExpr::assignment(
            BoundExpr::local(script_local.clone()),
            BoundExpr::object_creation(ctor, Vec::new(), self.script_class),
        );

        // script.<Initialize>().GetAwaiter().GetResult();
        let init_call = parameterless_call(
            BoundExpr::local(script_local.clone()),
            self.initializer,
            initializer.return_type,
        );
        let run = protocol.apply(init_call);

        Ok(Synthesized::new(BoundBlock::new(
            vec![script_local],
            vec![
                BoundStmt::Expression(construct),
                BoundStmt::Expression(run),
                BoundStmt::Return(None),
            ],
        )))
    }
}
