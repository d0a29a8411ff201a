//! Entry variant selection.

use crate::symbols::{MethodId, TypeEnvironment, TypeId, WellKnownType};

/// What kind of compilation is asking for an entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompilationKind {
    /// An ordinary program; the user may have declared a `Main`.
    Regular,
    /// A script: top-level code compiled into `script_class`.
    Script { script_class: TypeId },
    /// One interactive submission compiled into `submission_class`.
    Submission { submission_class: TypeId },
}

/// The synthesis strategy chosen for a compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPointStrategy {
    /// Synchronous `<Main>` forwarding to an async user main.
    Forwarder { user_main: MethodId },
    /// Parameterless `<Main>` that runs a script class.
    ScriptInitializer { script_class: TypeId },
    /// `<Factory>` that runs one submission.
    SubmissionFactory { submission_class: TypeId },
}

impl EntryPointStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            EntryPointStrategy::Forwarder { .. } => "forwarder",
            EntryPointStrategy::ScriptInitializer { .. } => "script-initializer",
            EntryPointStrategy::SubmissionFactory { .. } => "submission-factory",
        }
    }
}

/// Choose the strategy for `kind` and the user's `candidate` main, if any.
///
/// Pure. Returns `None` for a regular compilation whose candidate is synchronous or absent: the user method is the
/// entry point as-is, or "no entry point" is reported elsewhere.
pub fn select(
    env: &dyn TypeEnvironment,
    kind: &CompilationKind,
    candidate: Option<MethodId>,
) -> Option<EntryPointStrategy> {
    let strategy = match *kind {
        CompilationKind::Submission { submission_class } => EntryPointStrategy::SubmissionFactory { submission_class },
        CompilationKind::Script { script_class } => EntryPointStrategy::ScriptInitializer { script_class },
        CompilationKind::Regular => {
            let user_main = candidate.filter(|&m| is_async_candidate(env, m))?;
            EntryPointStrategy::Forwarder { user_main }
        }
    };
    tracing::debug!(strategy = strategy.name(), "entry point strategy selected");
    Some(strategy)
}

/// Whether `method` needs a forwarder: declared `async`, or returning something derived from the platform `Task`.
pub fn is_async_candidate(env: &dyn TypeEnvironment, method: MethodId) -> bool {
    let symbol = env.method(method);
    if symbol.is_async {
        return true;
    }
    let task = env.well_known_type(WellKnownType::Task);
    !env.type_symbol(task).is_error() && env.is_derived_from(symbol.return_type, task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{MethodSignature, NamedTypeKind, SpecialType, TypeTable};

    #[test]
    fn submission_wins_regardless_of_candidate() {
        let mut table = TypeTable::new();
        let int = table.special_type(SpecialType::Int32);
        let sub = table.define_type("Submission#0", NamedTypeKind::Submission, None);
        let main = table.define_method(sub, MethodSignature::ordinary("Main", int).as_static());
        let kind = CompilationKind::Submission { submission_class: sub };

        assert_eq!(
            select(&table, &kind, Some(main)),
            Some(EntryPointStrategy::SubmissionFactory { submission_class: sub })
        );
        assert_eq!(
            select(&table, &kind, None),
            Some(EntryPointStrategy::SubmissionFactory { submission_class: sub })
        );
    }

    #[test]
    fn regular_selects_forwarder_only_for_async_candidates() {
        let mut table = TypeTable::with_platform_tasks();
        let int = table.special_type(SpecialType::Int32);
        let task_int = table.task_of(int);
        let program = table.define_class("Program");
        let sync_main = table.define_method(program, MethodSignature::ordinary("Main", int).as_static());
        let task_main = table.define_method(program, MethodSignature::ordinary("Main", task_int).as_static());
        let flagged = table.define_method(program, MethodSignature::ordinary("Main", int).as_static().as_async());

        assert_eq!(select(&table, &CompilationKind::Regular, Some(sync_main)), None);
        assert_eq!(select(&table, &CompilationKind::Regular, None), None);
        assert_eq!(
            select(&table, &CompilationKind::Regular, Some(task_main)),
            Some(EntryPointStrategy::Forwarder { user_main: task_main })
        );
        assert!(is_async_candidate(&table, flagged));
    }

    #[test]
    fn missing_task_type_never_marks_candidates_async() {
        let mut table = TypeTable::new();
        let program = table.define_class("Program");
        let future = table.define_class("MyFuture");
        let main = table.define_method(program, MethodSignature::ordinary("Main", future).as_static());
        assert!(!is_async_candidate(&table, main));
    }
}
