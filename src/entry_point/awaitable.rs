//! Awaitable protocol resolution.
//!
//! An expression of type `T` can be synchronously unwrapped when
//! 1. `T` (or its nearest base declaring the name) has exactly one zero-parameter method `GetAwaiter`, and
//! 2. the return type of that method, looked up the same way, has exactly one zero-parameter method `GetResult`.
//!
//! Resolution is purely structural. Anything else (no candidate, several candidates, a field, a method with
//! parameters) is reported once as a missing predefined member and resolution stops.

use entrysynth_core::lang::diagnostics::DiagnosticCodeId;
use entrysynth_core::lang::members::{self, WellKnownMemberId};

use crate::bound::BoundExpr;
use crate::diagnostics::{DiagnosticBag, Location};
use crate::symbols::{Member, MethodId, TypeEnvironment, TypeId};

/// The resolved `GetAwaiter` / `GetResult` pair for one future-like type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AwaitProtocol {
    pub get_awaiter: MethodId,
    pub get_result: MethodId,
    /// Type of `GetAwaiter()`
    pub awaiter_type: TypeId,
    /// Type of `GetResult()`; `void` for a future without a value
    pub result_type: TypeId,
}

impl AwaitProtocol {
    /// Wrap `awaited` as `awaited.GetAwaiter().GetResult()`.
    pub fn apply(&self, awaited: BoundExpr) -> BoundExpr {
        let awaiter = parameterless_call(awaited, self.get_awaiter, self.awaiter_type);
        parameterless_call(awaiter, self.get_result, self.result_type)
    }
}

/// Resolve the awaitable protocol on `expression_type`.
///
/// Returns `None` after appending at most one diagnostic. An error type resolves to `None` silently; its problem was
/// reported where it was produced.
#[tracing::instrument(skip_all, fields(ty = %env.display_name(expression_type)))]
pub fn resolve_await_protocol(
    env: &dyn TypeEnvironment,
    expression_type: TypeId,
    diagnostics: &DiagnosticBag,
) -> Option<AwaitProtocol> {
    if env.type_symbol(expression_type).is_error() {
        tracing::debug!("awaited expression has an error type; skipping protocol resolution");
        return None;
    }

    let get_awaiter = get_required_method(
        env,
        expression_type,
        WellKnownMemberId::GetAwaiter,
        diagnostics,
        Location::None,
    )?;
    let awaiter_type = env.method(get_awaiter).return_type;

    let get_result = get_required_method(env, awaiter_type, WellKnownMemberId::GetResult, diagnostics, Location::None)?;
    let result_type = env.method(get_result).return_type;

    tracing::debug!(
        awaiter = %env.display_name(awaiter_type),
        result = %env.display_name(result_type),
        "await protocol resolved"
    );
    Some(AwaitProtocol {
        get_awaiter,
        get_result,
        awaiter_type,
        result_type,
    })
}

/// Find the single zero-parameter method `member` on `ty` or its nearest base declaring it, or report it missing.
///
/// Reports `MissingPredefinedMember(ty, member)` at `location` and returns `None` unless the nearest declaring type has
/// exactly one member with that name and it is a method without parameters.
pub fn get_required_method(
    env: &dyn TypeEnvironment,
    ty: TypeId,
    member: WellKnownMemberId,
    diagnostics: &DiagnosticBag,
    location: Location,
) -> Option<MethodId> {
    let name = members::as_str(member);
    let found = env
        .lookup_member_in_hierarchy(ty, name)
        .map(|(_, found)| found)
        .unwrap_or_default();

    let method = match found.as_slice() {
        [Member::Method(id)] if env.method(*id).parameters.is_empty() => Some(*id),
        _ => None,
    };

    if method.is_none() {
        tracing::debug!(candidates = found.len(), member = name, "required member not usable");
        diagnostics.add(
            DiagnosticCodeId::MissingPredefinedMember,
            location,
            vec![env.display_name(ty), name.to_string()],
        );
    }
    method
}

/// Report the use-site diagnostic of `ty`, if any, at the no-location sentinel.
///
/// Returns `true` when something was reported.
pub fn report_use_site_diagnostics(env: &dyn TypeEnvironment, ty: TypeId, diagnostics: &DiagnosticBag) -> bool {
    match env.use_site_diagnostic(ty) {
        Some(info) => {
            diagnostics.push(info.at(Location::None));
            true
        }
        None => false,
    }
}

/// `receiver.method()` typed as `ty`.
pub(crate) fn parameterless_call(receiver: BoundExpr, method: MethodId, ty: TypeId) -> BoundExpr {
    BoundExpr::call(Some(receiver), method, Vec::new(), ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{MethodSignature, NamedTypeKind, SpecialType, TypeTable};

    fn missing_member_args(bag: DiagnosticBag) -> Vec<Vec<String>> {
        bag.into_vec().into_iter().map(|d| d.args).collect()
    }

    #[test]
    fn resolves_generic_task() {
        let mut table = TypeTable::with_platform_tasks();
        let int = table.special_type(SpecialType::Int32);
        let task_int = table.task_of(int);
        let bag = DiagnosticBag::new();

        let protocol = resolve_await_protocol(&table, task_int, &bag).expect("protocol");
        assert_eq!(protocol.result_type, int);
        assert_eq!(table.display_name(protocol.awaiter_type), "TaskAwaiter<int>");
        assert!(bag.is_empty());
    }

    #[test]
    fn missing_get_awaiter_reports_future_type() {
        let mut table = TypeTable::new();
        let future = table.define_class("MyFuture");
        let bag = DiagnosticBag::new();

        assert!(resolve_await_protocol(&table, future, &bag).is_none());
        assert_eq!(missing_member_args(bag), vec![vec!["MyFuture".to_string(), "GetAwaiter".to_string()]]);
    }

    #[test]
    fn missing_get_result_reports_awaiter_type() {
        let mut table = TypeTable::new();
        let awaiter = table.define_struct("MyAwaiter");
        let future = table.define_class("MyFuture");
        table.define_method(future, MethodSignature::ordinary("GetAwaiter", awaiter));
        let bag = DiagnosticBag::new();

        assert!(resolve_await_protocol(&table, future, &bag).is_none());
        assert_eq!(missing_member_args(bag), vec![vec!["MyAwaiter".to_string(), "GetResult".to_string()]]);
    }

    #[test]
    fn ambiguous_or_parameterized_members_are_missing() {
        let mut table = TypeTable::new();
        let int = table.special_type(SpecialType::Int32);
        let awaiter = table.define_struct("Awaiter");
        let twice = table.define_class("Twice");
        table.define_method(twice, MethodSignature::ordinary("GetAwaiter", awaiter));
        table.define_method(twice, MethodSignature::ordinary("GetAwaiter", awaiter));
        let takes_arg = table.define_class("TakesArg");
        table.define_method(
            takes_arg,
            MethodSignature::ordinary("GetAwaiter", awaiter).with_parameter("x", int),
        );
        let field = table.define_class("Field");
        table.define_field(field, "GetAwaiter", awaiter);

        for ty in [twice, takes_arg, field] {
            let bag = DiagnosticBag::new();
            assert!(resolve_await_protocol(&table, ty, &bag).is_none());
            assert_eq!(bag.len(), 1);
        }
    }

    #[test]
    fn inherited_get_awaiter_is_found_on_the_base() {
        let mut table = TypeTable::with_platform_tasks();
        let task = table.define_platform_tasks().task;
        let derived = table.define_type("MyTask", NamedTypeKind::Class, Some(task));
        let bag = DiagnosticBag::new();

        let protocol = resolve_await_protocol(&table, derived, &bag).expect("protocol");
        assert!(table.type_symbol(protocol.result_type).is_void());
        assert!(bag.is_empty());
    }

    #[test]
    fn derived_declaration_hides_the_base_one() {
        let mut table = TypeTable::with_platform_tasks();
        let int = table.special_type(SpecialType::Int32);
        let task = table.define_platform_tasks().task;
        let derived = table.define_type("MyTask", NamedTypeKind::Class, Some(task));
        let awaiter = table.define_struct("MyAwaiter");
        table.define_method(
            derived,
            MethodSignature::ordinary("GetAwaiter", awaiter).with_parameter("token", int),
        );
        let bag = DiagnosticBag::new();

        assert!(resolve_await_protocol(&table, derived, &bag).is_none());
        assert_eq!(missing_member_args(bag), vec![vec!["MyTask".to_string(), "GetAwaiter".to_string()]]);
    }

    #[test]
    fn error_type_resolves_silently() {
        let table = TypeTable::new();
        let bag = DiagnosticBag::new();
        assert!(resolve_await_protocol(&table, table.error_type(), &bag).is_none());
        assert!(bag.is_empty());
    }

    #[test]
    fn apply_chains_get_awaiter_and_get_result() {
        let mut table = TypeTable::with_platform_tasks();
        let int = table.special_type(SpecialType::Int32);
        let task_int = table.task_of(int);
        let program = table.define_class("Program");
        let main = table.define_method(program, MethodSignature::ordinary("Main", task_int).as_static());
        let bag = DiagnosticBag::new();
        let protocol = resolve_await_protocol(&table, task_int, &bag).expect("protocol");

        let expr = protocol.apply(BoundExpr::call(None, main, vec![], task_int));
        assert_eq!(expr.ty, int);
        assert_eq!(
            crate::bound::render::render_expr(&table, &expr),
            "Program.Main().GetAwaiter().GetResult()"
        );
    }
}
