//! Synchronous `<Main>` forwarding to an async user main.
//!
//! ```text
//! static T <Main>(string[] args) => UserMain(args).GetAwaiter().GetResult();
//! ```

use super::awaitable::resolve_await_protocol;
use super::errors::{EntryPointError, FORWARDER};
use crate::bound::{BoundBlock, BoundExpr, BoundStmt, Synthesized};
use crate::diagnostics::DiagnosticBag;
use crate::symbols::{MethodId, ParameterSymbol, SpecialType, TypeEnvironment, TypeId};

/// Forwarder state resolved at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncForwardEntryPoint {
    pub user_main: MethodId,
    /// Copies of the user main's parameters, owned by the entry point.
    pub parameters: Vec<ParameterSymbol>,
    /// `UserMain(args...)`
    pub invocation: BoundExpr,
    /// `UserMain(args...).GetAwaiter().GetResult()`; `None` when the await protocol did not resolve.
    pub get_result_call: Option<BoundExpr>,
    /// Type of the `GetResult` call, or the error type when the protocol did not resolve.
    pub return_type: TypeId,
}

impl AsyncForwardEntryPoint {
    /// Build the forwarded invocation and resolve the await protocol against its type.
    ///
    /// Protocol failures are reported to `diagnostics` and leave the forwarder non-viable. A user main with more than
    /// one parameter, a parameter other than `string[]`, or an instance main is a selector defect.
    #[tracing::instrument(skip_all, fields(user_main = %env.method(user_main).name))]
    pub fn new(
        env: &dyn TypeEnvironment,
        user_main: MethodId,
        diagnostics: &DiagnosticBag,
    ) -> Result<Self, EntryPointError> {
        let main = env.method(user_main);
        if main.parameters.len() > 1 {
            return Err(EntryPointError::internal(
                FORWARDER,
                format!("user main takes {} parameters; expected 0 or 1", main.parameters.len()),
            ));
        }
        if let [parameter] = main.parameters.as_slice() {
            let string_array = env.array_type(env.special_type(SpecialType::String));
            if string_array != Some(parameter.ty) {
                return Err(EntryPointError::internal(
                    FORWARDER,
                    format!(
                        "user main parameter `{}` has type `{}`; expected `string[]`",
                        parameter.name,
                        env.display_name(parameter.ty)
                    ),
                ));
            }
        }
        if !main.is_static {
            return Err(EntryPointError::internal(FORWARDER, "user main is not static"));
        }

        let parameters = main.parameters.clone();
        let arguments = parameters.iter().map(BoundExpr::parameter).collect();
        let invocation = BoundExpr::call(None, user_main, arguments, main.return_type);

        let protocol = resolve_await_protocol(env, invocation.ty, diagnostics);
        let get_result_call = protocol.map(|p| p.apply(invocation.clone()));
        let return_type = get_result_call.as_ref().map_or_else(|| env.error_type(), |call| call.ty);

        if get_result_call.is_some() {
            let result = env.type_symbol(return_type);
            if !result.is_void() && return_type != env.special_type(SpecialType::Int32) {
                tracing::debug!(
                    return_type = %result.name,
                    "async main returns neither void nor int; forwarding the value as-is"
                );
            }
        }

        Ok(Self {
            user_main,
            parameters,
            invocation,
            get_result_call,
            return_type,
        })
    }

    pub fn is_viable(&self) -> bool {
        self.get_result_call.is_some()
    }

    /// ```text
    /// { UserMain(args).GetAwaiter().GetResult(); return; }   // void
    /// { return UserMain(args).GetAwaiter().GetResult(); }    // T
    /// ```
    pub fn create_body(&self, env: &dyn TypeEnvironment) -> Result<Synthesized<BoundBlock>, EntryPointError> {
        let call = self
            .get_result_call
            .clone()
            .ok_or_else(|| EntryPointError::missing(FORWARDER, "await protocol"))?;

        let statements = if env.type_symbol(call.ty).is_void() {
            vec![BoundStmt::Expression(call), BoundStmt::Return(None)]
        } else {
            vec![BoundStmt::Return(Some(call))]
        };
        Ok(Synthesized::new(BoundBlock::new(Vec::new(), statements)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{MethodSignature, TypeTable};

    #[test]
    fn rejects_two_parameter_main() {
        let mut table = TypeTable::with_platform_tasks();
        let string_array = table.array_of(table.special_type(SpecialType::String));
        let int = table.special_type(SpecialType::Int32);
        let task = table.task_of(int);
        let program = table.define_class("Program");
        let main = table.define_method(
            program,
            MethodSignature::ordinary("Main", task)
                .with_parameter("a", string_array)
                .with_parameter("b", string_array)
                .as_static(),
        );
        let bag = DiagnosticBag::new();

        let err = AsyncForwardEntryPoint::new(&table, main, &bag).unwrap_err();
        assert!(matches!(err, EntryPointError::InternalConsistency { .. }));
        assert!(bag.is_empty());
    }

    #[test]
    fn rejects_non_string_array_parameter() {
        let mut table = TypeTable::with_platform_tasks();
        let int = table.special_type(SpecialType::Int32);
        let task = table.task_of(int);
        let program = table.define_class("Program");
        let main = table.define_method(
            program,
            MethodSignature::ordinary("Main", task).with_parameter("count", int).as_static(),
        );
        let bag = DiagnosticBag::new();

        let err = AsyncForwardEntryPoint::new(&table, main, &bag).unwrap_err();
        assert_eq!(
            err,
            EntryPointError::internal(FORWARDER, "user main parameter `count` has type `int`; expected `string[]`")
        );
        assert!(bag.is_empty());
    }

    #[test]
    fn non_viable_forwarder_refuses_to_build_a_body() {
        let mut table = TypeTable::new();
        let future = table.define_class("MyFuture");
        let program = table.define_class("Program");
        let main = table.define_method(program, MethodSignature::ordinary("Main", future).as_static());
        let bag = DiagnosticBag::new();

        let forwarder = AsyncForwardEntryPoint::new(&table, main, &bag).expect("forwarder");
        assert!(!forwarder.is_viable());
        assert_eq!(forwarder.return_type, table.error_type());
        assert_eq!(
            forwarder.create_body(&table),
            Err(EntryPointError::missing(FORWARDER, "await protocol"))
        );
    }
}
