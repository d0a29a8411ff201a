//! `<Factory>` running one interactive submission.
//!
//! ```text
//! static T <Factory>(object[] submissionArray)
//! {
//!     var submission = new Submission#N(submissionArray);
//!     return submission.<Initialize>();
//! }
//! ```
//!
//! No await: the host unwraps whatever the initializer returns.

use super::awaitable::{parameterless_call, report_use_site_diagnostics};
use super::errors::{EntryPointError, SUBMISSION};
use crate::bound::{BoundBlock, BoundExpr, BoundStmt, LocalSymbol, Synthesized};
use crate::config::SynthesisConfig;
use crate::diagnostics::DiagnosticBag;
use crate::symbols::{MethodId, NamedTypeKind, ParameterSymbol, SpecialType, TypeEnvironment, TypeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionEntryPoint {
    pub submission_class: TypeId,
    pub initializer: MethodId,
    /// The single `object[]` parameter.
    pub parameter: ParameterSymbol,
    /// Declared return type of the initializer.
    pub return_type: TypeId,
    /// Whether `object[]` carried a use-site error.
    pub parameter_type_has_errors: bool,
}

impl SubmissionEntryPoint {
    #[tracing::instrument(skip_all, fields(submission = %env.display_name(submission_class)))]
    pub fn new(
        env: &dyn TypeEnvironment,
        submission_class: TypeId,
        config: &SynthesisConfig,
        diagnostics: &DiagnosticBag,
    ) -> Result<Self, EntryPointError> {
        if env.type_symbol(submission_class).named_kind() != Some(NamedTypeKind::Submission) {
            return Err(EntryPointError::internal(
                SUBMISSION,
                format!("`{}` is not a submission class", env.display_name(submission_class)),
            ));
        }
        let initializer = env
            .script_initializer(submission_class)
            .ok_or_else(|| EntryPointError::missing(SUBMISSION, "submission initializer"))?;

        let return_type = env.method(initializer).return_type;
        if env.type_symbol(return_type).is_void() {
            return Err(EntryPointError::internal(SUBMISSION, "submission initializer returns void"));
        }

        let object = env.special_type(SpecialType::Object);
        let array = env
            .array_type(object)
            .ok_or_else(|| EntryPointError::missing(SUBMISSION, "object[] type"))?;
        let parameter_type_has_errors = report_use_site_diagnostics(env, array, diagnostics);

        Ok(Self {
            submission_class,
            initializer,
            parameter: ParameterSymbol {
                name: config.submission_parameter_name.clone(),
                ty: array,
                ordinal: 0,
            },
            return_type,
            parameter_type_has_errors,
        })
    }

    pub fn is_viable(&self) -> bool {
        !self.parameter_type_has_errors
    }

    /// Two statements: construct from the prior submissions, return the initializer's value.
    pub fn create_body(&self, env: &dyn TypeEnvironment) -> Result<Synthesized<BoundBlock>, EntryPointError> {
        if self.parameter_type_has_errors {
            return Err(EntryPointError::missing(SUBMISSION, "usable object[] type"));
        }
        let ctor = env
            .script_constructor(self.submission_class)
            .filter(|&c| env.method(c).parameters.len() == 1)
            .ok_or_else(|| EntryPointError::missing(SUBMISSION, "single-argument submission constructor"))?;
        let initializer = env.method(self.initializer);
        if !initializer.parameters.is_empty() {
            return Err(EntryPointError::internal(SUBMISSION, "submission initializer takes parameters"));
        }

        let submission_local = LocalSymbol::temp(0, self.submission_class);

        // submission = new Submission#N(submissionArray);
        let construct = BoundExpr::assignment(
            BoundExpr::local(submission_local.clone()),
            BoundExpr::object_creation(
                ctor,
                vec![BoundExpr::parameter(&self.parameter)],
                self.submission_class,
            ),
        );

        // return submission.<Initialize>();
        let initialize = parameterless_call(
            BoundExpr::local(submission_local.clone()),
            self.initializer,
            initializer.return_type,
        );
        if initialize.ty != self.return_type {
            return Err(EntryPointError::internal(
                SUBMISSION,
                format!(
                    "initializer returns `{}` but the factory returns `{}`",
                    env.display_name(initialize.ty),
                    env.display_name(self.return_type)
                ),
            ));
        }

        Ok(Synthesized::new(BoundBlock::new(
            vec![submission_local],
            vec![BoundStmt::Expression(construct), BoundStmt::Return(Some(initialize))],
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{MethodSignature, TypeTable};

    #[test]
    fn void_initializer_is_a_defect() {
        let mut table = TypeTable::new();
        let void = table.special_type(SpecialType::Void);
        let sub = table.define_type("Submission#0", NamedTypeKind::Submission, None);
        table.define_method(sub, MethodSignature::initializer(void));
        let bag = DiagnosticBag::new();

        let err = SubmissionEntryPoint::new(&table, sub, &SynthesisConfig::default(), &bag).unwrap_err();
        assert!(matches!(err, EntryPointError::InternalConsistency { .. }));
        assert!(bag.is_empty());
    }

    #[test]
    fn return_type_drift_is_caught_when_building_the_body() {
        let mut table = TypeTable::with_platform_tasks();
        let void = table.special_type(SpecialType::Void);
        let object = table.special_type(SpecialType::Object);
        let objects = table.array_of(object);
        let task_object = table.task_of(object);
        let sub = table.define_type("Submission#0", NamedTypeKind::Submission, None);
        table.define_method(sub, MethodSignature::constructor(void).with_parameter("submissionArray", objects));
        table.define_method(sub, MethodSignature::initializer(task_object));
        let bag = DiagnosticBag::new();

        let mut entry = SubmissionEntryPoint::new(&table, sub, &SynthesisConfig::default(), &bag).expect("factory");
        assert!(entry.create_body(&table).is_ok());

        entry.return_type = object;
        let err = entry.create_body(&table).unwrap_err();
        assert!(err.to_string().contains("initializer returns `Task<object>` but the factory returns `object`"));
    }

    #[test]
    fn missing_constructor_is_a_prerequisite_failure() {
        let mut table = TypeTable::new();
        let object = table.special_type(SpecialType::Object);
        let sub = table.define_type("Submission#1", NamedTypeKind::Submission, None);
        table.define_method(sub, MethodSignature::initializer(object));
        let bag = DiagnosticBag::new();

        let entry = SubmissionEntryPoint::new(&table, sub, &SynthesisConfig::default(), &bag).expect("factory");
        assert_eq!(
            entry.create_body(&table),
            Err(EntryPointError::missing(SUBMISSION, "single-argument submission constructor"))
        );
    }
}
