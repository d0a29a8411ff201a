//! The method-like façade over synthesized entry points.
//!
//! Downstream stages (emission, diagnostics suppression) see user methods and synthesized entry points through the
//! same [`MethodLike`] trait. The only thing that tells them apart is [`MethodLike::is_implicitly_declared`].

use std::slice;

use entrysynth_core::lang::synthetic::{self, SyntheticNameId};

use super::errors::EntryPointError;
use super::forwarder::AsyncForwardEntryPoint;
use super::script::ScriptEntryPoint;
use super::selector::EntryPointStrategy;
use super::submission::SubmissionEntryPoint;
use crate::bound::{BoundBlock, Synthesized};
use crate::config::SynthesisConfig;
use crate::diagnostics::{DiagnosticBag, Location};
use crate::symbols::{
    Accessibility, CallingConvention, CustomModifier, MarshallingInfo, MethodId, MethodKind, MethodSymbol,
    ParameterSymbol, SecurityAttribute, TypeEnvironment, TypeId,
};

/// Uniform view of anything that behaves like a method.
pub trait MethodLike {
    fn name(&self) -> &str;
    fn containing_type(&self) -> TypeId;
    fn parameters(&self) -> &[ParameterSymbol];
    fn return_type(&self) -> TypeId;
    fn declared_accessibility(&self) -> Accessibility;
    fn method_kind(&self) -> MethodKind;
    fn is_static(&self) -> bool;
    fn is_async(&self) -> bool;
    fn is_virtual(&self) -> bool;
    fn is_implicitly_declared(&self) -> bool;
    fn locations(&self) -> &[Location];

    fn parameter_count(&self) -> usize {
        self.parameters().len()
    }

    fn returns_void(&self, env: &dyn TypeEnvironment) -> bool {
        env.type_symbol(self.return_type()).is_void()
    }

    fn is_abstract(&self) -> bool {
        false
    }

    fn is_override(&self) -> bool {
        false
    }

    fn is_extern(&self) -> bool {
        false
    }

    fn is_sealed(&self) -> bool {
        false
    }

    fn is_vararg(&self) -> bool {
        self.calling_convention() == CallingConvention::VarArgs
    }

    fn type_parameters(&self) -> &[TypeId] {
        &[]
    }

    fn arity(&self) -> usize {
        self.type_parameters().len()
    }

    fn return_type_custom_modifiers(&self) -> &[CustomModifier] {
        &[]
    }

    /// Conditional-compilation symbols from `[Conditional]` attributes.
    fn applied_conditional_symbols(&self) -> &[String] {
        &[]
    }

    fn explicit_interface_implementations(&self) -> &[MethodId] {
        &[]
    }

    fn return_value_marshalling(&self) -> Option<&MarshallingInfo> {
        None
    }

    /// Metadata `specialname` flag.
    fn has_special_name(&self) -> bool {
        false
    }

    /// Whether sequence points are emitted for the body.
    fn generate_debug_info(&self) -> bool {
        true
    }

    fn calling_convention(&self) -> CallingConvention {
        CallingConvention::Default
    }

    /// Offset of `position` from the start of the method's local-variable scope.
    fn calculate_local_syntax_offset(&self, position: usize) -> Result<usize, EntryPointError>;

    /// Declarative security attributes to emit.
    fn security_information(&self) -> Result<Vec<SecurityAttribute>, EntryPointError>;
}

impl MethodLike for MethodSymbol {
    fn name(&self) -> &str {
        &self.name
    }

    fn containing_type(&self) -> TypeId {
        self.containing_type
    }

    fn parameters(&self) -> &[ParameterSymbol] {
        &self.parameters
    }

    fn return_type(&self) -> TypeId {
        self.return_type
    }

    fn declared_accessibility(&self) -> Accessibility {
        self.accessibility
    }

    fn method_kind(&self) -> MethodKind {
        self.kind
    }

    fn is_static(&self) -> bool {
        self.is_static
    }

    fn is_async(&self) -> bool {
        self.is_async
    }

    fn is_virtual(&self) -> bool {
        self.is_virtual
    }

    fn is_implicitly_declared(&self) -> bool {
        false
    }

    fn locations(&self) -> &[Location] {
        &self.locations
    }

    fn calculate_local_syntax_offset(&self, position: usize) -> Result<usize, EntryPointError> {
        self.locations
            .iter()
            .find_map(|loc| match *loc {
                Location::Source { start, end } if (start..=end).contains(&position) => Some(position - start),
                _ => None,
            })
            .ok_or(EntryPointError::Unsupported {
                operation: "calculate_local_syntax_offset",
            })
    }

    fn security_information(&self) -> Result<Vec<SecurityAttribute>, EntryPointError> {
        Ok(Vec::new())
    }
}

/// The three closed entry-point shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryPointVariant {
    AsyncForward(AsyncForwardEntryPoint),
    Script(ScriptEntryPoint),
    Submission(SubmissionEntryPoint),
}

/// A compiler-synthesized entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedEntryPoint {
    containing_type: TypeId,
    accessibility: Accessibility,
    variant: EntryPointVariant,
}

impl SynthesizedEntryPoint {
    /// Resolve everything `strategy` needs. Protocol problems go to `diagnostics`; check
    /// [`is_viable`](Self::is_viable) before building the body.
    pub fn create(
        env: &dyn TypeEnvironment,
        strategy: EntryPointStrategy,
        config: &SynthesisConfig,
        diagnostics: &DiagnosticBag,
    ) -> Result<Self, EntryPointError> {
        let (containing_type, variant) = match strategy {
            EntryPointStrategy::Forwarder { user_main } => (
                env.method(user_main).containing_type,
                EntryPointVariant::AsyncForward(AsyncForwardEntryPoint::new(env, user_main, diagnostics)?),
            ),
            EntryPointStrategy::ScriptInitializer { script_class } => (
                script_class,
                EntryPointVariant::Script(ScriptEntryPoint::new(env, script_class, diagnostics)?),
            ),
            EntryPointStrategy::SubmissionFactory { submission_class } => (
                submission_class,
                EntryPointVariant::Submission(SubmissionEntryPoint::new(
                    env,
                    submission_class,
                    config,
                    diagnostics,
                )?),
            ),
        };
        Ok(Self {
            containing_type,
            accessibility: config.accessibility,
            variant,
        })
    }

    pub fn variant(&self) -> &EntryPointVariant {
        &self.variant
    }

    /// Whether every prerequisite resolved, so [`create_body`](Self::create_body) may be called.
    pub fn is_viable(&self) -> bool {
        match &self.variant {
            EntryPointVariant::AsyncForward(f) => f.is_viable(),
            EntryPointVariant::Script(s) => s.is_viable(),
            EntryPointVariant::Submission(s) => s.is_viable(),
        }
    }

    pub fn create_body(&self, env: &dyn TypeEnvironment) -> Result<Synthesized<BoundBlock>, EntryPointError> {
        match &self.variant {
            EntryPointVariant::AsyncForward(f) => f.create_body(env),
            EntryPointVariant::Script(s) => s.create_body(env),
            EntryPointVariant::Submission(s) => s.create_body(env),
        }
    }
}

impl MethodLike for SynthesizedEntryPoint {
    fn name(&self) -> &str {
        match self.variant {
            EntryPointVariant::Submission(_) => synthetic::as_str(SyntheticNameId::Factory),
            EntryPointVariant::AsyncForward(_) | EntryPointVariant::Script(_) => {
                synthetic::as_str(SyntheticNameId::Main)
            }
        }
    }

    fn containing_type(&self) -> TypeId {
        self.containing_type
    }

    fn parameters(&self) -> &[ParameterSymbol] {
        match &self.variant {
            EntryPointVariant::AsyncForward(f) => &f.parameters,
            EntryPointVariant::Script(_) => &[],
            EntryPointVariant::Submission(s) => slice::from_ref(&s.parameter),
        }
    }

    fn return_type(&self) -> TypeId {
        match &self.variant {
            EntryPointVariant::AsyncForward(f) => f.return_type,
            EntryPointVariant::Script(s) => s.return_type,
            EntryPointVariant::Submission(s) => s.return_type,
        }
    }

    fn declared_accessibility(&self) -> Accessibility {
        self.accessibility
    }

    fn method_kind(&self) -> MethodKind {
        MethodKind::Ordinary
    }

    fn is_static(&self) -> bool {
        true
    }

    fn is_async(&self) -> bool {
        false
    }

    fn is_virtual(&self) -> bool {
        false
    }

    fn is_implicitly_declared(&self) -> bool {
        true
    }

    fn locations(&self) -> &[Location] {
        &[]
    }

    fn has_special_name(&self) -> bool {
        true
    }

    fn generate_debug_info(&self) -> bool {
        false
    }

    fn calculate_local_syntax_offset(&self, _position: usize) -> Result<usize, EntryPointError> {
        Err(EntryPointError::Unsupported {
            operation: "calculate_local_syntax_offset",
        })
    }

    fn security_information(&self) -> Result<Vec<SecurityAttribute>, EntryPointError> {
        Err(EntryPointError::Unsupported {
            operation: "security_information",
        })
    }
}

/// `private static int <Main>(string[] args)`
pub fn render_signature(env: &dyn TypeEnvironment, method: &dyn MethodLike) -> String {
    let mut header = String::from(method.declared_accessibility().keyword());
    if method.is_static() {
        header.push_str(" static");
    }
    if method.is_async() {
        header.push_str(" async");
    }
    let params = method
        .parameters()
        .iter()
        .map(|p| format!("{} {}", env.display_name(p.ty), p.name))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} {} {}({})",
        header,
        env.display_name(method.return_type()),
        method.name(),
        params
    )
}
