//! Bound symbols and the type/member lookup seam.
//!
//! The synthesizer never owns a binder. Everything it needs to know about types and members comes through the
//! [`TypeEnvironment`] trait; [`TypeTable`] is the in-memory implementation used by the CLI and the tests.
//!
//! ## Notes
//! - [`TypeEnvironment::lookup_member`] sees declared members only, in declaration order, so diagnostics are
//!   reproducible. [`TypeEnvironment::lookup_member_in_hierarchy`] walks base types and stops at the first type that
//!   declares the name.
//! - Implementations must be immutable during synthesis; independent compilations may share one table across threads.

mod table;
mod types;

pub use table::{TaskTypes, TypeTable};
pub use types::{
    Accessibility, CallingConvention, CustomModifier, MarshallingInfo, Member, MethodId, MethodKind,
    MethodSignature, MethodSymbol, NamedTypeKind, ParameterSymbol, SecurityAttribute, SpecialType, TypeId, TypeKind,
    TypeSymbol, WellKnownType,
};

use crate::diagnostics::DiagnosticInfo;

/// Type and member queries consumed by the entry-point synthesizer.
pub trait TypeEnvironment {
    /// Get a type by id.
    fn type_symbol(&self, ty: TypeId) -> &TypeSymbol;

    /// Get a method by id.
    fn method(&self, method: MethodId) -> &MethodSymbol;

    /// Declared members of `ty` named `name`, in declaration order.
    fn lookup_member(&self, ty: TypeId, name: &str) -> Vec<Member>;

    /// The built-in `special` type.
    fn special_type(&self, special: SpecialType) -> TypeId;

    /// A platform type by identity. Returns an error type (carrying a use-site diagnostic) when it is absent.
    fn well_known_type(&self, well_known: WellKnownType) -> TypeId;

    /// The shared error-marker type.
    fn error_type(&self) -> TypeId;

    /// The array type with `element` as element type, if the environment has one.
    fn array_type(&self, element: TypeId) -> Option<TypeId>;

    /// Display name of a type as it appears in diagnostics.
    fn display_name(&self, ty: TypeId) -> String {
        self.type_symbol(ty).name.clone()
    }

    /// Name of a member as spelled on a [`Member`].
    fn member_name(&self, member: &Member) -> String {
        match member {
            Member::Method(id) => self.method(*id).name.clone(),
            Member::Field { name, .. } => name.clone(),
        }
    }

    /// Members named `name` on the nearest type in `ty`'s base chain that declares any, with that type.
    ///
    /// A declaration on a derived type hides every base declaration of the same name.
    fn lookup_member_in_hierarchy(&self, ty: TypeId, name: &str) -> Option<(TypeId, Vec<Member>)> {
        let mut current = Some(ty);
        while let Some(id) = current {
            let found = self.lookup_member(id, name);
            if !found.is_empty() {
                return Some((id, found));
            }
            current = self.type_symbol(id).base_type();
        }
        None
    }

    /// Diagnostic to report wherever `ty` is used, if any.
    ///
    /// Arrays report their element type's diagnostic.
    fn use_site_diagnostic(&self, ty: TypeId) -> Option<DiagnosticInfo> {
        let symbol = self.type_symbol(ty);
        if let Some(info) = &symbol.use_site_diagnostic {
            return Some(info.clone());
        }
        match symbol.kind {
            TypeKind::Array { element } => self.use_site_diagnostic(element),
            _ => None,
        }
    }

    /// Whether `ty` is `base` or inherits from it.
    fn is_derived_from(&self, ty: TypeId, base: TypeId) -> bool {
        let mut current = Some(ty);
        while let Some(id) = current {
            if id == base {
                return true;
            }
            current = self.type_symbol(id).base_type();
        }
        false
    }

    /// The single constructor of a script or submission class.
    ///
    /// Returns `None` when there is not exactly one; callers treat that as a prerequisite failure.
    fn script_constructor(&self, ty: TypeId) -> Option<MethodId> {
        single_method_of_kind(self, ty, MethodKind::Constructor)
    }

    /// The single `<Initialize>` of a script or submission class.
    fn script_initializer(&self, ty: TypeId) -> Option<MethodId> {
        single_method_of_kind(self, ty, MethodKind::Initializer)
    }
}

fn single_method_of_kind<E: TypeEnvironment + ?Sized>(env: &E, ty: TypeId, kind: MethodKind) -> Option<MethodId> {
    let mut found = env.type_symbol(ty).members.iter().filter_map(|m| match m {
        Member::Method(id) if env.method(*id).kind == kind => Some(*id),
        _ => None,
    });
    let first = found.next()?;
    if found.next().is_some() { None } else { Some(first) }
}
