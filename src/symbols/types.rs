//! Symbol definitions: types, methods, parameters and members.
//!
//! These are the already-bound inputs the synthesizer consumes. They are plain data; lookups go through
//! [`TypeEnvironment`](super::TypeEnvironment).

use entrysynth_core::lang::members::{self, WellKnownMemberId};
use serde::Deserialize;

use crate::diagnostics::{DiagnosticInfo, Location};

/// Index of a type in its [`TypeTable`](super::TypeTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) usize);

/// Index of a method in its [`TypeTable`](super::TypeTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId(pub(crate) usize);

/// Built-in types every compilation has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialType {
    Void,
    Boolean,
    Int32,
    String,
    Object,
}

impl SpecialType {
    pub const ALL: [SpecialType; 5] = [
        SpecialType::Void,
        SpecialType::Boolean,
        SpecialType::Int32,
        SpecialType::String,
        SpecialType::Object,
    ];

    /// Source-level spelling.
    pub fn keyword(self) -> &'static str {
        match self {
            SpecialType::Void => "void",
            SpecialType::Boolean => "bool",
            SpecialType::Int32 => "int",
            SpecialType::String => "string",
            SpecialType::Object => "object",
        }
    }

    pub fn from_keyword(name: &str) -> Option<SpecialType> {
        Self::ALL.into_iter().find(|s| s.keyword() == name)
    }
}

/// Platform types looked up by identity rather than by user-visible name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnownType {
    /// The non-generic future type (`System.Threading.Tasks.Task`).
    Task,
}

impl WellKnownType {
    /// Fully-qualified metadata name, used in "predefined type not found" diagnostics.
    pub fn metadata_name(self) -> &'static str {
        match self {
            WellKnownType::Task => "System.Threading.Tasks.Task",
        }
    }
}

/// What flavour of user-declared named type this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedTypeKind {
    Class,
    Struct,
    /// The implicit class holding the top-level code of a script.
    Script,
    /// The implicit class holding one interactive submission.
    Submission,
}

/// Type kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Special(SpecialType),
    /// Single-dimensional, zero-based array.
    Array { element: TypeId },
    Named {
        kind: NamedTypeKind,
        base: Option<TypeId>,
        type_arguments: Vec<TypeId>,
    },
    /// Marker for a type that could not be resolved. Diagnostics were reported where it was produced.
    Error,
}

/// A type in the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSymbol {
    pub name: String,
    pub kind: TypeKind,
    /// Declared members in declaration order.
    pub members: Vec<Member>,
    /// Diagnostic to report wherever this type is used (missing or malformed reference).
    pub use_site_diagnostic: Option<DiagnosticInfo>,
}

impl TypeSymbol {
    pub fn is_void(&self) -> bool {
        matches!(self.kind, TypeKind::Special(SpecialType::Void))
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, TypeKind::Error)
    }

    pub fn named_kind(&self) -> Option<NamedTypeKind> {
        match self.kind {
            TypeKind::Named { kind, .. } => Some(kind),
            _ => None,
        }
    }

    pub fn base_type(&self) -> Option<TypeId> {
        match self.kind {
            TypeKind::Named { base, .. } => base,
            _ => None,
        }
    }
}

/// A declared member of a named type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Method(MethodId),
    Field { name: String, ty: TypeId },
}

/// Declared accessibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessibility {
    #[default]
    Private,
    Internal,
    Protected,
    Public,
}

impl Accessibility {
    pub fn keyword(self) -> &'static str {
        match self {
            Accessibility::Private => "private",
            Accessibility::Internal => "internal",
            Accessibility::Protected => "protected",
            Accessibility::Public => "public",
        }
    }
}

/// Method kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Ordinary,
    Constructor,
    /// `<Initialize>` of a script or submission class.
    Initializer,
}

/// Calling convention recorded in metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CallingConvention {
    #[default]
    Default,
    VarArgs,
}

/// Optional or required custom modifier attached to a signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomModifier {
    pub modifier: TypeId,
    pub is_optional: bool,
}

/// Marshalling description of a return value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarshallingInfo {
    pub unmanaged_type: String,
}

/// Declarative security attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityAttribute {
    pub action: String,
    pub attribute: String,
}

/// Parameter of a method (user-declared or synthesized).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterSymbol {
    pub name: String,
    pub ty: TypeId,
    pub ordinal: usize,
}

/// A bound, user-declared method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSymbol {
    pub name: String,
    pub containing_type: TypeId,
    pub kind: MethodKind,
    pub parameters: Vec<ParameterSymbol>,
    pub return_type: TypeId,
    pub accessibility: Accessibility,
    pub is_static: bool,
    pub is_async: bool,
    pub is_virtual: bool,
    pub locations: Vec<Location>,
}

/// Signature used to declare a method in a [`TypeTable`](super::TypeTable).
///
/// ## Examples
/// ```rust
/// use entrysynth::symbols::{MethodSignature, SpecialType, TypeTable, TypeEnvironment};
///
/// let mut table = TypeTable::new();
/// let program = table.define_class("Program");
/// let string_array = table.array_of(table.special_type(SpecialType::String));
/// let int = table.special_type(SpecialType::Int32);
/// let main = table.define_method(
///     program,
///     MethodSignature::ordinary("Main", int).with_parameter("args", string_array).as_static(),
/// );
/// assert_eq!(table.method(main).parameters.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub name: String,
    pub kind: MethodKind,
    pub parameters: Vec<(String, TypeId)>,
    pub return_type: TypeId,
    pub accessibility: Accessibility,
    pub is_static: bool,
    pub is_async: bool,
    pub is_virtual: bool,
    pub location: Option<Location>,
}

impl MethodSignature {
    pub fn ordinary(name: impl Into<String>, return_type: TypeId) -> Self {
        Self {
            name: name.into(),
            kind: MethodKind::Ordinary,
            parameters: Vec::new(),
            return_type,
            accessibility: Accessibility::Public,
            is_static: false,
            is_async: false,
            is_virtual: false,
            location: None,
        }
    }

    /// Instance constructor; `void_type` is the table's `void`.
    pub fn constructor(void_type: TypeId) -> Self {
        Self {
            kind: MethodKind::Constructor,
            ..Self::ordinary(members::as_str(WellKnownMemberId::Constructor), void_type)
        }
    }

    /// Script/submission `<Initialize>` returning `return_type`.
    pub fn initializer(return_type: TypeId) -> Self {
        Self {
            kind: MethodKind::Initializer,
            ..Self::ordinary(members::as_str(WellKnownMemberId::ScriptInitializer), return_type)
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, ty: TypeId) -> Self {
        self.parameters.push((name.into(), ty));
        self
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn as_async(mut self) -> Self {
        self.is_async = true;
        self
    }

    pub fn as_virtual(mut self) -> Self {
        self.is_virtual = true;
        self
    }
}
