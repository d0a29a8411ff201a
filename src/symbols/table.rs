//! In-memory type table.
//!
//! Owns every [`TypeSymbol`] and [`MethodSymbol`] of one compilation and implements [`TypeEnvironment`] over them.
//! Construction is mutable (`define_*`); synthesis only ever sees `&TypeTable`.

use std::collections::HashMap;

use entrysynth_core::lang::diagnostics::DiagnosticCodeId;
use entrysynth_core::lang::members::{self, WellKnownMemberId};

use super::TypeEnvironment;
use super::types::{
    Member, MethodId, MethodSignature, MethodSymbol, NamedTypeKind, ParameterSymbol, SpecialType, TypeId, TypeKind,
    TypeSymbol, WellKnownType,
};
use crate::diagnostics::DiagnosticInfo;

/// The platform future types created by [`TypeTable::define_platform_tasks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTypes {
    /// `Task`
    pub task: TypeId,
    /// `TaskAwaiter`, whose `GetResult` returns `void`.
    pub awaiter: TypeId,
}

/// Type table for one compilation.
#[derive(Debug, Clone)]
pub struct TypeTable {
    types: Vec<TypeSymbol>,
    methods: Vec<MethodSymbol>,
    special: HashMap<SpecialType, TypeId>,
    well_known: HashMap<WellKnownType, TypeId>,
    /// Element type → array type
    arrays: HashMap<TypeId, TypeId>,
    /// Result type → `Task<T>`
    generic_tasks: HashMap<TypeId, TypeId>,
    error: TypeId,
    /// Error types standing in for absent well-known types
    missing_well_known: HashMap<WellKnownType, TypeId>,
}

impl TypeTable {
    /// Create a table holding the special types, their arrays, and nothing else.
    ///
    /// Well-known types are absent until defined; [`TypeEnvironment::well_known_type`] returns error types for them.
    pub fn new() -> Self {
        let mut table = Self {
            types: Vec::new(),
            methods: Vec::new(),
            special: HashMap::new(),
            well_known: HashMap::new(),
            arrays: HashMap::new(),
            generic_tasks: HashMap::new(),
            error: TypeId(0),
            missing_well_known: HashMap::new(),
        };

        table.error = table.push_type(TypeSymbol {
            name: "?".to_string(),
            kind: TypeKind::Error,
            members: Vec::new(),
            use_site_diagnostic: None,
        });

        for special in SpecialType::ALL {
            let id = table.push_type(TypeSymbol {
                name: special.keyword().to_string(),
                kind: TypeKind::Special(special),
                members: Vec::new(),
                use_site_diagnostic: None,
            });
            table.special.insert(special, id);
        }
        for special in SpecialType::ALL {
            if special != SpecialType::Void {
                let element = table.special[&special];
                table.array_of(element);
            }
        }

        let task = WellKnownType::Task;
        let missing = table.push_type(TypeSymbol {
            name: task.metadata_name().to_string(),
            kind: TypeKind::Error,
            members: Vec::new(),
            use_site_diagnostic: Some(DiagnosticInfo::new(
                DiagnosticCodeId::PredefinedTypeNotFound,
                vec![task.metadata_name().to_string()],
            )),
        });
        table.missing_well_known.insert(task, missing);

        table
    }

    /// Create a table with the platform `Task` / `TaskAwaiter` types already defined.
    pub fn with_platform_tasks() -> Self {
        let mut table = Self::new();
        table.define_platform_tasks();
        table
    }

    fn push_type(&mut self, symbol: TypeSymbol) -> TypeId {
        let id = TypeId(self.types.len());
        self.types.push(symbol);
        id
    }

    fn type_mut(&mut self, ty: TypeId) -> &mut TypeSymbol {
        &mut self.types[ty.0]
    }

    /// Define a named type.
    pub fn define_type(&mut self, name: impl Into<String>, kind: NamedTypeKind, base: Option<TypeId>) -> TypeId {
        self.push_type(TypeSymbol {
            name: name.into(),
            kind: TypeKind::Named {
                kind,
                base,
                type_arguments: Vec::new(),
            },
            members: Vec::new(),
            use_site_diagnostic: None,
        })
    }

    pub fn define_class(&mut self, name: impl Into<String>) -> TypeId {
        self.define_type(name, NamedTypeKind::Class, None)
    }

    pub fn define_struct(&mut self, name: impl Into<String>) -> TypeId {
        self.define_type(name, NamedTypeKind::Struct, None)
    }

    /// Set the base type of a named type declared earlier.
    pub fn set_base(&mut self, ty: TypeId, new_base: TypeId) {
        if let TypeKind::Named { base, .. } = &mut self.type_mut(ty).kind {
            *base = Some(new_base);
        }
    }

    /// Attach a use-site diagnostic to an existing type.
    pub fn set_use_site_diagnostic(&mut self, ty: TypeId, info: DiagnosticInfo) {
        self.type_mut(ty).use_site_diagnostic = Some(info);
    }

    /// Declare a method on `containing` and register it as a member.
    pub fn define_method(&mut self, containing: TypeId, signature: MethodSignature) -> MethodId {
        let id = MethodId(self.methods.len());
        let parameters = signature
            .parameters
            .into_iter()
            .enumerate()
            .map(|(ordinal, (name, ty))| ParameterSymbol { name, ty, ordinal })
            .collect();
        self.methods.push(MethodSymbol {
            name: signature.name,
            containing_type: containing,
            kind: signature.kind,
            parameters,
            return_type: signature.return_type,
            accessibility: signature.accessibility,
            is_static: signature.is_static,
            is_async: signature.is_async,
            is_virtual: signature.is_virtual,
            locations: signature.location.into_iter().collect(),
        });
        self.type_mut(containing).members.push(Member::Method(id));
        id
    }

    /// Declare a field on `containing`.
    pub fn define_field(&mut self, containing: TypeId, name: impl Into<String>, ty: TypeId) {
        self.type_mut(containing).members.push(Member::Field { name: name.into(), ty });
    }

    /// Intern the array type of `element`.
    pub fn array_of(&mut self, element: TypeId) -> TypeId {
        if let Some(&id) = self.arrays.get(&element) {
            return id;
        }
        let name = format!("{}[]", self.types[element.0].name);
        let id = self.push_type(TypeSymbol {
            name,
            kind: TypeKind::Array { element },
            members: Vec::new(),
            use_site_diagnostic: None,
        });
        self.arrays.insert(element, id);
        id
    }

    /// Register `ty` as the well-known type `well_known`.
    pub fn register_well_known(&mut self, well_known: WellKnownType, ty: TypeId) {
        self.well_known.insert(well_known, ty);
    }

    /// Define `Task` with `GetAwaiter() -> TaskAwaiter` and `TaskAwaiter.GetResult() -> void`, and register `Task` as
    /// the well-known future type.
    pub fn define_platform_tasks(&mut self) -> TaskTypes {
        if let Some(&task) = self.well_known.get(&WellKnownType::Task) {
            let awaiter = self.awaiter_of(task);
            return TaskTypes { task, awaiter };
        }
        let void = self.special_type(SpecialType::Void);
        let awaiter = self.define_struct("TaskAwaiter");
        self.define_method(
            awaiter,
            MethodSignature::ordinary(members::as_str(WellKnownMemberId::GetResult), void),
        );
        let task = self.define_class("Task");
        self.define_method(
            task,
            MethodSignature::ordinary(members::as_str(WellKnownMemberId::GetAwaiter), awaiter),
        );
        self.register_well_known(WellKnownType::Task, task);
        TaskTypes { task, awaiter }
    }

    /// Intern `Task<T>` (deriving from `Task`) with `GetAwaiter() -> TaskAwaiter<T>` and
    /// `TaskAwaiter<T>.GetResult() -> T`.
    pub fn task_of(&mut self, result: TypeId) -> TypeId {
        if let Some(&id) = self.generic_tasks.get(&result) {
            return id;
        }
        let TaskTypes { task, .. } = self.define_platform_tasks();
        let arg_name = self.types[result.0].name.clone();

        let awaiter = self.push_type(TypeSymbol {
            name: format!("TaskAwaiter<{}>", arg_name),
            kind: TypeKind::Named {
                kind: NamedTypeKind::Struct,
                base: None,
                type_arguments: vec![result],
            },
            members: Vec::new(),
            use_site_diagnostic: None,
        });
        self.define_method(
            awaiter,
            MethodSignature::ordinary(members::as_str(WellKnownMemberId::GetResult), result),
        );

        let generic = self.push_type(TypeSymbol {
            name: format!("Task<{}>", arg_name),
            kind: TypeKind::Named {
                kind: NamedTypeKind::Class,
                base: Some(task),
                type_arguments: vec![result],
            },
            members: Vec::new(),
            use_site_diagnostic: None,
        });
        self.define_method(
            generic,
            MethodSignature::ordinary(members::as_str(WellKnownMemberId::GetAwaiter), awaiter),
        );
        self.generic_tasks.insert(result, generic);
        generic
    }

    /// Return type of the first `GetAwaiter` on `ty`, or the error type.
    fn awaiter_of(&self, ty: TypeId) -> TypeId {
        self.lookup_member(ty, members::as_str(WellKnownMemberId::GetAwaiter))
            .into_iter()
            .find_map(|m| match m {
                Member::Method(id) => Some(self.methods[id.0].return_type),
                Member::Field { .. } => None,
            })
            .unwrap_or(self.error)
    }

    /// Find a named, special or array type by its display name.
    pub fn type_by_name(&self, name: &str) -> Option<TypeId> {
        self.types
            .iter()
            .position(|t| t.name == name && !t.is_error())
            .map(TypeId)
    }

    /// Find a method by containing type and name (first in declaration order).
    pub fn method_by_name(&self, containing: TypeId, name: &str) -> Option<MethodId> {
        self.types[containing.0].members.iter().find_map(|m| match m {
            Member::Method(id) if self.methods[id.0].name == name => Some(*id),
            _ => None,
        })
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeEnvironment for TypeTable {
    fn type_symbol(&self, ty: TypeId) -> &TypeSymbol {
        &self.types[ty.0]
    }

    fn method(&self, method: MethodId) -> &MethodSymbol {
        &self.methods[method.0]
    }

    fn lookup_member(&self, ty: TypeId, name: &str) -> Vec<Member> {
        self.types[ty.0]
            .members
            .iter()
            .filter(|m| self.member_name(m) == name)
            .cloned()
            .collect()
    }

    fn special_type(&self, special: SpecialType) -> TypeId {
        // Every special type is created in `new`.
        self.special.get(&special).copied().unwrap_or(self.error)
    }

    fn well_known_type(&self, well_known: WellKnownType) -> TypeId {
        self.well_known
            .get(&well_known)
            .or_else(|| self.missing_well_known.get(&well_known))
            .copied()
            .unwrap_or(self.error)
    }

    fn error_type(&self) -> TypeId {
        self.error
    }

    fn array_type(&self, element: TypeId) -> Option<TypeId> {
        self.arrays.get(&element).copied()
    }
}
