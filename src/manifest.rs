//! JSON compilation manifests.
//!
//! A manifest describes an already-bound compilation: its named types with their members, whether the platform
//! `Task` types exist, and what kind of compilation it is. The CLI loads one into a [`TypeTable`] and runs synthesis
//! over it.
//!
//! ```json
//! {
//!   "platform_tasks": true,
//!   "types": [
//!     { "name": "Program", "members": [
//!       { "member": "method", "name": "Main", "returns": "Task<int>", "static": true, "async": true,
//!         "parameters": [{ "name": "args", "type": "string[]" }] }
//!     ] }
//!   ],
//!   "compilation": { "kind": "regular", "main": "Program.Main" }
//! }
//! ```
//!
//! Type references are spelled `void`, `int`, `string`, `object`, `bool`, `T[]`, `Task`, `Task<T>` or the name of a
//! declared type.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use entrysynth_core::lang::diagnostics::DiagnosticCodeId;
use entrysynth_core::lang::synthetic::{self, SyntheticNameId};
use serde::Deserialize;
use thiserror::Error;

use crate::diagnostics::{DiagnosticInfo, Location};
use crate::entry_point::CompilationKind;
use crate::symbols::{
    Accessibility, MethodId, MethodKind, MethodSignature, NamedTypeKind, SpecialType, TypeEnvironment, TypeId,
    TypeTable,
};

/// Errors that occur while loading a manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("type `{0}` is declared more than once")]
    DuplicateType(String),

    #[error("unknown type `{0}`")]
    UnknownType(String),

    #[error("`{0}` requires \"platform_tasks\": true")]
    TasksDisabled(String),

    #[error("base types of `{0}` form a cycle")]
    CyclicBase(String),

    #[error("unknown method `{0}`")]
    UnknownMethod(String),

    #[error("ordinary method on `{0}` has no name")]
    UnnamedMethod(String),
}

/// Root of a manifest file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Define `Task`, `Task<T>` and their awaiters.
    #[serde(default)]
    pub platform_tasks: bool,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
    pub compilation: CompilationDecl,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDecl {
    pub name: String,
    #[serde(default = "default_type_kind")]
    pub kind: NamedTypeKind,
    pub base: Option<String>,
    /// Report "not supported by the language" wherever the type is used.
    #[serde(default)]
    pub bogus: bool,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
}

fn default_type_kind() -> NamedTypeKind {
    NamedTypeKind::Class
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "member", rename_all = "lowercase")]
pub enum MemberDecl {
    Method(MethodDecl),
    Field(FieldDecl),
}

#[derive(Debug, Clone, Deserialize)]
pub struct MethodDecl {
    /// Required for ordinary methods; constructors and initializers use their reserved names.
    pub name: Option<String>,
    #[serde(default = "default_method_kind")]
    pub kind: MethodKind,
    /// Defaults to `void`.
    pub returns: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
    #[serde(rename = "static", default)]
    pub is_static: bool,
    #[serde(rename = "async", default)]
    pub is_async: bool,
    #[serde(rename = "virtual", default)]
    pub is_virtual: bool,
    pub accessibility: Option<Accessibility>,
    /// `[start, end]` byte range
    pub location: Option<[usize; 2]>,
}

fn default_method_kind() -> MethodKind {
    MethodKind::Ordinary
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterDecl {
    /// Defaults to `args`.
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CompilationDecl {
    Regular {
        /// `Type.Method` of the candidate main
        main: Option<String>,
    },
    Script {
        class: String,
    },
    Submission {
        class: String,
    },
}

/// A manifest turned into a type table plus synthesis inputs.
#[derive(Debug, Clone)]
pub struct LoadedCompilation {
    pub table: TypeTable,
    pub kind: CompilationKind,
    pub candidate: Option<MethodId>,
}

impl Manifest {
    pub fn from_json(text: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Build the type table.
    ///
    /// Types are declared before any member so members and bases may refer to types declared later in the file.
    #[tracing::instrument(skip_all, fields(types = self.types.len()))]
    pub fn build(&self) -> Result<LoadedCompilation, ManifestError> {
        let mut table = TypeTable::new();
        if self.platform_tasks {
            table.define_platform_tasks();
        }

        let mut declared: HashMap<&str, TypeId> = HashMap::new();
        for decl in &self.types {
            if declared.contains_key(decl.name.as_str()) {
                return Err(ManifestError::DuplicateType(decl.name.clone()));
            }
            let id = table.define_type(decl.name.clone(), decl.kind, None);
            if decl.bogus {
                table.set_use_site_diagnostic(
                    id,
                    DiagnosticInfo::new(DiagnosticCodeId::BogusType, vec![decl.name.clone()]),
                );
            }
            declared.insert(decl.name.as_str(), id);
        }

        let mut resolver = TypeResolver {
            table: &mut table,
            declared: &declared,
            platform_tasks: self.platform_tasks,
        };
        for decl in &self.types {
            let owner = declared[decl.name.as_str()];
            if let Some(base) = &decl.base {
                let base = resolver.resolve(base)?;
                resolver.table.set_base(owner, base);
            }
            for member in &decl.members {
                match member {
                    MemberDecl::Method(method) => {
                        let signature = resolver.signature(&decl.name, method)?;
                        resolver.table.define_method(owner, signature);
                    }
                    MemberDecl::Field(field) => {
                        let ty = resolver.resolve(&field.ty)?;
                        resolver.table.define_field(owner, field.name.clone(), ty);
                    }
                }
            }
        }

        for decl in &self.types {
            let start = declared[decl.name.as_str()];
            let mut current = table.type_symbol(start).base_type();
            let mut steps = 0;
            while let Some(id) = current {
                if id == start || steps > self.types.len() {
                    return Err(ManifestError::CyclicBase(decl.name.clone()));
                }
                steps += 1;
                current = table.type_symbol(id).base_type();
            }
        }

        let (kind, candidate) = match &self.compilation {
            CompilationDecl::Regular { main } => {
                let candidate = main.as_deref().map(|m| find_method(&table, &declared, m)).transpose()?;
                (CompilationKind::Regular, candidate)
            }
            CompilationDecl::Script { class } => (
                CompilationKind::Script {
                    script_class: lookup_declared(&declared, class)?,
                },
                None,
            ),
            CompilationDecl::Submission { class } => (
                CompilationKind::Submission {
                    submission_class: lookup_declared(&declared, class)?,
                },
                None,
            ),
        };

        tracing::debug!(types = table.type_count(), ?kind, "manifest loaded");
        Ok(LoadedCompilation { table, kind, candidate })
    }
}

struct TypeResolver<'a> {
    table: &'a mut TypeTable,
    declared: &'a HashMap<&'a str, TypeId>,
    platform_tasks: bool,
}

impl TypeResolver<'_> {
    fn resolve(&mut self, spelling: &str) -> Result<TypeId, ManifestError> {
        let spelling = spelling.trim();
        if let Some(element) = spelling.strip_suffix("[]") {
            let element = self.resolve(element)?;
            return Ok(self.table.array_of(element));
        }
        if let Some(special) = SpecialType::from_keyword(spelling) {
            return Ok(self.table.special_type(special));
        }
        if let Some(&id) = self.declared.get(spelling) {
            return Ok(id);
        }
        if let Some(arg) = spelling.strip_prefix("Task<").and_then(|s| s.strip_suffix('>')) {
            if !self.platform_tasks {
                return Err(ManifestError::TasksDisabled(spelling.to_string()));
            }
            let result = self.resolve(arg)?;
            return Ok(self.table.task_of(result));
        }
        if spelling == "Task" || spelling == "TaskAwaiter" {
            if !self.platform_tasks {
                return Err(ManifestError::TasksDisabled(spelling.to_string()));
            }
            return self
                .table
                .type_by_name(spelling)
                .ok_or_else(|| ManifestError::UnknownType(spelling.to_string()));
        }
        Err(ManifestError::UnknownType(spelling.to_string()))
    }

    fn signature(&mut self, owner: &str, decl: &MethodDecl) -> Result<MethodSignature, ManifestError> {
        let returns = self.resolve(decl.returns.as_deref().unwrap_or("void"))?;
        let mut signature = match decl.kind {
            MethodKind::Ordinary => {
                let name = decl
                    .name
                    .clone()
                    .ok_or_else(|| ManifestError::UnnamedMethod(owner.to_string()))?;
                MethodSignature::ordinary(name, returns)
            }
            MethodKind::Constructor => MethodSignature::constructor(returns),
            MethodKind::Initializer => MethodSignature::initializer(returns),
        };
        for param in &decl.parameters {
            let ty = self.resolve(&param.ty)?;
            let name = param
                .name
                .clone()
                .unwrap_or_else(|| synthetic::as_str(SyntheticNameId::ArgsParameter).to_string());
            signature = signature.with_parameter(name, ty);
        }
        if let Some(accessibility) = decl.accessibility {
            signature = signature.with_accessibility(accessibility);
        }
        if let Some([start, end]) = decl.location {
            signature = signature.with_location(Location::Source { start, end });
        }
        if decl.is_static {
            signature = signature.as_static();
        }
        if decl.is_async {
            signature = signature.as_async();
        }
        if decl.is_virtual {
            signature = signature.as_virtual();
        }
        Ok(signature)
    }
}

fn lookup_declared(declared: &HashMap<&str, TypeId>, name: &str) -> Result<TypeId, ManifestError> {
    declared
        .get(name)
        .copied()
        .ok_or_else(|| ManifestError::UnknownType(name.to_string()))
}

fn find_method(table: &TypeTable, declared: &HashMap<&str, TypeId>, path: &str) -> Result<MethodId, ManifestError> {
    let (type_name, method_name) = path
        .rsplit_once('.')
        .ok_or_else(|| ManifestError::UnknownMethod(path.to_string()))?;
    let owner = lookup_declared(declared, type_name)?;
    let method = table
        .method_by_name(owner, method_name)
        .ok_or_else(|| ManifestError::UnknownMethod(path.to_string()))?;
    // Only ordinary methods can be a user main.
    if table.method(method).kind != MethodKind::Ordinary {
        return Err(ManifestError::UnknownMethod(path.to_string()));
    }
    Ok(method)
}
