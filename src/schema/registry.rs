//! The structural, behavior-free collection of definitions of one schema

use std::sync::LazyLock;

use arcstr::ArcStr;
use indexmap::IndexMap;

use crate::{
    ast::{
        Definition, ScalarTypeDefinition, SchemaDefinition, Type, TypeDefinition,
        TypeExtensionDefinition,
    },
    error::{SchemaError, SchemaProblem, SchemaRedefinitionError, TypeRedefinitionError},
    schema::scalars,
};

static STANDARD_SCALAR_DEFINITIONS: LazyLock<IndexMap<ArcStr, TypeDefinition>> =
    LazyLock::new(|| {
        scalars::standard_scalar_definitions()
            .map(|def| (def.name.clone(), TypeDefinition::Scalar(def)))
            .collect()
    });

/// Type definitions read from one or more schema documents
///
/// Every non-extension type name is unique across all kinds, scalars
/// included. Extensions are kept apart, as an ordered list per type name, and
/// never conflict with anything. At most one schema definition is held.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypeDefinitionRegistry {
    types: IndexMap<ArcStr, TypeDefinition>,
    scalar_types: IndexMap<ArcStr, TypeDefinition>,
    type_extensions: IndexMap<ArcStr, Vec<TypeExtensionDefinition>>,
    schema: Option<SchemaDefinition>,
}

impl TypeDefinitionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry out of parsed definitions.
    ///
    /// Every definition is tried; all conflicts are reported together.
    pub fn from_definitions<I>(definitions: I) -> Result<Self, SchemaProblem>
    where
        I: IntoIterator,
        I::Item: Into<Definition>,
    {
        let mut registry = Self::new();
        let errors = definitions
            .into_iter()
            .filter_map(|def| registry.add(def).err())
            .flat_map(SchemaProblem::into_errors)
            .collect::<Vec<_>>();
        if errors.is_empty() {
            Ok(registry)
        } else {
            Err(SchemaProblem::new(errors))
        }
    }

    /// Adds a definition to the registry.
    ///
    /// Extensions are stored under their name without looking at what they
    /// extend. Assembly only reads the fields and interfaces of extensions of
    /// object types, and the fields of extensions of interfaces. Whatever else
    /// an extension carries is ignored.
    pub fn add(&mut self, definition: impl Into<Definition>) -> Result<(), SchemaProblem> {
        match definition.into() {
            Definition::Extension(ext) => {
                self.type_extensions
                    .entry(ext.name.clone())
                    .or_default()
                    .push(ext);
            }
            Definition::Type(def) => {
                if let Some(existing) = self.defined(def.name()) {
                    return Err(redefinition(existing, &def).into());
                }
                let bucket = match def {
                    TypeDefinition::Scalar(_) => &mut self.scalar_types,
                    _ => &mut self.types,
                };
                bucket.insert(def.name().clone(), def);
            }
            Definition::Schema(schema) => {
                if let Some(existing) = &self.schema {
                    return Err(SchemaError::from(SchemaRedefinitionError {
                        location: schema.position,
                        existing_location: existing.position,
                    })
                    .into());
                }
                self.schema = Some(schema);
            }
        }
        Ok(())
    }

    /// Merges `other` into this registry.
    ///
    /// Either every definition of `other` is taken over, or, when any of them
    /// conflicts, nothing is and all the conflicts are reported.
    pub fn merge(&mut self, other: TypeDefinitionRegistry) -> Result<(), SchemaProblem> {
        let mut errors = Vec::new();

        let mut temp_types = IndexMap::new();
        let mut temp_scalar_types = IndexMap::new();
        for (temp, entries) in [
            (&mut temp_types, other.types),
            (&mut temp_scalar_types, other.scalar_types),
        ] {
            for (name, new_entry) in entries {
                match self.defined(&name) {
                    Some(existing) => errors.push(redefinition(existing, &new_entry)),
                    None => {
                        temp.insert(name, new_entry);
                    }
                }
            }
        }

        if let (Some(existing), Some(new_schema)) = (&self.schema, &other.schema) {
            errors.push(
                SchemaRedefinitionError {
                    location: new_schema.position,
                    existing_location: existing.position,
                }
                .into(),
            );
        }

        if !errors.is_empty() {
            __idl_trace_debug!(conflicts = errors.len(), "type registry merge rejected");
            return Err(SchemaProblem::new(errors));
        }

        if self.schema.is_none() {
            self.schema = other.schema;
        }
        self.types.extend(temp_types);
        self.scalar_types.extend(temp_scalar_types);
        for (name, extensions) in other.type_extensions {
            self.type_extensions
                .entry(name)
                .or_default()
                .extend(extensions);
        }
        Ok(())
    }

    fn defined(&self, name: &str) -> Option<&TypeDefinition> {
        self.types
            .get(name)
            .or_else(|| self.scalar_types.get(name))
    }

    /// Non-scalar type definitions, in registration order.
    pub fn types(&self) -> &IndexMap<ArcStr, TypeDefinition> {
        &self.types
    }

    /// Scalar definitions: the built-in set followed by the declared ones.
    pub fn scalars(&self) -> IndexMap<ArcStr, ScalarTypeDefinition> {
        STANDARD_SCALAR_DEFINITIONS
            .iter()
            .chain(&self.scalar_types)
            .filter_map(|(name, def)| match def {
                TypeDefinition::Scalar(s) => Some((name.clone(), s.clone())),
                _ => None,
            })
            .collect()
    }

    /// Extension fragments, by extended type name.
    pub fn type_extensions(&self) -> &IndexMap<ArcStr, Vec<TypeExtensionDefinition>> {
        &self.type_extensions
    }

    /// Extension fragments of the type named `name`, in registration order.
    pub fn extensions_of(&self, name: &str) -> &[TypeExtensionDefinition] {
        self.type_extensions
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The schema definition, if one was registered.
    pub fn schema_definition(&self) -> Option<&SchemaDefinition> {
        self.schema.as_ref()
    }

    /// Whether anything is known under the innermost name of `type_ref`,
    /// extensions included.
    pub fn has_type(&self, type_ref: &Type) -> bool {
        let name = type_ref.innermost_name();
        self.defined(name).is_some()
            || STANDARD_SCALAR_DEFINITIONS.contains_key(name)
            || self.type_extensions.contains_key(name)
    }

    /// Looks up the definition of the innermost name of `type_ref`.
    ///
    /// Declared types are preferred over the built-in scalars.
    pub fn get_type(&self, type_ref: &Type) -> Option<&TypeDefinition> {
        self.get_type_by_name(type_ref.innermost_name())
    }

    /// Looks up a definition by bare type name.
    pub fn get_type_by_name(&self, name: &str) -> Option<&TypeDefinition> {
        self.defined(name)
            .or_else(|| STANDARD_SCALAR_DEFINITIONS.get(name))
    }
}

fn redefinition(existing: &TypeDefinition, new_entry: &TypeDefinition) -> SchemaError {
    __idl_trace_debug!(name = %new_entry.name(), "type redefinition");
    TypeRedefinitionError {
        name: new_entry.name().clone(),
        location: new_entry.position(),
        existing_location: existing.position(),
    }
    .into()
}
