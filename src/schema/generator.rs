//! Assembly of a [`TypeGraph`] out of a registry and a runtime wiring

use std::sync::Arc;

use arcstr::ArcStr;
use fnv::FnvHashMap;
use indexmap::IndexMap;

use crate::{
    ast::{
        EnumTypeDefinition, FieldDefinition, InputObjectTypeDefinition, InputValue,
        InputValueDefinition, InterfaceTypeDefinition, ObjectTypeDefinition, OperationType,
        OperationTypeDefinition, ScalarTypeDefinition, Type, TypeDefinition, TypeKind,
        UnionTypeDefinition,
    },
    error::{
        MissingScalarError, NotAnInputTypeError, NotAnOutputTypeError, OperationRootError,
        SchemaError, SchemaProblem, UnknownTypeError, WiringCapability, WiringContractViolation,
    },
    parser::SourcePosition,
    schema::{
        meta::{
            Argument, EnumMeta, EnumValue, Field, InputObjectMeta, InterfaceMeta, MetaType,
            ObjectMeta, TypeType, UnionMeta,
        },
        model::TypeGraph,
        registry::TypeDefinitionRegistry,
        resolvers::{FieldResolver, PropertyDataFetcher, TypeResolverBinding},
        wiring::RuntimeWiring,
    },
    value::Value,
};

/// Assembles `registry` and `wiring` into an executable [`TypeGraph`].
///
/// Shorthand for [`SchemaGenerator::make_executable_schema()`].
pub fn assemble(
    registry: &TypeDefinitionRegistry,
    wiring: &RuntimeWiring,
) -> Result<TypeGraph, SchemaProblem> {
    SchemaGenerator::new().make_executable_schema(registry, wiring)
}

/// Puts structural definitions and runtime behavior together
///
/// The generator itself is stateless: every call starts from empty caches, so
/// repeated calls with the same inputs are independent and produce equivalent
/// graphs.
#[derive(Clone, Copy, Debug, Default)]
pub struct SchemaGenerator;

impl SchemaGenerator {
    /// Creates a generator.
    pub fn new() -> Self {
        Self
    }

    /// Builds every type reachable from the root operation types of
    /// `registry`, binding the resolvers `wiring` provides.
    ///
    /// Stops at the first problem met.
    pub fn make_executable_schema(
        &self,
        registry: &TypeDefinitionRegistry,
        wiring: &RuntimeWiring,
    ) -> Result<TypeGraph, SchemaProblem> {
        __idl_span_debug!("make_executable_schema");

        let graph = BuildContext::new(registry, wiring)
            .build_schema()
            .map_err(SchemaProblem::from)?;
        __idl_trace_debug!(types = graph.types().len(), "schema assembled");
        Ok(graph)
    }
}

/// A list or non-null wrapper around a named type occurrence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Marker {
    List,
    NonNull,
}

/// A type literal split into its named type and its wrapper markers, the
/// latter recorded innermost first.
#[derive(Debug, Eq, PartialEq)]
struct TypeInfo<'t> {
    name: &'t ArcStr,
    markers: Vec<Marker>,
}

impl<'t> TypeInfo<'t> {
    fn of(type_ref: &'t Type) -> Self {
        match type_ref {
            Type::Named(name) => Self {
                name,
                markers: Vec::new(),
            },
            Type::NonNullNamed(name) => Self {
                name,
                markers: vec![Marker::NonNull],
            },
            Type::List(inner) => {
                let mut info = Self::of(inner);
                info.markers.push(Marker::List);
                info
            }
            Type::NonNullList(inner) => {
                let mut info = Self::of(inner);
                info.markers.extend([Marker::List, Marker::NonNull]);
                info
            }
        }
    }

    /// Wraps a bare named occurrence in the markers of this literal.
    fn decorate(&self, bare: TypeType) -> TypeType {
        self.markers.iter().fold(bare, |t, marker| match marker {
            Marker::List => t.list(),
            Marker::NonNull => t.non_null(),
        })
    }
}

/// State of one assembly: the inputs, the types built so far and the names
/// of the types being built.
///
/// Both caches are keyed by bare type name. Enums and scalars land in both.
struct BuildContext<'a> {
    registry: &'a TypeDefinitionRegistry,
    wiring: &'a RuntimeWiring,
    stack: Vec<ArcStr>,
    output_types: FnvHashMap<ArcStr, Arc<MetaType>>,
    input_types: FnvHashMap<ArcStr, Arc<MetaType>>,
}

impl<'a> BuildContext<'a> {
    fn new(registry: &'a TypeDefinitionRegistry, wiring: &'a RuntimeWiring) -> Self {
        Self {
            registry,
            wiring,
            stack: Vec::new(),
            output_types: FnvHashMap::default(),
            input_types: FnvHashMap::default(),
        }
    }

    fn build_schema(mut self) -> Result<TypeGraph, SchemaError> {
        let registry = self.registry;
        let schema = registry
            .schema_definition()
            .ok_or(OperationRootError::MissingSchemaDefinition)?;
        let query_op = schema
            .root_type(OperationType::Query)
            .ok_or(OperationRootError::MissingQueryOperation(schema.position))?;

        let query = self.build_operation(query_op)?;
        let mutation = schema
            .root_type(OperationType::Mutation)
            .map(|op| self.build_operation(op))
            .transpose()?;
        let subscription = schema
            .root_type(OperationType::Subscription)
            .map(|op| self.build_operation(op))
            .transpose()?;

        let graph = TypeGraph::new(query, mutation, subscription);
        if let Some((owner, name)) = graph.dangling_placeholders().first() {
            return Err(UnknownTypeError {
                name: (*name).clone(),
                context: (*owner).clone(),
                location: registry
                    .get_type_by_name(owner)
                    .map(TypeDefinition::position)
                    .unwrap_or_default(),
            }
            .into());
        }
        Ok(graph)
    }

    fn build_operation(
        &mut self,
        operation: &OperationTypeDefinition,
    ) -> Result<Arc<MetaType>, SchemaError> {
        __idl_span_debug!("build_operation", operation = %operation.operation);

        let name = &operation.type_name;
        let definition = self.type_definition(name, name, operation.position)?;
        let not_an_object = || OperationRootError::NotAnObject {
            operation: operation.operation,
            name: name.clone(),
            kind: definition.kind(),
        };
        if definition.kind() != TypeKind::Object {
            return Err(not_an_object().into());
        }

        match self.build_output_type(&Type::Named(name.clone()), name, operation.position)? {
            TypeType::Concrete(meta) => Ok(meta),
            _ => Err(not_an_object().into()),
        }
    }

    /// Looks up the definition of `name`, referenced from the definition of
    /// `context`.
    fn type_definition(
        &self,
        name: &ArcStr,
        context: &ArcStr,
        location: SourcePosition,
    ) -> Result<&'a TypeDefinition, SchemaError> {
        self.registry.get_type_by_name(name).ok_or_else(|| {
            UnknownTypeError {
                name: name.clone(),
                context: context.clone(),
                location,
            }
            .into()
        })
    }

    fn build_output_type(
        &mut self,
        type_ref: &Type,
        context: &ArcStr,
        location: SourcePosition,
    ) -> Result<TypeType, SchemaError> {
        let info = TypeInfo::of(type_ref);
        let definition = self.type_definition(info.name, context, location)?;

        if let Some(cached) = self.output_types.get(info.name) {
            return Ok(info.decorate(TypeType::Concrete(Arc::clone(cached))));
        }
        if !definition.kind().is_output() {
            return Err(not_an_output_type(definition));
        }
        if self.stack.contains(info.name) {
            __idl_trace!(name = %info.name, "reference cycle, leaving a placeholder");
            return Ok(info.decorate(TypeType::Placeholder(info.name.clone())));
        }

        self.stack.push(info.name.clone());
        let built = match definition {
            TypeDefinition::Object(def) => self.build_object_type(def)?,
            TypeDefinition::Interface(def) => self.build_interface_type(definition, def)?,
            TypeDefinition::Union(def) => self.build_union_type(definition, def)?,
            TypeDefinition::Enum(def) => build_enum_type(def),
            TypeDefinition::Scalar(def) => self.build_scalar(def)?,
            TypeDefinition::InputObject(_) => return Err(not_an_output_type(definition)),
        };
        let built = self.put(built);
        self.stack.pop();

        Ok(info.decorate(TypeType::Concrete(built)))
    }

    fn build_input_type(
        &mut self,
        type_ref: &Type,
        context: &ArcStr,
        location: SourcePosition,
    ) -> Result<TypeType, SchemaError> {
        let info = TypeInfo::of(type_ref);
        let definition = self.type_definition(info.name, context, location)?;

        if let Some(cached) = self.input_types.get(info.name) {
            return Ok(info.decorate(TypeType::Concrete(Arc::clone(cached))));
        }
        if !definition.kind().is_input() {
            return Err(not_an_input_type(definition));
        }
        if self.stack.contains(info.name) {
            __idl_trace!(name = %info.name, "reference cycle, leaving a placeholder");
            return Ok(info.decorate(TypeType::Placeholder(info.name.clone())));
        }

        self.stack.push(info.name.clone());
        let built = match definition {
            TypeDefinition::InputObject(def) => self.build_input_object_type(def)?,
            TypeDefinition::Enum(def) => build_enum_type(def),
            TypeDefinition::Scalar(def) => self.build_scalar(def)?,
            TypeDefinition::Object(_)
            | TypeDefinition::Interface(_)
            | TypeDefinition::Union(_) => return Err(not_an_input_type(definition)),
        };
        let built = self.put(built);
        self.stack.pop();

        Ok(info.decorate(TypeType::Concrete(built)))
    }

    /// Caches a finished type under its name.
    fn put(&mut self, meta: MetaType) -> Arc<MetaType> {
        let meta = Arc::new(meta);
        let name = meta.name().clone();
        if meta.is_output() {
            self.output_types.insert(name.clone(), Arc::clone(&meta));
        }
        if meta.is_input() {
            self.input_types.insert(name, Arc::clone(&meta));
        }
        meta
    }

    fn build_object_type(&mut self, def: &'a ObjectTypeDefinition) -> Result<MetaType, SchemaError> {
        __idl_span_trace!("build_object_type", name = %def.name);

        let registry = self.registry;
        let extensions = registry.extensions_of(&def.name);
        let fields = self.build_fields(
            &def.name,
            def.fields
                .iter()
                .chain(extensions.iter().flat_map(|ext| &ext.fields)),
        )?;

        let mut interfaces = IndexMap::<ArcStr, TypeType>::new();
        let declared = def
            .interfaces
            .iter()
            .map(|name| (name, def.position))
            .chain(extensions.iter().flat_map(|ext| {
                ext.interfaces.iter().map(|name| (name, ext.position))
            }));
        for (name, location) in declared {
            if interfaces.contains_key(name) {
                continue;
            }
            let interface = self.build_output_type(&Type::Named(name.clone()), &def.name, location)?;
            interfaces.insert(name.clone(), interface);
        }

        Ok(MetaType::Object(ObjectMeta {
            name: def.name.clone(),
            description: def.description.clone(),
            fields,
            interfaces: interfaces.into_values().collect(),
        }))
    }

    fn build_interface_type(
        &mut self,
        definition: &'a TypeDefinition,
        def: &'a InterfaceTypeDefinition,
    ) -> Result<MetaType, SchemaError> {
        __idl_span_trace!("build_interface_type", name = %def.name);

        let type_resolver = self.build_type_resolver(definition)?;
        let registry = self.registry;
        let extensions = registry.extensions_of(&def.name);
        let fields = self.build_fields(
            &def.name,
            def.fields
                .iter()
                .chain(extensions.iter().flat_map(|ext| &ext.fields)),
        )?;

        Ok(MetaType::Interface(InterfaceMeta {
            name: def.name.clone(),
            description: def.description.clone(),
            fields,
            type_resolver,
        }))
    }

    fn build_union_type(
        &mut self,
        definition: &'a TypeDefinition,
        def: &'a UnionTypeDefinition,
    ) -> Result<MetaType, SchemaError> {
        __idl_span_trace!("build_union_type", name = %def.name);

        let type_resolver = self.build_type_resolver(definition)?;
        let possible_types = def
            .member_types
            .iter()
            .map(|member| {
                self.build_output_type(&Type::Named(member.clone()), &def.name, def.position)
            })
            .collect::<Result<_, _>>()?;

        Ok(MetaType::Union(UnionMeta {
            name: def.name.clone(),
            description: def.description.clone(),
            possible_types,
            type_resolver,
        }))
    }

    fn build_scalar(&self, def: &ScalarTypeDefinition) -> Result<MetaType, SchemaError> {
        let scalar = self
            .wiring
            .scalars()
            .get(&def.name)
            .ok_or_else(|| MissingScalarError {
                name: def.name.clone(),
                location: def.position,
            })?;

        Ok(MetaType::Scalar(match &def.description {
            Some(description) => scalar.clone().description(description.clone()),
            None => scalar.clone(),
        }))
    }

    fn build_input_object_type(
        &mut self,
        def: &'a InputObjectTypeDefinition,
    ) -> Result<MetaType, SchemaError> {
        __idl_span_trace!("build_input_object_type", name = %def.name);

        let input_fields = def
            .fields
            .iter()
            .map(|field| self.build_argument(&def.name, field))
            .collect::<Result<_, _>>()?;

        Ok(MetaType::InputObject(InputObjectMeta {
            name: def.name.clone(),
            description: def.description.clone(),
            input_fields,
        }))
    }

    /// Builds the fields of `parent`; a field declared more than once keeps
    /// its first declaration.
    fn build_fields(
        &mut self,
        parent: &ArcStr,
        definitions: impl Iterator<Item = &'a FieldDefinition>,
    ) -> Result<Vec<Field>, SchemaError> {
        let mut fields = IndexMap::<ArcStr, Field>::new();
        for def in definitions {
            if fields.contains_key(&def.name) {
                continue;
            }
            let field = self.build_field(parent, def)?;
            fields.insert(def.name.clone(), field);
        }
        Ok(fields.into_values().collect())
    }

    fn build_field(
        &mut self,
        parent: &ArcStr,
        def: &'a FieldDefinition,
    ) -> Result<Field, SchemaError> {
        let resolver = self.build_data_fetcher(parent, def)?;
        let arguments = def
            .arguments
            .iter()
            .map(|arg| self.build_argument(parent, arg))
            .collect::<Result<_, _>>()?;
        let field_type = self.build_output_type(&def.field_type, parent, def.position)?;

        Ok(Field {
            name: def.name.clone(),
            description: def.description.clone(),
            arguments,
            field_type,
            resolver,
        })
    }

    fn build_argument(
        &mut self,
        parent: &ArcStr,
        def: &'a InputValueDefinition,
    ) -> Result<Argument, SchemaError> {
        Ok(Argument {
            name: def.name.clone(),
            description: def.description.clone(),
            arg_type: self.build_input_type(&def.value_type, parent, def.position)?,
            default_value: def.default_value.as_ref().map(fold_value),
        })
    }

    /// Picks the resolver of a field: the wiring factory's if it claims the
    /// field, else the one wired for the field, else a property reader.
    fn build_data_fetcher(
        &self,
        parent: &ArcStr,
        def: &FieldDefinition,
    ) -> Result<FieldResolver, SchemaError> {
        let factory = self.wiring.wiring_factory();

        if factory.provides_data_fetcher(self.registry, def) {
            let fetcher = factory
                .get_data_fetcher(self.registry, def)
                .ok_or_else(|| WiringContractViolation {
                    capability: WiringCapability::DataFetcher,
                    name: def.name.clone(),
                })?;
            __idl_trace!(parent = %parent, field = %def.name, "data fetcher from wiring factory");
            return Ok(FieldResolver::Fetcher(fetcher));
        }

        if let Some(fetcher) = self.wiring.data_fetcher(parent, &def.name) {
            __idl_trace!(parent = %parent, field = %def.name, "wired data fetcher");
            return Ok(FieldResolver::Fetcher(Arc::clone(fetcher)));
        }

        __idl_trace!(parent = %parent, field = %def.name, "property data fetcher");
        Ok(FieldResolver::Property(PropertyDataFetcher::new(
            def.name.clone(),
        )))
    }

    /// Picks the type resolver of an interface or union: the wiring factory's
    /// if it claims the type, else the one wired for it.
    fn build_type_resolver(
        &self,
        definition: &TypeDefinition,
    ) -> Result<TypeResolverBinding, SchemaError> {
        let factory = self.wiring.wiring_factory();

        if factory.provides_type_resolver(self.registry, definition) {
            let resolver = factory
                .get_type_resolver(self.registry, definition)
                .ok_or_else(|| WiringContractViolation {
                    capability: WiringCapability::TypeResolver,
                    name: definition.name().clone(),
                })?;
            return Ok(TypeResolverBinding::Wired(resolver));
        }

        Ok(self
            .wiring
            .type_resolvers()
            .get(definition.name())
            .map_or(TypeResolverBinding::Unresolved, |r| {
                TypeResolverBinding::Wired(Arc::clone(r))
            }))
    }
}

fn build_enum_type(def: &EnumTypeDefinition) -> MetaType {
    MetaType::Enum(EnumMeta {
        name: def.name.clone(),
        description: def.description.clone(),
        values: def
            .values
            .iter()
            .map(|v| EnumValue {
                name: v.name.clone(),
                description: v.description.clone(),
            })
            .collect(),
    })
}

fn not_an_output_type(definition: &TypeDefinition) -> SchemaError {
    NotAnOutputTypeError {
        name: definition.name().clone(),
        kind: definition.kind(),
        location: definition.position(),
    }
    .into()
}

fn not_an_input_type(definition: &TypeDefinition) -> SchemaError {
    NotAnInputTypeError {
        name: definition.name().clone(),
        kind: definition.kind(),
        location: definition.position(),
    }
    .into()
}

/// Folds a default value literal into a native value.
///
/// The literal is not checked against the type it is a default of.
pub fn fold_value(literal: &InputValue) -> Value {
    match literal {
        InputValue::Null => Value::Null,
        InputValue::Int(i) => Value::Int(*i),
        InputValue::Float(f) => Value::Float(*f),
        InputValue::String(s) => Value::String(s.clone()),
        InputValue::Boolean(b) => Value::Boolean(*b),
        InputValue::Enum(name) => Value::Enum(name.clone()),
        InputValue::List(items) => Value::List(items.iter().map(fold_value).collect()),
        InputValue::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), fold_value(value)))
                .collect(),
        ),
    }
}
