//! Translation of [`graphql_parser`] schema documents.
//!
//! Only what assembly understands is carried over: directives and directive
//! definitions are dropped, and only object and interface types can be
//! extended.

use arcstr::ArcStr;
use derive_more::with_trait::{Display, Error, From};
use graphql_parser::{
    Pos,
    query::{Type as ExternalType, Value as ExternalValue},
    schema::{
        Definition as ExternalDefinition, Document, EnumValue as ExternalEnumValue,
        Field as ExternalField, InputValue as ExternalInputValue, ParseError,
        SchemaDefinition as ExternalSchemaDefinition, TypeDefinition as ExternalTypeDefinition,
        TypeExtension as ExternalTypeExtension,
    },
};

use crate::{
    ast::{
        Definition, EnumTypeDefinition, EnumValueDefinition, FieldDefinition,
        InputObjectTypeDefinition, InputValue, InputValueDefinition, InterfaceTypeDefinition,
        ObjectTypeDefinition, OperationType, OperationTypeDefinition, ScalarTypeDefinition,
        SchemaDefinition, Type, TypeDefinition, TypeExtensionDefinition, TypeKind,
        UnionTypeDefinition,
    },
    error::SchemaProblem,
    parser::SourcePosition,
    schema::registry::TypeDefinitionRegistry,
};

/// Failure to turn schema-language text into a [`TypeDefinitionRegistry`].
#[derive(Debug, Display, Error, From)]
pub enum SchemaLanguageError {
    /// The text is not a valid schema document.
    #[display("{_0}")]
    Parse(ParseError),

    /// An extension of a type kind that cannot carry extra fields.
    #[display("Cannot extend {kind} type '{name}' {location}, only objects and interfaces")]
    #[from(ignore)]
    UnsupportedExtension {
        /// Kind of the extended type.
        kind: TypeKind,
        /// Name of the extended type.
        name: ArcStr,
        /// Where the extension is.
        location: SourcePosition,
    },

    /// A default value refers to a variable.
    #[display("Variable '${name}' is not allowed in a default value {location}")]
    #[from(ignore)]
    VariableInDefaultValue {
        /// Name of the variable.
        name: ArcStr,
        /// Where the enclosing argument or input field is.
        location: SourcePosition,
    },

    /// The translated definitions conflict with each other.
    #[display("{_0}")]
    Schema(SchemaProblem),
}

/// Parses schema-language `source` into a fresh registry.
///
/// ```
/// # use graphql_idl::schema::translate::graphql_parser::parse_registry;
/// let registry = parse_registry(
///     "schema { query: Query } type Query { hello: String }",
/// ).unwrap();
///
/// assert!(registry.get_type_by_name("Query").is_some());
/// ```
pub fn parse_registry(source: &str) -> Result<TypeDefinitionRegistry, SchemaLanguageError> {
    __idl_span_debug!("parse_registry");

    let document = graphql_parser::parse_schema::<String>(source)?;
    let definitions = GraphQLParserTranslator::translate_document(&document)?;
    Ok(TypeDefinitionRegistry::from_definitions(definitions)?)
}

/// Converts parsed [`graphql_parser`] schema documents into [`Definition`]s.
pub struct GraphQLParserTranslator;

impl GraphQLParserTranslator {
    /// Translates every definition of `document`, in source order.
    pub fn translate_document(
        document: &Document<'_, String>,
    ) -> Result<Vec<Definition>, SchemaLanguageError> {
        let mut definitions = Vec::with_capacity(document.definitions.len());
        for definition in &document.definitions {
            match definition {
                ExternalDefinition::SchemaDefinition(schema) => {
                    definitions.push(Self::translate_schema_definition(schema).into());
                }
                ExternalDefinition::TypeDefinition(def) => {
                    definitions.push(Self::translate_type_definition(def)?.into());
                }
                ExternalDefinition::TypeExtension(ext) => {
                    definitions.push(Self::translate_type_extension(ext)?.into());
                }
                ExternalDefinition::DirectiveDefinition(_) => {
                    __idl_trace_debug!("skipping directive definition");
                }
            }
        }
        Ok(definitions)
    }

    fn translate_schema_definition(
        input: &ExternalSchemaDefinition<'_, String>,
    ) -> SchemaDefinition {
        let position = Self::translate_position(input.position);
        let operation_types = [
            (OperationType::Query, &input.query),
            (OperationType::Mutation, &input.mutation),
            (OperationType::Subscription, &input.subscription),
        ]
        .into_iter()
        .filter_map(|(operation, type_name)| {
            type_name.as_ref().map(|name| OperationTypeDefinition {
                operation,
                type_name: name.as_str().into(),
                position,
            })
        })
        .collect();

        SchemaDefinition {
            operation_types,
            position,
        }
    }

    fn translate_type_definition(
        input: &ExternalTypeDefinition<'_, String>,
    ) -> Result<TypeDefinition, SchemaLanguageError> {
        Ok(match input {
            ExternalTypeDefinition::Scalar(x) => ScalarTypeDefinition {
                name: x.name.as_str().into(),
                description: Self::translate_description(&x.description),
                position: Self::translate_position(x.position),
            }
            .into(),
            ExternalTypeDefinition::Object(x) => ObjectTypeDefinition {
                name: x.name.as_str().into(),
                description: Self::translate_description(&x.description),
                interfaces: Self::translate_names(&x.implements_interfaces),
                fields: Self::translate_fields(&x.fields)?,
                position: Self::translate_position(x.position),
            }
            .into(),
            ExternalTypeDefinition::Interface(x) => InterfaceTypeDefinition {
                name: x.name.as_str().into(),
                description: Self::translate_description(&x.description),
                fields: Self::translate_fields(&x.fields)?,
                position: Self::translate_position(x.position),
            }
            .into(),
            ExternalTypeDefinition::Union(x) => UnionTypeDefinition {
                name: x.name.as_str().into(),
                description: Self::translate_description(&x.description),
                member_types: Self::translate_names(&x.types),
                position: Self::translate_position(x.position),
            }
            .into(),
            ExternalTypeDefinition::Enum(x) => EnumTypeDefinition {
                name: x.name.as_str().into(),
                description: Self::translate_description(&x.description),
                values: x.values.iter().map(Self::translate_enum_value).collect(),
                position: Self::translate_position(x.position),
            }
            .into(),
            ExternalTypeDefinition::InputObject(x) => InputObjectTypeDefinition {
                name: x.name.as_str().into(),
                description: Self::translate_description(&x.description),
                fields: x
                    .fields
                    .iter()
                    .map(Self::translate_input_value)
                    .collect::<Result<_, _>>()?,
                position: Self::translate_position(x.position),
            }
            .into(),
        })
    }

    fn translate_type_extension(
        input: &ExternalTypeExtension<'_, String>,
    ) -> Result<TypeExtensionDefinition, SchemaLanguageError> {
        let unsupported = |kind, name: &String, position| SchemaLanguageError::UnsupportedExtension {
            kind,
            name: name.as_str().into(),
            location: Self::translate_position(position),
        };

        match input {
            ExternalTypeExtension::Object(x) => Ok(TypeExtensionDefinition {
                name: x.name.as_str().into(),
                interfaces: Self::translate_names(&x.implements_interfaces),
                fields: Self::translate_fields(&x.fields)?,
                position: Self::translate_position(x.position),
            }),
            ExternalTypeExtension::Interface(x) => Ok(TypeExtensionDefinition {
                name: x.name.as_str().into(),
                interfaces: Vec::new(),
                fields: Self::translate_fields(&x.fields)?,
                position: Self::translate_position(x.position),
            }),
            ExternalTypeExtension::Scalar(x) => {
                Err(unsupported(TypeKind::Scalar, &x.name, x.position))
            }
            ExternalTypeExtension::Union(x) => {
                Err(unsupported(TypeKind::Union, &x.name, x.position))
            }
            ExternalTypeExtension::Enum(x) => {
                Err(unsupported(TypeKind::Enum, &x.name, x.position))
            }
            ExternalTypeExtension::InputObject(x) => {
                Err(unsupported(TypeKind::InputObject, &x.name, x.position))
            }
        }
    }

    fn translate_fields(
        input: &[ExternalField<'_, String>],
    ) -> Result<Vec<FieldDefinition>, SchemaLanguageError> {
        input.iter().map(Self::translate_field).collect()
    }

    fn translate_field(
        input: &ExternalField<'_, String>,
    ) -> Result<FieldDefinition, SchemaLanguageError> {
        Ok(FieldDefinition {
            name: input.name.as_str().into(),
            description: Self::translate_description(&input.description),
            arguments: input
                .arguments
                .iter()
                .map(Self::translate_input_value)
                .collect::<Result<_, _>>()?,
            field_type: Self::translate_type(&input.field_type),
            position: Self::translate_position(input.position),
        })
    }

    fn translate_input_value(
        input: &ExternalInputValue<'_, String>,
    ) -> Result<InputValueDefinition, SchemaLanguageError> {
        let position = Self::translate_position(input.position);
        Ok(InputValueDefinition {
            name: input.name.as_str().into(),
            description: Self::translate_description(&input.description),
            value_type: Self::translate_type(&input.value_type),
            default_value: input
                .default_value
                .as_ref()
                .map(|v| Self::translate_value(v, position))
                .transpose()?,
            position,
        })
    }

    fn translate_enum_value(input: &ExternalEnumValue<'_, String>) -> EnumValueDefinition {
        EnumValueDefinition {
            name: input.name.as_str().into(),
            description: Self::translate_description(&input.description),
            position: Self::translate_position(input.position),
        }
    }

    fn translate_type(input: &ExternalType<'_, String>) -> Type {
        match input {
            ExternalType::NamedType(name) => Type::named(name.as_str()),
            ExternalType::ListType(of_type) => Type::list(Self::translate_type(of_type)),
            ExternalType::NonNullType(of_type) => Self::translate_type(of_type).non_null(),
        }
    }

    fn translate_value(
        input: &ExternalValue<'_, String>,
        location: SourcePosition,
    ) -> Result<InputValue, SchemaLanguageError> {
        Ok(match input {
            ExternalValue::Null => InputValue::Null,
            ExternalValue::Int(n) => n.as_i64().map_or(InputValue::Null, InputValue::Int),
            ExternalValue::Float(f) => InputValue::Float(*f),
            ExternalValue::String(s) => InputValue::String(s.clone()),
            ExternalValue::Boolean(b) => InputValue::Boolean(*b),
            ExternalValue::Enum(e) => InputValue::Enum(e.clone()),
            ExternalValue::List(items) => InputValue::List(
                items
                    .iter()
                    .map(|item| Self::translate_value(item, location))
                    .collect::<Result<_, _>>()?,
            ),
            ExternalValue::Object(fields) => InputValue::Object(
                fields
                    .iter()
                    .map(|(k, v)| Ok((k.clone(), Self::translate_value(v, location)?)))
                    .collect::<Result<_, SchemaLanguageError>>()?,
            ),
            ExternalValue::Variable(name) => {
                return Err(SchemaLanguageError::VariableInDefaultValue {
                    name: name.as_str().into(),
                    location,
                });
            }
        })
    }

    fn translate_names(input: &[String]) -> Vec<ArcStr> {
        input.iter().map(|name| name.as_str().into()).collect()
    }

    fn translate_description(input: &Option<String>) -> Option<ArcStr> {
        input.as_deref().map(ArcStr::from)
    }

    fn translate_position(input: Pos) -> SourcePosition {
        SourcePosition::new(input.line, input.column)
    }
}
