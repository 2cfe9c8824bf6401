#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Instrumentation macros, must precede every module using them.
#[macro_use]
mod macros;

pub mod ast;
pub mod error;
pub mod parser;
pub mod schema;
pub mod value;

#[cfg(test)]
mod tests;

#[cfg(feature = "schema-language")]
pub use crate::schema::translate::graphql_parser::{SchemaLanguageError, parse_registry};
pub use crate::{
    ast::{Definition, InputValue, Type, TypeDefinition, TypeExtensionDefinition, TypeKind},
    error::{SchemaError, SchemaProblem},
    parser::SourcePosition,
    schema::{
        factory::{NoopWiringFactory, StaticWiringFactory, WiringFactory},
        generator::{SchemaGenerator, assemble},
        meta::{MetaType, TypeType},
        model::TypeGraph,
        registry::TypeDefinitionRegistry,
        resolvers::{
            DataFetcher, DataFetchingEnvironment, FieldError, FieldResult, PropertyDataFetcher,
            TypeResolutionEnvironment, TypeResolver,
        },
        scalars::{Coercing, ScalarType},
        wiring::{RuntimeWiring, TypeRuntimeWiring},
    },
    value::Value,
};
