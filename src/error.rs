//! Problems reported while registering definitions and assembling a schema

use std::{fmt, slice, vec};

use arcstr::ArcStr;
use derive_more::with_trait::{Display, Error, From};

use crate::{
    ast::{OperationType, TypeKind},
    parser::SourcePosition,
};

/// Two non-extension definitions share a type name.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
#[display("'{name}' type {location} tried to redefine existing '{name}' type {existing_location}")]
pub struct TypeRedefinitionError {
    /// Name both definitions claim.
    pub name: ArcStr,
    /// Where the offending new definition is.
    pub location: SourcePosition,
    /// Where the definition registered first is.
    pub existing_location: SourcePosition,
}

/// Two schema definitions were combined.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
#[display(
    "There is already a schema defined {existing_location}. The offending new one is here {location}"
)]
pub struct SchemaRedefinitionError {
    /// Where the offending new schema definition is.
    pub location: SourcePosition,
    /// Where the schema definition registered first is.
    pub existing_location: SourcePosition,
}

/// An output position references a type that can only be used as input.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
#[display("expected OutputType, but found {kind} type '{name}' {location}")]
pub struct NotAnOutputTypeError {
    /// Name of the referenced type.
    pub name: ArcStr,
    /// Kind of the referenced type.
    pub kind: TypeKind,
    /// Where the referenced type is defined.
    pub location: SourcePosition,
}

/// An input position references a type that can only be used as output.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
#[display("expected InputType, but found {kind} type '{name}' {location}")]
pub struct NotAnInputTypeError {
    /// Name of the referenced type.
    pub name: ArcStr,
    /// Kind of the referenced type.
    pub kind: TypeKind,
    /// Where the referenced type is defined.
    pub location: SourcePosition,
}

/// The behavior a [`WiringFactory`] can offer.
///
/// [`WiringFactory`]: crate::WiringFactory
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum WiringCapability {
    /// Field resolvers.
    #[display("data fetcher")]
    DataFetcher,
    /// Abstract-type resolvers.
    #[display("type resolver")]
    TypeResolver,
}

/// A [`WiringFactory`] claimed a capability and then provided nothing.
///
/// [`WiringFactory`]: crate::WiringFactory
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
#[display(
    "The WiringFactory indicated it provides a {capability} for '{name}' but then returned none"
)]
pub struct WiringContractViolation {
    /// Which capability was claimed.
    pub capability: WiringCapability,
    /// The field or abstract type the capability was claimed for.
    pub name: ArcStr,
}

/// A type occurrence names a type that is neither defined nor built in.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
#[display("The type '{name}' {location} is not present when resolving type '{context}'")]
pub struct UnknownTypeError {
    /// The missing type name.
    pub name: ArcStr,
    /// The type whose definition references it.
    pub context: ArcStr,
    /// Where the referencing definition is.
    pub location: SourcePosition,
}

/// A scalar is declared but the runtime wiring has no implementation for it.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
#[display("There is no scalar implementation for the named '{name}' scalar type {location}")]
pub struct MissingScalarError {
    /// Name of the declared scalar.
    pub name: ArcStr,
    /// Where the scalar is declared.
    pub location: SourcePosition,
}

/// A root operation type could not be wired.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
pub enum OperationRootError {
    /// The registry carries no schema definition at all.
    #[display("A schema definition is required to assemble a schema")]
    MissingSchemaDefinition,

    /// The schema definition carries no `query` binding.
    #[display("A schema MUST have a 'query' operation defined {_0}")]
    MissingQueryOperation(#[error(not(source))] SourcePosition),

    /// A root operation type is not an object type.
    #[display("The operation type '{operation}' must be an object type, but '{name}' is a {kind}")]
    NotAnObject {
        /// The operation being wired.
        operation: OperationType,
        /// Name of the offending root type.
        name: ArcStr,
        /// Kind of the offending root type.
        kind: TypeKind,
    },
}

/// Any single problem found in a registry or while assembling.
#[derive(Clone, Debug, Display, Eq, Error, From, PartialEq)]
#[expect(missing_docs, reason = "self-explanatory")]
pub enum SchemaError {
    TypeRedefinition(TypeRedefinitionError),
    SchemaRedefinition(SchemaRedefinitionError),
    NotAnOutputType(NotAnOutputTypeError),
    NotAnInputType(NotAnInputTypeError),
    WiringContract(WiringContractViolation),
    UnknownType(UnknownTypeError),
    MissingScalar(MissingScalarError),
    OperationRoot(OperationRootError),
}

/// One or more problems that stopped a registry operation or an assembly.
///
/// Registry operations collect every conflict they find before failing;
/// assembly stops at the first problem.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub struct SchemaProblem {
    errors: Vec<SchemaError>,
}

impl SchemaProblem {
    /// Wraps an ordered list of errors.
    pub fn new(errors: Vec<SchemaError>) -> Self {
        Self { errors }
    }

    /// The errors, in the order they were found.
    pub fn errors(&self) -> &[SchemaError] {
        &self.errors
    }

    /// Unwraps the error list.
    pub fn into_errors(self) -> Vec<SchemaError> {
        self.errors
    }
}

impl From<SchemaError> for SchemaProblem {
    fn from(e: SchemaError) -> Self {
        Self::new(vec![e])
    }
}

impl fmt::Display for SchemaProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SchemaProblem{{errors=[")?;
        for (idx, e) in self.errors.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{e}")?;
        }
        write!(f, "]}}")
    }
}

impl<'a> IntoIterator for &'a SchemaProblem {
    type Item = &'a SchemaError;
    type IntoIter = slice::Iter<'a, SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl IntoIterator for SchemaProblem {
    type Item = SchemaError;
    type IntoIter = vec::IntoIter<SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// A [`TypeRuntimeWiring`] was built before a type name was given.
///
/// [`TypeRuntimeWiring`]: crate::TypeRuntimeWiring
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
#[display("you must provide a type name")]
pub struct MissingTypeNameError;

#[cfg(test)]
mod tests {
    use super::{
        OperationRootError, SchemaError, SchemaProblem, TypeRedefinitionError,
        WiringCapability, WiringContractViolation,
    };
    use crate::parser::SourcePosition;

    #[test]
    fn redefinition_message_names_both_locations() {
        let e = TypeRedefinitionError {
            name: "Foo".into(),
            location: SourcePosition::new(5, 1),
            existing_location: SourcePosition::new(1, 1),
        };

        assert_eq!(
            e.to_string(),
            "'Foo' type [@5:1] tried to redefine existing 'Foo' type [@1:1]",
        );
    }

    #[test]
    fn problem_lists_every_error() {
        let problem = SchemaProblem::new(vec![
            OperationRootError::MissingSchemaDefinition.into(),
            SchemaError::from(WiringContractViolation {
                capability: WiringCapability::TypeResolver,
                name: "Character".into(),
            }),
        ]);

        assert_eq!(problem.errors().len(), 2);
        assert_eq!(
            problem.to_string(),
            "SchemaProblem{errors=[\
             A schema definition is required to assemble a schema, \
             The WiringFactory indicated it provides a type resolver for 'Character' \
             but then returned none]}",
        );
    }
}
