//! Syntax tree of schema definitions, as handed over by a schema parser

use std::fmt;

use arcstr::ArcStr;
use derive_more::with_trait::{Display, From};

use crate::parser::SourcePosition;

/// A type literal in the syntax tree
///
/// This enum carries no semantic information and might refer to types that do
/// not exist.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum Type {
    /// A nullable named type, e.g. `String`
    Named(ArcStr),
    /// A nullable list type, e.g. `[String]`
    ///
    /// The list itself is what's nullable, the containing type might be non-null.
    List(Box<Type>),
    /// A non-null named type, e.g. `String!`
    NonNullNamed(ArcStr),
    /// A non-null list type, e.g. `[String]!`.
    ///
    /// The list itself is what's non-null, the containing type might be null.
    NonNullList(Box<Type>),
}

impl Type {
    /// A nullable named type.
    pub fn named(name: impl Into<ArcStr>) -> Self {
        Self::Named(name.into())
    }

    /// A nullable list of `of_type`.
    pub fn list(of_type: Type) -> Self {
        Self::List(Box::new(of_type))
    }

    /// Turns this type literal into its non-null counterpart.
    #[must_use]
    pub fn non_null(self) -> Self {
        match self {
            Self::Named(n) => Self::NonNullNamed(n),
            Self::List(l) => Self::NonNullList(l),
            t => t,
        }
    }

    /// Get the name of a named type.
    ///
    /// Only applies to named types; lists will return `None`.
    pub fn name(&self) -> Option<&str> {
        match *self {
            Type::Named(ref n) | Type::NonNullNamed(ref n) => Some(n),
            _ => None,
        }
    }

    /// Get the innermost name by unpacking lists
    ///
    /// All type literals contain exactly one named type.
    pub fn innermost_name(&self) -> &ArcStr {
        match *self {
            Type::Named(ref n) | Type::NonNullNamed(ref n) => n,
            Type::List(ref l) | Type::NonNullList(ref l) => l.innermost_name(),
        }
    }

    /// Determines if a type only can represent non-null values.
    pub fn is_non_null(&self) -> bool {
        matches!(*self, Type::NonNullNamed(_) | Type::NonNullList(_))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(n) => write!(f, "{n}"),
            Self::NonNullNamed(n) => write!(f, "{n}!"),
            Self::List(t) => write!(f, "[{t}]"),
            Self::NonNullList(t) => write!(f, "[{t}]!"),
        }
    }
}

/// A constant literal as written in a schema definition, e.g. the default
/// value of an argument.
#[derive(Clone, Debug, PartialEq)]
#[expect(missing_docs, reason = "self-explanatory")]
pub enum InputValue {
    Null,
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Enum(String),
    List(Vec<InputValue>),
    Object(Vec<(String, InputValue)>),
}

impl InputValue {
    /// Construct an enum literal.
    pub fn enum_value(name: impl Into<String>) -> Self {
        Self::Enum(name.into())
    }

    /// Construct an object literal from `(name, value)` pairs, keeping their order.
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, InputValue)>) -> Self {
        Self::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// The kind of a named type.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum TypeKind {
    /// Leaf value with a codec.
    #[display("scalar")]
    Scalar,
    /// Composite output type with fields.
    #[display("object")]
    Object,
    /// Abstract type with fields.
    #[display("interface")]
    Interface,
    /// Abstract type over a set of objects.
    #[display("union")]
    Union,
    /// Leaf type with a fixed value set.
    #[display("enum")]
    Enum,
    /// Composite input type.
    #[display("input object")]
    InputObject,
}

impl TypeKind {
    /// Whether a type of this kind may appear in an argument or input field position.
    pub fn is_input(self) -> bool {
        matches!(self, Self::Scalar | Self::Enum | Self::InputObject)
    }

    /// Whether a type of this kind may appear as the type of an output field.
    pub fn is_output(self) -> bool {
        !matches!(self, Self::InputObject)
    }
}

/// An argument or input field definition, e.g. `first: Int = 10`
#[derive(Clone, Debug, PartialEq)]
pub struct InputValueDefinition {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub value_type: Type,
    #[doc(hidden)]
    pub default_value: Option<InputValue>,
    #[doc(hidden)]
    pub position: SourcePosition,
}

impl InputValueDefinition {
    /// Defines an input value without a default.
    pub fn new(name: impl Into<ArcStr>, value_type: Type) -> Self {
        Self {
            name: name.into(),
            description: None,
            value_type,
            default_value: None,
            position: SourcePosition::unknown(),
        }
    }

    /// Sets the default value literal.
    #[must_use]
    pub fn default_value(mut self, value: InputValue) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the source position.
    #[must_use]
    pub fn at(mut self, position: SourcePosition) -> Self {
        self.position = position;
        self
    }
}

/// A field definition of an object, interface or type extension
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub arguments: Vec<InputValueDefinition>,
    #[doc(hidden)]
    pub field_type: Type,
    #[doc(hidden)]
    pub position: SourcePosition,
}

impl FieldDefinition {
    /// Defines a field without arguments.
    pub fn new(name: impl Into<ArcStr>, field_type: Type) -> Self {
        Self {
            name: name.into(),
            description: None,
            arguments: Vec::new(),
            field_type,
            position: SourcePosition::unknown(),
        }
    }

    /// Appends an argument.
    #[must_use]
    pub fn argument(mut self, argument: InputValueDefinition) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the source position.
    #[must_use]
    pub fn at(mut self, position: SourcePosition) -> Self {
        self.position = position;
        self
    }
}

/// A single value of an enum definition
#[derive(Clone, Debug, PartialEq)]
pub struct EnumValueDefinition {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub position: SourcePosition,
}

impl EnumValueDefinition {
    /// Defines an enum value.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            position: SourcePosition::unknown(),
        }
    }
}

/// `type Name implements A & B { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectTypeDefinition {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub interfaces: Vec<ArcStr>,
    #[doc(hidden)]
    pub fields: Vec<FieldDefinition>,
    #[doc(hidden)]
    pub position: SourcePosition,
}

impl ObjectTypeDefinition {
    /// Defines an object type without fields.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            position: SourcePosition::unknown(),
        }
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Declares an implemented interface.
    #[must_use]
    pub fn implements(mut self, interface: impl Into<ArcStr>) -> Self {
        self.interfaces.push(interface.into());
        self
    }
}

/// `interface Name { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceTypeDefinition {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub fields: Vec<FieldDefinition>,
    #[doc(hidden)]
    pub position: SourcePosition,
}

impl InterfaceTypeDefinition {
    /// Defines an interface type without fields.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
            position: SourcePosition::unknown(),
        }
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }
}

/// `union Name = A | B`
#[derive(Clone, Debug, PartialEq)]
pub struct UnionTypeDefinition {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub member_types: Vec<ArcStr>,
    #[doc(hidden)]
    pub position: SourcePosition,
}

impl UnionTypeDefinition {
    /// Defines a union over the given member type names.
    pub fn new<N: Into<ArcStr>>(
        name: impl Into<ArcStr>,
        member_types: impl IntoIterator<Item = N>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            member_types: member_types.into_iter().map(Into::into).collect(),
            position: SourcePosition::unknown(),
        }
    }
}

/// `enum Name { A B }`
#[derive(Clone, Debug, PartialEq)]
pub struct EnumTypeDefinition {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub values: Vec<EnumValueDefinition>,
    #[doc(hidden)]
    pub position: SourcePosition,
}

impl EnumTypeDefinition {
    /// Defines an enum with the given value names.
    pub fn new<N: Into<ArcStr>>(name: impl Into<ArcStr>, values: impl IntoIterator<Item = N>) -> Self {
        Self {
            name: name.into(),
            description: None,
            values: values.into_iter().map(EnumValueDefinition::new).collect(),
            position: SourcePosition::unknown(),
        }
    }
}

/// `scalar Name`
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarTypeDefinition {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub position: SourcePosition,
}

impl ScalarTypeDefinition {
    /// Declares a scalar.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            position: SourcePosition::unknown(),
        }
    }
}

/// `input Name { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectTypeDefinition {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub fields: Vec<InputValueDefinition>,
    #[doc(hidden)]
    pub position: SourcePosition,
}

impl InputObjectTypeDefinition {
    /// Defines an input object without fields.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
            position: SourcePosition::unknown(),
        }
    }

    /// Appends an input field.
    #[must_use]
    pub fn field(mut self, field: InputValueDefinition) -> Self {
        self.fields.push(field);
        self
    }
}

/// A named type definition, one variant per kind
#[derive(Clone, Debug, From, PartialEq)]
#[expect(missing_docs, reason = "self-explanatory")]
pub enum TypeDefinition {
    Scalar(ScalarTypeDefinition),
    Object(ObjectTypeDefinition),
    Interface(InterfaceTypeDefinition),
    Union(UnionTypeDefinition),
    Enum(EnumTypeDefinition),
    InputObject(InputObjectTypeDefinition),
}

impl TypeDefinition {
    /// The name of the defined type.
    pub fn name(&self) -> &ArcStr {
        match self {
            Self::Scalar(ScalarTypeDefinition { name, .. })
            | Self::Object(ObjectTypeDefinition { name, .. })
            | Self::Interface(InterfaceTypeDefinition { name, .. })
            | Self::Union(UnionTypeDefinition { name, .. })
            | Self::Enum(EnumTypeDefinition { name, .. })
            | Self::InputObject(InputObjectTypeDefinition { name, .. }) => name,
        }
    }

    /// The description of the defined type, if any.
    pub fn description(&self) -> Option<&ArcStr> {
        match self {
            Self::Scalar(ScalarTypeDefinition { description, .. })
            | Self::Object(ObjectTypeDefinition { description, .. })
            | Self::Interface(InterfaceTypeDefinition { description, .. })
            | Self::Union(UnionTypeDefinition { description, .. })
            | Self::Enum(EnumTypeDefinition { description, .. })
            | Self::InputObject(InputObjectTypeDefinition { description, .. }) => {
                description.as_ref()
            }
        }
    }

    /// Where the type was defined.
    pub fn position(&self) -> SourcePosition {
        match self {
            Self::Scalar(ScalarTypeDefinition { position, .. })
            | Self::Object(ObjectTypeDefinition { position, .. })
            | Self::Interface(InterfaceTypeDefinition { position, .. })
            | Self::Union(UnionTypeDefinition { position, .. })
            | Self::Enum(EnumTypeDefinition { position, .. })
            | Self::InputObject(InputObjectTypeDefinition { position, .. }) => *position,
        }
    }

    /// The kind of the defined type.
    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Object(_) => TypeKind::Object,
            Self::Interface(_) => TypeKind::Interface,
            Self::Union(_) => TypeKind::Union,
            Self::Enum(_) => TypeKind::Enum,
            Self::InputObject(_) => TypeKind::InputObject,
        }
    }

    /// Replaces the source position of the definition.
    #[must_use]
    pub fn at(mut self, at: SourcePosition) -> Self {
        match &mut self {
            Self::Scalar(ScalarTypeDefinition { position, .. })
            | Self::Object(ObjectTypeDefinition { position, .. })
            | Self::Interface(InterfaceTypeDefinition { position, .. })
            | Self::Union(UnionTypeDefinition { position, .. })
            | Self::Enum(EnumTypeDefinition { position, .. })
            | Self::InputObject(InputObjectTypeDefinition { position, .. }) => *position = at,
        }
        self
    }

    /// Replaces the description of the definition.
    #[must_use]
    pub fn with_description(mut self, text: impl Into<ArcStr>) -> Self {
        let text = Some(text.into());
        match &mut self {
            Self::Scalar(ScalarTypeDefinition { description, .. })
            | Self::Object(ObjectTypeDefinition { description, .. })
            | Self::Interface(InterfaceTypeDefinition { description, .. })
            | Self::Union(UnionTypeDefinition { description, .. })
            | Self::Enum(EnumTypeDefinition { description, .. })
            | Self::InputObject(InputObjectTypeDefinition { description, .. }) => {
                *description = text
            }
        }
        self
    }
}

/// `extend type Name implements A { ... }`
///
/// Extensions accumulate per name and are never checked for redefinition.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeExtensionDefinition {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub interfaces: Vec<ArcStr>,
    #[doc(hidden)]
    pub fields: Vec<FieldDefinition>,
    #[doc(hidden)]
    pub position: SourcePosition,
}

impl TypeExtensionDefinition {
    /// An empty extension of the type named `name`.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            interfaces: Vec::new(),
            fields: Vec::new(),
            position: SourcePosition::unknown(),
        }
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Declares an additionally implemented interface.
    #[must_use]
    pub fn implements(mut self, interface: impl Into<ArcStr>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Sets the source position.
    #[must_use]
    pub fn at(mut self, position: SourcePosition) -> Self {
        self.position = position;
        self
    }
}

#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum OperationType {
    #[display("query")]
    Query,
    #[display("mutation")]
    Mutation,
    #[display("subscription")]
    Subscription,
}

/// `query: Query` inside a schema definition
#[derive(Clone, Debug, PartialEq)]
pub struct OperationTypeDefinition {
    #[doc(hidden)]
    pub operation: OperationType,
    #[doc(hidden)]
    pub type_name: ArcStr,
    #[doc(hidden)]
    pub position: SourcePosition,
}

/// `schema { query: Query mutation: Mutation }`
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaDefinition {
    #[doc(hidden)]
    pub operation_types: Vec<OperationTypeDefinition>,
    #[doc(hidden)]
    pub position: SourcePosition,
}

impl SchemaDefinition {
    /// A schema definition with only a query root.
    pub fn query(type_name: impl Into<ArcStr>) -> Self {
        Self {
            operation_types: Vec::new(),
            position: SourcePosition::unknown(),
        }
        .operation(OperationType::Query, type_name)
    }

    /// Binds `operation` to the root type named `type_name`.
    #[must_use]
    pub fn operation(mut self, operation: OperationType, type_name: impl Into<ArcStr>) -> Self {
        self.operation_types.push(OperationTypeDefinition {
            operation,
            type_name: type_name.into(),
            position: SourcePosition::unknown(),
        });
        self
    }

    /// Sets the source position.
    #[must_use]
    pub fn at(mut self, position: SourcePosition) -> Self {
        self.position = position;
        self
    }

    /// The root type bound to `operation`, if any.
    pub fn root_type(&self, operation: OperationType) -> Option<&OperationTypeDefinition> {
        self.operation_types
            .iter()
            .find(|op| op.operation == operation)
    }
}

/// A top-level definition as produced by a schema parser
#[derive(Clone, Debug, From, PartialEq)]
#[expect(missing_docs, reason = "self-explanatory")]
pub enum Definition {
    Type(TypeDefinition),
    Extension(TypeExtensionDefinition),
    Schema(SchemaDefinition),
}

impl From<ObjectTypeDefinition> for Definition {
    fn from(def: ObjectTypeDefinition) -> Self {
        Self::Type(def.into())
    }
}

impl From<InterfaceTypeDefinition> for Definition {
    fn from(def: InterfaceTypeDefinition) -> Self {
        Self::Type(def.into())
    }
}

impl From<UnionTypeDefinition> for Definition {
    fn from(def: UnionTypeDefinition) -> Self {
        Self::Type(def.into())
    }
}

impl From<EnumTypeDefinition> for Definition {
    fn from(def: EnumTypeDefinition) -> Self {
        Self::Type(def.into())
    }
}

impl From<ScalarTypeDefinition> for Definition {
    fn from(def: ScalarTypeDefinition) -> Self {
        Self::Type(def.into())
    }
}

impl From<InputObjectTypeDefinition> for Definition {
    fn from(def: InputObjectTypeDefinition) -> Self {
        Self::Type(def.into())
    }
}
