//! Types used to describe an assembled schema

use std::{fmt, sync::Arc};

use arcstr::ArcStr;

use crate::{
    ast::TypeKind,
    schema::{
        resolvers::{FieldResolver, TypeResolverBinding},
        scalars::ScalarType,
    },
    value::Value,
};

/// An occurrence of a type: a named type wrapped in list and non-null markers
///
/// Named types are either shared, finished [`MetaType`]s, or placeholders
/// standing for a type that was still being built when the occurrence was
/// met. Use [`TypeGraph::concrete_type()`] to look through both.
///
/// [`TypeGraph::concrete_type()`]: crate::TypeGraph::concrete_type
#[derive(Clone)]
pub enum TypeType {
    /// A finished named type.
    Concrete(Arc<MetaType>),
    /// A forward reference to the named type, left where a reference cycle
    /// was broken.
    Placeholder(ArcStr),
    /// A nullable list of the inner type.
    List(Box<TypeType>),
    /// The inner type, which must not be null.
    NonNull(Box<TypeType>),
}

impl TypeType {
    /// Wraps this occurrence in a list.
    #[must_use]
    pub fn list(self) -> Self {
        Self::List(Box::new(self))
    }

    /// Makes this occurrence non-null.
    ///
    /// Occurrences that are already non-null stay as they are.
    #[must_use]
    pub fn non_null(self) -> Self {
        match self {
            t @ Self::NonNull(_) => t,
            t => Self::NonNull(Box::new(t)),
        }
    }

    /// Name of the named type at the bottom of the wrappers.
    pub fn innermost_name(&self) -> &ArcStr {
        match self {
            Self::Concrete(meta) => meta.name(),
            Self::Placeholder(name) => name,
            Self::List(inner) | Self::NonNull(inner) => inner.innermost_name(),
        }
    }

    /// The occurrence directly wrapped by a list or non-null marker.
    pub fn of_type(&self) -> Option<&TypeType> {
        match self {
            Self::List(inner) | Self::NonNull(inner) => Some(inner),
            Self::Concrete(_) | Self::Placeholder(_) => None,
        }
    }

    /// The finished named type, if this is one without any wrappers.
    pub fn as_concrete(&self) -> Option<&Arc<MetaType>> {
        match self {
            Self::Concrete(meta) => Some(meta),
            _ => None,
        }
    }

    /// The finished named type at the bottom of the wrappers, unless it is a
    /// placeholder.
    pub fn innermost_concrete(&self) -> Option<&Arc<MetaType>> {
        match self {
            Self::Concrete(meta) => Some(meta),
            Self::Placeholder(_) => None,
            Self::List(inner) | Self::NonNull(inner) => inner.innermost_concrete(),
        }
    }

    /// Whether the named type at the bottom is a placeholder.
    pub fn is_placeholder(&self) -> bool {
        match self {
            Self::Placeholder(_) => true,
            Self::Concrete(_) => false,
            Self::List(inner) | Self::NonNull(inner) => inner.is_placeholder(),
        }
    }

    /// Whether this occurrence only allows non-null values.
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// Whether this occurrence is a list, possibly non-null.
    pub fn is_list(&self) -> bool {
        match self {
            Self::List(_) => true,
            Self::NonNull(inner) => inner.is_list(),
            Self::Concrete(_) | Self::Placeholder(_) => false,
        }
    }
}

impl fmt::Display for TypeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concrete(meta) => write!(f, "{}", meta.name()),
            Self::Placeholder(name) => write!(f, "{name}"),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

impl fmt::Debug for TypeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concrete(meta) => f.debug_tuple("Concrete").field(meta.name()).finish(),
            Self::Placeholder(name) => f.debug_tuple("Placeholder").field(name).finish(),
            Self::List(inner) => f.debug_tuple("List").field(inner).finish(),
            Self::NonNull(inner) => f.debug_tuple("NonNull").field(inner).finish(),
        }
    }
}

/// Object type metadata
#[derive(Debug)]
pub struct ObjectMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub fields: Vec<Field>,
    #[doc(hidden)]
    pub interfaces: Vec<TypeType>,
}

/// Interface type metadata
#[derive(Debug)]
pub struct InterfaceMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub fields: Vec<Field>,
    #[doc(hidden)]
    pub type_resolver: TypeResolverBinding,
}

/// Union type metadata
#[derive(Debug)]
pub struct UnionMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub possible_types: Vec<TypeType>,
    #[doc(hidden)]
    pub type_resolver: TypeResolverBinding,
}

/// Enum type metadata
#[derive(Debug)]
pub struct EnumMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub values: Vec<EnumValue>,
}

/// Input object metadata
#[derive(Debug)]
pub struct InputObjectMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub input_fields: Vec<Argument>,
}

/// Generic type metadata
#[derive(Debug)]
pub enum MetaType {
    #[doc(hidden)]
    Scalar(ScalarType),
    #[doc(hidden)]
    Object(ObjectMeta),
    #[doc(hidden)]
    Interface(InterfaceMeta),
    #[doc(hidden)]
    Union(UnionMeta),
    #[doc(hidden)]
    Enum(EnumMeta),
    #[doc(hidden)]
    InputObject(InputObjectMeta),
}

/// Metadata for a field
#[derive(Clone, Debug)]
pub struct Field {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub arguments: Vec<Argument>,
    #[doc(hidden)]
    pub field_type: TypeType,
    #[doc(hidden)]
    pub resolver: FieldResolver,
}

/// Metadata for an argument to a field, or for an input object field
#[derive(Clone, Debug)]
pub struct Argument {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub arg_type: TypeType,
    #[doc(hidden)]
    pub default_value: Option<Value>,
}

/// Metadata for a single value in an enum
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnumValue {
    /// The name of the enum value
    ///
    /// This is the string literal representation of the enum in responses.
    pub name: ArcStr,
    /// The optional description of the enum value.
    ///
    /// Note: this is not the description of the enum itself; it's the
    /// description of this enum _value_.
    pub description: Option<ArcStr>,
}

impl MetaType {
    /// Access the name of the type
    pub fn name(&self) -> &ArcStr {
        match self {
            Self::Scalar(s) => s.name(),
            Self::Object(ObjectMeta { name, .. })
            | Self::Interface(InterfaceMeta { name, .. })
            | Self::Union(UnionMeta { name, .. })
            | Self::Enum(EnumMeta { name, .. })
            | Self::InputObject(InputObjectMeta { name, .. }) => name,
        }
    }

    /// Access the description of the type, if any
    pub fn description(&self) -> Option<&ArcStr> {
        match self {
            Self::Scalar(s) => s.description_text(),
            Self::Object(ObjectMeta { description, .. })
            | Self::Interface(InterfaceMeta { description, .. })
            | Self::Union(UnionMeta { description, .. })
            | Self::Enum(EnumMeta { description, .. })
            | Self::InputObject(InputObjectMeta { description, .. }) => description.as_ref(),
        }
    }

    /// The kind of the type
    pub fn type_kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Object(_) => TypeKind::Object,
            Self::Interface(_) => TypeKind::Interface,
            Self::Union(_) => TypeKind::Union,
            Self::Enum(_) => TypeKind::Enum,
            Self::InputObject(_) => TypeKind::InputObject,
        }
    }

    /// Fields of an object or interface
    ///
    /// Other types have no fields.
    pub fn fields(&self) -> &[Field] {
        match self {
            Self::Object(ObjectMeta { fields, .. })
            | Self::Interface(InterfaceMeta { fields, .. }) => fields,
            _ => &[],
        }
    }

    /// Access a field's meta data given its name
    ///
    /// Only objects and interfaces have fields. This method always returns
    /// `None` for other types.
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields().iter().find(|f| f.name == name)
    }

    /// Access an input field's meta data given its name
    ///
    /// Only input objects have input fields. This method always returns
    /// `None` for other types.
    pub fn input_field_by_name(&self, name: &str) -> Option<&Argument> {
        match self {
            Self::InputObject(InputObjectMeta { input_fields, .. }) => {
                input_fields.iter().find(|f| f.name == name)
            }
            _ => None,
        }
    }

    /// The abstract-type resolver of an interface or union
    pub fn type_resolver(&self) -> Option<&TypeResolverBinding> {
        match self {
            Self::Interface(InterfaceMeta { type_resolver, .. })
            | Self::Union(UnionMeta { type_resolver, .. }) => Some(type_resolver),
            _ => None,
        }
    }

    /// Names of the interfaces an object implements
    pub fn interface_names(&self) -> Vec<&ArcStr> {
        match self {
            Self::Object(ObjectMeta { interfaces, .. }) => {
                interfaces.iter().map(TypeType::innermost_name).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Names of the member types of a union
    pub fn possible_type_names(&self) -> Vec<&ArcStr> {
        match self {
            Self::Union(UnionMeta { possible_types, .. }) => {
                possible_types.iter().map(TypeType::innermost_name).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Every type occurrence this type refers to: field, argument, interface,
    /// member and input field types, in definition order.
    pub fn type_occurrences(&self) -> Vec<&TypeType> {
        match self {
            Self::Object(ObjectMeta {
                fields, interfaces, ..
            }) => fields
                .iter()
                .flat_map(Field::type_occurrences)
                .chain(interfaces)
                .collect(),
            Self::Interface(InterfaceMeta { fields, .. }) => {
                fields.iter().flat_map(Field::type_occurrences).collect()
            }
            Self::Union(UnionMeta { possible_types, .. }) => possible_types.iter().collect(),
            Self::InputObject(InputObjectMeta { input_fields, .. }) => {
                input_fields.iter().map(|f| &f.arg_type).collect()
            }
            Self::Scalar(_) | Self::Enum(_) => Vec::new(),
        }
    }

    /// Returns true if the type is a composite type
    ///
    /// Objects, interfaces, and unions are composite.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Interface(_) | Self::Union(_))
    }

    /// Returns true if the type can occur in leaf positions in queries
    ///
    /// Only enums and scalars are leaf types.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Enum(_) | Self::Scalar(_))
    }

    /// Returns true if the type is abstract
    ///
    /// Only interfaces and unions are abstract types.
    pub fn is_abstract(&self) -> bool {
        matches!(self, Self::Interface(_) | Self::Union(_))
    }

    /// Returns true if the type can be used in input positions, e.g. arguments
    pub fn is_input(&self) -> bool {
        self.type_kind().is_input()
    }

    /// Returns true if the type can be the type of a field
    pub fn is_output(&self) -> bool {
        self.type_kind().is_output()
    }
}

impl Field {
    /// Access an argument's meta data given its name
    pub fn argument_by_name(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.name == name)
    }

    fn type_occurrences(&self) -> impl Iterator<Item = &TypeType> {
        self.arguments
            .iter()
            .map(|a| &a.arg_type)
            .chain([&self.field_type])
    }
}
