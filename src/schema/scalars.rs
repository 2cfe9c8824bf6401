//! Scalar codecs and the built-in scalar set

use std::{fmt, sync::Arc};

use arcstr::ArcStr;
use derive_more::with_trait::{Display, Error};

use crate::{
    ast::{InputValue, ScalarTypeDefinition},
    value::Value,
};

/// Names of the scalars every schema knows without declaring them.
pub const STANDARD_SCALAR_NAMES: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

/// Error of a [`Coercing`] conversion.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
#[display("Expected `{type_name}`, found: {found}")]
pub struct CoercingError {
    /// Name of the scalar that refused the value.
    pub type_name: ArcStr,
    /// Rendering of the refused value.
    pub found: String,
}

impl CoercingError {
    fn new(type_name: &str, found: impl fmt::Display) -> Self {
        Self {
            type_name: type_name.into(),
            found: found.to_string(),
        }
    }
}

/// Conversion rules of a scalar between runtime values and the wire.
pub trait Coercing: Send + Sync {
    /// Converts a resolved runtime value into its output form.
    fn serialize(&self, value: &Value) -> Result<Value, CoercingError>;

    /// Converts a variable value into the runtime form.
    fn parse_value(&self, input: &Value) -> Result<Value, CoercingError>;

    /// Converts a literal written in a document into the runtime form.
    fn parse_literal(&self, input: &InputValue) -> Result<Value, CoercingError>;
}

/// Scalar type metadata: a name bound to a [`Coercing`] codec
#[derive(Clone)]
pub struct ScalarType {
    name: ArcStr,
    description: Option<ArcStr>,
    coercing: Arc<dyn Coercing>,
}

impl ScalarType {
    /// Binds `coercing` to the scalar named `name`.
    pub fn new(name: impl Into<ArcStr>, coercing: impl Coercing + 'static) -> Self {
        Self {
            name: name.into(),
            description: None,
            coercing: Arc::new(coercing),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Name of the scalar.
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// Description of the scalar, if any.
    pub fn description_text(&self) -> Option<&ArcStr> {
        self.description.as_ref()
    }

    /// The codec of the scalar.
    pub fn coercing(&self) -> &dyn Coercing {
        &*self.coercing
    }

    /// Whether both handles share one codec instance.
    pub fn same_codec(&self, other: &ScalarType) -> bool {
        Arc::ptr_eq(&self.coercing, &other.coercing)
    }
}

impl fmt::Debug for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarType")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// The codecs of the built-in scalars.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum BuiltinScalar {
    Int,
    Float,
    String,
    Boolean,
    Id,
}

impl BuiltinScalar {
    fn name(self) -> &'static str {
        match self {
            Self::Int => "Int",
            Self::Float => "Float",
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Id => "ID",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Int => "Built-in Int",
            Self::Float => "Built-in Float",
            Self::String => "Built-in String",
            Self::Boolean => "Built-in Boolean",
            Self::Id => "Built-in ID",
        }
    }

    fn coerce(self, value: &Value) -> Option<Value> {
        match (self, value) {
            (Self::Int, Value::Int(i)) if i32::try_from(*i).is_ok() => Some(Value::Int(*i)),
            (Self::Float, Value::Float(f)) => Some(Value::Float(*f)),
            // Integers are accepted as floats.
            (Self::Float, Value::Int(i)) => Some(Value::Float(*i as f64)),
            (Self::String, Value::String(s)) => Some(Value::String(s.clone())),
            (Self::Boolean, Value::Boolean(b)) => Some(Value::Boolean(*b)),
            (Self::Id, Value::String(s)) => Some(Value::String(s.clone())),
            (Self::Id, Value::Int(i)) => Some(Value::String(i.to_string())),
            _ => None,
        }
    }
}

impl Coercing for BuiltinScalar {
    fn serialize(&self, value: &Value) -> Result<Value, CoercingError> {
        self.coerce(value)
            .ok_or_else(|| CoercingError::new(self.name(), value))
    }

    fn parse_value(&self, input: &Value) -> Result<Value, CoercingError> {
        self.coerce(input)
            .ok_or_else(|| CoercingError::new(self.name(), input))
    }

    fn parse_literal(&self, input: &InputValue) -> Result<Value, CoercingError> {
        let value = match input {
            InputValue::Int(i) => Value::Int(*i),
            InputValue::Float(f) => Value::Float(*f),
            InputValue::String(s) => Value::String(s.clone()),
            InputValue::Boolean(b) => Value::Boolean(*b),
            other => return Err(CoercingError::new(self.name(), format!("{other:?}"))),
        };
        self.parse_value(&value)
    }
}

const BUILTINS: [BuiltinScalar; 5] = [
    BuiltinScalar::Int,
    BuiltinScalar::Float,
    BuiltinScalar::String,
    BuiltinScalar::Boolean,
    BuiltinScalar::Id,
];

/// Codecs of the built-in scalars, in [`STANDARD_SCALAR_NAMES`] order.
pub fn standard_scalars() -> impl Iterator<Item = ScalarType> {
    BUILTINS
        .into_iter()
        .map(|s| ScalarType::new(s.name(), s).description(s.description()))
}

/// Definitions of the built-in scalars, as if they had been declared.
pub fn standard_scalar_definitions() -> impl Iterator<Item = ScalarTypeDefinition> {
    BUILTINS.into_iter().map(|s| ScalarTypeDefinition {
        name: s.name().into(),
        description: Some(s.description().into()),
        position: Default::default(),
    })
}

/// Whether `name` is one of the built-in scalars.
pub fn is_standard_scalar(name: &str) -> bool {
    STANDARD_SCALAR_NAMES.contains(&name)
}
