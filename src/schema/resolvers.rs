//! Behavior bound onto the structural schema: field and abstract-type resolvers

use std::{fmt, sync::Arc};

use arcstr::ArcStr;
use indexmap::IndexMap;

use crate::value::Value;

/// Error while resolving a field
///
/// Carries a message and free-form extension data, which an executor would
/// report alongside the message.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldError {
    message: String,
    extensions: Value,
}

impl<T: fmt::Display> From<T> for FieldError {
    fn from(e: T) -> Self {
        Self {
            message: e.to_string(),
            extensions: Value::null(),
        }
    }
}

impl FieldError {
    /// Construct a new error with additional data
    pub fn new(e: impl fmt::Display, extensions: Value) -> Self {
        Self {
            message: e.to_string(),
            extensions,
        }
    }

    /// Access the message for the error
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Access the extension data for the error
    pub fn extensions(&self) -> &Value {
        &self.extensions
    }
}

/// The result of resolving one field
pub type FieldResult<T = Value> = Result<T, FieldError>;

/// Everything a [`DataFetcher`] gets to see about the field being resolved
#[derive(Clone, Copy, Debug)]
pub struct DataFetchingEnvironment<'a> {
    /// Runtime value of the parent object.
    pub source: &'a Value,
    /// Coerced argument values, by argument name.
    pub arguments: &'a IndexMap<String, Value>,
    /// Name of the field being resolved.
    pub field_name: &'a str,
}

/// Produces the runtime value of a field
///
/// Implemented for every `Fn(&DataFetchingEnvironment) -> FieldResult`.
pub trait DataFetcher: Send + Sync {
    /// Resolves the field described by `env`.
    fn get(&self, env: &DataFetchingEnvironment<'_>) -> FieldResult;
}

impl<F> DataFetcher for F
where
    F: Fn(&DataFetchingEnvironment<'_>) -> FieldResult + Send + Sync,
{
    fn get(&self, env: &DataFetchingEnvironment<'_>) -> FieldResult {
        self(env)
    }
}

/// Reads a same-named property off the parent value
///
/// Missing properties, and parents that are not objects, resolve to null.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PropertyDataFetcher {
    property: ArcStr,
}

impl PropertyDataFetcher {
    /// A fetcher reading `property`.
    pub fn new(property: impl Into<ArcStr>) -> Self {
        Self {
            property: property.into(),
        }
    }

    /// Name of the property read.
    pub fn property_name(&self) -> &ArcStr {
        &self.property
    }
}

impl DataFetcher for PropertyDataFetcher {
    fn get(&self, env: &DataFetchingEnvironment<'_>) -> FieldResult {
        Ok(env
            .source
            .property(&self.property)
            .cloned()
            .unwrap_or(Value::Null))
    }
}

/// The resolver bound to an assembled field
#[derive(Clone)]
pub enum FieldResolver {
    /// The default: read the property named after the field.
    Property(PropertyDataFetcher),
    /// A resolver supplied by the runtime wiring or a wiring factory.
    Fetcher(Arc<dyn DataFetcher>),
}

impl FieldResolver {
    /// Runs the resolver.
    pub fn resolve(&self, env: &DataFetchingEnvironment<'_>) -> FieldResult {
        match self {
            Self::Property(p) => p.get(env),
            Self::Fetcher(f) => f.get(env),
        }
    }

    /// The property read, if this is the default property resolver.
    pub fn property_name(&self) -> Option<&str> {
        match self {
            Self::Property(p) => Some(p.property_name()),
            Self::Fetcher(_) => None,
        }
    }

    /// Whether this resolver is exactly `fetcher`.
    pub fn is_fetcher(&self, fetcher: &Arc<dyn DataFetcher>) -> bool {
        match self {
            Self::Property(_) => false,
            Self::Fetcher(f) => Arc::ptr_eq(f, fetcher),
        }
    }
}

impl fmt::Debug for FieldResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property(p) => f.debug_tuple("Property").field(p.property_name()).finish(),
            Self::Fetcher(_) => f.write_str("Fetcher(..)"),
        }
    }
}

/// Everything a [`TypeResolver`] gets to see about the value being typed
#[derive(Clone, Copy, Debug)]
pub struct TypeResolutionEnvironment<'a> {
    /// The runtime value whose concrete type is asked for.
    pub value: &'a Value,
    /// Name of the interface or union the value was resolved as.
    pub abstract_type: &'a str,
}

/// Picks the concrete object type of a value of an interface or union type
///
/// Implemented for every `Fn(&TypeResolutionEnvironment) -> Option<ArcStr>`.
pub trait TypeResolver: Send + Sync {
    /// Name of the concrete object type, or `None` if the value fits none.
    fn resolve_type(&self, env: &TypeResolutionEnvironment<'_>) -> Option<ArcStr>;
}

impl<F> TypeResolver for F
where
    F: Fn(&TypeResolutionEnvironment<'_>) -> Option<ArcStr> + Send + Sync,
{
    fn resolve_type(&self, env: &TypeResolutionEnvironment<'_>) -> Option<ArcStr> {
        self(env)
    }
}

/// The abstract-type resolver bound to an assembled interface or union
#[derive(Clone)]
pub enum TypeResolverBinding {
    /// A resolver supplied by the runtime wiring or a wiring factory.
    Wired(Arc<dyn TypeResolver>),
    /// Nothing was wired; resolution is left to the executor.
    Unresolved,
}

impl TypeResolverBinding {
    /// Runs the bound resolver, if any.
    pub fn resolve_type(&self, env: &TypeResolutionEnvironment<'_>) -> Option<ArcStr> {
        match self {
            Self::Wired(r) => r.resolve_type(env),
            Self::Unresolved => {
                __idl_trace_warn!(
                    abstract_type = env.abstract_type,
                    "no type resolver wired"
                );
                None
            }
        }
    }

    /// Whether a resolver was wired.
    pub fn is_wired(&self) -> bool {
        matches!(self, Self::Wired(_))
    }

    /// Whether this binding is exactly `resolver`.
    pub fn is_resolver(&self, resolver: &Arc<dyn TypeResolver>) -> bool {
        match self {
            Self::Wired(r) => Arc::ptr_eq(r, resolver),
            Self::Unresolved => false,
        }
    }
}

impl fmt::Debug for TypeResolverBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wired(_) => f.write_str("Wired(..)"),
            Self::Unresolved => f.write_str("Unresolved"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use indexmap::IndexMap;

    use super::{
        DataFetcher, DataFetchingEnvironment, FieldError, FieldResolver, PropertyDataFetcher,
        TypeResolutionEnvironment, TypeResolver, TypeResolverBinding,
    };
    use crate::value::Value;

    fn env<'a>(source: &'a Value, args: &'a IndexMap<String, Value>) -> DataFetchingEnvironment<'a> {
        DataFetchingEnvironment {
            source,
            arguments: args,
            field_name: "name",
        }
    }

    #[test]
    fn property_fetcher_reads_same_named_property() {
        let source = Value::object([("name", Value::from("Luke"))]);
        let args = IndexMap::new();

        let resolver = FieldResolver::Property(PropertyDataFetcher::new("name"));

        assert_eq!(resolver.property_name(), Some("name"));
        assert_eq!(resolver.resolve(&env(&source, &args)), Ok(Value::from("Luke")));
        assert_eq!(
            resolver.resolve(&env(&Value::Null, &args)),
            Ok(Value::Null),
        );
    }

    #[test]
    fn closures_are_fetchers() {
        let fetcher: Arc<dyn DataFetcher> = Arc::new(|env: &DataFetchingEnvironment<'_>| {
            env.arguments
                .get("id")
                .cloned()
                .ok_or_else(|| FieldError::from("missing id"))
        });
        let resolver = FieldResolver::Fetcher(fetcher.clone());
        let mut args = IndexMap::new();
        args.insert("id".to_owned(), Value::from("1000"));

        assert!(resolver.is_fetcher(&fetcher));
        assert_eq!(resolver.property_name(), None);
        assert_eq!(resolver.resolve(&env(&Value::Null, &args)), Ok(Value::from("1000")));
        assert_eq!(
            resolver
                .resolve(&env(&Value::Null, &IndexMap::new()))
                .unwrap_err()
                .message(),
            "missing id",
        );
    }

    #[test]
    fn unresolved_binding_yields_nothing() {
        let value = Value::object([("primaryFunction", Value::from("Astromech"))]);
        let env = TypeResolutionEnvironment {
            value: &value,
            abstract_type: "Character",
        };
        let resolver: Arc<dyn TypeResolver> = Arc::new(|env: &TypeResolutionEnvironment<'_>| {
            env.value
                .property("primaryFunction")
                .map(|_| arcstr::literal!("Droid"))
        });

        assert_eq!(TypeResolverBinding::Unresolved.resolve_type(&env), None);
        let wired = TypeResolverBinding::Wired(resolver.clone());
        assert!(wired.is_wired());
        assert!(wired.is_resolver(&resolver));
        assert_eq!(wired.resolve_type(&env).as_deref(), Some("Droid"));
    }
}
