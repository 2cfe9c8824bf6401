//! Behavior to bind onto the definitions of a [`TypeDefinitionRegistry`]
//!
//! [`TypeDefinitionRegistry`]: crate::TypeDefinitionRegistry

use std::{fmt, sync::Arc};

use arcstr::ArcStr;
use indexmap::IndexMap;

use crate::{
    error::MissingTypeNameError,
    schema::{
        factory::{NoopWiringFactory, WiringFactory},
        resolvers::{DataFetcher, TypeResolver},
        scalars::{self, ScalarType},
    },
};

/// Field resolvers of one type, by field name.
pub type DataFetchers = IndexMap<ArcStr, Arc<dyn DataFetcher>>;

/// Resolvers, scalar codecs and type resolvers to bind onto the definitions
///
/// Built through [`RuntimeWiring::builder()`] and immutable afterwards. The
/// built-in scalars are always present; a scalar registered under a built-in
/// name replaces it.
#[derive(Clone)]
pub struct RuntimeWiring {
    data_fetchers: IndexMap<ArcStr, DataFetchers>,
    scalars: IndexMap<ArcStr, ScalarType>,
    type_resolvers: IndexMap<ArcStr, Arc<dyn TypeResolver>>,
    wiring_factory: Arc<dyn WiringFactory>,
}

impl RuntimeWiring {
    /// Starts building a wiring.
    pub fn builder() -> RuntimeWiringBuilder {
        RuntimeWiringBuilder::default()
    }

    /// Field resolvers by type name, then by field name.
    pub fn data_fetchers(&self) -> &IndexMap<ArcStr, DataFetchers> {
        &self.data_fetchers
    }

    /// Field resolvers wired for `type_name`. Empty if there are none.
    pub fn data_fetchers_for_type(&self, type_name: &str) -> DataFetchers {
        self.data_fetchers
            .get(type_name)
            .cloned()
            .unwrap_or_default()
    }

    /// Resolver wired for `field_name` of `type_name`.
    pub fn data_fetcher(&self, type_name: &str, field_name: &str) -> Option<&Arc<dyn DataFetcher>> {
        self.data_fetchers.get(type_name)?.get(field_name)
    }

    /// Scalar codecs by scalar name, built-ins included.
    pub fn scalars(&self) -> &IndexMap<ArcStr, ScalarType> {
        &self.scalars
    }

    /// Type resolvers by interface or union name.
    pub fn type_resolvers(&self) -> &IndexMap<ArcStr, Arc<dyn TypeResolver>> {
        &self.type_resolvers
    }

    /// The factory consulted before the explicit wiring.
    pub fn wiring_factory(&self) -> &dyn WiringFactory {
        &*self.wiring_factory
    }
}

impl Default for RuntimeWiring {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for RuntimeWiring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeWiring")
            .field(
                "data_fetchers",
                &self
                    .data_fetchers
                    .iter()
                    .map(|(ty, fields)| (ty, fields.keys().collect::<Vec<_>>()))
                    .collect::<Vec<_>>(),
            )
            .field("scalars", &self.scalars.keys().collect::<Vec<_>>())
            .field("type_resolvers", &self.type_resolvers.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Builder of a [`RuntimeWiring`]
pub struct RuntimeWiringBuilder {
    data_fetchers: IndexMap<ArcStr, DataFetchers>,
    scalars: IndexMap<ArcStr, ScalarType>,
    type_resolvers: IndexMap<ArcStr, Arc<dyn TypeResolver>>,
    wiring_factory: Arc<dyn WiringFactory>,
}

impl Default for RuntimeWiringBuilder {
    fn default() -> Self {
        Self {
            data_fetchers: IndexMap::new(),
            scalars: scalars::standard_scalars()
                .map(|s| (s.name().clone(), s))
                .collect(),
            type_resolvers: IndexMap::new(),
            wiring_factory: Arc::new(NoopWiringFactory),
        }
    }
}

impl RuntimeWiringBuilder {
    /// Sets the factory consulted before the explicit wiring.
    #[must_use]
    pub fn wiring_factory(mut self, factory: impl WiringFactory + 'static) -> Self {
        self.wiring_factory = Arc::new(factory);
        self
    }

    /// Registers a scalar codec under its name.
    #[must_use]
    pub fn scalar(mut self, scalar: ScalarType) -> Self {
        self.scalars.insert(scalar.name().clone(), scalar);
        self
    }

    /// Adds the wiring of one type.
    ///
    /// Its field resolvers are merged into those already wired for the type,
    /// the later one winning per field. Its type resolver, if any, replaces
    /// the one wired before.
    #[must_use]
    pub fn type_wiring(mut self, wiring: TypeRuntimeWiring) -> Self {
        let TypeRuntimeWiring {
            type_name,
            data_fetchers,
            type_resolver,
        } = wiring;
        self.data_fetchers
            .entry(type_name.clone())
            .or_default()
            .extend(data_fetchers);
        if let Some(resolver) = type_resolver {
            self.type_resolvers.insert(type_name, resolver);
        }
        self
    }

    /// Freezes the wiring.
    pub fn build(self) -> RuntimeWiring {
        RuntimeWiring {
            data_fetchers: self.data_fetchers,
            scalars: self.scalars,
            type_resolvers: self.type_resolvers,
            wiring_factory: self.wiring_factory,
        }
    }
}

/// The wiring of a single type: field resolvers and, for abstract types, a
/// type resolver
#[derive(Clone)]
pub struct TypeRuntimeWiring {
    type_name: ArcStr,
    data_fetchers: DataFetchers,
    type_resolver: Option<Arc<dyn TypeResolver>>,
}

impl TypeRuntimeWiring {
    /// Starts wiring the type named `type_name`.
    pub fn new_type_wiring(type_name: impl Into<ArcStr>) -> TypeRuntimeWiringBuilder {
        TypeRuntimeWiringBuilder::default().type_name(type_name)
    }

    /// Starts a wiring whose type name is given later.
    pub fn builder() -> TypeRuntimeWiringBuilder {
        TypeRuntimeWiringBuilder::default()
    }

    /// Name of the wired type.
    pub fn type_name(&self) -> &ArcStr {
        &self.type_name
    }

    /// Field resolvers by field name.
    pub fn field_data_fetchers(&self) -> &DataFetchers {
        &self.data_fetchers
    }

    /// The type resolver, if one was given.
    pub fn type_resolver(&self) -> Option<&Arc<dyn TypeResolver>> {
        self.type_resolver.as_ref()
    }
}

impl fmt::Debug for TypeRuntimeWiring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRuntimeWiring")
            .field("type_name", &self.type_name)
            .field("data_fetchers", &self.data_fetchers.keys().collect::<Vec<_>>())
            .field("type_resolver", &self.type_resolver.is_some())
            .finish()
    }
}

/// Builder of a [`TypeRuntimeWiring`]
#[derive(Default)]
pub struct TypeRuntimeWiringBuilder {
    type_name: Option<ArcStr>,
    data_fetchers: DataFetchers,
    type_resolver: Option<Arc<dyn TypeResolver>>,
}

impl TypeRuntimeWiringBuilder {
    /// Sets the name of the wired type.
    #[must_use]
    pub fn type_name(mut self, type_name: impl Into<ArcStr>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Wires `fetcher` as the resolver of `field_name`.
    #[must_use]
    pub fn data_fetcher(
        mut self,
        field_name: impl Into<ArcStr>,
        fetcher: impl DataFetcher + 'static,
    ) -> Self {
        self.data_fetchers
            .insert(field_name.into(), Arc::new(fetcher));
        self
    }

    /// Wires every resolver of `fetchers`, by field name.
    #[must_use]
    pub fn data_fetchers(mut self, fetchers: DataFetchers) -> Self {
        self.data_fetchers.extend(fetchers);
        self
    }

    /// Sets the resolver picking concrete types for this interface or union.
    #[must_use]
    pub fn type_resolver(mut self, resolver: impl TypeResolver + 'static) -> Self {
        self.type_resolver = Some(Arc::new(resolver));
        self
    }

    /// Finishes the wiring.
    ///
    /// # Panics
    ///
    /// If no type name was given. See [`try_build()`](Self::try_build) for a
    /// non-panicking variant.
    pub fn build(self) -> TypeRuntimeWiring {
        match self.try_build() {
            Ok(wiring) => wiring,
            Err(e) => panic!("{e}"),
        }
    }

    /// Finishes the wiring, failing if no type name was given.
    pub fn try_build(self) -> Result<TypeRuntimeWiring, MissingTypeNameError> {
        Ok(TypeRuntimeWiring {
            type_name: self.type_name.ok_or(MissingTypeNameError)?,
            data_fetchers: self.data_fetchers,
            type_resolver: self.type_resolver,
        })
    }
}

impl From<TypeRuntimeWiringBuilder> for TypeRuntimeWiring {
    fn from(builder: TypeRuntimeWiringBuilder) -> Self {
        builder.build()
    }
}
