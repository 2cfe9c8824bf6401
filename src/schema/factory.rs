//! Pluggable, definition-driven provisioning of resolvers

use std::{fmt, sync::Arc};

use arcstr::ArcStr;
use fnv::FnvHashMap;

use crate::{
    ast::{FieldDefinition, TypeDefinition},
    schema::{
        registry::TypeDefinitionRegistry,
        resolvers::{DataFetcher, TypeResolver},
    },
};

/// Hands out resolvers by inspecting definitions
///
/// Consulted before the explicit wiring: whenever a factory claims a field or
/// an abstract type, its resolver wins. A factory must not claim what it then
/// fails to provide; assembly reports that as a
/// [`WiringContractViolation`](crate::error::WiringContractViolation).
///
/// Every method has a default, so implementors only override the capabilities
/// they offer.
pub trait WiringFactory: Send + Sync {
    /// Whether this factory provides the resolver of `field`.
    fn provides_data_fetcher(
        &self,
        registry: &TypeDefinitionRegistry,
        field: &FieldDefinition,
    ) -> bool {
        let _ = (registry, field);
        false
    }

    /// The resolver of `field`. Only asked when
    /// [`provides_data_fetcher`](Self::provides_data_fetcher) said so.
    fn get_data_fetcher(
        &self,
        registry: &TypeDefinitionRegistry,
        field: &FieldDefinition,
    ) -> Option<Arc<dyn DataFetcher>> {
        let _ = (registry, field);
        None
    }

    /// Whether this factory provides the type resolver of `definition`, an
    /// interface or a union.
    fn provides_type_resolver(
        &self,
        registry: &TypeDefinitionRegistry,
        definition: &TypeDefinition,
    ) -> bool {
        let _ = (registry, definition);
        false
    }

    /// The type resolver of `definition`. Only asked when
    /// [`provides_type_resolver`](Self::provides_type_resolver) said so.
    fn get_type_resolver(
        &self,
        registry: &TypeDefinitionRegistry,
        definition: &TypeDefinition,
    ) -> Option<Arc<dyn TypeResolver>> {
        let _ = (registry, definition);
        None
    }
}

/// A factory that provides nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopWiringFactory;

impl WiringFactory for NoopWiringFactory {}

/// A factory serving fixed resolvers by field name and abstract type name
///
/// Fetchers are matched on the bare field name, whichever type declares the
/// field.
#[derive(Clone, Default)]
pub struct StaticWiringFactory {
    data_fetchers: FnvHashMap<ArcStr, Arc<dyn DataFetcher>>,
    type_resolvers: FnvHashMap<ArcStr, Arc<dyn TypeResolver>>,
}

impl StaticWiringFactory {
    /// An empty factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `fetcher` for every field named `field_name`.
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

    /// Serves `resolver` for the interface or union named `type_name`.
    #[must_use]
    pub fn type_resolver(
        mut self,
        type_name: impl Into<ArcStr>,
        resolver: impl TypeResolver + 'static,
    ) -> Self {
        self.type_resolvers
            .insert(type_name.into(), Arc::new(resolver));
        self
    }
}

impl fmt::Debug for StaticWiringFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticWiringFactory")
            .field("data_fetchers", &self.data_fetchers.keys().collect::<Vec<_>>())
            .field("type_resolvers", &self.type_resolvers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl WiringFactory for StaticWiringFactory {
    fn provides_data_fetcher(&self, _: &TypeDefinitionRegistry, field: &FieldDefinition) -> bool {
        self.data_fetchers.contains_key(&field.name)
    }

    fn get_data_fetcher(
        &self,
        _: &TypeDefinitionRegistry,
        field: &FieldDefinition,
    ) -> Option<Arc<dyn DataFetcher>> {
        self.data_fetchers.get(&field.name).cloned()
    }

    fn provides_type_resolver(
        &self,
        _: &TypeDefinitionRegistry,
        definition: &TypeDefinition,
    ) -> bool {
        self.type_resolvers.contains_key(definition.name())
    }

    fn get_type_resolver(
        &self,
        _: &TypeDefinitionRegistry,
        definition: &TypeDefinition,
    ) -> Option<Arc<dyn TypeResolver>> {
        self.type_resolvers.get(definition.name()).cloned()
    }
}
