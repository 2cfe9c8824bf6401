//! The assembled schema: every reachable named type plus the root operation types

use std::{fmt, sync::Arc};

use arcstr::ArcStr;
use indexmap::IndexMap;

use crate::schema::meta::{MetaType, TypeType};

/// An assembled, executable schema
///
/// Holds every named type reachable from the root operation types exactly
/// once, in the order they were first reached. Wrapping in lists and non-null
/// markers only ever appears on occurrences, never as a type of its own.
pub struct TypeGraph {
    types: IndexMap<ArcStr, Arc<MetaType>>,
    query_type: Arc<MetaType>,
    mutation_type: Option<Arc<MetaType>>,
    subscription_type: Option<Arc<MetaType>>,
}

impl TypeGraph {
    pub(crate) fn new(
        query_type: Arc<MetaType>,
        mutation_type: Option<Arc<MetaType>>,
        subscription_type: Option<Arc<MetaType>>,
    ) -> Self {
        let mut types = IndexMap::new();
        for root in [Some(&query_type), mutation_type.as_ref(), subscription_type.as_ref()]
            .into_iter()
            .flatten()
        {
            collect_reachable(&mut types, root);
        }
        Self {
            types,
            query_type,
            mutation_type,
            subscription_type,
        }
    }

    /// The query root type.
    pub fn query_type(&self) -> &Arc<MetaType> {
        &self.query_type
    }

    /// The mutation root type, if the schema has one.
    pub fn mutation_type(&self) -> Option<&Arc<MetaType>> {
        self.mutation_type.as_ref()
    }

    /// The subscription root type, if the schema has one.
    pub fn subscription_type(&self) -> Option<&Arc<MetaType>> {
        self.subscription_type.as_ref()
    }

    /// Every reachable named type, by name.
    pub fn types(&self) -> &IndexMap<ArcStr, Arc<MetaType>> {
        &self.types
    }

    /// Names of every reachable type, in first-reached order.
    pub fn type_names(&self) -> impl Iterator<Item = &ArcStr> {
        self.types.keys()
    }

    /// Looks up a reachable type by name.
    pub fn type_by_name(&self, name: &str) -> Option<&Arc<MetaType>> {
        self.types.get(name)
    }

    /// The finished named type an occurrence refers to, looking through
    /// wrappers and placeholders alike.
    pub fn concrete_type(&self, occurrence: &TypeType) -> Option<&Arc<MetaType>> {
        self.types.get(occurrence.innermost_name())
    }

    /// Placeholders naming no type of this graph, as `(referring type,
    /// placeholder name)` pairs.
    pub(crate) fn dangling_placeholders(&self) -> Vec<(&ArcStr, &ArcStr)> {
        self.types
            .values()
            .flat_map(|meta| {
                meta.type_occurrences()
                    .into_iter()
                    .filter(|t| t.is_placeholder())
                    .map(move |t| (meta.name(), t.innermost_name()))
            })
            .filter(|(_, name)| !self.types.contains_key(*name))
            .collect()
    }
}

fn collect_reachable(types: &mut IndexMap<ArcStr, Arc<MetaType>>, meta: &Arc<MetaType>) {
    if types.contains_key(meta.name()) {
        return;
    }
    types.insert(meta.name().clone(), Arc::clone(meta));
    for occurrence in meta.type_occurrences() {
        if let Some(named) = occurrence.innermost_concrete() {
            collect_reachable(types, named);
        }
    }
}

impl fmt::Debug for TypeGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeGraph")
            .field("query_type", self.query_type.name())
            .field("mutation_type", &self.mutation_type.as_ref().map(|t| t.name()))
            .field(
                "subscription_type",
                &self.subscription_type.as_ref().map(|t| t.name()),
            )
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .finish()
    }
}
