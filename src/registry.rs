//! Model Registry
//!
//! The single mutable accumulator of a generation run. Drives the pipeline:
//! build the reference graph, plan the emission order, then derive and
//! register each type's model strictly in that order, so later types see
//! earlier ones as already registered and can point at them by reference.

use std::collections::BTreeMap;

use crate::builder::SchemaBuilder;
use crate::catalog::TypeCatalog;
use crate::checksum::Checksum;
use crate::error::{ModelError, Result};
use crate::graph::ReferenceGraph;
use crate::model::ModelEntry;
use crate::plan::{plan_order, OrderingStrategy};

/// Options for one generation run
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Base identifier of the target gateway API, used only in `$ref` URIs
    pub rest_api_id: String,
    /// Registration order policy
    pub ordering: OrderingStrategy,
    /// Cache repeated inlines of the same unregistered type within one
    /// top-level derivation
    pub memoize_inlines: bool,
}

impl GeneratorOptions {
    pub fn new(rest_api_id: impl Into<String>) -> Self {
        Self {
            rest_api_id: rest_api_id.into(),
            ordering: OrderingStrategy::default(),
            memoize_inlines: false,
        }
    }

    pub fn with_ordering(mut self, ordering: OrderingStrategy) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn with_memoized_inlines(mut self, memoize: bool) -> Self {
        self.memoize_inlines = memoize;
        self
    }
}

/// Accumulated name-to-model mapping for one run
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: BTreeMap<String, ModelEntry>,
    order: Vec<String>,
}

impl ModelRegistry {
    /// An empty registry (nothing registered yet)
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the full generation pipeline over a loaded catalog.
    ///
    /// Registration MUST follow the planned order: whether a reference
    /// becomes a pointer or an inline copy depends on what is already
    /// registered when the referencing type is processed.
    pub fn generate(catalog: &TypeCatalog, options: &GeneratorOptions) -> Result<Self> {
        let graph = ReferenceGraph::build(catalog);
        let planned = plan_order(catalog, &graph, options.ordering);
        tracing::debug!(order = ?planned, "planned emission order");

        let mut registry = Self::new();
        let mut builder =
            SchemaBuilder::new(catalog, &options.rest_api_id, options.memoize_inlines);

        for name in planned {
            let ty = catalog
                .get(&name)
                .ok_or_else(|| ModelError::UnknownType(name.clone()))?;
            let fragment = builder.build(ty, &registry);
            let entry = ModelEntry::from_fragment(&ty.name, fragment);
            tracing::debug!(name = %ty.name, model = %entry.model_name, "registered model");
            registry.insert(ty.name.clone(), entry);
        }

        Ok(registry)
    }

    fn insert(&mut self, type_name: String, entry: ModelEntry) {
        self.order.push(type_name.clone());
        self.models.insert(type_name, entry);
    }

    /// Whether a type already has a finalized model
    pub fn contains(&self, type_name: &str) -> bool {
        self.models.contains_key(type_name)
    }

    /// Look up a finalized model by type name
    pub fn get(&self, type_name: &str) -> Option<&ModelEntry> {
        self.models.get(type_name)
    }

    /// Type names in the order they were registered
    pub fn registration_order(&self) -> &[String] {
        &self.order
    }

    /// The name-to-model mapping (sorted by name for stable serialization)
    pub fn models(&self) -> &BTreeMap<String, ModelEntry> {
        &self.models
    }

    /// Consume the registry, yielding the terminal output mapping
    pub fn into_models(self) -> BTreeMap<String, ModelEntry> {
        self.models
    }

    /// Number of registered models
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Fingerprint of the full output mapping
    pub fn fingerprint(&self) -> Result<Checksum> {
        let value = serde_json::to_value(&self.models)?;
        Ok(Checksum::from_json(&value))
    }
}
