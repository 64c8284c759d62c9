//! Schema Builder
//!
//! Transforms one record type into a JSON-Schema-shaped fragment against the
//! registry's state so far. Reference fields become `$ref` pointers when the
//! target is already registered and are recursively inlined when it is not.
//! Required-field bookkeeping runs for every field, even ones that produce
//! no property entry; the gateway's validator treats membership in
//! `required` independently of `properties`, and the emitted models keep
//! that behavior.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

use crate::catalog::{FieldKind, RecordTypeDef, TypeCatalog};
use crate::registry::ModelRegistry;

/// The gateway's structural type check does not enforce numeric-ness, so
/// every number property carries this pattern as a workaround. Do not drop
/// or widen it.
pub const NUMBER_PATTERN: &str = "[0-9]+";

/// Cross-reference URI for an already-registered model
pub fn model_ref_uri(rest_api_id: &str, target: &str) -> String {
    format!("https://apigateway.amazonaws.com/restapis/{rest_api_id}/models/{target}Model")
}

/// Derived properties and required-field list for one record type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaFragment {
    /// Property schema per field name
    pub properties: Map<String, Value>,
    /// Field names lacking the optional marker, in declaration order
    pub required: Vec<String>,
}

/// Derives schema fragments for one generation run
pub struct SchemaBuilder<'a> {
    catalog: &'a TypeCatalog,
    rest_api_id: &'a str,
    memoize_inlines: bool,
    inline_cache: HashMap<String, SchemaFragment>,
}

impl<'a> SchemaBuilder<'a> {
    pub fn new(catalog: &'a TypeCatalog, rest_api_id: &'a str, memoize_inlines: bool) -> Self {
        Self {
            catalog,
            rest_api_id,
            memoize_inlines,
            inline_cache: HashMap::new(),
        }
    }

    /// Derive the fragment for one top-level type against the models
    /// registered so far.
    pub fn build(&mut self, ty: &RecordTypeDef, registry: &ModelRegistry) -> SchemaFragment {
        // The cache is only valid while the registry is unchanged, which
        // holds within a single top-level derivation.
        self.inline_cache.clear();
        let mut stack = Vec::new();
        self.fragment(ty, registry, &mut stack)
    }

    fn fragment(
        &mut self,
        ty: &RecordTypeDef,
        registry: &ModelRegistry,
        stack: &mut Vec<String>,
    ) -> SchemaFragment {
        let catalog = self.catalog;
        stack.push(ty.name.clone());

        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in &ty.fields {
            match &field.kind {
                FieldKind::Number => {
                    properties.insert(
                        field.name.clone(),
                        json!({ "type": "number", "pattern": NUMBER_PATTERN }),
                    );
                }
                FieldKind::String => {
                    properties.insert(field.name.clone(), json!({ "type": "string" }));
                }
                FieldKind::Reference(target) => {
                    if registry.contains(target) {
                        properties.insert(
                            field.name.clone(),
                            json!({ "$ref": model_ref_uri(self.rest_api_id, target) }),
                        );
                    } else if stack.contains(target) {
                        // Re-entering a type mid-inline means we are inside a
                        // cycle; emit the pointer instead of recursing. It
                        // resolves once the whole cycle group is registered.
                        tracing::debug!(
                            owner = %ty.name,
                            field = %field.name,
                            target = %target,
                            "cyclic reference, emitting pointer instead of inlining"
                        );
                        properties.insert(
                            field.name.clone(),
                            json!({ "$ref": model_ref_uri(self.rest_api_id, target) }),
                        );
                    } else if let Some(inner) = catalog.get(target) {
                        let fragment = self.inlined(inner, registry, stack);
                        properties.insert(
                            field.name.clone(),
                            serde_json::to_value(fragment).unwrap_or(Value::Null),
                        );
                    } else {
                        // Unresolved target: the field gets no property entry
                        // but still counts for required-ness below.
                        tracing::warn!(
                            owner = %ty.name,
                            field = %field.name,
                            target = %target,
                            "reference target is not a declared type, dropping property"
                        );
                    }
                }
                FieldKind::Unsupported(raw) => {
                    tracing::debug!(
                        owner = %ty.name,
                        field = %field.name,
                        kind = %raw,
                        "unsupported field kind, dropping property"
                    );
                }
            }

            if !field.optional {
                required.push(field.name.clone());
            }
        }

        stack.pop();
        SchemaFragment {
            properties,
            required,
        }
    }

    /// Inline an unregistered type's fragment. Without memoization each call
    /// re-derives the fragment, duplicating it per referencing field.
    fn inlined(
        &mut self,
        inner: &RecordTypeDef,
        registry: &ModelRegistry,
        stack: &mut Vec<String>,
    ) -> SchemaFragment {
        if self.memoize_inlines {
            if let Some(hit) = self.inline_cache.get(&inner.name) {
                return hit.clone();
            }
        }
        let fragment = self.fragment(inner, registry, stack);
        if self.memoize_inlines {
            self.inline_cache
                .insert(inner.name.clone(), fragment.clone());
        }
        fragment
    }
}
