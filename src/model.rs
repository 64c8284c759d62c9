//! Output model documents
//!
//! The externally consumed artifacts: one [`ModelEntry`] per declared type,
//! shaped exactly the way the gateway's model registration API expects
//! (`contentType` / `modelName` / draft-04 `$schema` wire keys).

use serde::{Deserialize, Serialize};

use crate::builder::SchemaFragment;

/// Content type every generated model is registered under
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Fixed JSON Schema draft tag carried by every emitted model
pub const JSON_SCHEMA_DRAFT4: &str = "http://json-schema.org/draft-04/schema#";

/// Model name derived from a record type name
pub fn model_name(type_name: &str) -> String {
    format!("{type_name}Model")
}

/// The schema document inside a model entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSchema {
    #[serde(rename = "$schema")]
    pub schema_version: String,
    pub title: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub properties: serde_json::Map<String, serde_json::Value>,
    pub required: Vec<String>,
}

/// A finalized validation model for one record type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    #[serde(rename = "contentType")]
    pub content_type: String,
    #[serde(rename = "modelName")]
    pub model_name: String,
    pub schema: ModelSchema,
}

impl ModelEntry {
    /// Wrap a derived fragment into the registration document for `type_name`
    pub fn from_fragment(type_name: &str, fragment: SchemaFragment) -> Self {
        let model_name = model_name(type_name);
        Self {
            content_type: CONTENT_TYPE_JSON.to_string(),
            model_name: model_name.clone(),
            schema: ModelSchema {
                schema_version: JSON_SCHEMA_DRAFT4.to_string(),
                title: model_name,
                type_tag: "object".to_string(),
                properties: fragment.properties,
                required: fragment.required,
            },
        }
    }
}
