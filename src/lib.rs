//! Gateway Models
//!
//! Derives JSON Schema validation models from a catalog of declarative
//! record-type definitions, so a request-validating API gateway can reject
//! malformed payloads without hand-authored schemas drifting from the actual
//! data shapes.
//!
//! ## Pipeline
//!
//! ```text
//! TypeCatalog ──▶ ReferenceGraph ──▶ plan_order ──▶ SchemaBuilder ──▶ ModelRegistry
//!   (load)          (edges, SCCs)     (heuristic)    (per-type)        (accumulate)
//! ```
//!
//! Data flows strictly one direction; the registry is the only mutable
//! state and only the in-progress run touches it. Whether a reference field
//! becomes a `$ref` pointer or an inlined fragment depends solely on
//! registration order, so the registry processes the planned order exactly.
//!
//! ## Example
//!
//! ```no_run
//! use gateway_models::{GeneratorOptions, ModelRegistry, TypeCatalog};
//!
//! # fn main() -> gateway_models::Result<()> {
//! let catalog = TypeCatalog::load("./types")?;
//! let registry = ModelRegistry::generate(&catalog, &GeneratorOptions::new("a1b2c3d4e5"))?;
//! for (name, entry) in registry.models() {
//!     println!("{name} -> {}", entry.model_name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod catalog;
pub mod checksum;
pub mod config;
pub mod error;
pub mod graph;
pub mod model;
pub mod plan;
pub mod registry;

pub use builder::{SchemaBuilder, SchemaFragment};
pub use catalog::{FieldDef, FieldKind, RecordTypeDef, TypeCatalog};
pub use checksum::Checksum;
pub use config::{GeneratorConfig, OutputFormat};
pub use error::{ModelError, Result};
pub use graph::ReferenceGraph;
pub use model::{ModelEntry, ModelSchema};
pub use plan::{plan_order, OrderingStrategy};
pub use registry::{GeneratorOptions, ModelRegistry};
