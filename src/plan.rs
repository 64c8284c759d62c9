//! Emission Order Planner
//!
//! Orders the catalog's types for registration. The default strategy is the
//! stable ascending sort by distinct-internal-reference count: types with
//! fewer references tend to be leaves and get registered first, so dependent
//! types can point at them by reference instead of inlining them. This is a
//! heuristic, not a topological sort; the corrected dependency-respecting
//! order is available only as the explicit [`OrderingStrategy::Topological`]
//! opt-in.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::TypeCatalog;
use crate::graph::ReferenceGraph;

/// How planned registration order is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderingStrategy {
    /// Stable ascending sort by distinct-internal-reference count, ties
    /// broken by declaration order. Output-compatible default.
    #[default]
    ReferenceCount,
    /// Dependencies-first SCC condensation order; members of a cyclic group
    /// keep declaration order. Changes pointer-vs-inline output and must be
    /// asked for explicitly.
    Topological,
}

/// Plan the registration order for every type in the catalog
pub fn plan_order(
    catalog: &TypeCatalog,
    graph: &ReferenceGraph,
    strategy: OrderingStrategy,
) -> Vec<String> {
    match strategy {
        OrderingStrategy::ReferenceCount => {
            let mut names: Vec<String> =
                catalog.iter().map(|ty| ty.name.clone()).collect();
            // sort_by_key is stable, so equal counts keep declaration order
            names.sort_by_key(|name| graph.ref_count(name));
            names
        }
        OrderingStrategy::Topological => {
            let position: HashMap<&str, usize> = catalog
                .iter()
                .enumerate()
                .map(|(idx, ty)| (ty.name.as_str(), idx))
                .collect();

            let mut planned = Vec::with_capacity(catalog.len());
            for mut group in graph.scc_order() {
                group.sort_by_key(|name| position.get(name.as_str()).copied());
                planned.extend(group);
            }
            planned
        }
    }
}
