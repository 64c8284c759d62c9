//! Reference Graph
//!
//! Builds the directed reference graph over a loaded catalog: one node per
//! declared type, one edge per distinct field reference to another declared
//! type. Cycles are allowed; SCC analysis surfaces them for diagnostics and
//! for the topological planning strategy.

use petgraph::algo::kosaraju_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::catalog::TypeCatalog;

/// Directed reference graph for one catalog
#[derive(Debug)]
pub struct ReferenceGraph {
    graph: DiGraph<String, ()>,
    reference_sets: HashMap<String, BTreeSet<String>>,
    cyclic: HashSet<String>,
    cycle_groups: Vec<Vec<String>>,
}

impl ReferenceGraph {
    /// Build the graph from a catalog.
    ///
    /// Only references that resolve to locally declared types become edges;
    /// primitive fields and unresolved targets contribute nothing. A type
    /// with no fields is a leaf with an empty reference set.
    pub fn build(catalog: &TypeCatalog) -> Self {
        let mut graph = DiGraph::with_capacity(catalog.len(), catalog.len() * 2);
        let mut node_indices: HashMap<String, NodeIndex> = HashMap::with_capacity(catalog.len());

        for ty in catalog.iter() {
            let idx = graph.add_node(ty.name.clone());
            node_indices.insert(ty.name.clone(), idx);
        }

        let mut reference_sets: HashMap<String, BTreeSet<String>> =
            HashMap::with_capacity(catalog.len());

        for ty in catalog.iter() {
            let mut refs = BTreeSet::new();
            for field in &ty.fields {
                if let Some(target) = field.kind.reference_target() {
                    if catalog.contains(target) {
                        refs.insert(target.to_string());
                    }
                }
            }
            for target in &refs {
                graph.add_edge(node_indices[&ty.name], node_indices[target.as_str()], ());
            }
            reference_sets.insert(ty.name.clone(), refs);
        }

        // SCC groups of size > 1 plus self-references are the cyclic types.
        let mut cyclic: HashSet<String> = HashSet::new();
        let mut cycle_groups: Vec<Vec<String>> = Vec::new();
        for scc in kosaraju_scc(&graph) {
            if scc.len() > 1 {
                let members: Vec<String> = scc
                    .iter()
                    .filter_map(|&idx| graph.node_weight(idx).cloned())
                    .collect();
                tracing::debug!(members = ?members, "reference cycle detected");
                cyclic.extend(members.iter().cloned());
                cycle_groups.push(members);
            }
        }
        for ty in catalog.iter() {
            if reference_sets[&ty.name].contains(&ty.name) {
                tracing::debug!(name = %ty.name, "self-referential type");
                cyclic.insert(ty.name.clone());
            }
        }

        Self {
            graph,
            reference_sets,
            cyclic,
            cycle_groups,
        }
    }

    /// Distinct locally-declared types directly referenced by `name`
    pub fn reference_set(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.reference_sets.get(name)
    }

    /// Count of distinct internal references for `name` (0 for unknown names)
    pub fn ref_count(&self, name: &str) -> usize {
        self.reference_sets.get(name).map(|s| s.len()).unwrap_or(0)
    }

    /// Whether `name` participates in a reference cycle
    pub fn is_cyclic(&self, name: &str) -> bool {
        self.cyclic.contains(name)
    }

    /// Mutual-reference groups (SCCs of size greater than one)
    pub fn cycle_groups(&self) -> &[Vec<String>] {
        &self.cycle_groups
    }

    /// All SCCs in dependencies-first order (petgraph's reverse topological
    /// SCC order), including singletons. Member order within a group is
    /// arbitrary; callers needing determinism re-sort members.
    pub fn scc_order(&self) -> Vec<Vec<String>> {
        kosaraju_scc(&self.graph)
            .into_iter()
            .map(|scc| {
                scc.into_iter()
                    .filter_map(|idx| self.graph.node_weight(idx).cloned())
                    .collect()
            })
            .collect()
    }
}
