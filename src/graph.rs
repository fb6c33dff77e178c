//! Weighted graphs keyed by node name.

use std::hash::BuildHasherDefault;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::FxHasher;

use crate::error::{Error, Result};

pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(0);

/// Identifies the exact contents of a graph.
///
/// `id` is unique per graph value and `epoch` advances on every mutation, so
/// anything cached against a version goes stale as soon as the graph changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphVersion {
    pub id: u64,
    pub epoch: u64,
}

/// Named nodes joined by non-negative weighted edges.
///
/// Undirected graphs store every edge in both directions with the same
/// weight.
#[derive(Debug)]
pub struct WeightedGraph {
    graph: DiGraph<String, f64>,
    nodes: FxIndexMap<String, NodeIndex>,
    directed: bool,
    id: u64,
    epoch: u64,
}

impl WeightedGraph {
    pub fn directed() -> Self {
        Self::with_direction(true)
    }

    pub fn undirected() -> Self {
        Self::with_direction(false)
    }

    fn with_direction(directed: bool) -> Self {
        Self {
            graph: DiGraph::new(),
            nodes: FxIndexMap::default(),
            directed,
            id: NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed),
            epoch: 0,
        }
    }

    /// Build a directed graph from `(node, [(neighbour, weight)])` lists.
    pub fn from_adjacency<'a, I, E>(adjacency: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, E)>,
        E: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut graph = Self::directed();
        for (node, edges) in adjacency {
            graph.add_node(node);
            for (to, weight) in edges {
                graph.add_edge(node, to, weight)?;
            }
        }
        Ok(graph)
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn version(&self) -> GraphVersion {
        GraphVersion {
            id: self.id,
            epoch: self.epoch,
        }
    }

    /// Insert `name` if missing and return its index.
    pub fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&index) = self.nodes.get(name) {
            return index;
        }
        self.epoch += 1;
        let index = self.graph.add_node(name.to_owned());
        self.nodes.insert(name.to_owned(), index);
        index
    }

    /// Add an edge, replacing the weight of an existing one.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight {
                from: from.to_owned(),
                to: to.to_owned(),
                weight,
            });
        }
        let a = self.add_node(from);
        let b = self.add_node(to);
        self.epoch += 1;
        self.graph.update_edge(a, b, weight);
        if !self.directed {
            self.graph.update_edge(b, a, weight);
        }
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of stored directed edges; an undirected edge between two
    /// distinct nodes counts twice.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node names in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.keys().map(String::as_str)
    }

    pub fn weight(&self, from: &str, to: &str) -> Option<f64> {
        let a = self.node_index(from)?;
        let b = self.node_index(to)?;
        let edge = self.graph.find_edge(a, b)?;
        self.graph.edge_weight(edge).copied()
    }

    /// Outgoing edges of `name` as `(neighbour, weight)`.
    pub fn neighbors<'a>(&'a self, name: &str) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        self.node_index(name)
            .into_iter()
            .flat_map(move |index| self.graph.edges(index))
            .map(move |edge| (self.graph[edge.target()].as_str(), *edge.weight()))
    }

    pub(crate) fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.nodes.get(name).copied()
    }

    pub(crate) fn inner(&self) -> &DiGraph<String, f64> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undirected_edges_are_symmetric() {
        let mut graph = WeightedGraph::undirected();
        graph.add_edge("a", "b", 2.5).unwrap();
        graph.add_edge("b", "c", 1.0).unwrap();
        assert_eq!(graph.weight("a", "b"), Some(2.5));
        assert_eq!(graph.weight("b", "a"), Some(2.5));
        assert_eq!(graph.weight("c", "b"), Some(1.0));
        assert_eq!(graph.weight("a", "c"), None);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn re_adding_an_edge_replaces_its_weight() {
        let mut graph = WeightedGraph::directed();
        graph.add_edge("x", "y", 4.0).unwrap();
        graph.add_edge("x", "y", 1.0).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.weight("x", "y"), Some(1.0));
        assert_eq!(graph.weight("y", "x"), None);
        let mut out: Vec<_> = graph.neighbors("x").collect();
        out.sort_by(|a, b| a.0.cmp(b.0));
        assert_eq!(out, vec![("y", 1.0)]);
        assert_eq!(graph.neighbors("missing").count(), 0);
    }

    #[test]
    fn invalid_weights_are_rejected() {
        let mut graph = WeightedGraph::directed();
        for weight in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                graph.add_edge("a", "b", weight),
                Err(Error::InvalidWeight { .. })
            ));
        }
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn mutation_advances_the_version() {
        let mut graph = WeightedGraph::directed();
        let other = WeightedGraph::directed();
        assert_ne!(graph.version().id, other.version().id);

        let before = graph.version();
        graph.add_edge("a", "b", 1.0).unwrap();
        let after = graph.version();
        assert_eq!(before.id, after.id);
        assert_ne!(before, after);

        graph.add_node("a");
        assert_eq!(graph.version(), after);
    }
}
