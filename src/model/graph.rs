//! CourseGraph: directed weighted adjacency lists.
//!
//! Keys are the nodes a search may start or end at. Edge targets do not need
//! their own key: a target without one is an unreachable-onward leaf.
//! Parallel edges between the same pair are kept; edges are appended, never
//! keyed.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A directed edge `from -> to` as stored in the source node's adjacency list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub to: String,
    /// Always finite and `>= 0`.
    pub weight: f64,
}

/// Mapping from node to its ordered outgoing edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseGraph {
    adjacency: HashMap<String, Vec<Edge>>,
}

impl CourseGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(node, [(target, weight), ...])` rows.
    ///
    /// ```rust
    /// use pathwise::CourseGraph;
    ///
    /// let g = CourseGraph::from_routes([
    ///     ("A", vec![("B", 3.0)]),
    ///     ("B", vec![]),
    /// ]).unwrap();
    /// assert_eq!(g.edge_count(), 1);
    /// ```
    pub fn from_routes<N, T, E>(routes: impl IntoIterator<Item = (N, E)>) -> Result<Self>
    where
        N: Into<String>,
        T: Into<String>,
        E: IntoIterator<Item = (T, f64)>,
    {
        let mut graph = Self::new();
        for (node, edges) in routes {
            let node = node.into();
            graph.add_node(node.clone());
            for (to, weight) in edges {
                graph.add_edge(node.clone(), to, weight)?;
            }
        }
        Ok(graph)
    }

    /// Register a node. Existing edges are left alone.
    pub fn add_node(&mut self, node: impl Into<String>) {
        self.adjacency.entry(node.into()).or_default();
    }

    /// Append `from -> to`. `from` becomes a key if it was not one.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>, weight: f64) -> Result<()> {
        let from = from.into();
        let to = to.into();
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::Validation(format!(
                "Edge {from} -> {to}: weight must be finite and >= 0, got {weight}"
            )));
        }
        self.adjacency.entry(from).or_default().push(Edge { to, weight });
        Ok(())
    }

    pub fn contains(&self, node: &str) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Outgoing edges of `node`, empty for leaves and unknown nodes.
    pub fn edges(&self, node: &str) -> &[Edge] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The stored key for `node`, borrowed for the graph's lifetime.
    pub(crate) fn key(&self, node: &str) -> Option<&str> {
        self.adjacency.get_key_value(node).map(|(k, _)| k.as_str())
    }

    /// All keyed nodes, sorted by name.
    pub fn nodes(&self) -> Vec<&str> {
        let mut nodes: Vec<&str> = self.adjacency.keys().map(String::as_str).collect();
        nodes.sort_unstable();
        nodes
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Edges whose target has no key of its own, as `(from, to)` pairs.
    pub fn dangling_edges(&self) -> Vec<(&str, &str)> {
        let mut dangling: Vec<(&str, &str)> = self
            .adjacency
            .iter()
            .flat_map(|(from, edges)| edges.iter().map(move |e| (from.as_str(), e.to.as_str())))
            .filter(|(_, to)| !self.adjacency.contains_key(*to))
            .collect();
        dangling.sort_unstable();
        dangling
    }

    /// Cheapest weight among the (possibly parallel) edges `from -> to`.
    pub fn edge_weight(&self, from: &str, to: &str) -> Option<f64> {
        self.edges(from)
            .iter()
            .filter(|e| e.to == to)
            .map(|e| e.weight)
            .min_by(f64::total_cmp)
    }

    /// Sum of edge weights along `path`, or `None` if two consecutive nodes
    /// are not connected.
    pub fn path_cost(&self, path: &[String]) -> Option<f64> {
        path.windows(2)
            .map(|pair| self.edge_weight(&pair[0], &pair[1]))
            .sum()
    }

    /// Copy with one `from -> to` edge removed (the cheapest, if parallel
    /// edges exist).
    pub fn without_edge(&self, from: &str, to: &str) -> Self {
        let mut copy = self.clone();
        if let Some(edges) = copy.adjacency.get_mut(from) {
            let cheapest = edges
                .iter()
                .enumerate()
                .filter(|(_, e)| e.to == to)
                .min_by(|(_, a), (_, b)| a.weight.total_cmp(&b.weight))
                .map(|(i, _)| i);
            if let Some(i) = cheapest {
                edges.remove(i);
            }
        }
        copy
    }

    /// Copy in which `node` can no longer be traversed: its outgoing edges are
    /// cleared and every edge into it is dropped. The key itself stays.
    pub fn without_node(&self, node: &str) -> Self {
        let mut copy = self.clone();
        for (from, edges) in copy.adjacency.iter_mut() {
            if from == node {
                edges.clear();
            } else {
                edges.retain(|e| e.to != node);
            }
        }
        copy
    }
}
