//! Path: an ordered node sequence with its total cost.

use serde::{Deserialize, Serialize};

/// A path through a `CourseGraph`: first node is the start, last is the goal,
/// and every consecutive pair is joined by an edge of the graph that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub nodes: Vec<String>,
    pub cost: f64,
}

impl Path {
    pub fn new(nodes: Vec<String>, cost: f64) -> Self {
        Self { nodes, cost }
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn start(&self) -> Option<&str> {
        self.nodes.first().map(String::as_str)
    }

    pub fn end(&self) -> Option<&str> {
        self.nodes.last().map(String::as_str)
    }

    pub fn contains(&self, node: &str) -> bool {
        self.nodes.iter().any(|n| n == node)
    }

    /// `A -> B -> C`
    pub fn describe(&self) -> String {
        self.nodes.join(" -> ")
    }

    /// Drop a synthetic leading node (e.g. the virtual start).
    pub fn strip_start(mut self, synthetic: &str) -> Self {
        if self.start() == Some(synthetic) {
            self.nodes.remove(0);
        }
        self
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (cost {})", self.describe(), self.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(nodes: &[&str], cost: f64) -> Path {
        Path::new(nodes.iter().map(|s| s.to_string()).collect(), cost)
    }

    #[test]
    fn len_counts_edges() {
        assert_eq!(p(&["A", "B", "C"], 2.0).len(), 2);
        assert_eq!(p(&["A"], 0.0).len(), 0);
        assert_eq!(p(&[], f64::INFINITY).len(), 0);
    }

    #[test]
    fn strip_start_only_removes_synthetic_head() {
        let path = p(&["vs", "A", "B"], 1.0).strip_start("vs");
        assert_eq!(path.describe(), "A -> B");
        let untouched = p(&["A", "B"], 1.0).strip_start("vs");
        assert_eq!(untouched.describe(), "A -> B");
    }
}
