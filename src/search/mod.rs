//! # Path Search Engine
//!
//! Single-pair search over a `CourseGraph` with three interchangeable
//! algorithms, plus a bounded k-alternative path generator.
//!
//! | Algorithm | Module | Cost semantics |
//! |-----------|--------|----------------|
//! | Dijkstra | `dijkstra` | Sum of edge weights |
//! | A* | `dijkstra` | Sum of edge weights, heuristic-guided |
//! | BFS | `bfs` | Hop count |
//!
//! An unreachable goal is a `SearchOutcome` with `found() == false`, not an
//! error. Errors are reserved for bad input: an unknown start/goal
//! (`Validation`) or A* without a heuristic (`Configuration`).

pub mod alternatives;
pub mod bfs;
pub mod dijkstra;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::{CourseGraph, Path};
use crate::{Error, Result};

// ============================================================================
// Algorithm token
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Dijkstra,
    #[serde(rename = "astar")]
    AStar,
    Bfs,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
            Algorithm::Bfs => "bfs",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a*" | "a_star" => Ok(Algorithm::AStar),
            "bfs" => Ok(Algorithm::Bfs),
            other => Err(Error::Configuration(format!(
                "Unknown algorithm '{other}'. Expected one of: dijkstra, astar, bfs"
            ))),
        }
    }
}

// ============================================================================
// Heuristics
// ============================================================================

/// Lower bound on the remaining cost from `node` to `goal`, used by A*.
///
/// Must be admissible (never overestimate) for A* to return optimal paths.
pub trait Heuristic: Send + Sync {
    fn estimate(&self, node: &str, goal: &str) -> f64;
}

impl<F> Heuristic for F
where
    F: Fn(&str, &str) -> f64 + Send + Sync,
{
    fn estimate(&self, node: &str, goal: &str) -> f64 {
        self(node, goal)
    }
}

/// `h = 0` everywhere. A* degenerates to Dijkstra.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _node: &str, _goal: &str) -> f64 {
        0.0
    }
}

/// Every path to the goal ends with one edge into it, so the cheapest such
/// edge bounds the remaining cost from any other node. Admissible and
/// consistent for non-negative weights.
#[derive(Debug, Clone, Copy)]
pub struct GoalEntryHeuristic {
    min_entry: f64,
}

impl GoalEntryHeuristic {
    pub fn for_goal(graph: &CourseGraph, goal: &str) -> Self {
        let min_entry = graph
            .nodes()
            .into_iter()
            .flat_map(|n| graph.edges(n))
            .filter(|e| e.to == goal)
            .map(|e| e.weight)
            .min_by(f64::total_cmp)
            .unwrap_or(0.0);
        Self { min_entry }
    }
}

impl Heuristic for GoalEntryHeuristic {
    fn estimate(&self, node: &str, goal: &str) -> f64 {
        if node == goal { 0.0 } else { self.min_entry }
    }
}

// ============================================================================
// SearchOutcome
// ============================================================================

/// Result of one search. `path` is empty and `cost` is `+∞` when the goal is
/// unreachable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub algorithm: Algorithm,
    pub path: Vec<String>,
    #[serde(with = "crate::model::unbounded")]
    pub cost: f64,
    /// Nodes finalized before the search stopped.
    pub expanded: usize,
}

impl SearchOutcome {
    pub fn found(&self) -> bool {
        !self.path.is_empty() && self.cost.is_finite()
    }

    pub(crate) fn unreachable(algorithm: Algorithm, expanded: usize) -> Self {
        Self { algorithm, path: Vec::new(), cost: f64::INFINITY, expanded }
    }

    pub fn into_path(self) -> Option<Path> {
        self.found().then(|| Path::new(self.path, self.cost))
    }
}

// ============================================================================
// PathFinder
// ============================================================================

/// Validated `(graph, start, goal)` triple. Construction checks that start and
/// goal are keyed nodes; searches afterwards cannot fail on input.
///
/// ```rust
/// use pathwise::{Algorithm, CourseGraph, PathFinder};
///
/// let g = CourseGraph::from_routes([
///     ("A", vec![("B", 3.0), ("C", 5.0), ("E", 10.0)]),
///     ("B", vec![("D", 4.0), ("E", 2.0)]),
///     ("C", vec![("D", 2.0)]),
///     ("D", vec![("F", 3.0)]),
///     ("E", vec![("F", 1.0)]),
///     ("F", vec![]),
/// ]).unwrap();
///
/// let outcome = PathFinder::new(&g, "A", "F").unwrap().search(Algorithm::Dijkstra).unwrap();
/// assert_eq!(outcome.path, vec!["A", "B", "E", "F"]);
/// assert_eq!(outcome.cost, 6.0);
/// ```
pub struct PathFinder<'g> {
    graph: &'g CourseGraph,
    start: &'g str,
    goal: &'g str,
    heuristic: Option<&'g dyn Heuristic>,
}

impl<'g> PathFinder<'g> {
    pub fn new(graph: &'g CourseGraph, start: &str, goal: &str) -> Result<Self> {
        let start = graph
            .key(start)
            .ok_or_else(|| Error::Validation(format!("Start node '{start}' not in graph")))?;
        let goal = graph
            .key(goal)
            .ok_or_else(|| Error::Validation(format!("Goal node '{goal}' not in graph")))?;

        for (from, to) in graph.dangling_edges() {
            warn!(from, to, "edge points to a node with no entry of its own");
        }

        Ok(Self { graph, start, goal, heuristic: None })
    }

    /// Heuristic for `Algorithm::AStar`. Ignored by the other algorithms.
    pub fn with_heuristic(mut self, heuristic: &'g dyn Heuristic) -> Self {
        self.heuristic = Some(heuristic);
        self
    }

    pub fn graph(&self) -> &'g CourseGraph {
        self.graph
    }

    pub fn start(&self) -> &'g str {
        self.start
    }

    pub fn goal(&self) -> &'g str {
        self.goal
    }

    /// Run the selected algorithm.
    pub fn search(&self, algorithm: Algorithm) -> Result<SearchOutcome> {
        let outcome = match algorithm {
            Algorithm::Dijkstra => self.dijkstra(),
            Algorithm::AStar => {
                let heuristic = self.heuristic.ok_or_else(|| {
                    Error::Configuration("A* requires a heuristic; none was supplied".into())
                })?;
                self.astar(heuristic)
            }
            Algorithm::Bfs => self.bfs(),
        };

        debug!(
            algorithm = %algorithm,
            start = self.start,
            goal = self.goal,
            found = outcome.found(),
            cost = outcome.cost,
            expanded = outcome.expanded,
            "search finished"
        );
        Ok(outcome)
    }

    pub fn dijkstra(&self) -> SearchOutcome {
        dijkstra::shortest_path(self.graph, self.start, self.goal, None)
    }

    pub fn astar(&self, heuristic: &dyn Heuristic) -> SearchOutcome {
        dijkstra::shortest_path(self.graph, self.start, self.goal, Some(heuristic))
    }

    pub fn bfs(&self) -> SearchOutcome {
        bfs::fewest_hops(self.graph, self.start, self.goal)
    }

    /// Shortest path followed by edge/node-removal alternatives with cost
    /// `<= max_cost`, deduplicated and sorted by cost. Empty when the goal is
    /// unreachable or the shortest path already exceeds `max_cost`.
    pub fn alternatives(&self, max_cost: f64) -> Vec<Path> {
        alternatives::k_alternatives(self.graph, self.start, self.goal, max_cost)
    }
}
