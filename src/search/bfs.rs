//! Breadth-first search. Edge weights are ignored; cost is the hop count.

use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};

use crate::model::CourseGraph;
use super::dijkstra::reconstruct;
use super::{Algorithm, SearchOutcome};

/// Path with the fewest edges. Neighbors are visited in edge insertion
/// order, so the result is deterministic.
pub(crate) fn fewest_hops<'g>(graph: &'g CourseGraph, start: &'g str, goal: &'g str) -> SearchOutcome {
    let mut previous: HashMap<&'g str, &'g str> = HashMap::new();
    let mut visited: HashSet<&'g str> = HashSet::new();
    let mut queue = VecDeque::new();
    let mut expanded = 0_usize;

    visited.insert(start);
    queue.push_back(start);

    while let Some(node) = queue.pop_front() {
        expanded += 1;
        if node == goal {
            let path = reconstruct(&previous, start, goal);
            let cost = path.len().saturating_sub(1) as f64;
            return SearchOutcome { algorithm: Algorithm::Bfs, path, cost, expanded };
        }
        for edge in graph.edges(node) {
            let next = edge.to.as_str();
            if visited.insert(next) {
                previous.insert(next, node);
                queue.push_back(next);
            }
        }
    }

    SearchOutcome::unreachable(Algorithm::Bfs, expanded)
}
