//! Best-first search: Dijkstra, and A* when a heuristic is supplied.
//!
//! Lazy deletion: the queue may hold several entries for one node; an entry
//! popped after its node was finalized is discarded. The search stops as
//! soon as the goal is finalized.
//!
//! Ties are deterministic. Entries with equal priority pop in node-name
//! order, then insertion order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::{HashMap, HashSet};

use crate::model::CourseGraph;
use super::{Algorithm, Heuristic, SearchOutcome};

// ============================================================================
// Queue entry
// ============================================================================

/// Min-queue entry. `Ord` is reversed so `BinaryHeap` pops the smallest
/// `priority` first.
#[derive(Debug)]
struct QueueEntry<'g> {
    /// `g` for Dijkstra, `g + h` for A*.
    priority: f64,
    cost: f64,
    node: &'g str,
    seq: u64,
}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.node.cmp(self.node))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry<'_> {}

// ============================================================================
// Search
// ============================================================================

/// Cheapest `start -> goal` path. `start` and `goal` must be keys of `graph`
/// (checked by `PathFinder::new`).
pub(crate) fn shortest_path<'g>(
    graph: &'g CourseGraph,
    start: &'g str,
    goal: &'g str,
    heuristic: Option<&dyn Heuristic>,
) -> SearchOutcome {
    let algorithm = if heuristic.is_some() { Algorithm::AStar } else { Algorithm::Dijkstra };
    let estimate = |node: &str| heuristic.map_or(0.0, |h| h.estimate(node, goal));

    let mut best: HashMap<&'g str, f64> = HashMap::new();
    let mut previous: HashMap<&'g str, &'g str> = HashMap::new();
    let mut finalized: HashSet<&'g str> = HashSet::new();
    let mut queue = BinaryHeap::new();
    let mut seq = 0_u64;

    best.insert(start, 0.0);
    queue.push(QueueEntry { priority: estimate(start), cost: 0.0, node: start, seq });

    while let Some(QueueEntry { cost, node, .. }) = queue.pop() {
        if !finalized.insert(node) {
            continue;
        }
        if node == goal {
            return SearchOutcome {
                algorithm,
                path: reconstruct(&previous, start, goal),
                cost,
                expanded: finalized.len(),
            };
        }

        for edge in graph.edges(node) {
            let next = edge.to.as_str();
            if finalized.contains(next) {
                continue;
            }
            let candidate = cost + edge.weight;
            if best.get(next).is_none_or(|&known| candidate < known) {
                best.insert(next, candidate);
                previous.insert(next, node);
                seq += 1;
                queue.push(QueueEntry {
                    priority: candidate + estimate(next),
                    cost: candidate,
                    node: next,
                    seq,
                });
            }
        }
    }

    SearchOutcome::unreachable(algorithm, finalized.len())
}

/// Walk predecessor links back from `goal`.
pub(crate) fn reconstruct(previous: &HashMap<&str, &str>, start: &str, goal: &str) -> Vec<String> {
    let mut path = vec![goal.to_string()];
    let mut current = goal;
    while current != start {
        match previous.get(current) {
            Some(&prev) => {
                path.push(prev.to_string());
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ZeroHeuristic;
    use pretty_assertions::assert_eq;

    fn sample() -> CourseGraph {
        CourseGraph::from_routes([
            ("A", vec![("B", 3.0), ("C", 5.0), ("E", 10.0)]),
            ("B", vec![("D", 4.0), ("E", 2.0)]),
            ("C", vec![("D", 2.0)]),
            ("D", vec![("F", 3.0)]),
            ("E", vec![("F", 1.0)]),
            ("F", vec![]),
        ])
        .unwrap()
    }

    #[test]
    fn finds_cheapest_route() {
        let g = sample();
        let outcome = shortest_path(&g, "A", "F", None);
        assert_eq!(outcome.path, vec!["A", "B", "E", "F"]);
        assert_eq!(outcome.cost, 6.0);
        assert_eq!(outcome.algorithm, Algorithm::Dijkstra);
    }

    #[test]
    fn start_equals_goal_is_a_zero_cost_single_node_path() {
        let g = sample();
        let outcome = shortest_path(&g, "C", "C", None);
        assert_eq!(outcome.path, vec!["C"]);
        assert_eq!(outcome.cost, 0.0);
    }

    #[test]
    fn unreachable_goal_reports_infinity() {
        let mut g = sample();
        g.add_node("Island");
        let outcome = shortest_path(&g, "A", "Island", None);
        assert!(!outcome.found());
        assert!(outcome.path.is_empty());
        assert_eq!(outcome.cost, f64::INFINITY);
        // Everything reachable from A was finalized before giving up.
        assert_eq!(outcome.expanded, 6);
    }

    #[test]
    fn astar_with_zero_heuristic_matches_dijkstra() {
        let g = sample();
        let outcome = shortest_path(&g, "A", "F", Some(&ZeroHeuristic));
        assert_eq!(outcome.algorithm, Algorithm::AStar);
        assert_eq!(outcome.path, vec!["A", "B", "E", "F"]);
        assert_eq!(outcome.cost, 6.0);
    }

    #[test]
    fn equal_cost_ties_break_by_node_name() {
        // A -> X -> G and A -> M -> G both cost 2; M pops before X.
        let g = CourseGraph::from_routes([
            ("A", vec![("X", 1.0), ("M", 1.0)]),
            ("X", vec![("G", 1.0)]),
            ("M", vec![("G", 1.0)]),
            ("G", vec![]),
        ])
        .unwrap();
        for _ in 0..10 {
            assert_eq!(shortest_path(&g, "A", "G", None).path, vec!["A", "M", "G"]);
        }
    }

    #[test]
    fn terminates_on_cycles() {
        let g = CourseGraph::from_routes([
            ("A", vec![("B", 1.0)]),
            ("B", vec![("C", 1.0), ("A", 1.0)]),
            ("C", vec![("A", 1.0), ("D", 5.0)]),
            ("D", vec![]),
        ])
        .unwrap();
        let outcome = shortest_path(&g, "A", "D", None);
        assert_eq!(outcome.path, vec!["A", "B", "C", "D"]);
        assert_eq!(outcome.cost, 7.0);
    }

    #[test]
    fn uses_cheapest_of_parallel_edges() {
        let mut g = CourseGraph::new();
        g.add_edge("A", "B", 4.0).unwrap();
        g.add_edge("A", "B", 1.5).unwrap();
        g.add_node("B");
        assert_eq!(shortest_path(&g, "A", "B", None).cost, 1.5);
    }
}
