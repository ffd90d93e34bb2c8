//! k-alternative paths by single-edge and single-node removal.
//!
//! A simplified Yen's search: starting from the shortest path P, rerun
//! Dijkstra once per edge of P with that edge removed, and once per
//! intermediate node of P with that node made impassable. Only single
//! removals are explored, so some loopless alternatives a full k-shortest
//! search would find are never produced.

use hashbrown::HashSet;
use tracing::debug;

use crate::model::{CourseGraph, Path};
use super::dijkstra::shortest_path;

/// Shortest path first, then every distinct alternative with cost
/// `<= max_cost`, ascending by cost (equal costs ordered by node sequence).
pub(crate) fn k_alternatives(graph: &CourseGraph, start: &str, goal: &str, max_cost: f64) -> Vec<Path> {
    let Some(shortest) = shortest_path(graph, start, goal, None).into_path() else {
        return Vec::new();
    };
    if shortest.cost > max_cost {
        return Vec::new();
    }

    let mut seen: HashSet<Vec<String>> = HashSet::new();
    seen.insert(shortest.nodes.clone());
    let mut candidates: Vec<Path> = Vec::new();

    let mut consider = |perturbed: CourseGraph, removed: &str| {
        let Some(alt) = shortest_path(&perturbed, start, goal, None).into_path() else {
            return;
        };
        if alt.cost > max_cost {
            return;
        }
        if seen.insert(alt.nodes.clone()) {
            candidates.push(alt);
        } else {
            debug!(removed, path = %alt.describe(), "duplicate alternative dropped");
        }
    };

    for pair in shortest.nodes.windows(2) {
        consider(graph.without_edge(&pair[0], &pair[1]), &format!("{} -> {}", pair[0], pair[1]));
    }

    let intermediates = shortest.nodes.len().saturating_sub(2);
    for node in shortest.nodes.iter().skip(1).take(intermediates) {
        consider(graph.without_node(node), node);
    }

    candidates.sort_by(|a, b| a.cost.total_cmp(&b.cost).then_with(|| a.nodes.cmp(&b.nodes)));

    let mut paths = Vec::with_capacity(candidates.len() + 1);
    paths.push(shortest);
    paths.extend(candidates);
    paths
}
