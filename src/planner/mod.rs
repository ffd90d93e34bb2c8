//! Hybrid planner: search proposes, the arbiter disposes.
//!
//! The top `max_paths` alternatives from the search engine each become an
//! arbiter action with two outcomes:
//!
//! | Outcome | Probability | Utility |
//! |---------|-------------|---------|
//! | normal | `1 − c` | `−cost + adjustments` |
//! | complication | `c` | `−1.5 · cost` |
//!
//! where `c` grows by 0.02 per edge beyond the first, starting at 0.1 and
//! capped at 0.4. The winner under MEU is returned with the full trace.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::arbiter::{Action, Decision, Outcome, Strategy, UtilityArbiter};
use crate::model::{CourseGraph, Path};
use crate::search::PathFinder;
use crate::Result;

pub const DEFAULT_MAX_PATHS: usize = 3;

const BASE_COMPLICATION: f64 = 0.1;
const COMPLICATION_PER_EDGE: f64 = 0.02;
const MAX_COMPLICATION: f64 = 0.4;
const COMPLICATION_COST_FACTOR: f64 = 1.5;

/// Probability that following `path` runs into trouble.
pub fn complication_probability(path: &Path) -> f64 {
    let extra_edges = path.len().max(1) - 1;
    (BASE_COMPLICATION + COMPLICATION_PER_EDGE * extra_edges as f64).min(MAX_COMPLICATION)
}

// ============================================================================
// Penalties
// ============================================================================

/// Adjustments added to the normal-outcome utility of each path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathPenalties {
    /// Added once per node on the path. Negative values favor short paths.
    pub length_factor: f64,
    /// Added for every path node listed here.
    pub node_penalties: HashMap<String, f64>,
}

impl PathPenalties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_length_factor(mut self, factor: f64) -> Self {
        self.length_factor = factor;
        self
    }

    pub fn with_node_penalty(mut self, node: impl Into<String>, penalty: f64) -> Self {
        self.node_penalties.insert(node.into(), penalty);
        self
    }

    pub fn adjustment(&self, path: &Path) -> f64 {
        let per_node: f64 = path
            .nodes
            .iter()
            .filter_map(|n| self.node_penalties.get(n.as_str()))
            .sum();
        path.nodes.len() as f64 * self.length_factor + per_node
    }
}

// ============================================================================
// Trace and result
// ============================================================================

/// How one candidate path was scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathEvaluation {
    /// Arbiter action name, `path-1`, `path-2`, ...
    pub label: String,
    pub path: Path,
    pub complication_probability: f64,
    pub normal_utility: f64,
    pub complication_utility: f64,
    pub expected_utility: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanOutcome {
    pub found: bool,
    pub start: String,
    pub goal: String,
    /// Empty when nothing was found.
    pub path: Vec<String>,
    #[serde(with = "crate::model::unbounded")]
    pub cost: f64,
    /// Expected utility of the chosen path, `-∞` on failure.
    #[serde(with = "crate::model::unbounded")]
    pub utility: f64,
    pub evaluations: Vec<PathEvaluation>,
    pub decision: Option<Decision>,
}

impl PlanOutcome {
    fn no_path(start: &str, goal: &str) -> Self {
        Self {
            found: false,
            start: start.to_string(),
            goal: goal.to_string(),
            path: Vec::new(),
            cost: f64::INFINITY,
            utility: f64::NEG_INFINITY,
            evaluations: Vec::new(),
            decision: None,
        }
    }
}

// ============================================================================
// HybridPlanner
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HybridPlanner {
    max_paths: usize,
}

impl Default for HybridPlanner {
    fn default() -> Self {
        Self { max_paths: DEFAULT_MAX_PATHS }
    }
}

impl HybridPlanner {
    /// `max_paths` is clamped to at least one.
    pub fn new(max_paths: usize) -> Self {
        Self { max_paths: max_paths.max(1) }
    }

    pub fn max_paths(&self) -> usize {
        self.max_paths
    }

    /// Fails only if `start` or `goal` is not a graph node; an unreachable
    /// goal is an outcome with `found == false`.
    pub fn plan(&self, graph: &CourseGraph, start: &str, goal: &str, penalties: &PathPenalties) -> Result<PlanOutcome> {
        let finder = PathFinder::new(graph, start, goal)?;
        let mut candidates = finder.alternatives(f64::INFINITY);
        if candidates.is_empty() {
            debug!(start, goal, "no path for hybrid plan");
            return Ok(PlanOutcome::no_path(start, goal));
        }
        candidates.truncate(self.max_paths);

        let mut evaluations = Vec::with_capacity(candidates.len());
        let mut actions = Vec::with_capacity(candidates.len());
        for (i, path) in candidates.into_iter().enumerate() {
            let label = format!("path-{}", i + 1);
            let complication = complication_probability(&path);
            let normal_utility = -path.cost + penalties.adjustment(&path);
            let complication_utility = -path.cost * COMPLICATION_COST_FACTOR;

            actions.push(Action::new(
                label.clone(),
                [
                    Outcome::new(1.0 - complication, normal_utility),
                    Outcome::new(complication, complication_utility),
                ],
            ));
            evaluations.push(PathEvaluation {
                label,
                path,
                complication_probability: complication,
                normal_utility,
                complication_utility,
                expected_utility: (1.0 - complication) * normal_utility + complication * complication_utility,
            });
        }

        let decision = UtilityArbiter::new(actions)?.decide(Strategy::MaximumExpectedUtility);
        let Some(chosen) = evaluations.iter().find(|e| e.label == decision.action) else {
            return Ok(PlanOutcome::no_path(start, goal));
        };

        debug!(
            start,
            goal,
            chosen = %chosen.label,
            cost = chosen.path.cost,
            utility = decision.value,
            candidates = evaluations.len(),
            "hybrid plan chosen"
        );

        Ok(PlanOutcome {
            found: true,
            start: start.to_string(),
            goal: goal.to_string(),
            path: chosen.path.nodes.clone(),
            cost: chosen.path.cost,
            utility: decision.value,
            evaluations,
            decision: Some(decision),
        })
    }
}
