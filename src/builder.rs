//! Graph builder: turns a catalog snapshot into a weighted prerequisite graph.
//!
//! Every `(course, prerequisite)` pair becomes an edge `prerequisite -> course`
//! whose weight is the cost of taking `course`:
//!
//! ```text
//! w = time·(hours/10) + difficulty·difficulty + utility·(10 − value) + prereq·depth
//! ```
//!
//! Pure function of its inputs: a fresh graph per planning request.

use tracing::{debug, warn};

use crate::catalog::CatalogSnapshot;
use crate::model::{Course, CourseGraph, LearningStyle, WeightOverrides, WeightProfile, MAX_VALUE};
use crate::{Error, Result};

/// Synthetic source node joined to every completed course by a zero-cost edge.
pub const VIRTUAL_START: &str = "__virtual_start__";

/// Hours are scaled down so a 10-hour course weighs like one difficulty point.
const HOURS_PER_UNIT: f64 = 10.0;

/// Cost of taking `course` under `profile`. Never `<= 0`: a degenerate
/// combination falls back to `max(difficulty, 1)` so Dijkstra/A* see
/// strictly positive costs.
pub fn edge_weight(course: &Course, prerequisite_depth: u32, profile: &WeightProfile) -> f64 {
    let difficulty = f64::from(course.difficulty);
    let weight = profile.time * (course.duration_hours / HOURS_PER_UNIT)
        + profile.difficulty * difficulty
        + profile.utility * (MAX_VALUE - course.value)
        + profile.prereq * f64::from(prerequisite_depth);

    if weight <= 0.0 { difficulty.max(1.0) } else { weight }
}

/// Build the graph for `style`, with optional per-key coefficient overrides.
pub fn build_graph(
    snapshot: &CatalogSnapshot,
    style: LearningStyle,
    overrides: Option<&WeightOverrides>,
) -> Result<CourseGraph> {
    let profile = WeightProfile::resolve(style, overrides)?;
    build_with_profile(snapshot, &profile)
}

/// Build the graph with an already-resolved profile.
pub fn build_with_profile(snapshot: &CatalogSnapshot, profile: &WeightProfile) -> Result<CourseGraph> {
    if snapshot.contains(VIRTUAL_START) || snapshot.prerequisites.contains_key(VIRTUAL_START) {
        return Err(Error::Validation(format!(
            "Catalog uses the reserved node name '{VIRTUAL_START}'"
        )));
    }

    let mut graph = CourseGraph::new();
    for name in snapshot.all_names() {
        graph.add_node(name);
    }

    for (course_name, prereqs) in &snapshot.prerequisites {
        let placeholder;
        let course = match snapshot.course(course_name) {
            Some(c) => c,
            None => {
                debug!(course = %course_name, "no attributes in catalog, weighting as zero");
                placeholder = Course::placeholder(course_name);
                &placeholder
            }
        };
        let weight = edge_weight(course, snapshot.prerequisite_depth(course_name), profile);

        for prereq in prereqs {
            if !graph.contains(prereq) {
                warn!(course = %course_name, prerequisite = %prereq, "prerequisite unknown, edge skipped");
                continue;
            }
            graph.add_edge(prereq.as_str(), course_name.as_str(), weight)?;
        }
    }

    debug!(
        version = snapshot.version,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "course graph built"
    );
    Ok(graph)
}

/// Add `VIRTUAL_START` with a zero-cost edge to each completed course the
/// graph knows. Returns how many completed courses were attached.
pub fn attach_virtual_start(graph: &mut CourseGraph, completed: &[String]) -> Result<usize> {
    graph.add_node(VIRTUAL_START);
    let mut attached: Vec<&str> = Vec::with_capacity(completed.len());
    for course in completed {
        if attached.contains(&course.as_str()) {
            continue;
        }
        if !graph.contains(course) {
            warn!(course = %course, "completed course not in catalog, ignored");
            continue;
        }
        graph.add_edge(VIRTUAL_START, course.as_str(), 0.0)?;
        attached.push(course);
    }
    Ok(attached.len())
}
