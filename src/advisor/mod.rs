//! # Advisor
//!
//! Request-level entry points over a `CatalogSource`. Each call takes a fresh
//! catalog snapshot, builds its own graph and runs the engine on it, so an
//! `Advisor` holds no per-request state and can be shared across threads.
//!
//! | Operation | Engine |
//! |-----------|--------|
//! | `find_path` | builder + search |
//! | `find_alternatives`, `path_with_alternatives` | builder + k-alternatives |
//! | `recommend_sequence` | builder + hybrid planner |
//! | `evaluate_next_courses` | utility arbiter |
//! | `learning_progression`, `skill_gap`, `plan_career_path` | `find_path` |

pub mod career;
pub mod reports;
pub mod survey;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::arbiter::{Action, Outcome, Strategy, UtilityArbiter};
use crate::builder::{attach_virtual_start, build_graph, edge_weight, VIRTUAL_START};
use crate::catalog::{CatalogSnapshot, CatalogSource};
use crate::config::{check_risk_tolerance, AdvisorConfig};
use crate::model::{Course, CourseGraph, LearningStyle, WeightOverrides, WeightProfile};
use crate::planner::{HybridPlanner, PathPenalties};
use crate::search::{Algorithm, GoalEntryHeuristic, PathFinder, SearchOutcome};
use crate::{Error, Result};

pub use reports::{
    AlternativesReport, CareerPlan, CategoryPath, CourseOption, Feasibility, GapSeverity,
    LearningProgression, MissingSkill, NextCourseEvaluation, PathMetrics, PathReport,
    PrerequisiteStatus, ProgressionStep, RankedPath, SequenceRecommendation, SkillGapReport,
};
pub use survey::{DifficultyTolerance, LearningGoal, StyleSurvey, TimePreference};

/// Hours of study assumed per week when estimating completion time.
const HOURS_PER_WEEK: f64 = 40.0;
/// How many category courses `path_to_category` lists.
const SUITABLE_COURSE_LIMIT: usize = 5;

// ============================================================================
// PathRequest
// ============================================================================

/// Completed courses, a goal, and optional overrides of the advisor's
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathRequest {
    pub completed: Vec<String>,
    pub goal: String,
    #[serde(default)]
    pub style: Option<LearningStyle>,
    #[serde(default)]
    pub algorithm: Option<Algorithm>,
    #[serde(default)]
    pub weights: Option<WeightOverrides>,
}

impl PathRequest {
    pub fn new<S: Into<String>>(completed: impl IntoIterator<Item = S>, goal: impl Into<String>) -> Self {
        Self {
            completed: completed.into_iter().map(Into::into).collect(),
            goal: goal.into(),
            ..Self::default()
        }
    }

    pub fn style(mut self, style: LearningStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn weights(mut self, weights: WeightOverrides) -> Self {
        self.weights = Some(weights);
        self
    }
}

/// Snapshot and graph for one request. The graph already carries the
/// virtual start.
struct Prepared {
    snapshot: CatalogSnapshot,
    graph: CourseGraph,
    style: LearningStyle,
}

// ============================================================================
// Advisor
// ============================================================================

pub struct Advisor<C: CatalogSource> {
    catalog: C,
    config: AdvisorConfig,
    planner: HybridPlanner,
}

impl<C: CatalogSource> Advisor<C> {
    pub fn new(catalog: C, config: AdvisorConfig) -> Self {
        let planner = HybridPlanner::new(config.max_alternatives);
        Self { catalog, config, planner }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    fn prepare(&self, request: &PathRequest) -> Result<Prepared> {
        let snapshot = self.catalog.snapshot()?;
        if !snapshot.contains(&request.goal) {
            return Err(Error::Validation(format!("Goal course '{}' not in catalog", request.goal)));
        }
        let style = request.style.unwrap_or(self.config.default_learning_style);
        let mut graph = build_graph(&snapshot, style, request.weights.as_ref())?;
        let attached = attach_virtual_start(&mut graph, &request.completed)?;
        debug!(goal = %request.goal, %style, attached, version = snapshot.version, "request prepared");
        Ok(Prepared { snapshot, graph, style })
    }

    // ========================================================================
    // Paths
    // ========================================================================

    /// Best path from any completed course to the goal.
    ///
    /// Fails with `Validation` if the goal is not a catalog course. An
    /// unreachable goal gives `success == false`.
    pub fn find_path(&self, request: &PathRequest) -> Result<PathReport> {
        let prepared = self.prepare(request)?;
        self.search_prepared(&prepared, request)
    }

    fn search_prepared(&self, prepared: &Prepared, request: &PathRequest) -> Result<PathReport> {
        let algorithm = request.algorithm.unwrap_or(self.config.default_algorithm);
        let heuristic = GoalEntryHeuristic::for_goal(&prepared.graph, &request.goal);
        let mut finder = PathFinder::new(&prepared.graph, VIRTUAL_START, &request.goal)?;
        if algorithm == Algorithm::AStar {
            finder = finder.with_heuristic(&heuristic);
        }
        let outcome = finder.search(algorithm)?;
        Ok(path_report(prepared, request, outcome))
    }

    /// Shortest path plus every edge/node-removal alternative, cheapest first.
    pub fn find_alternatives(&self, request: &PathRequest) -> Result<Vec<RankedPath>> {
        let prepared = self.prepare(request)?;
        self.alternatives_prepared(&prepared, &request.goal)
    }

    fn alternatives_prepared(&self, prepared: &Prepared, goal: &str) -> Result<Vec<RankedPath>> {
        let finder = PathFinder::new(&prepared.graph, VIRTUAL_START, goal)?;
        Ok(finder
            .alternatives(f64::INFINITY)
            .into_iter()
            .enumerate()
            .map(|(i, path)| {
                let path = path.strip_start(VIRTUAL_START);
                RankedPath {
                    rank: i + 1,
                    metrics: PathMetrics::of(&prepared.snapshot, &path.nodes),
                    total_cost: path.cost,
                    path: path.nodes,
                }
            })
            .collect())
    }

    /// Primary path plus the alternatives costing at most
    /// `alternative_cost_ratio` times the weighted shortest path.
    pub fn path_with_alternatives(&self, request: &PathRequest) -> Result<AlternativesReport> {
        let prepared = self.prepare(request)?;
        let primary = self.search_prepared(&prepared, request)?;
        let ranked = self.alternatives_prepared(&prepared, &request.goal)?;

        let ceiling = ranked
            .first()
            .map_or(f64::INFINITY, |best| best.total_cost * self.config.alternative_cost_ratio);
        let alternatives: Vec<RankedPath> = ranked
            .into_iter()
            .filter(|alt| alt.path != primary.path && alt.total_cost <= ceiling)
            .enumerate()
            .map(|(i, alt)| RankedPath { rank: i + 1, ..alt })
            .collect();

        Ok(AlternativesReport {
            goal: request.goal.clone(),
            learning_style: prepared.style,
            primary,
            alternatives,
        })
    }

    /// Hybrid-planner recommendation. Courses harder than
    /// `high_difficulty_threshold` cost `value × risk_tolerance` utility.
    pub fn recommend_sequence(&self, request: &PathRequest, risk_tolerance: Option<f64>) -> Result<SequenceRecommendation> {
        let risk_tolerance = risk_tolerance.unwrap_or(self.config.risk_tolerance);
        check_risk_tolerance(risk_tolerance)?;
        let prepared = self.prepare(request)?;

        let penalties = prepared
            .snapshot
            .courses
            .values()
            .filter(|c| c.difficulty > self.config.high_difficulty_threshold)
            .fold(
                PathPenalties::new().with_length_factor(self.config.path_length_factor),
                |p, c| p.with_node_penalty(c.name.clone(), -c.value * risk_tolerance),
            );

        let plan = self.planner.plan(&prepared.graph, VIRTUAL_START, &request.goal, &penalties)?;
        let sequence: Vec<String> = plan.path.into_iter().filter(|n| n != VIRTUAL_START).collect();
        let evaluations = plan
            .evaluations
            .into_iter()
            .map(|mut e| {
                e.path = e.path.strip_start(VIRTUAL_START);
                e
            })
            .collect();

        Ok(SequenceRecommendation {
            success: plan.found,
            metrics: PathMetrics::of(&prepared.snapshot, &sequence),
            sequence,
            utility: plan.utility,
            total_cost: plan.cost,
            goal: request.goal.clone(),
            learning_style: prepared.style,
            risk_tolerance,
            evaluations,
            decision: plan.decision,
        })
    }

    // ========================================================================
    // Next-course evaluation
    // ========================================================================

    /// Score every currently available course as a success/failure gamble
    /// and let the arbiter pick one.
    pub fn evaluate_next_courses(
        &self,
        completed: &[String],
        strategy: Option<Strategy>,
        risk_tolerance: Option<f64>,
    ) -> Result<NextCourseEvaluation> {
        let strategy = strategy.unwrap_or(self.config.default_strategy);
        let risk_tolerance = risk_tolerance.unwrap_or(self.config.risk_tolerance);
        check_risk_tolerance(risk_tolerance)?;

        let snapshot = self.catalog.snapshot()?;
        let available = available_in(&snapshot, completed);
        if available.is_empty() {
            info!(completed = completed.len(), "no course is currently available");
            return Ok(NextCourseEvaluation::nothing_available(strategy));
        }

        let actions: Vec<Action> = available
            .iter()
            .filter_map(|name| snapshot.course(name))
            .map(|course| next_course_action(course, risk_tolerance))
            .collect();
        let arbiter = UtilityArbiter::new(actions)?;
        let decision = arbiter.decide(strategy);

        let options = arbiter
            .actions()
            .iter()
            .map(|a| CourseOption {
                course: a.name.clone(),
                success_probability: a.outcomes.first().map_or(0.0, |o| o.probability),
                expected_utility: arbiter.expected_utility(a),
            })
            .collect();

        Ok(NextCourseEvaluation {
            success: true,
            recommended: Some(decision.action.clone()),
            recommended_value: Some(decision.value),
            strategy,
            options,
            risk_analysis: arbiter.analyze_risk(),
            decision: Some(decision),
        })
    }

    // ========================================================================
    // Catalog views
    // ========================================================================

    /// Courses not yet completed whose prerequisites are all completed.
    pub fn available_courses(&self, completed: &[String]) -> Result<Vec<String>> {
        Ok(available_in(&self.catalog.snapshot()?, completed))
    }

    pub fn prerequisite_status(&self, course: &str, completed: &[String]) -> Result<PrerequisiteStatus> {
        let snapshot = self.catalog.snapshot()?;
        if !snapshot.contains(course) {
            return Err(Error::NotFound(format!("Course '{course}'")));
        }
        let prerequisites = snapshot.prerequisites_of(course).to_vec();
        let (done, remaining): (Vec<String>, Vec<String>) =
            prerequisites.iter().cloned().partition(|p| completed.contains(p));
        Ok(PrerequisiteStatus {
            course: course.to_string(),
            met: remaining.is_empty(),
            prerequisites,
            completed: done,
            remaining,
        })
    }

    /// Case-insensitive category match.
    pub fn courses_by_category(&self, category: &str) -> Result<Vec<String>> {
        let snapshot = self.catalog.snapshot()?;
        Ok(snapshot
            .courses
            .values()
            .filter(|c| c.in_category(category))
            .map(|c| c.name.clone())
            .collect())
    }

    /// Sorted, unique.
    pub fn categories(&self) -> Result<Vec<String>> {
        let snapshot = self.catalog.snapshot()?;
        let mut categories: Vec<String> = snapshot.courses.values().map(|c| c.category.clone()).collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    /// Courses with `min <= difficulty <= max`.
    pub fn courses_by_difficulty(&self, min: u8, max: u8) -> Result<Vec<String>> {
        if min > max {
            return Err(Error::Validation(format!("Difficulty range {min}..={max} is empty")));
        }
        let snapshot = self.catalog.snapshot()?;
        Ok(snapshot
            .courses
            .values()
            .filter(|c| (min..=max).contains(&c.difficulty))
            .map(|c| c.name.clone())
            .collect())
    }

    /// Path to the most accessible course of `category`, ranked by the share
    /// of its prerequisites already completed. Courses without prerequisites
    /// rank last; courses with prerequisites but none completed are skipped.
    pub fn path_to_category(&self, completed: &[String], category: &str) -> Result<CategoryPath> {
        let snapshot = self.catalog.snapshot()?;
        let targets: Vec<&Course> = snapshot.courses.values().filter(|c| c.in_category(category)).collect();

        let mut suitable: Vec<(&str, f64)> = targets
            .iter()
            .filter(|c| !completed.contains(&c.name))
            .filter_map(|c| {
                let prereqs = snapshot.prerequisites_of(&c.name);
                let met = prereqs.iter().filter(|p| completed.contains(p)).count();
                match (met, prereqs.len()) {
                    (_, 0) => Some((c.name.as_str(), 0.0)),
                    (0, _) => None,
                    (met, needed) => Some((c.name.as_str(), met as f64 / needed as f64)),
                }
            })
            .collect();
        suitable.sort_by(|a, b| b.1.total_cmp(&a.1));

        let Some(&(best, _)) = suitable.first() else {
            return Ok(CategoryPath {
                success: false,
                category: category.to_string(),
                recommended_course: None,
                path: None,
                suitable_courses: Vec::new(),
                category_course_count: targets.len(),
            });
        };

        let request = PathRequest::new(completed.iter().cloned(), best);
        let path = if snapshot.prerequisites_of(best).is_empty() {
            self.entry_course_report(&snapshot, &request)?
        } else {
            self.find_path(&request)?
        };
        Ok(CategoryPath {
            success: path.success,
            category: category.to_string(),
            recommended_course: Some(best.to_string()),
            suitable_courses: suitable.iter().take(SUITABLE_COURSE_LIMIT).map(|(n, _)| n.to_string()).collect(),
            category_course_count: targets.len(),
            path: Some(path),
        })
    }

    /// A course with no prerequisites is its own path: it can be taken now,
    /// at the cost of its own edge weight.
    fn entry_course_report(&self, snapshot: &CatalogSnapshot, request: &PathRequest) -> Result<PathReport> {
        let style = request.style.unwrap_or(self.config.default_learning_style);
        let profile = WeightProfile::resolve(style, request.weights.as_ref())?;
        let total_cost = snapshot
            .course(&request.goal)
            .map(|c| edge_weight(c, snapshot.prerequisite_depth(&c.name), &profile))
            .unwrap_or(0.0);
        let path = vec![request.goal.clone()];
        Ok(PathReport {
            success: true,
            metrics: PathMetrics::of(snapshot, &path),
            path,
            total_cost,
            completed: request.completed.clone(),
            goal: request.goal.clone(),
            learning_style: style,
            algorithm: request.algorithm.unwrap_or(self.config.default_algorithm),
            expanded: 0,
        })
    }

    /// Course-by-course breakdown of the balanced Dijkstra path.
    pub fn learning_progression(&self, completed: &[String], goal: &str) -> Result<LearningProgression> {
        let request = PathRequest::new(completed.iter().cloned(), goal)
            .style(LearningStyle::Balanced)
            .algorithm(Algorithm::Dijkstra);
        let prepared = self.prepare(&request)?;
        let report = self.search_prepared(&prepared, &request)?;
        if !report.success {
            return Ok(LearningProgression {
                success: false,
                steps: Vec::new(),
                metrics: PathMetrics::default(),
                total_value: 0.0,
                estimated_weeks: 0,
            });
        }

        let steps: Vec<ProgressionStep> = report
            .path
            .iter()
            .filter_map(|name| prepared.snapshot.course(name))
            .map(|c| ProgressionStep {
                course: c.name.clone(),
                difficulty: c.difficulty,
                duration_hours: c.duration_hours,
                value: c.value,
                prerequisites: prepared.snapshot.prerequisites_of(&c.name).to_vec(),
            })
            .collect();

        let total_time_hours: f64 = steps.iter().map(|s| s.duration_hours).sum();
        let average_difficulty = if steps.is_empty() {
            0.0
        } else {
            steps.iter().map(|s| f64::from(s.difficulty)).sum::<f64>() / steps.len() as f64
        };

        Ok(LearningProgression {
            success: true,
            total_value: steps.iter().map(|s| s.value).sum(),
            estimated_weeks: estimated_weeks(total_time_hours),
            metrics: PathMetrics { total_time_hours, average_difficulty },
            steps,
        })
    }

    pub fn assess_learning_style(&self, survey: &StyleSurvey) -> LearningStyle {
        survey.assess()
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn path_report(prepared: &Prepared, request: &PathRequest, outcome: SearchOutcome) -> PathReport {
    let success = outcome.found();
    let path: Vec<String> = outcome.path.into_iter().filter(|n| n != VIRTUAL_START).collect();
    PathReport {
        success,
        metrics: PathMetrics::of(&prepared.snapshot, &path),
        path,
        total_cost: outcome.cost,
        completed: request.completed.clone(),
        goal: request.goal.clone(),
        learning_style: prepared.style,
        algorithm: outcome.algorithm,
        expanded: outcome.expanded,
    }
}

/// Whole weeks at `HOURS_PER_WEEK`, rounded half to even and saturating at
/// `u32::MAX`.
fn estimated_weeks(total_time_hours: f64) -> u32 {
    let weeks = (total_time_hours / HOURS_PER_WEEK).round_ties_even();
    if weeks.is_nan() || weeks <= 0.0 {
        0
    } else if weeks >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        weeks as u32
    }
}

fn available_in(snapshot: &CatalogSnapshot, completed: &[String]) -> Vec<String> {
    snapshot
        .courses
        .keys()
        .filter(|name| !completed.contains(name))
        .filter(|name| snapshot.prerequisites_of(name).iter().all(|p| completed.contains(p)))
        .cloned()
        .collect()
}

const BASE_SUCCESS: f64 = 0.9;
const HARD_COURSE_SUCCESS: f64 = 0.6;
const HARD_COURSE_DIFFICULTY: u8 = 7;
const RISK_SWING: f64 = 0.4;

/// Success/failure gamble for taking `course` next.
fn next_course_action(course: &Course, risk_tolerance: f64) -> Action {
    let difficulty = f64::from(course.difficulty);
    let base = if course.difficulty <= HARD_COURSE_DIFFICULTY { BASE_SUCCESS } else { HARD_COURSE_SUCCESS };
    let success = (base + (risk_tolerance - 0.5) * RISK_SWING).clamp(0.1, 0.95);

    let time_utility = 100.0 / (course.duration_hours + 1.0);
    let ease_utility = 10.0 - difficulty;
    let good = 0.4 * course.value + 0.3 * time_utility + 0.3 * ease_utility;
    let bad = 0.1 * (course.value + time_utility + ease_utility);

    Action::new(course.name.clone(), [Outcome::new(success, good), Outcome::new(1.0 - success, bad)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{seed::sample_catalog, MemoryCatalog};
    use pretty_assertions::assert_eq;

    fn advisor() -> Advisor<MemoryCatalog> {
        Advisor::new(MemoryCatalog::from_snapshot(sample_catalog()), AdvisorConfig::default())
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn next_course_gamble_follows_difficulty_and_tolerance() {
        let easy = Course::new("Easy", 3, 19.0, 8.0);
        let action = next_course_action(&easy, 0.5);
        assert_eq!(action.outcomes[0].probability, 0.9);
        // 0.4·8 + 0.3·5 + 0.3·7
        assert!((action.outcomes[0].utility - 6.8).abs() < 1e-9);
        // 0.1·(8 + 5 + 7)
        assert!((action.outcomes[1].utility - 2.0).abs() < 1e-9);

        let hard = Course::new("Hard", 9, 59.0, 10.0);
        assert!((next_course_action(&hard, 0.0).outcomes[0].probability - 0.4).abs() < 1e-9);
        assert!((next_course_action(&hard, 1.0).outcomes[0].probability - 0.8).abs() < 1e-9);
        assert_eq!(next_course_action(&easy, 1.0).outcomes[0].probability, 0.95);
    }

    #[test]
    fn available_courses_respect_prerequisites() {
        let available = advisor().available_courses(&names(&["Python Basics"])).unwrap();
        assert_eq!(
            available,
            names(&["Database Systems", "Drawing", "Mathematics", "Music Theory", "Python Intermediate"])
        );
    }

    #[test]
    fn prerequisite_status_splits_lists() {
        let status = advisor()
            .prerequisite_status("Data Analysis", &names(&["Statistics"]))
            .unwrap();
        assert_eq!(status.completed, names(&["Statistics"]));
        assert_eq!(status.remaining, names(&["SQL Basics"]));
        assert!(!status.met);
        assert!(matches!(
            advisor().prerequisite_status("Astrology", &[]),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn category_views() {
        let a = advisor();
        assert_eq!(a.courses_by_category("arts").unwrap(), names(&["Drawing", "Music Theory", "Painting"]));
        assert_eq!(
            a.categories().unwrap(),
            names(&["AI/ML", "Arts", "Data Science", "Foundation", "Programming"])
        );
        assert_eq!(a.courses_by_difficulty(9, 10).unwrap(), names(&["Machine Learning", "Predictive Analytics"]));
        assert!(matches!(a.courses_by_difficulty(5, 2), Err(Error::Validation(_))));
    }

    #[test]
    fn path_to_category_prefers_open_courses() {
        let result = advisor().path_to_category(&names(&["Drawing"]), "Arts").unwrap();
        assert!(result.success);
        // Painting builds on Drawing; Music Theory has no prerequisites.
        assert_eq!(result.suitable_courses, names(&["Painting", "Music Theory"]));
        assert_eq!(result.recommended_course.as_deref(), Some("Painting"));
        assert_eq!(result.path.unwrap().path, names(&["Drawing", "Painting"]));
        assert_eq!(result.category_course_count, 3);
    }

    #[test]
    fn estimated_weeks_rounds_and_saturates() {
        assert_eq!(estimated_weeks(0.0), 0);
        assert_eq!(estimated_weeks(150.0), 4);
        // 0.5 and 2.5 weeks round to even.
        assert_eq!(estimated_weeks(20.0), 0);
        assert_eq!(estimated_weeks(100.0), 2);
        assert_eq!(estimated_weeks(f64::MAX), u32::MAX);
        assert_eq!(estimated_weeks(f64::INFINITY), u32::MAX);
    }

    #[test]
    fn path_to_category_from_scratch_starts_at_entry_course() {
        let result = advisor().path_to_category(&[], "Arts").unwrap();
        assert!(result.success);
        assert_eq!(result.recommended_course.as_deref(), Some("Drawing"));

        let path = result.path.unwrap();
        assert!(path.success);
        assert_eq!(path.path, names(&["Drawing"]));
        let snapshot = sample_catalog();
        let profile = WeightProfile::resolve(AdvisorConfig::default().default_learning_style, None).unwrap();
        let drawing = snapshot.course("Drawing").unwrap();
        assert_eq!(path.total_cost, edge_weight(drawing, snapshot.prerequisite_depth("Drawing"), &profile));
        assert_eq!(path.metrics.total_time_hours, 20.0);
    }

    #[test]
    fn path_to_unknown_category_fails_softly() {
        let result = advisor().path_to_category(&[], "Cooking").unwrap();
        assert!(!result.success);
        assert_eq!(result.category_course_count, 0);
    }
}
