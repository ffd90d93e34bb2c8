//! Result types returned by the `Advisor`.
//!
//! Plain serde structs; nothing here does any planning.

use serde::{Deserialize, Serialize};

use crate::arbiter::{Decision, RiskProfile, Strategy};
use crate::catalog::CatalogSnapshot;
use crate::model::{Course, LearningStyle};
use crate::planner::PathEvaluation;
use crate::search::Algorithm;

/// Totals over the courses of a path. Names without catalog attributes
/// contribute nothing but still count toward the average's denominator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PathMetrics {
    pub total_time_hours: f64,
    pub average_difficulty: f64,
}

impl PathMetrics {
    pub fn of(snapshot: &CatalogSnapshot, courses: &[String]) -> Self {
        if courses.is_empty() {
            return Self::default();
        }
        let (hours, difficulty) = courses
            .iter()
            .filter_map(|name| snapshot.course(name))
            .fold((0.0, 0.0), |(h, d), c| (h + c.duration_hours, d + f64::from(c.difficulty)));
        Self {
            total_time_hours: hours,
            average_difficulty: difficulty / courses.len() as f64,
        }
    }
}

// ============================================================================
// Paths
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathReport {
    pub success: bool,
    /// Starts at a completed course; the virtual start is never included.
    pub path: Vec<String>,
    /// `+∞` when no path exists.
    #[serde(with = "crate::model::unbounded")]
    pub total_cost: f64,
    #[serde(flatten)]
    pub metrics: PathMetrics,
    pub completed: Vec<String>,
    pub goal: String,
    pub learning_style: LearningStyle,
    pub algorithm: Algorithm,
    pub expanded: usize,
}

impl PathReport {
    /// `A -> B -> C`, empty when unsuccessful.
    pub fn describe(&self) -> String {
        self.path.join(" -> ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPath {
    /// 1-based, cheapest first.
    pub rank: usize,
    pub path: Vec<String>,
    pub total_cost: f64,
    #[serde(flatten)]
    pub metrics: PathMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativesReport {
    pub primary: PathReport,
    /// Cheaper than `alternative_cost_ratio × primary cost`, primary excluded.
    pub alternatives: Vec<RankedPath>,
    pub goal: String,
    pub learning_style: LearningStyle,
}

// ============================================================================
// Recommendations
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceRecommendation {
    pub success: bool,
    pub sequence: Vec<String>,
    /// Expected utility of the chosen path under the planner's outcomes.
    #[serde(with = "crate::model::unbounded")]
    pub utility: f64,
    #[serde(with = "crate::model::unbounded")]
    pub total_cost: f64,
    #[serde(flatten)]
    pub metrics: PathMetrics,
    pub goal: String,
    pub learning_style: LearningStyle,
    pub risk_tolerance: f64,
    /// Per-candidate scoring, virtual start stripped from each path.
    pub evaluations: Vec<PathEvaluation>,
    pub decision: Option<Decision>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseOption {
    pub course: String,
    pub success_probability: f64,
    pub expected_utility: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextCourseEvaluation {
    pub success: bool,
    pub recommended: Option<String>,
    pub recommended_value: Option<f64>,
    pub strategy: Strategy,
    /// Every available course, in catalog order.
    pub options: Vec<CourseOption>,
    pub risk_analysis: Vec<RiskProfile>,
    pub decision: Option<Decision>,
}

impl NextCourseEvaluation {
    pub(crate) fn nothing_available(strategy: Strategy) -> Self {
        Self {
            success: false,
            recommended: None,
            recommended_value: None,
            strategy,
            options: Vec::new(),
            risk_analysis: Vec::new(),
            decision: None,
        }
    }
}

// ============================================================================
// Catalog views
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrerequisiteStatus {
    pub course: String,
    pub prerequisites: Vec<String>,
    pub completed: Vec<String>,
    pub remaining: Vec<String>,
    pub met: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionStep {
    pub course: String,
    pub difficulty: u8,
    pub duration_hours: f64,
    pub value: f64,
    pub prerequisites: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningProgression {
    pub success: bool,
    pub steps: Vec<ProgressionStep>,
    #[serde(flatten)]
    pub metrics: PathMetrics,
    pub total_value: f64,
    /// `round(total hours / 40)`
    pub estimated_weeks: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPath {
    pub success: bool,
    pub category: String,
    pub recommended_course: Option<String>,
    pub path: Option<PathReport>,
    /// Up to five courses of the category, most accessible first.
    pub suitable_courses: Vec<String>,
    pub category_course_count: usize,
}

// ============================================================================
// Skills and careers
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapSeverity {
    Low,
    Medium,
    High,
}

impl GapSeverity {
    pub fn for_missing(count: usize) -> Self {
        match count {
            0..=2 => GapSeverity::Low,
            3..=5 => GapSeverity::Medium,
            _ => GapSeverity::High,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingSkill {
    pub skill: String,
    /// `None` when the skill is not a catalog course.
    pub course: Option<Course>,
    pub path: Option<PathReport>,
    pub prerequisites_needed: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGapReport {
    pub missing: Vec<String>,
    pub extra: Vec<String>,
    pub matched: Vec<String>,
    pub gaps: Vec<MissingSkill>,
    pub severity: GapSeverity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feasibility {
    Excellent,
    High,
    Medium,
    Challenging,
}

impl Feasibility {
    pub fn for_missing(count: usize) -> Self {
        match count {
            0 => Feasibility::Excellent,
            1..=3 => Feasibility::High,
            4..=7 => Feasibility::Medium,
            _ => Feasibility::Challenging,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerPlan {
    pub success: bool,
    pub career: String,
    pub required: Vec<String>,
    /// Required courses not yet held, in track order.
    pub missing: Vec<String>,
    /// Highest-value missing course the catalog knows.
    pub target: Option<String>,
    pub path: Option<PathReport>,
    pub estimated_months: Option<f64>,
    pub feasibility: Feasibility,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed::sample_catalog;

    #[test]
    fn metrics_over_known_courses() {
        let snapshot = sample_catalog();
        let path = vec!["Python Basics".to_string(), "Python Intermediate".to_string()];
        let m = PathMetrics::of(&snapshot, &path);
        assert_eq!(m.total_time_hours, 50.0);
        assert_eq!(m.average_difficulty, 4.0);
        assert_eq!(PathMetrics::of(&snapshot, &[]), PathMetrics::default());
    }

    #[test]
    fn severity_and_feasibility_bands() {
        assert_eq!(GapSeverity::for_missing(2), GapSeverity::Low);
        assert_eq!(GapSeverity::for_missing(5), GapSeverity::Medium);
        assert_eq!(GapSeverity::for_missing(6), GapSeverity::High);
        assert_eq!(Feasibility::for_missing(0), Feasibility::Excellent);
        assert_eq!(Feasibility::for_missing(3), Feasibility::High);
        assert_eq!(Feasibility::for_missing(7), Feasibility::Medium);
        assert_eq!(Feasibility::for_missing(8), Feasibility::Challenging);
    }
}
