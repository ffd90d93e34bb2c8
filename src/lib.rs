//! # pathwise: Learning Path Planner
//!
//! Recommends a sequence of courses that moves a learner from what they have
//! already completed to a target course, optimizing for a learning style
//! (fastest, easiest, balanced, challenging).
//!
//! ## Design Principles
//!
//! 1. **Pure engine**: graph building, search and arbitration are synchronous
//!    functions over immutable values. No singletons, no I/O.
//! 2. **One graph per request**: a `CourseGraph` is built fresh from a
//!    `CatalogSnapshot` and never mutated while a search runs.
//! 3. **Closed tokens**: algorithms, strategies and styles are enums, parsed
//!    once at the boundary.
//! 4. **"No path" is a value**: unreachable goals come back as a result with
//!    `found == false` and infinite cost, never as an `Err`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pathwise::{Advisor, AdvisorConfig, PathRequest, LearningStyle};
//! use pathwise::catalog::{seed, MemoryCatalog};
//!
//! # fn example() -> pathwise::Result<()> {
//! let advisor = Advisor::new(MemoryCatalog::from_snapshot(seed::sample_catalog()), AdvisorConfig::default());
//!
//! let report = advisor.find_path(
//!     &PathRequest::new(["Python Basics"], "Machine Learning").style(LearningStyle::Fastest),
//! )?;
//!
//! if report.success {
//!     println!("{} (cost {:.2})", report.path.join(" -> "), report.total_cost);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Module | Description |
//! |-------|--------|-------------|
//! | Graph Builder | `builder` | Catalog → weighted prerequisite graph |
//! | Path Search | `search` | Dijkstra / A* / BFS + k-alternative paths |
//! | Utility Arbiter | `arbiter` | MEU / minimax / risk-adjusted selection |
//! | Hybrid Planner | `planner` | Alternatives scored by the arbiter |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod catalog;
pub mod builder;
pub mod search;
pub mod arbiter;
pub mod planner;
pub mod advisor;
pub mod config;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Course, CourseGraph, Edge, Path,
    LearningStyle, WeightProfile, WeightOverrides,
};

// ============================================================================
// Re-exports: Engine
// ============================================================================

pub use catalog::{CatalogSource, CatalogSnapshot, MemoryCatalog};
pub use search::{Algorithm, Heuristic, PathFinder, SearchOutcome};
pub use arbiter::{Action, Decision, Outcome, RiskLevel, RiskProfile, Strategy, UtilityArbiter};
pub use planner::{HybridPlanner, PathPenalties, PlanOutcome};

// ============================================================================
// Re-exports: Advisor
// ============================================================================

pub use advisor::{Advisor, PathRequest, StyleSurvey};
pub use config::AdvisorConfig;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unknown token, missing algorithm input (A* without heuristic), bad config value.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input that violates a structural requirement (unknown start/goal, bad probability, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Config parse error in {path}: {message}")]
    ConfigParse { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
