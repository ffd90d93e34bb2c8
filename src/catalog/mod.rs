//! # Catalog Boundary
//!
//! The course catalog is owned outside the planning engine. This module
//! defines the contract the engine reads through and the immutable snapshot
//! each planning request works from.
//!
//! ## Implementations
//!
//! | Source | Module | Description |
//! |--------|--------|-------------|
//! | `MemoryCatalog` | `memory` | In-memory catalog for testing/embedding |

pub mod memory;
pub mod seed;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Course;
use crate::Result;

pub use memory::MemoryCatalog;

// ============================================================================
// Snapshot
// ============================================================================

/// Point-in-time copy of the catalog. Never mutated after it is taken, so a
/// planning request can hold it for as long as it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Bumped by the source on every mutation.
    pub version: u64,
    pub taken_at: DateTime<Utc>,
    pub courses: BTreeMap<String, Course>,
    /// course → courses that must be completed first.
    pub prerequisites: BTreeMap<String, Vec<String>>,
}

impl CatalogSnapshot {
    pub fn new(
        version: u64,
        courses: BTreeMap<String, Course>,
        prerequisites: BTreeMap<String, Vec<String>>,
    ) -> Self {
        Self { version, taken_at: Utc::now(), courses, prerequisites }
    }

    pub fn course(&self, name: &str) -> Option<&Course> {
        self.courses.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.courses.contains_key(name)
    }

    /// Listed prerequisites of `name` (empty if none).
    pub fn prerequisites_of(&self, name: &str) -> &[String] {
        self.prerequisites.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Prerequisite depth used in edge weighting: the course's explicit
    /// count, or the number of listed prerequisites.
    pub fn prerequisite_depth(&self, name: &str) -> u32 {
        self.course(name)
            .and_then(|c| c.prerequisite_count)
            .unwrap_or_else(|| listed_depth(self.prerequisites_of(name).len()))
    }

    /// Every name the snapshot knows: catalog courses plus prerequisite keys.
    pub fn all_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .courses
            .keys()
            .chain(self.prerequisites.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

// ============================================================================
// CatalogSource trait
// ============================================================================

/// Read contract between the advisor and whatever owns the course catalog.
pub trait CatalogSource: Send + Sync {
    /// Consistent copy of courses and prerequisites.
    fn snapshot(&self) -> Result<CatalogSnapshot>;

    fn course(&self, name: &str) -> Result<Option<Course>>;

    /// Sorted course names.
    fn course_names(&self) -> Result<Vec<String>>;

    fn version(&self) -> u64;
}

/// Listed prerequisite count as a depth, saturating at `u32::MAX`.
fn listed_depth(listed: usize) -> u32 {
    u32::try_from(listed).unwrap_or(u32::MAX)
}
