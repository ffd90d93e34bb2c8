//! In-memory course catalog.
//!
//! This is the reference implementation of `CatalogSource`.
//! Courses and the prerequisite relation live in maps protected by RwLock.
//!
//! ## Limitations
//!
//! - **No persistence**: contents are lost on drop. Use `from_json` to seed.
//! - **No cycle detection**: `set_prerequisites` accepts cyclic relations.
//!   Search terminates on them, but learners get odd plans.
//! - **Per-collection locks**: `snapshot()` takes both read locks together,
//!   so a snapshot is consistent, but multi-step edits are not atomic.

use std::collections::BTreeMap;
use std::io::Read;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::Course;
use crate::{Error, Result};
use super::{CatalogSnapshot, CatalogSource};

// ============================================================================
// MemoryCatalog
// ============================================================================

/// In-memory catalog. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct MemoryCatalog {
    inner: Arc<CatalogInner>,
}

struct CatalogInner {
    courses: RwLock<BTreeMap<String, Course>>,
    /// course → prerequisite names
    prerequisites: RwLock<BTreeMap<String, Vec<String>>>,
    version: AtomicU64,
}

/// On-disk layout accepted by `from_json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub courses: Vec<Course>,
    #[serde(default)]
    pub prerequisites: BTreeMap<String, Vec<String>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(CatalogInner {
                courses: RwLock::new(BTreeMap::new()),
                prerequisites: RwLock::new(BTreeMap::new()),
                version: AtomicU64::new(0),
            }),
        }
    }

    /// Seed from an existing snapshot (e.g. `seed::sample_catalog()`).
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        Self {
            inner: Arc::new(CatalogInner {
                courses: RwLock::new(snapshot.courses),
                prerequisites: RwLock::new(snapshot.prerequisites),
                version: AtomicU64::new(snapshot.version),
            }),
        }
    }

    /// Load a `CatalogDocument` from JSON. Every course is validated.
    pub fn from_json(reader: impl Read) -> Result<Self> {
        let doc: CatalogDocument = serde_json::from_reader(reader)?;
        Self::from_document(doc)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    fn from_document(doc: CatalogDocument) -> Result<Self> {
        let catalog = Self::new();
        for course in doc.courses {
            catalog.upsert_course(course)?;
        }
        for (course, prereqs) in doc.prerequisites {
            catalog.set_prerequisites(&course, prereqs)?;
        }
        debug!(
            courses = catalog.inner.courses.read().len(),
            version = catalog.version(),
            "catalog loaded from JSON"
        );
        Ok(catalog)
    }

    fn bump(&self) -> u64 {
        self.inner.version.fetch_add(1, Ordering::Relaxed) + 1
    }

    // ========================================================================
    // CRUD
    // ========================================================================

    /// Insert or replace a course. Returns `true` if it was new.
    pub fn upsert_course(&self, course: Course) -> Result<bool> {
        course.validate()?;
        let previous = self.inner.courses.write().insert(course.name.clone(), course);
        self.bump();
        Ok(previous.is_none())
    }

    /// Remove a course. Fails while other courses still list it as a
    /// prerequisite. Returns `false` if it did not exist.
    pub fn remove_course(&self, name: &str) -> Result<bool> {
        {
            let prereqs = self.inner.prerequisites.read();
            let dependents: Vec<&str> = prereqs
                .iter()
                .filter(|(course, list)| course.as_str() != name && list.iter().any(|p| p == name))
                .map(|(course, _)| course.as_str())
                .collect();
            if !dependents.is_empty() {
                return Err(Error::Validation(format!(
                    "Cannot remove '{name}': it is a prerequisite of {}. Update those courses first.",
                    dependents.join(", ")
                )));
            }
        }

        let removed = self.inner.courses.write().remove(name);
        self.inner.prerequisites.write().remove(name);
        if removed.is_some() {
            self.bump();
        }
        Ok(removed.is_some())
    }

    /// Replace the prerequisite list of `course`. Unknown prerequisite names
    /// are kept but logged; the graph builder skips them.
    pub fn set_prerequisites(&self, course: &str, prerequisites: Vec<String>) -> Result<()> {
        {
            let courses = self.inner.courses.read();
            if !courses.contains_key(course) {
                return Err(Error::NotFound(format!("Course '{course}'")));
            }
            for p in prerequisites.iter().filter(|p| !courses.contains_key(p.as_str())) {
                warn!(course, prerequisite = %p, "prerequisite is not in the catalog");
            }
        }
        self.inner.prerequisites.write().insert(course.to_string(), prerequisites);
        self.bump();
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner.courses.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.courses.read().is_empty()
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CatalogSource impl
// ============================================================================

impl CatalogSource for MemoryCatalog {
    fn snapshot(&self) -> Result<CatalogSnapshot> {
        let courses = self.inner.courses.read();
        let prerequisites = self.inner.prerequisites.read();
        Ok(CatalogSnapshot::new(self.version(), courses.clone(), prerequisites.clone()))
    }

    fn course(&self, name: &str) -> Result<Option<Course>> {
        Ok(self.inner.courses.read().get(name).cloned())
    }

    fn course_names(&self) -> Result<Vec<String>> {
        Ok(self.inner.courses.read().keys().cloned().collect())
    }

    fn version(&self) -> u64 {
        self.inner.version.load(Ordering::Relaxed)
    }
}
