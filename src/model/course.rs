//! Course: a node's attributes as supplied by the catalog.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Lowest and highest difficulty a catalog may assign.
pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 10;

/// Upper bound of the `value` scale. The builder turns value into a cost as `MAX_VALUE - value`.
pub const MAX_VALUE: f64 = 10.0;

/// A course in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    /// 1 (trivial) ..= 10 (hardest).
    pub difficulty: u8,
    pub duration_hours: f64,
    /// How useful the course is, 0 ..= 10.
    pub value: f64,
    /// Prerequisite depth used by the weighting. `None` means "count the
    /// listed prerequisites".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisite_count: Option<u32>,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "Uncategorized".to_string()
}

impl Course {
    pub fn new(name: impl Into<String>, difficulty: u8, duration_hours: f64, value: f64) -> Self {
        Self {
            name: name.into(),
            difficulty,
            duration_hours,
            value,
            prerequisite_count: None,
            category: default_category(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_prerequisite_count(mut self, count: u32) -> Self {
        self.prerequisite_count = Some(count);
        self
    }

    /// Attribute-less stand-in for a name that appears only in the
    /// prerequisite relation.
    pub(crate) fn placeholder(name: &str) -> Self {
        Self {
            name: name.to_string(),
            difficulty: 0,
            duration_hours: 0.0,
            value: 0.0,
            prerequisite_count: None,
            category: default_category(),
        }
    }

    /// Check the attribute ranges the catalog contract promises.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("Course name must not be empty".into()));
        }
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&self.difficulty) {
            return Err(Error::Validation(format!(
                "Course '{}': difficulty {} outside {MIN_DIFFICULTY}..={MAX_DIFFICULTY}",
                self.name, self.difficulty,
            )));
        }
        if !self.duration_hours.is_finite() || self.duration_hours < 0.0 {
            return Err(Error::Validation(format!(
                "Course '{}': duration_hours must be a non-negative number, got {}",
                self.name, self.duration_hours,
            )));
        }
        if !(0.0..=MAX_VALUE).contains(&self.value) {
            return Err(Error::Validation(format!(
                "Course '{}': value {} outside 0..={MAX_VALUE}",
                self.name, self.value,
            )));
        }
        Ok(())
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category)
    }
}
