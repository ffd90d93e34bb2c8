//! Advisor configuration.
//!
//! Resolution order, later layers win:
//!
//! 1. compiled defaults
//! 2. a TOML file (optional)
//! 3. `PATHWISE_*` environment variables
//!
//! The result is validated once; invalid tokens or out-of-range numbers
//! are `Error::Configuration`.

use std::path::Path as FsPath;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::arbiter::Strategy;
use crate::model::{LearningStyle, MAX_DIFFICULTY};
use crate::search::Algorithm;
use crate::{Error, Result};

pub const ENV_DEFAULT_ALGORITHM: &str = "PATHWISE_DEFAULT_ALGORITHM";
pub const ENV_DEFAULT_STRATEGY: &str = "PATHWISE_DEFAULT_STRATEGY";
pub const ENV_DEFAULT_LEARNING_STYLE: &str = "PATHWISE_DEFAULT_LEARNING_STYLE";
pub const ENV_MAX_ALTERNATIVES: &str = "PATHWISE_MAX_ALTERNATIVES";
pub const ENV_RISK_TOLERANCE: &str = "PATHWISE_RISK_TOLERANCE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub default_algorithm: Algorithm,
    pub default_strategy: Strategy,
    pub default_learning_style: LearningStyle,
    /// Candidate paths handed to the hybrid planner.
    pub max_alternatives: usize,
    /// Alternatives listed next to a primary path cost at most `ratio × best`.
    pub alternative_cost_ratio: f64,
    /// Utility added per node of a recommended sequence.
    pub path_length_factor: f64,
    /// Courses harder than this are penalized in recommendations.
    pub high_difficulty_threshold: u8,
    /// In `[0, 1]`; 0 is risk-averse.
    pub risk_tolerance: f64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            default_algorithm: Algorithm::Dijkstra,
            default_strategy: Strategy::MaximumExpectedUtility,
            default_learning_style: LearningStyle::Balanced,
            max_alternatives: 3,
            alternative_cost_ratio: 2.0,
            path_length_factor: -0.5,
            high_difficulty_threshold: 7,
            risk_tolerance: 0.5,
        }
    }
}

impl AdvisorConfig {
    /// Defaults, then `file` if given, then the process environment.
    pub fn load(file: Option<&FsPath>) -> Result<Self> {
        let mut config = match file {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                Self::parse_toml(&text, &path.display().to_string())?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        debug!(?config, "advisor config resolved");
        Ok(config)
    }

    /// Parse and validate a TOML document. Missing keys keep their defaults.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config = Self::parse_toml(text, "<inline>")?;
        config.validate()?;
        Ok(config)
    }

    fn parse_toml(text: &str, origin: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::ConfigParse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Override fields from `lookup(ENV_*)`. Takes the lookup as a function so
    /// callers can supply something other than the process environment.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(v) = lookup(ENV_DEFAULT_ALGORITHM) {
            self.default_algorithm = v.parse()?;
        }
        if let Some(v) = lookup(ENV_DEFAULT_STRATEGY) {
            self.default_strategy = v.parse()?;
        }
        if let Some(v) = lookup(ENV_DEFAULT_LEARNING_STYLE) {
            self.default_learning_style = v.parse()?;
        }
        if let Some(v) = lookup(ENV_MAX_ALTERNATIVES) {
            self.max_alternatives = v.trim().parse().map_err(|_| {
                Error::Configuration(format!("{ENV_MAX_ALTERNATIVES} must be a positive integer, got '{v}'"))
            })?;
        }
        if let Some(v) = lookup(ENV_RISK_TOLERANCE) {
            self.risk_tolerance = v.trim().parse().map_err(|_| {
                Error::Configuration(format!("{ENV_RISK_TOLERANCE} must be a number, got '{v}'"))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_alternatives == 0 {
            return Err(Error::Configuration("max_alternatives must be at least 1".into()));
        }
        if !self.alternative_cost_ratio.is_finite() || self.alternative_cost_ratio < 1.0 {
            return Err(Error::Configuration(format!(
                "alternative_cost_ratio must be >= 1, got {}",
                self.alternative_cost_ratio
            )));
        }
        if !self.path_length_factor.is_finite() {
            return Err(Error::Configuration("path_length_factor must be finite".into()));
        }
        if self.high_difficulty_threshold > MAX_DIFFICULTY {
            return Err(Error::Configuration(format!(
                "high_difficulty_threshold must be <= {MAX_DIFFICULTY}, got {}",
                self.high_difficulty_threshold
            )));
        }
        check_risk_tolerance(self.risk_tolerance)
    }
}

pub(crate) fn check_risk_tolerance(risk_tolerance: f64) -> Result<()> {
    if (0.0..=1.0).contains(&risk_tolerance) {
        Ok(())
    } else {
        Err(Error::Configuration(format!("risk_tolerance must be in [0, 1], got {risk_tolerance}")))
    }
}
