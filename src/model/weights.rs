//! Learning styles and the edge-weight coefficients they map to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Named learning preference controlling how edge weights are composed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStyle {
    /// Prioritize short courses.
    Fastest,
    /// Prioritize low difficulty.
    Easiest,
    #[default]
    Balanced,
    /// Prioritize high-value courses even if harder or longer.
    Challenging,
}

impl LearningStyle {
    pub const ALL: [LearningStyle; 4] = [
        LearningStyle::Fastest,
        LearningStyle::Easiest,
        LearningStyle::Balanced,
        LearningStyle::Challenging,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LearningStyle::Fastest => "fastest",
            LearningStyle::Easiest => "easiest",
            LearningStyle::Balanced => "balanced",
            LearningStyle::Challenging => "challenging",
        }
    }

    /// Default coefficients for this style, before overrides.
    pub fn default_profile(&self) -> WeightProfile {
        match self {
            LearningStyle::Fastest => WeightProfile { time: 0.7, difficulty: 0.2, utility: 0.1, prereq: 0.0 },
            LearningStyle::Easiest => WeightProfile { time: 0.2, difficulty: 0.6, utility: 0.2, prereq: 0.0 },
            LearningStyle::Challenging => WeightProfile { time: 0.2, difficulty: 0.2, utility: 0.5, prereq: 0.1 },
            LearningStyle::Balanced => WeightProfile { time: 0.4, difficulty: 0.3, utility: 0.2, prereq: 0.1 },
        }
    }
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LearningStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fastest" => Ok(LearningStyle::Fastest),
            "easiest" => Ok(LearningStyle::Easiest),
            "balanced" => Ok(LearningStyle::Balanced),
            "challenging" => Ok(LearningStyle::Challenging),
            other => Err(Error::Configuration(format!(
                "Unknown learning style '{other}'. Expected one of: fastest, easiest, balanced, challenging"
            ))),
        }
    }
}

/// Edge-weight coefficients for `{time, difficulty, utility, prereq}`.
///
/// Profiles handed to the builder are normalized to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightProfile {
    pub time: f64,
    pub difficulty: f64,
    pub utility: f64,
    pub prereq: f64,
}

impl WeightProfile {
    /// Style defaults with `overrides` merged key by key, then normalized.
    pub fn resolve(style: LearningStyle, overrides: Option<&WeightOverrides>) -> Result<Self> {
        let base = style.default_profile();
        let merged = match overrides {
            Some(o) => {
                o.validate()?;
                WeightProfile {
                    time: o.time.unwrap_or(base.time),
                    difficulty: o.difficulty.unwrap_or(base.difficulty),
                    utility: o.utility.unwrap_or(base.utility),
                    prereq: o.prereq.unwrap_or(base.prereq),
                }
            }
            None => base,
        };
        Ok(merged.normalized())
    }

    pub fn total(&self) -> f64 {
        self.time + self.difficulty + self.utility + self.prereq
    }

    /// Scale to sum 1. An all-zero profile falls back to pure difficulty.
    pub fn normalized(&self) -> Self {
        let total = self.total();
        if total <= 0.0 {
            return WeightProfile { time: 0.0, difficulty: 1.0, utility: 0.0, prereq: 0.0 };
        }
        WeightProfile {
            time: self.time / total,
            difficulty: self.difficulty / total,
            utility: self.utility / total,
            prereq: self.prereq / total,
        }
    }
}

/// Caller-supplied coefficients. Missing keys keep the style default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightOverrides {
    pub time: Option<f64>,
    pub difficulty: Option<f64>,
    pub utility: Option<f64>,
    pub prereq: Option<f64>,
}

impl WeightOverrides {
    pub fn is_empty(&self) -> bool {
        self.time.is_none() && self.difficulty.is_none() && self.utility.is_none() && self.prereq.is_none()
    }

    fn validate(&self) -> Result<()> {
        let keys = [
            ("time", self.time),
            ("difficulty", self.difficulty),
            ("utility", self.utility),
            ("prereq", self.prereq),
        ];
        for (key, value) in keys {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(Error::Validation(format!(
                        "Weight override '{key}' must be a non-negative number, got {v}"
                    )));
                }
            }
        }
        Ok(())
    }
}
