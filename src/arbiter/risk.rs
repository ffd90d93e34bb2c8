//! Risk statistics over an action's outcome distribution.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Outcome;

/// Standard deviation / expected utility below this is low risk.
pub const LOW_RISK_RATIO: f64 = 0.5;
/// Standard deviation / expected utility below this is medium risk.
pub const MEDIUM_RISK_RATIO: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    RiskFree,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Classify by `std_dev / expected_utility`. Zero spread is risk-free;
    /// a non-positive expectation with any spread is high risk.
    pub fn classify(std_dev: f64, expected_utility: f64) -> Self {
        if std_dev == 0.0 {
            RiskLevel::RiskFree
        } else if expected_utility > 0.0 && std_dev / expected_utility < LOW_RISK_RATIO {
            RiskLevel::Low
        } else if expected_utility > 0.0 && std_dev / expected_utility < MEDIUM_RISK_RATIO {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskLevel::RiskFree => "risk-free",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        })
    }
}

/// Per-action risk summary produced by `UtilityArbiter::analyze_risk`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub action: String,
    pub expected_utility: f64,
    pub variance: f64,
    pub std_dev: f64,
    /// max utility − min utility
    pub utility_range: f64,
    /// `std_dev / |expected_utility|`, `+∞` when the expectation is zero.
    #[serde(with = "crate::model::unbounded")]
    pub coefficient_of_variation: f64,
    pub risk_level: RiskLevel,
}

impl RiskProfile {
    pub(crate) fn of(action: &str, outcomes: &[Outcome]) -> Self {
        let (expected_utility, variance) = moments(outcomes);
        let std_dev = variance.sqrt();
        let (lo, hi) = utility_bounds(outcomes);
        let coefficient_of_variation = if expected_utility != 0.0 {
            std_dev / expected_utility.abs()
        } else {
            f64::INFINITY
        };

        Self {
            action: action.to_string(),
            expected_utility,
            variance,
            std_dev,
            utility_range: hi - lo,
            coefficient_of_variation,
            risk_level: RiskLevel::classify(std_dev, expected_utility),
        }
    }
}

/// `(E, Σ p·(u − E)²)` using raw utilities. The variance is exactly zero
/// when every outcome has the same utility, even if `E` drifted in rounding.
pub(crate) fn moments(outcomes: &[Outcome]) -> (f64, f64) {
    let mean: f64 = outcomes.iter().map(|o| o.probability * o.utility).sum();
    let (lo, hi) = utility_bounds(outcomes);
    if lo == hi {
        return (mean, 0.0);
    }
    let variance: f64 = outcomes
        .iter()
        .map(|o| o.probability * (o.utility - mean).powi(2))
        .sum();
    (mean, variance)
}

/// `(min, max)` utility over `outcomes`.
fn utility_bounds(outcomes: &[Outcome]) -> (f64, f64) {
    outcomes.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), o| {
        (lo.min(o.utility), hi.max(o.utility))
    })
}
