//! # Utility Arbiter
//!
//! Chooses among discrete actions, each described by a small distribution of
//! `(probability, utility)` outcomes.
//!
//! | Strategy | Score per action | Picks |
//! |----------|------------------|-------|
//! | `MaximumExpectedUtility` | `Σ p·u` (optionally `Σ p·f(u)`) | highest |
//! | `Minimax` | `min u` | highest worst case |
//! | `RiskAdjusted` | `E − sqrt(Σ p·(u − E)²)` | highest |
//!
//! Ties go to the action listed first.

pub mod risk;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::{Error, Result};

pub use risk::{RiskLevel, RiskProfile};

/// Allowed drift of an action's probability sum from 1 before a warning.
pub const PROBABILITY_SUM_TOLERANCE: f64 = 0.01;

// ============================================================================
// Outcomes and actions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// In `[0, 1]`.
    pub probability: f64,
    pub utility: f64,
}

impl Outcome {
    pub fn new(probability: f64, utility: f64) -> Self {
        Self { probability, utility }
    }
}

/// Most actions carry two or three outcomes; keep them inline.
pub type Outcomes = SmallVec<[Outcome; 4]>;

/// A named candidate decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    pub outcomes: Outcomes,
}

impl Action {
    pub fn new(name: impl Into<String>, outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        Self { name: name.into(), outcomes: outcomes.into_iter().collect() }
    }

    /// Convenience for `(probability, utility)` pairs.
    pub fn from_pairs(name: impl Into<String>, pairs: &[(f64, f64)]) -> Self {
        Self::new(name, pairs.iter().map(|&(p, u)| Outcome::new(p, u)))
    }

    pub fn probability_sum(&self) -> f64 {
        self.outcomes.iter().map(|o| o.probability).sum()
    }

    /// Lowest utility among the outcomes.
    pub fn worst_case(&self) -> f64 {
        self.outcomes.iter().map(|o| o.utility).fold(f64::INFINITY, f64::min)
    }
}

// ============================================================================
// Strategy token
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    #[default]
    #[serde(rename = "meu")]
    MaximumExpectedUtility,
    #[serde(rename = "minimax")]
    Minimax,
    /// Expected value penalized by one standard deviation ("EVK").
    #[serde(rename = "evk")]
    RiskAdjusted,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::MaximumExpectedUtility => "meu",
            Strategy::Minimax => "minimax",
            Strategy::RiskAdjusted => "evk",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Strategy::MaximumExpectedUtility => "Maximum Expected Utility",
            Strategy::Minimax => "Minimax",
            Strategy::RiskAdjusted => "Risk-adjusted Expected Value",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "meu" | "maximum_expected_utility" => Ok(Strategy::MaximumExpectedUtility),
            "minimax" => Ok(Strategy::Minimax),
            "evk" | "risk_adjusted" => Ok(Strategy::RiskAdjusted),
            other => Err(Error::Configuration(format!(
                "Unknown decision strategy '{other}'. Expected one of: meu, minimax, evk"
            ))),
        }
    }
}

// ============================================================================
// Decision
// ============================================================================

/// One row of the decision trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionScore {
    pub action: String,
    /// Value under the strategy that was used.
    pub score: f64,
    /// Expected utility, for comparison across strategies.
    pub expected_utility: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub strategy: Strategy,
    pub action: String,
    pub value: f64,
    /// Every action's score, in input order.
    pub scores: Vec<ActionScore>,
}

impl Decision {
    pub fn score_of(&self, action: &str) -> Option<f64> {
        self.scores.iter().find(|s| s.action == action).map(|s| s.score)
    }
}

// ============================================================================
// UtilityArbiter
// ============================================================================

/// Per-outcome utility transform applied under `MaximumExpectedUtility`.
pub type UtilityTransform = Box<dyn Fn(f64) -> f64 + Send + Sync>;

/// Validated action set.
///
/// ```rust
/// use pathwise::{Action, Strategy, UtilityArbiter};
///
/// let arbiter = UtilityArbiter::new(vec![
///     Action::from_pairs("Conservative", &[(0.8, 50.0), (0.2, 30.0)]),
///     Action::from_pairs("Aggressive", &[(0.4, 150.0), (0.4, 10.0), (0.2, -100.0)]),
/// ]).unwrap();
///
/// let decision = arbiter.decide(Strategy::MaximumExpectedUtility);
/// assert_eq!(decision.action, "Conservative");
/// ```
pub struct UtilityArbiter {
    actions: Vec<Action>,
    transform: Option<UtilityTransform>,
}

impl UtilityArbiter {
    /// Fails on an empty action set, duplicate names, an action without
    /// outcomes, or a probability outside `[0, 1]`. A probability sum away
    /// from 1 is only logged.
    pub fn new(actions: Vec<Action>) -> Result<Self> {
        if actions.is_empty() {
            return Err(Error::Validation("No actions to decide between".into()));
        }

        for (i, action) in actions.iter().enumerate() {
            if actions[..i].iter().any(|a| a.name == action.name) {
                return Err(Error::Validation(format!("Duplicate action '{}'", action.name)));
            }
            if action.outcomes.is_empty() {
                return Err(Error::Validation(format!("Action '{}' has no outcomes defined", action.name)));
            }
            for outcome in &action.outcomes {
                if !(0.0..=1.0).contains(&outcome.probability) {
                    return Err(Error::Validation(format!(
                        "Action '{}' has invalid probability: {}",
                        action.name, outcome.probability,
                    )));
                }
                if !outcome.utility.is_finite() {
                    return Err(Error::Validation(format!(
                        "Action '{}' has non-finite utility: {}",
                        action.name, outcome.utility,
                    )));
                }
            }

            let sum = action.probability_sum();
            if sum > 0.0 && (sum - 1.0).abs() >= PROBABILITY_SUM_TOLERANCE {
                warn!(action = %action.name, sum, "outcome probabilities do not sum to 1");
            }
        }

        Ok(Self { actions, transform: None })
    }

    /// Transform each utility before weighting it in the expected value.
    ///
    /// Every outcome is run through `transform` once here; a non-finite
    /// result (e.g. `sqrt` of a loss) is an `Error::Configuration`.
    pub fn with_utility_transform(
        mut self,
        transform: impl Fn(f64) -> f64 + Send + Sync + 'static,
    ) -> Result<Self> {
        for action in &self.actions {
            for outcome in &action.outcomes {
                let transformed = transform(outcome.utility);
                if !transformed.is_finite() {
                    return Err(Error::Configuration(format!(
                        "Utility transform maps {} of action '{}' to {transformed}",
                        outcome.utility, action.name,
                    )));
                }
            }
        }
        self.transform = Some(Box::new(transform));
        Ok(self)
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// `Σ p·u`, or `Σ p·f(u)` with a transform.
    pub fn expected_utility(&self, action: &Action) -> f64 {
        action
            .outcomes
            .iter()
            .map(|o| {
                let u = match &self.transform {
                    Some(f) => f(o.utility),
                    None => o.utility,
                };
                o.probability * u
            })
            .sum()
    }

    /// `E − σ` on raw utilities.
    pub fn risk_adjusted_utility(&self, action: &Action) -> f64 {
        let (mean, variance) = risk::moments(&action.outcomes);
        mean - variance.sqrt()
    }

    /// Score every action under `strategy` and pick the best.
    pub fn decide(&self, strategy: Strategy) -> Decision {
        let scores: Vec<ActionScore> = self
            .actions
            .iter()
            .map(|action| {
                let expected_utility = self.expected_utility(action);
                let score = match strategy {
                    Strategy::MaximumExpectedUtility => expected_utility,
                    Strategy::Minimax => action.worst_case(),
                    Strategy::RiskAdjusted => self.risk_adjusted_utility(action),
                };
                ActionScore { action: action.name.clone(), score, expected_utility }
            })
            .collect();

        // `new` guarantees at least one action.
        let mut best = 0;
        for (i, s) in scores.iter().enumerate().skip(1) {
            if s.score > scores[best].score {
                best = i;
            }
        }

        let decision = Decision {
            strategy,
            action: scores[best].action.clone(),
            value: scores[best].score,
            scores,
        };
        debug!(
            strategy = %strategy,
            action = %decision.action,
            value = decision.value,
            candidates = decision.scores.len(),
            "decision made"
        );
        decision
    }

    /// Risk statistics for every action, in input order.
    pub fn analyze_risk(&self) -> Vec<RiskProfile> {
        self.actions
            .iter()
            .map(|a| RiskProfile::of(&a.name, &a.outcomes))
            .collect()
    }
}

impl fmt::Debug for UtilityArbiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UtilityArbiter")
            .field("actions", &self.actions)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}
