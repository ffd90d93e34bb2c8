//! Questionnaire-based learning style assessment.

use serde::{Deserialize, Serialize};

use crate::model::LearningStyle;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePreference {
    Minimum,
    #[default]
    Moderate,
    Maximum,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTolerance {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningGoal {
    CareerAdvancement,
    CareerChange,
    InterestExploration,
    #[default]
    General,
}

/// Learner's answers. Missing fields take the middle option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSurvey {
    pub time_preference: TimePreference,
    pub difficulty_tolerance: DifficultyTolerance,
    pub learning_goal: LearningGoal,
}

/// Per-style points, in tie-break order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Scores {
    fastest: u32,
    easiest: u32,
    challenging: u32,
    balanced: u32,
}

impl StyleSurvey {
    /// Highest score wins; ties go to fastest, then easiest, then
    /// challenging, then balanced.
    pub fn assess(&self) -> LearningStyle {
        let mut s = Scores::default();

        match self.time_preference {
            TimePreference::Minimum => {
                s.fastest += 2;
                s.balanced += 1;
            }
            TimePreference::Maximum => s.easiest += 1,
            TimePreference::Moderate => s.balanced += 1,
        }

        match self.difficulty_tolerance {
            DifficultyTolerance::High => {
                s.challenging += 2;
                s.balanced += 1;
            }
            DifficultyTolerance::Low => {
                s.easiest += 2;
                s.balanced += 1;
            }
            DifficultyTolerance::Medium => s.balanced += 2,
        }

        match self.learning_goal {
            LearningGoal::CareerAdvancement => {
                s.challenging += 1;
                s.balanced += 1;
            }
            LearningGoal::CareerChange => {
                s.balanced += 1;
                s.easiest += 1;
            }
            LearningGoal::InterestExploration => s.balanced += 1,
            LearningGoal::General => {}
        }

        let ranked = [
            (LearningStyle::Fastest, s.fastest),
            (LearningStyle::Easiest, s.easiest),
            (LearningStyle::Challenging, s.challenging),
            (LearningStyle::Balanced, s.balanced),
        ];
        let mut best = ranked[0];
        for candidate in &ranked[1..] {
            if candidate.1 > best.1 {
                best = *candidate;
            }
        }
        best.0
    }
}
