//! Rule-based mood estimate from cycle phase and symptom load.
//!
//! Independent of the trained energy model.

use crate::features::CyclePhase;
use serde::{Deserialize, Serialize};

/// Symptom count at which a `high` mood is tempered to `neutral`.
pub const SYMPTOM_DEMOTION_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Low,
    Neutral,
    High,
}

impl Mood {
    /// Baseline mood for a cycle phase ordinal; unknown phases are neutral.
    pub fn for_phase(cycle_phase: i64) -> Self {
        match CyclePhase::from_index(cycle_phase) {
            Some(CyclePhase::Menstrual) | Some(CyclePhase::Luteal) => Self::Low,
            Some(CyclePhase::Follicular) | Some(CyclePhase::Ovulation) => Self::High,
            None => Self::Neutral,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Low => "🌙",
            Self::Neutral => "☁️",
            Self::High => "✨",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Low => "Time for gentle self-care and rest",
            Self::Neutral => "Steady and balanced energy",
            Self::High => "Feeling great! Channel your energy productively",
        }
    }
}

/// Response body of a mood estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodAssessment {
    pub mood: Mood,
    pub emoji: String,
    pub message: String,
    pub cycle_phase: i64,
    pub symptom_count: usize,
}

/// Estimate mood from the phase ordinal and the number of reported symptoms.
///
/// Three or more symptoms temper `high` to `neutral`. Heavier symptom loads
/// are not treated differently; `low` and `neutral` are never changed.
pub fn assess_mood(cycle_phase: i64, symptom_count: usize) -> MoodAssessment {
    let mut mood = Mood::for_phase(cycle_phase);
    if symptom_count >= SYMPTOM_DEMOTION_THRESHOLD && mood == Mood::High {
        mood = Mood::Neutral;
    }

    MoodAssessment {
        mood,
        emoji: mood.emoji().to_string(),
        message: mood.message().to_string(),
        cycle_phase,
        symptom_count,
    }
}
