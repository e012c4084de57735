//! The feature contract shared by the generator, the trainer, and the predictor.
//!
//! Every model artifact is trained against [`FEATURE_NAMES`] in exactly this
//! order, and [`FeatureRecord::to_vector`] is the only place that order is
//! turned into numbers.

use serde::{Deserialize, Serialize};

/// Number of model inputs.
pub const FEATURE_COUNT: usize = 8;

/// Canonical feature order, also the first eight CSV columns.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "menopause_flag",
    "cycle_phase",
    "sleep_hours",
    "mood",
    "stress",
    "symptoms",
    "activity",
];

/// Name of the label column in the training CSV.
pub const LABEL_COLUMN: &str = "energy_score";

/// Menstrual cycle phase, encoded 0–3 on the wire and in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
}

impl CyclePhase {
    /// Decode the ordinal used by clients. Anything outside 0–3 is unknown.
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Self::Menstrual),
            1 => Some(Self::Follicular),
            2 => Some(Self::Ovulation),
            3 => Some(Self::Luteal),
            _ => None,
        }
    }
}

/// The eight named inputs consumed by the energy model.
///
/// Values are deliberately unchecked: out-of-range inputs are passed to the
/// regression as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub age: f64,
    pub menopause_flag: i64,
    pub cycle_phase: i64,
    pub sleep_hours: f64,
    /// Self-reported mood, 1 (worst) to 5 (best).
    pub mood: i64,
    /// Self-reported stress, 1 (calm) to 5 (very stressed).
    pub stress: i64,
    /// Number of symptoms reported today.
    pub symptoms: u32,
    /// Activity level, 0 (sedentary) to 2 (active).
    pub activity: i64,
}

impl Default for FeatureRecord {
    /// Defaults applied by the gateway for every field a request omits.
    fn default() -> Self {
        Self {
            age: 25.0,
            menopause_flag: 0,
            cycle_phase: 0,
            sleep_hours: 8.0,
            mood: 2,
            stress: 3,
            symptoms: 1,
            activity: 2,
        }
    }
}

impl FeatureRecord {
    /// Flatten into [`FEATURE_NAMES`] order.
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            self.age,
            self.menopause_flag as f64,
            self.cycle_phase as f64,
            self.sleep_hours,
            self.mood as f64,
            self.stress as f64,
            self.symptoms as f64,
            self.activity as f64,
        ]
    }

    pub fn is_menopausal(&self) -> bool {
        self.menopause_flag == 1
    }
}
