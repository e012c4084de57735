//! Energy score buckets and the prediction payload.

use crate::features::FeatureRecord;
use serde::{Deserialize, Serialize};

/// Three-way bucketing of an energy score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyCategory {
    High,
    Medium,
    Low,
}

impl EnergyCategory {
    /// `high` at 7 and above, `medium` from 4, `low` below that (NaN included).
    pub fn from_score(score: f64) -> Self {
        if score >= 7.0 {
            Self::High
        } else if score >= 4.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            Self::High => "Great energy! Perfect for important tasks and social activities.",
            Self::Medium => "Moderate energy. Good for routine work and light activities.",
            Self::Low => "Low energy. Focus on rest and gentle self-care.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for EnergyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response body of an energy prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub energy_score: f64,
    pub category: EnergyCategory,
    pub advice: String,
    pub features_used: FeatureRecord,
}
