//! # sakura-ml — energy model pipeline
//!
//! Synthetic dataset generation, linear regression training, and inference
//! for the Sakura energy score, plus the rule-based mood estimate.
//!
//! Pipeline: [`data::DatasetGenerator`] → CSV → [`training::Trainer`] →
//! [`model::LinearModel`] artifact → [`inference::EnergyPredictor`].

pub mod data;
pub mod energy;
pub mod error;
pub mod features;
pub mod inference;
pub mod model;
pub mod mood;
pub mod training;

// Re-exports
pub use energy::{EnergyCategory, PredictionResult};
pub use error::MlError;
pub use features::{CyclePhase, FEATURE_NAMES, FeatureRecord};
pub use inference::{EnergyPredictor, FALLBACK_ENERGY_SCORE};
pub use model::LinearModel;
pub use mood::{Mood, MoodAssessment, assess_mood};
pub use training::{Trainer, TrainingConfig, TrainingReport};
