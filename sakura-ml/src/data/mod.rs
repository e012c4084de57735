//! Data engineering — synthetic dataset generation and CSV storage.

pub mod generator;
pub mod source;

pub use generator::{DEFAULT_SAMPLE_COUNT, DatasetGenerator, age_modifier, label_energy};
pub use source::{parse_csv, read_csv, to_csv_string, write_csv};

use crate::features::FeatureRecord;
use serde::{Deserialize, Serialize};

/// Lowest energy label the generator will emit.
pub const MIN_ENERGY_LABEL: f64 = 20.0;
/// Highest energy label the generator will emit.
pub const MAX_ENERGY_LABEL: f64 = 95.0;

/// One row of the training set: the features plus the synthetic label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabeledRecord {
    pub features: FeatureRecord,
    pub energy_score: f64,
}
