//! Synthetic dataset generator.
//!
//! The labeling rule here is the ground truth the regression learns to
//! approximate; there is no external data source.

use super::{LabeledRecord, MAX_ENERGY_LABEL, MIN_ENERGY_LABEL};
use crate::features::{CyclePhase, FeatureRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Rows produced when no explicit count is configured.
pub const DEFAULT_SAMPLE_COUNT: usize = 2000;

/// Produces labeled records from an injected random source.
pub struct DatasetGenerator<R: Rng> {
    rng: R,
}

impl DatasetGenerator<StdRng> {
    /// Generator with a reproducible stream.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> DatasetGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate `n` labeled records.
    pub fn generate(&mut self, n: usize) -> Vec<LabeledRecord> {
        let records: Vec<_> = (0..n).map(|_| self.sample()).collect();
        tracing::debug!(rows = records.len(), "Generated synthetic dataset");
        records
    }

    /// Draw a single labeled record.
    pub fn sample(&mut self) -> LabeledRecord {
        let features = self.sample_features();
        let modifier = age_modifier(features.age, &mut self.rng);
        LabeledRecord {
            features,
            energy_score: label_energy(&features, modifier),
        }
    }

    fn sample_features(&mut self) -> FeatureRecord {
        let rng = &mut self.rng;
        let age: i64 = rng.gen_range(12..=55);
        let menopause_flag = if age >= 45 { rng.gen_range(0..=1) } else { 0 };
        // Cycle phase 0 (menstrual) is not sampled once menopausal.
        let cycle_phase = if menopause_flag == 0 {
            rng.gen_range(0..=3)
        } else {
            rng.gen_range(1..=3)
        };
        let sleep_hours = (rng.gen_range(4.0..=9.0_f64) * 10.0).round() / 10.0;

        FeatureRecord {
            age: age as f64,
            menopause_flag,
            cycle_phase,
            sleep_hours,
            mood: rng.gen_range(1..=5),
            stress: rng.gen_range(1..=5),
            symptoms: rng.gen_range(0..=3),
            activity: rng.gen_range(0..=2),
        }
    }
}

/// Additive energy adjustment for an age bracket.
///
/// Under-18s get a uniform integer jitter in [-5, 5]; that draw is the only
/// randomness in the labeling rule.
pub fn age_modifier<R: Rng>(age: f64, rng: &mut R) -> f64 {
    if age < 18.0 {
        rng.gen_range(-5..=5) as f64
    } else if age <= 35.0 {
        5.0
    } else if age <= 44.0 {
        0.0
    } else {
        -8.0
    }
}

/// Base energy for a cycle phase; unknown phases sit at 60.
pub fn phase_base_energy(cycle_phase: i64) -> f64 {
    match CyclePhase::from_index(cycle_phase) {
        Some(CyclePhase::Menstrual) => 40.0,
        Some(CyclePhase::Follicular) => 65.0,
        Some(CyclePhase::Ovulation) => 80.0,
        Some(CyclePhase::Luteal) => 55.0,
        None => 60.0,
    }
}

/// Compute the synthetic label for `features` given an already-drawn age modifier.
///
/// The raw sum is truncated toward zero and clamped to the label range.
pub fn label_energy(features: &FeatureRecord, age_modifier: f64) -> f64 {
    let menopause_modifier = if features.is_menopausal() { -10.0 } else { 0.0 };

    let energy = phase_base_energy(features.cycle_phase)
        + (features.sleep_hours - 7.0) * 5.0
        + features.mood as f64 * 3.0
        - features.stress as f64 * 4.0
        - features.symptoms as f64 * 5.0
        + features.activity as f64 * 2.0
        + age_modifier
        + menopause_modifier;

    energy.trunc().clamp(MIN_ENERGY_LABEL, MAX_ENERGY_LABEL)
}
