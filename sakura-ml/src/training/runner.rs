//! Training runner — split, fit, evaluate, persist.

use super::metrics::RegressionMetrics;
use super::regression::fit_ols;
use super::split::train_test_split;
use crate::data::{LabeledRecord, read_csv};
use crate::error::MlError;
use crate::features::{FEATURE_COUNT, FeatureRecord};
use crate::model::{LinearModel, ModelMetadata};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Knobs for a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Seed for the train/test shuffle.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Fraction of rows held out for evaluation.
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            test_fraction: default_test_fraction(),
        }
    }
}

fn default_seed() -> u64 {
    42
}

fn default_test_fraction() -> f64 {
    0.2
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub model: LinearModel,
    pub metrics: RegressionMetrics,
}

/// Fits the energy model on labeled records.
#[derive(Debug, Clone, Default)]
pub struct Trainer {
    config: TrainingConfig,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Split, fit on the training side, and score on the held-out side.
    pub fn fit(&self, records: &[LabeledRecord]) -> Result<TrainingReport, MlError> {
        let split = train_test_split(records.len(), self.config.test_fraction, self.config.seed)?;

        let design: Vec<Vec<f64>> = split
            .train
            .iter()
            .map(|&i| records[i].features.to_vector().to_vec())
            .collect();
        let targets: Vec<f64> = split.train.iter().map(|&i| records[i].energy_score).collect();

        let fit = fit_ols(&design, &targets)?;
        let coefficients: [f64; FEATURE_COUNT] =
            fit.coefficients.as_slice().try_into().map_err(|_| {
                MlError::training(format!(
                    "Expected {FEATURE_COUNT} coefficients, solver returned {}",
                    fit.coefficients.len()
                ))
            })?;

        let mut model = LinearModel::new(
            fit.intercept,
            coefficients,
            ModelMetadata {
                seed: self.config.seed,
                train_rows: split.train.len(),
                test_rows: split.test.len(),
                metrics: RegressionMetrics::default(),
                trained_at: chrono::Utc::now(),
            },
        );

        let test_features: Vec<&FeatureRecord> =
            split.test.iter().map(|&i| &records[i].features).collect();
        let actual: Vec<f64> = split.test.iter().map(|&i| records[i].energy_score).collect();
        let predicted: Vec<f64> = test_features.iter().map(|f| model.predict_raw(f)).collect();
        let metrics = RegressionMetrics::compute(&actual, &predicted);
        model.metadata.metrics = metrics;

        tracing::info!(
            train_rows = split.train.len(),
            test_rows = split.test.len(),
            mae = metrics.mae,
            rmse = metrics.rmse,
            r_squared = metrics.r_squared,
            "Model trained"
        );

        Ok(TrainingReport { model, metrics })
    }

    /// Read a dataset CSV, fit, and save the artifact to `model_path`.
    ///
    /// A missing dataset surfaces as [`MlError::NotFound`]; callers treat it as fatal.
    pub fn train_from_csv(
        &self,
        dataset_path: &Path,
        model_path: &Path,
    ) -> Result<TrainingReport, MlError> {
        let records = read_csv(dataset_path)?;
        let report = self.fit(&records)?;
        report.model.save(model_path)?;
        Ok(report)
    }
}
