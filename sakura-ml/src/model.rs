//! The persisted energy model artifact.

use crate::error::MlError;
use crate::features::{FEATURE_COUNT, FEATURE_NAMES, FeatureRecord};
use crate::training::RegressionMetrics;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Bumped whenever the artifact layout changes incompatibly.
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// Provenance recorded alongside the coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub seed: u64,
    pub train_rows: usize,
    pub test_rows: usize,
    pub metrics: RegressionMetrics,
    pub trained_at: DateTime<Utc>,
}

/// A linear regression over the canonical feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub format_version: u32,
    pub feature_names: Vec<String>,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    pub metadata: ModelMetadata,
}

impl LinearModel {
    pub fn new(
        intercept: f64,
        coefficients: [f64; FEATURE_COUNT],
        metadata: ModelMetadata,
    ) -> Self {
        Self {
            format_version: MODEL_FORMAT_VERSION,
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            intercept,
            coefficients: coefficients.to_vec(),
            metadata,
        }
    }

    /// Unrounded model output for `record`.
    pub fn predict_raw(&self, record: &FeatureRecord) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(record.to_vector())
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }

    /// Check the artifact against the feature contract this build expects.
    pub fn validate(&self) -> Result<(), MlError> {
        if self.format_version != MODEL_FORMAT_VERSION {
            return Err(MlError::model(format!(
                "Unsupported model format version {} (expected {MODEL_FORMAT_VERSION})",
                self.format_version
            )));
        }
        if self.feature_names.iter().map(String::as_str).ne(FEATURE_NAMES) {
            return Err(MlError::model(format!(
                "Feature mismatch: model trained on [{}], expected [{}]",
                self.feature_names.join(", "),
                FEATURE_NAMES.join(", ")
            )));
        }
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(MlError::model(format!(
                "Expected {FEATURE_COUNT} coefficients, found {}",
                self.coefficients.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(MlError::model("Model contains non-finite parameters"));
        }
        Ok(())
    }

    /// Serialize to pretty JSON at `path`.
    pub fn save(&self, path: &Path) -> Result<(), MlError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), "Model saved");
        Ok(())
    }

    /// Load and validate an artifact. A missing file is [`MlError::NotFound`].
    pub fn load(path: &Path) -> Result<Self, MlError> {
        let content = std::fs::read_to_string(path).map_err(|e| MlError::from_io_at(e, path))?;
        let model: Self = serde_json::from_str(&content)?;
        model.validate()?;
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> LinearModel {
        LinearModel::new(
            10.0,
            [0.0, -10.0, 5.0, 5.0, 3.0, -4.0, -5.0, 2.0],
            ModelMetadata {
                seed: 42,
                train_rows: 8,
                test_rows: 2,
                metrics: RegressionMetrics {
                    mae: 1.0,
                    mse: 1.0,
                    rmse: 1.0,
                    r_squared: 0.9,
                },
                trained_at: Utc::now(),
            },
        )
    }

    #[test]
    fn test_predict_raw() {
        let model = sample_model();
        // 10 + 0 + 0 + 0 + 40 + 6 - 12 - 5 + 4 = 43
        assert_eq!(model.predict_raw(&FeatureRecord::default()), 43.0);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models").join("energy.json");
        let model = sample_model();
        model.save(&path).unwrap();
        assert_eq!(LinearModel::load(&path).unwrap(), model);
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = LinearModel::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, MlError::NotFound(_)));
    }

    #[test]
    fn test_load_garbage_is_serde_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(LinearModel::load(&path), Err(MlError::Serde(_))));
    }

    #[test]
    fn test_validate_rejects_reordered_features() {
        let mut model = sample_model();
        model.feature_names.swap(0, 1);
        let err = model.validate().unwrap_err();
        assert!(err.to_string().contains("Feature mismatch"));
    }

    #[test]
    fn test_validate_rejects_wrong_coefficient_count() {
        let mut model = sample_model();
        model.coefficients.pop();
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_future_version() {
        let mut model = sample_model();
        model.format_version = MODEL_FORMAT_VERSION + 1;
        assert!(model.validate().is_err());
    }
}
