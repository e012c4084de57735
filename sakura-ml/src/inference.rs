//! Energy inference over a loaded (or absent) model artifact.

use crate::energy::{EnergyCategory, PredictionResult};
use crate::error::MlError;
use crate::features::FeatureRecord;
use crate::model::LinearModel;
use std::path::Path;

/// Score returned for every request while no model artifact is available.
pub const FALLBACK_ENERGY_SCORE: f64 = 5.0;

/// Read-only predictor shared by all request handlers.
///
/// Constructed once at startup. Without an artifact it still answers, with
/// [`FALLBACK_ENERGY_SCORE`].
#[derive(Debug, Clone, Default)]
pub struct EnergyPredictor {
    model: Option<LinearModel>,
}

impl EnergyPredictor {
    pub fn new(model: LinearModel) -> Self {
        Self { model: Some(model) }
    }

    /// A predictor with no model; every prediction is the fallback score.
    pub fn fallback() -> Self {
        Self { model: None }
    }

    /// Load the artifact at `path`.
    ///
    /// A missing file degrades to [`EnergyPredictor::fallback`]. Any other
    /// failure (unreadable, malformed, wrong feature contract) is an error.
    pub fn load(path: &Path) -> Result<Self, MlError> {
        match LinearModel::load(path) {
            Ok(model) => {
                tracing::info!(
                    path = %path.display(),
                    trained_at = %model.metadata.trained_at,
                    mae = model.metadata.metrics.mae,
                    "Energy model loaded"
                );
                Ok(Self::new(model))
            }
            Err(MlError::NotFound(_)) => {
                tracing::warn!(
                    path = %path.display(),
                    fallback = FALLBACK_ENERGY_SCORE,
                    "Energy model not found; serving fallback score"
                );
                Ok(Self::fallback())
            }
            Err(e) => Err(e),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Predict the energy score for `record`, rounded to two decimals.
    pub fn predict(&self, record: &FeatureRecord) -> Result<f64, MlError> {
        let Some(model) = &self.model else {
            return Ok(FALLBACK_ENERGY_SCORE);
        };
        let raw = model.predict_raw(record);
        if !raw.is_finite() {
            return Err(MlError::inference(format!(
                "Model produced a non-finite score ({raw}) for the given features"
            )));
        }
        Ok(round2(raw))
    }

    /// Predict and bucket into a category with advice.
    pub fn assess(&self, record: FeatureRecord) -> Result<PredictionResult, MlError> {
        let energy_score = self.predict(&record)?;
        let category = EnergyCategory::from_score(energy_score);
        Ok(PredictionResult {
            energy_score,
            category,
            advice: category.advice().to_string(),
            features_used: record,
        })
    }
}

/// Values too large to scale by 100 have no fractional digits and pass through.
fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}
