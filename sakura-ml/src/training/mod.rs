//! Training infrastructure — train/test split, least squares, metrics, runner.

pub mod metrics;
pub mod regression;
pub mod runner;
pub mod split;

pub use metrics::RegressionMetrics;
pub use regression::{OlsFit, fit_ols};
pub use runner::{Trainer, TrainingConfig, TrainingReport};
pub use split::{TrainTestSplit, train_test_split};
