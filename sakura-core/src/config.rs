//! Configuration system for Sakura.
//!
//! Uses `figment` for layered configuration: defaults -> config file -> environment -> CLI args.
//! Configuration is loaded from `~/.config/sakura/config.toml` and/or `.sakura/config.toml`
//! in the workspace directory.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use sakura_ml::TrainingConfig;
use sakura_ml::data::DEFAULT_SAMPLE_COUNT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::gateway::GatewayConfig;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SakuraConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub training: TrainingConfig,
}

/// Where the trained model artifact lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("energy_prediction_model.json"),
        }
    }
}

/// Synthetic dataset settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// CSV written by `generate` and read by `train`.
    pub dataset_path: PathBuf,
    /// Rows produced by `generate`.
    pub samples: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("synthetic_energy_dataset.csv"),
            samples: DEFAULT_SAMPLE_COUNT,
        }
    }
}

fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "sakura", "sakura")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn workspace_config_path(workspace: &Path) -> PathBuf {
    workspace.join(".sakura").join("config.toml")
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Explicit overrides (passed as argument)
/// 2. Environment variables (prefixed with `SAKURA_`)
/// 3. An explicit config file (`--config`)
/// 4. Workspace-local config (`.sakura/config.toml`)
/// 5. User config (`~/.config/sakura/config.toml`)
/// 6. Built-in defaults
pub fn load_config(
    workspace: Option<&Path>,
    config_file: Option<&Path>,
    overrides: Option<&SakuraConfig>,
) -> Result<SakuraConfig, Box<figment::Error>> {
    let mut figment = Figment::from(Serialized::defaults(SakuraConfig::default()));

    // User-level config
    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    // Workspace-level config
    if let Some(ws) = workspace {
        let ws_config = workspace_config_path(ws);
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    // Explicit file; a missing one is an error rather than silently skipped
    if let Some(file) = config_file {
        figment = figment.merge(Toml::file_exact(file));
    }

    // Environment variables (SAKURA_GATEWAY__PORT, SAKURA_MODEL__PATH, etc.)
    figment = figment.merge(Env::prefixed("SAKURA_").split("__"));

    // Explicit overrides
    if let Some(overrides) = overrides {
        figment = figment.merge(Serialized::defaults(overrides));
    }

    figment.extract().map_err(Box::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = SakuraConfig::default();
        assert_eq!(config.gateway.port, 5000);
        assert_eq!(
            config.model.path,
            PathBuf::from("energy_prediction_model.json")
        );
        assert_eq!(
            config.data.dataset_path,
            PathBuf::from("synthetic_energy_dataset.csv")
        );
        assert_eq!(config.data.samples, 2000);
        assert_eq!(config.training.seed, 42);
        assert_eq!(config.training.test_fraction, 0.2);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = SakuraConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: SakuraConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_load_config_with_overrides() {
        let mut overrides = SakuraConfig::default();
        overrides.gateway.port = 8088;
        overrides.training.seed = 7;

        let config = load_config(None, None, Some(&overrides)).unwrap();
        assert_eq!(config.gateway.port, 8088);
        assert_eq!(config.training.seed, 7);
    }

    #[test]
    fn test_load_config_from_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let sakura_dir = dir.path().join(".sakura");
        std::fs::create_dir_all(&sakura_dir).unwrap();
        std::fs::write(
            sakura_dir.join("config.toml"),
            r#"
[gateway]
port = 6060
cors = false

[data]
samples = 500
"#,
        )
        .unwrap();

        let config = load_config(Some(dir.path()), None, None).unwrap();
        assert!(!config.gateway.cors);
        assert_eq!(config.data.samples, 500);
        // Unset keys keep their defaults
        assert_eq!(config.gateway.host, "127.0.0.1");
        assert_eq!(config.training.test_fraction, 0.2);
    }

    #[test]
    fn test_explicit_file_beats_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let sakura_dir = dir.path().join(".sakura");
        std::fs::create_dir_all(&sakura_dir).unwrap();
        std::fs::write(sakura_dir.join("config.toml"), "[model]\npath = \"ws.json\"\n").unwrap();
        let explicit = dir.path().join("custom.toml");
        std::fs::write(&explicit, "[model]\npath = \"custom.json\"\n").unwrap();

        let config = load_config(Some(dir.path()), Some(&explicit), None).unwrap();
        assert_eq!(config.model.path, PathBuf::from("custom.json"));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(None, Some(&missing), None).is_err());
    }

    #[test]
    fn test_invalid_value_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bad.toml");
        std::fs::write(&file, "[gateway]\nport = \"high\"\n").unwrap();
        assert!(load_config(None, Some(&file), None).is_err());
    }
}
