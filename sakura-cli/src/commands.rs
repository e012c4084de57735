//! Subcommand handlers.

use crate::{Commands, ConfigAction};
use anyhow::Context;
use sakura_core::SakuraConfig;
use sakura_ml::data::{DatasetGenerator, write_csv};
use sakura_ml::{
    EnergyPredictor, FeatureRecord, MlError, PredictionResult, Trainer, TrainingReport,
};
use std::path::{Path, PathBuf};

/// Feature flags for `sakura predict`. Omitted flags take the request defaults.
#[derive(clap::Args, Debug, Default)]
pub struct PredictArgs {
    /// Age in years
    #[arg(long)]
    pub age: Option<f64>,
    /// 1 if menopausal, else 0
    #[arg(long)]
    pub menopause: Option<i64>,
    /// Cycle phase: 0 menstrual, 1 follicular, 2 ovulation, 3 luteal
    #[arg(long)]
    pub cycle_phase: Option<i64>,
    /// Hours slept
    #[arg(long)]
    pub sleep_hours: Option<f64>,
    /// Mood rating (1-5)
    #[arg(long)]
    pub mood: Option<i64>,
    /// Stress rating (1-5)
    #[arg(long)]
    pub stress: Option<i64>,
    /// Number of symptoms
    #[arg(long)]
    pub symptoms: Option<u32>,
    /// Activity level (0-2)
    #[arg(long)]
    pub activity: Option<i64>,
    /// Model artifact to use instead of the configured one
    #[arg(long)]
    pub model: Option<PathBuf>,
    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,
}

impl PredictArgs {
    fn features(&self) -> FeatureRecord {
        let d = FeatureRecord::default();
        FeatureRecord {
            age: self.age.unwrap_or(d.age),
            menopause_flag: self.menopause.unwrap_or(d.menopause_flag),
            cycle_phase: self.cycle_phase.unwrap_or(d.cycle_phase),
            sleep_hours: self.sleep_hours.unwrap_or(d.sleep_hours),
            mood: self.mood.unwrap_or(d.mood),
            stress: self.stress.unwrap_or(d.stress),
            symptoms: self.symptoms.unwrap_or(d.symptoms),
            activity: self.activity.unwrap_or(d.activity),
        }
    }
}

pub async fn handle_command(
    command: Commands,
    workspace: &Path,
    config_file: Option<&Path>,
) -> anyhow::Result<()> {
    match command {
        Commands::Generate {
            samples,
            seed,
            output,
        } => {
            let config = load(workspace, config_file)?;
            let (path, rows) = generate_dataset(&config, workspace, samples, seed, output)?;
            println!("Generated {rows} samples -> {}", path.display());
            Ok(())
        }
        Commands::Train {
            dataset,
            output,
            seed,
        } => {
            let config = load(workspace, config_file)?;
            let (path, report) = train_model(&config, workspace, dataset, output, seed)?;
            let m = &report.metrics;
            println!("Model saved -> {}", path.display());
            println!(
                "MAE: {:.3}  RMSE: {:.3}  R²: {:.3}",
                m.mae, m.rmse, m.r_squared
            );
            Ok(())
        }
        Commands::Predict(args) => {
            let config = load(workspace, config_file)?;
            let result = predict(&config, workspace, &args)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Energy score: {}", result.energy_score);
                println!("Category:     {}", result.category);
                println!("Advice:       {}", result.advice);
            }
            Ok(())
        }
        Commands::Serve { host, port } => {
            let mut config = load(workspace, config_file)?;
            if let Some(host) = host {
                config.gateway.host = host;
            }
            if let Some(port) = port {
                config.gateway.port = port;
            }
            config.model.path = resolve(workspace, &config.model.path);
            sakura_core::serve(&config).await
        }
        Commands::Config { action } => handle_config(action, workspace, config_file),
    }
}

fn load(workspace: &Path, config_file: Option<&Path>) -> anyhow::Result<SakuraConfig> {
    sakura_core::load_config(Some(workspace), config_file, None)
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))
}

/// Relative paths are taken from the workspace directory.
fn resolve(workspace: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        workspace.join(path)
    }
}

fn handle_config(
    action: ConfigAction,
    workspace: &Path,
    config_file: Option<&Path>,
) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init => {
            let config_path = init_config(workspace)?;
            println!("Configuration at: {}", config_path.display());
            Ok(())
        }
        ConfigAction::Show => {
            let config = load(workspace, config_file)?;
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

/// Write the default configuration to `.sakura/config.toml` unless one exists.
fn init_config(workspace: &Path) -> anyhow::Result<PathBuf> {
    let config_dir = workspace.join(".sakura");
    std::fs::create_dir_all(&config_dir)?;

    let config_path = config_dir.join("config.toml");
    if config_path.exists() {
        tracing::info!(path = %config_path.display(), "Configuration file already exists");
        return Ok(config_path);
    }

    let toml_str = toml::to_string_pretty(&SakuraConfig::default())?;
    std::fs::write(&config_path, &toml_str)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!(path = %config_path.display(), "Created default configuration");
    Ok(config_path)
}

fn generate_dataset(
    config: &SakuraConfig,
    workspace: &Path,
    samples: Option<usize>,
    seed: Option<u64>,
    output: Option<PathBuf>,
) -> anyhow::Result<(PathBuf, usize)> {
    let samples = samples.unwrap_or(config.data.samples);
    let path = resolve(workspace, &output.unwrap_or_else(|| config.data.dataset_path.clone()));

    let records = match seed {
        Some(seed) => DatasetGenerator::seeded(seed).generate(samples),
        None => DatasetGenerator::from_entropy().generate(samples),
    };
    write_csv(&path, &records)
        .with_context(|| format!("Failed to write dataset to {}", path.display()))?;
    Ok((path, records.len()))
}

fn train_model(
    config: &SakuraConfig,
    workspace: &Path,
    dataset: Option<PathBuf>,
    output: Option<PathBuf>,
    seed: Option<u64>,
) -> anyhow::Result<(PathBuf, TrainingReport)> {
    let dataset = resolve(workspace, &dataset.unwrap_or_else(|| config.data.dataset_path.clone()));
    let output = resolve(workspace, &output.unwrap_or_else(|| config.model.path.clone()));

    let mut training = config.training.clone();
    if let Some(seed) = seed {
        training.seed = seed;
    }

    let report = Trainer::new(training)
        .train_from_csv(&dataset, &output)
        .map_err(|e| match e {
            MlError::NotFound(path) => {
                anyhow::anyhow!("Dataset not found at {path}; run `sakura generate` first")
            }
            other => anyhow::Error::new(other).context("Training failed"),
        })?;
    Ok((output, report))
}

fn predict(
    config: &SakuraConfig,
    workspace: &Path,
    args: &PredictArgs,
) -> anyhow::Result<PredictionResult> {
    let model_path = resolve(
        workspace,
        args.model.as_deref().unwrap_or(config.model.path.as_path()),
    );
    let predictor = EnergyPredictor::load(&model_path)
        .with_context(|| format!("Failed to load energy model from {}", model_path.display()))?;
    Ok(predictor.assess(args.features())?)
}
