//! Sakura CLI — generate data, train, predict, and serve the energy model.

mod commands;

use clap::Parser;
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Sakura: energy and mood predictions from cycle and lifestyle signals
#[derive(Parser, Debug)]
#[command(name = "sakura", version, about, long_about = None)]
struct Cli {
    /// Workspace directory
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Generate a synthetic labeled dataset as CSV
    Generate {
        /// Number of rows
        #[arg(short = 'n', long)]
        samples: Option<usize>,
        /// Seed for reproducible output (OS entropy if omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Output CSV path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Train the energy model from a dataset CSV
    Train {
        /// Dataset CSV path
        #[arg(short, long)]
        dataset: Option<PathBuf>,
        /// Where to write the model artifact
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Seed for the train/test shuffle
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Predict the energy score for one set of features
    Predict(commands::PredictArgs),
    /// Serve the HTTP prediction gateway
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand, Debug)]
enum ConfigAction {
    /// Create a default configuration file in the workspace
    Init,
    /// Show the resolved configuration
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Set up tracing: human-readable stderr + JSON file logging
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(filter));

    // JSON file layer, skipped when no writable log directory is available
    let log_dir = directories::ProjectDirs::from("dev", "sakura", "sakura")
        .map(|d| d.data_dir().join("logs"));
    let (json_layer, _guard) = match log_appender(log_dir) {
        Some(appender) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    // Resolve workspace
    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    commands::handle_command(cli.command, &workspace, cli.config.as_deref()).await
}

/// Daily-rolling log file in `log_dir`, or `None` if it cannot be created.
fn log_appender(log_dir: Option<PathBuf>) -> Option<RollingFileAppender> {
    let log_dir = log_dir?;
    std::fs::create_dir_all(&log_dir).ok()?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("sakura.log")
        .build(&log_dir)
        .ok()
}
