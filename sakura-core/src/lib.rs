//! # Sakura Core
//!
//! Layered configuration and the HTTP gateway that serves energy and mood
//! predictions from a [`sakura_ml::EnergyPredictor`].

pub mod config;
pub mod error;
pub mod gateway;

// Re-export commonly used types at the crate root.
pub use config::{DataConfig, ModelConfig, SakuraConfig, load_config};
pub use error::ApiError;
pub use gateway::{GatewayConfig, SharedPredictor, gateway_router, run_gateway};

use anyhow::Context;
use sakura_ml::EnergyPredictor;
use std::sync::Arc;

/// Load the model artifact named in `config` and serve the gateway until it stops.
///
/// A missing artifact starts the gateway in fallback mode; a corrupt one
/// aborts startup.
pub async fn serve(config: &SakuraConfig) -> anyhow::Result<()> {
    let predictor = EnergyPredictor::load(&config.model.path).with_context(|| {
        format!(
            "Failed to load energy model from {}",
            config.model.path.display()
        )
    })?;

    run_gateway(config.gateway.clone(), Arc::new(predictor))
        .await
        .with_context(|| {
            format!(
                "Gateway failed on {}:{}",
                config.gateway.host, config.gateway.port
            )
        })
}
