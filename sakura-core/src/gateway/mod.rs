//! # HTTP Gateway
//!
//! JSON endpoints for energy prediction and mood estimation, served with
//! axum. The predictor is loaded once at startup and shared read-only by
//! every request.

mod messages;
mod server;

pub use messages::{EnergyRequest, HealthResponse, MoodRequest, parse_body, parse_json_request};
pub use server::{ROUTES, SharedPredictor, router as gateway_router, run as run_gateway};

use serde::{Deserialize, Serialize};

/// Configuration for the HTTP gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to answer cross-origin requests from any origin.
    pub cors: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            cors: true,
        }
    }
}
