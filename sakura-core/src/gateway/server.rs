//! HTTP gateway server built on axum.

use super::GatewayConfig;
use super::messages::{EnergyRequest, HealthResponse, MoodRequest, parse_json_request};
use crate::error::ApiError;
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::HeaderMap,
    routing::{get, post},
};
use sakura_ml::{EnergyPredictor, FeatureRecord, MoodAssessment, PredictionResult, assess_mood};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Predictor shared read-only by every handler.
pub type SharedPredictor = Arc<EnergyPredictor>;

/// Routes served by the gateway, as `(method, path, description)`.
pub const ROUTES: [(&str, &str, &str); 3] = [
    ("GET", "/health", "Health check"),
    ("POST", "/predict_energy", "Predict energy score"),
    ("POST", "/predict_mood", "Predict mood based on cycle"),
];

/// Build the axum Router with `/health`, `/predict_energy`, and `/predict_mood`.
pub fn router(predictor: SharedPredictor, config: &GatewayConfig) -> Router {
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/predict_energy", post(predict_energy_handler))
        .route("/predict_mood", post(predict_mood_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(predictor);

    if config.cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Health check endpoint.
async fn health_handler(State(predictor): State<SharedPredictor>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: predictor.is_loaded(),
    })
}

async fn predict_energy_handler(
    State(predictor): State<SharedPredictor>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<PredictionResult>, ApiError> {
    let request: EnergyRequest = parse_json_request(&headers, &body)?;
    let features = FeatureRecord::from(request);
    let result = predictor.assess(features)?;
    tracing::debug!(
        energy_score = result.energy_score,
        category = %result.category,
        model_loaded = predictor.is_loaded(),
        "Energy predicted"
    );
    Ok(Json(result))
}

async fn predict_mood_handler(
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<MoodAssessment>, ApiError> {
    let request: MoodRequest = parse_json_request(&headers, &body)?;
    let assessment = assess_mood(request.cycle_phase, request.symptoms.len());
    tracing::debug!(
        cycle_phase = request.cycle_phase,
        symptom_count = assessment.symptom_count,
        menopause = request.menopause,
        mood = ?assessment.mood,
        "Mood assessed"
    );
    Ok(Json(assessment))
}

/// Start the gateway on the configured address.
///
/// Runs until the listener fails or the task is cancelled.
pub async fn run(config: GatewayConfig, predictor: SharedPredictor) -> Result<(), std::io::Error> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        addr = %listener.local_addr()?,
        model_loaded = predictor.is_loaded(),
        cors = config.cors,
        "Gateway listening"
    );
    for (method, path, description) in ROUTES {
        tracing::info!("  {method:<4} {path} - {description}");
    }

    let app = router(predictor, &config);
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use tower::ServiceExt;

    fn make_app(predictor: EnergyPredictor) -> Router {
        router(Arc::new(predictor), &GatewayConfig::default())
    }

    async fn post_json(app: Router, uri: &str, body: &str) -> (u16, serde_json::Value) {
        let req = axum::http::Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let resp = ServiceExt::<axum::http::Request<Body>>::oneshot(app, req)
            .await
            .unwrap();
        let status = resp.status().as_u16();
        let bytes = axum::body::to_bytes(resp.into_body(), 100_000)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_router_builds() {
        let _app = make_app(EnergyPredictor::fallback());
        let config = GatewayConfig {
            cors: false,
            ..GatewayConfig::default()
        };
        let _app = router(Arc::new(EnergyPredictor::fallback()), &config);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = make_app(EnergyPredictor::fallback());
        let req = axum::http::Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let resp = ServiceExt::<axum::http::Request<Body>>::oneshot(app, req)
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body = axum::body::to_bytes(resp.into_body(), 10_000)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["model_loaded"], false);
    }

    #[tokio::test]
    async fn test_energy_fallback() {
        let (status, json) =
            post_json(make_app(EnergyPredictor::fallback()), "/predict_energy", "{}").await;
        assert_eq!(status, 200);
        assert_eq!(json["energy_score"], 5.0);
        assert_eq!(json["category"], "medium");
        assert_eq!(
            json["advice"],
            "Moderate energy. Good for routine work and light activities."
        );
    }

    #[tokio::test]
    async fn test_energy_bad_json() {
        let (status, json) = post_json(
            make_app(EnergyPredictor::fallback()),
            "/predict_energy",
            "{not json",
        )
        .await;
        assert_eq!(status, 400);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_mood_endpoint() {
        let (status, json) = post_json(
            make_app(EnergyPredictor::fallback()),
            "/predict_mood",
            r#"{"cycle_phase": 1, "symptoms": []}"#,
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(json["mood"], "high");
        assert_eq!(json["emoji"], "✨");
        assert_eq!(json["cycle_phase"], 1);
        assert_eq!(json["symptom_count"], 0);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = make_app(EnergyPredictor::fallback());
        let req = axum::http::Request::builder()
            .uri("/predict_sleep")
            .body(Body::empty())
            .unwrap();
        let resp = ServiceExt::<axum::http::Request<Body>>::oneshot(app, req)
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);
    }
}
