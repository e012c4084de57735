//! Request and response bodies for the gateway endpoints.

use crate::error::ApiError;
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use sakura_ml::FeatureRecord;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Body of `POST /predict_energy`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnergyRequest {
    pub age: f64,
    #[serde(alias = "menopause_flag")]
    pub menopause: i64,
    pub cycle_phase: i64,
    pub sleep_hours: f64,
    pub mood: i64,
    pub stress: i64,
    pub symptoms: u32,
    pub activity: i64,
}

impl Default for EnergyRequest {
    fn default() -> Self {
        FeatureRecord::default().into()
    }
}

impl From<FeatureRecord> for EnergyRequest {
    fn from(f: FeatureRecord) -> Self {
        Self {
            age: f.age,
            menopause: f.menopause_flag,
            cycle_phase: f.cycle_phase,
            sleep_hours: f.sleep_hours,
            mood: f.mood,
            stress: f.stress,
            symptoms: f.symptoms,
            activity: f.activity,
        }
    }
}

impl From<EnergyRequest> for FeatureRecord {
    fn from(r: EnergyRequest) -> Self {
        Self {
            age: r.age,
            menopause_flag: r.menopause,
            cycle_phase: r.cycle_phase,
            sleep_hours: r.sleep_hours,
            mood: r.mood,
            stress: r.stress,
            symptoms: r.symptoms,
            activity: r.activity,
        }
    }
}

/// Body of `POST /predict_mood`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MoodRequest {
    pub cycle_phase: i64,
    /// Only the length is used; entries may be any JSON value.
    pub symptoms: Vec<serde_json::Value>,
    /// Sent by clients alongside the phase; the mood rules do not use it.
    pub menopause: i64,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
}

/// Decode a JSON body, treating an empty body as `{}`.
pub fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    Ok(serde_json::from_slice(body)?)
}

/// Decode a request body sent with a JSON content type.
///
/// A non-empty body must be labelled `application/json` (or a `+json` type);
/// anything else is a client error. An empty body still means `{}`.
pub fn parse_json_request<T: DeserializeOwned + Default>(
    headers: &HeaderMap,
    body: &[u8],
) -> Result<T, ApiError> {
    if !body.iter().all(u8::is_ascii_whitespace) && !is_json_content_type(headers) {
        return Err(ApiError::BadRequest(
            "Request body must be JSON (Content-Type: application/json)".to_string(),
        ));
    }
    parse_body(body)
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = value.split(';').next().unwrap_or_default().trim();
    mime.eq_ignore_ascii_case("application/json")
        || mime.to_ascii_lowercase().ends_with("+json")
}
