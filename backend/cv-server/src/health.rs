use crate::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /api/health - Liveness of this service; never touches upstream
pub async fn health_check() -> Response {
    let health = json!({
        "success": true,
        "message": "CareVoiceOS Demo API is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    });

    (StatusCode::OK, Json(health)).into_response()
}

/// GET /api/health/carevoice - Can we obtain a server token right now?
pub async fn carevoice_health_check(State(state): State<AppState>) -> Response {
    match state.authenticator.probe().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "CareVoiceOS API is accessible",
                "timestamp": chrono::Utc::now().to_rfc3339(),
            })),
        )
            .into_response(),
        Err(failure) => {
            log::warn!("CareVoice health probe failed: {}", failure);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "message": "CareVoiceOS API is not accessible",
                    "error": failure.payload,
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                })),
            )
                .into_response()
        }
    }
}
