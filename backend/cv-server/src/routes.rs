use crate::{
    ApiError, AppState, authenticate_carevoice, health, login, profile, rate_limit, register,
    api::error::ROUTE_NOT_FOUND_MESSAGE,
};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use log::warn;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origins);

    let api = Router::new()
        // Authentication
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/carevoice", post(authenticate_carevoice))
        .route("/auth/profile", get(profile))
        // Health
        .route("/health", get(health::health_check))
        .route("/health/carevoice", get(health::carevoice_health_check))
        // Quota applies to matched routes only
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::limit_by_client,
        ));

    Router::new()
        .nest("/api", api)
        .fallback(route_not_found)
        .with_state(state)
        .layer(cors)
}

async fn route_not_found() -> ApiError {
    ApiError::not_found(ROUTE_NOT_FOUND_MESSAGE)
}

/// CORS for the configured origins, with credentials
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
