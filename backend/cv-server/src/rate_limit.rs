//! Per-client request quota for the `/api` routes

use crate::{ApiResult, AppState};

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};

const FORWARDED_FOR: &str = "x-forwarded-for";
const SHARED_CLIENT_KEY: &str = "unknown";

/// Middleware rejecting requests over quota with 429
pub async fn limit_by_client(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let key = client_key(&request, state.trust_forwarded_for);
    state.rate_limiter.check(&key)?;

    Ok(next.run(request).await)
}

/// Peer address, else one shared key.
///
/// With `trust_forwarded_for`, the first `X-Forwarded-For` entry wins over
/// the peer address. Clients control that header, so it is only honored
/// when a proxy in front rewrites it.
pub fn client_key(request: &Request, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for
        && let Some(ip) = forwarded_for(request)
    {
        return ip.to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| SHARED_CLIENT_KEY.to_string())
}

fn forwarded_for(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
}
