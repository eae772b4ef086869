use axum::{
    Json,
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode, header},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{Value, json};
use shared::{
    domain::{context::RequestContext, response::ErrorResponse},
    state::AppState,
};
use std::{net::SocketAddr, sync::Arc};

use crate::middleware::client::client_meta;

fn bearer_token(req: &Request<Body>) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_header| auth_header.to_str().ok())
        .and_then(|auth_value| auth_value.strip_prefix("Bearer "))
        .map(str::to_owned)
}

/// Resolves the caller and stores a [`RequestContext`] in the request
/// extensions.
pub async fn auth(
    cookie_jar: CookieJar,
    State(data): State<Arc<AppState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    let token = cookie_jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .or_else(|| bearer_token(&req));

    let Some(token) = token else {
        let err = ErrorResponse::new(
            StatusCode::UNAUTHORIZED,
            "You are not logged in, please provide token",
        );
        return Err((err.status_code(), Json(json!(err))));
    };

    let claims = data.jwt_config.verify_token(&token).map_err(|e| {
        let err = ErrorResponse::from(e);
        (err.status_code(), Json(json!(err)))
    })?;

    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = client_meta(req.headers(), peer);

    req.extensions_mut()
        .insert(RequestContext::from_claims(&claims, client));

    Ok(next.run(req).await)
}
