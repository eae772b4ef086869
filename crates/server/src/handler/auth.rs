use crate::middleware::{client::ClientInfo, jwt, validate::SimpleValidatedJson};
use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Value, json};
use shared::{
    domain::{
        context::RequestContext,
        request::LoginRequest,
        response::{ApiResponse, auth::LoginResponse, user::UserResponse},
    },
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

pub async fn health_checker_handler() -> impl IntoResponse {
    Json(json!({
        "status": "success",
        "message": "Kasir ledger is up"
    }))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid username or password"),
        (status = 403, description = "Account is inactive")
    ),
    tag = "Auth"
)]
pub async fn login_user_handler(
    State(data): State<Arc<AppState>>,
    ClientInfo(client): ClientInfo,
    SimpleValidatedJson(body): SimpleValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data.di_container.auth_service.login_user(&body, client).await {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Auth",
)]
pub async fn get_me_handler(
    State(data): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data.di_container.auth_service.get_me(ctx.user_id).await {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

pub fn auth_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let public_routes = OpenApiRouter::new()
        .route("/api/auth/login", post(login_user_handler))
        .route("/api/healthchecker", get(health_checker_handler));

    let private_routes = OpenApiRouter::new()
        .route("/api/auth/me", get(get_me_handler))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), jwt::auth));

    public_routes.merge(private_routes).with_state(app_state)
}
