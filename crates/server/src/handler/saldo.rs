use crate::middleware::jwt;
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Value, json};
use shared::{
    domain::{
        context::RequestContext,
        request::ScopeQuery,
        response::{
            ApiResponse,
            saldo::{SaldoResponse, TotalSaldoResponse, UserSaldoResponse},
        },
    },
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/saldo",
    tag = "Saldo",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Balance of every user", body = ApiResponse<Vec<UserSaldoResponse>>),
        (status = 403, description = "Owner only"),
    )
)]
pub async fn get_saldos(
    State(data): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data.di_container.saldo_service.get_saldos(&ctx).await {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

#[utoipa::path(
    get,
    path = "/api/saldo/total",
    tag = "Saldo",
    security(("bearer_auth" = [])),
    params(ScopeQuery),
    responses(
        (status = 200, description = "Total balance of the scope", body = ApiResponse<TotalSaldoResponse>),
    )
)]
pub async fn get_total(
    State(data): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<ScopeQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data.di_container.saldo_service.get_total(&ctx, &params).await {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

#[utoipa::path(
    get,
    path = "/api/saldo/users/{id}",
    tag = "Saldo",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Balance of one user", body = ApiResponse<SaldoResponse>),
        (status = 403, description = "Kasir asking for another user"),
        (status = 404, description = "User not found"),
    )
)]
pub async fn get_saldo_user(
    State(data): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data.di_container.saldo_service.get_saldo_user(&ctx, id).await {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

#[utoipa::path(
    post,
    path = "/api/saldo/users/{id}/recompute",
    tag = "Saldo",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Balance rebuilt from the ledger", body = ApiResponse<SaldoResponse>),
        (status = 403, description = "Owner only"),
    )
)]
pub async fn recompute_saldo(
    State(data): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data.di_container.saldo_service.recompute(&ctx, id).await {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

pub fn saldo_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/saldo", get(get_saldos))
        .route("/api/saldo/total", get(get_total))
        .route("/api/saldo/users/{id}", get(get_saldo_user))
        .route("/api/saldo/users/{id}/recompute", post(recompute_saldo))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), jwt::auth))
        .with_state(app_state)
}
