use crate::middleware::{jwt, validate::SimpleValidatedJson};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, put},
};
use serde_json::{Value, json};
use shared::{
    domain::{
        context::RequestContext,
        request::{ApproveSetorRequest, CreateSetorRequest, ScopeQuery},
        response::{ApiResponse, LedgerWriteResponse, transfer::TransferResponse},
    },
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/setor-admin",
    tag = "Setor Admin",
    security(("bearer_auth" = [])),
    params(ScopeQuery),
    responses(
        (status = 200, description = "Cash hand-offs, pending first", body = ApiResponse<Vec<TransferResponse>>),
    )
)]
pub async fn get_setors(
    State(data): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<ScopeQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data.di_container.setor_service.get_setors(&ctx, &params).await {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

#[utoipa::path(
    post,
    path = "/api/setor-admin",
    tag = "Setor Admin",
    security(("bearer_auth" = [])),
    request_body = CreateSetorRequest,
    responses(
        (status = 201, description = "Hand-off recorded", body = ApiResponse<LedgerWriteResponse<TransferResponse>>),
    )
)]
pub async fn create_setor(
    State(data): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateSetorRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data.di_container.setor_service.create_setor(&ctx, &body).await {
        Ok(response) => Ok((StatusCode::CREATED, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

#[utoipa::path(
    put,
    path = "/api/setor-admin/{id}/approve",
    tag = "Setor Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Setor admin ID")),
    request_body = ApproveSetorRequest,
    responses(
        (status = 200, description = "Hand-off settled", body = ApiResponse<LedgerWriteResponse<TransferResponse>>),
        (status = 403, description = "Owner only"),
        (status = 404, description = "Setor admin not found"),
    )
)]
pub async fn approve_setor(
    State(data): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Extension(ctx): Extension<RequestContext>,
    SimpleValidatedJson(body): SimpleValidatedJson<ApproveSetorRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data
        .di_container
        .setor_service
        .approve_setor(&ctx, id, &body)
        .await
    {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

pub fn setor_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/setor-admin", get(get_setors).post(create_setor))
        .route("/api/setor-admin/{id}/approve", put(approve_setor))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), jwt::auth))
        .with_state(app_state)
}
