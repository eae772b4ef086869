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
        request::{CreateModalRequest, ScopeQuery, UpdateModalRequest},
        response::{ApiResponse, LedgerWriteResponse, modal::ModalResponse},
    },
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/modal",
    tag = "Modal",
    security(("bearer_auth" = [])),
    params(ScopeQuery),
    responses(
        (status = 200, description = "Deposits of the scope", body = ApiResponse<Vec<ModalResponse>>),
    )
)]
pub async fn get_modals(
    State(data): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<ScopeQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data.di_container.modal_service.get_modals(&ctx, &params).await {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

#[utoipa::path(
    get,
    path = "/api/modal/history",
    tag = "Modal",
    security(("bearer_auth" = [])),
    params(ScopeQuery),
    responses(
        (status = 200, description = "Deposit history with cashier names", body = ApiResponse<Vec<ModalResponse>>),
    )
)]
pub async fn get_history(
    State(data): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<ScopeQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data.di_container.modal_service.get_history(&ctx, &params).await {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

#[utoipa::path(
    post,
    path = "/api/modal",
    tag = "Modal",
    security(("bearer_auth" = [])),
    request_body = CreateModalRequest,
    responses(
        (status = 201, description = "Deposit recorded", body = ApiResponse<LedgerWriteResponse<ModalResponse>>),
        (status = 400, description = "Target is not an active kasir"),
    )
)]
pub async fn create_modal(
    State(data): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateModalRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data.di_container.modal_service.create_modal(&ctx, &body).await {
        Ok(response) => Ok((StatusCode::CREATED, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

#[utoipa::path(
    put,
    path = "/api/modal/{id}",
    tag = "Modal",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Modal ID")),
    request_body = UpdateModalRequest,
    responses(
        (status = 200, description = "Deposit corrected", body = ApiResponse<LedgerWriteResponse<ModalResponse>>),
        (status = 403, description = "Not your deposit"),
        (status = 404, description = "Deposit not found"),
    )
)]
pub async fn update_modal(
    State(data): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Extension(ctx): Extension<RequestContext>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateModalRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data
        .di_container
        .modal_service
        .update_modal(&ctx, id, &body)
        .await
    {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

pub fn modal_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/modal", get(get_modals).post(create_modal))
        .route("/api/modal/history", get(get_history))
        .route("/api/modal/{id}", put(update_modal))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), jwt::auth))
        .with_state(app_state)
}
