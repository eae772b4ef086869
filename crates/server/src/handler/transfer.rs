use crate::middleware::{jwt, validate::SimpleValidatedJson};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, patch, put},
};
use serde_json::{Value, json};
use shared::{
    domain::{
        context::RequestContext,
        request::{
            CreateTransferRequest, FindAllTransferRequest, FindFavoritRequest,
            UpdateTransferRequest, UpdateTransferStatusRequest,
        },
        response::{
            ApiResponse, ApiResponsePagination, LedgerWriteResponse,
            transfer::{TransferFavoritResponse, TransferResponse},
        },
    },
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/transfer",
    tag = "Transfer",
    security(("bearer_auth" = [])),
    params(FindAllTransferRequest),
    responses(
        (status = 200, description = "Regular transfers, newest first", body = ApiResponsePagination<Vec<TransferResponse>>),
        (status = 400, description = "Invalid cashier filter"),
    )
)]
pub async fn get_transfers(
    State(data): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<FindAllTransferRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data
        .di_container
        .transfer_service
        .get_transfers(&ctx, &params)
        .await
    {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

#[utoipa::path(
    get,
    path = "/api/transfer/favorit",
    tag = "Transfer",
    security(("bearer_auth" = [])),
    params(FindFavoritRequest),
    responses(
        (status = 200, description = "Latest saved destinations", body = ApiResponse<Vec<TransferFavoritResponse>>),
    )
)]
pub async fn get_favorites(
    State(data): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<FindFavoritRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data
        .di_container
        .transfer_service
        .get_favorites(&ctx, &params)
        .await
    {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

#[utoipa::path(
    post,
    path = "/api/transfer",
    tag = "Transfer",
    security(("bearer_auth" = [])),
    request_body = CreateTransferRequest,
    responses(
        (status = 201, description = "Transfer recorded", body = ApiResponse<LedgerWriteResponse<TransferResponse>>),
        (status = 400, description = "Validation error"),
    )
)]
pub async fn create_transfer(
    State(data): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateTransferRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data
        .di_container
        .transfer_service
        .create_transfer(&ctx, &body)
        .await
    {
        Ok(response) => Ok((StatusCode::CREATED, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

#[utoipa::path(
    put,
    path = "/api/transfer/{id}",
    tag = "Transfer",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Transfer ID")),
    request_body = UpdateTransferRequest,
    responses(
        (status = 200, description = "Transfer updated", body = ApiResponse<LedgerWriteResponse<TransferResponse>>),
        (status = 403, description = "Owner only"),
        (status = 404, description = "Transfer not found"),
    )
)]
pub async fn update_transfer(
    State(data): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Extension(ctx): Extension<RequestContext>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateTransferRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data
        .di_container
        .transfer_service
        .update_transfer(&ctx, id, &body)
        .await
    {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

#[utoipa::path(
    patch,
    path = "/api/transfer/{id}/status",
    tag = "Transfer",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Transfer ID")),
    request_body = UpdateTransferStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<TransferResponse>),
        (status = 403, description = "Owner only"),
        (status = 404, description = "Transfer not found"),
    )
)]
pub async fn update_transfer_status(
    State(data): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Extension(ctx): Extension<RequestContext>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateTransferStatusRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data
        .di_container
        .transfer_service
        .update_status(&ctx, id, &body)
        .await
    {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

pub fn transfer_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/transfer", get(get_transfers).post(create_transfer))
        .route("/api/transfer/favorit", get(get_favorites))
        .route("/api/transfer/{id}", put(update_transfer))
        .route("/api/transfer/{id}/status", patch(update_transfer_status))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), jwt::auth))
        .with_state(app_state)
}
