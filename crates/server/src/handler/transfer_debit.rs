use crate::middleware::{jwt, validate::SimpleValidatedJson};
use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use serde_json::{Value, json};
use shared::{
    domain::{
        context::RequestContext,
        request::{CreateTransferDebitRequest, FindAllTransferDebitRequest},
        response::{
            ApiResponse, ApiResponsePagination, LedgerWriteResponse,
            transfer_debit::TransferDebitResponse,
        },
    },
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/transfer-debit",
    tag = "Transfer Debit",
    security(("bearer_auth" = [])),
    params(FindAllTransferDebitRequest),
    responses(
        (status = 200, description = "Debit transfers", body = ApiResponsePagination<Vec<TransferDebitResponse>>),
    )
)]
pub async fn get_transfer_debits(
    State(data): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<FindAllTransferDebitRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data
        .di_container
        .transfer_debit_service
        .get_transfer_debits(&ctx, &params)
        .await
    {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

#[utoipa::path(
    post,
    path = "/api/transfer-debit",
    tag = "Transfer Debit",
    security(("bearer_auth" = [])),
    request_body = CreateTransferDebitRequest,
    responses(
        (status = 201, description = "Debit transfer recorded", body = ApiResponse<LedgerWriteResponse<TransferDebitResponse>>),
    )
)]
pub async fn create_transfer_debit(
    State(data): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateTransferDebitRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data
        .di_container
        .transfer_debit_service
        .create_transfer_debit(&ctx, &body)
        .await
    {
        Ok(response) => Ok((StatusCode::CREATED, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

pub fn transfer_debit_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route(
            "/api/transfer-debit",
            get(get_transfer_debits).post(create_transfer_debit),
        )
        .route_layer(middleware::from_fn_with_state(app_state.clone(), jwt::auth))
        .with_state(app_state)
}
