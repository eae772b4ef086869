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
        request::{CreateTarikTunaiRequest, DateRangeQuery},
        response::{ApiResponse, LedgerWriteResponse, tarik_tunai::TarikTunaiResponse},
    },
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/tarik-tunai",
    tag = "Tarik Tunai",
    security(("bearer_auth" = [])),
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Cash withdrawals, newest first", body = ApiResponse<Vec<TarikTunaiResponse>>),
    )
)]
pub async fn get_tarik_tunai(
    State(data): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data
        .di_container
        .tarik_tunai_service
        .get_tarik_tunai(&ctx, &params)
        .await
    {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

#[utoipa::path(
    post,
    path = "/api/tarik-tunai",
    tag = "Tarik Tunai",
    security(("bearer_auth" = [])),
    request_body = CreateTarikTunaiRequest,
    responses(
        (status = 201, description = "Cash withdrawal recorded", body = ApiResponse<LedgerWriteResponse<TarikTunaiResponse>>),
    )
)]
pub async fn create_tarik_tunai(
    State(data): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateTarikTunaiRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data
        .di_container
        .tarik_tunai_service
        .create_tarik_tunai(&ctx, &body)
        .await
    {
        Ok(response) => Ok((StatusCode::CREATED, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

pub fn tarik_tunai_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route(
            "/api/tarik-tunai",
            get(get_tarik_tunai).post(create_tarik_tunai),
        )
        .route_layer(middleware::from_fn_with_state(app_state.clone(), jwt::auth))
        .with_state(app_state)
}
