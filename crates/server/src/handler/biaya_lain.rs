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
        request::{CreateBiayaLainRequest, ScopeQuery},
        response::{ApiResponse, biaya_lain::BiayaLainResponse},
    },
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/biaya-lain",
    tag = "Biaya Lain",
    security(("bearer_auth" = [])),
    params(ScopeQuery),
    responses(
        (status = 200, description = "Miscellaneous fees", body = ApiResponse<Vec<BiayaLainResponse>>),
    )
)]
pub async fn get_biaya_lain(
    State(data): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<ScopeQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data
        .di_container
        .biaya_lain_service
        .get_biaya_lain(&ctx, &params)
        .await
    {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

#[utoipa::path(
    post,
    path = "/api/biaya-lain",
    tag = "Biaya Lain",
    security(("bearer_auth" = [])),
    request_body = CreateBiayaLainRequest,
    responses(
        (status = 201, description = "Fee recorded", body = ApiResponse<BiayaLainResponse>),
    )
)]
pub async fn create_biaya_lain(
    State(data): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateBiayaLainRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data
        .di_container
        .biaya_lain_service
        .create_biaya_lain(&ctx, &body)
        .await
    {
        Ok(response) => Ok((StatusCode::CREATED, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

pub fn biaya_lain_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/biaya-lain", get(get_biaya_lain).post(create_biaya_lain))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), jwt::auth))
        .with_state(app_state)
}
