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
        request::{CreateTarikKreditRequest, DateRangeQuery},
        response::{ApiResponse, tarik_kredit::TarikKreditResponse},
    },
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/tarik-kredit",
    tag = "Tarik Kredit",
    security(("bearer_auth" = [])),
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Credit-card cash advances", body = ApiResponse<Vec<TarikKreditResponse>>),
    )
)]
pub async fn get_tarik_kredit(
    State(data): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data
        .di_container
        .tarik_kredit_service
        .get_tarik_kredit(&ctx, &params)
        .await
    {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

#[utoipa::path(
    post,
    path = "/api/tarik-kredit",
    tag = "Tarik Kredit",
    security(("bearer_auth" = [])),
    request_body = CreateTarikKreditRequest,
    responses(
        (status = 201, description = "Cash advance recorded with a 3% admin fee", body = ApiResponse<TarikKreditResponse>),
    )
)]
pub async fn create_tarik_kredit(
    State(data): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateTarikKreditRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data
        .di_container
        .tarik_kredit_service
        .create_tarik_kredit(&ctx, &body)
        .await
    {
        Ok(response) => Ok((StatusCode::CREATED, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

pub fn tarik_kredit_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route(
            "/api/tarik-kredit",
            get(get_tarik_kredit).post(create_tarik_kredit),
        )
        .route_layer(middleware::from_fn_with_state(app_state.clone(), jwt::auth))
        .with_state(app_state)
}
