use crate::middleware::jwt;
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
        request::FindAllLogRequest,
        response::{ApiResponsePagination, activity_log::ActivityLogResponse},
    },
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/activity-logs",
    tag = "Activity Log",
    security(("bearer_auth" = [])),
    params(FindAllLogRequest),
    responses(
        (status = 200, description = "Audit trail, newest first", body = ApiResponsePagination<Vec<ActivityLogResponse>>),
        (status = 403, description = "Owner only"),
    )
)]
pub async fn get_activity_logs(
    State(data): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<FindAllLogRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data
        .di_container
        .activity_log_service
        .get_logs(&ctx, &params)
        .await
    {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

pub fn activity_log_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/activity-logs", get(get_activity_logs))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), jwt::auth))
        .with_state(app_state)
}
