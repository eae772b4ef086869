use crate::middleware::jwt;
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use serde_json::{Value, json};
use shared::{
    domain::{
        context::RequestContext,
        request::{ChartPeriod, ChartQuery, DateRangeQuery},
        response::{
            ApiResponse, ErrorResponse,
            report::{
                ChartPoint, ChartResponse, DashboardResponse, DebitChartPoint,
                ReportSummaryResponse, TransferChartPoint,
            },
        },
    },
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

fn parse_period(raw: &str) -> Result<ChartPeriod, (StatusCode, Json<Value>)> {
    raw.parse::<ChartPeriod>().map_err(|e| {
        let err = ErrorResponse::from(e);
        (err.status_code(), Json(json!(err)))
    })
}

#[utoipa::path(
    get,
    path = "/api/laporan/summary",
    tag = "Laporan",
    security(("bearer_auth" = [])),
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Category totals and net flow", body = ApiResponse<ReportSummaryResponse>),
    )
)]
pub async fn get_summary(
    State(data): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data.di_container.report_service.get_summary(&ctx, &params).await {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

#[utoipa::path(
    get,
    path = "/api/laporan/dashboard",
    tag = "Laporan",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Owner dashboard", body = ApiResponse<DashboardResponse>),
        (status = 403, description = "Owner only"),
    )
)]
pub async fn get_dashboard(
    State(data): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    match data.di_container.report_service.get_dashboard(&ctx).await {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

#[utoipa::path(
    get,
    path = "/api/laporan/chart/{period}",
    tag = "Laporan",
    security(("bearer_auth" = [])),
    params(
        ("period" = String, Path, description = "harian, mingguan or bulanan"),
        ChartQuery
    ),
    responses(
        (status = 200, description = "Transaction counts per bucket", body = ApiResponse<ChartResponse<ChartPoint>>),
        (status = 400, description = "Unknown period"),
    )
)]
pub async fn get_chart(
    State(data): State<Arc<AppState>>,
    Path(period): Path<String>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<ChartQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    let period = parse_period(&period)?;

    match data
        .di_container
        .report_service
        .get_chart(&ctx, period, &params)
        .await
    {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

#[utoipa::path(
    get,
    path = "/api/laporan/chart/{period}/transfer",
    tag = "Laporan",
    security(("bearer_auth" = [])),
    params(
        ("period" = String, Path, description = "harian, mingguan or bulanan"),
        ChartQuery
    ),
    responses(
        (status = 200, description = "Transfer volume per bucket", body = ApiResponse<ChartResponse<TransferChartPoint>>),
        (status = 400, description = "Unknown period"),
    )
)]
pub async fn get_transfer_chart(
    State(data): State<Arc<AppState>>,
    Path(period): Path<String>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<ChartQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    let period = parse_period(&period)?;

    match data
        .di_container
        .report_service
        .get_transfer_chart(&ctx, period, &params)
        .await
    {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

#[utoipa::path(
    get,
    path = "/api/laporan/chart/{period}/transfer-debit",
    tag = "Laporan",
    security(("bearer_auth" = [])),
    params(
        ("period" = String, Path, description = "harian, mingguan or bulanan"),
        ChartQuery
    ),
    responses(
        (status = 200, description = "Debit transfer fees per bucket", body = ApiResponse<ChartResponse<DebitChartPoint>>),
        (status = 400, description = "Unknown period"),
    )
)]
pub async fn get_transfer_debit_chart(
    State(data): State<Arc<AppState>>,
    Path(period): Path<String>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<ChartQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    let period = parse_period(&period)?;

    match data
        .di_container
        .report_service
        .get_transfer_debit_chart(&ctx, period, &params)
        .await
    {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response)))),
        Err(e) => Err((e.status_code(), Json(json!(e)))),
    }
}

pub fn report_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/laporan/summary", get(get_summary))
        .route("/api/laporan/dashboard", get(get_dashboard))
        .route("/api/laporan/chart/{period}", get(get_chart))
        .route("/api/laporan/chart/{period}/transfer", get(get_transfer_chart))
        .route(
            "/api/laporan/chart/{period}/transfer-debit",
            get(get_transfer_debit_chart),
        )
        .route_layer(middleware::from_fn_with_state(app_state.clone(), jwt::auth))
        .with_state(app_state)
}
