use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::{
    domain::{
        context::RequestContext,
        request::{ChartPeriod, ChartQuery, DateRange, DateRangeQuery},
        response::{
            ApiResponse, ErrorResponse,
            report::{
                ChartPoint, ChartResponse, DashboardResponse, DebitChartPoint,
                ReportSummaryResponse, TransferChartPoint,
            },
        },
        scope::Scope,
    },
    model::report::{ActivityBucket, DebitBucket, ModalTypeTotal, ReportTotals, TransferBucket},
    utils::AppError,
};

pub type DynReportRepository = Arc<dyn ReportRepositoryTrait + Send + Sync>;
pub type DynReportService = Arc<dyn ReportServiceTrait + Send + Sync>;

#[async_trait]
pub trait ReportRepositoryTrait {
    async fn totals(&self, scope: Scope, range: DateRange) -> Result<ReportTotals, AppError>;
    /// Transaction counts across transfer, transfer_debit and tarik_tunai.
    async fn activity_buckets(
        &self,
        scope: Scope,
        period: ChartPeriod,
        since: NaiveDate,
    ) -> Result<Vec<ActivityBucket>, AppError>;
    async fn transfer_buckets(
        &self,
        scope: Scope,
        period: ChartPeriod,
        since: NaiveDate,
    ) -> Result<Vec<TransferBucket>, AppError>;
    async fn debit_buckets(
        &self,
        scope: Scope,
        period: ChartPeriod,
        since: NaiveDate,
    ) -> Result<Vec<DebitBucket>, AppError>;
    async fn modal_by_type(&self) -> Result<Vec<ModalTypeTotal>, AppError>;
}

#[async_trait]
pub trait ReportServiceTrait {
    async fn get_summary(
        &self,
        ctx: &RequestContext,
        query: &DateRangeQuery,
    ) -> Result<ApiResponse<ReportSummaryResponse>, ErrorResponse>;
    async fn get_dashboard(
        &self,
        ctx: &RequestContext,
    ) -> Result<ApiResponse<DashboardResponse>, ErrorResponse>;
    async fn get_chart(
        &self,
        ctx: &RequestContext,
        period: ChartPeriod,
        query: &ChartQuery,
    ) -> Result<ApiResponse<ChartResponse<ChartPoint>>, ErrorResponse>;
    async fn get_transfer_chart(
        &self,
        ctx: &RequestContext,
        period: ChartPeriod,
        query: &ChartQuery,
    ) -> Result<ApiResponse<ChartResponse<TransferChartPoint>>, ErrorResponse>;
    async fn get_transfer_debit_chart(
        &self,
        ctx: &RequestContext,
        period: ChartPeriod,
        query: &ChartQuery,
    ) -> Result<ApiResponse<ChartResponse<DebitChartPoint>>, ErrorResponse>;
}
