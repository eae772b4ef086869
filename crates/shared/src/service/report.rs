use async_trait::async_trait;
use chrono::NaiveDate;
use opentelemetry::KeyValue;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::Mutex;

use crate::{
    abstract_trait::{DynReportRepository, DynSaldoRepository, ReportServiceTrait},
    cache::CacheStore,
    domain::{
        balance::BalanceComponents,
        context::RequestContext,
        request::{ChartPeriod, ChartQuery, DateRangeQuery},
        response::{
            ApiResponse, ErrorResponse,
            report::{
                CategoryTotals, ChartPoint, ChartResponse, DashboardResponse, DebitChartPoint,
                ModalTypeTotalResponse, ReportSummaryResponse, TransferChartPoint,
            },
            saldo::UserSaldoResponse,
        },
        scope::Scope,
    },
    model::report::{ActivityBucket, DebitBucket, ReportTotals, TransferBucket},
    utils::{AppError, Method, Metrics, Observer, today},
};

pub(crate) const MODAL_BY_TYPE_CACHE_KEY: &str = "dashboard:modal_by_type";
const MODAL_BY_TYPE_TTL: Duration = Duration::from_secs(5 * 60);

/// Balance-relevant sums of a period. Setor admin rows count toward the
/// transfer component even though the category totals list them apart.
pub(crate) fn period_components(
    totals: &ReportTotals,
    scope: Scope,
) -> Result<BalanceComponents, AppError> {
    let overflow = || AppError::BalanceOverflow(scope.user_id().unwrap_or_default());

    let transfers = totals
        .transfer_nominal
        .checked_add(totals.transfer_biaya)
        .and_then(|sum| sum.checked_add(totals.setor_admin))
        .and_then(|sum| sum.checked_add(totals.setor_admin_biaya))
        .ok_or_else(overflow)?;

    Ok(BalanceComponents {
        deposits: totals.modal,
        transfers,
        debit_fees: totals.debit_biaya,
        withdrawal_amounts: totals.tarik_tunai_nominal,
        withdrawal_fees: totals.tarik_tunai_biaya,
    })
}

/// One point per bucket of the window, zero where nothing happened.
pub(crate) fn activity_points(
    period: ChartPeriod,
    today: NaiveDate,
    rows: Vec<ActivityBucket>,
) -> Vec<ChartPoint> {
    let counts: HashMap<NaiveDate, i64> = rows
        .into_iter()
        .map(|row| (row.bucket, row.count))
        .collect();

    period
        .buckets(today)
        .into_iter()
        .map(|date| ChartPoint {
            label: period.label(date),
            date,
            count: counts.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

pub(crate) fn transfer_points(
    period: ChartPeriod,
    today: NaiveDate,
    rows: Vec<TransferBucket>,
) -> Vec<TransferChartPoint> {
    let by_bucket: HashMap<NaiveDate, TransferBucket> =
        rows.into_iter().map(|row| (row.bucket, row)).collect();

    period
        .buckets(today)
        .into_iter()
        .map(|date| {
            let (count, total_nominal, total_biaya) = by_bucket
                .get(&date)
                .map(|row| (row.count, row.total_nominal, row.total_biaya))
                .unwrap_or((0, 0, 0));

            TransferChartPoint {
                label: period.label(date),
                date,
                count,
                total_nominal,
                total_biaya,
                total: total_nominal.saturating_add(total_biaya),
            }
        })
        .collect()
}

pub(crate) fn debit_points(
    period: ChartPeriod,
    today: NaiveDate,
    rows: Vec<DebitBucket>,
) -> Vec<DebitChartPoint> {
    let by_bucket: HashMap<NaiveDate, (i64, i64)> = rows
        .into_iter()
        .map(|row| (row.bucket, (row.count, row.total_biaya)))
        .collect();

    period
        .buckets(today)
        .into_iter()
        .map(|date| {
            let (count, total_biaya) = by_bucket.get(&date).copied().unwrap_or((0, 0));

            DebitChartPoint {
                label: period.label(date),
                date,
                count,
                total_biaya,
            }
        })
        .collect()
}

#[derive(Clone)]
pub struct ReportService {
    report_repository: DynReportRepository,
    saldo_repository: DynSaldoRepository,
    cache_store: Arc<CacheStore>,
    observer: Observer,
}

impl std::fmt::Debug for ReportService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportService")
            .field("report_repository", &"DynReportRepository")
            .field("saldo_repository", &"DynSaldoRepository")
            .finish()
    }
}

impl ReportService {
    pub fn new(
        report_repository: DynReportRepository,
        saldo_repository: DynSaldoRepository,
        cache_store: Arc<CacheStore>,
        metrics: Arc<Mutex<Metrics>>,
    ) -> Self {
        Self {
            report_repository,
            saldo_repository,
            cache_store,
            observer: Observer::new("report-service", metrics),
        }
    }

    async fn modal_by_type(&self) -> Result<Vec<ModalTypeTotalResponse>, AppError> {
        if let Some(cached) = self
            .cache_store
            .get_from_cache::<Vec<ModalTypeTotalResponse>>(MODAL_BY_TYPE_CACHE_KEY)
            .await
        {
            return Ok(cached);
        }

        let totals: Vec<ModalTypeTotalResponse> = self
            .report_repository
            .modal_by_type()
            .await?
            .into_iter()
            .map(ModalTypeTotalResponse::from)
            .collect();

        self.cache_store
            .set_to_cache(MODAL_BY_TYPE_CACHE_KEY, &totals, MODAL_BY_TYPE_TTL)
            .await;

        Ok(totals)
    }
}

#[async_trait]
impl ReportServiceTrait for ReportService {
    async fn get_summary(
        &self,
        ctx: &RequestContext,
        query: &DateRangeQuery,
    ) -> Result<ApiResponse<ReportSummaryResponse>, ErrorResponse> {
        let method = Method::Get;
        let tracing_ctx = self
            .observer
            .start("GetReportSummary", vec![KeyValue::new("component", "report")]);

        let result = async {
            let scope = ctx.scope(query.cashier_id.as_deref())?;
            let range = query.range();

            let totals = self.report_repository.totals(scope, range).await?;
            let components = period_components(&totals, scope)?;
            let net_flow = components
                .total()
                .map_err(|_| AppError::BalanceOverflow(scope.user_id().unwrap_or_default()))?;
            let total_saldo = self.saldo_repository.total(scope).await?;

            Ok::<_, AppError>(ApiResponse::success(
                "Report summary retrieved successfully",
                ReportSummaryResponse {
                    user_id: scope.user_id(),
                    start_date: range.start,
                    end_date: range.end,
                    totals: CategoryTotals::from(&totals),
                    components,
                    net_flow,
                    total_saldo,
                },
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Report summary retrieved")
            .await
    }

    async fn get_dashboard(
        &self,
        ctx: &RequestContext,
    ) -> Result<ApiResponse<DashboardResponse>, ErrorResponse> {
        let method = Method::Get;
        let tracing_ctx = self
            .observer
            .start("GetDashboard", vec![KeyValue::new("component", "report")]);

        let result = async {
            ctx.ensure_owner()?;

            let users = self
                .saldo_repository
                .find_all_with_user()
                .await?
                .into_iter()
                .map(UserSaldoResponse::from)
                .collect();
            let modal_by_type = self.modal_by_type().await?;
            let total_saldo = self.saldo_repository.total(Scope::All).await?;

            Ok::<_, AppError>(ApiResponse::success(
                "Dashboard retrieved successfully",
                DashboardResponse {
                    users,
                    modal_by_type,
                    total_saldo,
                },
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Dashboard retrieved")
            .await
    }

    async fn get_chart(
        &self,
        ctx: &RequestContext,
        period: ChartPeriod,
        query: &ChartQuery,
    ) -> Result<ApiResponse<ChartResponse<ChartPoint>>, ErrorResponse> {
        let method = Method::Get;
        let tracing_ctx = self.observer.start(
            "GetActivityChart",
            vec![
                KeyValue::new("component", "report"),
                KeyValue::new("chart.period", period.as_str()),
            ],
        );

        let result = async {
            let scope = ctx.scope(query.cashier_id.as_deref())?;
            let today = today();

            let rows = self
                .report_repository
                .activity_buckets(scope, period, period.since(today))
                .await?;

            Ok::<_, AppError>(ApiResponse::success(
                "Chart retrieved successfully",
                ChartResponse {
                    period,
                    points: activity_points(period, today, rows),
                },
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Chart retrieved")
            .await
    }

    async fn get_transfer_chart(
        &self,
        ctx: &RequestContext,
        period: ChartPeriod,
        query: &ChartQuery,
    ) -> Result<ApiResponse<ChartResponse<TransferChartPoint>>, ErrorResponse> {
        let method = Method::Get;
        let tracing_ctx = self.observer.start(
            "GetTransferChart",
            vec![
                KeyValue::new("component", "report"),
                KeyValue::new("chart.period", period.as_str()),
            ],
        );

        let result = async {
            let scope = ctx.scope(query.cashier_id.as_deref())?;
            let today = today();

            let rows = self
                .report_repository
                .transfer_buckets(scope, period, period.since(today))
                .await?;

            Ok::<_, AppError>(ApiResponse::success(
                "Transfer chart retrieved successfully",
                ChartResponse {
                    period,
                    points: transfer_points(period, today, rows),
                },
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Transfer chart retrieved")
            .await
    }

    async fn get_transfer_debit_chart(
        &self,
        ctx: &RequestContext,
        period: ChartPeriod,
        query: &ChartQuery,
    ) -> Result<ApiResponse<ChartResponse<DebitChartPoint>>, ErrorResponse> {
        let method = Method::Get;
        let tracing_ctx = self.observer.start(
            "GetTransferDebitChart",
            vec![
                KeyValue::new("component", "report"),
                KeyValue::new("chart.period", period.as_str()),
            ],
        );

        let result = async {
            let scope = ctx.scope(query.cashier_id.as_deref())?;
            let today = today();

            let rows = self
                .report_repository
                .debit_buckets(scope, period, period.since(today))
                .await?;

            Ok::<_, AppError>(ApiResponse::success(
                "Transfer debit chart retrieved successfully",
                ChartResponse {
                    period,
                    points: debit_points(period, today, rows),
                },
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Transfer debit chart retrieved")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn net_flow_counts_setor_admin_like_a_transfer() {
        let totals = ReportTotals {
            modal: 1_000_000,
            transfer_nominal: 500_000,
            transfer_biaya: 2_500,
            setor_admin: 200_000,
            debit_biaya: 7_500,
            tarik_tunai_nominal: 300_000,
            tarik_tunai_biaya: 5_000,
            tarik_kredit_nominal: 400_000,
            biaya_lain: 10_000,
            ..Default::default()
        };

        let components = period_components(&totals, Scope::User(4)).unwrap();
        assert_eq!(components.transfers, 702_500);
        assert_eq!(components.total().unwrap(), 1_415_000);
    }

    #[test]
    fn empty_days_are_zero_filled() {
        let today = date(2025, 3, 2);
        let points = activity_points(
            ChartPeriod::Harian,
            today,
            vec![ActivityBucket {
                bucket: date(2025, 2, 28),
                count: 3,
            }],
        );

        assert_eq!(points.len(), 7);
        assert_eq!(points.iter().map(|p| p.count).sum::<i64>(), 3);
        assert_eq!(points[4].date, date(2025, 2, 28));
        assert_eq!(points[4].count, 3);
        assert_eq!(points[0].label, "2025-02-24");
    }

    #[test]
    fn transfer_total_adds_fees() {
        let today = date(2025, 6, 12);
        let points = transfer_points(
            ChartPeriod::Bulanan,
            today,
            vec![TransferBucket {
                bucket: date(2025, 6, 1),
                count: 2,
                total_nominal: 150_000,
                total_biaya: 5_000,
            }],
        );

        assert_eq!(points.len(), 6);
        let june = points.last().unwrap();
        assert_eq!(june.label, "2025-06");
        assert_eq!(june.total, 155_000);
        assert_eq!(points[0].total, 0);
    }

    #[test]
    fn debit_weeks_without_fees_read_zero() {
        let today = date(2025, 6, 12);
        let this_week = ChartPeriod::Mingguan.buckets(today).last().copied().unwrap();
        let points = debit_points(
            ChartPeriod::Mingguan,
            today,
            vec![DebitBucket {
                bucket: this_week,
                count: 3,
                total_biaya: 22_500,
            }],
        );

        assert_eq!(points.len(), ChartPeriod::Mingguan.buckets(today).len());
        let latest = points.last().unwrap();
        assert_eq!(latest.date, this_week);
        assert_eq!(latest.count, 3);
        assert_eq!(latest.total_biaya, 22_500);
        assert!(
            points[..points.len() - 1]
                .iter()
                .all(|p| p.count == 0 && p.total_biaya == 0)
        );
    }
}
