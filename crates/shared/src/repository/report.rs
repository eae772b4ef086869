use async_trait::async_trait;
use chrono::NaiveDate;
use sea_query::{
    Alias, Asterisk, Condition, Expr, Func, IntoColumnRef, Order, PostgresQueryBuilder, Query,
    SelectStatement, SimpleExpr, UnionType,
};
use sea_query_binder::SqlxBinder;
use sqlx::{FromRow, postgres::PgRow};
use tracing::{error, info};

use crate::{
    abstract_trait::ReportRepositoryTrait,
    config::ConnectionPool,
    domain::{
        request::{ChartPeriod, DateRange},
        scope::Scope,
    },
    model::{
        report::{ActivityBucket, DebitBucket, ModalTypeTotal, ReportTotals, TransferBucket},
        transfer::SETOR_ADMIN_BANK,
    },
    repository::ledger::{scope_condition, sum_bigint},
    schema::{
        biaya_lain::BiayaLain, modal::Modal, tarik_kredit::TarikKredit, tarik_tunai::TarikTunai,
        transfer::Transfer, transfer_debit::TransferDebit,
    },
    utils::AppError,
};

fn count_all() -> SimpleExpr {
    Func::count(Expr::col(Asterisk)).into()
}

fn sum_of<C: IntoColumnRef>(col: C) -> SimpleExpr {
    sum_bigint(Expr::col(col).into())
}

/// `CAST(DATE_TRUNC(unit, col) AS DATE)`
fn bucket_of<C: IntoColumnRef>(period: ChartPeriod, col: C) -> SimpleExpr {
    Func::cast_as(
        Func::cust(Alias::new("DATE_TRUNC"))
            .arg(Expr::val(period.trunc_unit()))
            .arg(Expr::col(col)),
        Alias::new("DATE"),
    )
    .into()
}

/// Regular transfers only, or only setor admin rows.
fn transfer_kind(setor_admin: bool) -> SimpleExpr {
    let bank = Expr::col(Transfer::BankTujuan);
    if setor_admin {
        bank.eq(SETOR_ADMIN_BANK)
    } else {
        bank.ne(SETOR_ADMIN_BANK)
    }
}

fn dated<C, U>(scope: Scope, user_col: U, range: DateRange, date_col: C) -> Condition
where
    C: IntoColumnRef,
    U: IntoColumnRef,
{
    Condition::all()
        .add(scope_condition(scope, user_col))
        .add(range.condition(Expr::col(date_col).into()))
}

fn activity_query(scope: Scope, since: NaiveDate) -> SelectStatement {
    let since_range = DateRange::new(Some(since), None);

    let mut union = Query::select()
        .expr_as(Expr::col(Transfer::Tanggal), Alias::new("tanggal"))
        .from(Transfer::Table)
        .cond_where(dated(scope, Transfer::UserId, since_range, Transfer::Tanggal))
        .and_where(transfer_kind(false))
        .to_owned();

    union
        .union(
            UnionType::All,
            Query::select()
                .expr_as(Expr::col(TransferDebit::Tanggal), Alias::new("tanggal"))
                .from(TransferDebit::Table)
                .cond_where(dated(
                    scope,
                    TransferDebit::UserId,
                    since_range,
                    TransferDebit::Tanggal,
                ))
                .to_owned(),
        )
        .union(
            UnionType::All,
            Query::select()
                .expr_as(Expr::col(TarikTunai::Tanggal), Alias::new("tanggal"))
                .from(TarikTunai::Table)
                .cond_where(dated(
                    scope,
                    TarikTunai::UserId,
                    since_range,
                    TarikTunai::Tanggal,
                ))
                .to_owned(),
        );

    union
}

/// Debit fees and counts per bucket since `since`.
fn debit_bucket_query(scope: Scope, period: ChartPeriod, since: NaiveDate) -> SelectStatement {
    Query::select()
        .expr_as(bucket_of(period, TransferDebit::Tanggal), Alias::new("bucket"))
        .expr_as(count_all(), Alias::new("count"))
        .expr_as(sum_of(TransferDebit::Biaya), Alias::new("total_biaya"))
        .from(TransferDebit::Table)
        .cond_where(dated(
            scope,
            TransferDebit::UserId,
            DateRange::new(Some(since), None),
            TransferDebit::Tanggal,
        ))
        .group_by_col(Alias::new("bucket"))
        .order_by(Alias::new("bucket"), Order::Asc)
        .to_owned()
}

pub struct ReportRepository {
    db_pool: ConnectionPool,
}

impl ReportRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }

    async fn fetch_row<T>(&self, query: &SelectStatement) -> Result<T, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let (sql, values) = query.build_sqlx(PostgresQueryBuilder);

        sqlx::query_as_with::<_, T, _>(&sql, values)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Error aggregating report: {e}");
                AppError::SqlxError(e)
            })
    }
}

#[async_trait]
impl ReportRepositoryTrait for ReportRepository {
    async fn totals(&self, scope: Scope, range: DateRange) -> Result<ReportTotals, AppError> {
        info!("Aggregating report totals for {scope:?}, range: {range:?}");

        // modal tidak punya kolom tanggal, pakai tanggal dibuat
        let modal_date = Func::cust(Alias::new("DATE")).arg(Expr::col(Modal::CreatedAt));
        let (modal,): (i64,) = self
            .fetch_row(
                Query::select()
                    .expr(sum_of(Modal::Nominal))
                    .from(Modal::Table)
                    .cond_where(
                        Condition::all()
                            .add(scope_condition(scope, Modal::UserId))
                            .add(range.condition(modal_date.into())),
                    ),
            )
            .await?;

        let (transfer_nominal, transfer_biaya, transfer_count): (i64, i64, i64) = self
            .fetch_row(
                Query::select()
                    .expr(sum_of(Transfer::Nominal))
                    .expr(sum_of(Transfer::Biaya))
                    .expr(count_all())
                    .from(Transfer::Table)
                    .cond_where(dated(scope, Transfer::UserId, range, Transfer::Tanggal))
                    .and_where(transfer_kind(false)),
            )
            .await?;

        let (setor_admin, setor_admin_biaya): (i64, i64) = self
            .fetch_row(
                Query::select()
                    .expr(sum_of(Transfer::Nominal))
                    .expr(sum_of(Transfer::Biaya))
                    .from(Transfer::Table)
                    .cond_where(dated(scope, Transfer::UserId, range, Transfer::Tanggal))
                    .and_where(transfer_kind(true)),
            )
            .await?;

        let (debit_biaya, debit_count): (i64, i64) = self
            .fetch_row(
                Query::select()
                    .expr(sum_of(TransferDebit::Biaya))
                    .expr(count_all())
                    .from(TransferDebit::Table)
                    .cond_where(dated(
                        scope,
                        TransferDebit::UserId,
                        range,
                        TransferDebit::Tanggal,
                    )),
            )
            .await?;

        let (tarik_tunai_nominal, tarik_tunai_biaya, tarik_tunai_count): (i64, i64, i64) = self
            .fetch_row(
                Query::select()
                    .expr(sum_of(TarikTunai::NominalTarik))
                    .expr(sum_of(TarikTunai::BiayaTarik))
                    .expr(count_all())
                    .from(TarikTunai::Table)
                    .cond_where(dated(scope, TarikTunai::UserId, range, TarikTunai::Tanggal)),
            )
            .await?;

        let (tarik_kredit_nominal, tarik_kredit_admin_fee, tarik_kredit_count): (i64, i64, i64) =
            self.fetch_row(
                Query::select()
                    .expr(sum_of(TarikKredit::Nominal))
                    .expr(sum_of(TarikKredit::AdminFee))
                    .expr(count_all())
                    .from(TarikKredit::Table)
                    .cond_where(dated(
                        scope,
                        TarikKredit::UserId,
                        range,
                        TarikKredit::Tanggal,
                    )),
            )
            .await?;

        let (biaya_lain,): (i64,) = self
            .fetch_row(
                Query::select()
                    .expr(sum_of(BiayaLain::Biaya))
                    .from(BiayaLain::Table)
                    .cond_where(dated(scope, BiayaLain::UserId, range, BiayaLain::Tanggal)),
            )
            .await?;

        Ok(ReportTotals {
            modal,
            transfer_nominal,
            transfer_biaya,
            transfer_count,
            setor_admin,
            setor_admin_biaya,
            debit_biaya,
            debit_count,
            tarik_tunai_nominal,
            tarik_tunai_biaya,
            tarik_tunai_count,
            tarik_kredit_nominal,
            tarik_kredit_admin_fee,
            tarik_kredit_count,
            biaya_lain,
        })
    }

    async fn activity_buckets(
        &self,
        scope: Scope,
        period: ChartPeriod,
        since: NaiveDate,
    ) -> Result<Vec<ActivityBucket>, AppError> {
        info!(
            "Counting activity per {} since {since} for {scope:?}",
            period.trunc_unit()
        );

        let (sql, values) = Query::select()
            .expr_as(bucket_of(period, Alias::new("tanggal")), Alias::new("bucket"))
            .expr_as(count_all(), Alias::new("count"))
            .from_subquery(activity_query(scope, since), Alias::new("activity"))
            .group_by_col(Alias::new("bucket"))
            .order_by(Alias::new("bucket"), Order::Asc)
            .build_sqlx(PostgresQueryBuilder);

        let buckets = sqlx::query_as_with::<_, ActivityBucket, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Error counting activity: {e}");
                AppError::SqlxError(e)
            })?;

        Ok(buckets)
    }

    async fn transfer_buckets(
        &self,
        scope: Scope,
        period: ChartPeriod,
        since: NaiveDate,
    ) -> Result<Vec<TransferBucket>, AppError> {
        let (sql, values) = Query::select()
            .expr_as(bucket_of(period, Transfer::Tanggal), Alias::new("bucket"))
            .expr_as(count_all(), Alias::new("count"))
            .expr_as(sum_of(Transfer::Nominal), Alias::new("total_nominal"))
            .expr_as(sum_of(Transfer::Biaya), Alias::new("total_biaya"))
            .from(Transfer::Table)
            .cond_where(dated(
                scope,
                Transfer::UserId,
                DateRange::new(Some(since), None),
                Transfer::Tanggal,
            ))
            .and_where(transfer_kind(false))
            .group_by_col(Alias::new("bucket"))
            .order_by(Alias::new("bucket"), Order::Asc)
            .build_sqlx(PostgresQueryBuilder);

        let buckets = sqlx::query_as_with::<_, TransferBucket, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Error aggregating transfer chart: {e}");
                AppError::SqlxError(e)
            })?;

        Ok(buckets)
    }

    async fn debit_buckets(
        &self,
        scope: Scope,
        period: ChartPeriod,
        since: NaiveDate,
    ) -> Result<Vec<DebitBucket>, AppError> {
        let (sql, values) =
            debit_bucket_query(scope, period, since).build_sqlx(PostgresQueryBuilder);

        let buckets = sqlx::query_as_with::<_, DebitBucket, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Error aggregating transfer debit chart: {e}");
                AppError::SqlxError(e)
            })?;

        Ok(buckets)
    }

    async fn modal_by_type(&self) -> Result<Vec<ModalTypeTotal>, AppError> {
        let (sql, values) = Query::select()
            .column(Modal::ModalType)
            .expr_as(count_all(), Alias::new("count"))
            .expr_as(sum_of(Modal::Nominal), Alias::new("total"))
            .from(Modal::Table)
            .group_by_col(Modal::ModalType)
            .order_by(Modal::ModalType, Order::Asc)
            .build_sqlx(PostgresQueryBuilder);

        let totals = sqlx::query_as_with::<_, ModalTypeTotal, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await?;

        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_counts_union_three_ledgers() {
        let since = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let sql = Query::select()
            .expr_as(
                bucket_of(ChartPeriod::Mingguan, Alias::new("tanggal")),
                Alias::new("bucket"),
            )
            .expr_as(count_all(), Alias::new("count"))
            .from_subquery(activity_query(Scope::User(2), since), Alias::new("activity"))
            .group_by_col(Alias::new("bucket"))
            .to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#"CAST(DATE_TRUNC('week', "tanggal") AS DATE) AS "bucket""#));
        assert_eq!(sql.matches("UNION ALL").count(), 2);
        assert!(sql.contains(r#""bank_tujuan" <> 'SETOR_ADMIN'"#));
        assert!(sql.contains(r#"FROM "transfer_debit""#));
        assert!(sql.contains(r#"FROM "tarik_tunai""#));
        assert_eq!(sql.matches(r#""user_id" = 2"#).count(), 3);
        assert!(sql.ends_with(r#"GROUP BY "bucket""#));
    }

    #[test]
    fn debit_chart_sums_fees_per_bucket() {
        let since = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let sql = debit_bucket_query(Scope::User(5), ChartPeriod::Bulanan, since)
            .to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#"CAST(DATE_TRUNC('month', "tanggal") AS DATE) AS "bucket""#));
        assert!(sql.contains(r#"COUNT(*) AS "count""#));
        assert!(sql.contains(r#"FROM "transfer_debit""#));
        assert!(sql.contains(r#""biaya""#));
        assert!(sql.contains(r#""user_id" = 5"#));
        assert!(sql.contains("'2025-01-01'"));
        assert!(sql.contains(r#"GROUP BY "bucket" ORDER BY "bucket" ASC"#));
    }
}
