use async_trait::async_trait;
use chrono::Utc;
use sea_query::{Asterisk, Condition, Expr, Func, Order, PostgresQueryBuilder, Query};
use sea_query_binder::SqlxBinder;
use tracing::{error, info};

use crate::{
    abstract_trait::TransferDebitRepositoryTrait,
    config::ConnectionPool,
    domain::{
        request::{CreateTransferDebitRequest, DateRange, LedgerStatus, PageWindow},
        scope::Scope,
    },
    model::{
        saldo::Saldo,
        transfer_debit::{TransferDebit, TransferDebitWithUser},
    },
    repository::ledger::{lock_user_ledger, recompute_balance, scope_condition},
    schema::{transfer_debit::TransferDebit as DebitSchema, user::Users},
    utils::{AppError, today},
};

const DEBIT_COLUMNS: [DebitSchema; 8] = [
    DebitSchema::TransferDebitId,
    DebitSchema::UserId,
    DebitSchema::Tanggal,
    DebitSchema::Biaya,
    DebitSchema::Keterangan,
    DebitSchema::Status,
    DebitSchema::FotoStruk,
    DebitSchema::CreatedAt,
];

pub struct TransferDebitRepository {
    db_pool: ConnectionPool,
}

impl TransferDebitRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl TransferDebitRepositoryTrait for TransferDebitRepository {
    async fn find_all(
        &self,
        scope: Scope,
        window: PageWindow,
        range: DateRange,
    ) -> Result<(Vec<TransferDebitWithUser>, i64), AppError> {
        info!(
            "Getting transfer debits - scope: {scope:?}, page: {}, limit: {}, range: {range:?}",
            window.page, window.limit
        );

        let cond = Condition::all()
            .add(scope_condition(
                scope,
                (DebitSchema::Table, DebitSchema::UserId),
            ))
            .add(range.condition(Expr::col((DebitSchema::Table, DebitSchema::Tanggal)).into()));

        let (sql, values) = Query::select()
            .columns(DEBIT_COLUMNS.map(|col| (DebitSchema::Table, col)))
            .column((Users::Table, Users::Username))
            .from(DebitSchema::Table)
            .inner_join(
                Users::Table,
                Expr::col((DebitSchema::Table, DebitSchema::UserId))
                    .equals((Users::Table, Users::UserId)),
            )
            .cond_where(cond.clone())
            .order_by((DebitSchema::Table, DebitSchema::Tanggal), Order::Desc)
            .order_by((DebitSchema::Table, DebitSchema::CreatedAt), Order::Desc)
            .limit(window.limit as u64)
            .offset(window.offset())
            .build_sqlx(PostgresQueryBuilder);

        let rows = sqlx::query_as_with::<_, TransferDebitWithUser, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Error fetching transfer debits: {e}");
                AppError::SqlxError(e)
            })?;

        let (count_sql, count_values) = Query::select()
            .expr(Func::count(Expr::col(Asterisk)))
            .from(DebitSchema::Table)
            .cond_where(cond)
            .build_sqlx(PostgresQueryBuilder);

        let (total,) = sqlx::query_as_with::<_, (i64,), _>(&count_sql, count_values)
            .fetch_one(&self.db_pool)
            .await?;

        info!("Found {} transfer debits out of total {total}", rows.len());

        Ok((rows, total))
    }

    async fn create(
        &self,
        user_id: i32,
        input: &CreateTransferDebitRequest,
    ) -> Result<(TransferDebit, Saldo), AppError> {
        info!("Creating transfer debit fee {} for user {user_id}", input.biaya);

        let mut tx = self.db_pool.begin().await?;

        lock_user_ledger(&mut tx, user_id).await?;

        let (sql, values) = Query::insert()
            .into_table(DebitSchema::Table)
            .columns([
                DebitSchema::UserId,
                DebitSchema::Tanggal,
                DebitSchema::Biaya,
                DebitSchema::Keterangan,
                DebitSchema::Status,
                DebitSchema::FotoStruk,
                DebitSchema::CreatedAt,
            ])
            .values([
                user_id.into(),
                input.tanggal.unwrap_or_else(today).into(),
                input.biaya.into(),
                input.keterangan.clone().into(),
                LedgerStatus::Lunas.as_str().into(),
                input.foto_struk.clone().into(),
                Utc::now().naive_utc().into(),
            ])?
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let debit = sqlx::query_as_with::<_, TransferDebit, _>(&sql, values)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                error!("Failed to insert transfer debit: {e}");
                AppError::SqlxError(e)
            })?;

        let saldo = recompute_balance(&mut tx, user_id).await?;

        tx.commit().await?;

        Ok((debit, saldo))
    }
}
