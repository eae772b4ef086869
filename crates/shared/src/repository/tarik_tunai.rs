use async_trait::async_trait;
use chrono::Utc;
use sea_query::{Condition, Expr, Order, PostgresQueryBuilder, Query};
use sea_query_binder::SqlxBinder;
use tracing::{error, info};

use crate::{
    abstract_trait::TarikTunaiRepositoryTrait,
    config::ConnectionPool,
    domain::{
        request::{CreateTarikTunaiRequest, DateRange, LedgerStatus},
        scope::Scope,
    },
    model::{
        saldo::Saldo,
        tarik_tunai::{TarikTunai, TarikTunaiWithUser},
    },
    repository::ledger::{lock_user_ledger, recompute_balance, scope_condition},
    schema::{tarik_tunai::TarikTunai as TarikTunaiSchema, user::Users},
    utils::{AppError, today},
};

const TARIK_TUNAI_COLUMNS: [TarikTunaiSchema; 10] = [
    TarikTunaiSchema::TarikTunaiId,
    TarikTunaiSchema::UserId,
    TarikTunaiSchema::Tanggal,
    TarikTunaiSchema::Bank,
    TarikTunaiSchema::NominalTarik,
    TarikTunaiSchema::BiayaTarik,
    TarikTunaiSchema::Keterangan,
    TarikTunaiSchema::Status,
    TarikTunaiSchema::FotoStruk,
    TarikTunaiSchema::CreatedAt,
];

pub struct TarikTunaiRepository {
    db_pool: ConnectionPool,
}

impl TarikTunaiRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl TarikTunaiRepositoryTrait for TarikTunaiRepository {
    async fn find_all(
        &self,
        scope: Scope,
        range: DateRange,
    ) -> Result<Vec<TarikTunaiWithUser>, AppError> {
        info!("Getting tarik tunai for {scope:?}, range: {range:?}");

        let (sql, values) = Query::select()
            .columns(TARIK_TUNAI_COLUMNS.map(|col| (TarikTunaiSchema::Table, col)))
            .column((Users::Table, Users::Username))
            .from(TarikTunaiSchema::Table)
            .inner_join(
                Users::Table,
                Expr::col((TarikTunaiSchema::Table, TarikTunaiSchema::UserId))
                    .equals((Users::Table, Users::UserId)),
            )
            .cond_where(
                Condition::all()
                    .add(scope_condition(
                        scope,
                        (TarikTunaiSchema::Table, TarikTunaiSchema::UserId),
                    ))
                    .add(range.condition(
                        Expr::col((TarikTunaiSchema::Table, TarikTunaiSchema::Tanggal)).into(),
                    )),
            )
            .order_by((TarikTunaiSchema::Table, TarikTunaiSchema::Tanggal), Order::Desc)
            .order_by((TarikTunaiSchema::Table, TarikTunaiSchema::CreatedAt), Order::Desc)
            .build_sqlx(PostgresQueryBuilder);

        let rows = sqlx::query_as_with::<_, TarikTunaiWithUser, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Error fetching tarik tunai: {e}");
                AppError::SqlxError(e)
            })?;

        info!("Found {} tarik tunai rows", rows.len());

        Ok(rows)
    }

    async fn create(
        &self,
        user_id: i32,
        input: &CreateTarikTunaiRequest,
    ) -> Result<(TarikTunai, Saldo), AppError> {
        info!(
            "Creating tarik tunai of {} at {} for user {user_id}",
            input.nominal_tarik, input.bank
        );

        let mut tx = self.db_pool.begin().await?;

        lock_user_ledger(&mut tx, user_id).await?;

        let (sql, values) = Query::insert()
            .into_table(TarikTunaiSchema::Table)
            .columns([
                TarikTunaiSchema::UserId,
                TarikTunaiSchema::Tanggal,
                TarikTunaiSchema::Bank,
                TarikTunaiSchema::NominalTarik,
                TarikTunaiSchema::BiayaTarik,
                TarikTunaiSchema::Keterangan,
                TarikTunaiSchema::Status,
                TarikTunaiSchema::FotoStruk,
                TarikTunaiSchema::CreatedAt,
            ])
            .values([
                user_id.into(),
                input.tanggal.unwrap_or_else(today).into(),
                input.bank.clone().into(),
                input.nominal_tarik.into(),
                input.biaya_tarik.unwrap_or(0).into(),
                input.keterangan.clone().into(),
                LedgerStatus::Lunas.as_str().into(),
                input.foto_struk.clone().into(),
                Utc::now().naive_utc().into(),
            ])?
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let tarik = sqlx::query_as_with::<_, TarikTunai, _>(&sql, values)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                error!("Failed to insert tarik tunai: {e}");
                AppError::SqlxError(e)
            })?;

        let saldo = recompute_balance(&mut tx, user_id).await?;

        tx.commit().await?;

        info!(
            "Tarik tunai {} created, saldo {}",
            tarik.tarik_tunai_id, saldo.total_saldo
        );

        Ok((tarik, saldo))
    }
}
