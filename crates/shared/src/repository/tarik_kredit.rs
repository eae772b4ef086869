use async_trait::async_trait;
use chrono::Utc;
use sea_query::{Condition, Expr, Order, PostgresQueryBuilder, Query};
use sea_query_binder::SqlxBinder;
use tracing::{error, info};

use crate::{
    abstract_trait::TarikKreditRepositoryTrait,
    config::ConnectionPool,
    domain::{
        request::{DateRange, TarikKreditRecord},
        scope::Scope,
    },
    model::tarik_kredit::{TarikKredit, TarikKreditWithUser},
    repository::ledger::scope_condition,
    schema::{tarik_kredit::TarikKredit as TarikKreditSchema, user::Users},
    utils::AppError,
};

const TARIK_KREDIT_COLUMNS: [TarikKreditSchema; 10] = [
    TarikKreditSchema::TarikKreditId,
    TarikKreditSchema::UserId,
    TarikKreditSchema::Tanggal,
    TarikKreditSchema::NamaUser,
    TarikKreditSchema::Nominal,
    TarikKreditSchema::AdminFee,
    TarikKreditSchema::Sisa,
    TarikKreditSchema::Keterangan,
    TarikKreditSchema::FotoStruk,
    TarikKreditSchema::CreatedAt,
];

/// Credit-card cash advances. Not part of the balance, so writes skip the
/// ledger lock.
pub struct TarikKreditRepository {
    db_pool: ConnectionPool,
}

impl TarikKreditRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl TarikKreditRepositoryTrait for TarikKreditRepository {
    async fn find_all(
        &self,
        scope: Scope,
        range: DateRange,
    ) -> Result<Vec<TarikKreditWithUser>, AppError> {
        info!("Getting tarik kredit for {scope:?}, range: {range:?}");

        let (sql, values) = Query::select()
            .columns(TARIK_KREDIT_COLUMNS.map(|col| (TarikKreditSchema::Table, col)))
            .column((Users::Table, Users::Username))
            .from(TarikKreditSchema::Table)
            .inner_join(
                Users::Table,
                Expr::col((TarikKreditSchema::Table, TarikKreditSchema::UserId))
                    .equals((Users::Table, Users::UserId)),
            )
            .cond_where(
                Condition::all()
                    .add(scope_condition(
                        scope,
                        (TarikKreditSchema::Table, TarikKreditSchema::UserId),
                    ))
                    .add(range.condition(
                        Expr::col((TarikKreditSchema::Table, TarikKreditSchema::Tanggal)).into(),
                    )),
            )
            .order_by((TarikKreditSchema::Table, TarikKreditSchema::Tanggal), Order::Desc)
            .order_by((TarikKreditSchema::Table, TarikKreditSchema::CreatedAt), Order::Desc)
            .build_sqlx(PostgresQueryBuilder);

        let rows = sqlx::query_as_with::<_, TarikKreditWithUser, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Error fetching tarik kredit: {e}");
                AppError::SqlxError(e)
            })?;

        Ok(rows)
    }

    async fn create(
        &self,
        user_id: i32,
        input: &TarikKreditRecord,
    ) -> Result<TarikKredit, AppError> {
        info!(
            "Creating tarik kredit of {} (fee {}) for user {user_id}",
            input.nominal, input.admin_fee
        );

        let (sql, values) = Query::insert()
            .into_table(TarikKreditSchema::Table)
            .columns([
                TarikKreditSchema::UserId,
                TarikKreditSchema::Tanggal,
                TarikKreditSchema::NamaUser,
                TarikKreditSchema::Nominal,
                TarikKreditSchema::AdminFee,
                TarikKreditSchema::Sisa,
                TarikKreditSchema::Keterangan,
                TarikKreditSchema::FotoStruk,
                TarikKreditSchema::CreatedAt,
            ])
            .values([
                user_id.into(),
                input.tanggal.into(),
                input.nama_user.clone().into(),
                input.nominal.into(),
                input.admin_fee.into(),
                input.sisa.into(),
                input.keterangan.clone().into(),
                input.foto_struk.clone().into(),
                Utc::now().naive_utc().into(),
            ])?
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let tarik = sqlx::query_as_with::<_, TarikKredit, _>(&sql, values)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Failed to insert tarik kredit: {e}");
                AppError::SqlxError(e)
            })?;

        Ok(tarik)
    }
}
