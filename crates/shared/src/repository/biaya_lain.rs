use async_trait::async_trait;
use chrono::Utc;
use sea_query::{Expr, Order, PostgresQueryBuilder, Query};
use sea_query_binder::SqlxBinder;
use tracing::{error, info};

use crate::{
    abstract_trait::BiayaLainRepositoryTrait,
    config::ConnectionPool,
    domain::{request::CreateBiayaLainRequest, scope::Scope},
    model::biaya_lain::{BiayaLain, BiayaLainWithUser},
    repository::ledger::scope_condition,
    schema::{biaya_lain::BiayaLain as BiayaLainSchema, user::Users},
    utils::{AppError, today},
};

const BIAYA_LAIN_COLUMNS: [BiayaLainSchema; 7] = [
    BiayaLainSchema::BiayaLainId,
    BiayaLainSchema::UserId,
    BiayaLainSchema::Tanggal,
    BiayaLainSchema::Biaya,
    BiayaLainSchema::Keterangan,
    BiayaLainSchema::FotoStruk,
    BiayaLainSchema::CreatedAt,
];

pub struct BiayaLainRepository {
    db_pool: ConnectionPool,
}

impl BiayaLainRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl BiayaLainRepositoryTrait for BiayaLainRepository {
    async fn find_all(&self, scope: Scope) -> Result<Vec<BiayaLainWithUser>, AppError> {
        info!("Getting biaya lain for {scope:?}");

        let (sql, values) = Query::select()
            .columns(BIAYA_LAIN_COLUMNS.map(|col| (BiayaLainSchema::Table, col)))
            .column((Users::Table, Users::Username))
            .from(BiayaLainSchema::Table)
            .inner_join(
                Users::Table,
                Expr::col((BiayaLainSchema::Table, BiayaLainSchema::UserId))
                    .equals((Users::Table, Users::UserId)),
            )
            .cond_where(scope_condition(
                scope,
                (BiayaLainSchema::Table, BiayaLainSchema::UserId),
            ))
            .order_by((BiayaLainSchema::Table, BiayaLainSchema::Tanggal), Order::Desc)
            .order_by((BiayaLainSchema::Table, BiayaLainSchema::CreatedAt), Order::Desc)
            .build_sqlx(PostgresQueryBuilder);

        let rows = sqlx::query_as_with::<_, BiayaLainWithUser, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Error fetching biaya lain: {e}");
                AppError::SqlxError(e)
            })?;

        Ok(rows)
    }

    async fn create(
        &self,
        user_id: i32,
        input: &CreateBiayaLainRequest,
    ) -> Result<BiayaLain, AppError> {
        info!("Creating biaya lain of {} for user {user_id}", input.biaya);

        let (sql, values) = Query::insert()
            .into_table(BiayaLainSchema::Table)
            .columns([
                BiayaLainSchema::UserId,
                BiayaLainSchema::Tanggal,
                BiayaLainSchema::Biaya,
                BiayaLainSchema::Keterangan,
                BiayaLainSchema::FotoStruk,
                BiayaLainSchema::CreatedAt,
            ])
            .values([
                user_id.into(),
                input.tanggal.unwrap_or_else(today).into(),
                input.biaya.into(),
                input.keterangan.clone().into(),
                input.foto_struk.clone().into(),
                Utc::now().naive_utc().into(),
            ])?
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let biaya = sqlx::query_as_with::<_, BiayaLain, _>(&sql, values)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Failed to insert biaya lain: {e}");
                AppError::SqlxError(e)
            })?;

        Ok(biaya)
    }
}
