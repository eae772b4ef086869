use async_trait::async_trait;
use chrono::Utc;
use sea_query::{Expr, Order, PostgresQueryBuilder, Query};
use sea_query_binder::SqlxBinder;
use tracing::{error, info};

use crate::{
    abstract_trait::ModalRepositoryTrait,
    config::ConnectionPool,
    domain::{request::CreateModalRequest, scope::Scope},
    model::{
        modal::{Modal, ModalWithUser},
        saldo::Saldo,
    },
    repository::ledger::{lock_user_ledger, recompute_balance, scope_condition},
    schema::{modal::Modal as ModalSchema, user::Users},
    utils::AppError,
};

const MODAL_COLUMNS: [ModalSchema; 6] = [
    ModalSchema::ModalId,
    ModalSchema::UserId,
    ModalSchema::ModalType,
    ModalSchema::Nominal,
    ModalSchema::CreatedAt,
    ModalSchema::UpdatedAt,
];

pub struct ModalRepository {
    db_pool: ConnectionPool,
}

impl ModalRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ModalRepositoryTrait for ModalRepository {
    async fn find_all(&self, scope: Scope) -> Result<Vec<Modal>, AppError> {
        info!("Getting modal rows for {scope:?}");

        let (sql, values) = Query::select()
            .columns(MODAL_COLUMNS)
            .from(ModalSchema::Table)
            .cond_where(scope_condition(scope, ModalSchema::UserId))
            .order_by(ModalSchema::CreatedAt, Order::Desc)
            .build_sqlx(PostgresQueryBuilder);

        let rows = sqlx::query_as_with::<_, Modal, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Error fetching modal rows: {e}");
                AppError::SqlxError(e)
            })?;

        info!("Found {} modal rows", rows.len());

        Ok(rows)
    }

    async fn find_history(&self, scope: Scope) -> Result<Vec<ModalWithUser>, AppError> {
        info!("Getting modal history for {scope:?}");

        let (sql, values) = Query::select()
            .columns(MODAL_COLUMNS.map(|col| (ModalSchema::Table, col)))
            .column((Users::Table, Users::Username))
            .from(ModalSchema::Table)
            .inner_join(
                Users::Table,
                Expr::col((ModalSchema::Table, ModalSchema::UserId))
                    .equals((Users::Table, Users::UserId)),
            )
            .cond_where(scope_condition(
                scope,
                (ModalSchema::Table, ModalSchema::UserId),
            ))
            .order_by((ModalSchema::Table, ModalSchema::CreatedAt), Order::Desc)
            .build_sqlx(PostgresQueryBuilder);

        let rows = sqlx::query_as_with::<_, ModalWithUser, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Error fetching modal history: {e}");
                AppError::SqlxError(e)
            })?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Modal>, AppError> {
        let (sql, values) = Query::select()
            .columns(MODAL_COLUMNS)
            .from(ModalSchema::Table)
            .and_where(Expr::col(ModalSchema::ModalId).eq(id))
            .build_sqlx(PostgresQueryBuilder);

        let modal = sqlx::query_as_with::<_, Modal, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(modal)
    }

    async fn create(
        &self,
        user_id: i32,
        input: &CreateModalRequest,
    ) -> Result<(Modal, Saldo), AppError> {
        info!(
            "Creating modal {} of {} for user {user_id}",
            input.modal_type, input.nominal
        );

        let now = Utc::now().naive_utc();
        let mut tx = self.db_pool.begin().await?;

        lock_user_ledger(&mut tx, user_id).await?;

        let (sql, values) = Query::insert()
            .into_table(ModalSchema::Table)
            .columns([
                ModalSchema::UserId,
                ModalSchema::ModalType,
                ModalSchema::Nominal,
                ModalSchema::CreatedAt,
                ModalSchema::UpdatedAt,
            ])
            .values([
                user_id.into(),
                input.modal_type.clone().into(),
                input.nominal.into(),
                now.into(),
                now.into(),
            ])?
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let modal = sqlx::query_as_with::<_, Modal, _>(&sql, values)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                error!("Failed to insert modal: {e}");
                AppError::SqlxError(e)
            })?;

        let saldo = recompute_balance(&mut tx, user_id).await?;

        tx.commit().await?;

        info!("Modal {} created, saldo {}", modal.modal_id, saldo.total_saldo);

        Ok((modal, saldo))
    }

    async fn update_nominal(&self, id: i32, nominal: i64) -> Result<(Modal, Saldo), AppError> {
        info!("Updating nominal of modal {id} to {nominal}");

        let mut tx = self.db_pool.begin().await?;

        let (sql, values) = Query::select()
            .column(ModalSchema::UserId)
            .from(ModalSchema::Table)
            .and_where(Expr::col(ModalSchema::ModalId).eq(id))
            .build_sqlx(PostgresQueryBuilder);

        let (user_id,) = sqlx::query_as_with::<_, (i32,), _>(&sql, values)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Modal with id {id} not found")))?;

        lock_user_ledger(&mut tx, user_id).await?;

        let (sql, values) = Query::update()
            .table(ModalSchema::Table)
            .value(ModalSchema::Nominal, nominal)
            .value(ModalSchema::UpdatedAt, Utc::now().naive_utc())
            .and_where(Expr::col(ModalSchema::ModalId).eq(id))
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let modal = sqlx::query_as_with::<_, Modal, _>(&sql, values)
            .fetch_one(&mut *tx)
            .await?;

        let saldo = recompute_balance(&mut tx, user_id).await?;

        tx.commit().await?;

        Ok((modal, saldo))
    }
}
