use async_trait::async_trait;
use sea_query::{Alias, Expr, Func, Order, PostgresQueryBuilder, Query, SimpleExpr};
use sea_query_binder::SqlxBinder;
use tracing::{error, info};

use crate::{
    abstract_trait::SaldoRepositoryTrait,
    config::ConnectionPool,
    domain::scope::Scope,
    model::saldo::{Saldo, SaldoWithUser},
    repository::ledger::{lock_user_ledger, recompute_balance, scope_condition, sum_bigint},
    schema::{saldo::Saldo as SaldoSchema, user::Users},
    utils::AppError,
};

pub struct SaldoRepository {
    db_pool: ConnectionPool,
}

impl SaldoRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SaldoRepositoryTrait for SaldoRepository {
    async fn recompute(&self, user_id: i32) -> Result<Saldo, AppError> {
        info!("Recomputing saldo for user {user_id}");

        let mut tx = self.db_pool.begin().await?;

        lock_user_ledger(&mut tx, user_id).await?;
        let saldo = recompute_balance(&mut tx, user_id).await?;

        tx.commit().await?;

        info!("Saldo of user {user_id} is now {}", saldo.total_saldo);

        Ok(saldo)
    }

    async fn find_by_user_id(&self, user_id: i32) -> Result<Option<Saldo>, AppError> {
        let (sql, values) = Query::select()
            .columns([
                SaldoSchema::SaldoId,
                SaldoSchema::UserId,
                SaldoSchema::TotalSaldo,
                SaldoSchema::CreatedAt,
                SaldoSchema::UpdatedAt,
            ])
            .from(SaldoSchema::Table)
            .and_where(Expr::col(SaldoSchema::UserId).eq(user_id))
            .build_sqlx(PostgresQueryBuilder);

        let saldo = sqlx::query_as_with::<_, Saldo, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Error fetching saldo of user {user_id}: {e}");
                AppError::SqlxError(e)
            })?;

        Ok(saldo)
    }

    async fn find_all_with_user(&self) -> Result<Vec<SaldoWithUser>, AppError> {
        info!("Listing saldo of every user");

        let (sql, values) = Query::select()
            .column((Users::Table, Users::UserId))
            .column((Users::Table, Users::Username))
            .column((Users::Table, Users::Role))
            .column((Users::Table, Users::Status))
            .expr_as(
                Func::coalesce([
                    SimpleExpr::from(Expr::col((SaldoSchema::Table, SaldoSchema::TotalSaldo))),
                    Expr::val(0i64).into(),
                ]),
                Alias::new("total_saldo"),
            )
            .column((SaldoSchema::Table, SaldoSchema::UpdatedAt))
            .from(Users::Table)
            .left_join(
                SaldoSchema::Table,
                Expr::col((SaldoSchema::Table, SaldoSchema::UserId))
                    .equals((Users::Table, Users::UserId)),
            )
            .order_by((Users::Table, Users::Username), Order::Asc)
            .build_sqlx(PostgresQueryBuilder);

        let rows = sqlx::query_as_with::<_, SaldoWithUser, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Error listing saldo: {e}");
                AppError::SqlxError(e)
            })?;

        info!("Found saldo for {} users", rows.len());

        Ok(rows)
    }

    async fn total(&self, scope: Scope) -> Result<i64, AppError> {
        let (sql, values) = Query::select()
            .expr(sum_bigint(Expr::col(SaldoSchema::TotalSaldo).into()))
            .from(SaldoSchema::Table)
            .cond_where(scope_condition(scope, SaldoSchema::UserId))
            .build_sqlx(PostgresQueryBuilder);

        let (total,): (i64,) = sqlx::query_as_with(&sql, values)
            .fetch_one(&self.db_pool)
            .await?;

        Ok(total)
    }
}
