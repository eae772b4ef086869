use async_trait::async_trait;
use chrono::Utc;
use sea_query::{Expr, Order, PostgresQueryBuilder, Query, SelectStatement, SimpleExpr};
use sea_query_binder::SqlxBinder;
use tracing::{error, info};

use crate::{
    abstract_trait::SetorRepositoryTrait,
    config::ConnectionPool,
    domain::{
        request::{CreateSetorRequest, LedgerStatus},
        scope::Scope,
    },
    model::{
        saldo::Saldo,
        transfer::{SETOR_ADMIN_BANK, Transfer, TransferWithUser},
    },
    repository::{
        ledger::{lock_user_ledger, recompute_balance, scope_condition},
        transfer::{TRANSFER_COLUMNS, select_with_user},
    },
    schema::transfer::Transfer as TransferSchema,
    utils::{AppError, today},
};

const SETOR_NOMOR_REKENING: &str = "-";
const SETOR_NAMA_PEMILIK: &str = "ADMIN";

/// Setor admin rows, pending first, then newest.
fn setor_listing(scope: Scope) -> SelectStatement {
    let pending_first = SimpleExpr::Case(Box::new(
        Expr::case(
            Expr::col((TransferSchema::Table, TransferSchema::Status))
                .eq(LedgerStatus::Pending.as_str()),
            0,
        )
        .finally(1),
    ));

    select_with_user()
        .and_where(
            Expr::col((TransferSchema::Table, TransferSchema::BankTujuan)).eq(SETOR_ADMIN_BANK),
        )
        .cond_where(scope_condition(
            scope,
            (TransferSchema::Table, TransferSchema::UserId),
        ))
        .order_by_expr(pending_first, Order::Asc)
        .order_by((TransferSchema::Table, TransferSchema::CreatedAt), Order::Desc)
        .to_owned()
}

/// Cash hand-offs to the owner, stored as tagged transfer rows.
pub struct SetorRepository {
    db_pool: ConnectionPool,
}

impl SetorRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SetorRepositoryTrait for SetorRepository {
    async fn find_all(&self, scope: Scope) -> Result<Vec<TransferWithUser>, AppError> {
        info!("Getting setor admin rows for {scope:?}");

        let (sql, values) = setor_listing(scope).build_sqlx(PostgresQueryBuilder);

        let rows = sqlx::query_as_with::<_, TransferWithUser, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Error fetching setor admin rows: {e}");
                AppError::SqlxError(e)
            })?;

        info!("Found {} setor admin rows", rows.len());

        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Transfer>, AppError> {
        let (sql, values) = Query::select()
            .columns(TRANSFER_COLUMNS)
            .from(TransferSchema::Table)
            .and_where(Expr::col(TransferSchema::TransferId).eq(id))
            .and_where(Expr::col(TransferSchema::BankTujuan).eq(SETOR_ADMIN_BANK))
            .build_sqlx(PostgresQueryBuilder);

        let setor = sqlx::query_as_with::<_, Transfer, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(setor)
    }

    async fn create(
        &self,
        user_id: i32,
        input: &CreateSetorRequest,
    ) -> Result<(Transfer, Saldo), AppError> {
        info!("Creating setor admin of {} for user {user_id}", input.nominal);

        let now = Utc::now().naive_utc();
        let mut tx = self.db_pool.begin().await?;

        lock_user_ledger(&mut tx, user_id).await?;

        let (sql, values) = Query::insert()
            .into_table(TransferSchema::Table)
            .columns([
                TransferSchema::UserId,
                TransferSchema::Tanggal,
                TransferSchema::BankTujuan,
                TransferSchema::NomorRekening,
                TransferSchema::NamaPemilik,
                TransferSchema::Nominal,
                TransferSchema::Biaya,
                TransferSchema::Keterangan,
                TransferSchema::Status,
                TransferSchema::CreatedAt,
                TransferSchema::UpdatedAt,
            ])
            .values([
                user_id.into(),
                today().into(),
                SETOR_ADMIN_BANK.into(),
                SETOR_NOMOR_REKENING.into(),
                SETOR_NAMA_PEMILIK.into(),
                input.nominal.into(),
                0i64.into(),
                input.keterangan.clone().into(),
                LedgerStatus::Pending.as_str().into(),
                now.into(),
                now.into(),
            ])?
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let setor = sqlx::query_as_with::<_, Transfer, _>(&sql, values)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                error!("Failed to insert setor admin: {e}");
                AppError::SqlxError(e)
            })?;

        let saldo = recompute_balance(&mut tx, user_id).await?;

        tx.commit().await?;

        info!(
            "Setor admin {} created, saldo {}",
            setor.transfer_id, saldo.total_saldo
        );

        Ok((setor, saldo))
    }

    async fn approve(
        &self,
        id: i32,
        status: LedgerStatus,
        nominal: Option<i64>,
    ) -> Result<(Transfer, Saldo), AppError> {
        info!("Approving setor admin {id} as {status}, nominal: {nominal:?}");

        let mut tx = self.db_pool.begin().await?;

        let (sql, values) = Query::select()
            .column(TransferSchema::UserId)
            .from(TransferSchema::Table)
            .and_where(Expr::col(TransferSchema::TransferId).eq(id))
            .and_where(Expr::col(TransferSchema::BankTujuan).eq(SETOR_ADMIN_BANK))
            .build_sqlx(PostgresQueryBuilder);

        let (user_id,) = sqlx::query_as_with::<_, (i32,), _>(&sql, values)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Setor admin with id {id} not found")))?;

        lock_user_ledger(&mut tx, user_id).await?;

        let mut update = Query::update();
        update
            .table(TransferSchema::Table)
            .value(TransferSchema::Status, status.as_str())
            .value(TransferSchema::UpdatedAt, Utc::now().naive_utc())
            .and_where(Expr::col(TransferSchema::TransferId).eq(id));

        if let Some(nominal) = nominal {
            update.value(TransferSchema::Nominal, nominal);
        }

        let (sql, values) = update.returning_all().build_sqlx(PostgresQueryBuilder);

        let setor = sqlx::query_as_with::<_, Transfer, _>(&sql, values)
            .fetch_one(&mut *tx)
            .await?;

        let saldo = recompute_balance(&mut tx, user_id).await?;

        tx.commit().await?;

        Ok((setor, saldo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_puts_pending_hand_offs_first() {
        let sql = setor_listing(Scope::User(3)).to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#""transfer"."bank_tujuan" = 'SETOR_ADMIN'"#));
        assert!(sql.contains(r#""transfer"."user_id" = 3"#));

        let order_by = &sql[sql.find("ORDER BY").unwrap()..];
        let case_at = order_by.find("CASE WHEN").unwrap();
        let newest_at = order_by.find(r#""transfer"."created_at" DESC"#).unwrap();
        assert!(case_at < newest_at, "{sql}");
        assert!(order_by.contains("'pending'"));
        assert!(order_by.contains("THEN 0 ELSE 1 END"));
    }
}
