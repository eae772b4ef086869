//! Balance recomputation shared by every balance-relevant write. All
//! functions run on the caller's transaction connection.

use chrono::Utc;
use sea_query::{
    Alias, Condition, Expr, Func, IntoColumnRef, IntoTableRef, OnConflict, PostgresQueryBuilder,
    Query, SimpleExpr,
};
use sea_query_binder::SqlxBinder;
use sqlx::PgConnection;
use tracing::{debug, error};

use crate::{
    domain::{balance::BalanceComponents, scope::Scope},
    model::saldo::Saldo,
    schema::{
        modal::Modal, saldo::Saldo as SaldoSchema, tarik_tunai::TarikTunai, transfer::Transfer,
        transfer_debit::TransferDebit,
    },
    utils::AppError,
};

/// First key of the two-key advisory lock; the second is the user id.
const LEDGER_LOCK_NAMESPACE: i32 = 0x4b41_5352;

pub(crate) fn scope_condition<C>(scope: Scope, column: C) -> Condition
where
    C: IntoColumnRef,
{
    match scope {
        Scope::All => Condition::all(),
        Scope::User(user_id) => Condition::all().add(Expr::col(column).eq(user_id)),
    }
}

/// `CAST(COALESCE(SUM(expr), 0) AS BIGINT)`; Postgres sums BIGINT into
/// NUMERIC.
pub(crate) fn sum_bigint(expr: SimpleExpr) -> SimpleExpr {
    Func::cast_as(
        Func::coalesce([SimpleExpr::from(Func::sum(expr)), Expr::val(0i64).into()]),
        Alias::new("BIGINT"),
    )
    .into()
}

/// Serializes balance writers of one user until the transaction ends.
pub(crate) async fn lock_user_ledger(conn: &mut PgConnection, user_id: i32) -> Result<(), AppError> {
    let (sql, values) = Query::select()
        .expr(
            Func::cust(Alias::new("pg_advisory_xact_lock"))
                .arg(Expr::val(LEDGER_LOCK_NAMESPACE))
                .arg(Expr::val(user_id)),
        )
        .build_sqlx(PostgresQueryBuilder);

    sqlx::query_with(&sql, values)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            error!("Failed to lock ledger of user {user_id}: {e}");
            AppError::SqlxError(e)
        })?;

    Ok(())
}

async fn sum_for_user<T, C>(
    conn: &mut PgConnection,
    table: T,
    user_column: C,
    expr: SimpleExpr,
    user_id: i32,
) -> Result<i64, AppError>
where
    T: IntoTableRef,
    C: IntoColumnRef,
{
    let (sql, values) = Query::select()
        .expr(sum_bigint(expr))
        .from(table)
        .and_where(Expr::col(user_column).eq(user_id))
        .build_sqlx(PostgresQueryBuilder);

    let (sum,): (i64,) = sqlx::query_as_with(&sql, values)
        .fetch_one(&mut *conn)
        .await?;

    Ok(sum)
}

pub(crate) async fn sum_components(
    conn: &mut PgConnection,
    user_id: i32,
) -> Result<BalanceComponents, AppError> {
    let deposits = sum_for_user(
        conn,
        Modal::Table,
        Modal::UserId,
        Expr::col(Modal::Nominal).into(),
        user_id,
    )
    .await?;

    let transfers = sum_for_user(
        conn,
        Transfer::Table,
        Transfer::UserId,
        Expr::col(Transfer::Nominal).add(Expr::col(Transfer::Biaya)),
        user_id,
    )
    .await?;

    let debit_fees = sum_for_user(
        conn,
        TransferDebit::Table,
        TransferDebit::UserId,
        Expr::col(TransferDebit::Biaya).into(),
        user_id,
    )
    .await?;

    let withdrawal_amounts = sum_for_user(
        conn,
        TarikTunai::Table,
        TarikTunai::UserId,
        Expr::col(TarikTunai::NominalTarik).into(),
        user_id,
    )
    .await?;

    let withdrawal_fees = sum_for_user(
        conn,
        TarikTunai::Table,
        TarikTunai::UserId,
        Expr::col(TarikTunai::BiayaTarik).into(),
        user_id,
    )
    .await?;

    Ok(BalanceComponents {
        deposits,
        transfers,
        debit_fees,
        withdrawal_amounts,
        withdrawal_fees,
    })
}

/// Recomputes the user's balance from the ledger and upserts it. The
/// caller must already hold the user's ledger lock.
pub(crate) async fn recompute_balance(
    conn: &mut PgConnection,
    user_id: i32,
) -> Result<Saldo, AppError> {
    let components = sum_components(conn, user_id).await?;
    let total = components
        .total()
        .map_err(|_| AppError::BalanceOverflow(user_id))?;

    debug!("Recomputed balance of user {user_id}: {components:?} => {total}");

    let now = Utc::now().naive_utc();

    let (sql, values) = Query::insert()
        .into_table(SaldoSchema::Table)
        .columns([
            SaldoSchema::UserId,
            SaldoSchema::TotalSaldo,
            SaldoSchema::CreatedAt,
            SaldoSchema::UpdatedAt,
        ])
        .values([user_id.into(), total.into(), now.into(), now.into()])?
        .on_conflict(
            OnConflict::column(SaldoSchema::UserId)
                .update_columns([SaldoSchema::TotalSaldo, SaldoSchema::UpdatedAt])
                .to_owned(),
        )
        .returning_all()
        .build_sqlx(PostgresQueryBuilder);

    let saldo = sqlx::query_as_with::<_, Saldo, _>(&sql, values)
        .fetch_one(&mut *conn)
        .await?;

    Ok(saldo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_are_cast_back_to_bigint() {
        let sql = Query::select()
            .expr(sum_bigint(
                Expr::col(Transfer::Nominal).add(Expr::col(Transfer::Biaya)),
            ))
            .from(Transfer::Table)
            .and_where(Expr::col(Transfer::UserId).eq(3))
            .to_string(PostgresQueryBuilder);

        assert_eq!(
            sql,
            r#"SELECT CAST(COALESCE(SUM("nominal" + "biaya"), 0) AS BIGINT) FROM "transfer" WHERE "user_id" = 3"#
        );
    }

    #[test]
    fn owner_scope_adds_no_filter() {
        let all = Query::select()
            .column(Transfer::TransferId)
            .from(Transfer::Table)
            .cond_where(scope_condition(Scope::All, Transfer::UserId))
            .to_string(PostgresQueryBuilder);
        assert!(!all.contains(r#""user_id""#));

        let one = Query::select()
            .column(Transfer::TransferId)
            .from(Transfer::Table)
            .cond_where(scope_condition(Scope::User(8), Transfer::UserId))
            .to_string(PostgresQueryBuilder);
        assert!(one.ends_with(r#"WHERE "user_id" = 8"#));
    }
}
