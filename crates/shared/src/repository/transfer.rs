use async_trait::async_trait;
use chrono::Utc;
use sea_query::{
    Asterisk, Condition, Expr, Func, LikeExpr, OnConflict, Order, PostgresQueryBuilder, Query,
    SelectStatement,
};
use sea_query_binder::SqlxBinder;
use tracing::{error, info};

use crate::{
    abstract_trait::TransferRepositoryTrait,
    config::ConnectionPool,
    domain::{
        request::{
            CreateTransferRequest, DateRange, LedgerStatus, PageWindow, UpdateTransferRequest,
        },
        scope::Scope,
    },
    model::{
        saldo::Saldo,
        transfer::{SETOR_ADMIN_BANK, Transfer, TransferFavorit, TransferWithUser},
    },
    repository::ledger::{lock_user_ledger, recompute_balance, scope_condition},
    schema::{
        transfer::{Transfer as TransferSchema, TransferFavorit as FavoritSchema},
        user::Users,
    },
    utils::{AppError, today},
};

pub(crate) const TRANSFER_COLUMNS: [TransferSchema; 13] = [
    TransferSchema::TransferId,
    TransferSchema::UserId,
    TransferSchema::Tanggal,
    TransferSchema::BankTujuan,
    TransferSchema::NomorRekening,
    TransferSchema::NamaPemilik,
    TransferSchema::Nominal,
    TransferSchema::Biaya,
    TransferSchema::Keterangan,
    TransferSchema::Status,
    TransferSchema::FotoStruk,
    TransferSchema::CreatedAt,
    TransferSchema::UpdatedAt,
];

const FAVORIT_LIMIT_MAX: u64 = 50;

/// `transfer.*` plus the cashier's username.
pub(crate) fn select_with_user() -> SelectStatement {
    Query::select()
        .columns(TRANSFER_COLUMNS.map(|col| (TransferSchema::Table, col)))
        .column((Users::Table, Users::Username))
        .from(TransferSchema::Table)
        .inner_join(
            Users::Table,
            Expr::col((TransferSchema::Table, TransferSchema::UserId))
                .equals((Users::Table, Users::UserId)),
        )
        .to_owned()
}

const LIKE_ESCAPE: char = '\\';

/// Lowercased `%term%` with the term's own wildcards taken literally.
fn contains_pattern(term: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');

    LikeExpr::new(pattern).escape(LIKE_ESCAPE)
}

fn regular_transfers(scope: Scope, range: DateRange, search: Option<&str>) -> Condition {
    let mut cond = Condition::all()
        .add(
            Expr::col((TransferSchema::Table, TransferSchema::BankTujuan)).ne(SETOR_ADMIN_BANK),
        )
        .add(scope_condition(
            scope,
            (TransferSchema::Table, TransferSchema::UserId),
        ))
        .add(range.condition(Expr::col((TransferSchema::Table, TransferSchema::Tanggal)).into()));

    if let Some(term) = search {
        let pattern = contains_pattern(term);
        let mut any = Condition::any();
        for col in [
            TransferSchema::BankTujuan,
            TransferSchema::NomorRekening,
            TransferSchema::NamaPemilik,
            TransferSchema::Keterangan,
        ] {
            any = any.add(
                Expr::expr(Func::lower(Expr::col((TransferSchema::Table, col))))
                    .like(pattern.clone()),
            );
        }
        cond = cond.add(any);
    }

    cond
}

pub struct TransferRepository {
    db_pool: ConnectionPool,
}

impl TransferRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }

    /// Owner of a regular transfer row; setor admin rows are not found here.
    async fn owner_of(conn: &mut sqlx::PgConnection, id: i32) -> Result<i32, AppError> {
        let (sql, values) = Query::select()
            .column(TransferSchema::UserId)
            .from(TransferSchema::Table)
            .and_where(Expr::col(TransferSchema::TransferId).eq(id))
            .and_where(Expr::col(TransferSchema::BankTujuan).ne(SETOR_ADMIN_BANK))
            .build_sqlx(PostgresQueryBuilder);

        let (user_id,) = sqlx::query_as_with::<_, (i32,), _>(&sql, values)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Transfer with id {id} not found")))?;

        Ok(user_id)
    }
}

#[async_trait]
impl TransferRepositoryTrait for TransferRepository {
    async fn find_all(
        &self,
        scope: Scope,
        window: PageWindow,
        range: DateRange,
        search: Option<String>,
    ) -> Result<(Vec<TransferWithUser>, i64), AppError> {
        info!(
            "Getting transfers - scope: {scope:?}, page: {}, limit: {}, range: {range:?}, search: {search:?}",
            window.page, window.limit
        );

        let cond = regular_transfers(scope, range, search.as_deref());

        let (sql, values) = select_with_user()
            .cond_where(cond.clone())
            .order_by((TransferSchema::Table, TransferSchema::Tanggal), Order::Desc)
            .order_by((TransferSchema::Table, TransferSchema::CreatedAt), Order::Desc)
            .limit(window.limit as u64)
            .offset(window.offset())
            .build_sqlx(PostgresQueryBuilder);

        let transfers = sqlx::query_as_with::<_, TransferWithUser, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Error fetching transfers: {e}");
                AppError::SqlxError(e)
            })?;

        let (count_sql, count_values) = Query::select()
            .expr(Func::count(Expr::col(Asterisk)))
            .from(TransferSchema::Table)
            .cond_where(cond)
            .build_sqlx(PostgresQueryBuilder);

        let (total,) = sqlx::query_as_with::<_, (i64,), _>(&count_sql, count_values)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Error counting transfers: {e}");
                AppError::SqlxError(e)
            })?;

        info!("Found {} transfers out of total {total}", transfers.len());

        Ok((transfers, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Transfer>, AppError> {
        let (sql, values) = Query::select()
            .columns(TRANSFER_COLUMNS)
            .from(TransferSchema::Table)
            .and_where(Expr::col(TransferSchema::TransferId).eq(id))
            .build_sqlx(PostgresQueryBuilder);

        let transfer = sqlx::query_as_with::<_, Transfer, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(transfer)
    }

    async fn create(
        &self,
        user_id: i32,
        input: &CreateTransferRequest,
    ) -> Result<(Transfer, Saldo), AppError> {
        info!(
            "Creating transfer of {} to {} for user {user_id}",
            input.nominal, input.bank_tujuan
        );

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
                TransferSchema::FotoStruk,
                TransferSchema::CreatedAt,
                TransferSchema::UpdatedAt,
            ])
            .values([
                user_id.into(),
                input.tanggal.unwrap_or_else(today).into(),
                input.bank_tujuan.clone().into(),
                input.nomor_rekening.clone().into(),
                input.nama_pemilik.clone().into(),
                input.nominal.into(),
                input.biaya.unwrap_or(0).into(),
                input.keterangan.clone().into(),
                LedgerStatus::Pending.as_str().into(),
                input.foto_struk.clone().into(),
                now.into(),
                now.into(),
            ])?
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let transfer = sqlx::query_as_with::<_, Transfer, _>(&sql, values)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                error!("Failed to insert transfer: {e}");
                AppError::SqlxError(e)
            })?;

        // simpan tujuan sebagai favorit, duplikat diabaikan
        let (sql, values) = Query::insert()
            .into_table(FavoritSchema::Table)
            .columns([
                FavoritSchema::UserId,
                FavoritSchema::BankTujuan,
                FavoritSchema::NomorRekening,
                FavoritSchema::NamaPemilik,
                FavoritSchema::CreatedAt,
            ])
            .values([
                user_id.into(),
                input.bank_tujuan.clone().into(),
                input.nomor_rekening.clone().into(),
                input.nama_pemilik.clone().into(),
                now.into(),
            ])?
            .on_conflict(
                OnConflict::columns([
                    FavoritSchema::UserId,
                    FavoritSchema::BankTujuan,
                    FavoritSchema::NomorRekening,
                    FavoritSchema::NamaPemilik,
                ])
                .do_nothing()
                .to_owned(),
            )
            .build_sqlx(PostgresQueryBuilder);

        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let saldo = recompute_balance(&mut tx, user_id).await?;

        tx.commit().await?;

        info!(
            "Transfer {} created, saldo {}",
            transfer.transfer_id, saldo.total_saldo
        );

        Ok((transfer, saldo))
    }

    async fn update(
        &self,
        id: i32,
        input: &UpdateTransferRequest,
    ) -> Result<(Transfer, Saldo), AppError> {
        info!("Updating transfer {id}");

        let mut tx = self.db_pool.begin().await?;

        let user_id = Self::owner_of(&mut tx, id).await?;
        lock_user_ledger(&mut tx, user_id).await?;

        let (sql, values) = Query::update()
            .table(TransferSchema::Table)
            .values([
                (TransferSchema::Tanggal, input.tanggal.into()),
                (TransferSchema::BankTujuan, input.bank_tujuan.clone().into()),
                (
                    TransferSchema::NomorRekening,
                    input.nomor_rekening.clone().into(),
                ),
                (TransferSchema::NamaPemilik, input.nama_pemilik.clone().into()),
                (TransferSchema::Nominal, input.nominal.into()),
                (TransferSchema::Biaya, input.biaya.into()),
                (TransferSchema::Keterangan, input.keterangan.clone().into()),
                (TransferSchema::Status, input.status.as_str().into()),
                (TransferSchema::FotoStruk, input.foto_struk.clone().into()),
                (TransferSchema::UpdatedAt, Utc::now().naive_utc().into()),
            ])
            .and_where(Expr::col(TransferSchema::TransferId).eq(id))
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let transfer = sqlx::query_as_with::<_, Transfer, _>(&sql, values)
            .fetch_one(&mut *tx)
            .await?;

        let saldo = recompute_balance(&mut tx, user_id).await?;

        tx.commit().await?;

        info!("Transfer {id} updated, saldo {}", saldo.total_saldo);

        Ok((transfer, saldo))
    }

    async fn update_status(&self, id: i32, status: LedgerStatus) -> Result<Transfer, AppError> {
        info!("Setting status of transfer {id} to {status}");

        let (sql, values) = Query::update()
            .table(TransferSchema::Table)
            .value(TransferSchema::Status, status.as_str())
            .value(TransferSchema::UpdatedAt, Utc::now().naive_utc())
            .and_where(Expr::col(TransferSchema::TransferId).eq(id))
            .and_where(Expr::col(TransferSchema::BankTujuan).ne(SETOR_ADMIN_BANK))
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let transfer = sqlx::query_as_with::<_, Transfer, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Transfer with id {id} not found")))?;

        Ok(transfer)
    }

    async fn find_favorites(
        &self,
        scope: Scope,
        search: Option<String>,
        limit: u64,
    ) -> Result<Vec<TransferFavorit>, AppError> {
        let mut query = Query::select();
        query
            .columns([
                FavoritSchema::FavoritId,
                FavoritSchema::UserId,
                FavoritSchema::BankTujuan,
                FavoritSchema::NomorRekening,
                FavoritSchema::NamaPemilik,
                FavoritSchema::CreatedAt,
            ])
            .from(FavoritSchema::Table)
            .cond_where(scope_condition(scope, FavoritSchema::UserId))
            .order_by(FavoritSchema::CreatedAt, Order::Desc)
            .limit(limit.min(FAVORIT_LIMIT_MAX));

        if let Some(term) = search {
            let pattern = contains_pattern(&term);
            let mut any = Condition::any();
            for col in [
                FavoritSchema::NamaPemilik,
                FavoritSchema::NomorRekening,
                FavoritSchema::BankTujuan,
            ] {
                any = any.add(Expr::expr(Func::lower(Expr::col(col))).like(pattern.clone()));
            }
            query.cond_where(any);
        }

        let (sql, values) = query.build_sqlx(PostgresQueryBuilder);

        let favorites = sqlx::query_as_with::<_, TransferFavorit, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await?;

        Ok(favorites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn listing_hides_setor_admin_and_searches_lowercased() {
        let range = DateRange::new(NaiveDate::from_ymd_opt(2025, 6, 1), None);
        let sql = select_with_user()
            .cond_where(regular_transfers(Scope::User(4), range, Some("BCA")))
            .to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#""transfer"."bank_tujuan" <> 'SETOR_ADMIN'"#));
        assert!(sql.contains(r#""transfer"."user_id" = 4"#));
        assert!(sql.contains(r#""transfer"."tanggal" >= '2025-06-01'"#));
        assert!(sql.contains(r#"LOWER("transfer"."nama_pemilik") LIKE '%bca%'"#));
        assert!(sql.contains(r#"INNER JOIN "users""#));
        assert!(sql.contains("ESCAPE"));
    }

    #[test]
    fn search_wildcards_match_literally() {
        let sql = select_with_user()
            .cond_where(regular_transfers(
                Scope::All,
                DateRange::default(),
                Some("50%_Off"),
            ))
            .to_string(PostgresQueryBuilder);

        // rendered inside E'' the escape character is doubled
        assert!(
            sql.contains(r"50\%\_off") || sql.contains(r"50\\%\\_off"),
            "{sql}"
        );
        assert!(!sql.contains("'%50%_off%'"));
    }
}
