use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Saldo {
    pub saldo_id: i32,
    pub user_id: i32,
    pub total_saldo: i64,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// A user's balance joined with the account it belongs to. Users that
/// never wrote a ledger row show a zero balance.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct SaldoWithUser {
    pub user_id: i32,
    pub username: String,
    pub role: String,
    pub status: String,
    pub total_saldo: i64,
    pub updated_at: Option<NaiveDateTime>,
}
