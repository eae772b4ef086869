use crate::{
    model::saldo::{Saldo, SaldoWithUser},
    utils::to_utc,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone)]
pub struct SaldoResponse {
    pub user_id: i32,
    pub total_saldo: i64,
    #[schema(format = "date-time")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Saldo> for SaldoResponse {
    fn from(value: Saldo) -> Self {
        SaldoResponse {
            user_id: value.user_id,
            total_saldo: value.total_saldo,
            updated_at: to_utc(value.updated_at),
        }
    }
}

impl SaldoResponse {
    /// Balance of a user that has never written a ledger row.
    pub fn empty(user_id: i32) -> Self {
        SaldoResponse {
            user_id,
            total_saldo: 0,
            updated_at: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone)]
pub struct UserSaldoResponse {
    pub user_id: i32,
    pub username: String,
    pub role: String,
    pub status: String,
    pub total_saldo: i64,
    #[schema(format = "date-time")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<SaldoWithUser> for UserSaldoResponse {
    fn from(value: SaldoWithUser) -> Self {
        UserSaldoResponse {
            user_id: value.user_id,
            username: value.username,
            role: value.role,
            status: value.status,
            total_saldo: value.total_saldo,
            updated_at: to_utc(value.updated_at),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone)]
pub struct TotalSaldoResponse {
    /// `None` when the total covers every user.
    pub user_id: Option<i32>,
    pub total_saldo: i64,
}
