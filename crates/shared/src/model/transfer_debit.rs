use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct TransferDebit {
    pub transfer_debit_id: i32,
    pub user_id: i32,
    pub tanggal: NaiveDate,
    pub biaya: i64,
    pub keterangan: Option<String>,
    pub status: String,
    pub foto_struk: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct TransferDebitWithUser {
    #[sqlx(flatten)]
    pub transfer_debit: TransferDebit,
    pub username: String,
}
