use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// `bank_tujuan` of the transfer rows that record a cash hand-off to the
/// owner.
pub const SETOR_ADMIN_BANK: &str = "SETOR_ADMIN";

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Transfer {
    pub transfer_id: i32,
    pub user_id: i32,
    pub tanggal: NaiveDate,
    pub bank_tujuan: String,
    pub nomor_rekening: String,
    pub nama_pemilik: String,
    pub nominal: i64,
    pub biaya: i64,
    pub keterangan: Option<String>,
    pub status: String,
    pub foto_struk: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct TransferWithUser {
    #[sqlx(flatten)]
    pub transfer: Transfer,
    pub username: String,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct TransferFavorit {
    pub favorit_id: i32,
    pub user_id: i32,
    pub bank_tujuan: String,
    pub nomor_rekening: String,
    pub nama_pemilik: String,
    pub created_at: Option<NaiveDateTime>,
}
