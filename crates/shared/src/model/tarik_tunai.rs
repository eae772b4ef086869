use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct TarikTunai {
    pub tarik_tunai_id: i32,
    pub user_id: i32,
    pub tanggal: NaiveDate,
    pub bank: String,
    pub nominal_tarik: i64,
    pub biaya_tarik: i64,
    pub keterangan: Option<String>,
    pub status: String,
    pub foto_struk: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct TarikTunaiWithUser {
    #[sqlx(flatten)]
    pub tarik_tunai: TarikTunai,
    pub username: String,
}
