use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct BiayaLain {
    pub biaya_lain_id: i32,
    pub user_id: i32,
    pub tanggal: NaiveDate,
    pub biaya: i64,
    pub keterangan: Option<String>,
    pub foto_struk: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct BiayaLainWithUser {
    #[sqlx(flatten)]
    pub biaya_lain: BiayaLain,
    pub username: String,
}
