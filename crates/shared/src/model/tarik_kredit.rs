use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct TarikKredit {
    pub tarik_kredit_id: i32,
    pub user_id: i32,
    pub tanggal: NaiveDate,
    pub nama_user: String,
    pub nominal: i64,
    pub admin_fee: i64,
    pub sisa: i64,
    pub keterangan: Option<String>,
    pub foto_struk: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct TarikKreditWithUser {
    #[sqlx(flatten)]
    pub tarik_kredit: TarikKredit,
    pub username: String,
}
