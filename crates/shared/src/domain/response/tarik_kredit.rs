use crate::{
    model::tarik_kredit::{TarikKredit, TarikKreditWithUser},
    utils::to_utc,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone)]
pub struct TarikKreditResponse {
    pub id: i32,
    pub user_id: i32,
    pub tanggal: NaiveDate,
    pub nama_user: String,
    pub nominal: i64,
    pub admin_fee: i64,
    pub sisa: i64,
    pub keterangan: Option<String>,
    pub foto_struk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[schema(format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<TarikKredit> for TarikKreditResponse {
    fn from(value: TarikKredit) -> Self {
        TarikKreditResponse {
            id: value.tarik_kredit_id,
            user_id: value.user_id,
            tanggal: value.tanggal,
            nama_user: value.nama_user,
            nominal: value.nominal,
            admin_fee: value.admin_fee,
            sisa: value.sisa,
            keterangan: value.keterangan,
            foto_struk: value.foto_struk,
            username: None,
            created_at: to_utc(value.created_at),
        }
    }
}

impl From<TarikKreditWithUser> for TarikKreditResponse {
    fn from(value: TarikKreditWithUser) -> Self {
        TarikKreditResponse {
            username: Some(value.username),
            ..TarikKreditResponse::from(value.tarik_kredit)
        }
    }
}
