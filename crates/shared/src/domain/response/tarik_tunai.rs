use crate::{
    model::tarik_tunai::{TarikTunai, TarikTunaiWithUser},
    utils::to_utc,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone)]
pub struct TarikTunaiResponse {
    pub id: i32,
    pub user_id: i32,
    pub tanggal: NaiveDate,
    pub bank: String,
    pub nominal_tarik: i64,
    pub biaya_tarik: i64,
    pub keterangan: Option<String>,
    pub status: String,
    pub foto_struk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[schema(format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<TarikTunai> for TarikTunaiResponse {
    fn from(value: TarikTunai) -> Self {
        TarikTunaiResponse {
            id: value.tarik_tunai_id,
            user_id: value.user_id,
            tanggal: value.tanggal,
            bank: value.bank,
            nominal_tarik: value.nominal_tarik,
            biaya_tarik: value.biaya_tarik,
            keterangan: value.keterangan,
            status: value.status,
            foto_struk: value.foto_struk,
            username: None,
            created_at: to_utc(value.created_at),
        }
    }
}

impl From<TarikTunaiWithUser> for TarikTunaiResponse {
    fn from(value: TarikTunaiWithUser) -> Self {
        TarikTunaiResponse {
            username: Some(value.username),
            ..TarikTunaiResponse::from(value.tarik_tunai)
        }
    }
}
