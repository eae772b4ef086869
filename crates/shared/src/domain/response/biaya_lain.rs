use crate::{
    model::biaya_lain::{BiayaLain, BiayaLainWithUser},
    utils::to_utc,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone)]
pub struct BiayaLainResponse {
    pub id: i32,
    pub user_id: i32,
    pub tanggal: NaiveDate,
    pub biaya: i64,
    pub keterangan: Option<String>,
    pub foto_struk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[schema(format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<BiayaLain> for BiayaLainResponse {
    fn from(value: BiayaLain) -> Self {
        BiayaLainResponse {
            id: value.biaya_lain_id,
            user_id: value.user_id,
            tanggal: value.tanggal,
            biaya: value.biaya,
            keterangan: value.keterangan,
            foto_struk: value.foto_struk,
            username: None,
            created_at: to_utc(value.created_at),
        }
    }
}

impl From<BiayaLainWithUser> for BiayaLainResponse {
    fn from(value: BiayaLainWithUser) -> Self {
        BiayaLainResponse {
            username: Some(value.username),
            ..BiayaLainResponse::from(value.biaya_lain)
        }
    }
}
