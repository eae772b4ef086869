use crate::{
    model::transfer::{Transfer, TransferFavorit, TransferWithUser},
    utils::to_utc,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone)]
pub struct TransferResponse {
    pub id: i32,
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[schema(format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
    #[schema(format = "date-time")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Transfer> for TransferResponse {
    fn from(value: Transfer) -> Self {
        TransferResponse {
            id: value.transfer_id,
            user_id: value.user_id,
            tanggal: value.tanggal,
            bank_tujuan: value.bank_tujuan,
            nomor_rekening: value.nomor_rekening,
            nama_pemilik: value.nama_pemilik,
            nominal: value.nominal,
            biaya: value.biaya,
            keterangan: value.keterangan,
            status: value.status,
            foto_struk: value.foto_struk,
            username: None,
            created_at: to_utc(value.created_at),
            updated_at: to_utc(value.updated_at),
        }
    }
}

impl From<TransferWithUser> for TransferResponse {
    fn from(value: TransferWithUser) -> Self {
        TransferResponse {
            username: Some(value.username),
            ..TransferResponse::from(value.transfer)
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone)]
pub struct TransferFavoritResponse {
    pub id: i32,
    pub bank_tujuan: String,
    pub nomor_rekening: String,
    pub nama_pemilik: String,
    #[schema(format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<TransferFavorit> for TransferFavoritResponse {
    fn from(value: TransferFavorit) -> Self {
        TransferFavoritResponse {
            id: value.favorit_id,
            bank_tujuan: value.bank_tujuan,
            nomor_rekening: value.nomor_rekening,
            nama_pemilik: value.nama_pemilik,
            created_at: to_utc(value.created_at),
        }
    }
}
