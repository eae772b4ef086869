use crate::{
    model::transfer_debit::{TransferDebit, TransferDebitWithUser},
    utils::to_utc,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone)]
pub struct TransferDebitResponse {
    pub id: i32,
    pub user_id: i32,
    pub tanggal: NaiveDate,
    pub biaya: i64,
    pub keterangan: Option<String>,
    pub status: String,
    pub foto_struk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[schema(format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<TransferDebit> for TransferDebitResponse {
    fn from(value: TransferDebit) -> Self {
        TransferDebitResponse {
            id: value.transfer_debit_id,
            user_id: value.user_id,
            tanggal: value.tanggal,
            biaya: value.biaya,
            keterangan: value.keterangan,
            status: value.status,
            foto_struk: value.foto_struk,
            username: None,
            created_at: to_utc(value.created_at),
        }
    }
}

impl From<TransferDebitWithUser> for TransferDebitResponse {
    fn from(value: TransferDebitWithUser) -> Self {
        TransferDebitResponse {
            username: Some(value.username),
            ..TransferDebitResponse::from(value.transfer_debit)
        }
    }
}
