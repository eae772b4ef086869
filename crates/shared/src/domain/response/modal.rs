use crate::{
    model::modal::{Modal, ModalWithUser},
    utils::to_utc,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone)]
pub struct ModalResponse {
    pub id: i32,
    pub user_id: i32,
    pub modal_type: String,
    pub nominal: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[schema(format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
    #[schema(format = "date-time")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Modal> for ModalResponse {
    fn from(value: Modal) -> Self {
        ModalResponse {
            id: value.modal_id,
            user_id: value.user_id,
            modal_type: value.modal_type,
            nominal: value.nominal,
            username: None,
            created_at: to_utc(value.created_at),
            updated_at: to_utc(value.updated_at),
        }
    }
}

impl From<ModalWithUser> for ModalResponse {
    fn from(value: ModalWithUser) -> Self {
        ModalResponse {
            username: Some(value.username),
            ..ModalResponse::from(value.modal)
        }
    }
}
