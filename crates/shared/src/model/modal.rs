use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Modal {
    pub modal_id: i32,
    pub user_id: i32,
    pub modal_type: String,
    pub nominal: i64,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct ModalWithUser {
    #[sqlx(flatten)]
    pub modal: Modal,
    pub username: String,
}
