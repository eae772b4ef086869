use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct ActivityLog {
    pub log_id: i32,
    pub user_id: Option<i32>,
    pub username: Option<String>,
    pub action: String,
    pub table_name: String,
    pub record_id: Option<i32>,
    pub old_values: Option<JsonValue>,
    pub new_values: Option<JsonValue>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}
