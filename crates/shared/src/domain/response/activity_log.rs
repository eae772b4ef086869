use crate::{model::activity_log::ActivityLog, utils::to_utc};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone)]
pub struct ActivityLogResponse {
    pub id: i32,
    pub user_id: Option<i32>,
    pub username: Option<String>,
    pub action: String,
    pub table_name: String,
    pub record_id: Option<i32>,
    #[schema(value_type = Option<Object>)]
    pub old_values: Option<JsonValue>,
    #[schema(value_type = Option<Object>)]
    pub new_values: Option<JsonValue>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    #[schema(format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<ActivityLog> for ActivityLogResponse {
    fn from(value: ActivityLog) -> Self {
        ActivityLogResponse {
            id: value.log_id,
            user_id: value.user_id,
            username: value.username,
            action: value.action,
            table_name: value.table_name,
            record_id: value.record_id,
            old_values: value.old_values,
            new_values: value.new_values,
            ip_address: value.ip_address,
            user_agent: value.user_agent,
            created_at: to_utc(value.created_at),
        }
    }
}
