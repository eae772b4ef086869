use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use utoipa::IntoParams;

use crate::domain::{
    context::{ClientMeta, RequestContext},
    request::filter::{DateRange, PageWindow, default_limit, default_page},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogAction {
    Login,
    Insert,
    Update,
    UpdateStatus,
    Delete,
    Recompute,
}

impl LogAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogAction::Login => "LOGIN",
            LogAction::Insert => "INSERT",
            LogAction::Update => "UPDATE",
            LogAction::UpdateStatus => "UPDATE_STATUS",
            LogAction::Delete => "DELETE",
            LogAction::Recompute => "RECOMPUTE",
        }
    }
}

impl fmt::Display for LogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audit entry to be written.
#[derive(Debug, Clone)]
pub struct NewActivityLog {
    pub user_id: Option<i32>,
    pub action: LogAction,
    pub table_name: String,
    pub record_id: Option<i32>,
    pub old_values: Option<JsonValue>,
    pub new_values: Option<JsonValue>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl NewActivityLog {
    pub fn new(ctx: &RequestContext, action: LogAction, table_name: &str) -> Self {
        Self::for_user(ctx.user_id, &ctx.client, action, table_name)
    }

    pub fn for_user(
        user_id: i32,
        client: &ClientMeta,
        action: LogAction,
        table_name: &str,
    ) -> Self {
        Self {
            user_id: Some(user_id),
            action,
            table_name: table_name.to_string(),
            record_id: None,
            old_values: None,
            new_values: None,
            ip_address: client.ip_address.clone(),
            user_agent: client.user_agent.clone(),
        }
    }

    pub fn record(mut self, record_id: i32) -> Self {
        self.record_id = Some(record_id);
        self
    }

    pub fn old_values<T: Serialize>(mut self, values: &T) -> Self {
        self.old_values = serde_json::to_value(values).ok();
        self
    }

    pub fn new_values<T: Serialize>(mut self, values: &T) -> Self {
        self.new_values = serde_json::to_value(values).ok();
        self
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct FindAllLogRequest {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_limit")]
    pub limit: i32,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    pub action: Option<String>,

    #[serde(rename = "table_name")]
    pub table_name: Option<String>,

    #[serde(rename = "user_id")]
    pub user_id: Option<i32>,
}

impl FindAllLogRequest {
    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.page, self.limit)
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::Role;
    use serde_json::json;

    #[test]
    fn entry_carries_actor_and_client() {
        let ctx = RequestContext {
            user_id: 4,
            username: "tono".into(),
            role: Role::Kasir,
            client: ClientMeta {
                ip_address: Some("10.0.0.8".into()),
                user_agent: Some("curl/8".into()),
            },
        };

        let entry = NewActivityLog::new(&ctx, LogAction::UpdateStatus, "transfer")
            .record(11)
            .old_values(&json!({"status": "pending"}))
            .new_values(&json!({"status": "lunas"}));

        assert_eq!(entry.user_id, Some(4));
        assert_eq!(entry.action.as_str(), "UPDATE_STATUS");
        assert_eq!(entry.record_id, Some(11));
        assert_eq!(entry.ip_address.as_deref(), Some("10.0.0.8"));
        assert_eq!(entry.new_values, Some(json!({"status": "lunas"})));
    }
}
