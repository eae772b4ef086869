use crate::{model::user::User, utils::to_utc};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub role: String,
    pub status: String,
    #[schema(format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,

    #[schema(format = "date-time")]
    pub updated_at: Option<DateTime<Utc>>,
}

// dari database record ke response, tanpa hash password
impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        UserResponse {
            id: value.user_id,
            username: value.username,
            role: value.role,
            status: value.status,
            created_at: to_utc(value.created_at),
            updated_at: to_utc(value.updated_at),
        }
    }
}
