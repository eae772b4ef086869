use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::response::user::UserResponse;

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}
