use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::context::{Role, UserStatus};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 100, message = "Username must be 3-100 characters"))]
    pub username: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub role: Role,

    pub status: Option<UserStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 100, message = "Username must be 3-100 characters"))]
    pub username: String,

    /// Re-hashed only when present and non-empty.
    pub password: Option<String>,

    pub role: Role,

    pub status: UserStatus,
}

impl UpdateUserRequest {
    pub fn new_password(&self) -> Option<&str> {
        self.password
            .as_deref()
            .filter(|password| !password.trim().is_empty())
    }
}

/// A user row ready to insert, password already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub status: UserStatus,
}

#[derive(Debug, Clone)]
pub struct UserChanges {
    pub username: String,
    pub role: Role,
    pub status: UserStatus,
    pub password_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_password_keeps_the_old_one() {
        let mut req = UpdateUserRequest {
            username: "andi".into(),
            password: Some("   ".into()),
            role: Role::Kasir,
            status: UserStatus::Aktif,
        };
        assert_eq!(req.new_password(), None);

        req.password = Some("baru123".into());
        assert_eq!(req.new_password(), Some("baru123"));
    }

    #[test]
    fn short_username_is_rejected() {
        let req = CreateUserRequest {
            username: "ab".into(),
            password: "rahasia".into(),
            role: Role::Kasir,
            status: None,
        };
        assert!(req.validate().is_err());
    }
}
