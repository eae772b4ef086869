use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

use crate::{config::Claims, domain::scope::Scope, utils::AppError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Kasir,
    Owner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Kasir => "kasir",
            Role::Owner => "owner",
        }
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kasir" => Ok(Role::Kasir),
            "owner" => Ok(Role::Owner),
            other => Err(AppError::BadRequest(format!("Unknown role: {other}"))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Aktif,
    Nonaktif,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Aktif => "aktif",
            UserStatus::Nonaktif => "nonaktif",
        }
    }
}

impl FromStr for UserStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aktif" => Ok(UserStatus::Aktif),
            "nonaktif" => Ok(UserStatus::Nonaktif),
            other => Err(AppError::BadRequest(format!("Unknown user status: {other}"))),
        }
    }
}

/// Where a request came from, recorded in the activity log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// The authenticated caller of a service operation.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub user_id: i32,
    pub username: String,
    pub role: Role,
    pub client: ClientMeta,
}

impl RequestContext {
    pub fn from_claims(claims: &Claims, client: ClientMeta) -> Self {
        Self {
            user_id: claims.user_id as i32,
            username: claims.username.clone(),
            role: claims.role,
            client,
        }
    }

    pub fn is_owner(&self) -> bool {
        self.role == Role::Owner
    }

    pub fn ensure_owner(&self) -> Result<(), AppError> {
        if self.is_owner() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "This action is only available to the owner".to_string(),
            ))
        }
    }

    pub fn scope(&self, requested_cashier: Option<&str>) -> Result<Scope, AppError> {
        Scope::resolve(self.role, self.user_id, requested_cashier)
    }

    /// A kasir may only touch rows they own; the owner may touch any row.
    pub fn ensure_can_access(&self, row_user_id: i32) -> Result<(), AppError> {
        if self.is_owner() || self.user_id == row_user_id {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "You can only modify your own records".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(role: Role) -> RequestContext {
        RequestContext {
            user_id: 3,
            username: "dewi".into(),
            role,
            client: ClientMeta::default(),
        }
    }

    #[test]
    fn kasir_cannot_act_as_owner() {
        assert!(matches!(
            ctx(Role::Kasir).ensure_owner(),
            Err(AppError::Forbidden(_))
        ));
        assert!(ctx(Role::Owner).ensure_owner().is_ok());
    }

    #[test]
    fn kasir_only_reaches_own_rows() {
        let kasir = ctx(Role::Kasir);
        assert!(kasir.ensure_can_access(3).is_ok());
        assert!(kasir.ensure_can_access(4).is_err());
        assert!(ctx(Role::Owner).ensure_can_access(4).is_ok());
    }

    #[test]
    fn roles_parse_from_their_stored_form() {
        assert_eq!("owner".parse::<Role>().unwrap(), Role::Owner);
        assert_eq!(Role::Kasir.to_string(), "kasir");
        assert!("admin".parse::<Role>().is_err());
        assert_eq!("nonaktif".parse::<UserStatus>().unwrap(), UserStatus::Nonaktif);
    }
}
