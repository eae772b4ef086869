use crate::{
    abstract_trait::JwtServiceTrait,
    domain::context::Role,
    model::user::User,
    utils::AppError,
};
use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind as JwtError,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub jwt_secret: String,
}

impl JwtConfig {
    pub fn new(jwt_secret: &str) -> Self {
        JwtConfig {
            jwt_secret: jwt_secret.to_string(),
        }
    }
}

impl JwtServiceTrait for JwtConfig {
    fn generate_token(&self, user: &User) -> Result<String, AppError> {
        let role = user.role.parse::<Role>()?;

        let now = Utc::now();
        let claims = Claims {
            user_id: user.user_id as i64,
            username: user.username.clone(),
            role,
            iat: now.timestamp() as usize,
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(AppError::TokenGenerationError)
    }

    fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_ref());

        match decode::<Claims>(token, &decoding_key, &Validation::default()) {
            Ok(token_data) => Ok(token_data.claims),
            Err(err) => {
                if let JwtError::ExpiredSignature = err.kind() {
                    Err(AppError::TokenExpiredError)
                } else {
                    warn!("Error decoding token: {err:?}");
                    Err(AppError::TokenValidationError)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> User {
        User {
            user_id: 7,
            username: "sari".into(),
            password: "hash".into(),
            role: role.into(),
            status: "aktif".into(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn token_carries_identity_and_role() {
        let jwt = JwtConfig::new("secret");
        let token = jwt.generate_token(&user("owner")).unwrap();

        let claims = jwt.verify_token(&token).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.username, "sari");
        assert_eq!(claims.role, Role::Owner);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = JwtConfig::new("one")
            .generate_token(&user("kasir"))
            .unwrap();

        assert!(matches!(
            JwtConfig::new("two").verify_token(&token),
            Err(AppError::TokenValidationError)
        ));
    }
}
