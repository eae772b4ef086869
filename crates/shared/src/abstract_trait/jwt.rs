use crate::{config::Claims, model::user::User, utils::AppError};
use std::sync::Arc;

use anyhow::Result;

pub trait JwtServiceTrait: Send + Sync + std::fmt::Debug {
    fn generate_token(&self, user: &User) -> Result<String, AppError>;
    fn verify_token(&self, token: &str) -> Result<Claims, AppError>;
}

pub type DynJwtService = Arc<dyn JwtServiceTrait + Send + Sync>;
