use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{
    context::ClientMeta,
    request::auth::LoginRequest,
    response::{ApiResponse, ErrorResponse, auth::LoginResponse, user::UserResponse},
};

pub type DynAuthService = Arc<dyn AuthServiceTrait + Send + Sync>;

#[async_trait]
pub trait AuthServiceTrait {
    async fn login_user(
        &self,
        input: &LoginRequest,
        client: ClientMeta,
    ) -> Result<ApiResponse<LoginResponse>, ErrorResponse>;
    async fn get_me(&self, id: i32) -> Result<ApiResponse<UserResponse>, ErrorResponse>;
}
