use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        context::RequestContext,
        request::{
            CreateUserRequest, UpdateUserRequest,
            user::{NewUser, UserChanges},
        },
        response::{ApiResponse, ErrorResponse, user::UserResponse},
    },
    model::user::User,
    utils::AppError,
};

pub type DynUserRepository = Arc<dyn UserRepositoryTrait + Send + Sync>;
pub type DynUserService = Arc<dyn UserServiceTrait + Send + Sync>;

#[async_trait]
pub trait UserRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<User>, AppError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn username_taken(&self, username: &str, except_id: Option<i32>)
    -> Result<bool, AppError>;
    async fn count_owners(&self) -> Result<i64, AppError>;
    /// Inserts the user together with a zero `saldo` row.
    async fn create_user(&self, input: &NewUser) -> Result<User, AppError>;
    async fn update_user(&self, id: i32, input: &UserChanges) -> Result<User, AppError>;
    async fn delete_user(&self, id: i32) -> Result<(), AppError>;
}

#[async_trait]
pub trait UserServiceTrait {
    async fn get_users(
        &self,
        ctx: &RequestContext,
    ) -> Result<ApiResponse<Vec<UserResponse>>, ErrorResponse>;
    async fn create_user(
        &self,
        ctx: &RequestContext,
        input: &CreateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ErrorResponse>;
    async fn update_user(
        &self,
        ctx: &RequestContext,
        id: i32,
        input: &UpdateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ErrorResponse>;
    async fn delete_user(
        &self,
        ctx: &RequestContext,
        id: i32,
    ) -> Result<ApiResponse<()>, ErrorResponse>;
    /// Creates the first owner account when none exists yet.
    async fn bootstrap_owner(&self, username: &str, password: &str) -> Result<bool, AppError>;
}
