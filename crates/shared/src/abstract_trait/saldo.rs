use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        context::RequestContext,
        request::ScopeQuery,
        response::{
            ApiResponse, ErrorResponse,
            saldo::{SaldoResponse, TotalSaldoResponse, UserSaldoResponse},
        },
        scope::Scope,
    },
    model::saldo::{Saldo, SaldoWithUser},
    utils::AppError,
};

pub type DynSaldoRepository = Arc<dyn SaldoRepositoryTrait + Send + Sync>;
pub type DynSaldoService = Arc<dyn SaldoServiceTrait + Send + Sync>;

#[async_trait]
pub trait SaldoRepositoryTrait {
    /// Rebuilds the user's balance from the ledger in its own transaction.
    async fn recompute(&self, user_id: i32) -> Result<Saldo, AppError>;
    async fn find_by_user_id(&self, user_id: i32) -> Result<Option<Saldo>, AppError>;
    async fn find_all_with_user(&self) -> Result<Vec<SaldoWithUser>, AppError>;
    async fn total(&self, scope: Scope) -> Result<i64, AppError>;
}

#[async_trait]
pub trait SaldoServiceTrait {
    async fn get_saldos(
        &self,
        ctx: &RequestContext,
    ) -> Result<ApiResponse<Vec<UserSaldoResponse>>, ErrorResponse>;
    async fn get_saldo_user(
        &self,
        ctx: &RequestContext,
        user_id: i32,
    ) -> Result<ApiResponse<SaldoResponse>, ErrorResponse>;
    async fn get_total(
        &self,
        ctx: &RequestContext,
        query: &ScopeQuery,
    ) -> Result<ApiResponse<TotalSaldoResponse>, ErrorResponse>;
    async fn recompute(
        &self,
        ctx: &RequestContext,
        user_id: i32,
    ) -> Result<ApiResponse<SaldoResponse>, ErrorResponse>;
}
