use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        context::RequestContext,
        request::{ApproveSetorRequest, CreateSetorRequest, LedgerStatus, ScopeQuery},
        response::{ApiResponse, ErrorResponse, LedgerWriteResponse, transfer::TransferResponse},
        scope::Scope,
    },
    model::{
        saldo::Saldo,
        transfer::{Transfer, TransferWithUser},
    },
    utils::AppError,
};

pub type DynSetorRepository = Arc<dyn SetorRepositoryTrait + Send + Sync>;
pub type DynSetorService = Arc<dyn SetorServiceTrait + Send + Sync>;

#[async_trait]
pub trait SetorRepositoryTrait {
    /// Pending hand-offs first, then newest.
    async fn find_all(&self, scope: Scope) -> Result<Vec<TransferWithUser>, AppError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Transfer>, AppError>;
    async fn create(
        &self,
        user_id: i32,
        input: &CreateSetorRequest,
    ) -> Result<(Transfer, Saldo), AppError>;
    async fn approve(
        &self,
        id: i32,
        status: LedgerStatus,
        nominal: Option<i64>,
    ) -> Result<(Transfer, Saldo), AppError>;
}

#[async_trait]
pub trait SetorServiceTrait {
    async fn get_setors(
        &self,
        ctx: &RequestContext,
        query: &ScopeQuery,
    ) -> Result<ApiResponse<Vec<TransferResponse>>, ErrorResponse>;
    async fn create_setor(
        &self,
        ctx: &RequestContext,
        input: &CreateSetorRequest,
    ) -> Result<ApiResponse<LedgerWriteResponse<TransferResponse>>, ErrorResponse>;
    async fn approve_setor(
        &self,
        ctx: &RequestContext,
        id: i32,
        input: &ApproveSetorRequest,
    ) -> Result<ApiResponse<LedgerWriteResponse<TransferResponse>>, ErrorResponse>;
}
