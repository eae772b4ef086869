use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        context::RequestContext,
        request::{
            CreateTransferRequest, DateRange, FindAllTransferRequest, FindFavoritRequest,
            LedgerStatus, PageWindow, UpdateTransferRequest, UpdateTransferStatusRequest,
        },
        response::{
            ApiResponse, ApiResponsePagination, ErrorResponse, LedgerWriteResponse,
            transfer::{TransferFavoritResponse, TransferResponse},
        },
        scope::Scope,
    },
    model::{
        saldo::Saldo,
        transfer::{Transfer, TransferFavorit, TransferWithUser},
    },
    utils::AppError,
};

pub type DynTransferRepository = Arc<dyn TransferRepositoryTrait + Send + Sync>;
pub type DynTransferService = Arc<dyn TransferServiceTrait + Send + Sync>;

/// Regular transfers only; setor admin rows live behind the setor traits.
#[async_trait]
pub trait TransferRepositoryTrait {
    async fn find_all(
        &self,
        scope: Scope,
        window: PageWindow,
        range: DateRange,
        search: Option<String>,
    ) -> Result<(Vec<TransferWithUser>, i64), AppError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Transfer>, AppError>;
    /// Also remembers the destination as a favourite.
    async fn create(
        &self,
        user_id: i32,
        input: &CreateTransferRequest,
    ) -> Result<(Transfer, Saldo), AppError>;
    async fn update(
        &self,
        id: i32,
        input: &UpdateTransferRequest,
    ) -> Result<(Transfer, Saldo), AppError>;
    async fn update_status(&self, id: i32, status: LedgerStatus) -> Result<Transfer, AppError>;
    async fn find_favorites(
        &self,
        scope: Scope,
        search: Option<String>,
        limit: u64,
    ) -> Result<Vec<TransferFavorit>, AppError>;
}

#[async_trait]
pub trait TransferServiceTrait {
    async fn get_transfers(
        &self,
        ctx: &RequestContext,
        req: &FindAllTransferRequest,
    ) -> Result<ApiResponsePagination<Vec<TransferResponse>>, ErrorResponse>;
    async fn create_transfer(
        &self,
        ctx: &RequestContext,
        input: &CreateTransferRequest,
    ) -> Result<ApiResponse<LedgerWriteResponse<TransferResponse>>, ErrorResponse>;
    async fn update_transfer(
        &self,
        ctx: &RequestContext,
        id: i32,
        input: &UpdateTransferRequest,
    ) -> Result<ApiResponse<LedgerWriteResponse<TransferResponse>>, ErrorResponse>;
    async fn update_status(
        &self,
        ctx: &RequestContext,
        id: i32,
        input: &UpdateTransferStatusRequest,
    ) -> Result<ApiResponse<TransferResponse>, ErrorResponse>;
    async fn get_favorites(
        &self,
        ctx: &RequestContext,
        req: &FindFavoritRequest,
    ) -> Result<ApiResponse<Vec<TransferFavoritResponse>>, ErrorResponse>;
}
