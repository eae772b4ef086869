use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        context::RequestContext,
        request::{CreateTransferDebitRequest, DateRange, FindAllTransferDebitRequest, PageWindow},
        response::{
            ApiResponse, ApiResponsePagination, ErrorResponse, LedgerWriteResponse,
            transfer_debit::TransferDebitResponse,
        },
        scope::Scope,
    },
    model::{
        saldo::Saldo,
        transfer_debit::{TransferDebit, TransferDebitWithUser},
    },
    utils::AppError,
};

pub type DynTransferDebitRepository = Arc<dyn TransferDebitRepositoryTrait + Send + Sync>;
pub type DynTransferDebitService = Arc<dyn TransferDebitServiceTrait + Send + Sync>;

#[async_trait]
pub trait TransferDebitRepositoryTrait {
    async fn find_all(
        &self,
        scope: Scope,
        window: PageWindow,
        range: DateRange,
    ) -> Result<(Vec<TransferDebitWithUser>, i64), AppError>;
    async fn create(
        &self,
        user_id: i32,
        input: &CreateTransferDebitRequest,
    ) -> Result<(TransferDebit, Saldo), AppError>;
}

#[async_trait]
pub trait TransferDebitServiceTrait {
    async fn get_transfer_debits(
        &self,
        ctx: &RequestContext,
        req: &FindAllTransferDebitRequest,
    ) -> Result<ApiResponsePagination<Vec<TransferDebitResponse>>, ErrorResponse>;
    async fn create_transfer_debit(
        &self,
        ctx: &RequestContext,
        input: &CreateTransferDebitRequest,
    ) -> Result<ApiResponse<LedgerWriteResponse<TransferDebitResponse>>, ErrorResponse>;
}
