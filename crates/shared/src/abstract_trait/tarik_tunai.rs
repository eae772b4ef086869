use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        context::RequestContext,
        request::{CreateTarikTunaiRequest, DateRange, DateRangeQuery},
        response::{
            ApiResponse, ErrorResponse, LedgerWriteResponse, tarik_tunai::TarikTunaiResponse,
        },
        scope::Scope,
    },
    model::{
        saldo::Saldo,
        tarik_tunai::{TarikTunai, TarikTunaiWithUser},
    },
    utils::AppError,
};

pub type DynTarikTunaiRepository = Arc<dyn TarikTunaiRepositoryTrait + Send + Sync>;
pub type DynTarikTunaiService = Arc<dyn TarikTunaiServiceTrait + Send + Sync>;

#[async_trait]
pub trait TarikTunaiRepositoryTrait {
    async fn find_all(
        &self,
        scope: Scope,
        range: DateRange,
    ) -> Result<Vec<TarikTunaiWithUser>, AppError>;
    async fn create(
        &self,
        user_id: i32,
        input: &CreateTarikTunaiRequest,
    ) -> Result<(TarikTunai, Saldo), AppError>;
}

#[async_trait]
pub trait TarikTunaiServiceTrait {
    async fn get_tarik_tunai(
        &self,
        ctx: &RequestContext,
        query: &DateRangeQuery,
    ) -> Result<ApiResponse<Vec<TarikTunaiResponse>>, ErrorResponse>;
    async fn create_tarik_tunai(
        &self,
        ctx: &RequestContext,
        input: &CreateTarikTunaiRequest,
    ) -> Result<ApiResponse<LedgerWriteResponse<TarikTunaiResponse>>, ErrorResponse>;
}
