use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        context::RequestContext,
        request::{CreateTarikKreditRequest, DateRange, DateRangeQuery, TarikKreditRecord},
        response::{ApiResponse, ErrorResponse, tarik_kredit::TarikKreditResponse},
        scope::Scope,
    },
    model::tarik_kredit::{TarikKredit, TarikKreditWithUser},
    utils::AppError,
};

pub type DynTarikKreditRepository = Arc<dyn TarikKreditRepositoryTrait + Send + Sync>;
pub type DynTarikKreditService = Arc<dyn TarikKreditServiceTrait + Send + Sync>;

#[async_trait]
pub trait TarikKreditRepositoryTrait {
    async fn find_all(
        &self,
        scope: Scope,
        range: DateRange,
    ) -> Result<Vec<TarikKreditWithUser>, AppError>;
    async fn create(
        &self,
        user_id: i32,
        input: &TarikKreditRecord,
    ) -> Result<TarikKredit, AppError>;
}

#[async_trait]
pub trait TarikKreditServiceTrait {
    async fn get_tarik_kredit(
        &self,
        ctx: &RequestContext,
        query: &DateRangeQuery,
    ) -> Result<ApiResponse<Vec<TarikKreditResponse>>, ErrorResponse>;
    async fn create_tarik_kredit(
        &self,
        ctx: &RequestContext,
        input: &CreateTarikKreditRequest,
    ) -> Result<ApiResponse<TarikKreditResponse>, ErrorResponse>;
}
