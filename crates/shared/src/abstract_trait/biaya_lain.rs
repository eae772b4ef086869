use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        context::RequestContext,
        request::{CreateBiayaLainRequest, ScopeQuery},
        response::{ApiResponse, ErrorResponse, biaya_lain::BiayaLainResponse},
        scope::Scope,
    },
    model::biaya_lain::{BiayaLain, BiayaLainWithUser},
    utils::AppError,
};

pub type DynBiayaLainRepository = Arc<dyn BiayaLainRepositoryTrait + Send + Sync>;
pub type DynBiayaLainService = Arc<dyn BiayaLainServiceTrait + Send + Sync>;

#[async_trait]
pub trait BiayaLainRepositoryTrait {
    async fn find_all(&self, scope: Scope) -> Result<Vec<BiayaLainWithUser>, AppError>;
    async fn create(
        &self,
        user_id: i32,
        input: &CreateBiayaLainRequest,
    ) -> Result<BiayaLain, AppError>;
}

#[async_trait]
pub trait BiayaLainServiceTrait {
    async fn get_biaya_lain(
        &self,
        ctx: &RequestContext,
        query: &ScopeQuery,
    ) -> Result<ApiResponse<Vec<BiayaLainResponse>>, ErrorResponse>;
    async fn create_biaya_lain(
        &self,
        ctx: &RequestContext,
        input: &CreateBiayaLainRequest,
    ) -> Result<ApiResponse<BiayaLainResponse>, ErrorResponse>;
}
