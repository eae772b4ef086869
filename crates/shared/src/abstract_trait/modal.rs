use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        context::RequestContext,
        request::{CreateModalRequest, ScopeQuery, UpdateModalRequest},
        response::{ApiResponse, ErrorResponse, LedgerWriteResponse, modal::ModalResponse},
        scope::Scope,
    },
    model::{
        modal::{Modal, ModalWithUser},
        saldo::Saldo,
    },
    utils::AppError,
};

pub type DynModalRepository = Arc<dyn ModalRepositoryTrait + Send + Sync>;
pub type DynModalService = Arc<dyn ModalServiceTrait + Send + Sync>;

#[async_trait]
pub trait ModalRepositoryTrait {
    async fn find_all(&self, scope: Scope) -> Result<Vec<Modal>, AppError>;
    async fn find_history(&self, scope: Scope) -> Result<Vec<ModalWithUser>, AppError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Modal>, AppError>;
    async fn create(
        &self,
        user_id: i32,
        input: &CreateModalRequest,
    ) -> Result<(Modal, Saldo), AppError>;
    async fn update_nominal(&self, id: i32, nominal: i64) -> Result<(Modal, Saldo), AppError>;
}

#[async_trait]
pub trait ModalServiceTrait {
    async fn get_modals(
        &self,
        ctx: &RequestContext,
        query: &ScopeQuery,
    ) -> Result<ApiResponse<Vec<ModalResponse>>, ErrorResponse>;
    async fn get_history(
        &self,
        ctx: &RequestContext,
        query: &ScopeQuery,
    ) -> Result<ApiResponse<Vec<ModalResponse>>, ErrorResponse>;
    async fn create_modal(
        &self,
        ctx: &RequestContext,
        input: &CreateModalRequest,
    ) -> Result<ApiResponse<LedgerWriteResponse<ModalResponse>>, ErrorResponse>;
    async fn update_modal(
        &self,
        ctx: &RequestContext,
        id: i32,
        input: &UpdateModalRequest,
    ) -> Result<ApiResponse<LedgerWriteResponse<ModalResponse>>, ErrorResponse>;
}
