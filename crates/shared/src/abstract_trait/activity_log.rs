use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        context::RequestContext,
        request::{FindAllLogRequest, NewActivityLog},
        response::{ApiResponsePagination, ErrorResponse, activity_log::ActivityLogResponse},
    },
    model::activity_log::ActivityLog,
    utils::AppError,
};

pub type DynActivityLogRepository = Arc<dyn ActivityLogRepositoryTrait + Send + Sync>;
pub type DynActivityLogService = Arc<dyn ActivityLogServiceTrait + Send + Sync>;

#[async_trait]
pub trait ActivityLogRepositoryTrait {
    async fn create(&self, entry: &NewActivityLog) -> Result<(), AppError>;
    async fn find_all(
        &self,
        filter: &FindAllLogRequest,
    ) -> Result<(Vec<ActivityLog>, i64), AppError>;
}

#[async_trait]
pub trait ActivityLogServiceTrait {
    /// Never fails the caller; write errors are only logged.
    async fn record(&self, entry: NewActivityLog);
    async fn get_logs(
        &self,
        ctx: &RequestContext,
        req: &FindAllLogRequest,
    ) -> Result<ApiResponsePagination<Vec<ActivityLogResponse>>, ErrorResponse>;
}
