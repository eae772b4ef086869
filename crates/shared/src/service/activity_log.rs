use async_trait::async_trait;
use opentelemetry::KeyValue;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::{
    abstract_trait::{ActivityLogServiceTrait, DynActivityLogRepository},
    domain::{
        context::RequestContext,
        request::{FindAllLogRequest, NewActivityLog},
        response::{
            ApiResponsePagination, ErrorResponse, activity_log::ActivityLogResponse,
            pagination::Pagination,
        },
    },
    utils::{AppError, Method, Metrics, Observer},
};

#[derive(Clone)]
pub struct ActivityLogService {
    repository: DynActivityLogRepository,
    observer: Observer,
}

impl std::fmt::Debug for ActivityLogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityLogService")
            .field("repository", &"DynActivityLogRepository")
            .finish()
    }
}

impl ActivityLogService {
    pub fn new(repository: DynActivityLogRepository, metrics: Arc<Mutex<Metrics>>) -> Self {
        Self {
            repository,
            observer: Observer::new("activity-log-service", metrics),
        }
    }
}

#[async_trait]
impl ActivityLogServiceTrait for ActivityLogService {
    async fn record(&self, entry: NewActivityLog) {
        match self.repository.create(&entry).await {
            Ok(()) => info!(
                "Logged {} on {} by {:?}",
                entry.action, entry.table_name, entry.user_id
            ),
            Err(e) => error!(
                "Activity log lost: {} on {} record {:?}: {e}",
                entry.action, entry.table_name, entry.record_id
            ),
        }
    }

    async fn get_logs(
        &self,
        ctx: &RequestContext,
        req: &FindAllLogRequest,
    ) -> Result<ApiResponsePagination<Vec<ActivityLogResponse>>, ErrorResponse> {
        let method = Method::Get;
        let window = req.window();

        let tracing_ctx = self.observer.start(
            "GetActivityLogs",
            vec![
                KeyValue::new("component", "activity_log"),
                KeyValue::new("page", window.page.to_string()),
                KeyValue::new("limit", window.limit.to_string()),
            ],
        );

        let result = async {
            ctx.ensure_owner()?;

            let (logs, total) = self.repository.find_all(req).await?;

            Ok::<_, AppError>(ApiResponsePagination {
                status: "success".to_string(),
                message: "Activity logs retrieved successfully".to_string(),
                data: logs.into_iter().map(ActivityLogResponse::from).collect(),
                pagination: Pagination::new(window, total),
            })
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Activity logs retrieved")
            .await
    }
}
