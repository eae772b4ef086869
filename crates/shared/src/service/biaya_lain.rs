use async_trait::async_trait;
use opentelemetry::KeyValue;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    abstract_trait::{BiayaLainServiceTrait, DynActivityLogService, DynBiayaLainRepository},
    domain::{
        context::RequestContext,
        request::{CreateBiayaLainRequest, LogAction, NewActivityLog, ScopeQuery},
        response::{ApiResponse, ErrorResponse, biaya_lain::BiayaLainResponse},
    },
    utils::{AppError, Method, Metrics, Observer},
};

#[derive(Clone)]
pub struct BiayaLainService {
    repository: DynBiayaLainRepository,
    activity_log: DynActivityLogService,
    observer: Observer,
}

impl std::fmt::Debug for BiayaLainService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BiayaLainService")
            .field("repository", &"DynBiayaLainRepository")
            .finish()
    }
}

impl BiayaLainService {
    pub fn new(
        repository: DynBiayaLainRepository,
        activity_log: DynActivityLogService,
        metrics: Arc<Mutex<Metrics>>,
    ) -> Self {
        Self {
            repository,
            activity_log,
            observer: Observer::new("biaya-lain-service", metrics),
        }
    }
}

#[async_trait]
impl BiayaLainServiceTrait for BiayaLainService {
    async fn get_biaya_lain(
        &self,
        ctx: &RequestContext,
        query: &ScopeQuery,
    ) -> Result<ApiResponse<Vec<BiayaLainResponse>>, ErrorResponse> {
        let method = Method::Get;
        let tracing_ctx = self
            .observer
            .start("GetBiayaLain", vec![KeyValue::new("component", "biaya_lain")]);

        let result = async {
            let scope = ctx.scope(query.cashier_id.as_deref())?;

            let fees = self
                .repository
                .find_all(scope)
                .await?
                .into_iter()
                .map(BiayaLainResponse::from)
                .collect();

            Ok::<_, AppError>(ApiResponse::success(
                "Other fees retrieved successfully",
                fees,
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Other fees retrieved")
            .await
    }

    async fn create_biaya_lain(
        &self,
        ctx: &RequestContext,
        input: &CreateBiayaLainRequest,
    ) -> Result<ApiResponse<BiayaLainResponse>, ErrorResponse> {
        let method = Method::Post;
        let tracing_ctx = self.observer.start(
            "CreateBiayaLain",
            vec![
                KeyValue::new("component", "biaya_lain"),
                KeyValue::new("biaya_lain.biaya", input.biaya),
            ],
        );

        let result = async {
            let fee = BiayaLainResponse::from(self.repository.create(ctx.user_id, input).await?);

            self.activity_log
                .record(
                    NewActivityLog::new(ctx, LogAction::Insert, "biaya_lain")
                        .record(fee.id)
                        .new_values(&fee),
                )
                .await;

            Ok::<_, AppError>(ApiResponse::success("Other fee created successfully", fee))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Other fee created")
            .await
    }
}
