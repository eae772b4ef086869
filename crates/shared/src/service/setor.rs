use async_trait::async_trait;
use opentelemetry::KeyValue;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    abstract_trait::{DynActivityLogService, DynSetorRepository, SetorServiceTrait},
    domain::{
        context::RequestContext,
        request::{ApproveSetorRequest, CreateSetorRequest, LogAction, NewActivityLog, ScopeQuery},
        response::{ApiResponse, ErrorResponse, LedgerWriteResponse, transfer::TransferResponse},
    },
    utils::{AppError, Method, Metrics, Observer},
};

#[derive(Clone)]
pub struct SetorService {
    repository: DynSetorRepository,
    activity_log: DynActivityLogService,
    observer: Observer,
}

impl std::fmt::Debug for SetorService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SetorService")
            .field("repository", &"DynSetorRepository")
            .finish()
    }
}

impl SetorService {
    pub fn new(
        repository: DynSetorRepository,
        activity_log: DynActivityLogService,
        metrics: Arc<Mutex<Metrics>>,
    ) -> Self {
        Self {
            repository,
            activity_log,
            observer: Observer::new("setor-service", metrics),
        }
    }
}

#[async_trait]
impl SetorServiceTrait for SetorService {
    async fn get_setors(
        &self,
        ctx: &RequestContext,
        query: &ScopeQuery,
    ) -> Result<ApiResponse<Vec<TransferResponse>>, ErrorResponse> {
        let method = Method::Get;
        let tracing_ctx = self
            .observer
            .start("GetSetorAdmin", vec![KeyValue::new("component", "setor")]);

        let result = async {
            let scope = ctx.scope(query.cashier_id.as_deref())?;

            let setors = self
                .repository
                .find_all(scope)
                .await?
                .into_iter()
                .map(TransferResponse::from)
                .collect();

            Ok::<_, AppError>(ApiResponse::success(
                "Setor admin retrieved successfully",
                setors,
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Setor admin retrieved")
            .await
    }

    async fn create_setor(
        &self,
        ctx: &RequestContext,
        input: &CreateSetorRequest,
    ) -> Result<ApiResponse<LedgerWriteResponse<TransferResponse>>, ErrorResponse> {
        let method = Method::Post;
        let tracing_ctx = self.observer.start(
            "CreateSetorAdmin",
            vec![
                KeyValue::new("component", "setor"),
                KeyValue::new("setor.nominal", input.nominal),
            ],
        );

        let result = async {
            let (setor, saldo) = self.repository.create(ctx.user_id, input).await?;
            let record = TransferResponse::from(setor);

            self.activity_log
                .record(
                    NewActivityLog::new(ctx, LogAction::Insert, "transfer")
                        .record(record.id)
                        .new_values(&record),
                )
                .await;

            Ok::<_, AppError>(ApiResponse::success(
                "Setor admin created successfully",
                LedgerWriteResponse {
                    record,
                    total_saldo: saldo.total_saldo,
                },
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Setor admin created")
            .await
    }

    async fn approve_setor(
        &self,
        ctx: &RequestContext,
        id: i32,
        input: &ApproveSetorRequest,
    ) -> Result<ApiResponse<LedgerWriteResponse<TransferResponse>>, ErrorResponse> {
        let method = Method::Put;
        let tracing_ctx = self.observer.start(
            "ApproveSetorAdmin",
            vec![
                KeyValue::new("component", "setor"),
                KeyValue::new("setor.id", id.to_string()),
                KeyValue::new("setor.status", input.status.as_str()),
            ],
        );

        let result = async {
            ctx.ensure_owner()?;

            let old = self
                .repository
                .find_by_id(id)
                .await?
                .map(TransferResponse::from)
                .ok_or_else(|| AppError::NotFound(format!("Setor admin with id {id} not found")))?;

            let (setor, saldo) = self
                .repository
                .approve(id, input.status, input.nominal)
                .await?;
            let record = TransferResponse::from(setor);

            self.activity_log
                .record(
                    NewActivityLog::new(ctx, LogAction::UpdateStatus, "transfer")
                        .record(id)
                        .old_values(&old)
                        .new_values(&record),
                )
                .await;

            Ok::<_, AppError>(ApiResponse::success(
                "Setor admin updated successfully",
                LedgerWriteResponse {
                    record,
                    total_saldo: saldo.total_saldo,
                },
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Setor admin updated")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{context::Role, request::LedgerStatus},
        service::testing::{FakeLedger, RecordingActivityLog, ctx, metrics},
    };
    use axum::http::StatusCode;

    fn service() -> (SetorService, Arc<FakeLedger>, Arc<RecordingActivityLog>) {
        let ledger = Arc::new(FakeLedger::default());
        let activity_log = Arc::new(RecordingActivityLog::default());
        let service = SetorService::new(ledger.clone(), activity_log.clone(), metrics());
        (service, ledger, activity_log)
    }

    fn hand_off(nominal: i64) -> CreateSetorRequest {
        CreateSetorRequest {
            nominal,
            keterangan: Some("setoran sore".into()),
        }
    }

    #[tokio::test]
    async fn hand_off_enters_the_balance_as_pending() {
        let (service, _, activity_log) = service();

        let response = service
            .create_setor(&ctx(Role::Kasir, 2), &hand_off(500_000))
            .await
            .unwrap();

        assert_eq!(response.data.total_saldo, 500_000);
        assert_eq!(response.data.record.bank_tujuan, "SETOR_ADMIN");
        assert_eq!(response.data.record.status, "pending");
        assert_eq!(activity_log.actions(), vec!["INSERT:transfer"]);
    }

    #[tokio::test]
    async fn only_the_owner_approves() {
        let (service, ledger, _) = service();
        service
            .create_setor(&ctx(Role::Kasir, 2), &hand_off(500_000))
            .await
            .unwrap();

        let input = ApproveSetorRequest {
            status: LedgerStatus::Lunas,
            nominal: None,
        };
        let err = service
            .approve_setor(&ctx(Role::Kasir, 2), 1, &input)
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ledger.setors.lock().unwrap()[0].status, "pending");
    }

    #[tokio::test]
    async fn corrected_nominal_moves_the_balance() {
        let (service, ledger, activity_log) = service();
        service
            .create_setor(&ctx(Role::Kasir, 2), &hand_off(500_000))
            .await
            .unwrap();

        let response = service
            .approve_setor(
                &ctx(Role::Owner, 1),
                1,
                &ApproveSetorRequest {
                    status: LedgerStatus::Lunas,
                    nominal: Some(450_000),
                },
            )
            .await
            .unwrap();

        assert_eq!(response.data.record.status, "lunas");
        assert_eq!(response.data.record.nominal, 450_000);
        assert_eq!(response.data.total_saldo, 450_000);
        assert_eq!(ledger.balance_of(2), Some(450_000));
        assert_eq!(
            activity_log.actions(),
            vec!["INSERT:transfer", "UPDATE_STATUS:transfer"]
        );
    }

    #[tokio::test]
    async fn approving_an_unknown_hand_off_is_not_found() {
        let (service, _, _) = service();

        let err = service
            .approve_setor(
                &ctx(Role::Owner, 1),
                42,
                &ApproveSetorRequest {
                    status: LedgerStatus::Lunas,
                    nominal: None,
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Setor admin with id 42 not found");
    }
}
