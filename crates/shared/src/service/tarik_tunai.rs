use async_trait::async_trait;
use opentelemetry::KeyValue;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    abstract_trait::{DynActivityLogService, DynTarikTunaiRepository, TarikTunaiServiceTrait},
    domain::{
        context::RequestContext,
        request::{CreateTarikTunaiRequest, DateRangeQuery, LogAction, NewActivityLog},
        response::{
            ApiResponse, ErrorResponse, LedgerWriteResponse, tarik_tunai::TarikTunaiResponse,
        },
    },
    utils::{AppError, Method, Metrics, Observer},
};

#[derive(Clone)]
pub struct TarikTunaiService {
    repository: DynTarikTunaiRepository,
    activity_log: DynActivityLogService,
    observer: Observer,
}

impl std::fmt::Debug for TarikTunaiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TarikTunaiService")
            .field("repository", &"DynTarikTunaiRepository")
            .finish()
    }
}

impl TarikTunaiService {
    pub fn new(
        repository: DynTarikTunaiRepository,
        activity_log: DynActivityLogService,
        metrics: Arc<Mutex<Metrics>>,
    ) -> Self {
        Self {
            repository,
            activity_log,
            observer: Observer::new("tarik-tunai-service", metrics),
        }
    }
}

#[async_trait]
impl TarikTunaiServiceTrait for TarikTunaiService {
    async fn get_tarik_tunai(
        &self,
        ctx: &RequestContext,
        query: &DateRangeQuery,
    ) -> Result<ApiResponse<Vec<TarikTunaiResponse>>, ErrorResponse> {
        let method = Method::Get;
        let tracing_ctx = self.observer.start(
            "GetTarikTunai",
            vec![KeyValue::new("component", "tarik_tunai")],
        );

        let result = async {
            let scope = ctx.scope(query.cashier_id.as_deref())?;

            let withdrawals = self
                .repository
                .find_all(scope, query.range())
                .await?
                .into_iter()
                .map(TarikTunaiResponse::from)
                .collect();

            Ok::<_, AppError>(ApiResponse::success(
                "Cash withdrawals retrieved successfully",
                withdrawals,
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Cash withdrawals retrieved")
            .await
    }

    async fn create_tarik_tunai(
        &self,
        ctx: &RequestContext,
        input: &CreateTarikTunaiRequest,
    ) -> Result<ApiResponse<LedgerWriteResponse<TarikTunaiResponse>>, ErrorResponse> {
        let method = Method::Post;
        let tracing_ctx = self.observer.start(
            "CreateTarikTunai",
            vec![
                KeyValue::new("component", "tarik_tunai"),
                KeyValue::new("tarik_tunai.bank", input.bank.clone()),
                KeyValue::new("tarik_tunai.nominal", input.nominal_tarik),
            ],
        );

        let result = async {
            let (withdrawal, saldo) = self.repository.create(ctx.user_id, input).await?;
            let record = TarikTunaiResponse::from(withdrawal);

            self.activity_log
                .record(
                    NewActivityLog::new(ctx, LogAction::Insert, "tarik_tunai")
                        .record(record.id)
                        .new_values(&record),
                )
                .await;

            Ok::<_, AppError>(ApiResponse::success(
                "Cash withdrawal created successfully",
                LedgerWriteResponse {
                    record,
                    total_saldo: saldo.total_saldo,
                },
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Cash withdrawal created")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::context::Role,
        service::testing::{FakeLedger, RecordingActivityLog, ctx, metrics},
    };

    fn withdrawal(nominal_tarik: i64, biaya_tarik: Option<i64>) -> CreateTarikTunaiRequest {
        CreateTarikTunaiRequest {
            tanggal: None,
            bank: "BRI".into(),
            nominal_tarik,
            biaya_tarik,
            keterangan: None,
            foto_struk: None,
        }
    }

    fn service() -> (TarikTunaiService, Arc<FakeLedger>, Arc<RecordingActivityLog>) {
        let ledger = Arc::new(FakeLedger::default());
        let activity_log = Arc::new(RecordingActivityLog::default());
        let service = TarikTunaiService::new(ledger.clone(), activity_log.clone(), metrics());
        (service, ledger, activity_log)
    }

    #[tokio::test]
    async fn withdrawal_can_drive_the_balance_negative() {
        let (service, ledger, activity_log) = service();

        let response = service
            .create_tarik_tunai(&ctx(Role::Kasir, 3), &withdrawal(200_000, Some(2_500)))
            .await
            .unwrap();

        assert_eq!(response.data.record.nominal_tarik, 200_000);
        assert_eq!(response.data.record.biaya_tarik, 2_500);
        assert_eq!(response.data.total_saldo, -197_500);
        assert_eq!(ledger.balance_of(3), Some(-197_500));
        assert_eq!(activity_log.actions(), vec!["INSERT:tarik_tunai"]);
    }

    #[tokio::test]
    async fn balance_nets_deposits_against_withdrawals() {
        let (service, ledger, _) = service();
        ledger.seed_modal(3, 300_000);

        let response = service
            .create_tarik_tunai(&ctx(Role::Kasir, 3), &withdrawal(200_000, Some(2_500)))
            .await
            .unwrap();
        assert_eq!(response.data.total_saldo, 102_500);

        let response = service
            .create_tarik_tunai(&ctx(Role::Kasir, 3), &withdrawal(50_000, None))
            .await
            .unwrap();
        assert_eq!(response.data.record.biaya_tarik, 0);
        assert_eq!(response.data.total_saldo, 52_500);
    }
}
