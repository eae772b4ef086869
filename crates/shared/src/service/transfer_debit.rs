use async_trait::async_trait;
use opentelemetry::KeyValue;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    abstract_trait::{
        DynActivityLogService, DynTransferDebitRepository, TransferDebitServiceTrait,
    },
    domain::{
        context::RequestContext,
        request::{
            CreateTransferDebitRequest, FindAllTransferDebitRequest, LogAction, NewActivityLog,
        },
        response::{
            ApiResponse, ApiResponsePagination, ErrorResponse, LedgerWriteResponse,
            pagination::Pagination, transfer_debit::TransferDebitResponse,
        },
    },
    utils::{AppError, Method, Metrics, Observer},
};

#[derive(Clone)]
pub struct TransferDebitService {
    repository: DynTransferDebitRepository,
    activity_log: DynActivityLogService,
    observer: Observer,
}

impl std::fmt::Debug for TransferDebitService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferDebitService")
            .field("repository", &"DynTransferDebitRepository")
            .finish()
    }
}

impl TransferDebitService {
    pub fn new(
        repository: DynTransferDebitRepository,
        activity_log: DynActivityLogService,
        metrics: Arc<Mutex<Metrics>>,
    ) -> Self {
        Self {
            repository,
            activity_log,
            observer: Observer::new("transfer-debit-service", metrics),
        }
    }
}

#[async_trait]
impl TransferDebitServiceTrait for TransferDebitService {
    async fn get_transfer_debits(
        &self,
        ctx: &RequestContext,
        req: &FindAllTransferDebitRequest,
    ) -> Result<ApiResponsePagination<Vec<TransferDebitResponse>>, ErrorResponse> {
        let method = Method::Get;
        let window = req.window();

        let tracing_ctx = self.observer.start(
            "GetTransferDebits",
            vec![
                KeyValue::new("component", "transfer_debit"),
                KeyValue::new("page", window.page.to_string()),
                KeyValue::new("limit", window.limit.to_string()),
            ],
        );

        let result = async {
            let scope = ctx.scope(req.cashier_id.as_deref())?;

            let (debits, total) = self.repository.find_all(scope, window, req.range()).await?;

            Ok::<_, AppError>(ApiResponsePagination {
                status: "success".to_string(),
                message: "Transfer debits retrieved successfully".to_string(),
                data: debits
                    .into_iter()
                    .map(TransferDebitResponse::from)
                    .collect(),
                pagination: Pagination::new(window, total),
            })
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Transfer debits retrieved")
            .await
    }

    async fn create_transfer_debit(
        &self,
        ctx: &RequestContext,
        input: &CreateTransferDebitRequest,
    ) -> Result<ApiResponse<LedgerWriteResponse<TransferDebitResponse>>, ErrorResponse> {
        let method = Method::Post;
        let tracing_ctx = self.observer.start(
            "CreateTransferDebit",
            vec![
                KeyValue::new("component", "transfer_debit"),
                KeyValue::new("transfer_debit.biaya", input.biaya),
            ],
        );

        let result = async {
            let (debit, saldo) = self.repository.create(ctx.user_id, input).await?;
            let record = TransferDebitResponse::from(debit);

            self.activity_log
                .record(
                    NewActivityLog::new(ctx, LogAction::Insert, "transfer_debit")
                        .record(record.id)
                        .new_values(&record),
                )
                .await;

            Ok::<_, AppError>(ApiResponse::success(
                "Transfer debit created successfully",
                LedgerWriteResponse {
                    record,
                    total_saldo: saldo.total_saldo,
                },
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Transfer debit created")
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

    fn debit(biaya: i64) -> CreateTransferDebitRequest {
        CreateTransferDebitRequest {
            tanggal: None,
            biaya,
            keterangan: Some("debit bca".into()),
            foto_struk: None,
        }
    }

    #[tokio::test]
    async fn fee_lands_on_the_writer_balance() {
        let ledger = Arc::new(FakeLedger::default());
        let activity_log = Arc::new(RecordingActivityLog::default());
        let service = TransferDebitService::new(ledger.clone(), activity_log.clone(), metrics());

        let response = service
            .create_transfer_debit(&ctx(Role::Kasir, 2), &debit(7_500))
            .await
            .unwrap();

        assert_eq!(response.data.record.user_id, 2);
        assert_eq!(response.data.record.status, "lunas");
        assert_eq!(response.data.total_saldo, 7_500);
        assert_eq!(activity_log.actions(), vec!["INSERT:transfer_debit"]);

        ledger.seed_modal(2, 100_000);
        let response = service
            .create_transfer_debit(&ctx(Role::Kasir, 2), &debit(2_500))
            .await
            .unwrap();

        assert_eq!(response.data.total_saldo, 110_000);
        assert_eq!(ledger.balance_of(2), Some(110_000));
    }
}
