use async_trait::async_trait;
use opentelemetry::KeyValue;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    abstract_trait::{DynActivityLogService, DynTransferRepository, TransferServiceTrait},
    domain::{
        context::RequestContext,
        request::{
            CreateTransferRequest, FindAllTransferRequest, FindFavoritRequest, LogAction,
            NewActivityLog, UpdateTransferRequest, UpdateTransferStatusRequest,
        },
        response::{
            ApiResponse, ApiResponsePagination, ErrorResponse, LedgerWriteResponse,
            pagination::Pagination,
            transfer::{TransferFavoritResponse, TransferResponse},
        },
    },
    model::transfer::{SETOR_ADMIN_BANK, Transfer},
    utils::{AppError, Method, Metrics, Observer},
};

const FAVORITES_SHOWN: u64 = 5;

fn reject_setor_bank(bank_tujuan: &str) -> Result<(), AppError> {
    if bank_tujuan.trim().eq_ignore_ascii_case(SETOR_ADMIN_BANK) {
        return Err(AppError::BadRequest(format!(
            "{SETOR_ADMIN_BANK} is reserved for cash hand-offs to the owner"
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct TransferService {
    repository: DynTransferRepository,
    activity_log: DynActivityLogService,
    observer: Observer,
}

impl std::fmt::Debug for TransferService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferService")
            .field("repository", &"DynTransferRepository")
            .finish()
    }
}

impl TransferService {
    pub fn new(
        repository: DynTransferRepository,
        activity_log: DynActivityLogService,
        metrics: Arc<Mutex<Metrics>>,
    ) -> Self {
        Self {
            repository,
            activity_log,
            observer: Observer::new("transfer-service", metrics),
        }
    }

    async fn find_regular(&self, id: i32) -> Result<Transfer, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .filter(|transfer| transfer.bank_tujuan != SETOR_ADMIN_BANK)
            .ok_or_else(|| AppError::NotFound(format!("Transfer with id {id} not found")))
    }
}

#[async_trait]
impl TransferServiceTrait for TransferService {
    async fn get_transfers(
        &self,
        ctx: &RequestContext,
        req: &FindAllTransferRequest,
    ) -> Result<ApiResponsePagination<Vec<TransferResponse>>, ErrorResponse> {
        let method = Method::Get;
        let window = req.window();
        let search = req.search_term();

        let tracing_ctx = self.observer.start(
            "GetTransfers",
            vec![
                KeyValue::new("component", "transfer"),
                KeyValue::new("page", window.page.to_string()),
                KeyValue::new("limit", window.limit.to_string()),
                KeyValue::new("search", search.clone().unwrap_or_default()),
            ],
        );

        let result = async {
            let scope = ctx.scope(req.cashier_id.as_deref())?;

            let (transfers, total) = self
                .repository
                .find_all(scope, window, req.range(), search)
                .await?;

            Ok::<_, AppError>(ApiResponsePagination {
                status: "success".to_string(),
                message: "Transfers retrieved successfully".to_string(),
                data: transfers.into_iter().map(TransferResponse::from).collect(),
                pagination: Pagination::new(window, total),
            })
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Transfers retrieved")
            .await
    }

    async fn create_transfer(
        &self,
        ctx: &RequestContext,
        input: &CreateTransferRequest,
    ) -> Result<ApiResponse<LedgerWriteResponse<TransferResponse>>, ErrorResponse> {
        let method = Method::Post;
        let tracing_ctx = self.observer.start(
            "CreateTransfer",
            vec![
                KeyValue::new("component", "transfer"),
                KeyValue::new("transfer.bank_tujuan", input.bank_tujuan.clone()),
                KeyValue::new("transfer.nominal", input.nominal),
            ],
        );

        let result = async {
            reject_setor_bank(&input.bank_tujuan)?;

            let (transfer, saldo) = self.repository.create(ctx.user_id, input).await?;
            let record = TransferResponse::from(transfer);

            self.activity_log
                .record(
                    NewActivityLog::new(ctx, LogAction::Insert, "transfer")
                        .record(record.id)
                        .new_values(&record),
                )
                .await;

            Ok::<_, AppError>(ApiResponse::success(
                "Transfer created successfully",
                LedgerWriteResponse {
                    record,
                    total_saldo: saldo.total_saldo,
                },
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Transfer created")
            .await
    }

    async fn update_transfer(
        &self,
        ctx: &RequestContext,
        id: i32,
        input: &UpdateTransferRequest,
    ) -> Result<ApiResponse<LedgerWriteResponse<TransferResponse>>, ErrorResponse> {
        let method = Method::Put;
        let tracing_ctx = self.observer.start(
            "UpdateTransfer",
            vec![
                KeyValue::new("component", "transfer"),
                KeyValue::new("transfer.id", id.to_string()),
            ],
        );

        let result = async {
            ctx.ensure_owner()?;
            reject_setor_bank(&input.bank_tujuan)?;

            let old = TransferResponse::from(self.find_regular(id).await?);

            let (transfer, saldo) = self.repository.update(id, input).await?;
            let record = TransferResponse::from(transfer);

            self.activity_log
                .record(
                    NewActivityLog::new(ctx, LogAction::Update, "transfer")
                        .record(id)
                        .old_values(&old)
                        .new_values(&record),
                )
                .await;

            Ok::<_, AppError>(ApiResponse::success(
                "Transfer updated successfully",
                LedgerWriteResponse {
                    record,
                    total_saldo: saldo.total_saldo,
                },
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Transfer updated")
            .await
    }

    async fn update_status(
        &self,
        ctx: &RequestContext,
        id: i32,
        input: &UpdateTransferStatusRequest,
    ) -> Result<ApiResponse<TransferResponse>, ErrorResponse> {
        let method = Method::Put;
        let tracing_ctx = self.observer.start(
            "UpdateTransferStatus",
            vec![
                KeyValue::new("component", "transfer"),
                KeyValue::new("transfer.id", id.to_string()),
                KeyValue::new("transfer.status", input.status.as_str()),
            ],
        );

        let result = async {
            ctx.ensure_owner()?;

            let old = self.find_regular(id).await?;
            let transfer = TransferResponse::from(
                self.repository.update_status(id, input.status).await?,
            );

            self.activity_log
                .record(
                    NewActivityLog::new(ctx, LogAction::UpdateStatus, "transfer")
                        .record(id)
                        .old_values(&serde_json::json!({ "status": old.status }))
                        .new_values(&serde_json::json!({ "status": transfer.status })),
                )
                .await;

            Ok::<_, AppError>(ApiResponse::success(
                "Transfer status updated successfully",
                transfer,
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Transfer status updated")
            .await
    }

    async fn get_favorites(
        &self,
        ctx: &RequestContext,
        req: &FindFavoritRequest,
    ) -> Result<ApiResponse<Vec<TransferFavoritResponse>>, ErrorResponse> {
        let method = Method::Get;
        let tracing_ctx = self.observer.start(
            "GetTransferFavorites",
            vec![KeyValue::new("component", "transfer")],
        );

        let result = async {
            let scope = ctx.scope(req.cashier_id.as_deref())?;
            let search = Some(req.search.trim().to_string()).filter(|s| !s.is_empty());

            let favorites = self
                .repository
                .find_favorites(scope, search, FAVORITES_SHOWN)
                .await?
                .into_iter()
                .map(TransferFavoritResponse::from)
                .collect();

            Ok::<_, AppError>(ApiResponse::success(
                "Favorites retrieved successfully",
                favorites,
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Favorites retrieved")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::context::Role,
        domain::request::LedgerStatus,
        service::testing::{
            FakeTransferRepository, RecordingActivityLog, ctx, metrics, transfer,
        },
    };
    use axum::http::StatusCode;

    fn service() -> (TransferService, Arc<FakeTransferRepository>, Arc<RecordingActivityLog>) {
        let repository = Arc::new(FakeTransferRepository::default());
        let activity_log = Arc::new(RecordingActivityLog::default());
        let service = TransferService::new(repository.clone(), activity_log.clone(), metrics());
        (service, repository, activity_log)
    }

    fn create_request(bank_tujuan: &str) -> CreateTransferRequest {
        CreateTransferRequest {
            tanggal: None,
            bank_tujuan: bank_tujuan.to_string(),
            nomor_rekening: "7788".into(),
            nama_pemilik: "Siti".into(),
            nominal: 250_000,
            biaya: Some(2_500),
            keterangan: None,
            foto_struk: None,
        }
    }

    #[tokio::test]
    async fn create_returns_the_recomputed_balance() {
        let (service, _, activity_log) = service();
        let kasir = ctx(Role::Kasir, 2);

        service.create_transfer(&kasir, &create_request("BCA")).await.unwrap();
        let response = service
            .create_transfer(&kasir, &create_request("BRI"))
            .await
            .unwrap();

        assert_eq!(response.data.total_saldo, 505_000);
        assert_eq!(response.data.record.status, "pending");
        assert_eq!(
            activity_log.actions(),
            vec!["INSERT:transfer", "INSERT:transfer"]
        );
    }

    #[tokio::test]
    async fn setor_admin_bank_is_refused_for_regular_transfers() {
        let (service, repository, _) = service();

        let err = service
            .create_transfer(&ctx(Role::Kasir, 2), &create_request(" setor_admin "))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(repository.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn only_the_owner_changes_status() {
        let (service, repository, activity_log) = service();
        repository.seed(transfer(1, 2, "BCA", 100_000));
        let input = UpdateTransferStatusRequest {
            status: LedgerStatus::Lunas,
        };

        let err = service
            .update_status(&ctx(Role::Kasir, 2), 1, &input)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        let response = service
            .update_status(&ctx(Role::Owner, 1), 1, &input)
            .await
            .unwrap();
        assert_eq!(response.data.status, "lunas");
        assert_eq!(activity_log.actions(), vec!["UPDATE_STATUS:transfer"]);
    }

    #[tokio::test]
    async fn setor_rows_are_not_reachable_as_transfers() {
        let (service, repository, _) = service();
        repository.seed(transfer(9, 2, SETOR_ADMIN_BANK, 100_000));

        let err = service
            .update_status(
                &ctx(Role::Owner, 1),
                9,
                &UpdateTransferStatusRequest {
                    status: LedgerStatus::Lunas,
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
