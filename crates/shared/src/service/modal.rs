use async_trait::async_trait;
use opentelemetry::KeyValue;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    abstract_trait::{
        DynActivityLogService, DynModalRepository, DynUserRepository, ModalServiceTrait,
    },
    cache::CacheStore,
    domain::{
        context::{RequestContext, Role, UserStatus},
        request::{CreateModalRequest, LogAction, NewActivityLog, ScopeQuery, UpdateModalRequest},
        response::{ApiResponse, ErrorResponse, LedgerWriteResponse, modal::ModalResponse},
    },
    service::report::MODAL_BY_TYPE_CACHE_KEY,
    utils::{AppError, Method, Metrics, Observer},
};

#[derive(Clone)]
pub struct ModalService {
    modal_repository: DynModalRepository,
    user_repository: DynUserRepository,
    activity_log: DynActivityLogService,
    cache_store: Arc<CacheStore>,
    observer: Observer,
}

impl std::fmt::Debug for ModalService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalService")
            .field("modal_repository", &"DynModalRepository")
            .field("user_repository", &"DynUserRepository")
            .finish()
    }
}

impl ModalService {
    pub fn new(
        modal_repository: DynModalRepository,
        user_repository: DynUserRepository,
        activity_log: DynActivityLogService,
        cache_store: Arc<CacheStore>,
        metrics: Arc<Mutex<Metrics>>,
    ) -> Self {
        Self {
            modal_repository,
            user_repository,
            activity_log,
            cache_store,
            observer: Observer::new("modal-service", metrics),
        }
    }

    /// Whose balance a new deposit lands on. A kasir always deposits for
    /// themself and any `user_id` they send is ignored. The owner may name
    /// another user, who must be an active kasir.
    async fn deposit_target(
        &self,
        ctx: &RequestContext,
        requested: Option<i32>,
    ) -> Result<i32, AppError> {
        if !ctx.is_owner() {
            return Ok(ctx.user_id);
        }

        let Some(target) = requested.filter(|id| *id != ctx.user_id) else {
            return Ok(ctx.user_id);
        };

        let user = self
            .user_repository
            .find_by_id(target)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {target} not found")))?;

        if user.role.parse::<Role>()? != Role::Kasir
            || user.status.parse::<UserStatus>()? != UserStatus::Aktif
        {
            return Err(AppError::BadRequest(format!(
                "User {} is not an active kasir",
                user.username
            )));
        }

        Ok(target)
    }
}

#[async_trait]
impl ModalServiceTrait for ModalService {
    async fn get_modals(
        &self,
        ctx: &RequestContext,
        query: &ScopeQuery,
    ) -> Result<ApiResponse<Vec<ModalResponse>>, ErrorResponse> {
        let method = Method::Get;
        let tracing_ctx = self
            .observer
            .start("GetModals", vec![KeyValue::new("component", "modal")]);

        let result = async {
            let scope = ctx.scope(query.cashier_id.as_deref())?;

            let modals = self
                .modal_repository
                .find_all(scope)
                .await?
                .into_iter()
                .map(ModalResponse::from)
                .collect();

            Ok::<_, AppError>(ApiResponse::success("Modal retrieved successfully", modals))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Modal retrieved")
            .await
    }

    async fn get_history(
        &self,
        ctx: &RequestContext,
        query: &ScopeQuery,
    ) -> Result<ApiResponse<Vec<ModalResponse>>, ErrorResponse> {
        let method = Method::Get;
        let tracing_ctx = self
            .observer
            .start("GetModalHistory", vec![KeyValue::new("component", "modal")]);

        let result = async {
            let scope = ctx.scope(query.cashier_id.as_deref())?;

            let history = self
                .modal_repository
                .find_history(scope)
                .await?
                .into_iter()
                .map(ModalResponse::from)
                .collect();

            Ok::<_, AppError>(ApiResponse::success(
                "Modal history retrieved successfully",
                history,
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Modal history retrieved")
            .await
    }

    async fn create_modal(
        &self,
        ctx: &RequestContext,
        input: &CreateModalRequest,
    ) -> Result<ApiResponse<LedgerWriteResponse<ModalResponse>>, ErrorResponse> {
        let method = Method::Post;
        let tracing_ctx = self.observer.start(
            "CreateModal",
            vec![
                KeyValue::new("component", "modal"),
                KeyValue::new("modal.type", input.modal_type.clone()),
                KeyValue::new("modal.nominal", input.nominal),
            ],
        );

        let result = async {
            let user_id = self.deposit_target(ctx, input.user_id).await?;

            let (modal, saldo) = self.modal_repository.create(user_id, input).await?;
            let record = ModalResponse::from(modal);

            self.cache_store
                .delete_from_cache(MODAL_BY_TYPE_CACHE_KEY)
                .await;
            self.activity_log
                .record(
                    NewActivityLog::new(ctx, LogAction::Insert, "modal")
                        .record(record.id)
                        .new_values(&record),
                )
                .await;

            Ok::<_, AppError>(ApiResponse::success(
                "Modal created successfully",
                LedgerWriteResponse {
                    record,
                    total_saldo: saldo.total_saldo,
                },
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Modal created")
            .await
    }

    async fn update_modal(
        &self,
        ctx: &RequestContext,
        id: i32,
        input: &UpdateModalRequest,
    ) -> Result<ApiResponse<LedgerWriteResponse<ModalResponse>>, ErrorResponse> {
        let method = Method::Put;
        let tracing_ctx = self.observer.start(
            "UpdateModal",
            vec![
                KeyValue::new("component", "modal"),
                KeyValue::new("modal.id", id.to_string()),
                KeyValue::new("modal.nominal", input.nominal),
            ],
        );

        let result = async {
            let old = self
                .modal_repository
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Modal with id {id} not found")))?;

            ctx.ensure_can_access(old.user_id)?;

            let (modal, saldo) = self
                .modal_repository
                .update_nominal(id, input.nominal)
                .await?;
            let record = ModalResponse::from(modal);

            self.cache_store
                .delete_from_cache(MODAL_BY_TYPE_CACHE_KEY)
                .await;
            self.activity_log
                .record(
                    NewActivityLog::new(ctx, LogAction::Update, "modal")
                        .record(id)
                        .old_values(&ModalResponse::from(old))
                        .new_values(&record),
                )
                .await;

            Ok::<_, AppError>(ApiResponse::success(
                "Modal updated successfully",
                LedgerWriteResponse {
                    record,
                    total_saldo: saldo.total_saldo,
                },
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Modal updated")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::{
        FakeLedger, FakeUserRepository, RecordingActivityLog, ctx, metrics, user,
    };
    use axum::http::StatusCode;

    struct Fixture {
        service: ModalService,
        ledger: Arc<FakeLedger>,
        activity_log: Arc<RecordingActivityLog>,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(FakeUserRepository::with(vec![
            user(1, "bos", "owner", "aktif"),
            user(2, "dewi", "kasir", "aktif"),
            user(3, "rudi", "kasir", "aktif"),
            user(4, "lina", "kasir", "nonaktif"),
            user(5, "wakil", "owner", "aktif"),
        ]));
        let ledger = Arc::new(FakeLedger::default());
        let activity_log = Arc::new(RecordingActivityLog::default());
        let service = ModalService::new(
            ledger.clone(),
            users,
            activity_log.clone(),
            Arc::new(CacheStore::disabled()),
            metrics(),
        );

        Fixture {
            service,
            ledger,
            activity_log,
        }
    }

    fn deposit(nominal: i64, user_id: Option<i32>) -> CreateModalRequest {
        CreateModalRequest {
            modal_type: "brilink".into(),
            nominal,
            user_id,
        }
    }

    #[tokio::test]
    async fn kasir_target_is_ignored() {
        let f = fixture();

        let response = f
            .service
            .create_modal(&ctx(Role::Kasir, 2), &deposit(100_000, Some(3)))
            .await
            .unwrap();

        assert_eq!(response.data.record.user_id, 2);
        assert_eq!(response.data.total_saldo, 100_000);
        assert_eq!(f.ledger.balance_of(2), Some(100_000));
        assert_eq!(f.ledger.balance_of(3), None);
        assert_eq!(f.activity_log.actions(), vec!["INSERT:modal"]);
    }

    #[tokio::test]
    async fn owner_deposits_for_an_active_kasir() {
        let f = fixture();

        let response = f
            .service
            .create_modal(&ctx(Role::Owner, 1), &deposit(2_000_000, Some(3)))
            .await
            .unwrap();

        assert_eq!(response.data.record.user_id, 3);
        assert_eq!(response.data.total_saldo, 2_000_000);
        assert_eq!(f.ledger.balance_of(1), None);
    }

    #[tokio::test]
    async fn owner_cannot_target_inactive_or_owner_accounts() {
        let f = fixture();
        let owner = ctx(Role::Owner, 1);

        let inactive = f
            .service
            .create_modal(&owner, &deposit(50_000, Some(4)))
            .await
            .unwrap_err();
        assert_eq!(inactive.status_code(), StatusCode::BAD_REQUEST);

        let other_owner = f
            .service
            .create_modal(&owner, &deposit(50_000, Some(5)))
            .await
            .unwrap_err();
        assert_eq!(other_owner.status_code(), StatusCode::BAD_REQUEST);

        let missing = f
            .service
            .create_modal(&owner, &deposit(50_000, Some(99)))
            .await
            .unwrap_err();
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

        assert!(f.ledger.modals.lock().unwrap().is_empty());
        assert!(f.activity_log.actions().is_empty());
    }

    #[tokio::test]
    async fn kasir_edits_only_their_own_deposit() {
        let f = fixture();
        f.service
            .create_modal(&ctx(Role::Kasir, 2), &deposit(100_000, None))
            .await
            .unwrap();

        let err = f
            .service
            .update_modal(&ctx(Role::Kasir, 3), 1, &UpdateModalRequest { nominal: 1 })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(f.ledger.balance_of(2), Some(100_000));

        let response = f
            .service
            .update_modal(&ctx(Role::Kasir, 2), 1, &UpdateModalRequest { nominal: 150_000 })
            .await
            .unwrap();
        assert_eq!(response.data.total_saldo, 150_000);
        assert_eq!(f.activity_log.actions(), vec!["INSERT:modal", "UPDATE:modal"]);
    }
}
