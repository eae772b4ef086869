use async_trait::async_trait;
use opentelemetry::KeyValue;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    abstract_trait::{
        DynActivityLogService, DynSaldoRepository, DynUserRepository, SaldoServiceTrait,
    },
    domain::{
        context::RequestContext,
        request::{LogAction, NewActivityLog, ScopeQuery},
        response::{
            ApiResponse, ErrorResponse,
            saldo::{SaldoResponse, TotalSaldoResponse, UserSaldoResponse},
        },
    },
    utils::{AppError, Method, Metrics, Observer},
};

/// The one read path for balances. Nothing here is cached.
#[derive(Clone)]
pub struct SaldoService {
    saldo_repository: DynSaldoRepository,
    user_repository: DynUserRepository,
    activity_log: DynActivityLogService,
    observer: Observer,
}

impl std::fmt::Debug for SaldoService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaldoService")
            .field("saldo_repository", &"DynSaldoRepository")
            .field("user_repository", &"DynUserRepository")
            .finish()
    }
}

impl SaldoService {
    pub fn new(
        saldo_repository: DynSaldoRepository,
        user_repository: DynUserRepository,
        activity_log: DynActivityLogService,
        metrics: Arc<Mutex<Metrics>>,
    ) -> Self {
        Self {
            saldo_repository,
            user_repository,
            activity_log,
            observer: Observer::new("saldo-service", metrics),
        }
    }

    async fn ensure_user_exists(&self, user_id: i32) -> Result<(), AppError> {
        match self.user_repository.find_by_id(user_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!(
                "User with id {user_id} not found"
            ))),
        }
    }
}

#[async_trait]
impl SaldoServiceTrait for SaldoService {
    async fn get_saldos(
        &self,
        ctx: &RequestContext,
    ) -> Result<ApiResponse<Vec<UserSaldoResponse>>, ErrorResponse> {
        let method = Method::Get;
        let tracing_ctx = self
            .observer
            .start("GetSaldos", vec![KeyValue::new("component", "saldo")]);

        let result = async {
            ctx.ensure_owner()?;

            let saldos = self
                .saldo_repository
                .find_all_with_user()
                .await?
                .into_iter()
                .map(UserSaldoResponse::from)
                .collect();

            Ok::<_, AppError>(ApiResponse::success("Saldo retrieved successfully", saldos))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Saldo listing retrieved")
            .await
    }

    async fn get_saldo_user(
        &self,
        ctx: &RequestContext,
        user_id: i32,
    ) -> Result<ApiResponse<SaldoResponse>, ErrorResponse> {
        let method = Method::Get;
        let tracing_ctx = self.observer.start(
            "GetSaldoUser",
            vec![
                KeyValue::new("component", "saldo"),
                KeyValue::new("user.id", user_id.to_string()),
            ],
        );

        let result = async {
            ctx.ensure_can_access(user_id)?;
            self.ensure_user_exists(user_id).await?;

            let saldo = self
                .saldo_repository
                .find_by_user_id(user_id)
                .await?
                .map(SaldoResponse::from)
                .unwrap_or_else(|| SaldoResponse::empty(user_id));

            Ok::<_, AppError>(ApiResponse::success("Saldo retrieved successfully", saldo))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Saldo retrieved")
            .await
    }

    async fn get_total(
        &self,
        ctx: &RequestContext,
        query: &ScopeQuery,
    ) -> Result<ApiResponse<TotalSaldoResponse>, ErrorResponse> {
        let method = Method::Get;
        let tracing_ctx = self
            .observer
            .start("GetTotalSaldo", vec![KeyValue::new("component", "saldo")]);

        let result = async {
            let scope = ctx.scope(query.cashier_id.as_deref())?;
            let total_saldo = self.saldo_repository.total(scope).await?;

            Ok::<_, AppError>(ApiResponse::success(
                "Total saldo retrieved successfully",
                TotalSaldoResponse {
                    user_id: scope.user_id(),
                    total_saldo,
                },
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Total saldo retrieved")
            .await
    }

    async fn recompute(
        &self,
        ctx: &RequestContext,
        user_id: i32,
    ) -> Result<ApiResponse<SaldoResponse>, ErrorResponse> {
        let method = Method::Post;
        let tracing_ctx = self.observer.start(
            "RecomputeSaldo",
            vec![
                KeyValue::new("component", "saldo"),
                KeyValue::new("user.id", user_id.to_string()),
            ],
        );

        let result = async {
            ctx.ensure_owner()?;
            self.ensure_user_exists(user_id).await?;

            let before = self
                .saldo_repository
                .find_by_user_id(user_id)
                .await?
                .map(SaldoResponse::from)
                .unwrap_or_else(|| SaldoResponse::empty(user_id));

            let saldo = SaldoResponse::from(self.saldo_repository.recompute(user_id).await?);

            self.activity_log
                .record(
                    NewActivityLog::new(ctx, LogAction::Recompute, "saldo")
                        .record(user_id)
                        .old_values(&before)
                        .new_values(&saldo),
                )
                .await;

            Ok::<_, AppError>(ApiResponse::success("Saldo recomputed successfully", saldo))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Saldo recomputed")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::context::Role,
        service::testing::{
            FakeLedger, FakeUserRepository, RecordingActivityLog, ctx, metrics, user,
        },
    };
    use axum::http::StatusCode;

    fn service() -> (SaldoService, Arc<FakeLedger>, Arc<RecordingActivityLog>) {
        let users = Arc::new(FakeUserRepository::with(vec![
            user(1, "bos", "owner", "aktif"),
            user(2, "dewi", "kasir", "aktif"),
            user(3, "rudi", "kasir", "aktif"),
        ]));
        let ledger = Arc::new(FakeLedger::default());
        let activity_log = Arc::new(RecordingActivityLog::default());
        let service = SaldoService::new(ledger.clone(), users, activity_log.clone(), metrics());
        (service, ledger, activity_log)
    }

    fn cashier(id: &str) -> ScopeQuery {
        ScopeQuery {
            cashier_id: Some(id.to_string()),
        }
    }

    #[tokio::test]
    async fn recompute_is_owner_only() {
        let (service, ledger, activity_log) = service();
        ledger.seed_modal(2, 300_000);

        let err = service
            .recompute(&ctx(Role::Kasir, 2), 2)
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ledger.balance_of(2), None);
        assert!(activity_log.actions().is_empty());
    }

    #[tokio::test]
    async fn recompute_repairs_a_stale_balance() {
        let (service, ledger, activity_log) = service();
        ledger.set_balance(2, 1_000);
        ledger.seed_modal(2, 300_000);

        let response = service.recompute(&ctx(Role::Owner, 1), 2).await.unwrap();

        assert_eq!(response.data.user_id, 2);
        assert_eq!(response.data.total_saldo, 300_000);
        assert_eq!(ledger.balance_of(2), Some(300_000));
        assert_eq!(activity_log.actions(), vec!["RECOMPUTE:saldo"]);
    }

    #[tokio::test]
    async fn recompute_of_an_unknown_user_is_not_found() {
        let (service, _, _) = service();

        let err = service
            .recompute(&ctx(Role::Owner, 1), 99)
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn total_follows_the_caller_scope() {
        let (service, ledger, _) = service();
        ledger.set_balance(2, 100_000);
        ledger.set_balance(3, 50_000);

        let kasir = service
            .get_total(&ctx(Role::Kasir, 2), &cashier("3"))
            .await
            .unwrap();
        assert_eq!(kasir.data.user_id, Some(2));
        assert_eq!(kasir.data.total_saldo, 100_000);

        let everyone = service
            .get_total(&ctx(Role::Owner, 1), &ScopeQuery::default())
            .await
            .unwrap();
        assert_eq!(everyone.data.user_id, None);
        assert_eq!(everyone.data.total_saldo, 150_000);

        let one = service
            .get_total(&ctx(Role::Owner, 1), &cashier("3"))
            .await
            .unwrap();
        assert_eq!(one.data.user_id, Some(3));
        assert_eq!(one.data.total_saldo, 50_000);
    }

    #[tokio::test]
    async fn user_without_activity_reads_zero() {
        let (service, _, _) = service();

        let response = service
            .get_saldo_user(&ctx(Role::Kasir, 3), 3)
            .await
            .unwrap();

        assert_eq!(response.data.user_id, 3);
        assert_eq!(response.data.total_saldo, 0);
        assert!(response.data.updated_at.is_none());
    }

    #[tokio::test]
    async fn saldo_user_respects_ownership_and_existence() {
        let (service, _, _) = service();

        let foreign = service
            .get_saldo_user(&ctx(Role::Kasir, 2), 3)
            .await
            .unwrap_err();
        assert_eq!(foreign.status_code(), StatusCode::FORBIDDEN);

        let missing = service
            .get_saldo_user(&ctx(Role::Owner, 1), 99)
            .await
            .unwrap_err();
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    }
}
