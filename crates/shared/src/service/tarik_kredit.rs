use async_trait::async_trait;
use opentelemetry::KeyValue;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    abstract_trait::{DynActivityLogService, DynTarikKreditRepository, TarikKreditServiceTrait},
    domain::{
        balance::{credit_advance_fee, credit_advance_net},
        context::RequestContext,
        request::{
            CreateTarikKreditRequest, DateRangeQuery, LogAction, NewActivityLog,
            TarikKreditRecord,
        },
        response::{ApiResponse, ErrorResponse, tarik_kredit::TarikKreditResponse},
    },
    utils::{AppError, Method, Metrics, Observer, today},
};

/// Fee and remainder are always derived here, never taken from the client.
pub(crate) fn build_record(
    user_id: i32,
    input: &CreateTarikKreditRequest,
) -> Result<TarikKreditRecord, AppError> {
    let nama_user = input.nama_user.trim();
    if nama_user.is_empty() {
        return Err(AppError::BadRequest("Customer name is required".to_string()));
    }

    let admin_fee =
        credit_advance_fee(input.nominal).map_err(|_| AppError::BalanceOverflow(user_id))?;
    let sisa = credit_advance_net(input.nominal).map_err(|_| AppError::BalanceOverflow(user_id))?;

    Ok(TarikKreditRecord {
        tanggal: input.tanggal.unwrap_or_else(today),
        nama_user: nama_user.to_string(),
        nominal: input.nominal,
        admin_fee,
        sisa,
        keterangan: input.keterangan.clone(),
        foto_struk: input.foto_struk.clone(),
    })
}

#[derive(Clone)]
pub struct TarikKreditService {
    repository: DynTarikKreditRepository,
    activity_log: DynActivityLogService,
    observer: Observer,
}

impl std::fmt::Debug for TarikKreditService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TarikKreditService")
            .field("repository", &"DynTarikKreditRepository")
            .finish()
    }
}

impl TarikKreditService {
    pub fn new(
        repository: DynTarikKreditRepository,
        activity_log: DynActivityLogService,
        metrics: Arc<Mutex<Metrics>>,
    ) -> Self {
        Self {
            repository,
            activity_log,
            observer: Observer::new("tarik-kredit-service", metrics),
        }
    }
}

#[async_trait]
impl TarikKreditServiceTrait for TarikKreditService {
    async fn get_tarik_kredit(
        &self,
        ctx: &RequestContext,
        query: &DateRangeQuery,
    ) -> Result<ApiResponse<Vec<TarikKreditResponse>>, ErrorResponse> {
        let method = Method::Get;
        let tracing_ctx = self.observer.start(
            "GetTarikKredit",
            vec![KeyValue::new("component", "tarik_kredit")],
        );

        let result = async {
            let scope = ctx.scope(query.cashier_id.as_deref())?;

            let advances = self
                .repository
                .find_all(scope, query.range())
                .await?
                .into_iter()
                .map(TarikKreditResponse::from)
                .collect();

            Ok::<_, AppError>(ApiResponse::success(
                "Credit advances retrieved successfully",
                advances,
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Credit advances retrieved")
            .await
    }

    async fn create_tarik_kredit(
        &self,
        ctx: &RequestContext,
        input: &CreateTarikKreditRequest,
    ) -> Result<ApiResponse<TarikKreditResponse>, ErrorResponse> {
        let method = Method::Post;
        let tracing_ctx = self.observer.start(
            "CreateTarikKredit",
            vec![
                KeyValue::new("component", "tarik_kredit"),
                KeyValue::new("tarik_kredit.nominal", input.nominal),
            ],
        );

        let result = async {
            let record = build_record(ctx.user_id, input)?;

            let advance = TarikKreditResponse::from(
                self.repository.create(ctx.user_id, &record).await?,
            );

            self.activity_log
                .record(
                    NewActivityLog::new(ctx, LogAction::Insert, "tarik_kredit")
                        .record(advance.id)
                        .new_values(&advance),
                )
                .await;

            Ok::<_, AppError>(ApiResponse::success(
                "Credit advance created successfully",
                advance,
            ))
        }
        .await;

        self.observer
            .finish(&tracing_ctx, method, result, "Credit advance created")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request(nama_user: &str, nominal: i64) -> CreateTarikKreditRequest {
        CreateTarikKreditRequest {
            tanggal: NaiveDate::from_ymd_opt(2025, 6, 1),
            nama_user: nama_user.to_string(),
            nominal,
            keterangan: None,
            foto_struk: None,
        }
    }

    #[test]
    fn fee_and_remainder_are_derived() {
        let record = build_record(2, &request("  Rina ", 1_000_000)).unwrap();

        assert_eq!(record.nama_user, "Rina");
        assert_eq!(record.admin_fee, 30_000);
        assert_eq!(record.sisa, 970_000);
        assert_eq!(record.tanggal, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    }

    #[test]
    fn whitespace_name_is_rejected() {
        assert!(matches!(
            build_record(2, &request("   ", 1_000)),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn huge_nominal_reports_overflow() {
        assert!(matches!(
            build_record(2, &request("Rina", i64::MAX)),
            Err(AppError::BalanceOverflow(2))
        ));
    }
}
