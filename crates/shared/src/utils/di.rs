use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    abstract_trait::{
        DynActivityLogRepository, DynActivityLogService, DynAuthService, DynBiayaLainRepository,
        DynBiayaLainService, DynHashing, DynJwtService, DynModalRepository, DynModalService,
        DynReportRepository, DynReportService, DynSaldoRepository, DynSaldoService,
        DynSetorRepository, DynSetorService, DynTarikKreditRepository, DynTarikKreditService,
        DynTarikTunaiRepository, DynTarikTunaiService, DynTransferDebitRepository,
        DynTransferDebitService, DynTransferRepository, DynTransferService, DynUserRepository,
        DynUserService,
    },
    cache::CacheStore,
    config::ConnectionPool,
    repository::{
        activity_log::ActivityLogRepository, biaya_lain::BiayaLainRepository,
        modal::ModalRepository, report::ReportRepository, saldo::SaldoRepository,
        setor::SetorRepository, tarik_kredit::TarikKreditRepository,
        tarik_tunai::TarikTunaiRepository, transfer::TransferRepository,
        transfer_debit::TransferDebitRepository, user::UserRepository,
    },
    service::{
        ActivityLogService, AuthService, BiayaLainService, ModalService, ReportService,
        SaldoService, SetorService, TarikKreditService, TarikTunaiService, TransferDebitService,
        TransferService, UserService,
    },
    utils::Metrics,
};

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: DynAuthService,
    pub user_service: DynUserService,
    pub saldo_service: DynSaldoService,
    pub modal_service: DynModalService,
    pub transfer_service: DynTransferService,
    pub setor_service: DynSetorService,
    pub transfer_debit_service: DynTransferDebitService,
    pub tarik_tunai_service: DynTarikTunaiService,
    pub tarik_kredit_service: DynTarikKreditService,
    pub biaya_lain_service: DynBiayaLainService,
    pub report_service: DynReportService,
    pub activity_log_service: DynActivityLogService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth_service", &"DynAuthService")
            .field("user_service", &"DynUserService")
            .field("saldo_service", &"DynSaldoService")
            .field("modal_service", &"DynModalService")
            .field("transfer_service", &"DynTransferService")
            .field("setor_service", &"DynSetorService")
            .field("transfer_debit_service", &"DynTransferDebitService")
            .field("tarik_tunai_service", &"DynTarikTunaiService")
            .field("tarik_kredit_service", &"DynTarikKreditService")
            .field("biaya_lain_service", &"DynBiayaLainService")
            .field("report_service", &"DynReportService")
            .field("activity_log_service", &"DynActivityLogService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(
        pool: ConnectionPool,
        hashing: DynHashing,
        jwt_config: DynJwtService,
        cache: Arc<CacheStore>,
        metrics: Arc<Mutex<Metrics>>,
    ) -> Self {
        let user_repository = Arc::new(UserRepository::new(pool.clone())) as DynUserRepository;
        let saldo_repository = Arc::new(SaldoRepository::new(pool.clone())) as DynSaldoRepository;
        let modal_repository = Arc::new(ModalRepository::new(pool.clone())) as DynModalRepository;
        let transfer_repository =
            Arc::new(TransferRepository::new(pool.clone())) as DynTransferRepository;
        let setor_repository = Arc::new(SetorRepository::new(pool.clone())) as DynSetorRepository;
        let transfer_debit_repository =
            Arc::new(TransferDebitRepository::new(pool.clone())) as DynTransferDebitRepository;
        let tarik_tunai_repository =
            Arc::new(TarikTunaiRepository::new(pool.clone())) as DynTarikTunaiRepository;
        let tarik_kredit_repository =
            Arc::new(TarikKreditRepository::new(pool.clone())) as DynTarikKreditRepository;
        let biaya_lain_repository =
            Arc::new(BiayaLainRepository::new(pool.clone())) as DynBiayaLainRepository;
        let report_repository =
            Arc::new(ReportRepository::new(pool.clone())) as DynReportRepository;
        let activity_log_repository =
            Arc::new(ActivityLogRepository::new(pool)) as DynActivityLogRepository;

        let activity_log_service = Arc::new(ActivityLogService::new(
            activity_log_repository,
            metrics.clone(),
        )) as DynActivityLogService;

        let auth_service = Arc::new(AuthService::new(
            user_repository.clone(),
            hashing.clone(),
            jwt_config,
            activity_log_service.clone(),
            metrics.clone(),
        )) as DynAuthService;

        let user_service = Arc::new(UserService::new(
            user_repository.clone(),
            hashing,
            activity_log_service.clone(),
            cache.clone(),
            metrics.clone(),
        )) as DynUserService;

        let saldo_service = Arc::new(SaldoService::new(
            saldo_repository.clone(),
            user_repository.clone(),
            activity_log_service.clone(),
            metrics.clone(),
        )) as DynSaldoService;

        let modal_service = Arc::new(ModalService::new(
            modal_repository,
            user_repository,
            activity_log_service.clone(),
            cache.clone(),
            metrics.clone(),
        )) as DynModalService;

        let transfer_service = Arc::new(TransferService::new(
            transfer_repository,
            activity_log_service.clone(),
            metrics.clone(),
        )) as DynTransferService;

        let setor_service = Arc::new(SetorService::new(
            setor_repository,
            activity_log_service.clone(),
            metrics.clone(),
        )) as DynSetorService;

        let transfer_debit_service = Arc::new(TransferDebitService::new(
            transfer_debit_repository,
            activity_log_service.clone(),
            metrics.clone(),
        )) as DynTransferDebitService;

        let tarik_tunai_service = Arc::new(TarikTunaiService::new(
            tarik_tunai_repository,
            activity_log_service.clone(),
            metrics.clone(),
        )) as DynTarikTunaiService;

        let tarik_kredit_service = Arc::new(TarikKreditService::new(
            tarik_kredit_repository,
            activity_log_service.clone(),
            metrics.clone(),
        )) as DynTarikKreditService;

        let biaya_lain_service = Arc::new(BiayaLainService::new(
            biaya_lain_repository,
            activity_log_service.clone(),
            metrics.clone(),
        )) as DynBiayaLainService;

        let report_service = Arc::new(ReportService::new(
            report_repository,
            saldo_repository,
            cache,
            metrics,
        )) as DynReportService;

        Self {
            auth_service,
            user_service,
            saldo_service,
            modal_service,
            transfer_service,
            setor_service,
            transfer_debit_service,
            tarik_tunai_service,
            tarik_kredit_service,
            biaya_lain_service,
            report_service,
            activity_log_service,
        }
    }
}
