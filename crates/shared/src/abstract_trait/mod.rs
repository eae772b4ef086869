pub mod activity_log;
pub mod auth;
pub mod biaya_lain;
pub mod hashing;
pub mod jwt;
pub mod modal;
pub mod report;
pub mod saldo;
pub mod setor;
pub mod tarik_kredit;
pub mod tarik_tunai;
pub mod transfer;
pub mod transfer_debit;
pub mod user;

pub use self::activity_log::{
    ActivityLogRepositoryTrait, ActivityLogServiceTrait, DynActivityLogRepository,
    DynActivityLogService,
};
pub use self::auth::{AuthServiceTrait, DynAuthService};
pub use self::biaya_lain::{
    BiayaLainRepositoryTrait, BiayaLainServiceTrait, DynBiayaLainRepository, DynBiayaLainService,
};
pub use self::hashing::{DynHashing, HashingTrait};

pub use self::jwt::{DynJwtService, JwtServiceTrait};

pub use self::modal::{DynModalRepository, DynModalService, ModalRepositoryTrait, ModalServiceTrait};

pub use self::report::{
    DynReportRepository, DynReportService, ReportRepositoryTrait, ReportServiceTrait,
};

pub use self::saldo::{
    DynSaldoRepository, DynSaldoService, SaldoRepositoryTrait, SaldoServiceTrait,
};

pub use self::setor::{DynSetorRepository, DynSetorService, SetorRepositoryTrait, SetorServiceTrait};

pub use self::tarik_kredit::{
    DynTarikKreditRepository, DynTarikKreditService, TarikKreditRepositoryTrait,
    TarikKreditServiceTrait,
};

pub use self::tarik_tunai::{
    DynTarikTunaiRepository, DynTarikTunaiService, TarikTunaiRepositoryTrait,
    TarikTunaiServiceTrait,
};

pub use self::transfer::{
    DynTransferRepository, DynTransferService, TransferRepositoryTrait, TransferServiceTrait,
};

pub use self::transfer_debit::{
    DynTransferDebitRepository, DynTransferDebitService, TransferDebitRepositoryTrait,
    TransferDebitServiceTrait,
};

pub use self::user::{DynUserRepository, DynUserService, UserRepositoryTrait, UserServiceTrait};
