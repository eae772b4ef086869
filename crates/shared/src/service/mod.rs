pub mod activity_log;
pub mod auth;
pub mod biaya_lain;
pub mod modal;
pub mod report;
pub mod saldo;
pub mod setor;
pub mod tarik_kredit;
pub mod tarik_tunai;
pub mod transfer;
pub mod transfer_debit;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use self::activity_log::ActivityLogService;
pub use self::auth::AuthService;
pub use self::biaya_lain::BiayaLainService;
pub use self::modal::ModalService;
pub use self::report::ReportService;
pub use self::saldo::SaldoService;
pub use self::setor::SetorService;
pub use self::tarik_kredit::TarikKreditService;
pub use self::tarik_tunai::TarikTunaiService;
pub use self::transfer::TransferService;
pub use self::transfer_debit::TransferDebitService;
pub use self::user::UserService;
