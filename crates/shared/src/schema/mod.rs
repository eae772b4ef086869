pub mod activity_log;
pub mod biaya_lain;
pub mod modal;
pub mod saldo;
pub mod tarik_kredit;
pub mod tarik_tunai;
pub mod transfer;
pub mod transfer_debit;
pub mod user;
