pub mod activity_log;
pub mod auth;
pub mod biaya_lain;
pub mod filter;
pub mod modal;
pub mod report;
pub mod setor;
pub mod tarik_kredit;
pub mod tarik_tunai;
pub mod transfer;
pub mod transfer_debit;
pub mod user;

pub use self::activity_log::{FindAllLogRequest, LogAction, NewActivityLog};
pub use self::auth::LoginRequest;
pub use self::biaya_lain::CreateBiayaLainRequest;
pub use self::filter::{DateRange, DateRangeQuery, PageWindow, ScopeQuery};
pub use self::modal::{CreateModalRequest, UpdateModalRequest};
pub use self::report::{ChartPeriod, ChartQuery};
pub use self::setor::{ApproveSetorRequest, CreateSetorRequest};
pub use self::tarik_kredit::{CreateTarikKreditRequest, TarikKreditRecord};
pub use self::tarik_tunai::CreateTarikTunaiRequest;
pub use self::transfer::{
    CreateTransferRequest, FindAllTransferRequest, FindFavoritRequest, LedgerStatus,
    UpdateTransferRequest, UpdateTransferStatusRequest,
};
pub use self::transfer_debit::{CreateTransferDebitRequest, FindAllTransferDebitRequest};
pub use self::user::{CreateUserRequest, UpdateUserRequest};
