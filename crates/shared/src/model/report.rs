use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Category totals over a scope and date range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub modal: i64,
    pub transfer_nominal: i64,
    pub transfer_biaya: i64,
    pub transfer_count: i64,
    pub setor_admin: i64,
    pub setor_admin_biaya: i64,
    pub debit_biaya: i64,
    pub debit_count: i64,
    pub tarik_tunai_nominal: i64,
    pub tarik_tunai_biaya: i64,
    pub tarik_tunai_count: i64,
    pub tarik_kredit_nominal: i64,
    pub tarik_kredit_admin_fee: i64,
    pub tarik_kredit_count: i64,
    pub biaya_lain: i64,
}

#[derive(Debug, FromRow, Clone, PartialEq, Eq)]
pub struct ActivityBucket {
    pub bucket: NaiveDate,
    pub count: i64,
}

#[derive(Debug, FromRow, Clone, PartialEq, Eq)]
pub struct TransferBucket {
    pub bucket: NaiveDate,
    pub count: i64,
    pub total_nominal: i64,
    pub total_biaya: i64,
}

#[derive(Debug, FromRow, Clone, PartialEq, Eq)]
pub struct DebitBucket {
    pub bucket: NaiveDate,
    pub count: i64,
    pub total_biaya: i64,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ModalTypeTotal {
    pub modal_type: String,
    pub count: i64,
    pub total: i64,
}
