use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::{
        balance::BalanceComponents, request::ChartPeriod, response::saldo::UserSaldoResponse,
    },
    model::report::{ModalTypeTotal, ReportTotals},
};

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone, Default)]
pub struct CategoryTotals {
    pub modal: i64,
    pub transfer_nominal: i64,
    pub transfer_biaya: i64,
    pub transfer_count: i64,
    pub setor_admin: i64,
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

impl From<&ReportTotals> for CategoryTotals {
    fn from(value: &ReportTotals) -> Self {
        CategoryTotals {
            modal: value.modal,
            transfer_nominal: value.transfer_nominal,
            transfer_biaya: value.transfer_biaya,
            transfer_count: value.transfer_count,
            setor_admin: value.setor_admin,
            debit_biaya: value.debit_biaya,
            debit_count: value.debit_count,
            tarik_tunai_nominal: value.tarik_tunai_nominal,
            tarik_tunai_biaya: value.tarik_tunai_biaya,
            tarik_tunai_count: value.tarik_tunai_count,
            tarik_kredit_nominal: value.tarik_kredit_nominal,
            tarik_kredit_admin_fee: value.tarik_kredit_admin_fee,
            tarik_kredit_count: value.tarik_kredit_count,
            biaya_lain: value.biaya_lain,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone)]
pub struct ReportSummaryResponse {
    pub user_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub totals: CategoryTotals,
    /// Balance-relevant sums of the period.
    pub components: BalanceComponents,
    /// Net balance movement of the period, by the same rule as the saldo.
    pub net_flow: i64,
    /// Current committed balance of the scope.
    pub total_saldo: i64,
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone)]
pub struct ModalTypeTotalResponse {
    pub modal_type: String,
    pub count: i64,
    pub total: i64,
}

impl From<ModalTypeTotal> for ModalTypeTotalResponse {
    fn from(value: ModalTypeTotal) -> Self {
        ModalTypeTotalResponse {
            modal_type: value.modal_type,
            count: value.count,
            total: value.total,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone)]
pub struct DashboardResponse {
    pub users: Vec<UserSaldoResponse>,
    pub modal_by_type: Vec<ModalTypeTotalResponse>,
    pub total_saldo: i64,
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone, PartialEq, Eq)]
pub struct ChartPoint {
    pub label: String,
    pub date: NaiveDate,
    pub count: i64,
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone, PartialEq, Eq)]
pub struct TransferChartPoint {
    pub label: String,
    pub date: NaiveDate,
    pub count: i64,
    pub total_nominal: i64,
    pub total_biaya: i64,
    pub total: i64,
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone, PartialEq, Eq)]
pub struct DebitChartPoint {
    pub label: String,
    pub date: NaiveDate,
    pub count: i64,
    pub total_biaya: i64,
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone)]
pub struct ChartResponse<T> {
    pub period: ChartPeriod,
    pub points: Vec<T>,
}
