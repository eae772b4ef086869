use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::request::filter::{DateRange, PageWindow, default_limit, default_page};

#[derive(Serialize, Deserialize, Clone, Debug, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct FindAllTransferDebitRequest {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_limit")]
    pub limit: i32,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    #[serde(rename = "cashier_id")]
    pub cashier_id: Option<String>,
}

impl FindAllTransferDebitRequest {
    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.page, self.limit)
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateTransferDebitRequest {
    pub tanggal: Option<NaiveDate>,

    #[validate(range(
        min = 0,
        max = 1_000_000_000_000_000_i64,
        message = "Fee must be between 0 and 1,000,000,000,000,000"
    ))]
    pub biaya: i64,

    pub keterangan: Option<String>,

    pub foto_struk: Option<String>,
}
