use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    domain::request::filter::{DateRange, PageWindow, default_limit, default_page},
    utils::AppError,
};

/// Settlement state of a ledger row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LedgerStatus {
    Pending,
    Lunas,
}

impl LedgerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerStatus::Pending => "pending",
            LedgerStatus::Lunas => "lunas",
        }
    }
}

impl FromStr for LedgerStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(LedgerStatus::Pending),
            "lunas" => Ok(LedgerStatus::Lunas),
            other => Err(AppError::BadRequest(format!("Unknown status: {other}"))),
        }
    }
}

impl fmt::Display for LedgerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct FindAllTransferRequest {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_limit")]
    pub limit: i32,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub search: String,

    #[serde(rename = "cashier_id")]
    pub cashier_id: Option<String>,
}

impl FindAllTransferRequest {
    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.page, self.limit)
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    pub fn search_term(&self) -> Option<String> {
        let term = self.search.trim();
        (!term.is_empty()).then(|| term.to_string())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, IntoParams)]
pub struct FindFavoritRequest {
    #[serde(default)]
    pub search: String,

    pub cashier_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateTransferRequest {
    /// Defaults to today.
    pub tanggal: Option<NaiveDate>,

    #[validate(length(min = 1, max = 100, message = "Destination bank is required"))]
    pub bank_tujuan: String,

    #[validate(length(min = 1, max = 50, message = "Account number is required"))]
    pub nomor_rekening: String,

    #[validate(length(min = 1, max = 150, message = "Account holder is required"))]
    pub nama_pemilik: String,

    #[validate(range(
        min = 1,
        max = 1_000_000_000_000_000_i64,
        message = "Nominal must be between 1 and 1,000,000,000,000,000"
    ))]
    pub nominal: i64,

    #[validate(range(
        min = 0,
        max = 1_000_000_000_000_000_i64,
        message = "Fee must be between 0 and 1,000,000,000,000,000"
    ))]
    pub biaya: Option<i64>,

    pub keterangan: Option<String>,

    pub foto_struk: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateTransferRequest {
    pub tanggal: NaiveDate,

    #[validate(length(min = 1, max = 100, message = "Destination bank is required"))]
    pub bank_tujuan: String,

    #[validate(length(min = 1, max = 50, message = "Account number is required"))]
    pub nomor_rekening: String,

    #[validate(length(min = 1, max = 150, message = "Account holder is required"))]
    pub nama_pemilik: String,

    #[validate(range(
        min = 1,
        max = 1_000_000_000_000_000_i64,
        message = "Nominal must be between 1 and 1,000,000,000,000,000"
    ))]
    pub nominal: i64,

    #[validate(range(
        min = 0,
        max = 1_000_000_000_000_000_i64,
        message = "Fee must be between 0 and 1,000,000,000,000,000"
    ))]
    pub biaya: i64,

    pub keterangan: Option<String>,

    pub status: LedgerStatus,

    pub foto_struk: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateTransferStatusRequest {
    pub status: LedgerStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_fee_is_rejected() {
        let req = CreateTransferRequest {
            tanggal: None,
            bank_tujuan: "BCA".into(),
            nomor_rekening: "123".into(),
            nama_pemilik: "Budi".into(),
            nominal: 100_000,
            biaya: Some(-1),
            keterangan: None,
            foto_struk: None,
        };
        assert!(req.validate().is_err());

        let req = CreateTransferRequest {
            biaya: None,
            ..req
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn amounts_near_i64_max_are_rejected() {
        let req = CreateTransferRequest {
            tanggal: None,
            bank_tujuan: "BRI".into(),
            nomor_rekening: "123".into(),
            nama_pemilik: "Budi".into(),
            nominal: i64::MAX - 1,
            biaya: None,
            keterangan: None,
            foto_struk: None,
        };
        assert!(req.validate().is_err());

        let req = CreateTransferRequest {
            nominal: 100_000,
            biaya: Some(i64::MAX),
            ..req
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn query_uses_camel_case_dates() {
        let req: FindAllTransferRequest = serde_json::from_value(serde_json::json!({
            "startDate": "2025-06-01",
            "search": "  bca ",
            "cashier_id": "all"
        }))
        .unwrap();

        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 10);
        assert_eq!(req.range().start, NaiveDate::from_ymd_opt(2025, 6, 1));
        assert_eq!(req.search_term().as_deref(), Some("bca"));
        assert_eq!(req.cashier_id.as_deref(), Some("all"));
    }
}
