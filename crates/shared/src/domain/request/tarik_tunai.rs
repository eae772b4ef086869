use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateTarikTunaiRequest {
    pub tanggal: Option<NaiveDate>,

    #[validate(length(min = 1, max = 100, message = "Bank is required"))]
    pub bank: String,

    #[validate(range(
        min = 1,
        max = 1_000_000_000_000_000_i64,
        message = "Withdrawal amount must be between 1 and 1,000,000,000,000,000"
    ))]
    pub nominal_tarik: i64,

    #[validate(range(
        min = 0,
        max = 1_000_000_000_000_000_i64,
        message = "Fee must be between 0 and 1,000,000,000,000,000"
    ))]
    pub biaya_tarik: Option<i64>,

    pub keterangan: Option<String>,

    pub foto_struk: Option<String>,
}
