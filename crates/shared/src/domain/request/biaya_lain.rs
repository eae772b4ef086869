use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateBiayaLainRequest {
    pub tanggal: Option<NaiveDate>,

    #[validate(range(
        min = 1,
        max = 1_000_000_000_000_000_i64,
        message = "Fee must be between 1 and 1,000,000,000,000,000"
    ))]
    pub biaya: i64,

    pub keterangan: Option<String>,

    pub foto_struk: Option<String>,
}
