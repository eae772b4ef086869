use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::request::transfer::LedgerStatus;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateSetorRequest {
    #[validate(range(
        min = 1,
        max = 1_000_000_000_000_000_i64,
        message = "Nominal must be between 1 and 1,000,000,000,000,000"
    ))]
    pub nominal: i64,

    pub keterangan: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct ApproveSetorRequest {
    pub status: LedgerStatus,

    /// Corrected amount, when the counted cash differs.
    #[validate(range(
        min = 1,
        max = 1_000_000_000_000_000_i64,
        message = "Nominal must be between 1 and 1,000,000,000,000,000"
    ))]
    pub nominal: Option<i64>,
}
