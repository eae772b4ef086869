use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Payment-app channels the float is usually deposited into. The column is
/// free text; these are the values the counter uses today.
pub const KNOWN_MODAL_TYPES: [&str; 13] = [
    "fastpay_fa420355",
    "fastpay_fa851085",
    "modal_kas",
    "karang_sari",
    "payfazz",
    "buku_warung",
    "mmbc",
    "posfin",
    "pospay",
    "bsi_agen",
    "bni_agen",
    "brilink",
    "mandiri_agen",
];

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateModalRequest {
    #[validate(length(min = 1, max = 50, message = "Modal type is required"))]
    pub modal_type: String,

    #[validate(range(
        min = 1,
        max = 1_000_000_000_000_000_i64,
        message = "Nominal must be between 1 and 1,000,000,000,000,000"
    ))]
    pub nominal: i64,

    /// Owner only: deposit on behalf of this cashier.
    pub user_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateModalRequest {
    #[validate(range(
        min = 1,
        max = 1_000_000_000_000_000_i64,
        message = "Nominal must be between 1 and 1,000,000,000,000,000"
    ))]
    pub nominal: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nominal_has_a_ceiling() {
        let req = CreateModalRequest {
            modal_type: "brilink".into(),
            nominal: 1_000_000_000_000_000,
            user_id: None,
        };
        assert!(req.validate().is_ok());

        let req = CreateModalRequest {
            nominal: i64::MAX,
            ..req
        };
        assert!(req.validate().is_err());

        assert!(UpdateModalRequest { nominal: 0 }.validate().is_err());
    }
}
