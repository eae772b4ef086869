use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Client-sent `admin_fee` and `sisa` are not part of this type; both are
/// always derived from `nominal`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateTarikKreditRequest {
    pub tanggal: Option<NaiveDate>,

    #[validate(length(min = 1, max = 150, message = "Customer name is required"))]
    pub nama_user: String,

    #[validate(range(
        min = 1,
        max = 1_000_000_000_000_000_i64,
        message = "Nominal must be between 1 and 1,000,000,000,000,000"
    ))]
    pub nominal: i64,

    pub keterangan: Option<String>,

    pub foto_struk: Option<String>,
}

/// A credit advance with its fee already computed.
#[derive(Debug, Clone)]
pub struct TarikKreditRecord {
    pub tanggal: NaiveDate,
    pub nama_user: String,
    pub nominal: i64,
    pub admin_fee: i64,
    pub sisa: i64,
    pub keterangan: Option<String>,
    pub foto_struk: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_fee_fields_are_ignored() {
        let req: CreateTarikKreditRequest = serde_json::from_value(serde_json::json!({
            "nama_user": "Rina",
            "nominal": 500000,
            "admin_fee": 1,
            "sisa": 499999
        }))
        .unwrap();

        assert!(req.validate().is_ok());
        assert_eq!(req.nominal, 500_000);
    }

    #[test]
    fn blank_customer_name_is_rejected() {
        let req = CreateTarikKreditRequest {
            tanggal: None,
            nama_user: String::new(),
            nominal: 100_000,
            keterangan: None,
            foto_struk: None,
        };
        assert!(req.validate().is_err());
    }
}
