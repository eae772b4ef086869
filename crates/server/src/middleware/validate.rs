use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use shared::{domain::response::ErrorResponse, utils::AppError};
use validator::Validate;

/// JSON body that has passed its `validator` rules.
pub struct SimpleValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let err = ErrorResponse::new(rejection.status(), rejection.body_text());
                (err.status_code(), Json(json!(err)))
            })?;

        value.validate().map_err(|errors| {
            let err = ErrorResponse::from(AppError::ValidationError(errors));
            (err.status_code(), Json(json!(err)))
        })?;

        Ok(SimpleValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use shared::domain::request::CreateSetorRequest;

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn invalid_body_is_bad_request() {
        let rejection =
            SimpleValidatedJson::<CreateSetorRequest>::from_request(json_request(r#"{"nominal":0}"#), &())
                .await
                .err()
                .unwrap();

        assert_eq!(rejection.0, StatusCode::BAD_REQUEST);
        assert_eq!(rejection.1["status"], "fail");
    }

    #[tokio::test]
    async fn valid_body_passes_through() {
        let SimpleValidatedJson(body) = SimpleValidatedJson::<CreateSetorRequest>::from_request(
            json_request(r#"{"nominal":150000,"keterangan":"setor sore"}"#),
            &(),
        )
        .await
        .ok()
        .unwrap();

        assert_eq!(body.nominal, 150_000);
    }
}
