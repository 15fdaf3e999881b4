//! JSON body extractor that runs `validator` rules.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Deserialize the body as JSON, then validate it.
///
/// Malformed JSON, a missing content type and rule violations all produce
/// a 400 [`ErrorResponse`](crate::errors::ErrorResponse); violations carry
/// per-field messages in `details`.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateMarca {
///     #[validate(length(min = 2, max = 100))]
///     nombre: String,
/// }
///
/// async fn create(ValidatedJson(payload): ValidatedJson<CreateMarca>) -> String {
///     payload.nombre
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorResponse;
    use axum::{Router, body::Body, http::StatusCode, routing::post};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Input {
        #[validate(length(min = 2, message = "demasiado corto"))]
        nombre: String,
    }

    async fn send(body: &str, content_type: &str) -> (StatusCode, ErrorResponse) {
        let app = Router::new().route(
            "/",
            post(|ValidatedJson(input): ValidatedJson<Input>| async move { input.nombre }),
        );
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", content_type)
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_rule_violation_reports_field() {
        let (status, body) = send(r#"{"nombre":"a"}"#, "application/json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "VALIDATION_ERROR");
        assert_eq!(body.details.unwrap()["nombre"][0], "demasiado corto");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (status, body) = send("{nombre", "application/json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "JSON_EXTRACTION");
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let (status, _) = send(r#"{"nombre":"ok"}"#, "text/plain").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
