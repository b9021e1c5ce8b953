//! Validated JSON extractor for Axum
//!
//! `ValidatedJson<T>` works like `axum::Json<T>`, but additionally runs
//! `validator::Validate::validate()` on the deserialized value. Both
//! malformed JSON and failed rules are answered with 400.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use super::ApiError;

/// An extractor that deserializes JSON and validates it.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateJob {
///     #[validate(length(max = 200))]
///     title: Option<String>,
/// }
///
/// async fn handler(ValidatedJson(body): ValidatedJson<CreateJob>) {
///     // `body` is guaranteed to pass validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

pub enum ValidatedJsonRejection {
    JsonError(JsonRejection),
    ValidationError(ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            Self::JsonError(rejection) => {
                ApiError::bad_request(format!("Invalid JSON: {}", rejection.body_text()))
                    .into_response()
            }
            Self::ValidationError(errors) => {
                let mut messages = Vec::new();
                collect_messages("", &errors, &mut messages);

                let message = if messages.is_empty() {
                    "Validation failed".to_string()
                } else {
                    messages.join("; ")
                };
                ApiError::bad_request(message).into_response()
            }
        }
    }
}

/// Flattens nested errors into `path.field: message` entries.
fn collect_messages(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{}: {}", path, msg)
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_messages(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct Inner {
        #[validate(length(max = 5))]
        name: String,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(length(min = 1, max = 10))]
        title: String,
        #[validate(nested)]
        inner: Inner,
    }

    async fn handler(ValidatedJson(_body): ValidatedJson<TestBody>) -> &'static str {
        "ok"
    }

    async fn send(body: &'static str) -> (StatusCode, serde_json::Value) {
        let app = Router::new().route("/test", post(handler));
        let req = Request::builder()
            .method("POST")
            .uri("/test")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn valid_body_returns_ok() {
        let (status, _) = send(r#"{"title": "Engineer", "inner": {"name": "abc"}}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_json_returns_400() {
        let (status, body) = send("not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn nested_rule_failure_returns_400_with_path() {
        let (status, body) = send(r#"{"title": "Engineer", "inner": {"name": "too long"}}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "inner.name: length");
    }
}
