use std::any::Any;

use axum::extract::{Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use catalog_core::error::CoreError;
use serde_json::{json, Value};

use crate::state::AppState;

/// Underlying error text of a 500 response, carried as a response extension.
///
/// [`finish_error_response`] turns it into the `message` field in
/// development.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for stored-data errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Stored data that cannot be represented (malformed options, unknown
    /// attribute or link type).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No route matched the request.
    #[error("Route not found")]
    RouteNotFound,

    /// The request exceeded the configured timeout.
    #[error("Request timed out")]
    RequestTimeout,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::RouteNotFound => {
                let body = json!({
                    "error": "Route not found",
                    "code": "NOT_FOUND",
                });
                return (StatusCode::NOT_FOUND, axum::Json(body)).into_response();
            }
            AppError::RequestTimeout => {
                tracing::warn!("Request timed out");
                let body = json!({
                    "error": "Request timed out",
                    "code": "REQUEST_TIMEOUT",
                });
                return (StatusCode::REQUEST_TIMEOUT, axum::Json(body)).into_response();
            }
            AppError::Core(core) => match core {
                CoreError::MalformedOptions { attribute_id, .. } => {
                    tracing::error!(attribute_id, error = %core, "Unreadable attribute options");
                }
                CoreError::UnknownAttributeType(_) | CoreError::UnknownLinkType(_) => {
                    tracing::error!(error = %core, "Unreadable stored attribute");
                }
            },
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
            }
        }

        let mut response = (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(internal_error_body(None)),
        )
            .into_response();
        response
            .extensions_mut()
            .insert(ErrorDetail(self.to_string()));
        response
    }
}

/// Body of every 500 response; `detail` becomes the `message` field.
fn internal_error_body(detail: Option<&str>) -> Value {
    let mut body = json!({
        "error": "Internal server error",
        "code": "INTERNAL_ERROR",
    });
    if let Some(detail) = detail {
        body["message"] = Value::String(detail.to_string());
    }
    body
}

/// Give error responses from the inner layers their final JSON shape.
///
/// The timeout layer answers with an empty `408`; it is replaced by the
/// standard error body. A 500 carrying an [`ErrorDetail`] gains the
/// `message` field when the server runs in development.
pub async fn finish_error_response(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if status == StatusCode::REQUEST_TIMEOUT && !response.headers().contains_key(CONTENT_TYPE) {
        return AppError::RequestTimeout.into_response();
    }

    if !state.config.environment.is_development() {
        return response;
    }
    let detail = response
        .extensions()
        .get::<ErrorDetail>()
        .map(|detail| detail.0.clone());
    match detail {
        Some(detail) => (status, axum::Json(internal_error_body(Some(&detail)))).into_response(),
        None => response,
    }
}

/// Fallback handler for unmatched routes.
pub async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}

/// Convert a handler panic into the standard 500 response.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    AppError::InternalError(detail).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_body_omits_message_without_detail() {
        let body = internal_error_body(None);
        assert_eq!(
            body,
            json!({"error": "Internal server error", "code": "INTERNAL_ERROR"})
        );
    }

    #[test]
    fn internal_body_carries_detail_as_message() {
        let body = internal_error_body(Some("boom"));
        assert_eq!(body["message"], "boom");
        assert_eq!(body["error"], "Internal server error");
    }

    #[test]
    fn internal_errors_keep_their_detail_out_of_band() {
        let response = AppError::InternalError("pool exhausted".into()).into_response();

        let detail = response.extensions().get::<ErrorDetail>().unwrap();
        assert_eq!(detail.0, "Internal error: pool exhausted");
    }

    #[test]
    fn status_codes_follow_the_variant() {
        assert_eq!(
            AppError::RouteNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::RequestTimeout.into_response().status(),
            StatusCode::REQUEST_TIMEOUT
        );
        assert_eq!(
            AppError::Database(sqlx::Error::PoolTimedOut)
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Core(CoreError::UnknownLinkType("sideways".into()))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn client_errors_carry_no_detail() {
        let response = AppError::RouteNotFound.into_response();
        assert!(response.extensions().get::<ErrorDetail>().is_none());
    }

    #[test]
    fn panic_payloads_become_internal_errors() {
        let response = panic_response(Box::new("exploded"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
