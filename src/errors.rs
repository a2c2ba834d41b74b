use axum::{
    extract::rejection::JsonRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::fmt;

use crate::models::{ErrorResponse, FieldError};
use crate::scoring::ScoringError;

/// Application-specific error types.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Request body failed field validation.
    Validation(Vec<FieldError>),
    /// Bad request error (malformed body).
    BadRequest(String),
    /// Request body exceeded the configured size limit.
    PayloadTooLarge(String),
    /// Resource not found error.
    NotFound(String),
    /// Internal server error. The detail is logged, never returned.
    InternalError(String),
}

impl fmt::Display for AppError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(errors) => {
                let fields: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation failed: {}", fields.join("; "))
            }
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Every variant renders as `{"status": "error", "message": ...}`. Validation
    /// failures also carry the per-field `errors` list.
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Validation(errors) => {
                tracing::warn!("Rejected financial data: {:?}", errors);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Invalid financial data".to_string(),
                    errors,
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, Vec::new()),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg, Vec::new()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, Vec::new()),
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                    Vec::new(),
                )
            }
        };

        let body = Json(ErrorResponse {
            status: "error".to_string(),
            message,
            errors,
        });

        (status, body).into_response()
    }
}

impl From<ScoringError> for AppError {
    /// A scoring precondition failure after validation is a bug, not bad input.
    fn from(err: ScoringError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    /// Maps axum's JSON extractor rejections.
    ///
    /// Well-formed JSON with missing or mistyped fields is a validation error;
    /// an oversized body keeps its 413; anything else is a bad request.
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(rejection.body_text());
        }
        match rejection {
            JsonRejection::JsonDataError(e) => {
                AppError::Validation(vec![FieldError::new("body", e.body_text())])
            }
            JsonRejection::JsonSyntaxError(e) => AppError::BadRequest(e.body_text()),
            JsonRejection::MissingJsonContentType(e) => AppError::BadRequest(e.body_text()),
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

/// Rewrites error responses produced outside the handlers as JSON.
///
/// Middleware (body limit, rate limiter) and the method router answer with
/// plain text or empty bodies. Any 4xx/5xx response that is not already JSON
/// gets an [`ErrorResponse`] body carrying the status reason. Other headers,
/// such as `allow` or the rate limit headers, are kept.
pub async fn render_json_errors(response: Response) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));
    if is_json {
        return response;
    }

    let (parts, _) = response.into_parts();
    let message = status.canonical_reason().unwrap_or("Request failed");
    tracing::debug!("Rendering {} response as JSON", status);

    let mut rendered = (
        status,
        Json(ErrorResponse {
            status: "error".to_string(),
            message: message.to_string(),
            errors: Vec::new(),
        }),
    )
        .into_response();

    for (name, value) in parts.headers.iter() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rendered.headers_mut().append(name.clone(), value.clone());
        }
    }

    rendered
}
