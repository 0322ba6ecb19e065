use axum::{
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use serde_json::json;

use crate::metrics;
use crate::services::{quiz_service::QuizError, topic_service::TopicError};

pub mod ai;
pub mod quiz;
pub mod topics;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "message": "AI Quiz Server is running!",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub async fn not_found_fallback() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Endpoint not found" })),
    )
}

pub async fn metrics_handler() -> impl IntoResponse {
    match metrics::render_metrics() {
        Ok(metrics_text) => (StatusCode::OK, metrics_text),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to render metrics: {}", e),
        ),
    }
}

/// HTTP Basic auth for `/metrics`; credentials come from `METRICS_AUTH`
/// (`user:password`).
pub async fn metrics_auth_middleware(
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let encoded = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Basic "))
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let decoded = general_purpose::STANDARD
        .decode(encoded)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;
    let credentials = String::from_utf8(decoded).map_err(|_| StatusCode::UNAUTHORIZED)?;

    let expected = std::env::var("METRICS_AUTH").unwrap_or_else(|_| "admin:changeme".to_string());
    if credentials != expected {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(request).await)
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal { error: String, message: String },
}

impl ApiError {
    pub fn internal(error: impl Into<String>, message: impl ToString) -> Self {
        ApiError::Internal {
            error: error.into(),
            message: message.to_string(),
        }
    }
}

impl From<QuizError> for ApiError {
    fn from(err: QuizError) -> Self {
        match err {
            QuizError::Validation(message) => ApiError::BadRequest(message),
            QuizError::NotFound(message) => ApiError::NotFound(message),
            QuizError::Generation(e) => ApiError::internal("Failed to generate quiz", e),
            QuizError::Store(e) => ApiError::internal("Quiz storage failed", e),
        }
    }
}

impl From<TopicError> for ApiError {
    fn from(err: TopicError) -> Self {
        match err {
            TopicError::Validation(message) => ApiError::BadRequest(message),
            TopicError::Duplicate => ApiError::BadRequest(err.to_string()),
            TopicError::NotFound => ApiError::NotFound(err.to_string()),
            TopicError::Store(e) => ApiError::internal("Topic storage failed", e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Internal { error, message } => {
                tracing::error!("{}: {}", error, message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": error, "message": message })),
                )
                    .into_response()
            }
        }
    }
}
