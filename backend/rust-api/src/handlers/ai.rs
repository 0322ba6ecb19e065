use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

use super::ApiError;
use crate::{
    extractors::AppJson,
    models::{FeedbackRequest, FeedbackResponse},
    services::{quiz_service::QuizService, AppState},
};

pub async fn generate_feedback(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let service = QuizService::new(&state);
    Ok(Json(service.feedback(req).await?))
}

pub async fn ai_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "AI service is running",
        "timestamp": Utc::now().to_rfc3339(),
        "providerConfigured": state.gateway.provider_configured(),
        "providerTimeoutSecs": state.config.ai.timeout_secs,
        "features": [
            "Quiz question generation",
            "Personalized feedback",
            "Multiple topic support"
        ]
    }))
}
