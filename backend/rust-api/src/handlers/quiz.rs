use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::ApiError;
use crate::{
    extractors::AppJson,
    models::{GenerateQuizRequest, GenerateQuizResponse, QuizView, SubmitQuizRequest, SubmitQuizResponse},
    services::{quiz_service::QuizService, AppState},
};

pub async fn generate_quiz(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<GenerateQuizRequest>,
) -> Result<Json<GenerateQuizResponse>, ApiError> {
    let service = QuizService::new(&state);
    Ok(Json(service.generate(req).await?))
}

pub async fn submit_quiz(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<SubmitQuizRequest>,
) -> Result<Json<SubmitQuizResponse>, ApiError> {
    tracing::info!("Submitting answers for quiz: {:?}", req.quiz_id);

    let service = QuizService::new(&state);
    Ok(Json(service.submit(req).await?))
}

pub async fn get_quiz(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<String>,
) -> Result<Json<QuizView>, ApiError> {
    tracing::info!("Getting quiz: {}", quiz_id);

    let service = QuizService::new(&state);
    Ok(Json(service.get(&quiz_id).await?))
}
