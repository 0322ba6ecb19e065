use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::ApiError;
use crate::{
    extractors::AppJson,
    models::{CreateTopicRequest, Topic},
    services::{topic_service::TopicService, AppState},
};

pub async fn list_topics(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Topic>>, ApiError> {
    let service = TopicService::new(&state);
    Ok(Json(service.list().await?))
}

pub async fn get_topic(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Topic>, ApiError> {
    let service = TopicService::new(&state);
    Ok(Json(service.get(&name).await?))
}

pub async fn create_topic(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CreateTopicRequest>,
) -> Result<(StatusCode, Json<Topic>), ApiError> {
    let service = TopicService::new(&state);
    let topic = service.create(req).await?;
    Ok((StatusCode::CREATED, Json(topic)))
}
