use std::sync::Arc;
use validator::Validate;

use crate::models::{CreateTopicRequest, Topic, TopicRecord};
use crate::services::{
    store::{StoreError, TopicStore},
    AppState,
};

#[derive(Debug, thiserror::Error)]
pub enum TopicError {
    #[error("{0}")]
    Validation(String),
    #[error("Topic not found")]
    NotFound,
    #[error("Topic already exists")]
    Duplicate,
    #[error("Topic store failure: {0}")]
    Store(StoreError),
}

impl From<StoreError> for TopicError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(_) => TopicError::Duplicate,
            other => TopicError::Store(other),
        }
    }
}

pub struct TopicService {
    topics: Arc<dyn TopicStore>,
}

impl TopicService {
    pub fn new(state: &AppState) -> Self {
        Self {
            topics: state.topics.clone(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Topic>, TopicError> {
        let topics = self.topics.list_active().await?;
        Ok(topics.into_iter().map(Topic::from).collect())
    }

    pub async fn get(&self, name: &str) -> Result<Topic, TopicError> {
        self.topics
            .find_active(name)
            .await?
            .map(Topic::from)
            .ok_or(TopicError::NotFound)
    }

    pub async fn create(&self, req: CreateTopicRequest) -> Result<Topic, TopicError> {
        // Whitespace-only names would be stored as "" and never be found again
        let req = CreateTopicRequest {
            name: req.name.map(|n| n.trim().to_string()),
            description: req.description.map(|d| d.trim().to_string()),
            ..req
        };

        if let Err(errors) = req.validate() {
            tracing::debug!("Topic validation failed: {}", errors);
            return Err(TopicError::Validation(
                "Name and description are required".to_string(),
            ));
        }

        let (Some(name), Some(description)) = (req.name, req.description) else {
            return Err(TopicError::Validation(
                "Name and description are required".to_string(),
            ));
        };

        let record = TopicRecord::new(name, description, req.icon, req.color);
        self.topics.insert_topic(&record).await?;
        tracing::info!("Topic created: {}", record.name);

        Ok(Topic::from(record))
    }
}
