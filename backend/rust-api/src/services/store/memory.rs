use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{QuizStore, StoreError, TopicStore};
use crate::models::{QuizRecord, TopicRecord};

/// Process-local quiz store for tests and dry runs.
#[derive(Default)]
pub struct MemoryQuizStore {
    quizzes: RwLock<HashMap<ObjectId, QuizRecord>>,
}

impl MemoryQuizStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.quizzes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.quizzes.read().await.is_empty()
    }
}

#[async_trait]
impl QuizStore for MemoryQuizStore {
    async fn insert_quiz(&self, quiz: &QuizRecord) -> Result<(), StoreError> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.contains_key(&quiz.id) {
            return Err(StoreError::Duplicate(quiz.id.to_hex()));
        }
        quizzes.insert(quiz.id, quiz.clone());
        Ok(())
    }

    async fn find_quiz(&self, id: &ObjectId) -> Result<Option<QuizRecord>, StoreError> {
        Ok(self.quizzes.read().await.get(id).cloned())
    }
}

/// Process-local topic store with the same uniqueness rule as the `topics`
/// collection index.
#[derive(Default)]
pub struct MemoryTopicStore {
    topics: RwLock<Vec<TopicRecord>>,
}

impl MemoryTopicStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TopicStore for MemoryTopicStore {
    async fn list_active(&self) -> Result<Vec<TopicRecord>, StoreError> {
        let mut active: Vec<TopicRecord> = self
            .topics
            .read()
            .await
            .iter()
            .filter(|t| t.is_active)
            .cloned()
            .collect();
        active.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(active)
    }

    async fn find_active(&self, name: &str) -> Result<Option<TopicRecord>, StoreError> {
        Ok(self
            .topics
            .read()
            .await
            .iter()
            .find(|t| t.is_active && t.name == name)
            .cloned())
    }

    async fn insert_topic(&self, topic: &TopicRecord) -> Result<(), StoreError> {
        let mut topics = self.topics.write().await;
        if topics.iter().any(|t| t.name == topic.name) {
            return Err(StoreError::Duplicate(topic.name.clone()));
        }
        topics.push(topic.clone());
        Ok(())
    }

    async fn upsert_topics(&self, topics: &[TopicRecord]) -> Result<usize, StoreError> {
        let mut stored = self.topics.write().await;
        for topic in topics {
            match stored.iter_mut().find(|t| t.name == topic.name) {
                Some(existing) => {
                    existing.description = topic.description.clone();
                    existing.icon = topic.icon.clone();
                    existing.color = topic.color.clone();
                    existing.is_active = topic.is_active;
                    existing.updated_at = topic.updated_at;
                }
                None => stored.push(topic.clone()),
            }
        }
        Ok(topics.len())
    }
}
