//! Persistence seams for quizzes and topics.

mod memory;
mod mongo;

pub use memory::{MemoryQuizStore, MemoryTopicStore};
pub use mongo::{MongoQuizStore, MongoTopicStore};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::{QuizRecord, TopicRecord};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate key: {0}")]
    Duplicate(String),
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

#[async_trait]
pub trait QuizStore: Send + Sync {
    async fn insert_quiz(&self, quiz: &QuizRecord) -> Result<(), StoreError>;

    async fn find_quiz(&self, id: &ObjectId) -> Result<Option<QuizRecord>, StoreError>;
}

#[async_trait]
pub trait TopicStore: Send + Sync {
    /// Active topics, sorted by name.
    async fn list_active(&self) -> Result<Vec<TopicRecord>, StoreError>;

    async fn find_active(&self, name: &str) -> Result<Option<TopicRecord>, StoreError>;

    /// Fails with [`StoreError::Duplicate`] when the name is taken.
    async fn insert_topic(&self, topic: &TopicRecord) -> Result<(), StoreError>;

    /// Inserts each topic or refreshes the existing one with the same name.
    /// Ids and creation dates of existing topics are kept. Returns how many
    /// topics were written.
    async fn upsert_topics(&self, topics: &[TopicRecord]) -> Result<usize, StoreError>;
}
