use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
    options::{FindOptions, IndexOptions},
    Collection, Database, IndexModel,
};

use super::{QuizStore, StoreError, TopicStore};
use crate::metrics::track_db_operation;
use crate::models::{QuizRecord, TopicRecord};

const QUIZZES: &str = "quizzes";
const TOPICS: &str = "topics";
const DUPLICATE_KEY: i32 = 11000;

pub struct MongoQuizStore {
    collection: Collection<QuizRecord>,
}

impl MongoQuizStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(QUIZZES),
        }
    }
}

#[async_trait]
impl QuizStore for MongoQuizStore {
    async fn insert_quiz(&self, quiz: &QuizRecord) -> Result<(), StoreError> {
        track_db_operation("insert", QUIZZES, async {
            self.collection.insert_one(quiz).await.map_err(map_write_error)?;
            Ok::<_, StoreError>(())
        })
        .await
    }

    async fn find_quiz(&self, id: &ObjectId) -> Result<Option<QuizRecord>, StoreError> {
        track_db_operation("find_one", QUIZZES, async {
            Ok::<_, StoreError>(self.collection.find_one(doc! { "_id": id }).await?)
        })
        .await
    }
}

pub struct MongoTopicStore {
    collection: Collection<TopicRecord>,
}

impl MongoTopicStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(TOPICS),
        }
    }

    /// Unique index on `name`; safe to call on every startup.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }
}

#[async_trait]
impl TopicStore for MongoTopicStore {
    async fn list_active(&self) -> Result<Vec<TopicRecord>, StoreError> {
        track_db_operation("find", TOPICS, async {
            let options = FindOptions::builder().sort(doc! { "name": 1 }).build();
            let cursor = self
                .collection
                .find(doc! { "is_active": true })
                .with_options(options)
                .await?;
            let topics: Vec<TopicRecord> = cursor.try_collect().await?;
            Ok::<_, StoreError>(topics)
        })
        .await
    }

    async fn find_active(&self, name: &str) -> Result<Option<TopicRecord>, StoreError> {
        track_db_operation("find_one", TOPICS, async {
            Ok::<_, StoreError>(
                self.collection
                    .find_one(doc! { "name": name, "is_active": true })
                    .await?,
            )
        })
        .await
    }

    async fn insert_topic(&self, topic: &TopicRecord) -> Result<(), StoreError> {
        track_db_operation("insert", TOPICS, async {
            self.collection
                .insert_one(topic)
                .await
                .map_err(map_write_error)?;
            Ok::<_, StoreError>(())
        })
        .await
    }

    async fn upsert_topics(&self, topics: &[TopicRecord]) -> Result<usize, StoreError> {
        track_db_operation("upsert", TOPICS, async {
            for topic in topics {
                self.collection
                    .update_one(
                        doc! { "name": &topic.name },
                        doc! {
                            "$set": {
                                "description": &topic.description,
                                "icon": &topic.icon,
                                "color": &topic.color,
                                "is_active": topic.is_active,
                                "updated_at": topic.updated_at,
                            },
                            "$setOnInsert": {
                                "_id": topic.id,
                                "created_at": topic.created_at,
                            },
                        },
                    )
                    .upsert(true)
                    .await
                    .map_err(map_write_error)?;
            }
            Ok::<_, StoreError>(topics.len())
        })
        .await
    }
}

fn map_write_error(err: mongodb::error::Error) -> StoreError {
    if let ErrorKind::Write(WriteFailure::WriteError(ref we)) = *err.kind {
        if we.code == DUPLICATE_KEY {
            return StoreError::Duplicate(we.message.clone());
        }
    }
    StoreError::Database(err)
}
