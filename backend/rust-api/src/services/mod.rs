use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use ai::{AiGateway, CompletionProvider, GeminiProvider};
use mongodb::Client as MongoClient;
use store::{MongoQuizStore, MongoTopicStore, QuizStore, TopicStore};

pub mod ai;
pub mod question_bank;
pub mod quiz_service;
pub mod scoring;
pub mod seed;
pub mod store;
pub mod topic_service;

pub struct AppState {
    pub config: Config,
    pub quizzes: Arc<dyn QuizStore>,
    pub topics: Arc<dyn TopicStore>,
    pub gateway: AiGateway,
}

impl AppState {
    /// Production wiring: MongoDB stores and the Gemini provider.
    pub async fn new(config: Config, mongo_client: MongoClient) -> anyhow::Result<Self> {
        let mongo = mongo_client.database(&config.mongo_database);

        tracing::info!("Pinging MongoDB database '{}'...", config.mongo_database);
        tokio::time::timeout(
            Duration::from_secs(10),
            mongo.run_command(mongodb::bson::doc! { "ping": 1 }),
        )
        .await
        .map_err(|_| anyhow::anyhow!("MongoDB ping timeout after 10s"))??;
        tracing::info!("MongoDB connection established successfully");

        let topics = MongoTopicStore::new(&mongo);
        topics.ensure_indexes().await?;

        let provider: Arc<dyn CompletionProvider> = Arc::new(GeminiProvider::new(&config.ai)?);
        if provider.is_configured() {
            tracing::info!("AI provider configured at {}", config.ai.base_url);
        } else {
            tracing::warn!("No usable AI provider key, all AI content will use fallbacks");
        }
        let gateway =
            AiGateway::new(provider).with_mock_delay(Duration::from_millis(config.ai.mock_delay_ms));

        Ok(Self::from_parts(
            config,
            Arc::new(MongoQuizStore::new(&mongo)),
            Arc::new(topics),
            gateway,
        ))
    }

    pub fn from_parts(
        config: Config,
        quizzes: Arc<dyn QuizStore>,
        topics: Arc<dyn TopicStore>,
        gateway: AiGateway,
    ) -> Self {
        Self {
            config,
            quizzes,
            topics,
            gateway,
        }
    }
}
