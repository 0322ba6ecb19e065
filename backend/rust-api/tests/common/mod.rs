#![allow(dead_code)]

use ai_quiz_api::{
    config::{AiConfig, Config},
    create_router,
    services::{
        ai::{AiGateway, CompletionProvider, GenerationSettings, ProviderError},
        seed::seed_topics,
        store::{MemoryQuizStore, MemoryTopicStore},
        AppState,
    },
};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Provider that replays canned replies in order. Once the script runs out
/// every call fails.
pub struct ScriptedProvider {
    configured: bool,
    replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            configured: true,
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new(Vec::new())
        }
    }

    pub fn failing() -> Self {
        Self::new(Vec::new())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn complete(
        &self,
        prompt: &str,
        _settings: GenerationSettings,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ProviderError::EmptyResponse))
    }
}

pub fn test_config() -> Config {
    Config {
        mongo_uri: "mongodb://localhost:27017".to_string(),
        mongo_database: "quiz_app_test".to_string(),
        port: 0,
        ai: AiConfig::default(),
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub quizzes: Arc<MemoryQuizStore>,
}

pub async fn create_test_app_with_provider(provider: Arc<dyn CompletionProvider>) -> TestApp {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let quizzes = Arc::new(MemoryQuizStore::new());
    let topics = Arc::new(MemoryTopicStore::new());
    seed_topics(topics.as_ref())
        .await
        .expect("Failed to seed topics");

    let state = Arc::new(AppState::from_parts(
        test_config(),
        quizzes.clone(),
        topics,
        AiGateway::new(provider),
    ));

    TestApp {
        router: create_router(state.clone()),
        state,
        quizzes,
    }
}

/// Router with seeded topics and no usable provider.
pub async fn create_test_app() -> Router {
    create_test_app_with_provider(Arc::new(ScriptedProvider::unconfigured()))
        .await
        .router
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(body)).await
}

/// Five well-formed questions as a provider would return them.
pub fn provider_questions_json(topic: &str) -> String {
    let questions: Vec<Value> = (0..5)
        .map(|i| {
            serde_json::json!({
                "question": format!("{} question {}?", topic, i + 1),
                "options": ["Alpha", "Beta", "Gamma", "Delta"],
                "correctAnswer": i % 4
            })
        })
        .collect();
    format!(
        "Sure! Here is your quiz:\n```json\n{}\n```",
        serde_json::json!({ "questions": questions })
    )
}
