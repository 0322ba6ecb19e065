use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

use crate::models::{
    FeedbackRequest, FeedbackResponse, GenerateQuizRequest, GenerateQuizResponse,
    SubmitQuizRequest, SubmitQuizResponse, Topic,
};

pub const CLIENT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded {status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Transport(e) => e.status(),
            ClientError::Api { status, .. } => Some(*status),
        }
    }
}

/// Operations the quiz client needs from the server.
#[async_trait]
pub trait QuizBackend: Send + Sync {
    async fn list_topics(&self) -> Result<Vec<Topic>, ClientError>;

    async fn generate_quiz(&self, topic: &str) -> Result<GenerateQuizResponse, ClientError>;

    async fn submit_quiz(
        &self,
        quiz_id: &str,
        answers: &[Option<i64>],
    ) -> Result<SubmitQuizResponse, ClientError>;

    async fn feedback(&self, request: &FeedbackRequest) -> Result<FeedbackResponse, ClientError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// reqwest-backed [`QuizBackend`]. `base_url` includes the `/api` prefix.
#[derive(Clone)]
pub struct HttpQuizClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpQuizClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(CLIENT_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ClientError> {
        let response = self.http.get(self.url(path)).send().await?;
        read_json(response).await
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        read_json(response).await
    }
}

async fn read_json<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    tracing::warn!("API call failed with {}: {}", status, message);
    Err(ClientError::Api { status, message })
}

#[async_trait]
impl QuizBackend for HttpQuizClient {
    async fn list_topics(&self) -> Result<Vec<Topic>, ClientError> {
        self.get_json("/topics").await
    }

    async fn generate_quiz(&self, topic: &str) -> Result<GenerateQuizResponse, ClientError> {
        let request = GenerateQuizRequest {
            topic: Some(topic.to_string()),
        };
        self.post_json("/quiz/generate", &request).await
    }

    async fn submit_quiz(
        &self,
        quiz_id: &str,
        answers: &[Option<i64>],
    ) -> Result<SubmitQuizResponse, ClientError> {
        let request = SubmitQuizRequest {
            quiz_id: Some(quiz_id.to_string()),
            answers: Some(answers.to_vec()),
        };
        self.post_json("/quiz/submit", &request).await
    }

    async fn feedback(&self, request: &FeedbackRequest) -> Result<FeedbackResponse, ClientError> {
        self.post_json("/ai/feedback", request).await
    }
}
