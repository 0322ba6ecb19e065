use chrono::{DateTime, Utc};
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

use super::question::{ClientQuestion, Question};
use crate::utils::time::bson_to_chrono;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Stored quiz document (`quizzes` collection). Written once, never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub topic: String,
    pub questions: Vec<Question>,
    #[serde(default = "default_created_by")]
    pub created_by: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

fn default_created_by() -> String {
    "AI".to_string()
}

impl QuizRecord {
    pub fn new(topic: impl Into<String>, questions: Vec<Question>) -> Self {
        let now = BsonDateTime::now();
        Self {
            id: ObjectId::new(),
            topic: topic.into(),
            questions,
            created_by: default_created_by(),
            difficulty: Difficulty::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn client_questions(&self) -> Vec<ClientQuestion> {
        self.questions
            .iter()
            .enumerate()
            .map(|(position, q)| q.for_client(position))
            .collect()
    }

    pub fn view(&self) -> QuizView {
        QuizView {
            quiz_id: self.id.to_hex(),
            topic: self.topic.clone(),
            questions: self.client_questions(),
            created_at: bson_to_chrono(self.created_at),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GenerateQuizRequest {
    #[serde(default)]
    pub topic: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizResponse {
    pub quiz_id: String,
    pub topic: String,
    pub questions: Vec<ClientQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizView {
    pub quiz_id: String,
    pub topic: String,
    pub questions: Vec<ClientQuestion>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    #[serde(default)]
    pub quiz_id: Option<String>,
    #[serde(default)]
    pub answers: Option<Vec<Option<i64>>>,
}

/// Per-question outcome. Also accepted back by the feedback endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    #[serde(default)]
    pub question_index: u32,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: u8,
    #[serde(default)]
    pub user_answer: Option<i64>,
    pub is_correct: bool,
}

impl QuestionResult {
    pub fn user_option(&self) -> Option<&str> {
        let index = usize::try_from(self.user_answer?).ok()?;
        self.options.get(index).map(String::as_str)
    }

    pub fn correct_option(&self) -> &str {
        self.options
            .get(self.correct_answer as usize)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizResponse {
    pub score: u32,
    pub total_questions: u32,
    pub percentage: u32,
    pub results: Vec<QuestionResult>,
    pub topic: String,
}
