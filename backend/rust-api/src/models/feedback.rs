use serde::{Deserialize, Serialize};

use super::quiz::QuestionResult;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub total_questions: Option<i64>,
    #[serde(default)]
    pub results: Option<Vec<QuestionResult>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub feedback: String,
    pub topic: String,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: u32,
}
