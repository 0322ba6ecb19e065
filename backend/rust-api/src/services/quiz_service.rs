use mongodb::bson::oid::ObjectId;
use std::sync::Arc;

use crate::metrics::QUIZ_SUBMISSIONS_TOTAL;
use crate::models::{
    FeedbackRequest, FeedbackResponse, GenerateQuizRequest, GenerateQuizResponse, QuizRecord,
    QuizView, SubmitQuizRequest, SubmitQuizResponse,
};
use crate::services::{
    ai::{AiGateway, FeedbackInput, GenerationError},
    scoring::{percentage, score_answers, PerformanceBand},
    store::{QuizStore, StoreError},
    AppState,
};

/// Questions per generated quiz.
pub const QUESTIONS_PER_QUIZ: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("Quiz store failure: {0}")]
    Store(#[from] StoreError),
}

pub struct QuizService {
    quizzes: Arc<dyn QuizStore>,
    gateway: AiGateway,
}

impl QuizService {
    pub fn new(state: &AppState) -> Self {
        Self {
            quizzes: state.quizzes.clone(),
            gateway: state.gateway.clone(),
        }
    }

    /// Generates and stores a quiz, returning it without correct answers.
    pub async fn generate(&self, req: GenerateQuizRequest) -> Result<GenerateQuizResponse, QuizError> {
        let topic = req
            .topic
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| QuizError::Validation("Topic is required".to_string()))?
            .to_string();

        tracing::info!("Generating quiz for topic: {}", topic);

        let generated = self
            .gateway
            .generate_questions(&topic, QUESTIONS_PER_QUIZ)
            .await?;

        let quiz = QuizRecord::new(topic, generated.questions);
        self.quizzes.insert_quiz(&quiz).await.map_err(|e| {
            tracing::error!("Failed to store quiz: {}", e);
            e
        })?;

        tracing::info!(
            "Quiz {} stored ({} questions from {})",
            quiz.id,
            quiz.questions.len(),
            generated.source.as_str()
        );

        Ok(GenerateQuizResponse {
            quiz_id: quiz.id.to_hex(),
            questions: quiz.client_questions(),
            topic: quiz.topic,
        })
    }

    /// Scores answers against the stored quiz. Read-only and deterministic.
    pub async fn submit(&self, req: SubmitQuizRequest) -> Result<SubmitQuizResponse, QuizError> {
        let (quiz_id, answers) = match (req.quiz_id, req.answers) {
            (Some(id), Some(answers)) if !id.trim().is_empty() => (id, answers),
            _ => {
                return Err(QuizError::Validation(
                    "Quiz ID and answers array are required".to_string(),
                ))
            }
        };

        let quiz = self.load(&quiz_id).await?;
        let (score, results) = score_answers(&quiz.questions, &answers);
        let total = quiz.questions.len() as u32;
        let pct = percentage(score, total);

        QUIZ_SUBMISSIONS_TOTAL
            .with_label_values(&[PerformanceBand::from_percentage(pct).as_str()])
            .inc();
        tracing::info!("Quiz {} scored {}/{} ({}%)", quiz_id, score, total, pct);

        Ok(SubmitQuizResponse {
            score,
            total_questions: total,
            percentage: pct,
            results,
            topic: quiz.topic,
        })
    }

    pub async fn get(&self, quiz_id: &str) -> Result<QuizView, QuizError> {
        Ok(self.load(quiz_id).await?.view())
    }

    pub async fn feedback(&self, req: FeedbackRequest) -> Result<FeedbackResponse, QuizError> {
        let topic = req
            .topic
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        let (topic, score, total) = match (topic, req.score, req.total_questions) {
            (Some(topic), Some(score), Some(total)) if total > 0 => (topic.to_string(), score, total),
            _ => {
                return Err(QuizError::Validation(
                    "Topic, score, and totalQuestions are required".to_string(),
                ))
            }
        };
        if score < 0 || score > total {
            return Err(QuizError::Validation(
                "Score must be between 0 and totalQuestions".to_string(),
            ));
        }
        let total = u32::try_from(total)
            .map_err(|_| QuizError::Validation("totalQuestions is too large".to_string()))?;
        let score = score as u32;

        tracing::info!("Generating feedback for topic: {}, score: {}/{}", topic, score, total);

        let input = FeedbackInput::new(topic, score, total, req.results);
        let feedback = self.gateway.generate_feedback(&input).await;

        Ok(FeedbackResponse {
            feedback: feedback.text,
            percentage: input.percentage(),
            topic: input.topic,
            score,
            total_questions: total,
        })
    }

    async fn load(&self, quiz_id: &str) -> Result<QuizRecord, QuizError> {
        let not_found = || QuizError::NotFound("Quiz not found".to_string());
        // Malformed ids cannot name a stored quiz
        let id = ObjectId::parse_str(quiz_id.trim()).map_err(|_| not_found())?;
        self.quizzes.find_quiz(&id).await?.ok_or_else(not_found)
    }
}
