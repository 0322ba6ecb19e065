use std::collections::HashSet;
use std::time::Duration;

use super::api::{ClientError, QuizBackend};
use super::machine::{QuizEvent, QuizMachine, TransitionError};
use super::results::{clean_feedback_text, local_fallback_feedback};
use crate::models::{FeedbackRequest, GenerateQuizResponse, Topic};
use crate::utils::retry::{retry_async_with_config, RetryConfig};

/// First attempt plus three retries.
pub const GENERATION_ATTEMPTS: usize = 4;
pub const GENERATION_RETRY_DELAY: Duration = Duration::from_secs(2);
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate quiz after multiple attempts. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("{0}")]
    GenerationFailed(String),
}

/// Drives a [`QuizMachine`] against a [`QuizBackend`].
///
/// Each quiz is submitted at most once, however many times the results
/// screen is entered.
pub struct QuizSession<B> {
    backend: B,
    machine: QuizMachine,
    retry: RetryConfig,
    submitted: HashSet<String>,
}

impl<B: QuizBackend> QuizSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            machine: QuizMachine::new(),
            retry: RetryConfig::fixed(GENERATION_ATTEMPTS, GENERATION_RETRY_DELAY),
            submitted: HashSet::new(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn machine(&self) -> &QuizMachine {
        &self.machine
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn topics(&self) -> Result<Vec<Topic>, ClientError> {
        self.backend.list_topics().await
    }

    pub async fn start(&mut self, topic: &str) -> Result<(), SessionError> {
        self.machine
            .apply(QuizEvent::SelectTopic(topic.to_string()))?;
        self.load_questions().await
    }

    /// Manual retry after automatic retries gave up.
    pub async fn retry(&mut self) -> Result<(), SessionError> {
        self.machine.apply(QuizEvent::Retry)?;
        self.load_questions().await
    }

    pub fn choose_different_topic(&mut self) -> Result<(), SessionError> {
        Ok(self.machine.apply(QuizEvent::ChooseDifferentTopic)?)
    }

    pub fn select_answer(&mut self, option: usize) -> Result<(), SessionError> {
        Ok(self.machine.apply(QuizEvent::SelectAnswer(option))?)
    }

    pub fn next(&mut self) -> Result<(), SessionError> {
        Ok(self.machine.apply(QuizEvent::Advance)?)
    }

    pub fn previous(&mut self) -> Result<(), SessionError> {
        Ok(self.machine.apply(QuizEvent::Retreat)?)
    }

    /// Moves to results, then submits and fetches feedback once per quiz.
    /// Failures end in a locally built feedback sentence, never an error.
    pub async fn finish(&mut self) -> Result<(), SessionError> {
        self.machine.apply(QuizEvent::FinishQuiz)?;

        let Some(quiz_id) = self.machine.quiz_id().map(str::to_string) else {
            return Ok(());
        };
        if !self.submitted.insert(quiz_id.clone()) {
            tracing::debug!("Quiz {} already submitted", quiz_id);
            return Ok(());
        }

        let topic = self.machine.topic().unwrap_or_default().to_string();
        let total = self.machine.questions().len() as u32;
        let answers = self.machine.answers_payload();

        let feedback = match self.backend.submit_quiz(&quiz_id, &answers).await {
            Ok(submission) => {
                let request = FeedbackRequest {
                    topic: Some(topic.clone()),
                    score: Some(i64::from(submission.score)),
                    total_questions: Some(i64::from(total)),
                    results: Some(submission.results.clone()),
                };
                self.machine
                    .apply(QuizEvent::SubmissionCompleted(submission))?;

                match self.backend.feedback(&request).await {
                    Ok(response) => clean_feedback_text(&response.feedback),
                    Err(e) => {
                        tracing::warn!("Feedback request failed: {}", e);
                        local_fallback_feedback(&topic, self.machine.local_score(), total)
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Submitting quiz {} failed: {}", quiz_id, e);
                local_fallback_feedback(&topic, self.machine.local_score(), total)
            }
        };

        self.machine.apply(QuizEvent::FeedbackReady(feedback))?;
        Ok(())
    }

    /// Starts a fresh quiz on the same topic.
    pub async fn retake(&mut self) -> Result<(), SessionError> {
        let topic = self.machine.topic().unwrap_or_default().to_string();
        self.machine.apply(QuizEvent::Reset)?;
        self.start(&topic).await
    }

    async fn load_questions(&mut self) -> Result<(), SessionError> {
        let topic = self.machine.topic().unwrap_or_default().to_string();
        let backend = &self.backend;
        let topic_ref = topic.as_str();

        let generated = retry_async_with_config(self.retry.clone(), || async move {
            let quiz = backend.generate_quiz(topic_ref).await;
            if let Err(e) = &quiz {
                tracing::warn!("Generating quiz for {} failed: {}", topic_ref, e);
            }
            quiz
        })
        .await;

        match generated {
            Ok(GenerateQuizResponse {
                quiz_id, questions, ..
            }) if !questions.is_empty() => {
                self.machine
                    .apply(QuizEvent::QuestionsReady { quiz_id, questions })?;
                Ok(())
            }
            _ => {
                self.machine.apply(QuizEvent::GenerationFailed(
                    GENERATION_FAILED_MESSAGE.to_string(),
                ))?;
                Err(SessionError::GenerationFailed(
                    GENERATION_FAILED_MESSAGE.to_string(),
                ))
            }
        }
    }
}
