//! AI gateway: provider-backed question and feedback generation with
//! deterministic fallbacks. Provider failures never reach callers.

pub mod feedback;
pub mod prompts;
pub mod provider;
pub mod questions;

use std::sync::Arc;
use std::time::Duration;

use crate::metrics::{record_provider_call, FEEDBACK_GENERATED_TOTAL, QUIZZES_GENERATED_TOTAL};
use crate::models::Question;
use crate::services::question_bank;

pub use feedback::{FeedbackInput, FeedbackStrategy};
pub use provider::{CompletionProvider, GeminiProvider, GenerationSettings, ProviderError};

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Failed to generate {count} quiz questions for topic '{topic}'")]
    GenerationFailed { topic: String, count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionSource {
    Provider,
    QuestionBank,
}

impl QuestionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionSource::Provider => "provider",
            QuestionSource::QuestionBank => "question_bank",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedQuestions {
    pub questions: Vec<Question>,
    pub source: QuestionSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
    pub strategy: FeedbackStrategy,
}

#[derive(Clone)]
pub struct AiGateway {
    provider: Arc<dyn CompletionProvider>,
    mock_delay: Duration,
}

impl AiGateway {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            mock_delay: Duration::ZERO,
        }
    }

    /// Simulated latency applied when questions come from the bank because
    /// no provider is configured.
    pub fn with_mock_delay(mut self, delay: Duration) -> Self {
        self.mock_delay = delay;
        self
    }

    pub fn provider_configured(&self) -> bool {
        self.provider.is_configured()
    }

    pub async fn generate_questions(
        &self,
        topic: &str,
        count: usize,
    ) -> Result<GeneratedQuestions, GenerationError> {
        if self.provider.is_configured() {
            match self.questions_from_provider(topic, count).await {
                Ok(questions) => {
                    tracing::info!("AI provider generated {} questions for '{}'", count, topic);
                    return Ok(self.record(questions, QuestionSource::Provider));
                }
                Err(e) => {
                    tracing::warn!(
                        "AI question generation failed for '{}', using question bank: {}",
                        topic,
                        e
                    );
                }
            }
        } else {
            tracing::info!("AI provider not configured, using question bank for '{}'", topic);
            if !self.mock_delay.is_zero() {
                tokio::time::sleep(self.mock_delay).await;
            }
        }

        if !question_bank::has_topic(topic) {
            tracing::debug!(
                "Topic '{}' not in question bank, serving '{}'",
                topic,
                question_bank::DEFAULT_TOPIC
            );
        }

        question_bank::draw(topic, count)
            .map(|questions| self.record(questions, QuestionSource::QuestionBank))
            .ok_or_else(|| GenerationError::GenerationFailed {
                topic: topic.to_string(),
                count,
            })
    }

    async fn questions_from_provider(
        &self,
        topic: &str,
        count: usize,
    ) -> Result<Vec<Question>, ProviderError> {
        let prompt = prompts::question_prompt(topic, count);
        let result = match self
            .provider
            .complete(&prompt, GenerationSettings::QUESTIONS)
            .await
        {
            Ok(text) => questions::parse_questions(&text, count),
            Err(e) => Err(e),
        };
        record_provider_call("questions", result.is_ok());
        result
    }

    fn record(&self, questions: Vec<Question>, source: QuestionSource) -> GeneratedQuestions {
        QUIZZES_GENERATED_TOTAL
            .with_label_values(&[source.as_str()])
            .inc();
        GeneratedQuestions { questions, source }
    }

    /// Walks the strategy chain until one produces text. Always returns.
    pub async fn generate_feedback(&self, input: &FeedbackInput) -> Feedback {
        let chain = feedback::feedback_chain(input, self.provider.is_configured());
        tracing::debug!(
            "Feedback chain for '{}' {}/{}: {:?}",
            input.topic,
            input.score,
            input.total,
            chain
        );

        for strategy in chain {
            match self.run_strategy(strategy, input).await {
                Ok(text) => return self.finish_feedback(text, strategy),
                Err(e) => {
                    tracing::warn!("Feedback strategy {} failed: {}", strategy.as_str(), e);
                }
            }
        }

        // The chain always ends with the generic template; this only guards
        // against an empty chain.
        self.finish_feedback(
            feedback::generic_template(input),
            FeedbackStrategy::GenericTemplate,
        )
    }

    async fn run_strategy(
        &self,
        strategy: FeedbackStrategy,
        input: &FeedbackInput,
    ) -> anyhow::Result<String> {
        match strategy {
            FeedbackStrategy::ProviderDetailed | FeedbackStrategy::ProviderSummary => {
                let prompt = prompts::feedback_prompt(input);
                let result = self
                    .provider
                    .complete(&prompt, GenerationSettings::FEEDBACK)
                    .await
                    .and_then(|text| {
                        let text = text.trim().to_string();
                        if text.is_empty() {
                            Err(ProviderError::EmptyResponse)
                        } else {
                            Ok(text)
                        }
                    });
                record_provider_call("feedback", result.is_ok());
                Ok(result?)
            }
            FeedbackStrategy::DetailedTemplate => Ok(feedback::detailed_template(input)?),
            FeedbackStrategy::GenericTemplate => Ok(feedback::generic_template(input)),
        }
    }

    fn finish_feedback(&self, text: String, strategy: FeedbackStrategy) -> Feedback {
        FEEDBACK_GENERATED_TOTAL
            .with_label_values(&[strategy.as_str()])
            .inc();
        tracing::info!(
            "Feedback produced by {} ({} chars)",
            strategy.as_str(),
            text.len()
        );
        Feedback { text, strategy }
    }
}
