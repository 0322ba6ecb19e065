//! Feedback strategies and the deterministic templates behind them.

use std::fmt::Write;

use crate::models::QuestionResult;
use crate::services::scoring::{percentage, PerformanceBand};

const CORRECT_PREVIEW_CHARS: usize = 60;
const INCORRECT_PREVIEW_CHARS: usize = 50;
const LISTED_ITEMS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackInput {
    pub topic: String,
    pub score: u32,
    pub total: u32,
    pub results: Option<Vec<QuestionResult>>,
}

impl FeedbackInput {
    pub fn new(
        topic: impl Into<String>,
        score: u32,
        total: u32,
        results: Option<Vec<QuestionResult>>,
    ) -> Self {
        Self {
            topic: topic.into(),
            score,
            total,
            results,
        }
    }

    pub fn percentage(&self) -> u32 {
        percentage(self.score, self.total)
    }

    /// Per-question results, only when there is at least one.
    pub fn detailed_results(&self) -> Option<&[QuestionResult]> {
        self.results.as_deref().filter(|r| !r.is_empty())
    }
}

/// One step of the feedback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackStrategy {
    /// Provider call with every question embedded in the prompt.
    ProviderDetailed,
    /// Paragraph built from the per-question results.
    DetailedTemplate,
    /// Provider call with the score summary only.
    ProviderSummary,
    /// One sentence keyed by percentage band. Never fails.
    GenericTemplate,
}

impl FeedbackStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackStrategy::ProviderDetailed => "provider_detailed",
            FeedbackStrategy::DetailedTemplate => "detailed_template",
            FeedbackStrategy::ProviderSummary => "provider_summary",
            FeedbackStrategy::GenericTemplate => "generic_template",
        }
    }

    pub fn uses_provider(&self) -> bool {
        matches!(
            self,
            FeedbackStrategy::ProviderDetailed | FeedbackStrategy::ProviderSummary
        )
    }
}

/// Strategies to try, in order. The first success wins.
pub fn feedback_chain(input: &FeedbackInput, provider_configured: bool) -> Vec<FeedbackStrategy> {
    let mut chain = Vec::with_capacity(3);
    if input.detailed_results().is_some() {
        if provider_configured {
            chain.push(FeedbackStrategy::ProviderDetailed);
        }
        chain.push(FeedbackStrategy::DetailedTemplate);
    } else if provider_configured {
        chain.push(FeedbackStrategy::ProviderSummary);
    }
    chain.push(FeedbackStrategy::GenericTemplate);
    chain
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("no per-question results to build detailed feedback from")]
    MissingResults,
}

fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

fn plural(n: usize) -> &'static str {
    if n > 1 {
        "s"
    } else {
        ""
    }
}

/// Multi-section feedback built from per-question results: headline, up to
/// two strengths, up to two misses with the chosen and correct options, then
/// next steps for the band.
pub fn detailed_template(input: &FeedbackInput) -> Result<String, TemplateError> {
    let results = input.detailed_results().ok_or(TemplateError::MissingResults)?;
    let pct = input.percentage();
    let band = PerformanceBand::from_percentage(pct);
    let (score, total, topic) = (input.score, input.total, input.topic.as_str());

    let mut feedback = match band {
        PerformanceBand::Excellent => format!(
            "🎉 Excellent work! You scored {}/{} ({}%) on {}.\n\n",
            score, total, pct, topic
        ),
        PerformanceBand::Good => format!(
            "👍 Good job! You scored {}/{} ({}%) on {}.\n\n",
            score, total, pct, topic
        ),
        PerformanceBand::Fair => format!(
            "💪 You scored {}/{} ({}%) on {}. There's room for improvement!\n\n",
            score, total, pct, topic
        ),
        PerformanceBand::NeedsWork => format!(
            "📚 You scored {}/{} ({}%) on {}. Keep learning and practicing!\n\n",
            score, total, pct, topic
        ),
    };

    let correct: Vec<&QuestionResult> = results.iter().filter(|r| r.is_correct).collect();
    let incorrect: Vec<&QuestionResult> = results.iter().filter(|r| !r.is_correct).collect();

    if !correct.is_empty() {
        feedback.push_str("✅ What you got right:\n");
        for r in correct.iter().take(LISTED_ITEMS) {
            let _ = writeln!(feedback, "• {}", preview(&r.question, CORRECT_PREVIEW_CHARS));
        }
        if correct.len() > LISTED_ITEMS {
            let rest = correct.len() - LISTED_ITEMS;
            let _ = writeln!(feedback, "• And {} more correct answer{}!", rest, plural(rest));
        }
        feedback.push('\n');
    }

    if !incorrect.is_empty() {
        feedback.push_str("📖 Areas to review:\n");
        for r in incorrect.iter().take(LISTED_ITEMS) {
            let _ = writeln!(feedback, "• {}", preview(&r.question, INCORRECT_PREVIEW_CHARS));
            let _ = writeln!(
                feedback,
                "  You selected: \"{}\"",
                r.user_option().unwrap_or("No answer")
            );
            let _ = writeln!(feedback, "  Correct answer: \"{}\"", r.correct_option());
        }
        if incorrect.len() > LISTED_ITEMS {
            let rest = incorrect.len() - LISTED_ITEMS;
            let _ = writeln!(
                feedback,
                "• Review {} more question{} for better understanding.",
                rest,
                plural(rest)
            );
        }
        feedback.push('\n');
    }

    feedback.push_str("💡 Next steps:\n");
    match band {
        PerformanceBand::Excellent => {
            feedback.push_str(
                "• You've mastered this topic! Try a more advanced topic or retake to get 100%.\n",
            );
        }
        PerformanceBand::Good => {
            feedback.push_str(
                "• Review the missed questions and retake the quiz to solidify your knowledge.\n",
            );
        }
        PerformanceBand::Fair => {
            let _ = writeln!(
                feedback,
                "• Study the {} material more thoroughly and focus on the concepts you missed.",
                topic
            );
            feedback.push_str("• Take your time on each question and read all options carefully.\n");
        }
        PerformanceBand::NeedsWork => {
            let _ = writeln!(
                feedback,
                "• Start with the basics of {} and build your foundation.",
                topic
            );
            feedback.push_str(
                "• Review each incorrect answer to understand why the correct answer is right.\n",
            );
            feedback.push_str("• Don't get discouraged - mastery takes practice!\n");
        }
    }

    Ok(feedback)
}

/// Single sentence keyed only by the percentage band.
pub fn generic_template(input: &FeedbackInput) -> String {
    let pct = input.percentage();
    let (score, total, topic) = (input.score, input.total, input.topic.as_str());

    match PerformanceBand::from_percentage(pct) {
        PerformanceBand::Excellent => format!(
            "Outstanding performance! You scored {}/{} ({}%) on {}. Your knowledge in this area is impressive!",
            score, total, pct, topic
        ),
        PerformanceBand::Good => format!(
            "Great job! You scored {}/{} ({}%) on {}. You have a solid foundation in this topic.",
            score, total, pct, topic
        ),
        PerformanceBand::Fair => format!(
            "Nice effort! You scored {}/{} ({}%) on {}. There's room for improvement - keep learning!",
            score, total, pct, topic
        ),
        PerformanceBand::NeedsWork => format!(
            "You scored {}/{} ({}%) on {}. Don't worry - every expert was once a beginner! Keep studying and practicing.",
            score, total, pct, topic
        ),
    }
}
