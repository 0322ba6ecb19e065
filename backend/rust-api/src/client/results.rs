use lazy_static::lazy_static;
use regex::Regex;

use crate::services::scoring::{percentage, PerformanceBand};

lazy_static! {
    static ref STUDENT_NAME: Regex = Regex::new(r"(?i)\[student name\]").unwrap();
    static ref LEADING_GREETING: Regex = Regex::new(r"(?i)^\s*hey\b,?\s*").unwrap();
    static ref LEADING_COMMA: Regex = Regex::new(r"^\s*,?\s*").unwrap();
}

/// Strips template leftovers from provider feedback before it is shown.
pub fn clean_feedback_text(text: &str) -> String {
    let text = STUDENT_NAME.replace_all(text, "");
    let text = LEADING_GREETING.replace(&text, "");
    let text = LEADING_COMMA.replace(&text, "");
    text.trim().to_string()
}

/// Shown when submission or feedback could not be fetched.
pub fn local_fallback_feedback(topic: &str, score: u32, total: u32) -> String {
    format!(
        "You completed the {} quiz with {}/{} correct answers ({}%). Great effort!",
        topic,
        score,
        total,
        percentage(score, total)
    )
}

/// Band for the results screen. Uses the unrounded ratio.
pub fn result_band(score: u32, total: u32) -> PerformanceBand {
    if total == 0 {
        return PerformanceBand::NeedsWork;
    }
    PerformanceBand::from_percentage(score * 100 / total)
}

pub fn performance_label(band: PerformanceBand) -> &'static str {
    match band {
        PerformanceBand::Excellent => "Excellent!",
        PerformanceBand::Good => "Good Job!",
        PerformanceBand::Fair => "Not Bad!",
        PerformanceBand::NeedsWork => "Keep Learning!",
    }
}

pub fn performance_emoji(band: PerformanceBand) -> &'static str {
    match band {
        PerformanceBand::Excellent => "🏆",
        PerformanceBand::Good => "👏",
        PerformanceBand::Fair => "👍",
        PerformanceBand::NeedsWork => "💪",
    }
}

pub fn performance_color(band: PerformanceBand) -> &'static str {
    match band {
        PerformanceBand::Excellent => "#27ae60",
        PerformanceBand::Good => "#f39c12",
        PerformanceBand::Fair => "#e67e22",
        PerformanceBand::NeedsWork => "#e74c3c",
    }
}
