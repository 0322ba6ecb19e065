use serde::{Deserialize, Serialize};

/// Every question carries exactly this many answer options.
pub const OPTION_COUNT: usize = 4;

/// A multiple-choice question as persisted with its quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: u8,
}

impl Question {
    pub fn new(question: impl Into<String>, options: [&str; OPTION_COUNT], correct_answer: u8) -> Self {
        Self {
            question: question.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        !self.question.trim().is_empty()
            && self.options.len() == OPTION_COUNT
            && (self.correct_answer as usize) < OPTION_COUNT
    }

    /// True only when `answer` names the stored correct option.
    /// Absent, negative and out-of-range answers are simply wrong.
    pub fn is_answered_by(&self, answer: Option<i64>) -> bool {
        matches!(answer, Some(a) if a == i64::from(self.correct_answer))
    }

    pub fn option_text(&self, index: Option<i64>) -> Option<&str> {
        let index = usize::try_from(index?).ok()?;
        self.options.get(index).map(String::as_str)
    }

    pub fn correct_option(&self) -> &str {
        self.options
            .get(self.correct_answer as usize)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Client-facing view: the correct answer is withheld.
    pub fn for_client(&self, position: usize) -> ClientQuestion {
        ClientQuestion {
            id: position as u32 + 1,
            question: self.question.clone(),
            options: self.options.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientQuestion {
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question::new(
            "Which planet is known as the Red Planet?",
            ["Venus", "Jupiter", "Mars", "Saturn"],
            2,
        )
    }

    #[test]
    fn test_is_answered_by() {
        let q = sample();
        assert!(q.is_answered_by(Some(2)));
        assert!(!q.is_answered_by(Some(1)));
        assert!(!q.is_answered_by(None));
        assert!(!q.is_answered_by(Some(-2)));
        assert!(!q.is_answered_by(Some(7)));
    }

    #[test]
    fn test_option_text_out_of_range() {
        let q = sample();
        assert_eq!(q.option_text(Some(0)), Some("Venus"));
        assert_eq!(q.option_text(Some(4)), None);
        assert_eq!(q.option_text(Some(-1)), None);
        assert_eq!(q.option_text(None), None);
        assert_eq!(q.correct_option(), "Mars");
    }

    #[test]
    fn test_for_client_hides_answer() {
        let view = serde_json::to_value(sample().for_client(0)).unwrap();
        assert_eq!(view["id"], 1);
        assert!(view.get("correct_answer").is_none());
        assert!(view.get("correctAnswer").is_none());
    }

    #[test]
    fn test_well_formed() {
        assert!(sample().is_well_formed());
        let mut short = sample();
        short.options.pop();
        assert!(!short.is_well_formed());
        let mut bad_index = sample();
        bad_index.correct_answer = 4;
        assert!(!bad_index.is_well_formed());
    }
}
