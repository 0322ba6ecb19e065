use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use super::provider::ProviderError;
use crate::models::{Question, OPTION_COUNT};

lazy_static! {
    // Outermost {...} span; models like to wrap JSON in prose or code fences
    static ref JSON_OBJECT: Regex = Regex::new(r"\{[\s\S]*\}").unwrap();
}

#[derive(Debug, Deserialize)]
struct RawQuestionSet {
    questions: Option<Vec<RawQuestion>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    question: String,
    options: Vec<String>,
    #[serde(alias = "correct_answer")]
    correct_answer: i64,
}

/// Extracts `count` questions from a completion. Every question must have
/// exactly four options and an answer index in `0..4`; extra questions are
/// dropped, too few is an error.
pub fn parse_questions(text: &str, count: usize) -> Result<Vec<Question>, ProviderError> {
    let json = JSON_OBJECT
        .find(text)
        .ok_or_else(|| ProviderError::Malformed("no JSON object in completion".to_string()))?;

    let set: RawQuestionSet = serde_json::from_str(json.as_str())
        .map_err(|e| ProviderError::Malformed(format!("invalid questions JSON: {}", e)))?;

    let raw = set
        .questions
        .ok_or_else(|| ProviderError::Malformed("missing `questions` array".to_string()))?;

    if raw.len() < count {
        return Err(ProviderError::Malformed(format!(
            "expected {} questions, got {}",
            count,
            raw.len()
        )));
    }

    raw.into_iter()
        .take(count)
        .enumerate()
        .map(|(i, q)| {
            if q.options.len() != OPTION_COUNT {
                return Err(ProviderError::Malformed(format!(
                    "question {} has {} options",
                    i + 1,
                    q.options.len()
                )));
            }
            let correct_answer = u8::try_from(q.correct_answer)
                .ok()
                .filter(|a| (*a as usize) < OPTION_COUNT)
                .ok_or_else(|| {
                    ProviderError::Malformed(format!(
                        "question {} has answer index {}",
                        i + 1,
                        q.correct_answer
                    ))
                })?;
            let question = Question {
                question: q.question.trim().to_string(),
                options: q.options,
                correct_answer,
            };
            if !question.is_well_formed() {
                return Err(ProviderError::Malformed(format!(
                    "question {} is empty",
                    i + 1
                )));
            }
            Ok(question)
        })
        .collect()
}
