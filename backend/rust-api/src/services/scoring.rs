use crate::models::{Question, QuestionResult};

/// Percentage-correct buckets shared by feedback templates and result screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceBand {
    Excellent,
    Good,
    Fair,
    NeedsWork,
}

impl PerformanceBand {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            p if p >= 80 => PerformanceBand::Excellent,
            p if p >= 60 => PerformanceBand::Good,
            p if p >= 40 => PerformanceBand::Fair,
            _ => PerformanceBand::NeedsWork,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceBand::Excellent => "excellent",
            PerformanceBand::Good => "good",
            PerformanceBand::Fair => "fair",
            PerformanceBand::NeedsWork => "needs_work",
        }
    }
}

/// `round(100 * score / total)`, 0 for an empty quiz.
pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(score) * 100.0 / f64::from(total)).round() as u32
}

/// Scores `answers` position by position against the stored questions.
/// Missing, negative and out-of-range answers count as incorrect; answers
/// beyond the last question are ignored.
pub fn score_answers(questions: &[Question], answers: &[Option<i64>]) -> (u32, Vec<QuestionResult>) {
    let results: Vec<QuestionResult> = questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let user_answer = answers.get(i).copied().flatten();
            QuestionResult {
                question_index: i as u32,
                question: question.question.clone(),
                options: question.options.clone(),
                correct_answer: question.correct_answer,
                user_answer,
                is_correct: question.is_answered_by(user_answer),
            }
        })
        .collect();

    let score = results.iter().filter(|r| r.is_correct).count() as u32;
    (score, results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::question_bank;

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(3, 5), 60);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(0, 5), 0);
        assert_eq!(percentage(5, 5), 100);
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn test_bands() {
        assert_eq!(PerformanceBand::from_percentage(100), PerformanceBand::Excellent);
        assert_eq!(PerformanceBand::from_percentage(80), PerformanceBand::Excellent);
        assert_eq!(PerformanceBand::from_percentage(79), PerformanceBand::Good);
        assert_eq!(PerformanceBand::from_percentage(60), PerformanceBand::Good);
        assert_eq!(PerformanceBand::from_percentage(40), PerformanceBand::Fair);
        assert_eq!(PerformanceBand::from_percentage(39), PerformanceBand::NeedsWork);
    }

    #[test]
    fn test_score_matches_correct_positions() {
        let questions = question_bank::draw("Science", 5).unwrap();
        // correct: 2, 0, 3, 2, 2
        let answers = vec![Some(2), Some(0), Some(3), Some(0), None];
        let (score, results) = score_answers(&questions, &answers);
        assert_eq!(score, 3);
        assert_eq!(results.len(), 5);
        assert!(results[0].is_correct);
        assert!(!results[3].is_correct);
        assert_eq!(results[4].user_answer, None);
        assert_eq!(results[4].question_index, 4);
    }

    #[test]
    fn test_out_of_range_and_short_answers_never_panic() {
        let questions = question_bank::draw("History", 5).unwrap();
        let answers = vec![Some(-1), Some(99), Some(i64::MAX)];
        let (score, results) = score_answers(&questions, &answers);
        assert_eq!(score, 0);
        assert!(results.iter().all(|r| !r.is_correct));

        let (score, _) = score_answers(&questions, &[]);
        assert_eq!(score, 0);
    }

    #[test]
    fn test_extra_answers_ignored() {
        let questions = question_bank::draw("History", 2).unwrap();
        let (score, results) = score_answers(&questions, &[Some(1), Some(1), Some(3), Some(0)]);
        assert_eq!(score, 2);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let questions = question_bank::draw("Wellness", 5).unwrap();
        let answers = vec![Some(1), Some(1), None, Some(1), Some(3)];
        assert_eq!(score_answers(&questions, &answers), score_answers(&questions, &answers));
    }
}
