use crate::models::{ClientQuestion, SubmitQuizResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    TopicSelection,
    Loading,
    Active,
    Results,
}

#[derive(Debug, Clone)]
pub enum QuizEvent {
    SelectTopic(String),
    QuestionsReady {
        quiz_id: String,
        questions: Vec<ClientQuestion>,
    },
    GenerationFailed(String),
    Retry,
    ChooseDifferentTopic,
    /// Toggles an option on the current question.
    SelectAnswer(usize),
    Advance,
    Retreat,
    FinishQuiz,
    SubmissionCompleted(SubmitQuizResponse),
    FeedbackReady(String),
    Reset,
}

impl QuizEvent {
    pub fn name(&self) -> &'static str {
        match self {
            QuizEvent::SelectTopic(_) => "SelectTopic",
            QuizEvent::QuestionsReady { .. } => "QuestionsReady",
            QuizEvent::GenerationFailed(_) => "GenerationFailed",
            QuizEvent::Retry => "Retry",
            QuizEvent::ChooseDifferentTopic => "ChooseDifferentTopic",
            QuizEvent::SelectAnswer(_) => "SelectAnswer",
            QuizEvent::Advance => "Advance",
            QuizEvent::Retreat => "Retreat",
            QuizEvent::FinishQuiz => "FinishQuiz",
            QuizEvent::SubmissionCompleted(_) => "SubmissionCompleted",
            QuizEvent::FeedbackReady(_) => "FeedbackReady",
            QuizEvent::Reset => "Reset",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{event} is not allowed on the {screen:?} screen")]
pub struct TransitionError {
    pub event: &'static str,
    pub screen: Screen,
}

/// Client-side quiz state. Every change goes through [`QuizMachine::apply`].
#[derive(Debug, Clone)]
pub struct QuizMachine {
    screen: Screen,
    topic: Option<String>,
    quiz_id: Option<String>,
    questions: Vec<ClientQuestion>,
    answers: Vec<Option<usize>>,
    correct_answers: Vec<Option<u8>>,
    current: usize,
    error: Option<String>,
    results: Option<SubmitQuizResponse>,
    feedback: Option<String>,
}

impl Default for QuizMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizMachine {
    pub fn new() -> Self {
        Self {
            screen: Screen::TopicSelection,
            topic: None,
            quiz_id: None,
            questions: Vec::new(),
            answers: Vec::new(),
            correct_answers: Vec::new(),
            current: 0,
            error: None,
            results: None,
            feedback: None,
        }
    }

    pub fn apply(&mut self, event: QuizEvent) -> Result<(), TransitionError> {
        let rejected = TransitionError {
            event: event.name(),
            screen: self.screen,
        };

        match (self.screen, event) {
            (_, QuizEvent::Reset) | (_, QuizEvent::ChooseDifferentTopic) => {
                *self = Self::new();
            }
            (Screen::TopicSelection, QuizEvent::SelectTopic(topic)) => {
                *self = Self::new();
                self.topic = Some(topic);
                self.screen = Screen::Loading;
            }
            (Screen::Loading, QuizEvent::QuestionsReady { quiz_id, questions }) => {
                self.answers = vec![None; questions.len()];
                self.correct_answers = vec![None; questions.len()];
                self.quiz_id = Some(quiz_id);
                self.questions = questions;
                self.current = 0;
                self.error = None;
                self.screen = Screen::Active;
            }
            (Screen::Loading, QuizEvent::GenerationFailed(message)) => {
                self.error = Some(message);
            }
            (Screen::Loading, QuizEvent::Retry) => {
                self.error = None;
            }
            (Screen::Active, QuizEvent::SelectAnswer(option)) => {
                let option_count = self
                    .questions
                    .get(self.current)
                    .map_or(0, |q| q.options.len());
                if option < option_count {
                    let slot = &mut self.answers[self.current];
                    *slot = if *slot == Some(option) { None } else { Some(option) };
                }
            }
            (Screen::Active, QuizEvent::Advance) => {
                self.current = (self.current + 1).min(self.questions.len().saturating_sub(1));
            }
            (Screen::Active, QuizEvent::Retreat) => {
                self.current = self.current.saturating_sub(1);
            }
            (Screen::Active, QuizEvent::FinishQuiz) => {
                self.screen = Screen::Results;
            }
            // Re-entering the results screen changes nothing
            (Screen::Results, QuizEvent::FinishQuiz) => {}
            (Screen::Results, QuizEvent::SubmissionCompleted(response)) => {
                for result in &response.results {
                    if let Some(slot) = self.correct_answers.get_mut(result.question_index as usize) {
                        *slot = Some(result.correct_answer);
                    }
                }
                self.results = Some(response);
            }
            (Screen::Results, QuizEvent::FeedbackReady(text)) => {
                self.feedback = Some(text);
            }
            _ => return Err(rejected),
        }

        Ok(())
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn quiz_id(&self) -> Option<&str> {
        self.quiz_id.as_deref()
    }

    pub fn questions(&self) -> &[ClientQuestion] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&ClientQuestion> {
        self.questions.get(self.current)
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    /// Known correct answers; filled in once the submission has been scored.
    pub fn correct_answers(&self) -> &[Option<u8>] {
        &self.correct_answers
    }

    pub fn is_last_question(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn results(&self) -> Option<&SubmitQuizResponse> {
        self.results.as_ref()
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Answers in the shape the submit endpoint expects.
    pub fn answers_payload(&self) -> Vec<Option<i64>> {
        self.answers
            .iter()
            .map(|a| a.map(|index| index as i64))
            .collect()
    }

    /// Score from the answers and the correct answers known so far.
    pub fn local_score(&self) -> u32 {
        self.answers
            .iter()
            .zip(&self.correct_answers)
            .filter(|(answer, correct)| match (answer, correct) {
                (Some(a), Some(c)) => *a == *c as usize,
                _ => false,
            })
            .count() as u32
    }
}
