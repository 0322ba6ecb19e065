pub mod feedback;
pub mod question;
pub mod quiz;
pub mod topic;

pub use feedback::{FeedbackRequest, FeedbackResponse};
pub use question::{ClientQuestion, Question, OPTION_COUNT};
pub use quiz::{
    Difficulty, GenerateQuizRequest, GenerateQuizResponse, QuestionResult, QuizRecord, QuizView,
    SubmitQuizRequest, SubmitQuizResponse,
};
pub use topic::{CreateTopicRequest, Topic, TopicRecord};
