//! Quiz client: typed HTTP access to the API, the screen state machine and
//! the session driver that connects the two.

pub mod api;
pub mod machine;
pub mod results;
pub mod session;

pub use api::{ClientError, HttpQuizClient, QuizBackend};
pub use machine::{QuizEvent, QuizMachine, Screen, TransitionError};
pub use session::QuizSession;
