mod driver;
mod progress;
mod service;
mod summary;
mod timer;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use driver::SessionDriver;
pub use progress::SessionProgress;
pub use service::{AnswerOutcome, QuizSession, SessionState};
pub use summary::SessionSummary;
pub use timer::AdvanceTimer;
pub use view::{Feedback, QuestionView, QuizSnapshot};
pub use workflow::{AdvanceTicket, SessionController, SessionEffect, SessionEvent};
