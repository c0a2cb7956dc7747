use super::progress::SessionProgress;
use super::service::{QuizSession, SessionState};
use super::summary::SessionSummary;

/// Feedback shown after an answer on the current card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct {
        chosen: String,
    },
    Incorrect {
        chosen: String,
        correct_answer: String,
        explanation: Option<String>,
    },
}

/// Everything a view needs to draw the current card.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionView {
    pub set_name: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub feedback: Option<Feedback>,
    pub progress: SessionProgress,
    pub is_redo: bool,
}

/// Read-only snapshot emitted after every controller transition.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizSnapshot {
    /// No session is live; the index is showing.
    Idle,
    Question(QuestionView),
    Complete(SessionSummary),
}

impl QuizSnapshot {
    #[must_use]
    pub fn from_session(session: Option<&QuizSession>) -> Self {
        let Some(session) = session else {
            return Self::Idle;
        };

        if let Some(summary) = session.summary().filter(|_| session.is_complete()) {
            return Self::Complete(summary.clone());
        }

        let Some(question) = session.current_question() else {
            return Self::Idle;
        };

        let chosen = session.last_answer().unwrap_or_default().to_owned();
        let feedback = match session.state() {
            SessionState::AnsweredCorrect(_) => Some(Feedback::Correct { chosen }),
            SessionState::AnsweredIncorrect(_) => Some(Feedback::Incorrect {
                chosen,
                correct_answer: question.correct_answer().to_owned(),
                explanation: question.explanation().map(str::to_owned),
            }),
            SessionState::Presenting(_) | SessionState::Complete => None,
        };

        Self::Question(QuestionView {
            set_name: session.set_name().to_owned(),
            prompt: question.prompt().to_owned(),
            options: session.display_options().to_vec(),
            feedback,
            progress: session.progress(),
            is_redo: session.is_redo(),
        })
    }
}
