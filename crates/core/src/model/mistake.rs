use crate::model::Question;

/// An incorrect first attempt recorded during a top-level session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mistake {
    pub question: Question,
    pub user_answer: String,
}

impl Mistake {
    #[must_use]
    pub fn new(question: Question, user_answer: impl Into<String>) -> Self {
        Self {
            question,
            user_answer: user_answer.into(),
        }
    }
}
