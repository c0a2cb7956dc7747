use crate::model::Mistake;

/// One mistake as reported to the results sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MistakeEntry {
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
}

impl From<&Mistake> for MistakeEntry {
    fn from(mistake: &Mistake) -> Self {
        Self {
            question: mistake.question.prompt().to_owned(),
            user_answer: mistake.user_answer.clone(),
            correct_answer: mistake.question.correct_answer().to_owned(),
        }
    }
}

/// A completed top-level session, formatted for remote persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub user_name: String,
    pub set_name: String,
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
    pub time_taken_secs: u64,
    pub mistakes: Vec<MistakeEntry>,
}
