use quiz_core::model::Mistake;

/// Outcome of a session, captured at the moment it completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub set_name: String,
    /// First-attempt correct answers, or for a review, questions not missed again.
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
    pub time_taken_secs: u64,
    pub mistakes: Vec<Mistake>,
    pub was_redo: bool,
    pub redo_offered: bool,
}
