/// A single multiple-choice question as supplied by the data source.
///
/// Questions are immutable once loaded. The option list is kept in source
/// order; display order is decided per presentation by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct_answer: String,
    explanation: Option<String>,
}

impl Question {
    #[must_use]
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
        explanation: Option<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            options,
            correct_answer: correct_answer.into(),
            explanation: explanation.filter(|text| !text.trim().is_empty()),
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    /// Exact string comparison against the correct answer.
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_explanation_is_treated_as_missing() {
        let question = Question::new(
            "2 + 2?",
            vec!["3".into(), "4".into()],
            "4",
            Some("   ".into()),
        );
        assert_eq!(question.explanation(), None);
    }

    #[test]
    fn correctness_is_exact_match() {
        let question = Question::new("Pick", vec!["Yes".into(), "yes".into()], "Yes", None);
        assert!(question.is_correct("Yes"));
        assert!(!question.is_correct("yes"));
        assert!(!question.is_correct("Yes "));
    }
}
