use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("questions per set must be > 0")]
    InvalidQuestionsPerSet,
}

/// Tunables for a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    questions_per_set: usize,
    auto_proceed_delay: Duration,
}

impl QuizSettings {
    pub const DEFAULT_QUESTIONS_PER_SET: usize = 15;
    pub const DEFAULT_AUTO_PROCEED_DELAY: Duration = Duration::from_millis(1800);

    /// Creates custom settings.
    ///
    /// A zero delay advances on the next timer tick.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidQuestionsPerSet` if `questions_per_set` is zero.
    pub fn new(
        questions_per_set: usize,
        auto_proceed_delay: Duration,
    ) -> Result<Self, SettingsError> {
        if questions_per_set == 0 {
            return Err(SettingsError::InvalidQuestionsPerSet);
        }
        Ok(Self {
            questions_per_set,
            auto_proceed_delay,
        })
    }

    #[must_use]
    pub fn questions_per_set(&self) -> usize {
        self.questions_per_set
    }

    #[must_use]
    pub fn auto_proceed_delay(&self) -> Duration {
        self.auto_proceed_delay
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            questions_per_set: Self::DEFAULT_QUESTIONS_PER_SET,
            auto_proceed_delay: Self::DEFAULT_AUTO_PROCEED_DELAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_quiz_layout() {
        let settings = QuizSettings::default();
        assert_eq!(settings.questions_per_set(), 15);
        assert_eq!(settings.auto_proceed_delay(), Duration::from_millis(1800));
    }

    #[test]
    fn zero_questions_rejected() {
        let err = QuizSettings::new(0, Duration::ZERO).unwrap_err();
        assert_eq!(err, SettingsError::InvalidQuestionsPerSet);
    }
}
