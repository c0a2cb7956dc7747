use chrono::{DateTime, Utc};
use rand::Rng;
use std::fmt;

use quiz_core::model::{FlashcardSet, Mistake, Question, QuizSettings, percentage};
use quiz_core::shuffle;
use quiz_core::time::elapsed_secs;

use super::progress::SessionProgress;
use super::summary::SessionSummary;
use crate::error::SessionError;

const REVIEW_SUFFIX: &str = " (Review)";

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Where a session is in its question loop. The index is the question being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Presenting(usize),
    AnsweredCorrect(usize),
    AnsweredIncorrect(usize),
    Complete,
}

impl SessionState {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SessionState::Presenting(_) => "presenting a question",
            SessionState::AnsweredCorrect(_) => "waiting to advance",
            SessionState::AnsweredIncorrect(_) => "waiting for the correct option",
            SessionState::Complete => "complete",
        }
    }

    #[must_use]
    pub fn question_index(self) -> Option<usize> {
        match self {
            SessionState::Presenting(i)
            | SessionState::AnsweredCorrect(i)
            | SessionState::AnsweredIncorrect(i) => Some(i),
            SessionState::Complete => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// A live quiz run over a fixed list of questions.
///
/// `current_index` moves forward exactly once per question: at a correct
/// first answer, or when the correct option is confirmed after a miss.
pub struct QuizSession {
    set_name: String,
    questions: Vec<Question>,
    current_index: usize,
    score: u32,
    mistakes: Vec<Mistake>,
    is_redo: bool,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    state: SessionState,
    display_options: Vec<String>,
    last_answer: Option<String>,
    summary: Option<SessionSummary>,
}

impl QuizSession {
    /// Draw `questions_per_set` questions from `set` in random order and
    /// present the first.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InsufficientQuestions` if the set is too small.
    pub fn start<R: Rng + ?Sized>(
        set: &FlashcardSet,
        settings: &QuizSettings,
        started_at: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let required = settings.questions_per_set();
        if set.len() < required {
            return Err(SessionError::InsufficientQuestions {
                set_name: set.name().to_owned(),
                available: set.len(),
                required,
            });
        }

        let questions = shuffle::draw(set.questions(), required, rng);
        let mut session = Self::fresh(set.name().to_owned(), questions, false, started_at);
        session.present(started_at, rng);
        tracing::info!(set = set.name(), questions = required, "session started");
        Ok(session)
    }

    /// Build a review session from this session's mistakes, in the order
    /// they were made.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the session is complete,
    /// and `SessionError::NoMistakes` if there is nothing to review.
    pub fn redo<R: Rng + ?Sized>(
        &self,
        started_at: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        if self.state != SessionState::Complete {
            return Err(SessionError::InvalidTransition {
                action: "review mistakes",
                state: self.state.name(),
            });
        }
        if self.mistakes.is_empty() {
            return Err(SessionError::NoMistakes);
        }

        let questions = self
            .mistakes
            .iter()
            .map(|mistake| mistake.question.clone())
            .collect::<Vec<_>>();
        let set_name = format!("{}{REVIEW_SUFFIX}", base_set_name(&self.set_name));
        let mut session = Self::fresh(set_name, questions, true, started_at);
        session.present(started_at, rng);
        tracing::info!(
            set = session.set_name.as_str(),
            questions = session.questions.len(),
            "review started"
        );
        Ok(session)
    }

    fn fresh(
        set_name: String,
        questions: Vec<Question>,
        is_redo: bool,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            set_name,
            questions,
            current_index: 0,
            score: 0,
            mistakes: Vec::new(),
            is_redo,
            started_at,
            completed_at: None,
            state: SessionState::Presenting(0),
            display_options: Vec::new(),
            last_answer: None,
            summary: None,
        }
    }

    #[must_use]
    pub fn set_name(&self) -> &str {
        &self.set_name
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn mistakes(&self) -> &[Mistake] {
        &self.mistakes
    }

    #[must_use]
    pub fn is_redo(&self) -> bool {
        self.is_redo
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Complete
    }

    /// The question the current state refers to.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.state
            .question_index()
            .and_then(|index| self.questions.get(index))
    }

    /// Options of the current question in their display order.
    #[must_use]
    pub fn display_options(&self) -> &[String] {
        &self.display_options
    }

    /// The answer submitted for the current question, if any.
    #[must_use]
    pub fn last_answer(&self) -> Option<&str> {
        self.last_answer.as_deref()
    }

    #[must_use]
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.questions.len();
        SessionProgress {
            total,
            answered: self.current_index,
            remaining: total.saturating_sub(self.current_index),
            is_complete: self.is_complete(),
        }
    }

    /// Answer the question being presented.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless a question is being presented.
    pub fn submit(&mut self, answer: &str) -> Result<AnswerOutcome, SessionError> {
        let SessionState::Presenting(index) = self.state else {
            return Err(SessionError::InvalidTransition {
                action: "answer",
                state: self.state.name(),
            });
        };
        let question = &self.questions[index];
        self.last_answer = Some(answer.to_owned());

        if question.is_correct(answer) {
            if !self.is_redo {
                self.score += 1;
            }
            self.current_index += 1;
            self.state = SessionState::AnsweredCorrect(index);
            Ok(AnswerOutcome::Correct)
        } else {
            if !self.is_redo {
                self.mistakes.push(Mistake::new(question.clone(), answer));
            }
            self.state = SessionState::AnsweredIncorrect(index);
            Ok(AnswerOutcome::Incorrect)
        }
    }

    /// Acknowledge the revealed correct option after a miss and move on.
    ///
    /// Returns the summary if this completed the session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the last answer was
    /// incorrect, and `SessionError::ConfirmationMismatch` if `answer` is not
    /// the correct option.
    pub fn confirm_reveal<R: Rng + ?Sized>(
        &mut self,
        answer: &str,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Option<SessionSummary>, SessionError> {
        let SessionState::AnsweredIncorrect(index) = self.state else {
            return Err(SessionError::InvalidTransition {
                action: "confirm the correct option",
                state: self.state.name(),
            });
        };
        if !self.questions[index].is_correct(answer) {
            return Err(SessionError::ConfirmationMismatch);
        }
        self.current_index += 1;
        Ok(self.present(now, rng))
    }

    /// Move past a correctly answered question.
    ///
    /// Returns the summary if this completed the session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the last answer was correct.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Option<SessionSummary>, SessionError> {
        if !matches!(self.state, SessionState::AnsweredCorrect(_)) {
            return Err(SessionError::InvalidTransition {
                action: "advance",
                state: self.state.name(),
            });
        }
        Ok(self.present(now, rng))
    }

    fn present<R: Rng + ?Sized>(
        &mut self,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Option<SessionSummary> {
        self.last_answer = None;
        let Some(question) = self.questions.get(self.current_index) else {
            return Some(self.complete(now));
        };
        self.display_options = shuffle::shuffled(question.options(), rng);
        self.state = SessionState::Presenting(self.current_index);
        None
    }

    fn complete(&mut self, completed_at: DateTime<Utc>) -> SessionSummary {
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        let missed = u32::try_from(self.mistakes.len()).unwrap_or(u32::MAX);
        let score = if self.is_redo {
            total.saturating_sub(missed)
        } else {
            self.score
        };

        let summary = SessionSummary {
            set_name: self.set_name.clone(),
            score,
            total,
            percentage: percentage(score, total),
            time_taken_secs: elapsed_secs(self.started_at, completed_at),
            mistakes: self.mistakes.clone(),
            was_redo: self.is_redo,
            redo_offered: !self.mistakes.is_empty(),
        };

        if self.is_redo {
            self.mistakes.clear();
            self.is_redo = false;
        }
        self.completed_at = Some(completed_at);
        self.state = SessionState::Complete;
        self.display_options.clear();
        self.summary = Some(summary.clone());

        tracing::info!(
            set = summary.set_name.as_str(),
            score = summary.score,
            total = summary.total,
            review = summary.was_redo,
            "session complete"
        );
        summary
    }
}

fn base_set_name(name: &str) -> &str {
    let mut base = name;
    while let Some(stripped) = base.strip_suffix(REVIEW_SUFFIX) {
        base = stripped;
    }
    base
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("set_name", &self.set_name)
            .field("questions_len", &self.questions.len())
            .field("current_index", &self.current_index)
            .field("score", &self.score)
            .field("mistakes_len", &self.mistakes.len())
            .field("is_redo", &self.is_redo)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
