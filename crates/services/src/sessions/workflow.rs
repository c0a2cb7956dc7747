use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use quiz_core::Clock;
use quiz_core::model::{FlashcardSet, QuizSettings};

use super::service::{AnswerOutcome, QuizSession, SessionState};
use super::summary::SessionSummary;
use super::view::QuizSnapshot;
use crate::error::SessionError;

/// Identifies one scheduled auto-advance.
///
/// A ticket is only honoured while it is the controller's pending ticket, so a
/// timer that fires after the question moved on, or after the session was
/// replaced, is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdvanceTicket {
    generation: u64,
    question: usize,
}

impl AdvanceTicket {
    pub(super) fn new(generation: u64, question: usize) -> Self {
        Self {
            generation,
            question,
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn question(&self) -> usize {
        self.question
    }
}

/// External inputs to the quiz flow.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Start(FlashcardSet),
    OptionChosen(String),
    AdvanceTimerFired(AdvanceTicket),
    ContinueClicked,
    RedoRequested,
    ReturnToIndex,
}

/// Side effects the host must carry out after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    ScheduleAdvance {
        ticket: AdvanceTicket,
        delay: Duration,
    },
    CancelAdvance {
        ticket: AdvanceTicket,
    },
    /// A top-level session completed and should be reported.
    Report(SessionSummary),
}

/// Owns the live session and translates events into model transitions.
///
/// Holds no scoring rules of its own; it only sequences `QuizSession` calls
/// and tracks which advance ticket is still live.
pub struct SessionController {
    settings: QuizSettings,
    clock: Clock,
    rng: StdRng,
    session: Option<QuizSession>,
    generation: u64,
    pending: Option<AdvanceTicket>,
}

impl SessionController {
    #[must_use]
    pub fn new(settings: QuizSettings, clock: Clock) -> Self {
        Self {
            settings,
            clock,
            rng: StdRng::from_os_rng(),
            session: None,
            generation: 0,
            pending: None,
        }
    }

    /// Use a caller-provided generator for question and option order.
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn pending_advance(&self) -> Option<AdvanceTicket> {
        self.pending
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        QuizSnapshot::from_session(self.session.as_ref())
    }

    /// Apply one event.
    ///
    /// On error nothing has changed. Duplicate advance triggers (a stale timer,
    /// or a click once the card has moved on) are accepted as no-ops.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` when the event is not legal in the current state,
    /// including `InsufficientQuestions` for a set that is too small.
    pub fn handle(&mut self, event: SessionEvent) -> Result<Vec<SessionEffect>, SessionError> {
        match event {
            SessionEvent::Start(set) => self.start(&set),
            SessionEvent::OptionChosen(answer) => self.choose(&answer),
            SessionEvent::AdvanceTimerFired(ticket) => self.timer_fired(ticket),
            SessionEvent::ContinueClicked => self.continue_clicked(),
            SessionEvent::RedoRequested => self.redo(),
            SessionEvent::ReturnToIndex => Ok(self.replace_session(None)),
        }
    }

    fn start(&mut self, set: &FlashcardSet) -> Result<Vec<SessionEffect>, SessionError> {
        let session = QuizSession::start(set, &self.settings, self.clock.now(), &mut self.rng)?;
        Ok(self.replace_session(Some(session)))
    }

    fn redo(&mut self) -> Result<Vec<SessionEffect>, SessionError> {
        let now = self.clock.now();
        let session = self.session.as_ref().ok_or(SessionError::NoActiveSession)?;
        let redo = session.redo(now, &mut self.rng)?;
        Ok(self.replace_session(Some(redo)))
    }

    fn choose(&mut self, answer: &str) -> Result<Vec<SessionEffect>, SessionError> {
        let now = self.clock.now();
        let session = self.session.as_mut().ok_or(SessionError::NoActiveSession)?;

        match session.state() {
            SessionState::Presenting(index) => match session.submit(answer)? {
                AnswerOutcome::Correct => {
                    let ticket = AdvanceTicket::new(self.generation, index);
                    self.pending = Some(ticket);
                    Ok(vec![SessionEffect::ScheduleAdvance {
                        ticket,
                        delay: self.settings.auto_proceed_delay(),
                    }])
                }
                AnswerOutcome::Incorrect => Ok(self.cancel_pending().into_iter().collect()),
            },
            SessionState::AnsweredIncorrect(_) => {
                let completed = session.confirm_reveal(answer, now, &mut self.rng)?;
                let mut effects: Vec<_> = self.cancel_pending().into_iter().collect();
                effects.extend(report_effect(completed));
                Ok(effects)
            }
            // Waiting for the advance; further clicks on options do nothing.
            SessionState::AnsweredCorrect(_) => Ok(Vec::new()),
            SessionState::Complete => Err(SessionError::InvalidTransition {
                action: "answer",
                state: SessionState::Complete.name(),
            }),
        }
    }

    fn timer_fired(&mut self, ticket: AdvanceTicket) -> Result<Vec<SessionEffect>, SessionError> {
        if self.pending != Some(ticket) {
            tracing::debug!(?ticket, "ignoring stale advance ticket");
            return Ok(Vec::new());
        }
        self.pending = None;
        self.advance()
    }

    fn continue_clicked(&mut self) -> Result<Vec<SessionEffect>, SessionError> {
        let waiting = self
            .session
            .as_ref()
            .is_some_and(|session| matches!(session.state(), SessionState::AnsweredCorrect(_)));
        if !waiting {
            return Ok(Vec::new());
        }
        let mut effects: Vec<_> = self.cancel_pending().into_iter().collect();
        effects.extend(self.advance()?);
        Ok(effects)
    }

    fn advance(&mut self) -> Result<Vec<SessionEffect>, SessionError> {
        let now = self.clock.now();
        let session = self.session.as_mut().ok_or(SessionError::NoActiveSession)?;
        let completed = session.advance(now, &mut self.rng)?;
        Ok(report_effect(completed).into_iter().collect())
    }

    fn replace_session(&mut self, session: Option<QuizSession>) -> Vec<SessionEffect> {
        let effects = self.cancel_pending().into_iter().collect();
        self.generation += 1;
        self.session = session;
        effects
    }

    fn cancel_pending(&mut self) -> Option<SessionEffect> {
        self.pending
            .take()
            .map(|ticket| SessionEffect::CancelAdvance { ticket })
    }
}

fn report_effect(completed: Option<SessionSummary>) -> Option<SessionEffect> {
    completed
        .filter(|summary| !summary.was_redo)
        .map(SessionEffect::Report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Question;
    use quiz_core::time::fixed_clock;

    fn build_set(name: &str, size: usize) -> FlashcardSet {
        let questions = (0..size)
            .map(|n| {
                Question::new(
                    format!("{name} {n}"),
                    vec![format!("yes {n}"), format!("no {n}")],
                    format!("yes {n}"),
                    None,
                )
            })
            .collect();
        FlashcardSet::new(name, questions)
    }

    fn controller() -> SessionController {
        SessionController::new(QuizSettings::default(), fixed_clock())
            .with_rng(StdRng::seed_from_u64(9))
    }

    fn correct(controller: &SessionController) -> String {
        controller
            .session()
            .and_then(QuizSession::current_question)
            .map(|q| q.correct_answer().to_owned())
            .unwrap()
    }

    fn answer_correctly(controller: &mut SessionController) -> AdvanceTicket {
        let answer = correct(controller);
        let effects = controller.handle(SessionEvent::OptionChosen(answer)).unwrap();
        match effects.as_slice() {
            [SessionEffect::ScheduleAdvance { ticket, delay }] => {
                assert_eq!(*delay, Duration::from_millis(1800));
                *ticket
            }
            other => panic!("expected a scheduled advance, got {other:?}"),
        }
    }

    fn index(controller: &SessionController) -> usize {
        controller.session().unwrap().current_index()
    }

    #[test]
    fn timer_then_click_advances_once() {
        let mut controller = controller();
        controller.handle(SessionEvent::Start(build_set("A", 15))).unwrap();
        let ticket = answer_correctly(&mut controller);

        let effects = controller.handle(SessionEvent::AdvanceTimerFired(ticket)).unwrap();
        assert!(effects.is_empty());
        assert_eq!(controller.session().unwrap().state(), SessionState::Presenting(1));

        let effects = controller.handle(SessionEvent::ContinueClicked).unwrap();
        assert!(effects.is_empty());
        assert_eq!(controller.session().unwrap().state(), SessionState::Presenting(1));
        assert_eq!(index(&controller), 1);
    }

    #[test]
    fn click_then_timer_advances_once() {
        let mut controller = controller();
        controller.handle(SessionEvent::Start(build_set("A", 15))).unwrap();
        let ticket = answer_correctly(&mut controller);

        let effects = controller.handle(SessionEvent::ContinueClicked).unwrap();
        assert_eq!(effects, vec![SessionEffect::CancelAdvance { ticket }]);
        assert_eq!(controller.session().unwrap().state(), SessionState::Presenting(1));

        // The next question is answered before the old timer gets delivered.
        let next = answer_correctly(&mut controller);
        let effects = controller.handle(SessionEvent::AdvanceTimerFired(ticket)).unwrap();
        assert!(effects.is_empty());
        assert_eq!(controller.session().unwrap().state(), SessionState::AnsweredCorrect(1));
        assert_eq!(controller.pending_advance(), Some(next));
        assert_eq!(index(&controller), 2);
    }

    #[test]
    fn option_clicks_while_waiting_are_ignored() {
        let mut controller = controller();
        controller.handle(SessionEvent::Start(build_set("A", 15))).unwrap();
        answer_correctly(&mut controller);

        let effects = controller
            .handle(SessionEvent::OptionChosen("no 0".into()))
            .unwrap();
        assert!(effects.is_empty());
        assert_eq!(controller.session().unwrap().score(), 1);
        assert!(controller.session().unwrap().mistakes().is_empty());
    }

    #[test]
    fn insufficient_set_leaves_current_session_untouched() {
        let mut controller = controller();
        controller.handle(SessionEvent::Start(build_set("A", 15))).unwrap();
        let ticket = answer_correctly(&mut controller);

        let err = controller
            .handle(SessionEvent::Start(build_set("Tiny", 3)))
            .unwrap_err();
        assert!(matches!(err, SessionError::InsufficientQuestions { available: 3, .. }));
        assert_eq!(controller.session().unwrap().set_name(), "A");
        assert_eq!(controller.pending_advance(), Some(ticket));
    }

    #[test]
    fn return_to_index_cancels_pending_timer() {
        let mut controller = controller();
        controller.handle(SessionEvent::Start(build_set("A", 15))).unwrap();
        let ticket = answer_correctly(&mut controller);

        let effects = controller.handle(SessionEvent::ReturnToIndex).unwrap();
        assert_eq!(effects, vec![SessionEffect::CancelAdvance { ticket }]);
        assert!(controller.session().is_none());
        assert_eq!(controller.snapshot(), QuizSnapshot::Idle);

        let effects = controller.handle(SessionEvent::AdvanceTimerFired(ticket)).unwrap();
        assert!(effects.is_empty());
        assert!(controller.session().is_none());
    }

    #[test]
    fn new_session_invalidates_old_ticket() {
        let mut controller = controller();
        controller.handle(SessionEvent::Start(build_set("A", 15))).unwrap();
        let stale = answer_correctly(&mut controller);

        let effects = controller.handle(SessionEvent::Start(build_set("B", 15))).unwrap();
        assert_eq!(effects, vec![SessionEffect::CancelAdvance { ticket: stale }]);

        // Same question index in the new session, different generation.
        let fresh = answer_correctly(&mut controller);
        assert_eq!(fresh.question(), stale.question());
        assert_ne!(fresh.generation(), stale.generation());

        controller.handle(SessionEvent::AdvanceTimerFired(stale)).unwrap();
        assert_eq!(controller.session().unwrap().state(), SessionState::AnsweredCorrect(0));
        controller.handle(SessionEvent::AdvanceTimerFired(fresh)).unwrap();
        assert_eq!(controller.session().unwrap().state(), SessionState::Presenting(1));
    }

    #[test]
    fn new_set_after_completion_starts_without_mistakes() {
        let mut controller = controller();
        controller.handle(SessionEvent::Start(build_set("A", 15))).unwrap();
        for i in 0..15 {
            if i < 2 {
                controller
                    .handle(SessionEvent::OptionChosen("wrong".into()))
                    .unwrap();
                let answer = correct(&controller);
                controller.handle(SessionEvent::OptionChosen(answer)).unwrap();
            } else {
                let ticket = answer_correctly(&mut controller);
                controller.handle(SessionEvent::AdvanceTimerFired(ticket)).unwrap();
            }
        }
        assert_eq!(controller.session().unwrap().mistakes().len(), 2);

        controller.handle(SessionEvent::Start(build_set("B", 15))).unwrap();
        let session = controller.session().unwrap();
        assert_eq!(session.set_name(), "B");
        assert!(session.mistakes().is_empty());
        assert!(!session.is_redo());
        assert_eq!(session.score(), 0);
        assert_eq!(session.state(), SessionState::Presenting(0));
    }

    #[test]
    fn completion_reports_top_level_sessions_only() {
        let mut controller = controller();
        controller.handle(SessionEvent::Start(build_set("A", 15))).unwrap();

        let mut reports = Vec::new();
        for i in 0..15 {
            if i == 0 {
                controller
                    .handle(SessionEvent::OptionChosen("wrong".into()))
                    .unwrap();
                let answer = correct(&controller);
                reports.extend(controller.handle(SessionEvent::OptionChosen(answer)).unwrap());
            } else {
                let ticket = answer_correctly(&mut controller);
                reports.extend(controller.handle(SessionEvent::AdvanceTimerFired(ticket)).unwrap());
            }
        }

        let [SessionEffect::Report(summary)] = reports.as_slice() else {
            panic!("expected exactly one report, got {reports:?}");
        };
        assert_eq!(summary.score, 14);
        assert!(summary.redo_offered);
        assert!(matches!(controller.snapshot(), QuizSnapshot::Complete(_)));

        controller.handle(SessionEvent::RedoRequested).unwrap();
        assert_eq!(controller.session().unwrap().set_name(), "A (Review)");
        let answer = correct(&controller);
        let ticket = match controller
            .handle(SessionEvent::OptionChosen(answer))
            .unwrap()
            .as_slice()
        {
            [SessionEffect::ScheduleAdvance { ticket, .. }] => *ticket,
            other => panic!("unexpected effects {other:?}"),
        };
        let effects = controller.handle(SessionEvent::AdvanceTimerFired(ticket)).unwrap();
        assert!(effects.is_empty(), "review must not be reported");

        let QuizSnapshot::Complete(summary) = controller.snapshot() else {
            panic!("review should be complete");
        };
        assert!(summary.was_redo);
        assert_eq!(summary.percentage, 100);
        assert!(!summary.redo_offered);

        let err = controller.handle(SessionEvent::RedoRequested).unwrap_err();
        assert_eq!(err, SessionError::NoMistakes);
    }

    #[test]
    fn events_without_session_are_rejected_or_ignored() {
        let mut controller = controller();
        assert_eq!(
            controller.handle(SessionEvent::OptionChosen("x".into())),
            Err(SessionError::NoActiveSession)
        );
        assert_eq!(controller.handle(SessionEvent::ContinueClicked), Ok(Vec::new()));
        assert_eq!(
            controller.handle(SessionEvent::RedoRequested),
            Err(SessionError::NoActiveSession)
        );
    }
}
