use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::timer::AdvanceTimer;
use super::view::QuizSnapshot;
use super::workflow::{AdvanceTicket, SessionController, SessionEffect, SessionEvent};
use crate::error::SessionError;
use crate::report_service::ResultReporter;

/// Runs a `SessionController` against real time and the results sink.
///
/// Dispatch is synchronous. Timer tickets arrive on a channel that the host
/// either drains itself (`take_tickets`) or polls through `next_ticket`.
pub struct SessionDriver {
    controller: SessionController,
    timer: AdvanceTimer,
    tickets: Option<mpsc::UnboundedReceiver<AdvanceTicket>>,
    reporter: ResultReporter,
    user_name: String,
    reports: Vec<JoinHandle<()>>,
}

impl SessionDriver {
    #[must_use]
    pub fn new(
        controller: SessionController,
        reporter: ResultReporter,
        user_name: impl Into<String>,
    ) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            controller,
            timer: AdvanceTimer::new(sender),
            tickets: Some(receiver),
            reporter,
            user_name: user_name.into(),
            reports: Vec::new(),
        }
    }

    #[must_use]
    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        self.controller.snapshot()
    }

    /// Hand the ticket receiver to the host. Returns `None` after the first call.
    pub fn take_tickets(&mut self) -> Option<mpsc::UnboundedReceiver<AdvanceTicket>> {
        self.tickets.take()
    }

    /// Wait for the next fired ticket, if the receiver has not been taken.
    pub async fn next_ticket(&mut self) -> Option<AdvanceTicket> {
        match self.tickets.as_mut() {
            Some(receiver) => receiver.recv().await,
            None => None,
        }
    }

    /// Apply an event and carry out the resulting effects.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` from the controller; no effect has run in that case.
    pub fn dispatch(&mut self, event: SessionEvent) -> Result<QuizSnapshot, SessionError> {
        let effects = self.controller.handle(event)?;
        for effect in effects {
            self.apply(effect);
        }
        Ok(self.controller.snapshot())
    }

    fn apply(&mut self, effect: SessionEffect) {
        match effect {
            SessionEffect::ScheduleAdvance { ticket, delay } => self.timer.schedule(ticket, delay),
            SessionEffect::CancelAdvance { ticket } => self.timer.cancel(ticket),
            SessionEffect::Report(summary) => {
                let submission = self.reporter.submission_for(&self.user_name, &summary);
                let reporter = self.reporter.clone();
                self.reports.retain(|handle| !handle.is_finished());
                // Outcome is logged by the reporter; completion never waits on it.
                self.reports.push(tokio::spawn(async move {
                    let _ = reporter.report(submission).await;
                }));
            }
        }
    }

    /// Wait for every report spawned so far.
    pub async fn flush_reports(&mut self) {
        for handle in self.reports.drain(..) {
            if let Err(err) = handle.await {
                tracing::warn!(error = %err, "report task did not finish");
            }
        }
    }
}
