use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::workflow::AdvanceTicket;

/// One-shot auto-advance timer.
///
/// At most one ticket is scheduled at a time. When the delay elapses the
/// ticket is sent on the channel; the receiver feeds it back into the
/// controller, which decides whether it is still live.
pub struct AdvanceTimer {
    sender: mpsc::UnboundedSender<AdvanceTicket>,
    scheduled: Option<(AdvanceTicket, JoinHandle<()>)>,
}

impl AdvanceTimer {
    #[must_use]
    pub fn new(sender: mpsc::UnboundedSender<AdvanceTicket>) -> Self {
        Self {
            sender,
            scheduled: None,
        }
    }

    /// Schedule `ticket`, aborting whatever was scheduled before.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, ticket: AdvanceTicket, delay: Duration) {
        self.abort();
        let sender = self.sender.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver is gone once the host shuts down.
            let _ = sender.send(ticket);
        });
        self.scheduled = Some((ticket, handle));
    }

    /// Abort the timer if it is still the one scheduled for `ticket`.
    pub fn cancel(&mut self, ticket: AdvanceTicket) {
        if self
            .scheduled
            .as_ref()
            .is_some_and(|(scheduled, _)| *scheduled == ticket)
        {
            self.abort();
        }
    }

    #[must_use]
    pub fn scheduled(&self) -> Option<AdvanceTicket> {
        self.scheduled
            .as_ref()
            .filter(|(_, handle)| !handle.is_finished())
            .map(|(ticket, _)| *ticket)
    }

    fn abort(&mut self) {
        if let Some((_, handle)) = self.scheduled.take() {
            handle.abort();
        }
    }
}

impl Drop for AdvanceTimer {
    fn drop(&mut self) {
        self.abort();
    }
}
