use std::sync::{Arc, Mutex, MutexGuard};

use quiz_core::model::{MistakeEntry, SessionRecord, Submission};
use storage::repository::{ResultSubmitter, UserResults};

use crate::error::SubmissionError;
use crate::sessions::SessionSummary;

/// Last successfully reported outcome per set name.
///
/// Shared between the catalog loader, which seeds it from the data source,
/// and detached report tasks, which overwrite entries on success.
#[derive(Clone, Default)]
pub struct HistoryCache {
    inner: Arc<Mutex<UserResults>>,
}

impl HistoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, UserResults> {
        // Entries are plain values; a panic mid-insert leaves nothing half-written.
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub fn replace_all(&self, results: UserResults) {
        *self.lock() = results;
    }

    pub fn record(&self, set_name: &str, record: SessionRecord) {
        self.lock().insert(set_name.to_owned(), record);
    }

    #[must_use]
    pub fn get(&self, set_name: &str) -> Option<SessionRecord> {
        self.lock().get(set_name).copied()
    }

    #[must_use]
    pub fn snapshot(&self) -> UserResults {
        self.lock().clone()
    }
}

/// Formats completed sessions and hands them to the results sink.
#[derive(Clone)]
pub struct ResultReporter {
    submitter: Arc<dyn ResultSubmitter>,
    history: HistoryCache,
}

impl ResultReporter {
    #[must_use]
    pub fn new(submitter: Arc<dyn ResultSubmitter>, history: HistoryCache) -> Self {
        Self { submitter, history }
    }

    #[must_use]
    pub fn history(&self) -> &HistoryCache {
        &self.history
    }

    #[must_use]
    pub fn submission_for(&self, user_name: &str, summary: &SessionSummary) -> Submission {
        Submission {
            user_name: user_name.to_owned(),
            set_name: summary.set_name.clone(),
            score: summary.score,
            total: summary.total,
            percentage: summary.percentage,
            time_taken_secs: summary.time_taken_secs,
            mistakes: summary.mistakes.iter().map(MistakeEntry::from).collect(),
        }
    }

    /// Submit once, without retrying.
    ///
    /// The history cache is updated only when the sink acknowledges success.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionError::Rejected` for a non-success acknowledgement.
    /// Returns `SubmissionError::Storage` if the request could not be delivered.
    pub async fn report(&self, submission: Submission) -> Result<(), SubmissionError> {
        let set_name = submission.set_name.as_str();
        match self.submitter.submit_results(&submission).await {
            Ok(ack) if ack.is_success() => {
                tracing::info!(
                    set = set_name,
                    score = submission.score,
                    total = submission.total,
                    "results submitted"
                );
                self.history.record(
                    set_name,
                    SessionRecord::new(submission.score, submission.total, submission.percentage),
                );
                Ok(())
            }
            Ok(ack) => {
                tracing::warn!(
                    set = set_name,
                    message = ack.message.as_deref().unwrap_or_default(),
                    "results rejected"
                );
                Err(SubmissionError::Rejected {
                    message: ack.message,
                })
            }
            Err(err) => {
                tracing::warn!(set = set_name, error = %err, "results submission failed");
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quiz_core::model::{Mistake, Question};
    use storage::repository::{InMemoryRepository, StorageError, SubmitAck};

    struct Offline;

    #[async_trait]
    impl ResultSubmitter for Offline {
        async fn submit_results(&self, _: &Submission) -> Result<SubmitAck, StorageError> {
            Err(StorageError::Connection("offline".into()))
        }
    }

    fn summary() -> SessionSummary {
        let question = Question::new("Capital\nof France?", vec!["Paris".into(), "Rome".into()], "Paris", None);
        SessionSummary {
            set_name: "Geo".into(),
            score: 14,
            total: 15,
            percentage: 93,
            time_taken_secs: 42,
            mistakes: vec![Mistake::new(question, "Rome")],
            was_redo: false,
            redo_offered: true,
        }
    }

    #[test]
    fn submission_carries_mistake_triples() {
        let reporter = ResultReporter::new(Arc::new(InMemoryRepository::new()), HistoryCache::new());
        let submission = reporter.submission_for("Ana", &summary());

        assert_eq!(submission.user_name, "Ana");
        assert_eq!(submission.set_name, "Geo");
        assert_eq!(submission.time_taken_secs, 42);
        assert_eq!(
            submission.mistakes,
            vec![MistakeEntry {
                question: "Capital\nof France?".into(),
                user_answer: "Rome".into(),
                correct_answer: "Paris".into(),
            }]
        );
    }

    #[tokio::test]
    async fn success_updates_history() {
        let repo = InMemoryRepository::new();
        let history = HistoryCache::new();
        let reporter = ResultReporter::new(Arc::new(repo.clone()), history.clone());

        reporter
            .report(reporter.submission_for("Ana", &summary()))
            .await
            .unwrap();

        assert_eq!(history.get("Geo"), Some(SessionRecord::new(14, 15, 93)));
        assert_eq!(repo.submissions().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejection_leaves_history_alone() {
        let repo = InMemoryRepository::new();
        repo.reject_submissions("quota exceeded").unwrap();
        let history = HistoryCache::new();
        history.record("Geo", SessionRecord::new(5, 15, 33));
        let reporter = ResultReporter::new(Arc::new(repo), history.clone());

        let err = reporter
            .report(reporter.submission_for("Ana", &summary()))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SubmissionError::Rejected { message: Some(ref m) } if m == "quota exceeded"
        ));
        assert_eq!(history.get("Geo"), Some(SessionRecord::new(5, 15, 33)));
    }

    #[tokio::test]
    async fn transport_failure_is_reported_as_storage_error() {
        let history = HistoryCache::new();
        let reporter = ResultReporter::new(Arc::new(Offline), history.clone());

        let err = reporter
            .report(reporter.submission_for("Ana", &summary()))
            .await
            .unwrap_err();

        assert!(matches!(err, SubmissionError::Storage(StorageError::Connection(_))));
        assert!(history.snapshot().is_empty());
    }
}
