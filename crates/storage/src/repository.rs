use async_trait::async_trait;
use quiz_core::model::{FlashcardSet, SessionRecord, SetCatalog, Submission};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    /// The remote endpoint answered with an application-level error payload.
    #[error("remote error: {0}")]
    Remote(String),
}

/// Historical results for one user, keyed by set name.
pub type UserResults = HashMap<String, SessionRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Success,
    Failure,
}

/// Acknowledgement returned by the results sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitAck {
    pub status: SubmitStatus,
    pub message: Option<String>,
}

impl SubmitAck {
    #[must_use]
    pub fn success() -> Self {
        Self {
            status: SubmitStatus::Success,
            message: None,
        }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: SubmitStatus::Failure,
            message: Some(message.into()),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == SubmitStatus::Success
    }
}

/// Read side of the remote data source.
#[async_trait]
pub trait FlashcardSource: Send + Sync {
    /// Fetch every named question set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on transport failure or an error payload.
    async fn fetch_sets(&self) -> Result<SetCatalog, StorageError>;

    /// Fetch the last reported result per set for a user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on transport failure or an error payload.
    async fn fetch_user_results(&self, user_name: &str) -> Result<UserResults, StorageError>;
}

/// Write side of the remote data source.
#[async_trait]
pub trait ResultSubmitter: Send + Sync {
    /// Hand a completed session to the results sink.
    ///
    /// A `SubmitAck` with a failure status is an application-level rejection;
    /// transport problems surface as `Err`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the request cannot be delivered or decoded.
    async fn submit_results(&self, submission: &Submission) -> Result<SubmitAck, StorageError>;
}

/// Local single-key persistence for the display name.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn get_user_name(&self) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    async fn save_user_name(&self, name: &str) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    sets: Arc<Mutex<SetCatalog>>,
    results: Arc<Mutex<HashMap<String, UserResults>>>,
    submissions: Arc<Mutex<Vec<Submission>>>,
    rejection: Arc<Mutex<Option<String>>>,
    user_name: Arc<Mutex<Option<String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn put_set(&self, set: FlashcardSet) -> Result<(), StorageError> {
        let mut guard = self
            .sets
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(set);
        Ok(())
    }

    /// Seed a historical result for a user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn put_user_result(
        &self,
        user_name: &str,
        set_name: &str,
        record: SessionRecord,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .entry(user_name.to_owned())
            .or_default()
            .insert(set_name.to_owned(), record);
        Ok(())
    }

    /// Make every subsequent submission answer with a failure status.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn reject_submissions(&self, message: impl Into<String>) -> Result<(), StorageError> {
        let mut guard = self
            .rejection
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(message.into());
        Ok(())
    }

    /// Submissions received so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn submissions(&self) -> Result<Vec<Submission>, StorageError> {
        let guard = self
            .submissions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl FlashcardSource for InMemoryRepository {
    async fn fetch_sets(&self) -> Result<SetCatalog, StorageError> {
        let guard = self
            .sets
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn fetch_user_results(&self, user_name: &str) -> Result<UserResults, StorageError> {
        let guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(user_name).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl ResultSubmitter for InMemoryRepository {
    async fn submit_results(&self, submission: &Submission) -> Result<SubmitAck, StorageError> {
        let rejection = self
            .rejection
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?
            .clone();
        if let Some(message) = rejection {
            return Ok(SubmitAck::failure(message));
        }

        self.submissions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?
            .push(submission.clone());

        let record = SessionRecord::new(submission.score, submission.total, submission.percentage);
        self.put_user_result(&submission.user_name, &submission.set_name, record)?;
        Ok(SubmitAck::success())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn get_user_name(&self) -> Result<Option<String>, StorageError> {
        let guard = self
            .user_name
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_user_name(&self, name: &str) -> Result<(), StorageError> {
        let mut guard = self
            .user_name
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(name.to_owned());
        Ok(())
    }
}

/// Aggregates the data-source and profile contracts behind trait objects.
#[derive(Clone)]
pub struct Storage {
    pub sets: Arc<dyn FlashcardSource>,
    pub results: Arc<dyn ResultSubmitter>,
    pub profile: Arc<dyn ProfileRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_in_memory(&InMemoryRepository::new())
    }

    #[must_use]
    pub fn from_in_memory(repo: &InMemoryRepository) -> Self {
        let sets: Arc<dyn FlashcardSource> = Arc::new(repo.clone());
        let results: Arc<dyn ResultSubmitter> = Arc::new(repo.clone());
        let profile: Arc<dyn ProfileRepository> = Arc::new(repo.clone());
        Self {
            sets,
            results,
            profile,
        }
    }
}
