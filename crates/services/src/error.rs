//! Shared error types for the services crate.

use thiserror::Error;

use storage::remote::RemoteConfigError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the session model and controller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("set {set_name:?} has {available} questions but {required} are required")]
    InsufficientQuestions {
        set_name: String,
        available: usize,
        required: usize,
    },
    #[error("no session is active")]
    NoActiveSession,
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
    #[error("only the correct option can be confirmed")]
    ConfirmationMismatch,
    #[error("there are no mistakes to review")]
    NoMistakes,
}

/// Startup fetch of sets or historical results failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DataSourceError {
    #[error("could not load quiz data: {0}")]
    Storage(#[from] StorageError),
}

/// Result reporting failed; the local session outcome stands.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmissionError {
    #[error("results were rejected: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProfileService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Config(#[from] RemoteConfigError),
}
