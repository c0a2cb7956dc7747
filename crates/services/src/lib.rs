#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog_service;
pub mod error;
pub mod profile_service;
pub mod report_service;
pub mod sessions;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use catalog_service::{CatalogService, LoadedCatalog};
pub use error::{AppServicesError, DataSourceError, ProfileError, SessionError, SubmissionError};
pub use profile_service::{DEFAULT_USER_NAME, ProfileService, normalize_user_name};
pub use report_service::{HistoryCache, ResultReporter};
pub use storage::repository::UserResults;

pub use sessions::{
    AdvanceTicket, Feedback, QuestionView, QuizSession, QuizSnapshot, SessionController,
    SessionDriver, SessionEffect, SessionEvent, SessionProgress, SessionState, SessionSummary,
};
