use std::sync::Arc;

use quiz_core::model::QuizSettings;
use storage::remote::{RemoteConfig, RemoteSheetSource};
use storage::repository::Storage;

use crate::catalog_service::CatalogService;
use crate::error::AppServicesError;
use crate::profile_service::ProfileService;
use crate::report_service::{HistoryCache, ResultReporter};
use crate::sessions::{SessionController, SessionDriver};
use crate::Clock;

/// Assembles app-facing services around one shared history cache.
#[derive(Clone)]
pub struct AppServices {
    settings: QuizSettings,
    clock: Clock,
    history: HistoryCache,
    catalog: Arc<CatalogService>,
    profile: Arc<ProfileService>,
    reporter: ResultReporter,
}

impl AppServices {
    /// Build services against the web app at `web_app_url`, with the display
    /// name kept in `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Config` if the URL is not a usable http(s) URL.
    /// Returns `AppServicesError::Sqlite` if the profile store cannot be opened.
    pub async fn connect(
        web_app_url: &str,
        db_url: &str,
        settings: QuizSettings,
    ) -> Result<Self, AppServicesError> {
        let config = RemoteConfig::new(web_app_url)?;
        let source = RemoteSheetSource::new(config);
        let storage = Storage::remote_with_sqlite_profile(source, db_url).await?;
        Ok(Self::from_storage(&storage, settings, Clock::default_clock()))
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, settings: QuizSettings, clock: Clock) -> Self {
        let history = HistoryCache::new();
        let catalog = Arc::new(CatalogService::new(
            Arc::clone(&storage.sets),
            history.clone(),
        ));
        let profile = Arc::new(ProfileService::new(Arc::clone(&storage.profile)));
        let reporter = ResultReporter::new(Arc::clone(&storage.results), history.clone());

        Self {
            settings,
            clock,
            history,
            catalog,
            profile,
            reporter,
        }
    }

    /// A fresh driver for `user_name`, sharing this instance's history cache.
    #[must_use]
    pub fn session_driver(&self, user_name: impl Into<String>) -> SessionDriver {
        let controller = SessionController::new(self.settings, self.clock);
        SessionDriver::new(controller, self.reporter.clone(), user_name)
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    #[must_use]
    pub fn history(&self) -> &HistoryCache {
        &self.history
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn profile(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profile)
    }
}
