use std::sync::Arc;

use services::{CatalogService, HistoryCache, ProfileService, SessionDriver};

pub trait UiApp: Send + Sync {
    fn catalog(&self) -> Arc<CatalogService>;
    fn profile(&self) -> Arc<ProfileService>;
    fn history(&self) -> HistoryCache;

    /// A driver bound to `user_name`; each quiz shell owns exactly one.
    fn session_driver(&self, user_name: &str) -> SessionDriver;
}

#[derive(Clone)]
pub struct AppContext {
    app: Arc<dyn UiApp>,
    catalog: Arc<CatalogService>,
    profile: Arc<ProfileService>,
    history: HistoryCache,
}

impl AppContext {
    #[must_use]
    pub fn new(app: Arc<dyn UiApp>) -> Self {
        let catalog = app.catalog();
        let profile = app.profile();
        let history = app.history();
        Self {
            app,
            catalog,
            profile,
            history,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn profile(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profile)
    }

    #[must_use]
    pub fn history(&self) -> &HistoryCache {
        &self.history
    }

    #[must_use]
    pub fn session_driver(&self, user_name: &str) -> SessionDriver {
        self.app.session_driver(user_name)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
