use std::sync::Arc;

use quiz_core::model::SetCatalog;
use storage::repository::{FlashcardSource, UserResults};

use crate::error::DataSourceError;
use crate::report_service::HistoryCache;

/// Everything the index needs, fetched together at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedCatalog {
    pub sets: SetCatalog,
    pub results: UserResults,
}

/// Loads question sets and the user's historical results.
#[derive(Clone)]
pub struct CatalogService {
    source: Arc<dyn FlashcardSource>,
    history: HistoryCache,
}

impl CatalogService {
    #[must_use]
    pub fn new(source: Arc<dyn FlashcardSource>, history: HistoryCache) -> Self {
        Self { source, history }
    }

    /// Fetch sets and results concurrently; both must succeed.
    ///
    /// On success the history cache is replaced with the fetched results.
    ///
    /// # Errors
    ///
    /// Returns `DataSourceError` if either fetch fails or answers with an error payload.
    pub async fn load(&self, user_name: &str) -> Result<LoadedCatalog, DataSourceError> {
        let fetched = tokio::try_join!(
            self.source.fetch_sets(),
            self.source.fetch_user_results(user_name),
        );
        let (sets, results) = match fetched {
            Ok(pair) => pair,
            Err(err) => {
                tracing::error!(user = user_name, error = %err, "failed to load quiz data");
                return Err(err.into());
            }
        };

        tracing::info!(sets = sets.len(), results = results.len(), "quiz data loaded");
        self.history.replace_all(results.clone());
        Ok(LoadedCatalog { sets, results })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quiz_core::model::{FlashcardSet, Question, SessionRecord};
    use storage::repository::{InMemoryRepository, StorageError};

    struct Broken;

    #[async_trait]
    impl FlashcardSource for Broken {
        async fn fetch_sets(&self) -> Result<SetCatalog, StorageError> {
            Ok(SetCatalog::new())
        }

        async fn fetch_user_results(&self, _: &str) -> Result<UserResults, StorageError> {
            Err(StorageError::Remote("Sheet not found".into()))
        }
    }

    #[tokio::test]
    async fn load_seeds_history() {
        let repo = InMemoryRepository::new();
        let q = Question::new("Q", vec!["a".into(), "b".into()], "a", None);
        repo.put_set(FlashcardSet::new("Verbs", vec![q])).unwrap();
        repo.put_user_result("Ana", "Verbs", SessionRecord::new(9, 15, 60))
            .unwrap();

        let history = HistoryCache::new();
        let service = CatalogService::new(Arc::new(repo), history.clone());
        let loaded = service.load("Ana").await.unwrap();

        assert_eq!(loaded.sets.len(), 1);
        assert_eq!(history.get("Verbs"), Some(SessionRecord::new(9, 15, 60)));
    }

    #[tokio::test]
    async fn either_failure_fails_the_load() {
        let history = HistoryCache::new();
        history.record("Old", SessionRecord::new(1, 15, 7));
        let service = CatalogService::new(Arc::new(Broken), history.clone());

        let err = service.load("Ana").await.unwrap_err();
        assert!(matches!(err, DataSourceError::Storage(StorageError::Remote(_))));
        assert_eq!(history.get("Old"), Some(SessionRecord::new(1, 15, 7)));
    }
}
