//! HTTP client for the spreadsheet-backed web app.

mod wire;

use std::env;

use async_trait::async_trait;
use quiz_core::model::{SetCatalog, Submission};
use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::repository::{FlashcardSource, ResultSubmitter, StorageError, SubmitAck, UserResults};
use wire::{SubmitPayload, SubmitReply, decode_sets, decode_user_results};

pub const WEB_APP_URL_ENV: &str = "QUIZ_WEB_APP_URL";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RemoteConfigError {
    #[error("web app url is not set (QUIZ_WEB_APP_URL)")]
    Missing,
    #[error("invalid web app url {raw:?}: {source}")]
    InvalidUrl {
        raw: String,
        source: url::ParseError,
    },
    #[error("web app url must use http or https: {raw:?}")]
    UnsupportedScheme { raw: String },
}

#[derive(Clone, Debug)]
pub struct RemoteConfig {
    base_url: Url,
}

impl RemoteConfig {
    /// Parse and validate the web app endpoint.
    ///
    /// # Errors
    ///
    /// Returns `RemoteConfigError` if the URL does not parse or is not http(s).
    pub fn new(raw: &str) -> Result<Self, RemoteConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RemoteConfigError::Missing);
        }
        let base_url = Url::parse(trimmed).map_err(|source| RemoteConfigError::InvalidUrl {
            raw: trimmed.to_owned(),
            source,
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(RemoteConfigError::UnsupportedScheme {
                raw: trimmed.to_owned(),
            });
        }
        Ok(Self { base_url })
    }

    /// Read the endpoint from `QUIZ_WEB_APP_URL`.
    ///
    /// # Errors
    ///
    /// Returns `RemoteConfigError::Missing` if unset, or a validation error.
    pub fn from_env() -> Result<Self, RemoteConfigError> {
        let raw = env::var(WEB_APP_URL_ENV).map_err(|_| RemoteConfigError::Missing)?;
        Self::new(&raw)
    }

    fn action_url(&self, action: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("action", action);
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        url
    }
}

/// `FlashcardSource` + `ResultSubmitter` backed by the web app.
#[derive(Clone)]
pub struct RemoteSheetSource {
    client: Client,
    config: RemoteConfig,
}

impl RemoteSheetSource {
    #[must_use]
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn get_text(&self, url: Url) -> Result<String, StorageError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Connection(format!("http status {status}")));
        }

        response
            .text()
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))
    }
}

#[async_trait]
impl FlashcardSource for RemoteSheetSource {
    async fn fetch_sets(&self) -> Result<SetCatalog, StorageError> {
        let url = self.config.action_url("getFlashcardData", &[]);
        let body = self.get_text(url).await?;
        let catalog = decode_sets(&body)?;
        tracing::debug!(sets = catalog.len(), "fetched flashcard sets");
        Ok(catalog)
    }

    async fn fetch_user_results(&self, user_name: &str) -> Result<UserResults, StorageError> {
        let url = self
            .config
            .action_url("getUserResults", &[("userName", user_name)]);
        let body = self.get_text(url).await?;
        let results = decode_user_results(&body)?;
        tracing::debug!(results = results.len(), "fetched user results");
        Ok(results)
    }
}

#[async_trait]
impl ResultSubmitter for RemoteSheetSource {
    async fn submit_results(&self, submission: &Submission) -> Result<SubmitAck, StorageError> {
        let payload = SubmitPayload::from_submission(submission)?;
        let response = self
            .client
            .post(self.config.base_url.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Connection(format!("http status {status}")));
        }

        let reply: SubmitReply = response
            .json()
            .await
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        Ok(reply.into_ack())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_bad_urls() {
        assert!(matches!(RemoteConfig::new("  "), Err(RemoteConfigError::Missing)));
        assert!(matches!(
            RemoteConfig::new("not a url"),
            Err(RemoteConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            RemoteConfig::new("ftp://example.com/exec"),
            Err(RemoteConfigError::UnsupportedScheme { .. })
        ));
    }

    #[test]
    fn action_urls_encode_user_names() {
        let config = RemoteConfig::new("https://script.example.com/macros/s/abc/exec").unwrap();
        let url = config.action_url("getUserResults", &[("userName", "Ana & Ben")]);
        assert_eq!(
            url.as_str(),
            "https://script.example.com/macros/s/abc/exec?action=getUserResults&userName=Ana+%26+Ben"
        );
    }

    #[test]
    fn source_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RemoteSheetSource>();
    }
}
