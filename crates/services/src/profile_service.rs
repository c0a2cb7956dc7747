use std::sync::Arc;

use storage::repository::ProfileRepository;

use crate::error::ProfileError;

/// Name used when the prompt is submitted empty.
pub const DEFAULT_USER_NAME: &str = "Student";

/// Trim a display name, falling back to [`DEFAULT_USER_NAME`].
#[must_use]
pub fn normalize_user_name(raw: &str) -> String {
    match raw.trim() {
        "" => DEFAULT_USER_NAME.to_owned(),
        name => name.to_owned(),
    }
}

/// Reads and stores the local display name.
#[derive(Clone)]
pub struct ProfileService {
    profile: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    #[must_use]
    pub fn new(profile: Arc<dyn ProfileRepository>) -> Self {
        Self { profile }
    }

    /// Returns `Ok(None)` until a name has been saved.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Storage` if the profile store cannot be read.
    pub async fn load_user_name(&self) -> Result<Option<String>, ProfileError> {
        Ok(self.profile.get_user_name().await?)
    }

    /// Normalize and persist the name, returning what was stored.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Storage` if the profile store cannot be written.
    pub async fn save_user_name(&self, raw: &str) -> Result<String, ProfileError> {
        let name = normalize_user_name(raw);
        self.profile.save_user_name(&name).await?;
        Ok(name)
    }
}
