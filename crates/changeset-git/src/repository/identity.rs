use crate::{GitError, GitUser, Result};

use super::Repository;

const USER_NAME_KEY: &str = "user.name";
const USER_EMAIL_KEY: &str = "user.email";

impl Repository {
    /// Writes `user.name` and `user.email` to the repository's own config.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be opened or written.
    pub fn set_user(&self, user: &GitUser) -> Result<()> {
        let mut config = self.inner.config()?;

        config
            .set_str(USER_NAME_KEY, &user.name)
            .map_err(|source| GitError::ConfigWrite {
                key: USER_NAME_KEY,
                source,
            })?;
        config
            .set_str(USER_EMAIL_KEY, &user.email)
            .map_err(|source| GitError::ConfigWrite {
                key: USER_EMAIL_KEY,
                source,
            })?;

        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the config cannot be opened.
    pub fn user(&self) -> Result<Option<GitUser>> {
        let config = self.inner.config()?.snapshot()?;

        let (Ok(name), Ok(email)) = (
            config.get_string(USER_NAME_KEY),
            config.get_string(USER_EMAIL_KEY),
        ) else {
            return Ok(None);
        };

        Ok(Some(GitUser { name, email }))
    }
}
