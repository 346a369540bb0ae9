use std::path::Path;

use changeset_git::GitUser;

use crate::Result;

pub trait GitIdentity: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or its config
    /// cannot be written.
    fn configure_user(&self, project_root: &Path, user: &GitUser) -> Result<()>;
}
