use std::path::Path;

use changeset_git::GitUser;

use crate::Result;
use crate::traits::GitIdentity;

pub struct Git2Provider;

impl Git2Provider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Git2Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitIdentity for Git2Provider {
    fn configure_user(&self, project_root: &Path, user: &GitUser) -> Result<()> {
        Ok(changeset_git::configure_user(project_root, user)?)
    }
}
