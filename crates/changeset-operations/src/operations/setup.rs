use std::path::PathBuf;

use changeset_git::GitUser;
use tracing::info;

use crate::Result;
use crate::traits::{CredentialStore, GitIdentity};
use crate::types::GitCredentials;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupInput {
    pub project_root: PathBuf,
    pub setup_git_user: bool,
    pub github_token: String,
}

/// Prepares git for commits and pushes made later in the run.
pub struct SetupOperation<G, C> {
    git_identity: G,
    credential_store: C,
}

impl<G, C> SetupOperation<G, C>
where
    G: GitIdentity,
    C: CredentialStore,
{
    pub fn new(git_identity: G, credential_store: C) -> Self {
        Self {
            git_identity,
            credential_store,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the git identity or the credential file cannot be
    /// written.
    pub fn execute(&self, input: &SetupInput) -> Result<()> {
        if input.setup_git_user {
            info!("setting git user");
            self.git_identity
                .configure_user(&input.project_root, &GitUser::actions_bot())?;
        }

        info!("setting GitHub credentials");
        self.credential_store
            .write_credentials(&GitCredentials::github_actions(&input.github_token))
    }
}
