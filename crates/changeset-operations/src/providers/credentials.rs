use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;
use crate::error::OperationError;
use crate::traits::CredentialStore;
use crate::types::GitCredentials;

/// Writes git credentials as a netrc file, replacing any previous content.
pub struct NetrcCredentialStore {
    path: PathBuf,
}

impl NetrcCredentialStore {
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl CredentialStore for NetrcCredentialStore {
    fn write_credentials(&self, credentials: &GitCredentials) -> Result<()> {
        fs::write(&self.path, credentials.to_netrc()).map_err(|source| {
            OperationError::CredentialsWrite {
                path: self.path.clone(),
                source,
            }
        })
    }
}
