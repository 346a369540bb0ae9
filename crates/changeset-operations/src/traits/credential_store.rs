use crate::Result;
use crate::types::GitCredentials;

pub trait CredentialStore: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the credential file cannot be written.
    fn write_credentials(&self, credentials: &GitCredentials) -> Result<()>;
}
