use crate::Result;
use crate::types::{PublishOutcome, PublishRequest, VersionOutcome, VersionRequest};

pub trait PublishRunner: Send + Sync {
    /// Runs the publish script and reports what was actually published.
    ///
    /// # Errors
    ///
    /// Returns an error if the script cannot be started or fails.
    fn publish(&self, request: &PublishRequest) -> Result<PublishOutcome>;
}

pub trait VersionRunner: Send + Sync {
    /// Bumps versions and opens or updates the release pull request.
    ///
    /// # Errors
    ///
    /// Returns an error if the script cannot be started or fails.
    fn version(&self, request: &VersionRequest) -> Result<VersionOutcome>;
}
