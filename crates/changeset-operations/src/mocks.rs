use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use changeset_core::{BumpType, Changeset, ChangesetState, PackageRelease, PublishedPackage};
use changeset_git::{GitError, GitUser};

use crate::Result;
use crate::error::OperationError;
use crate::traits::{
    ChangesetStateReader, CredentialStore, GitIdentity, OutputSink, PublishRunner, RcStore,
    VersionRunner,
};
use crate::types::{
    GitCredentials, PublishOutcome, PublishRequest, VersionOutcome, VersionRequest,
};

#[must_use]
pub fn make_changeset(id: &str, package: &str, bump_type: BumpType) -> Changeset {
    Changeset {
        id: id.to_string(),
        summary: format!("Change {id}"),
        releases: vec![PackageRelease {
            name: package.to_string(),
            bump_type,
        }],
    }
}

#[must_use]
pub fn make_empty_changeset(id: &str) -> Changeset {
    Changeset {
        id: id.to_string(),
        summary: String::new(),
        releases: Vec::new(),
    }
}

fn mock_failure(what: &str) -> OperationError {
    OperationError::InvalidScript {
        script: format!("mock {what} failure"),
    }
}

#[derive(Default)]
pub struct MockChangesetReader {
    changesets: Vec<Changeset>,
    fail: bool,
    reads: Mutex<usize>,
}

impl MockChangesetReader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_changeset(mut self, changeset: Changeset) -> Self {
        self.changesets.push(changeset);
        self
    }

    #[must_use]
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn read_count(&self) -> usize {
        *self.reads.lock().expect("lock poisoned")
    }
}

impl ChangesetStateReader for MockChangesetReader {
    fn read_state(&self) -> Result<ChangesetState> {
        *self.reads.lock().expect("lock poisoned") += 1;

        if self.fail {
            return Err(OperationError::ChangesetList {
                path: PathBuf::from(".changeset"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "mock"),
            });
        }

        Ok(self.changesets.iter().cloned().collect())
    }
}

#[derive(Default)]
pub struct MockPublishRunner {
    published: Vec<PublishedPackage>,
    calls: Mutex<Vec<PublishRequest>>,
}

impl MockPublishRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_published(mut self, published: Vec<PublishedPackage>) -> Self {
        self.published = published;
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<PublishRequest> {
        self.calls.lock().expect("lock poisoned").clone()
    }
}

impl PublishRunner for MockPublishRunner {
    fn publish(&self, request: &PublishRequest) -> Result<PublishOutcome> {
        self.calls
            .lock()
            .expect("lock poisoned")
            .push(request.clone());
        Ok(PublishOutcome {
            published_packages: self.published.clone(),
        })
    }
}

#[derive(Default)]
pub struct MockVersionRunner {
    pull_request_number: Option<u64>,
    fail: bool,
    calls: Mutex<Vec<VersionRequest>>,
}

impl MockVersionRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pull_request(mut self, number: u64) -> Self {
        self.pull_request_number = Some(number);
        self
    }

    #[must_use]
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<VersionRequest> {
        self.calls.lock().expect("lock poisoned").clone()
    }
}

impl VersionRunner for MockVersionRunner {
    fn version(&self, request: &VersionRequest) -> Result<VersionOutcome> {
        self.calls
            .lock()
            .expect("lock poisoned")
            .push(request.clone());

        if self.fail {
            return Err(mock_failure("version"));
        }

        Ok(VersionOutcome {
            pull_request_number: self.pull_request_number,
        })
    }
}

/// An in-memory file store keyed by path.
#[derive(Default)]
pub struct MockRcStore {
    files: Mutex<HashMap<PathBuf, String>>,
    writes: Mutex<usize>,
}

impl MockRcStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files
            .lock()
            .expect("lock poisoned")
            .insert(path.into(), content.to_string());
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn content(&self, path: &Path) -> Option<String> {
        self.files.lock().expect("lock poisoned").get(path).cloned()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn write_count(&self) -> usize {
        *self.writes.lock().expect("lock poisoned")
    }

    fn record_write(&self) {
        *self.writes.lock().expect("lock poisoned") += 1;
    }
}

impl RcStore for MockRcStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.lock().expect("lock poisoned").contains_key(path)
    }

    fn read(&self, path: &Path) -> Result<Option<String>> {
        Ok(self.content(path))
    }

    fn create(&self, path: &Path, content: &str) -> Result<()> {
        self.record_write();
        self.files
            .lock()
            .expect("lock poisoned")
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn append(&self, path: &Path, content: &str) -> Result<()> {
        self.record_write();
        self.files
            .lock()
            .expect("lock poisoned")
            .entry(path.to_path_buf())
            .or_default()
            .push_str(content);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockOutputs {
    values: Mutex<Vec<(String, String)>>,
}

impl MockOutputs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent value set for `name`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        self.values
            .lock()
            .expect("lock poisoned")
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.lock().expect("lock poisoned").is_empty()
    }
}

impl OutputSink for MockOutputs {
    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .expect("lock poisoned")
            .push((name.to_string(), value.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct MockGitIdentity {
    configured: Mutex<Vec<(PathBuf, GitUser)>>,
    fail: bool,
}

impl MockGitIdentity {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn configured(&self) -> Vec<(PathBuf, GitUser)> {
        self.configured.lock().expect("lock poisoned").clone()
    }
}

impl GitIdentity for MockGitIdentity {
    fn configure_user(&self, project_root: &Path, user: &GitUser) -> Result<()> {
        if self.fail {
            return Err(GitError::NotARepository {
                path: project_root.to_path_buf(),
            }
            .into());
        }

        self.configured
            .lock()
            .expect("lock poisoned")
            .push((project_root.to_path_buf(), user.clone()));
        Ok(())
    }
}

#[derive(Default)]
pub struct MockCredentialStore {
    written: Mutex<Vec<GitCredentials>>,
}

impl MockCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn written(&self) -> Vec<GitCredentials> {
        self.written.lock().expect("lock poisoned").clone()
    }
}

impl CredentialStore for MockCredentialStore {
    fn write_credentials(&self, credentials: &GitCredentials) -> Result<()> {
        self.written
            .lock()
            .expect("lock poisoned")
            .push(credentials.clone());
        Ok(())
    }
}
