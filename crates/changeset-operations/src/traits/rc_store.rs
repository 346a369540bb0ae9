use std::path::Path;

use crate::Result;

/// Access to user-level package manager rc files.
///
/// Writes are limited to creating a missing file and appending to an
/// existing one; existing content is never rewritten.
pub trait RcStore: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// Returns `None` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    fn read(&self, path: &Path) -> Result<Option<String>>;

    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    fn create(&self, path: &Path, content: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the file cannot be opened for appending.
    fn append(&self, path: &Path, content: &str) -> Result<()>;
}
