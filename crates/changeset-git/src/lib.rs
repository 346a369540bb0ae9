mod error;
mod repository;
mod types;

pub use error::GitError;
pub use repository::Repository;
pub use types::GitUser;

use std::path::Path;

pub type Result<T> = std::result::Result<T, GitError>;

/// # Errors
///
/// Returns an error if the path is not inside a git repository or the
/// repository config cannot be written.
pub fn configure_user(path: &Path, user: &GitUser) -> Result<()> {
    Repository::open(path)?.set_user(user)
}
