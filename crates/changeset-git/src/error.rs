use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("git operation failed")]
    Git(#[from] git2::Error),

    #[error("not a git repository: '{path}'")]
    NotARepository { path: PathBuf },

    #[error("failed to set git config '{key}'")]
    ConfigWrite {
        key: &'static str,
        #[source]
        source: git2::Error,
    },
}
