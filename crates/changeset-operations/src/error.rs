use std::path::PathBuf;
use std::process::ExitStatus;

use changeset_core::ConfigurationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Git(#[from] changeset_git::GitError),

    #[error("failed to list changeset files in '{path}'")]
    ChangesetList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read changeset file '{path}'")]
    ChangesetFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse changeset file '{path}'")]
    ChangesetParse {
        path: PathBuf,
        #[source]
        source: changeset_parse::FormatError,
    },

    #[error("changeset file '{path}' has no usable file name")]
    InvalidChangesetPath { path: PathBuf },

    #[error("failed to read rc file '{path}'")]
    RcFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write rc file '{path}'")]
    RcFileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write git credentials to '{path}'")]
    CredentialsWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to set output '{name}'")]
    OutputWrite {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode published packages")]
    OutputEncode(#[from] serde_json::Error),

    #[error("script '{script}' is empty or has unbalanced quotes")]
    InvalidScript { script: String },

    #[error("failed to start script '{script}'")]
    ScriptSpawn {
        script: String,
        #[source]
        source: std::io::Error,
    },

    #[error("script '{script}' failed with {status}")]
    ScriptFailed {
        script: String,
        status: ExitStatus,
        stderr: String,
    },
}

pub type Result<T> = std::result::Result<T, OperationError>;
