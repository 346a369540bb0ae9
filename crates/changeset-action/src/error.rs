use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid action input")]
    Usage(#[from] clap::Error),

    #[error(transparent)]
    Configuration(#[from] changeset_core::ConfigurationError),

    #[error(transparent)]
    Operation(#[from] changeset_operations::OperationError),

    #[error("failed to determine the current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("HOME is not set; it is needed to locate the git and npm credential files")]
    MissingHome,
}

pub type Result<T> = std::result::Result<T, CliError>;
