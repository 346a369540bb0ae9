use thiserror::Error;

use crate::types::RegistryKind;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("please add the GITHUB_TOKEN to the changeset action")]
    MissingGithubToken,

    #[error("an auth token has to be written but NPM_TOKEN is not set")]
    MissingRegistryToken,

    #[error("custom registry option requires a registryAuthCheck input")]
    MissingAuthCheckPattern,

    #[error("invalid registry option '{value}'. Allowed values are {}", RegistryKind::allowed_values())]
    InvalidRegistry { value: String },

    #[error("invalid registryAuthCheck pattern '{pattern}'")]
    InvalidAuthCheckPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;
