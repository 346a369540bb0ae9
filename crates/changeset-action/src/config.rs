use std::path::{Path, PathBuf};

use changeset_core::{ConfigurationError, RegistryKind};
use changeset_operations::operations::{RegistryAuthRequest, ReleaseInput, SetupInput};

use crate::Cli;
use crate::error::{CliError, Result};

const NETRC_FILE: &str = ".netrc";
const NPMRC_FILE: &str = ".npmrc";
const YARNRC_FILE: &str = ".yarnrc.yml";

/// Resolved action inputs, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionConfig {
    pub project_root: PathBuf,
    pub home: PathBuf,
    pub output_file: Option<PathBuf>,
    pub github_token: String,
    pub npm_token: Option<String>,
    pub setup_git_user: bool,
    pub publish_script: Option<String>,
    pub version_script: Option<String>,
    pub pr_title: Option<String>,
    pub commit_message: Option<String>,
    pub branch: Option<String>,
    pub create_github_releases: bool,
    pub registry: RegistryKind,
    pub registry_auth_check: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn non_empty_path(value: Option<String>) -> Option<PathBuf> {
    non_empty(value).map(PathBuf::from)
}

impl ActionConfig {
    /// Validates the parsed command line. `current_dir` anchors a relative
    /// `cwd` input.
    ///
    /// # Errors
    ///
    /// Returns `MissingGithubToken` before anything else is looked at, then
    /// `InvalidRegistry` for an unknown registry kind and `MissingHome` when
    /// no home directory is available.
    pub fn from_cli(cli: Cli, current_dir: &Path) -> Result<Self> {
        let github_token =
            non_empty(cli.github_token).ok_or(ConfigurationError::MissingGithubToken)?;
        let registry = match non_empty(cli.registry) {
            Some(value) => value.parse()?,
            None => RegistryKind::Npm,
        };
        let home = non_empty_path(cli.home).ok_or(CliError::MissingHome)?;

        let project_root = match non_empty_path(cli.cwd) {
            Some(cwd) => current_dir.join(cwd),
            None => current_dir.to_path_buf(),
        };

        Ok(Self {
            project_root,
            home,
            output_file: non_empty_path(cli.output_file),
            github_token,
            npm_token: non_empty(cli.npm_token),
            setup_git_user: cli.setup_git_user,
            publish_script: non_empty(cli.publish),
            version_script: non_empty(cli.version_script),
            pr_title: non_empty(cli.title),
            commit_message: non_empty(cli.commit),
            branch: non_empty(cli.branch),
            create_github_releases: cli.create_github_releases,
            registry,
            registry_auth_check: non_empty(cli.registry_auth_check),
        })
    }

    #[must_use]
    pub fn netrc_path(&self) -> PathBuf {
        self.home.join(NETRC_FILE)
    }

    #[must_use]
    pub fn npmrc_path(&self) -> PathBuf {
        self.home.join(NPMRC_FILE)
    }

    /// Its presence marks yarn as the package manager.
    #[must_use]
    pub fn yarnrc_path(&self) -> PathBuf {
        self.home.join(YARNRC_FILE)
    }

    #[must_use]
    pub fn setup_input(&self) -> SetupInput {
        SetupInput {
            project_root: self.project_root.clone(),
            setup_git_user: self.setup_git_user,
            github_token: self.github_token.clone(),
        }
    }

    #[must_use]
    pub fn release_input(&self) -> ReleaseInput {
        ReleaseInput {
            github_token: self.github_token.clone(),
            publish_script: self.publish_script.clone(),
            version_script: self.version_script.clone(),
            pr_title: self.pr_title.clone(),
            commit_message: self.commit_message.clone(),
            branch: self.branch.clone(),
            create_github_releases: self.create_github_releases,
            registry_auth: RegistryAuthRequest {
                registry: self.registry,
                auth_check_pattern: self.registry_auth_check.clone(),
                token: self.npm_token.clone(),
                npmrc_path: self.npmrc_path(),
                yarnrc_path: self.yarnrc_path(),
            },
        }
    }
}
