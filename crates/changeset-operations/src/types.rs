use std::fmt;

use changeset_core::PublishedPackage;

const GITHUB_MACHINE: &str = "github.com";
const ACTIONS_BOT_LOGIN: &str = "github-actions[bot]";

/// Everything the publish runner needs, passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub script: String,
    pub github_token: String,
    pub create_github_releases: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishOutcome {
    pub published_packages: Vec<PublishedPackage>,
}

/// Everything the version runner needs, passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionRequest {
    pub script: Option<String>,
    pub github_token: String,
    pub pr_title: Option<String>,
    pub commit_message: Option<String>,
    pub branch: Option<String>,
    pub has_publish_script: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionOutcome {
    pub pull_request_number: Option<u64>,
}

/// A netrc entry granting git access to the hosting service.
#[derive(Clone, PartialEq, Eq)]
pub struct GitCredentials {
    pub machine: String,
    pub login: String,
    pub password: String,
}

impl GitCredentials {
    #[must_use]
    pub fn github_actions(token: &str) -> Self {
        Self {
            machine: GITHUB_MACHINE.to_string(),
            login: ACTIONS_BOT_LOGIN.to_string(),
            password: token.to_string(),
        }
    }

    #[must_use]
    pub fn to_netrc(&self) -> String {
        format!(
            "machine {}\nlogin {}\npassword {}",
            self.machine, self.login, self.password
        )
    }
}

impl fmt::Debug for GitCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitCredentials")
            .field("machine", &self.machine)
            .field("login", &self.login)
            .field("password", &"***")
            .finish()
    }
}
