const ACTIONS_BOT_NAME: &str = "github-actions[bot]";
const ACTIONS_BOT_EMAIL: &str = "41898282+github-actions[bot]@users.noreply.github.com";

/// The commit identity written to a repository's local config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitUser {
    pub name: String,
    pub email: String,
}

impl GitUser {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// The identity GitHub Actions uses for commits made by workflows.
    #[must_use]
    pub fn actions_bot() -> Self {
        Self::new(ACTIONS_BOT_NAME, ACTIONS_BOT_EMAIL)
    }
}

impl Default for GitUser {
    fn default() -> Self {
        Self::actions_bot()
    }
}
