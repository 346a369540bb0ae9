use std::path::PathBuf;

use changeset_core::{ConfigurationError, PackageManager, RegistryKind};
use regex::Regex;
use tracing::info;

use crate::Result;
use crate::traits::RcStore;

// Mirrors the check npm itself uses when deciding whether a user is logged in.
const NPM_AUTH_PATTERN: &str = r"(?i)^\s*//registry\.npmjs\.org/:[_-]authToken=";
const GITHUB_AUTH_PATTERN: &str = r"(?i)^\s*//npm\.pkg\.github\.com/:[_-]authToken=";

const NPM_REGISTRY_HOST: &str = "registry.npmjs.org";
const GITHUB_REGISTRY_HOST: &str = "npm.pkg.github.com";

/// Matches rc file lines that already carry an auth token for a registry.
#[derive(Debug, Clone)]
pub struct AuthCheck {
    pattern: Regex,
}

impl AuthCheck {
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingAuthCheckPattern`] for a custom
    /// registry without a pattern and
    /// [`ConfigurationError::InvalidAuthCheckPattern`] if the pattern does not
    /// compile.
    pub fn resolve(
        registry: RegistryKind,
        custom_pattern: Option<&str>,
    ) -> std::result::Result<Self, ConfigurationError> {
        match registry {
            RegistryKind::Npm => Self::compile(NPM_AUTH_PATTERN),
            RegistryKind::Github => Self::compile(GITHUB_AUTH_PATTERN),
            RegistryKind::Custom => {
                let pattern = custom_pattern
                    .filter(|p| !p.is_empty())
                    .ok_or(ConfigurationError::MissingAuthCheckPattern)?;
                Self::compile(pattern)
            }
        }
    }

    fn compile(pattern: &str) -> std::result::Result<Self, ConfigurationError> {
        Regex::new(pattern)
            .map(|pattern| Self { pattern })
            .map_err(|source| ConfigurationError::InvalidAuthCheckPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    #[must_use]
    pub fn matches(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }
}

/// The content of an existing rc file, viewed line by line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RcFile {
    content: String,
}

impl RcFile {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.lines()
    }

    #[must_use]
    pub fn find_auth_line(&self, check: &AuthCheck) -> Option<&str> {
        self.lines().find(|line| check.matches(line))
    }

    /// The text to append so that `line` becomes a new directive separated
    /// from the existing content by a blank line.
    #[must_use]
    pub fn append_text(&self, line: &str) -> String {
        let terminator = if self.content.is_empty() || self.content.ends_with('\n') {
            ""
        } else {
            "\n"
        };
        format!("{terminator}\n{line}\n")
    }
}

#[must_use]
pub fn registry_host(registry: RegistryKind) -> &'static str {
    match registry {
        RegistryKind::Npm | RegistryKind::Custom => NPM_REGISTRY_HOST,
        RegistryKind::Github => GITHUB_REGISTRY_HOST,
    }
}

#[must_use]
pub fn auth_token_line(registry: RegistryKind, token: &str) -> String {
    format!("//{}/:_authToken={token}", registry_host(registry))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryAuthRequest {
    pub registry: RegistryKind,
    pub auth_check_pattern: Option<String>,
    pub token: Option<String>,
    pub npmrc_path: PathBuf,
    pub yarnrc_path: PathBuf,
}

impl RegistryAuthRequest {
    fn auth_line(&self) -> std::result::Result<String, ConfigurationError> {
        let token = self
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigurationError::MissingRegistryToken)?;
        Ok(auth_token_line(self.registry, token))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Created,
    AlreadyPresent,
    Appended,
}

/// Makes sure the user's rc file holds an auth token before publishing.
pub struct RegistryBootstrapper<S> {
    store: S,
}

impl<S> RegistryBootstrapper<S>
where
    S: RcStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn detect_package_manager(&self, request: &RegistryAuthRequest) -> PackageManager {
        if self.store.exists(&request.yarnrc_path) {
            PackageManager::Yarn
        } else {
            PackageManager::Npm
        }
    }

    /// # Errors
    ///
    /// Returns a configuration error before touching any file if the auth
    /// check cannot be resolved, or when a line has to be written without a
    /// token. Returns an I/O error if the rc file cannot be read or written.
    pub fn bootstrap(&self, request: &RegistryAuthRequest) -> Result<BootstrapOutcome> {
        let check = AuthCheck::resolve(request.registry, request.auth_check_pattern.as_deref())?;

        let package_manager = self.detect_package_manager(request);
        info!(%package_manager, "detected package manager");

        let path = &request.npmrc_path;

        let Some(content) = self.store.read(path)? else {
            info!("No user .npmrc file found, creating one");
            let line = request.auth_line()?;
            self.store.create(path, &format!("{line}\n"))?;
            return Ok(BootstrapOutcome::Created);
        };

        info!("Found existing user .npmrc file");
        info!(registry = %request.registry, "Using {} auth option", request.registry);

        let rc_file = RcFile::new(content);
        if rc_file.find_auth_line(&check).is_some() {
            info!("Found existing auth token for the registry in the user .npmrc file");
            return Ok(BootstrapOutcome::AlreadyPresent);
        }

        info!("Didn't find existing auth token for the registry in the user .npmrc file, creating one");
        let line = request.auth_line()?;
        self.store.append(path, &rc_file.append_text(&line))?;

        Ok(BootstrapOutcome::Appended)
    }
}
