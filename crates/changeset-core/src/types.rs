use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    Patch,
    Minor,
    Major,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRelease {
    pub name: String,
    pub bump_type: BumpType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changeset {
    pub id: String,
    pub summary: String,
    pub releases: Vec<PackageRelease>,
}

impl Changeset {
    /// A changeset without releases still counts as pending, but never
    /// justifies a release pull request on its own.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}

/// The pending changesets of a repository, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangesetState {
    changesets: BTreeMap<String, Changeset>,
}

impl ChangesetState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a changeset, replacing any earlier one with the same id.
    pub fn insert(&mut self, changeset: Changeset) {
        self.changesets.insert(changeset.id.clone(), changeset);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.changesets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changesets.is_empty()
    }

    #[must_use]
    pub fn has_changesets(&self) -> bool {
        !self.is_empty()
    }

    #[must_use]
    pub fn has_non_empty_changesets(&self) -> bool {
        self.changesets.values().any(|c| !c.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Changeset> {
        self.changesets.values()
    }
}

impl FromIterator<Changeset> for ChangesetState {
    fn from_iter<I: IntoIterator<Item = Changeset>>(iter: I) -> Self {
        let mut state = Self::new();
        for changeset in iter {
            state.insert(changeset);
        }
        state
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryKind {
    Npm,
    Github,
    Custom,
}

impl RegistryKind {
    pub const ALL: [Self; 3] = [Self::Npm, Self::Github, Self::Custom];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Github => "github",
            Self::Custom => "custom",
        }
    }

    #[must_use]
    pub fn allowed_values() -> String {
        Self::ALL
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistryKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ConfigurationError::InvalidRegistry {
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Yarn,
    Npm,
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yarn => f.write_str("yarn"),
            Self::Npm => f.write_str("npm"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedPackage {
    pub name: String,
    pub version: String,
}

impl PublishedPackage {
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// The single observable result of one release run.
///
/// Only the constructors below can build a value, so `published` always
/// agrees with `published_packages` and only a version run carries a pull
/// request number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    published: bool,
    published_packages: Vec<PublishedPackage>,
    has_changesets: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pull_request_number: Option<u64>,
}

impl ActionResult {
    #[must_use]
    pub fn nothing_to_release() -> Self {
        Self::unpublished(false)
    }

    #[must_use]
    pub fn empty_changesets() -> Self {
        Self::unpublished(true)
    }

    #[must_use]
    pub fn published(published_packages: Vec<PublishedPackage>) -> Self {
        Self {
            published: !published_packages.is_empty(),
            published_packages,
            has_changesets: false,
            pull_request_number: None,
        }
    }

    #[must_use]
    pub fn version_pull_request(pull_request_number: Option<u64>) -> Self {
        Self {
            pull_request_number,
            ..Self::unpublished(true)
        }
    }

    fn unpublished(has_changesets: bool) -> Self {
        Self {
            published: false,
            published_packages: Vec::new(),
            has_changesets,
            pull_request_number: None,
        }
    }

    #[must_use]
    pub fn is_published(&self) -> bool {
        self.published
    }

    #[must_use]
    pub fn published_packages(&self) -> &[PublishedPackage] {
        &self.published_packages
    }

    #[must_use]
    pub fn has_changesets(&self) -> bool {
        self.has_changesets
    }

    #[must_use]
    pub fn pull_request_number(&self) -> Option<u64> {
        self.pull_request_number
    }
}
