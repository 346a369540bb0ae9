use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use changeset_core::PublishedPackage;
use tracing::{debug, info, warn};

use crate::Result;
use crate::error::OperationError;
use crate::traits::{PublishRunner, VersionRunner};
use crate::types::{PublishOutcome, PublishRequest, VersionOutcome, VersionRequest};

pub const DEFAULT_VERSION_SCRIPT: &str = "changeset version";
pub const DEFAULT_PR_TITLE: &str = "Version Packages";
pub const DEFAULT_COMMIT_MESSAGE: &str = "Version Packages";

const NEW_TAG_MARKER: &str = "New tag:";
const PULL_REQUEST_MARKER: &str = "/pull/";

fn split_script(script: &str) -> Result<(String, Vec<String>)> {
    let invalid = || OperationError::InvalidScript {
        script: script.to_string(),
    };

    let mut words = shlex::split(script).ok_or_else(invalid)?;
    if words.is_empty() {
        return Err(invalid());
    }
    let program = words.remove(0);
    Ok((program, words))
}

/// Runs `script` in `cwd` and returns its stdout.
fn run_script(script: &str, cwd: &Path, envs: &[(&str, &str)]) -> Result<String> {
    let (program, args) = split_script(script)?;
    debug!(%script, cwd = %cwd.display(), "running script");

    let output = Command::new(&program)
        .args(&args)
        .current_dir(cwd)
        .envs(envs.iter().copied())
        .stdin(Stdio::null())
        .output()
        .map_err(|source| OperationError::ScriptSpawn {
            script: script.to_string(),
            source,
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    for line in stdout.lines() {
        info!("{line}");
    }

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        warn!(%script, status = %output.status, "{}", stderr.trim_end());
        return Err(OperationError::ScriptFailed {
            script: script.to_string(),
            status: output.status,
            stderr,
        });
    }

    Ok(stdout)
}

/// Extracts packages from `New tag: <name>@<version>` lines.
#[must_use]
pub fn parse_published_packages(stdout: &str) -> Vec<PublishedPackage> {
    stdout
        .lines()
        .filter_map(|line| {
            let (_, rest) = line.split_once(NEW_TAG_MARKER)?;
            let tag = rest.split_whitespace().next()?;
            let (name, version) = tag.rsplit_once('@')?;
            (!name.is_empty() && !version.is_empty())
                .then(|| PublishedPackage::new(name, version))
        })
        .collect()
}

/// Finds the number of the last pull request URL printed by a script.
#[must_use]
pub fn parse_pull_request_number(stdout: &str) -> Option<u64> {
    stdout
        .match_indices(PULL_REQUEST_MARKER)
        .filter_map(|(pos, marker)| {
            let digits: String = stdout[pos + marker.len()..]
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            digits.parse().ok()
        })
        .last()
}

pub struct ScriptPublishRunner {
    project_root: PathBuf,
}

impl ScriptPublishRunner {
    #[must_use]
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
        }
    }
}

impl PublishRunner for ScriptPublishRunner {
    fn publish(&self, request: &PublishRequest) -> Result<PublishOutcome> {
        let create_releases = request.create_github_releases.to_string();
        let stdout = run_script(
            &request.script,
            &self.project_root,
            &[
                ("GITHUB_TOKEN", request.github_token.as_str()),
                ("CHANGESET_CREATE_GITHUB_RELEASES", create_releases.as_str()),
            ],
        )?;

        let published_packages = parse_published_packages(&stdout);
        info!(count = published_packages.len(), "publish script finished");

        Ok(PublishOutcome { published_packages })
    }
}

pub struct ScriptVersionRunner {
    project_root: PathBuf,
}

impl ScriptVersionRunner {
    #[must_use]
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
        }
    }
}

impl VersionRunner for ScriptVersionRunner {
    fn version(&self, request: &VersionRequest) -> Result<VersionOutcome> {
        let script = request.script.as_deref().unwrap_or(DEFAULT_VERSION_SCRIPT);
        let has_publish_script = request.has_publish_script.to_string();

        let mut envs = vec![
            ("GITHUB_TOKEN", request.github_token.as_str()),
            (
                "CHANGESET_PR_TITLE",
                request.pr_title.as_deref().unwrap_or(DEFAULT_PR_TITLE),
            ),
            (
                "CHANGESET_COMMIT_MESSAGE",
                request
                    .commit_message
                    .as_deref()
                    .unwrap_or(DEFAULT_COMMIT_MESSAGE),
            ),
            ("CHANGESET_HAS_PUBLISH_SCRIPT", has_publish_script.as_str()),
        ];
        if let Some(branch) = request.branch.as_deref() {
            envs.push(("CHANGESET_BRANCH", branch));
        }

        let stdout = run_script(script, &self.project_root, &envs)?;
        let pull_request_number = parse_pull_request_number(&stdout);

        match pull_request_number {
            Some(number) => info!(number, "release pull request is ready"),
            None => warn!("version script did not print a pull request URL"),
        }

        Ok(VersionOutcome {
            pull_request_number,
        })
    }
}
