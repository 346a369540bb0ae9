use changeset_core::{ActionResult, ChangesetState};
use tracing::info;

use crate::Result;
use crate::operations::registry::{RegistryAuthRequest, RegistryBootstrapper};
use crate::traits::{ChangesetStateReader, OutputSink, PublishRunner, RcStore, VersionRunner};
use crate::types::{PublishRequest, VersionRequest};

pub const OUTPUT_PUBLISHED: &str = "published";
pub const OUTPUT_PUBLISHED_PACKAGES: &str = "publishedPackages";
pub const OUTPUT_HAS_CHANGESETS: &str = "hasChangesets";
pub const OUTPUT_PULL_REQUEST_NUMBER: &str = "pullRequestNumber";

/// The one action a release run takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseDecision<'a> {
    /// No changesets and nothing to publish with.
    NothingToRelease,
    /// No changesets left, so anything unpublished gets published.
    PublishUnreleased { script: &'a str },
    /// Every pending changeset is empty; a release pull request would be empty too.
    SkipEmptyChangesets,
    /// Pending changesets need a version bump pull request.
    OpenVersionPullRequest,
}

impl<'a> ReleaseDecision<'a> {
    #[must_use]
    pub fn decide(state: &ChangesetState, publish_script: Option<&'a str>) -> Self {
        match (state.has_changesets(), publish_script) {
            (false, None) => Self::NothingToRelease,
            (false, Some(script)) => Self::PublishUnreleased { script },
            (true, _) if !state.has_non_empty_changesets() => Self::SkipEmptyChangesets,
            (true, _) => Self::OpenVersionPullRequest,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInput {
    pub github_token: String,
    pub publish_script: Option<String>,
    pub version_script: Option<String>,
    pub pr_title: Option<String>,
    pub commit_message: Option<String>,
    pub branch: Option<String>,
    pub create_github_releases: bool,
    pub registry_auth: RegistryAuthRequest,
}

impl ReleaseInput {
    fn publish_request(&self, script: &str) -> PublishRequest {
        PublishRequest {
            script: script.to_string(),
            github_token: self.github_token.clone(),
            create_github_releases: self.create_github_releases,
        }
    }

    fn version_request(&self) -> VersionRequest {
        VersionRequest {
            script: self.version_script.clone(),
            github_token: self.github_token.clone(),
            pr_title: self.pr_title.clone(),
            commit_message: self.commit_message.clone(),
            branch: self.branch.clone(),
            has_publish_script: self.publish_script.is_some(),
        }
    }
}

pub struct ReleaseOperation<R, P, V, S> {
    changeset_reader: R,
    publish_runner: P,
    version_runner: V,
    bootstrapper: RegistryBootstrapper<S>,
}

impl<R, P, V, S> ReleaseOperation<R, P, V, S>
where
    R: ChangesetStateReader,
    P: PublishRunner,
    V: VersionRunner,
    S: RcStore,
{
    pub fn new(changeset_reader: R, publish_runner: P, version_runner: V, rc_store: S) -> Self {
        Self {
            changeset_reader,
            publish_runner,
            version_runner,
            bootstrapper: RegistryBootstrapper::new(rc_store),
        }
    }

    /// Reads the pending changesets, takes exactly one release action and
    /// reports the result through `outputs`.
    ///
    /// The default outputs are set as soon as the changesets are known, so
    /// they stay in place when a later step fails.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the changeset reader, the registry
    /// bootstrap, a runner, or the output sink.
    pub fn execute<O>(&self, input: &ReleaseInput, outputs: &O) -> Result<ActionResult>
    where
        O: OutputSink,
    {
        let state = self.changeset_reader.read_state()?;
        emit_defaults(outputs, state.has_changesets())?;

        let decision = ReleaseDecision::decide(&state, input.publish_script.as_deref());

        let result = match decision {
            ReleaseDecision::NothingToRelease => {
                info!("No changesets found");
                ActionResult::nothing_to_release()
            }
            ReleaseDecision::PublishUnreleased { script } => {
                info!("No changesets found, attempting to publish any unpublished packages");
                self.bootstrapper.bootstrap(&input.registry_auth)?;
                let outcome = self.publish_runner.publish(&input.publish_request(script))?;
                ActionResult::published(outcome.published_packages)
            }
            ReleaseDecision::SkipEmptyChangesets => {
                info!("All changesets are empty; not creating PR");
                ActionResult::empty_changesets()
            }
            ReleaseDecision::OpenVersionPullRequest => {
                info!(count = state.len(), "Creating release pull request");
                let outcome = self.version_runner.version(&input.version_request())?;
                ActionResult::version_pull_request(outcome.pull_request_number)
            }
        };

        emit_result(outputs, &result)?;
        Ok(result)
    }
}

fn emit_defaults<O: OutputSink>(outputs: &O, has_changesets: bool) -> Result<()> {
    outputs.set_output(OUTPUT_PUBLISHED, "false")?;
    outputs.set_output(OUTPUT_PUBLISHED_PACKAGES, "[]")?;
    outputs.set_output(OUTPUT_HAS_CHANGESETS, &has_changesets.to_string())
}

fn emit_result<O: OutputSink>(outputs: &O, result: &ActionResult) -> Result<()> {
    if result.is_published() {
        outputs.set_output(OUTPUT_PUBLISHED, "true")?;
        outputs.set_output(
            OUTPUT_PUBLISHED_PACKAGES,
            &serde_json::to_string(result.published_packages())?,
        )?;
    }

    if let Some(number) = result.pull_request_number() {
        outputs.set_output(OUTPUT_PULL_REQUEST_NUMBER, &number.to_string())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use changeset_core::{BumpType, ConfigurationError, PublishedPackage, RegistryKind};

    use super::*;
    use crate::OperationError;
    use crate::mocks::{
        MockChangesetReader, MockOutputs, MockPublishRunner, MockRcStore, MockVersionRunner,
        make_changeset, make_empty_changeset,
    };

    type TestOperation =
        ReleaseOperation<MockChangesetReader, MockPublishRunner, MockVersionRunner, MockRcStore>;

    const NPMRC: &str = "/home/runner/.npmrc";

    fn input(publish_script: Option<&str>) -> ReleaseInput {
        ReleaseInput {
            github_token: "ghs_token".to_string(),
            publish_script: publish_script.map(str::to_string),
            version_script: None,
            pr_title: None,
            commit_message: None,
            branch: None,
            create_github_releases: true,
            registry_auth: RegistryAuthRequest {
                registry: RegistryKind::Npm,
                auth_check_pattern: None,
                token: Some("abc123".to_string()),
                npmrc_path: PathBuf::from(NPMRC),
                yarnrc_path: PathBuf::from("/home/runner/.yarnrc.yml"),
            },
        }
    }

    fn operation(reader: MockChangesetReader) -> TestOperation {
        ReleaseOperation::new(
            reader,
            MockPublishRunner::new(),
            MockVersionRunner::new(),
            MockRcStore::new(),
        )
    }

    mod decide {
        use super::*;

        fn state(changesets: Vec<changeset_core::Changeset>) -> ChangesetState {
            changesets.into_iter().collect()
        }

        #[test]
        fn no_changesets_without_script() {
            assert_eq!(
                ReleaseDecision::decide(&state(vec![]), None),
                ReleaseDecision::NothingToRelease
            );
        }

        #[test]
        fn no_changesets_with_script() {
            assert_eq!(
                ReleaseDecision::decide(&state(vec![]), Some("release")),
                ReleaseDecision::PublishUnreleased { script: "release" }
            );
        }

        #[test]
        fn only_empty_changesets_regardless_of_script() {
            for count in 1..=3 {
                let empties = (0..count)
                    .map(|i| make_empty_changeset(&format!("empty-{i}")))
                    .collect();
                let s = state(empties);

                assert_eq!(
                    ReleaseDecision::decide(&s, None),
                    ReleaseDecision::SkipEmptyChangesets
                );
                assert_eq!(
                    ReleaseDecision::decide(&s, Some("release")),
                    ReleaseDecision::SkipEmptyChangesets
                );
            }
        }

        #[test]
        fn non_empty_changesets_regardless_of_script() {
            let s = state(vec![
                make_empty_changeset("empty"),
                make_changeset("x", "pkg-a", BumpType::Minor),
            ]);

            assert_eq!(
                ReleaseDecision::decide(&s, None),
                ReleaseDecision::OpenVersionPullRequest
            );
            assert_eq!(
                ReleaseDecision::decide(&s, Some("release")),
                ReleaseDecision::OpenVersionPullRequest
            );
        }
    }

    #[test]
    fn nothing_to_release_touches_only_the_reader() {
        let op = operation(MockChangesetReader::new());
        let outputs = MockOutputs::new();

        let result = op
            .execute(&input(None), &outputs)
            .expect("release should succeed");

        assert_eq!(result, ActionResult::nothing_to_release());
        assert_eq!(op.changeset_reader.read_count(), 1);
        assert!(op.publish_runner.calls().is_empty());
        assert!(op.version_runner.calls().is_empty());
        assert_eq!(op.bootstrapper.store().write_count(), 0);
        assert_eq!(outputs.get(OUTPUT_PUBLISHED).as_deref(), Some("false"));
        assert_eq!(outputs.get(OUTPUT_PUBLISHED_PACKAGES).as_deref(), Some("[]"));
        assert_eq!(outputs.get(OUTPUT_HAS_CHANGESETS).as_deref(), Some("false"));
        assert_eq!(outputs.get(OUTPUT_PULL_REQUEST_NUMBER), None);
    }

    #[test]
    fn publishes_when_no_changesets_and_script_present() {
        let op = ReleaseOperation::new(
            MockChangesetReader::new(),
            MockPublishRunner::new().with_published(vec![PublishedPackage::new("pkg-a", "1.2.0")]),
            MockVersionRunner::new(),
            MockRcStore::new(),
        );
        let outputs = MockOutputs::new();

        let result = op
            .execute(&input(Some("release")), &outputs)
            .expect("release should succeed");

        assert!(result.is_published());
        assert!(!result.has_changesets());
        assert_eq!(
            result.published_packages(),
            [PublishedPackage::new("pkg-a", "1.2.0")]
        );
        assert_eq!(outputs.get(OUTPUT_PUBLISHED).as_deref(), Some("true"));
        assert_eq!(
            outputs.get(OUTPUT_PUBLISHED_PACKAGES).as_deref(),
            Some(r#"[{"name":"pkg-a","version":"1.2.0"}]"#)
        );
        assert_eq!(outputs.get(OUTPUT_HAS_CHANGESETS).as_deref(), Some("false"));
        assert!(op.version_runner.calls().is_empty());

        let calls = op.publish_runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].script, "release");
        assert_eq!(calls[0].github_token, "ghs_token");
        assert!(calls[0].create_github_releases);
    }

    #[test]
    fn publish_bootstraps_registry_credentials_first() {
        let op = operation(MockChangesetReader::new());

        op.execute(&input(Some("release")), &MockOutputs::new())
            .expect("release should succeed");

        assert_eq!(
            op.bootstrapper.store().content(Path::new(NPMRC)).as_deref(),
            Some("//registry.npmjs.org/:_authToken=abc123\n")
        );
    }

    #[test]
    fn publish_with_nothing_published_reports_unpublished() {
        let op = operation(MockChangesetReader::new());
        let outputs = MockOutputs::new();

        let result = op
            .execute(&input(Some("release")), &outputs)
            .expect("release should succeed");

        assert_eq!(result, ActionResult::published(Vec::new()));
        assert!(!result.is_published());
        assert_eq!(outputs.get(OUTPUT_PUBLISHED).as_deref(), Some("false"));
        assert_eq!(outputs.get(OUTPUT_PUBLISHED_PACKAGES).as_deref(), Some("[]"));
    }

    #[test]
    fn registry_configuration_error_stops_before_publishing() {
        let op = operation(MockChangesetReader::new());
        let mut release_input = input(Some("release"));
        release_input.registry_auth.registry = RegistryKind::Custom;
        let outputs = MockOutputs::new();

        let err = op
            .execute(&release_input, &outputs)
            .expect_err("custom registry without pattern must fail");

        assert!(matches!(
            err,
            OperationError::Configuration(ConfigurationError::MissingAuthCheckPattern)
        ));
        assert!(op.publish_runner.calls().is_empty());
        assert_eq!(outputs.get(OUTPUT_HAS_CHANGESETS).as_deref(), Some("false"));
    }

    #[test]
    fn empty_changesets_open_no_pull_request() {
        let reader = MockChangesetReader::new()
            .with_changeset(make_empty_changeset("x"))
            .with_changeset(make_empty_changeset("y"));
        let op = operation(reader);
        let outputs = MockOutputs::new();

        let result = op
            .execute(&input(Some("release")), &outputs)
            .expect("release should succeed");

        assert_eq!(result, ActionResult::empty_changesets());
        assert!(op.publish_runner.calls().is_empty());
        assert!(op.version_runner.calls().is_empty());
        assert_eq!(outputs.get(OUTPUT_HAS_CHANGESETS).as_deref(), Some("true"));
        assert_eq!(outputs.get(OUTPUT_PUBLISHED).as_deref(), Some("false"));
        assert_eq!(outputs.get(OUTPUT_PULL_REQUEST_NUMBER), None);
    }

    #[test]
    fn pending_changesets_open_version_pull_request() {
        let op = ReleaseOperation::new(
            MockChangesetReader::new().with_changeset(make_changeset("x", "pkg-a", BumpType::Minor)),
            MockPublishRunner::new(),
            MockVersionRunner::new().with_pull_request(42),
            MockRcStore::new(),
        );
        let outputs = MockOutputs::new();
        let mut release_input = input(Some("release"));
        release_input.version_script = Some("yarn version-packages".to_string());
        release_input.pr_title = Some("Release".to_string());
        release_input.branch = Some("main".to_string());

        let result = op
            .execute(&release_input, &outputs)
            .expect("release should succeed");

        assert_eq!(result.pull_request_number(), Some(42));
        assert!(result.has_changesets());
        assert_eq!(outputs.get(OUTPUT_PULL_REQUEST_NUMBER).as_deref(), Some("42"));
        assert_eq!(outputs.get(OUTPUT_HAS_CHANGESETS).as_deref(), Some("true"));
        assert!(op.publish_runner.calls().is_empty());
        assert_eq!(op.bootstrapper.store().write_count(), 0);

        let calls = op.version_runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].script.as_deref(), Some("yarn version-packages"));
        assert_eq!(calls[0].pr_title.as_deref(), Some("Release"));
        assert_eq!(calls[0].branch.as_deref(), Some("main"));
        assert_eq!(calls[0].commit_message, None);
        assert!(calls[0].has_publish_script);
    }

    #[test]
    fn version_run_without_pull_request_number_sets_no_output() {
        let op = operation(
            MockChangesetReader::new().with_changeset(make_changeset("x", "pkg-a", BumpType::Patch)),
        );
        let outputs = MockOutputs::new();

        let result = op
            .execute(&input(None), &outputs)
            .expect("release should succeed");

        assert_eq!(result.pull_request_number(), None);
        assert_eq!(outputs.get(OUTPUT_PULL_REQUEST_NUMBER), None);
        assert!(!op.version_runner.calls()[0].has_publish_script);
    }

    #[test]
    fn reader_errors_propagate_without_outputs() {
        let op = operation(MockChangesetReader::new().failing());
        let outputs = MockOutputs::new();

        let result = op.execute(&input(Some("release")), &outputs);

        assert!(result.is_err());
        assert!(outputs.is_empty());
        assert!(op.publish_runner.calls().is_empty());
    }

    #[test]
    fn runner_errors_propagate_after_defaults() {
        let op = ReleaseOperation::new(
            MockChangesetReader::new().with_changeset(make_changeset("x", "pkg-a", BumpType::Major)),
            MockPublishRunner::new(),
            MockVersionRunner::new().failing(),
            MockRcStore::new(),
        );
        let outputs = MockOutputs::new();

        let err = op
            .execute(&input(None), &outputs)
            .expect_err("version failure must propagate");

        assert!(matches!(err, OperationError::InvalidScript { .. }));
        assert_eq!(outputs.get(OUTPUT_HAS_CHANGESETS).as_deref(), Some("true"));
        assert_eq!(outputs.get(OUTPUT_PULL_REQUEST_NUMBER), None);
    }
}
