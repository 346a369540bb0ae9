use changeset_core::ActionResult;
use changeset_operations::operations::{ReleaseOperation, SetupOperation};
use changeset_operations::providers::{
    FileSystemChangesetReader, FileSystemRcStore, Git2Provider, GithubOutputFile,
    NetrcCredentialStore, ScriptPublishRunner, ScriptVersionRunner, StdoutOutputs,
};
use tracing::info;

use crate::config::ActionConfig;
use crate::error::Result;

/// Prepares git, then takes the release decision for the configured project.
pub fn run(config: &ActionConfig) -> Result<ActionResult> {
    info!(project_root = %config.project_root.display(), "running changeset action");

    let setup = SetupOperation::new(
        Git2Provider::new(),
        NetrcCredentialStore::new(&config.netrc_path()),
    );
    setup.execute(&config.setup_input())?;

    let release = ReleaseOperation::new(
        FileSystemChangesetReader::new(&config.project_root),
        ScriptPublishRunner::new(&config.project_root),
        ScriptVersionRunner::new(&config.project_root),
        FileSystemRcStore::new(),
    );
    let input = config.release_input();

    let result = match &config.output_file {
        Some(path) => release.execute(&input, &GithubOutputFile::new(path))?,
        None => release.execute(&input, &StdoutOutputs)?,
    };

    Ok(result)
}
