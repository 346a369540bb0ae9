mod changeset_io;
mod credentials;
mod git;
mod outputs;
mod rc_store;
mod scripts;

pub use changeset_io::{CHANGESET_DIR, FileSystemChangesetReader};
pub use credentials::NetrcCredentialStore;
pub use git::Git2Provider;
pub use outputs::{GithubOutputFile, StdoutOutputs};
pub use rc_store::FileSystemRcStore;
pub use scripts::{
    DEFAULT_COMMIT_MESSAGE, DEFAULT_PR_TITLE, DEFAULT_VERSION_SCRIPT, ScriptPublishRunner,
    ScriptVersionRunner, parse_published_packages, parse_pull_request_number,
};
