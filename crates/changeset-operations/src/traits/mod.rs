mod changeset_io;
mod credential_store;
mod git_identity;
mod output_sink;
mod rc_store;
mod runners;

pub use changeset_io::ChangesetStateReader;
pub use credential_store::CredentialStore;
pub use git_identity::GitIdentity;
pub use output_sink::OutputSink;
pub use rc_store::RcStore;
pub use runners::{PublishRunner, VersionRunner};
