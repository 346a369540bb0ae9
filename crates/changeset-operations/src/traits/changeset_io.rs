use changeset_core::ChangesetState;

use crate::Result;

pub trait ChangesetStateReader: Send + Sync {
    /// Reads every pending changeset.
    ///
    /// # Errors
    ///
    /// Returns an error if a changeset cannot be listed, read, or parsed.
    fn read_state(&self) -> Result<ChangesetState>;
}
