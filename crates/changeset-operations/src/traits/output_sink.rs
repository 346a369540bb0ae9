use crate::Result;

/// Receives the string-encoded outputs of a run.
pub trait OutputSink: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the output cannot be recorded.
    fn set_output(&self, name: &str, value: &str) -> Result<()>;
}
