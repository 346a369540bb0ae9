use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::Result;
use crate::error::OperationError;
use crate::traits::OutputSink;

/// Appends `name=value` lines to the file named by `GITHUB_OUTPUT`.
pub struct GithubOutputFile {
    path: PathBuf,
}

impl GithubOutputFile {
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl OutputSink for GithubOutputFile {
    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        let write_error = |source| OperationError::OutputWrite {
            name: name.to_string(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(write_error)?;
        writeln!(file, "{name}={value}").map_err(write_error)
    }
}

/// Prints outputs when no output file is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutOutputs;

impl OutputSink for StdoutOutputs {
    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        println!("{name}={value}");
        Ok(())
    }
}
