use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::Result;
use crate::error::OperationError;
use crate::traits::RcStore;

#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystemRcStore;

impl FileSystemRcStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RcStore for FileSystemRcStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(OperationError::RcFileRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn create(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).map_err(|source| OperationError::RcFileWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    fn append(&self, path: &Path, content: &str) -> Result<()> {
        let write_error = |source| OperationError::RcFileWrite {
            path: path.to_path_buf(),
            source,
        };

        let mut file = OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(write_error)?;
        file.write_all(content.as_bytes()).map_err(write_error)
    }
}
