use std::fs;
use std::path::{Path, PathBuf};

use changeset_core::ChangesetState;
use changeset_parse::parse_changeset;
use tracing::debug;

use crate::Result;
use crate::error::OperationError;
use crate::traits::ChangesetStateReader;

pub const CHANGESET_DIR: &str = ".changeset";

const CHANGESET_EXTENSION: &str = "md";
const README_STEM: &str = "README";

/// Reads `.changeset/*.md` below a project root.
pub struct FileSystemChangesetReader {
    project_root: PathBuf,
}

impl FileSystemChangesetReader {
    #[must_use]
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
        }
    }

    fn changeset_dir(&self) -> PathBuf {
        self.project_root.join(CHANGESET_DIR)
    }

    fn list_changeset_files(&self) -> Result<Vec<PathBuf>> {
        let dir = self.changeset_dir();

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(OperationError::ChangesetList { path: dir, source }),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| OperationError::ChangesetList {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();

            if path.extension().is_none_or(|ext| ext != CHANGESET_EXTENSION) {
                continue;
            }
            if path
                .file_stem()
                .is_some_and(|stem| stem.eq_ignore_ascii_case(README_STEM))
            {
                continue;
            }
            if path.is_file() {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }
}

impl ChangesetStateReader for FileSystemChangesetReader {
    fn read_state(&self) -> Result<ChangesetState> {
        let mut state = ChangesetState::new();

        for path in self.list_changeset_files()? {
            let id = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .ok_or_else(|| OperationError::InvalidChangesetPath { path: path.clone() })?
                .to_string();

            let content =
                fs::read_to_string(&path).map_err(|source| OperationError::ChangesetFileRead {
                    path: path.clone(),
                    source,
                })?;

            let changeset =
                parse_changeset(&id, &content).map_err(|source| OperationError::ChangesetParse {
                    path: path.clone(),
                    source,
                })?;

            debug!(id = %changeset.id, releases = changeset.releases.len(), "read changeset");
            state.insert(changeset);
        }

        Ok(state)
    }
}
