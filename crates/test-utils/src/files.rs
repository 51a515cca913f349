//! Temporary namelist files.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A namelist written into its own temporary directory.
///
/// The directory is removed when this value is dropped.
pub struct TempNamelist {
    dir: TempDir,
    path: PathBuf,
}

impl TempNamelist {
    /// Write `contents` to `file_name` inside a fresh temporary directory.
    pub fn new(file_name: &str, contents: &str) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join(file_name);
        fs::write(&path, contents).expect("failed to write namelist");
        Self { dir, path }
    }

    /// A YAML namelist named `namelist.wps.yaml`.
    pub fn yaml(contents: &str) -> Self {
        Self::new("namelist.wps.yaml", contents)
    }

    /// Path of the namelist file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of another file in the same directory.
    pub fn sibling(&self, file_name: &str) -> PathBuf {
        self.dir.path().join(file_name)
    }

    /// Current contents of the namelist file.
    pub fn contents(&self) -> String {
        fs::read_to_string(&self.path).expect("failed to read namelist")
    }
}
