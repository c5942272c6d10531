//! Post-invocation host state observation
//!
//! Scenarios observe the provisioning tool's side effects by reading files
//! it is expected to have produced. The reader is a trait so harness logic
//! can be unit-tested against an in-memory map while end-to-end runs bind
//! to the real filesystem.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::common::{Error, Result};

/// Read access to post-invocation host state
pub trait StateReader {
    /// Return the full contents of a state file as text
    ///
    /// An absent file means the tool did not produce the expected artifact
    /// and maps to [`Error::ArtifactMissing`].
    fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// State reader bound to the real host filesystem
pub struct HostFs;

impl StateReader for HostFs {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::artifact_missing(path),
            _ => Error::FileRead {
                path: path.display().to_string(),
                error: e.to_string(),
            },
        })
    }
}

/// In-memory state reader for unit tests of harness logic
#[derive(Default)]
pub struct MemReader {
    files: HashMap<PathBuf, String>,
}

impl MemReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }
}

impl StateReader for MemReader {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::artifact_missing(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_fs_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bootstrap.disco");
        std::fs::write(&path, "https://discovery.example/deadbeef").unwrap();

        let contents = HostFs.read_to_string(&path).unwrap();
        assert_eq!(contents, "https://discovery.example/deadbeef");
    }

    #[test]
    fn host_fs_maps_absence_to_artifact_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = HostFs
            .read_to_string(&dir.path().join("never-written"))
            .unwrap_err();
        assert!(matches!(err, Error::ArtifactMissing { .. }));
    }

    #[test]
    fn mem_reader_round_trips() {
        let mut mem = MemReader::new();
        mem.insert("/var/run/etcd/bootstrap.disco", "contents");

        let contents = mem
            .read_to_string(Path::new("/var/run/etcd/bootstrap.disco"))
            .unwrap();
        assert_eq!(contents, "contents");

        let err = mem
            .read_to_string(Path::new("/var/run/etcd/other"))
            .unwrap_err();
        assert!(matches!(err, Error::ArtifactMissing { .. }));
    }
}
