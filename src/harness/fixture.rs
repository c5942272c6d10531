//! Fixture materialization
//!
//! Fixtures are the user-data files the scenarios feed to the provisioning
//! tool. A fixture is owned by the scenario that wrote it and is removed
//! unconditionally during cleanup.

use std::fs;
use std::path::Path;

use crate::common::{Error, Result};

/// Permissions every fixture is written with, regardless of umask
#[cfg(unix)]
const FIXTURE_MODE: u32 = 0o644;

/// Write fixture contents to a path, fully replacing any prior file
pub fn write(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| Error::fixture_write(path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(FIXTURE_MODE))
            .map_err(|e| Error::fixture_write(path, e))?;
    }

    Ok(())
}

/// Remove a fixture file; an already-absent fixture is not an error
pub fn remove(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        other => Ok(other?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user-data");

        write(&path, "#cloud-config\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "#cloud-config\n");
    }

    #[test]
    fn write_replaces_prior_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user-data");

        write(&path, "first version, longer than the second").unwrap();
        write(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[cfg(unix)]
    #[test]
    fn fixtures_get_fixed_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user-data");

        write(&path, "#!/bin/bash\n").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn unwritable_path_reports_fixture_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-subdir").join("user-data");

        let err = write(&path, "contents").unwrap_err();
        assert!(matches!(err, Error::FixtureWrite { .. }));
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user-data");

        write(&path, "contents").unwrap();
        remove(&path).unwrap();
        assert!(!path.exists());
        remove(&path).unwrap();
    }
}
