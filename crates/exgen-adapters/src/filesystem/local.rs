//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use exgen_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::Permissions,
    error::{ExgenError, ExgenResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> ExgenResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> ExgenResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn set_permissions(&self, path: &Path, permissions: Permissions) -> ExgenResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(permissions.mode()))
                .map_err(|e| map_io_error(path, e, "set permissions"))?;
        }
        #[cfg(not(unix))]
        {
            // No mode bits outside unix
            let _ = (path, permissions);
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_empty_dir(&self, path: &Path) -> ExgenResult<bool> {
        match std::fs::read_dir(path) {
            Ok(mut entries) => Ok(entries.next().is_none()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(map_io_error(path, e, "read directory")),
        }
    }

    fn remove_dir_all(&self, path: &Path) -> ExgenResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ExgenError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_dir_detection() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();

        assert!(fs.is_empty_dir(dir.path()).unwrap());
        fs.write_file(&dir.path().join("a.txt"), "a").unwrap();
        assert!(!fs.is_empty_dir(dir.path()).unwrap());
        assert!(!fs.is_empty_dir(&dir.path().join("missing")).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn sets_executable_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let path = dir.path().join("www.js");
        fs.write_file(&path, "#!/usr/bin/env node\n").unwrap();
        fs.set_permissions(&path, Permissions::executable()).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn write_into_missing_parent_reports_path() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let path = dir.path().join("nope/file.txt");

        let err = fs.write_file(&path, "x").unwrap_err();
        assert!(err.to_string().contains("nope"));
    }
}
