use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::infrastructure::{InfraError, InfraResult};

pub trait PathExt {
    fn is_scene_file(&self) -> bool;
    /// Directory holding the file; `.` for bare file names.
    fn scene_dir(&self) -> &Path;
}

impl PathExt for Path {
    fn is_scene_file(&self) -> bool {
        self.extension() == Some(OsStr::new("toml"))
    }

    fn scene_dir(&self) -> &Path {
        match self.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }
}

/// Expand `~`, `$VAR` and `${VAR}` in a path; returns it unchanged on failure.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

pub fn ensure_file_exists(path: &Path) -> InfraResult<()> {
    if !path.exists() {
        Err(InfraError::io(
            format!("scene file not found: {}", path.display()),
            std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
        ))
    } else if !path.is_file() {
        Err(InfraError::SceneFormat {
            path: path.to_path_buf(),
            message: "not a file".to_string(),
        })
    } else {
        Ok(())
    }
}
