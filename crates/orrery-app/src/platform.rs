//! Platform directory resolution.

use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while resolving or creating directories.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,

    #[error("platform I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Application name used as the directory under the OS config root.
pub const APP_NAME: &str = "orrery";

/// Where the viewer keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Debug-build JSON logs.
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolve the OS config directory (XDG on Linux, Known Folders on
    /// Windows, Library on macOS), or use `override_dir` when given.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NoConfigDir`] if no override is given and the
    /// OS does not expose a configuration directory.
    pub fn resolve(override_dir: Option<&Path>) -> Result<Self, PlatformError> {
        match override_dir {
            Some(dir) => Ok(Self::with_config_dir(dir.to_path_buf())),
            None => {
                let base = dirs::config_dir().ok_or(PlatformError::NoConfigDir)?;
                Ok(Self::with_config_dir(base.join(APP_NAME)))
            }
        }
    }

    /// Lay out the directories beneath an explicit config directory.
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        let log_dir = config_dir.join("logs");
        Self {
            config_dir,
            log_dir,
        }
    }

    /// Create all directories on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Io`] if any directory cannot be created.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_is_used_verbatim() {
        let dirs = PlatformDirs::resolve(Some(Path::new("/tmp/orrery-run"))).unwrap();
        assert_eq!(dirs.config_dir, PathBuf::from("/tmp/orrery-run"));
        assert_eq!(dirs.log_dir, Path::new("/tmp/orrery-run").join("logs"));
    }

    #[test]
    fn test_default_ends_with_app_name() {
        // Headless CI images may have no config dir at all.
        if dirs::config_dir().is_none() {
            return;
        }
        let dirs = PlatformDirs::resolve(None).unwrap();
        assert!(dirs.config_dir.is_absolute());
        assert!(dirs.config_dir.ends_with(APP_NAME));
    }

    #[test]
    fn test_directory_creation() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::with_config_dir(tmp.path().join("orrery"));
        dirs.create_dirs().unwrap();
        assert!(dirs.config_dir.is_dir());
        assert!(dirs.log_dir.is_dir());
    }
}
