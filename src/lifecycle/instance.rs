//! Single-instance guard
//!
//! A pid lock file in the system temp directory. A pre-existing file means
//! another instance is running, which is a fatal startup error. The file is
//! removed when the lock is dropped.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Errors raised while acquiring the instance lock
#[derive(Debug, thiserror::Error)]
pub enum InstanceError {
    #[error("another instance is already running (lock file {0})")]
    AlreadyRunning(String),

    #[error("failed to create lock file: {0}")]
    Io(#[from] std::io::Error),
}

/// Held for the process lifetime; released on drop
pub struct InstanceLock {
    path: PathBuf,
}

impl InstanceLock {
    /// Default lock path for the daemon.
    pub fn default_path() -> PathBuf {
        std::env::temp_dir().join("keywebhookd.pid")
    }

    /// Acquire the lock, failing if another instance holds it.
    pub fn acquire(path: impl Into<PathBuf>) -> Result<Self, InstanceError> {
        let path = path.into();
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                let _ = writeln!(file, "{}", std::process::id());
                Ok(Self { path })
            }
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(InstanceError::AlreadyRunning(path.display().to_string()))
            }
            Err(err) => Err(InstanceError::Io(err)),
        }
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
