use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{Result, SyncError};

/// Transient extraction directory, removed when dropped no matter how the
/// install attempt ends.
pub(crate) struct StagingDir {
    path: PathBuf,
}

impl StagingDir {
    /// Create the staging directory beside `dest_root`, named after it plus
    /// a nanosecond timestamp so concurrent runs never share one.
    pub(crate) fn create(dest_root: &Path) -> Result<Self> {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        Self::create_with_stamp(dest_root, stamp)
    }

    pub(crate) fn create_with_stamp(dest_root: &Path, stamp: u128) -> Result<Self> {
        let path = staging_path(dest_root, stamp);
        fs::create_dir_all(&path).map_err(|source| SyncError::Filesystem {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

pub(crate) fn staging_path(dest_root: &Path, stamp: u128) -> PathBuf {
    let mut name = dest_root.as_os_str().to_os_string();
    name.push(format!(".{stamp}"));
    PathBuf::from(name)
}
