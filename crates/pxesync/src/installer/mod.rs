//! Streaming installer: extract an archive into a staging directory, then
//! publish its top-level contents into the installation root.

mod extract;
mod staging;

use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use crate::Result;
use extract::fs_error;
use staging::StagingDir;

pub struct Installer {
    dest_root: PathBuf,
}

impl Installer {
    pub fn new(dest_root: impl Into<PathBuf>) -> Self {
        Self {
            dest_root: dest_root.into(),
        }
    }

    /// Stream a gzip-compressed tar archive into a fresh staging directory,
    /// then move each top-level entry into the destination root.
    ///
    /// The gzip header is checked before anything touches the filesystem.
    /// The staging directory is removed on every exit path; each top-level
    /// rename is atomic on its own, but the set as a whole is not.
    pub fn install_from<R: Read>(&self, mut reader: R) -> Result<()> {
        let magic = extract::read_gzip_magic(&mut reader)?;

        let staging = StagingDir::create(&self.dest_root)?;
        extract::unpack_entries(Cursor::new(magic).chain(reader), staging.path())?;
        self.publish(staging.path())
    }

    /// Move each direct child of `staging` into the destination root under
    /// its own base name.
    fn publish(&self, staging: &Path) -> Result<()> {
        fs::create_dir_all(&self.dest_root).map_err(|e| fs_error(&self.dest_root, e))?;
        for entry in fs::read_dir(staging).map_err(|e| fs_error(staging, e))? {
            let entry = entry.map_err(|e| fs_error(staging, e))?;
            let target = self.dest_root.join(entry.file_name());
            fs::rename(entry.path(), &target).map_err(|e| fs_error(&target, e))?;
        }
        Ok(())
    }
}
