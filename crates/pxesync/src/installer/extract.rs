//! Streaming extraction of a gzip-compressed tar archive.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Component, Path};

use flate2::read::GzDecoder;
use tar::Archive;

use crate::{Result, SyncError};

pub(crate) const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Read and verify the two gzip magic bytes, returning them so the caller
/// can splice them back in front of the stream.
pub(crate) fn read_gzip_magic<R: Read>(reader: &mut R) -> Result<[u8; 2]> {
    let mut magic = [0u8; 2];
    reader
        .read_exact(&mut magic)
        .map_err(SyncError::Decompression)?;
    if magic != GZIP_MAGIC {
        return Err(SyncError::Decompression(io::Error::new(
            io::ErrorKind::InvalidData,
            "missing gzip magic bytes",
        )));
    }
    Ok(magic)
}

/// Unpack the decompressed entry stream into `staging`, in archive order.
///
/// The entry sequence is forward-only and single-pass; the end-of-archive
/// marker terminates the loop normally. Entry types other than plain files
/// and directories (symlinks included) are skipped with a warning.
pub(crate) fn unpack_entries<R: Read>(reader: R, staging: &Path) -> Result<()> {
    let mut archive = Archive::new(GzDecoder::new(reader));
    for entry in archive.entries().map_err(SyncError::Archive)? {
        let mut entry = entry.map_err(SyncError::Archive)?;
        let rel = entry.path().map_err(SyncError::Archive)?.into_owned();
        check_entry_path(&rel)?;
        let kind = entry.header().entry_type();
        let mode = entry.header().mode().map_err(SyncError::Archive)?;

        if kind.is_dir() {
            create_dir_with_mode(&staging.join(&rel), mode)?;
        } else if kind.is_file() {
            log::debug!("unpacking {}", rel.display());
            write_file(&mut entry, &staging.join(&rel), mode)?;
        } else {
            log::warn!("skipping {:?} entry {}", kind, rel.display());
        }
    }
    Ok(())
}

/// Entry paths must stay inside the staging directory: only normal (or
/// `.`) components are accepted.
fn check_entry_path(rel: &Path) -> Result<()> {
    for component in rel.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => return Err(SyncError::UnsafeEntryPath(rel.display().to_string())),
        }
    }
    Ok(())
}

fn create_dir_with_mode(dir: &Path, mode: u32) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| fs_error(dir, e))?;
    set_mode(dir, mode)
}

fn write_file<R: Read>(content: &mut R, dest: &Path, mode: u32) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| fs_error(parent, e))?;
    }
    let mut file = File::create(dest).map_err(|e| fs_error(dest, e))?;
    set_mode(dest, mode)?;
    io::copy(content, &mut file).map_err(|e| fs_error(dest, e))?;
    Ok(())
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(|e| fs_error(path, e))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

pub(crate) fn fs_error(path: &Path, source: io::Error) -> SyncError {
    SyncError::Filesystem {
        path: path.to_path_buf(),
        source,
    }
}
