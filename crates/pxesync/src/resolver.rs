//! Version resolution against the remote latest pointer.

use std::path::{Path, PathBuf};

use crate::config::SyncConfig;
use crate::http::HttpClient;
use crate::Result;

/// The newest published version and where its archive lives.
///
/// Derived from the pointer body on every invocation, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDescriptor {
    /// Version identifier, the final path segment of the pointer body.
    pub version: String,
    /// Server-relative directory containing the archive.
    pub archive_path: String,
}

impl VersionDescriptor {
    /// Parse a latest-pointer body. The body is trimmed and taken as a
    /// path; its last `/`-separated segment is the version. An empty body
    /// yields an empty version, which then fails at fetch time.
    pub fn from_pointer_body(body: &str) -> Self {
        let archive_path = body.trim().to_string();
        let version = archive_path
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            version,
            archive_path,
        }
    }

    /// Full URL of the archive for this version.
    pub fn archive_url(&self, server: &str) -> String {
        format!(
            "{}{}/platform-{}.tgz",
            server, self.archive_path, self.version
        )
    }
}

/// Expected install location for a version.
pub fn install_path(data_dir: &Path, version: &str) -> PathBuf {
    data_dir.join(format!("platform-{version}"))
}

/// Whether a version is already installed. This is a presence check, not
/// an integrity check: any filesystem entry at the expected path counts.
pub fn is_installed(data_dir: &Path, version: &str) -> bool {
    install_path(data_dir, version).exists()
}

pub struct Resolver<'a> {
    client: &'a HttpClient,
    config: &'a SyncConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(client: &'a HttpClient, config: &'a SyncConfig) -> Self {
        Self { client, config }
    }

    /// Query the remote latest pointer and derive the version it names.
    pub fn resolve_latest(&self) -> Result<VersionDescriptor> {
        let url = format!("{}{}", self.config.server, self.config.latest_path);
        log::debug!("resolving latest platform from {url}");
        let body = self.client.get_text(&url)?;
        Ok(VersionDescriptor::from_pointer_body(&body))
    }

    pub fn is_installed(&self, version: &str) -> bool {
        is_installed(&self.config.data_dir, version)
    }
}
