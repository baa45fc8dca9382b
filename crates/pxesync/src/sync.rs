//! One-shot synchronization: resolve the newest published version, then
//! install it unless it is already present.

use crate::config::SyncConfig;
use crate::http::HttpClient;
use crate::installer::Installer;
use crate::resolver::{install_path, Resolver};
use crate::Result;

/// Outcome of one sync pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The newest published version was already present on disk; the
    /// archive was not fetched.
    AlreadyInstalled { version: String },
    /// A new version was downloaded and published.
    Installed { version: String },
}

pub struct PlatformSync {
    config: SyncConfig,
    client: HttpClient,
}

impl PlatformSync {
    pub fn new(config: SyncConfig) -> Result<Self> {
        let client = HttpClient::new(config.timeout)?;
        Ok(Self { config, client })
    }

    /// Run one resolve-and-install pass. The first failure aborts and is
    /// surfaced unmodified; the caller decides whether to retry.
    pub fn sync(&self) -> Result<SyncOutcome> {
        let resolver = Resolver::new(&self.client, &self.config);
        let latest = resolver.resolve_latest()?;

        if resolver.is_installed(&latest.version) {
            log::debug!(
                "platform {} already installed at {}",
                latest.version,
                install_path(&self.config.data_dir, &latest.version).display()
            );
            return Ok(SyncOutcome::AlreadyInstalled {
                version: latest.version,
            });
        }

        let url = latest.archive_url(&self.config.server);
        log::info!("fetching {url}");
        let response = self.client.get(&url)?;

        Installer::new(&self.config.data_dir).install_from(response)?;

        log::info!("installed platform {}", latest.version);
        Ok(SyncOutcome::Installed {
            version: latest.version,
        })
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }
}
