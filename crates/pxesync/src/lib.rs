pub mod config;
pub mod error;
pub mod http;
pub mod installer;
pub mod resolver;
pub mod sync;

pub use config::SyncConfig;
pub use error::{Result, SyncError};
pub use http::HttpClient;
pub use installer::Installer;
pub use resolver::{install_path, is_installed, Resolver, VersionDescriptor};
pub use sync::{PlatformSync, SyncOutcome};
