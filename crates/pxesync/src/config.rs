use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_LATEST_PATH: &str = "/latest";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings shared by the resolver and the installer.
///
/// Both components receive this explicitly; there is no process-wide state.
/// `server` is joined with the pointer paths by plain concatenation, so it
/// should not carry a trailing slash.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Download server base URL.
    pub server: String,
    /// Directory holding the installed `platform-<version>` subdirectories.
    pub data_dir: PathBuf,
    /// Server-relative path of the latest-version pointer.
    pub latest_path: String,
    /// HTTP timeout for both the pointer and the archive request.
    pub timeout: Duration,
}

impl SyncConfig {
    pub fn new(server: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            server: server.into(),
            data_dir: data_dir.into(),
            latest_path: DEFAULT_LATEST_PATH.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_latest_path(mut self, latest_path: impl Into<String>) -> Self {
        self.latest_path = latest_path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
