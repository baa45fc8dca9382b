//! Blocking HTTP client wrapper.
//!
//! A thin layer over `reqwest::blocking` that maps transport failures and
//! non-success statuses into the crate's error taxonomy. Retry policy, if
//! any, belongs to the caller; a request here is attempted exactly once.

use std::time::Duration;

use reqwest::blocking::{Client, Response};

use crate::{Result, SyncError};

const USER_AGENT: &str = concat!("pxesync/", env!("CARGO_PKG_VERSION"));

pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// GET a resource, treating any non-success status as a protocol error.
    pub fn get(&self, url: &str) -> Result<Response> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Protocol {
                status: status.to_string(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    /// GET a resource and read its body as UTF-8 text.
    pub fn get_text(&self, url: &str) -> Result<String> {
        Ok(self.get(url)?.text()?)
    }
}
