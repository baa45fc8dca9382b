//! HTTP access to the download server.

mod client;

pub use client::HttpClient;
