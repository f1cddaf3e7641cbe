//! Minimal configuration types for picam core
//!
//! Core only accepts fully resolved, validated configuration.
//! All discovery, loading, and merging happens in CLI layer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Rows shown per page of the file table
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Request timeout; a capture alone keeps the camera busy for a couple of seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A fully resolved camera client configuration ready for use by core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedCameraConfig {
    /// Base URL of the camera web service, e.g. `http://raspberrypi.local:8000`
    pub base_url: String,
    /// Directory downloaded pictures are written to
    pub download_dir: PathBuf,
    /// Rows per page of the file table
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Additional headers for requests
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ResolvedCameraConfig {
    /// Create a new resolved config with default page size and timeout
    pub fn new(base_url: String, download_dir: PathBuf) -> Self {
        Self {
            base_url,
            download_dir,
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            headers: HashMap::new(),
        }
    }

    /// Set rows per page
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set request timeout in seconds
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Add a header
    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Add multiple headers
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("Base URL cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("Base URL must start with http:// or https://".to_string());
        }

        if url::Url::parse(&self.base_url).is_err() {
            return Err(format!("Base URL is not a valid URL: {}", self.base_url));
        }

        if self.page_size == 0 {
            return Err("Page size must be at least 1".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("Timeout must be at least 1 second".to_string());
        }

        if self.download_dir.as_os_str().is_empty() {
            return Err("Download directory cannot be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> ResolvedCameraConfig {
        ResolvedCameraConfig::new(base_url.to_string(), PathBuf::from("/tmp/pictures"))
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = config("http://raspberrypi.local:8000");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(config("").validate().is_err());
        assert!(config("raspberrypi.local:8000").validate().is_err());
        assert!(config("ftp://raspberrypi.local").validate().is_err());
    }

    #[test]
    fn test_rejects_zero_page_size_and_timeout() {
        let config_zero_page = config("http://pi:8000").with_page_size(0);
        assert!(config_zero_page.validate().is_err());

        let config_zero_timeout = config("http://pi:8000").with_timeout_secs(0);
        assert!(config_zero_timeout.validate().is_err());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let json = r#"{"base_url": "http://pi:8000", "download_dir": "/srv/pics"}"#;
        let config: ResolvedCameraConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.headers.is_empty());
    }
}
