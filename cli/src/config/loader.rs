//! Simple CLI configuration loader for picam
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./picam.json or ./.picam/config.json
//! 3. XDG config: $XDG_CONFIG_HOME/picam/config.json or ~/.config/picam/config.json
//! 4. Environment variables only (no files)

use anyhow::{anyhow, Context, Result};
use picam_core::config::DEFAULT_PAGE_SIZE;
use picam_core::ResolvedCameraConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Where pictures land when nothing else is configured
const DEFAULT_DOWNLOAD_DIR: &str = "~/Pictures";

/// Raw configuration file format (simple single-file schema)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawConfig {
    /// Camera base URL, e.g. http://raspberrypi.local:8000
    pub base_url: Option<String>,
    /// Download directory (supports ~ and $VAR)
    pub download_dir: Option<String>,
    /// Rows per page
    pub page_size: Option<usize>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Additional headers (optional)
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// CLI configuration loader
pub struct CliConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Flag overrides
    base_url_override: Option<String>,
    download_dir_override: Option<String>,
    page_size_override: Option<usize>,
    timeout_override: Option<u64>,
    /// Directory searched for ./picam.json (defaults to the process cwd)
    search_dir: Option<PathBuf>,
    /// Environment lookup, swappable for tests
    env: fn(&str) -> Option<String>,
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            config_override: None,
            base_url_override: None,
            download_dir_override: None,
            page_size_override: None,
            timeout_override: None,
            search_dir: None,
            env: process_env,
        }
    }

    /// Set config file/directory override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Set base URL override
    pub fn with_base_url_override(mut self, base_url: String) -> Self {
        self.base_url_override = Some(base_url);
        self
    }

    /// Set download directory override
    pub fn with_download_dir_override(mut self, download_dir: String) -> Self {
        self.download_dir_override = Some(download_dir);
        self
    }

    /// Set page size override
    pub fn with_page_size_override(mut self, page_size: usize) -> Self {
        self.page_size_override = Some(page_size);
        self
    }

    /// Set timeout override
    pub fn with_timeout_override(mut self, timeout_secs: u64) -> Self {
        self.timeout_override = Some(timeout_secs);
        self
    }

    #[cfg(test)]
    fn with_search_dir(mut self, dir: PathBuf) -> Self {
        self.search_dir = Some(dir);
        self
    }

    #[cfg(test)]
    fn with_env(mut self, env: fn(&str) -> Option<String>) -> Self {
        self.env = env;
        self
    }

    /// Load and resolve configuration
    pub async fn load(&self) -> Result<ResolvedCameraConfig> {
        // Step 1: Find and load base configuration
        let mut config = if let Some(override_path) = &self.config_override {
            self.load_from_path(override_path).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    override_path.display()
                )
            })?
        } else {
            self.search_and_load().await?
        };

        // Step 2: Apply flag overrides
        if let Some(base_url) = &self.base_url_override {
            config.base_url = Some(base_url.clone());
        }
        if let Some(download_dir) = &self.download_dir_override {
            config.download_dir = Some(download_dir.clone());
        }
        if let Some(page_size) = self.page_size_override {
            config.page_size = Some(page_size);
        }
        if let Some(timeout) = self.timeout_override {
            config.timeout_secs = Some(timeout);
        }

        // Step 3: Resolve to final camera config
        self.resolve_config(config)
    }

    /// Search for config in priority order
    async fn search_and_load(&self) -> Result<RawConfig> {
        // 1. Current working directory
        if let Some(config) = self.try_load_cwd().await? {
            return Ok(config);
        }

        // 2. XDG config directory
        if let Some(config) = self.try_load_xdg().await? {
            return Ok(config);
        }

        // 3. Environment variables only
        self.try_load_env_only()
    }

    /// Try loading from current working directory
    async fn try_load_cwd(&self) -> Result<Option<RawConfig>> {
        let cwd = match &self.search_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        // Try ./picam.json first
        let picam_json = cwd.join("picam.json");
        if picam_json.exists() {
            return Ok(Some(self.load_file(&picam_json).await?));
        }

        // Try ./.picam/config.json
        let picam_dir_config = cwd.join(".picam").join("config.json");
        if picam_dir_config.exists() {
            return Ok(Some(self.load_file(&picam_dir_config).await?));
        }

        Ok(None)
    }

    /// Try loading from XDG config directory
    async fn try_load_xdg(&self) -> Result<Option<RawConfig>> {
        if let Some(config_dir) = self.get_xdg_config_dir() {
            let config_path = config_dir.join("picam").join("config.json");
            if config_path.exists() {
                return Ok(Some(self.load_file(&config_path).await?));
            }
        }
        Ok(None)
    }

    /// Build configuration from PICAM_* environment variables
    fn try_load_env_only(&self) -> Result<RawConfig> {
        let env = self.env;

        let page_size = env("PICAM_PAGE_SIZE")
            .map(|v| {
                v.parse::<usize>()
                    .with_context(|| format!("PICAM_PAGE_SIZE is not a number: {}", v))
            })
            .transpose()?;
        let timeout_secs = env("PICAM_TIMEOUT")
            .map(|v| {
                v.parse::<u64>()
                    .with_context(|| format!("PICAM_TIMEOUT is not a number: {}", v))
            })
            .transpose()?;

        Ok(RawConfig {
            base_url: env("PICAM_BASE_URL"),
            download_dir: env("PICAM_DOWNLOAD_DIR"),
            page_size,
            timeout_secs,
            headers: HashMap::new(),
        })
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<RawConfig> {
        if path.is_file() {
            self.load_file(path).await
        } else if path.is_dir() {
            // Try config.json in the directory
            let config_file = path.join("config.json");
            if config_file.exists() {
                self.load_file(&config_file).await
            } else {
                Err(anyhow!(
                    "No config.json found in directory: {}",
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<RawConfig> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get XDG config directory
    fn get_xdg_config_dir(&self) -> Option<PathBuf> {
        let env = self.env;
        env("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env("HOME").map(|home| PathBuf::from(home).join(".config")))
    }

    /// Resolve raw config to ResolvedCameraConfig
    fn resolve_config(&self, config: RawConfig) -> Result<ResolvedCameraConfig> {
        let base_url = config.base_url.ok_or_else(|| {
            anyhow!(
                "No camera configured. Create a picam.json with a \"base_url\", set PICAM_BASE_URL or pass --base-url"
            )
        })?;

        let download_dir = config
            .download_dir
            .unwrap_or_else(|| DEFAULT_DOWNLOAD_DIR.to_string());
        let download_dir = shellexpand::full(&download_dir)
            .with_context(|| format!("Failed to expand download directory: {}", download_dir))?;

        let mut resolved = ResolvedCameraConfig::new(
            base_url.trim_end_matches('/').to_string(),
            PathBuf::from(download_dir.into_owned()),
        )
        .with_page_size(config.page_size.unwrap_or(DEFAULT_PAGE_SIZE))
        .with_headers(config.headers);
        if let Some(timeout) = config.timeout_secs {
            resolved = resolved.with_timeout_secs(timeout);
        }

        // Validate
        resolved
            .validate()
            .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

        Ok(resolved)
    }
}

impl Default for CliConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
