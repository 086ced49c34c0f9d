//! Runtime configuration
//!
//! Configuration is resolved once at startup (defaults, then an optional TOML
//! file, then environment overrides) and handed to the components that need it
//! as plain values. Nothing in the pipeline reads the environment on its own.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable enabling multi-page repository fetching
pub const FETCH_MULTI_PAGE_STARS_ENV: &str = "FETCH_MULTI_PAGE_STARS";

/// Environment variable holding the GitHub token
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";
pub const DEFAULT_REST_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_RETRY_COUNT: u32 = 3;

const CONFIG_DIR_NAME: &str = "github-stats";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Settings for the whole stats pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Allow repository pagination past the first page
    pub fetch_multi_page_stars: bool,
    pub github_token: Option<String>,
    pub request_timeout_secs: u64,
    pub max_retry_count: u32,
    pub graphql_url: String,
    pub rest_base_url: String,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            fetch_multi_page_stars: false,
            github_token: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_retry_count: DEFAULT_MAX_RETRY_COUNT,
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            rest_base_url: DEFAULT_REST_BASE_URL.to_string(),
        }
    }
}

/// Pagination switch handed explicitly to the repository paginator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationConfig {
    pub fetch_multi_page_stars: bool,
}

impl StatsConfig {
    /// Loads configuration from `path` (or the default location when `None`)
    /// and applies environment overrides.
    ///
    /// A missing file at the default location is not an error; a missing file
    /// at an explicit path is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Reads a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: StatsConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Applies `FETCH_MULTI_PAGE_STARS` and `GITHUB_TOKEN` from the environment
    pub fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var(FETCH_MULTI_PAGE_STARS_ENV) {
            self.fetch_multi_page_stars = value == "true";
        }
        if let Ok(token) = std::env::var(GITHUB_TOKEN_ENV) {
            if !token.is_empty() {
                self.github_token = Some(token);
            }
        }
    }

    pub fn pagination(&self) -> PaginationConfig {
        PaginationConfig {
            fetch_multi_page_stars: self.fetch_multi_page_stars,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Default configuration file location (`<config dir>/github-stats/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
