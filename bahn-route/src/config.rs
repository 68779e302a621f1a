//! Application configuration and on-disk layout.
//!
//! Everything lives below one configuration directory, `~/.config/bahn` by
//! default:
//!
//! ```text
//! ~/.config/bahn/
//!     config      API token
//!     routes/     route files
//!     cache/      cached responses
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::DEFAULT_TTL;
use crate::timetable::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, TimetableConfig};

/// Environment variable that overrides the token file.
pub const TOKEN_ENV: &str = "BAHN_API_TOKEN";

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("failed to read API token from {path}: {source}")]
    TokenUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("API token file {path} is empty")]
    TokenEmpty { path: PathBuf },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Root of the token file, routes and cache
    pub config_dir: PathBuf,
    /// Timetable API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Lifetime of cached responses
    pub cache_ttl: Duration,
}

impl AppConfig {
    /// Create a config rooted at `config_dir` with default settings.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            cache_ttl: DEFAULT_TTL,
        }
    }

    /// Config rooted at `~/.config/bahn`.
    pub fn from_home() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::new(home.join(".config").join("bahn")))
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn token_path(&self) -> PathBuf {
        self.config_dir.join("config")
    }

    pub fn routes_dir(&self) -> PathBuf {
        self.config_dir.join("routes")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.config_dir.join("cache")
    }

    /// The API token: `BAHN_API_TOKEN` if set and non-empty, otherwise the
    /// trimmed contents of the token file.
    pub fn load_token(&self) -> Result<String, ConfigError> {
        let from_env = std::env::var(TOKEN_ENV).ok();
        resolve_token(from_env.as_deref(), &self.token_path())
    }

    /// Client configuration for the given token.
    pub fn timetable_config(&self, token: impl Into<String>) -> TimetableConfig {
        TimetableConfig::new(token)
            .with_base_url(&self.base_url)
            .with_timeout(self.timeout_secs)
    }
}

fn resolve_token(from_env: Option<&str>, path: &Path) -> Result<String, ConfigError> {
    if let Some(token) = from_env.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(token.to_string());
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(source) => {
            return Err(ConfigError::TokenUnreadable {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let token = contents.trim();
    if token.is_empty() {
        return Err(ConfigError::TokenEmpty {
            path: path.to_path_buf(),
        });
    }
    Ok(token.to_string())
}
