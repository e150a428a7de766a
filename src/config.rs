//! Configuration management for sellerscrawler
//!
//! All configuration is loaded from `./config/sellerscrawler.toml`.
//! No hardcoded defaults exist in source code - all defaults are in the config template.

use serde::Deserialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration file path relative to working directory
pub const CONFIG_PATH: &str = "./config/sellerscrawler.toml";

/// Default configuration file content - this is the ONLY place defaults exist
pub const DEFAULT_CONFIG: &str = include_str!("../config/sellerscrawler.toml");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found at {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid URL in '{field}': {url}")]
    InvalidUrl { field: String, url: String },

    #[error("Configuration field '{field}' cannot be empty")]
    EmptyRequired { field: String },

    #[error("At least one source URL must be configured")]
    NoSourcesConfigured,
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub sources: SourcesConfig,
    pub output: OutputConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub user_agent: String,
    pub request_timeout_secs: u64,
}

/// Crawl source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    /// sellers.json endpoints, fetched sequentially in list order
    pub urls: Vec<String>,
}

/// Output file locations for the three pipeline stages
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Fetcher output: label -> raw sellers.json body
    pub combined_path: String,
    /// Extractor output: label -> unique domain record
    pub domain_data_path: String,
    /// Consolidator output: ranked domain frequency report
    pub consolidated_path: String,
}

impl OutputConfig {
    /// Re-root all output paths under the given directory
    pub fn with_base_dir(&self, dir: &Path) -> Self {
        let rebase = |p: &str| dir.join(p).to_string_lossy().to_string();
        Self {
            combined_path: rebase(&self.combined_path),
            domain_data_path: rebase(&self.domain_data_path),
            consolidated_path: rebase(&self.consolidated_path),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(Path::new(CONFIG_PATH))
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.user_agent.is_empty() {
            return Err(ConfigError::EmptyRequired {
                field: "http.user_agent".to_string(),
            });
        }
        if self.http.request_timeout_secs == 0 {
            return Err(ConfigError::EmptyRequired {
                field: "http.request_timeout_secs".to_string(),
            });
        }

        if self.sources.urls.is_empty() {
            return Err(ConfigError::NoSourcesConfigured);
        }
        for (i, url) in self.sources.urls.iter().enumerate() {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidUrl {
                    field: format!("sources.urls[{}]", i),
                    url: url.clone(),
                });
            }
        }

        if self.output.combined_path.is_empty() {
            return Err(ConfigError::EmptyRequired {
                field: "output.combined_path".to_string(),
            });
        }
        if self.output.domain_data_path.is_empty() {
            return Err(ConfigError::EmptyRequired {
                field: "output.domain_data_path".to_string(),
            });
        }
        if self.output.consolidated_path.is_empty() {
            return Err(ConfigError::EmptyRequired {
                field: "output.consolidated_path".to_string(),
            });
        }

        Ok(())
    }

    /// Create default configuration file at the standard location
    pub fn create_default_config() -> Result<PathBuf, ConfigError> {
        let path = Path::new(CONFIG_PATH);

        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write default config
        let mut file = fs::File::create(path)?;
        file.write_all(DEFAULT_CONFIG.as_bytes())?;

        Ok(path.to_path_buf())
    }

    /// Check if stdin is a TTY (interactive terminal)
    pub fn is_interactive() -> bool {
        atty::is(atty::Stream::Stdin)
    }

    /// Prompt user to create default config (only in interactive mode)
    pub fn prompt_create_config() -> Result<Option<PathBuf>, ConfigError> {
        if !Self::is_interactive() {
            return Ok(None);
        }

        print!("Configuration file not found. Create default config? [Y/n] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim().to_lowercase();

        if input.is_empty() || input == "y" || input == "yes" {
            let path = Self::create_default_config()?;
            Ok(Some(path))
        } else {
            Ok(None)
        }
    }
}
