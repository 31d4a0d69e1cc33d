//! Configuration management for DevCard
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (DEVCARD_*)
//! 3. Config file (~/.config/devcard/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// GitHub endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Base URL of the REST API
    pub api_url: String,

    /// GraphQL endpoint
    pub graphql_url: String,

    /// User-Agent sent with every request
    pub user_agent: String,

    /// Upper bound for any single API call
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            graphql_url: "https://api.github.com/graphql".to_string(),
            user_agent: concat!("devcard/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// What goes on the card and how much work is spent collecting it
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CardConfig {
    /// Length of the ranked language list
    pub top_languages: usize,

    /// Languages listed by name under the bar
    pub shown_languages: usize,

    /// Pinned or top repositories shown
    pub featured_repos: usize,

    /// Repositories scanned for language totals
    pub max_repos: usize,

    /// Count forked repositories towards language totals
    pub include_forks: bool,

    /// Concurrent per-repository language requests
    pub language_concurrency: usize,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            top_languages: 5,
            shown_languages: 4,
            featured_repos: 3,
            max_repos: 100,
            include_forks: true,
            language_concurrency: 8,
        }
    }
}

/// Web server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the web UI binds to
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// GitHub configuration
    pub github: GitHubConfig,

    /// Card configuration
    pub card: CardConfig,

    /// Server configuration
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/devcard/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("devcard").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - DEVCARD_API_URL: REST API base URL
    /// - DEVCARD_GRAPHQL_URL: GraphQL endpoint
    /// - DEVCARD_BIND: web server bind address
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(api_url) = std::env::var("DEVCARD_API_URL") {
            self.github.api_url = api_url;
        }

        if let Ok(graphql_url) = std::env::var("DEVCARD_GRAPHQL_URL") {
            self.github.graphql_url = graphql_url;
        }

        if let Ok(bind) = std::env::var("DEVCARD_BIND") {
            self.server.bind = bind;
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, bind: Option<String>, top_languages: Option<usize>) -> Self {
        if let Some(bind) = bind {
            self.server.bind = bind;
        }

        if let Some(top) = top_languages {
            self.card.top_languages = top;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(
        path: Option<&Path>,
        bind: Option<String>,
        top_languages: Option<usize>,
    ) -> Result<Self> {
        let base = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load()?,
        };
        let config = base
            .with_env_overrides()
            .with_cli_overrides(bind, top_languages);
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make a fetch meaningless
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("github.api_url", &self.github.api_url),
            ("github.graphql_url", &self.github.graphql_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| Error::Config(format!("{} is not a valid URL: {}", name, e)))?;
        }

        if self.card.language_concurrency == 0 {
            return Err(Error::Config(
                "card.language_concurrency must be at least 1".to_string(),
            ));
        }

        if self.github.timeout.is_zero() {
            return Err(Error::Config("github.timeout must be positive".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.card.top_languages, 5);
        assert_eq!(config.card.shown_languages, 4);
        assert_eq!(config.card.featured_repos, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides() {
        let config =
            Config::default().with_cli_overrides(Some("0.0.0.0:8080".to_string()), Some(3));

        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.card.top_languages, 3);
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[github]
api_url = "https://ghe.example.com/api/v3"
timeout = "5s"

[card]
top_languages = 8
include_forks = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.github.api_url, "https://ghe.example.com/api/v3");
        assert_eq!(config.github.timeout, Duration::from_secs(5));
        assert_eq!(config.card.top_languages, 8);
        assert!(!config.card.include_forks);
        // untouched sections keep defaults
        assert_eq!(config.card.featured_repos, 3);
        assert_eq!(config.server.bind, "127.0.0.1:3000");
    }

    #[test]
    fn test_load_from_file_rejects_bad_url() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[github]\napi_url = \"not a url\"").unwrap();

        let err = Config::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("github.api_url"));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = Config::default();
        config.card.language_concurrency = 0;
        assert!(config.validate().is_err());
    }
}
