//! GitHub API client using octocrab for REST and reqwest for GraphQL

use std::future::Future;
use std::time::Duration;

use devcard_core::{Config, GitHubConfig, Secrets};
use octocrab::Octocrab;
use tracing::{info, warn};

use crate::{Error, Result};

/// GitHub API client for profile data
pub struct GitHubClient {
    client: Octocrab,
    http: reqwest::Client,
    token: Option<String>,
    graphql_url: String,
    timeout: Duration,
}

impl GitHubClient {
    /// Create a client against the configured endpoints
    ///
    /// Without a token REST calls are still possible (at a much lower rate
    /// limit), but GraphQL calls fail with an authentication error.
    pub fn new(config: &GitHubConfig, token: Option<String>) -> Result<Self> {
        let mut builder = Octocrab::builder();
        if let Some(ref token) = token {
            builder = builder.personal_token(token.clone());
        }

        let client = builder
            .base_uri(config.api_url.as_str())
            .map_err(|e| Error::Other(format!("Invalid API URL {}: {}", config.api_url, e)))?
            .build()
            .map_err(|e| Error::Auth(format!("Failed to create GitHub client: {}", e)))?;

        // Timeouts come from `bounded`, not the transport
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        info!(api_url = %config.api_url, authenticated = token.is_some(), "Created GitHub client");

        Ok(Self {
            client,
            http,
            token,
            graphql_url: config.graphql_url.clone(),
            timeout: config.timeout,
        })
    }

    /// Create a client with the token resolved from the environment or secrets file
    ///
    /// Token is loaded from (in priority order):
    /// 1. GITHUB_TOKEN environment variable
    /// 2. GITHUB_PAT environment variable
    /// 3. ~/.config/devcard/secrets.toml
    pub fn from_env(config: &Config) -> Result<Self> {
        let secrets = Secrets::load().map_err(|e| Error::Auth(e.to_string()))?;
        let token = secrets.github_token();

        if token.is_none() {
            warn!(
                "No GitHub token found. Set GITHUB_TOKEN or run `devcard init`; \
                 contributions and pinned repositories need one"
            );
        }

        Self::new(&config.github, token)
    }

    /// Get the underlying octocrab client
    pub fn client(&self) -> &Octocrab {
        &self.client
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub(crate) fn graphql_url(&self) -> &str {
        &self.graphql_url
    }

    /// Whether requests carry a token
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Run `fut`, failing with [`Error::Timeout`] past the configured limit
    pub(crate) async fn bounded<T, F>(&self, what: &str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| Error::Timeout(format!("{} after {:?}", what, self.timeout)))?
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("graphql_url", &self.graphql_url)
            .field("authenticated", &self.token.is_some())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
