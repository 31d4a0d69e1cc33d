//! Profile data sources and the DevCard fan-out loader

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::config::CardConfig;
use crate::languages::{self, LanguageBytes};
use crate::models::{linkedin_url, DevCard, LanguageShare, RepoSummary, SocialAccount, UserProfile};
use crate::{Result, Username};

/// Where profile data comes from
///
/// The GitHub client is the production implementation. Each method maps to a
/// single upstream request (or a paginated series of them).
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch the user's profile
    async fn user(&self, login: &str) -> Result<UserProfile>;

    /// Fetch the user's linked social accounts
    async fn social_accounts(&self, login: &str) -> Result<Vec<SocialAccount>>;

    /// Total contributions from the contribution calendar
    async fn total_contributions(&self, login: &str) -> Result<u64>;

    /// Repositories owned by the user, at most `limit`
    async fn repositories(&self, login: &str, limit: usize) -> Result<Vec<RepoSummary>>;

    /// Language byte counts for one repository
    async fn repo_languages(&self, owner: &str, repo: &str) -> Result<LanguageBytes>;

    /// The first `first` pinned repositories
    async fn pinned_repositories(&self, login: &str, first: usize) -> Result<Vec<RepoSummary>>;
}

#[async_trait]
impl<T: ProfileSource + ?Sized> ProfileSource for Arc<T> {
    async fn user(&self, login: &str) -> Result<UserProfile> {
        (**self).user(login).await
    }

    async fn social_accounts(&self, login: &str) -> Result<Vec<SocialAccount>> {
        (**self).social_accounts(login).await
    }

    async fn total_contributions(&self, login: &str) -> Result<u64> {
        (**self).total_contributions(login).await
    }

    async fn repositories(&self, login: &str, limit: usize) -> Result<Vec<RepoSummary>> {
        (**self).repositories(login, limit).await
    }

    async fn repo_languages(&self, owner: &str, repo: &str) -> Result<LanguageBytes> {
        (**self).repo_languages(owner, repo).await
    }

    async fn pinned_repositories(&self, login: &str, first: usize) -> Result<Vec<RepoSummary>> {
        (**self).pinned_repositories(login, first).await
    }
}

/// Builds a [`DevCard`] from a [`ProfileSource`]
///
/// Only the profile is required. Every other piece degrades to an empty or
/// missing value, logged at `warn`.
pub struct DevCardLoader<S> {
    source: S,
    card: CardConfig,
}

impl<S: ProfileSource> DevCardLoader<S> {
    /// Create a loader over `source`
    pub fn new(source: S, card: CardConfig) -> Self {
        Self { source, card }
    }

    /// Get the underlying source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Card settings this loader was built with
    pub fn card_config(&self) -> &CardConfig {
        &self.card
    }

    /// Fetch everything the card needs for `username`
    ///
    /// The independent requests run concurrently and are awaited together.
    pub async fn load(&self, username: &Username) -> Result<DevCard> {
        let login = username.as_str();
        info!(login, "Loading DevCard");

        let (profile, contributions, (repos, languages), pinned, social) = tokio::join!(
            self.source.user(login),
            self.contributions(login),
            self.repos_and_languages(login),
            self.pinned(login),
            self.social(login),
        );

        let profile = profile?;

        let repositories = if pinned.is_empty() {
            debug!(login, "No pinned repositories, featuring top starred");
            top_starred(&repos, self.card.featured_repos)
        } else {
            pinned
        };

        debug!(
            login,
            contributions = ?contributions,
            languages = languages.len(),
            repositories = repositories.len(),
            "DevCard loaded"
        );

        Ok(DevCard {
            profile,
            contributions,
            languages,
            repositories,
            linkedin: linkedin_url(&social),
            fetched_at: Utc::now(),
        })
    }

    async fn contributions(&self, login: &str) -> Option<u64> {
        match self.source.total_contributions(login).await {
            Ok(total) => Some(total),
            Err(e) if e.is_auth() => {
                warn!(login, error = %e, "Authentication failed fetching contributions, check your GitHub token");
                None
            }
            Err(e) => {
                warn!(login, error = %e, "Failed to fetch contributions");
                None
            }
        }
    }

    async fn repos_and_languages(
        &self,
        login: &str,
    ) -> (Vec<RepoSummary>, Vec<LanguageShare>) {
        let repos = match self.source.repositories(login, self.card.max_repos).await {
            Ok(repos) => repos,
            Err(e) => {
                warn!(login, error = %e, "Failed to list repositories");
                return (Vec::new(), Vec::new());
            }
        };

        let counted: Vec<&RepoSummary> = repos
            .iter()
            .filter(|r| self.card.include_forks || !r.fork)
            .take(self.card.max_repos)
            .collect();

        debug!(login, repos = counted.len(), "Fetching repository languages");

        let requests: Vec<_> = counted
            .into_iter()
            .map(|repo| self.languages_or_empty(login, &repo.name))
            .collect();
        let per_repo: Vec<LanguageBytes> = stream::iter(requests)
            .buffer_unordered(self.card.language_concurrency.max(1))
            .collect()
            .await;

        let languages = languages::top_languages(per_repo, self.card.top_languages);
        (repos, languages)
    }

    async fn languages_or_empty(&self, login: &str, repo: &str) -> LanguageBytes {
        match self.source.repo_languages(login, repo).await {
            Ok(languages) => languages,
            Err(e) => {
                warn!(login, repo, error = %e, "Failed to fetch repository languages");
                LanguageBytes::new()
            }
        }
    }

    async fn pinned(&self, login: &str) -> Vec<RepoSummary> {
        match self
            .source
            .pinned_repositories(login, self.card.featured_repos)
            .await
        {
            Ok(mut pinned) => {
                pinned.truncate(self.card.featured_repos);
                pinned
            }
            Err(e) => {
                warn!(login, error = %e, "Failed to fetch pinned repositories");
                Vec::new()
            }
        }
    }

    async fn social(&self, login: &str) -> Vec<SocialAccount> {
        self.source
            .social_accounts(login)
            .await
            .unwrap_or_else(|e| {
                warn!(login, error = %e, "Failed to fetch social accounts");
                Vec::new()
            })
    }
}

/// The user's own repositories with the most stars
fn top_starred(repos: &[RepoSummary], limit: usize) -> Vec<RepoSummary> {
    let mut owned: Vec<RepoSummary> = repos.iter().filter(|r| !r.fork).cloned().collect();
    owned.sort_by(|a, b| b.stars.cmp(&a.stars).then_with(|| a.name.cmp(&b.name)));
    owned.truncate(limit);
    owned
}
