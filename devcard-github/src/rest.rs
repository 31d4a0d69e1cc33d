//! REST endpoints: profile, social accounts, repositories and languages

use devcard_core::{LanguageBytes, RepoSummary, SocialAccount, UserProfile};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{classify_api_error, Resource};
use crate::{GitHubClient, Result};

const PER_PAGE: usize = 100;

/// Repository as returned by `/users/{login}/repos`
#[derive(Debug, Deserialize)]
struct RepoResponse {
    name: String,
    description: Option<String>,
    html_url: String,
    #[serde(default)]
    stargazers_count: u32,
    #[serde(default)]
    forks_count: u32,
    language: Option<String>,
    #[serde(default)]
    fork: bool,
}

impl From<RepoResponse> for RepoSummary {
    fn from(repo: RepoResponse) -> Self {
        RepoSummary {
            name: repo.name,
            description: repo.description,
            url: repo.html_url,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            primary_language: repo.language,
            fork: repo.fork,
        }
    }
}

/// Query parameters for the repository listing
#[derive(Debug, Serialize)]
struct RepoListParams {
    #[serde(rename = "type")]
    kind: &'static str,
    sort: &'static str,
    per_page: usize,
    page: u32,
}

impl GitHubClient {
    /// Fetch a user's profile
    pub async fn get_user(&self, login: &str) -> Result<UserProfile> {
        debug!(login, "Fetching user");

        let route = format!("/users/{}", login);
        self.bounded("user profile", async {
            self.client()
                .get::<UserProfile, _, ()>(route, None)
                .await
                .map_err(|e| classify_api_error(e, Resource::User(login)))
        })
        .await
    }

    /// Fetch the social accounts a user has linked
    pub async fn get_social_accounts(&self, login: &str) -> Result<Vec<SocialAccount>> {
        debug!(login, "Fetching social accounts");

        let route = format!("/users/{}/social_accounts", login);
        self.bounded("social accounts", async {
            self.client()
                .get::<Vec<SocialAccount>, _, ()>(route, None)
                .await
                .map_err(|e| classify_api_error(e, Resource::User(login)))
        })
        .await
    }

    /// List repositories owned by a user, most recently pushed first
    ///
    /// Pages through the listing until `limit` repositories are collected or
    /// the listing runs out.
    pub async fn list_repositories(&self, login: &str, limit: usize) -> Result<Vec<RepoSummary>> {
        debug!(login, limit, "Listing repositories");

        let mut repos = Vec::new();
        let mut page = 1u32;
        // page numbering only lines up while per_page stays fixed
        let per_page = PER_PAGE.min(limit).max(1);

        while repos.len() < limit {
            let params = RepoListParams {
                kind: "owner",
                sort: "pushed",
                per_page,
                page,
            };
            let route = format!("/users/{}/repos", login);

            let batch: Vec<RepoResponse> = self
                .bounded("repository listing", async {
                    self.client()
                        .get::<Vec<RepoResponse>, _, _>(route, Some(&params))
                        .await
                        .map_err(|e| classify_api_error(e, Resource::User(login)))
                })
                .await?;

            let fetched = batch.len();
            repos.extend(batch.into_iter().map(RepoSummary::from));
            debug!(login, page, fetched, total = repos.len(), "Fetched repository page");

            if fetched < per_page {
                break;
            }
            page += 1;
        }

        repos.truncate(limit);
        Ok(repos)
    }

    /// Language byte counts for one repository
    pub async fn get_repo_languages(&self, owner: &str, repo: &str) -> Result<LanguageBytes> {
        debug!(owner, repo, "Fetching repository languages");

        let route = format!("/repos/{}/{}/languages", owner, repo);
        self.bounded("repository languages", async {
            self.client()
                .get::<LanguageBytes, _, ()>(route, None)
                .await
                .map_err(|e| classify_api_error(e, Resource::Repo { owner, repo }))
        })
        .await
    }
}
