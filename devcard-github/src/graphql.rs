//! GitHub GraphQL API support for data not available over REST
//!
//! The contribution calendar and pinned items only exist in GraphQL, which
//! always requires a token.

use devcard_core::RepoSummary;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::{Error, GitHubClient, Result};

const CONTRIBUTIONS_QUERY: &str = r#"
    query($username: String!) {
        user(login: $username) {
            contributionsCollection {
                contributionCalendar {
                    totalContributions
                }
            }
        }
    }
"#;

const PINNED_QUERY: &str = r#"
    query($username: String!, $first: Int!) {
        user(login: $username) {
            pinnedItems(first: $first, types: REPOSITORY) {
                totalCount
                nodes {
                    ... on Repository {
                        name
                        description
                        stargazerCount
                        forkCount
                        url
                        isFork
                        primaryLanguage {
                            name
                        }
                    }
                }
            }
        }
    }
"#;

/// GraphQL query response wrapper
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLError>>,
}

/// GraphQL error
#[derive(Debug, Deserialize)]
struct GraphQLError {
    message: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserData<T> {
    user: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsUser {
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionCalendar {
    total_contributions: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PinnedUser {
    pinned_items: PinnedConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PinnedConnection {
    #[allow(dead_code)]
    total_count: u32,
    nodes: Vec<PinnedNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PinnedNode {
    name: String,
    description: Option<String>,
    stargazer_count: u32,
    fork_count: u32,
    url: String,
    #[serde(default)]
    is_fork: bool,
    primary_language: Option<PrimaryLanguage>,
}

#[derive(Debug, Deserialize)]
struct PrimaryLanguage {
    name: String,
}

impl From<PinnedNode> for RepoSummary {
    fn from(node: PinnedNode) -> Self {
        RepoSummary {
            name: node.name,
            description: node.description,
            url: node.url,
            stars: node.stargazer_count,
            forks: node.fork_count,
            primary_language: node.primary_language.map(|l| l.name),
            fork: node.is_fork,
        }
    }
}

impl GitHubClient {
    /// Total contributions in the user's contribution calendar
    pub async fn get_total_contributions(&self, login: &str) -> Result<u64> {
        debug!(login, "Fetching total contributions via GraphQL");

        let variables = json!({ "username": login });
        let data: UserData<ContributionsUser> = self
            .bounded(
                "contributions query",
                self.graphql_query(CONTRIBUTIONS_QUERY, &variables, login),
            )
            .await?;

        let user = data
            .user
            .ok_or_else(|| Error::UserNotFound(login.to_string()))?;
        let total = user
            .contributions_collection
            .contribution_calendar
            .total_contributions;

        debug!(login, total, "Fetched total contributions");
        Ok(total)
    }

    /// The user's first `first` pinned repositories
    pub async fn get_pinned_repositories(&self, login: &str, first: usize) -> Result<Vec<RepoSummary>> {
        debug!(login, first, "Fetching pinned repositories via GraphQL");

        if first == 0 {
            return Ok(Vec::new());
        }

        // pinnedItems accepts at most six
        let variables = json!({ "username": login, "first": first.min(6) });
        let data: UserData<PinnedUser> = self
            .bounded(
                "pinned repositories query",
                self.graphql_query(PINNED_QUERY, &variables, login),
            )
            .await?;

        let user = data
            .user
            .ok_or_else(|| Error::UserNotFound(login.to_string()))?;

        Ok(user
            .pinned_items
            .nodes
            .into_iter()
            .map(RepoSummary::from)
            .collect())
    }

    /// Execute a GraphQL query
    async fn graphql_query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: &serde_json::Value,
        login: &str,
    ) -> Result<T> {
        let token = self
            .token()
            .ok_or_else(|| Error::Auth("GitHub GraphQL API requires a token".to_string()))?;

        let request_body = json!({
            "query": query,
            "variables": variables,
        });

        let response = self
            .http()
            .post(self.graphql_url())
            .bearer_auth(token)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response".to_string());
            return Err(status_error(status, text));
        }

        let graphql_response: GraphQLResponse<T> = response
            .json()
            .await
            .map_err(|e| Error::Parse(format!("Failed to parse GraphQL response: {}", e)))?;

        into_data(graphql_response, login)
    }
}

fn status_error(status: StatusCode, body: String) -> Error {
    match status {
        StatusCode::UNAUTHORIZED => {
            Error::Auth("Authentication failed. Please check your GitHub token".to_string())
        }
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
            if body.to_lowercase().contains("rate limit") =>
        {
            Error::RateLimited(body)
        }
        _ => Error::Other(format!(
            "GraphQL request failed with status {}: {}",
            status, body
        )),
    }
}

fn into_data<T>(response: GraphQLResponse<T>, login: &str) -> Result<T> {
    if let Some(errors) = response.errors.filter(|e| !e.is_empty()) {
        if errors
            .iter()
            .any(|e| e.kind.as_deref() == Some("NOT_FOUND"))
        {
            return Err(Error::UserNotFound(login.to_string()));
        }
        if errors
            .iter()
            .any(|e| e.kind.as_deref() == Some("RATE_LIMITED"))
        {
            return Err(Error::RateLimited(errors[0].message.clone()));
        }
        return Err(Error::GraphQl(
            errors.into_iter().map(|e| e.message).collect(),
        ));
    }

    response
        .data
        .ok_or_else(|| Error::Other("GraphQL response missing data".to_string()))
}
