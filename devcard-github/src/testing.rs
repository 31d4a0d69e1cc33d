//! Local stand-in for the GitHub API
//!
//! Serves just enough of the REST and GraphQL surface for client tests:
//! - `octocat` exists with [`TOTAL_REPOS`] repositories
//! - `badtoken` answers 401, `limited` answers 403 with a rate-limit message
//! - any other user, and the repository `deleted-repo`, answer 404
//! - GraphQL for `slow` never answers in time

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use devcard_core::GitHubConfig;
use serde_json::{json, Value};

use crate::GitHubClient;

pub const TOTAL_REPOS: usize = 130;

/// Request counters shared with the running server
#[derive(Clone, Default)]
pub struct Hits {
    pub repo_pages: Arc<AtomicUsize>,
}

impl Hits {
    pub fn repo_pages(&self) -> usize {
        self.repo_pages.load(Ordering::SeqCst)
    }
}

/// A running stub server
pub struct StubGitHub {
    pub base_url: String,
    pub hits: Hits,
}

impl StubGitHub {
    pub async fn start() -> Self {
        let hits = Hits::default();
        let app = Router::new()
            .route("/users/{login}", get(user))
            .route("/users/{login}/repos", get(repos))
            .route("/repos/{owner}/{repo}/languages", get(languages))
            .route("/graphql", post(graphql))
            .with_state(hits.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            hits,
        }
    }

    pub fn config(&self) -> GitHubConfig {
        GitHubConfig {
            api_url: self.base_url.clone(),
            graphql_url: format!("{}/graphql", self.base_url),
            ..GitHubConfig::default()
        }
    }

    pub fn client(&self, token: Option<&str>) -> GitHubClient {
        GitHubClient::new(&self.config(), token.map(str::to_string)).unwrap()
    }
}

fn github_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "message": message,
            "documentation_url": "https://docs.github.com/rest"
        })),
    )
        .into_response()
}

async fn user(Path(login): Path<String>) -> Response {
    match login.as_str() {
        "octocat" => Json(json!({
            "login": "octocat",
            "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
            "html_url": "https://github.com/octocat",
            "name": "The Octocat",
            "location": "San Francisco",
            "public_repos": TOTAL_REPOS,
            "followers": 16000,
            "following": 9,
            "created_at": "2011-01-25T18:44:36Z"
        }))
        .into_response(),
        "badtoken" => github_error(StatusCode::UNAUTHORIZED, "Bad credentials"),
        "limited" => github_error(
            StatusCode::FORBIDDEN,
            "API rate limit exceeded for 127.0.0.1.",
        ),
        _ => github_error(StatusCode::NOT_FOUND, "Not Found"),
    }
}

async fn repos(
    State(hits): State<Hits>,
    Path(login): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    hits.repo_pages.fetch_add(1, Ordering::SeqCst);
    if login != "octocat" {
        return github_error(StatusCode::NOT_FOUND, "Not Found");
    }

    let param = |name: &str, default: usize| {
        params
            .get(name)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    };
    let page = param("page", 1).max(1);
    let per_page = param("per_page", 30);

    let start = ((page - 1) * per_page).min(TOTAL_REPOS);
    let end = (start + per_page).min(TOTAL_REPOS);
    let items: Vec<Value> = (start..end)
        .map(|i| {
            json!({
                "name": format!("repo-{}", i),
                "description": null,
                "html_url": format!("https://github.com/octocat/repo-{}", i),
                "stargazers_count": i,
                "forks_count": 0,
                "language": "Rust",
                "fork": false
            })
        })
        .collect();
    Json(Value::Array(items)).into_response()
}

async fn languages(Path((_owner, repo)): Path<(String, String)>) -> Response {
    if repo == "deleted-repo" {
        return github_error(StatusCode::NOT_FOUND, "Not Found");
    }
    Json(json!({ "Rust": 1000, "Shell": 24 })).into_response()
}

async fn graphql(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer "));
    if !authorized {
        return github_error(StatusCode::UNAUTHORIZED, "Bad credentials");
    }

    match body["variables"]["username"].as_str() {
        Some("slow") => {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Json(json!({ "data": null })).into_response()
        }
        Some("octocat") => Json(json!({
            "data": { "user": { "contributionsCollection": {
                "contributionCalendar": { "totalContributions": 1337 }
            }}}
        }))
        .into_response(),
        _ => Json(json!({
            "data": { "user": null },
            "errors": [{ "type": "NOT_FOUND", "message": "Could not resolve to a User" }]
        }))
        .into_response(),
    }
}
