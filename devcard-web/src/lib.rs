//! DevCard Web - serves the DevCard page over HTTP
//!
//! Routes:
//! - `GET /` form page; with `?username=` it shows the skeleton and loads the card
//! - `GET /card/{username}` card (or error panel) as an HTML fragment
//! - `GET /api/devcard/{username}` card as JSON
//! - `GET /healthz` liveness

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use devcard_core::render::html;
use devcard_core::{
    CardConfig, DevCard, DevCardLoader, Error, ProfileForm, ProfileSource, Username,
    FETCH_ERROR_MESSAGE,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    loader: Arc<DevCardLoader<Arc<dyn ProfileSource>>>,
}

impl AppState {
    /// Create state over any profile source
    pub fn new(source: Arc<dyn ProfileSource>, card: CardConfig) -> Self {
        Self {
            loader: Arc::new(DevCardLoader::new(source, card)),
        }
    }

    fn card_config(&self) -> &CardConfig {
        self.loader.card_config()
    }
}

/// Build the router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/card/{username}", get(card_fragment))
        .route("/api/devcard/{username}", get(card_json))
        .route("/healthz", get(|| async { "ok" }))
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "DevCard server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    username: Option<String>,
}

async fn index(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Html<String> {
    let mut form = ProfileForm::with_input(query.username.unwrap_or_default());
    let pending = form.submit();

    let mut body = format!(
        "{}\n<section id=\"devcard\">{}</section>\n",
        html::form(form.input()),
        html::state_section(form.state(), state.card_config())
    );
    body.push_str(&loader_script(pending.as_ref().map(|t| t.username())));

    Html(html::document("DevCard", &body))
}

async fn card_fragment(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> (StatusCode, Html<String>) {
    let username = match Username::parse(&username) {
        Ok(username) => username,
        Err(e) => {
            warn!(input = %username, error = %e, "Rejected username");
            return (
                StatusCode::BAD_REQUEST,
                Html(html::error_panel(FETCH_ERROR_MESSAGE)),
            );
        }
    };

    match state.loader.load(&username).await {
        Ok(card) => (
            StatusCode::OK,
            Html(html::card(&card, state.card_config())),
        ),
        Err(e) => {
            warn!(username = %username, error = %e, "Error fetching data");
            (status_for(&e), Html(html::error_panel(FETCH_ERROR_MESSAGE)))
        }
    }
}

async fn card_json(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<DevCard>, ApiError> {
    let username = Username::parse(&username)?;
    let card = state.loader.load(&username).await.map_err(|e| {
        warn!(username = %username, error = %e, "Error fetching data");
        e
    })?;
    Ok(Json(card))
}

/// JSON error body for the API route
#[derive(Debug)]
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        let message = match &self.0 {
            Error::InvalidUsername(_) | Error::NotFound(_) | Error::RateLimited(_) => {
                self.0.to_string()
            }
            _ => FETCH_ERROR_MESSAGE.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::InvalidUsername(_) => StatusCode::BAD_REQUEST,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        _ => StatusCode::BAD_GATEWAY,
    }
}

/// Client-side loader: swaps the skeleton for the fetched card
///
/// Each load bumps a counter; a response is applied only if no newer load
/// started in the meantime.
fn loader_script(initial: Option<&Username>) -> String {
    let skeleton = serde_json::to_string(&html::skeleton()).unwrap_or_default();
    let error = serde_json::to_string(&html::error_panel(FETCH_ERROR_MESSAGE)).unwrap_or_default();
    let initial = initial
        .map(|u| format!("load({});", json!(u.as_str())))
        .unwrap_or_default();

    format!(
        r#"<script>
(function () {{
  var section = document.getElementById("devcard");
  var form = document.querySelector(".devcard-form");
  var input = form.querySelector("input[name=username]");
  var skeleton = {skeleton};
  var errorPanel = {error};
  var latest = 0;
  function load(username) {{
    var request = ++latest;
    section.innerHTML = skeleton;
    fetch("/card/" + encodeURIComponent(username))
      .then(function (r) {{ return r.text(); }})
      .then(function (body) {{ if (request === latest) section.innerHTML = body; }})
      .catch(function () {{ if (request === latest) section.innerHTML = errorPanel; }});
  }}
  form.addEventListener("submit", function (event) {{
    event.preventDefault();
    var username = input.value.trim();
    if (!username) return;
    history.replaceState(null, "", "/?username=" + encodeURIComponent(username));
    load(username);
  }});
  {initial}
}})();
</script>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::Utc;
    use devcard_core::{LanguageBytes, RepoSummary, SocialAccount, UserProfile};
    use tower::ServiceExt;

    struct StubSource;

    #[async_trait]
    impl ProfileSource for StubSource {
        async fn user(&self, login: &str) -> devcard_core::Result<UserProfile> {
            match login {
                "octocat" => Ok(UserProfile {
                    login: "octocat".to_string(),
                    name: Some("The Octocat".to_string()),
                    avatar_url: "https://avatars.githubusercontent.com/u/583231".to_string(),
                    html_url: "https://github.com/octocat".to_string(),
                    bio: None,
                    company: None,
                    location: None,
                    email: None,
                    blog: None,
                    twitter_username: None,
                    public_repos: 8,
                    followers: 10,
                    following: 1,
                    created_at: Utc::now(),
                }),
                "limited" => Err(Error::RateLimited("try later".to_string())),
                "broken" => Err(Error::Auth("bad credentials".to_string())),
                other => Err(Error::NotFound(format!("user {}", other))),
            }
        }

        async fn social_accounts(&self, _login: &str) -> devcard_core::Result<Vec<SocialAccount>> {
            Ok(Vec::new())
        }

        async fn total_contributions(&self, _login: &str) -> devcard_core::Result<u64> {
            Ok(512)
        }

        async fn repositories(
            &self,
            _login: &str,
            _limit: usize,
        ) -> devcard_core::Result<Vec<RepoSummary>> {
            Ok(vec![RepoSummary {
                name: "hello-world".to_string(),
                description: Some("My first repo".to_string()),
                url: "https://github.com/octocat/hello-world".to_string(),
                stars: 5,
                forks: 1,
                primary_language: Some("Rust".to_string()),
                fork: false,
            }])
        }

        async fn repo_languages(
            &self,
            _owner: &str,
            _repo: &str,
        ) -> devcard_core::Result<LanguageBytes> {
            Ok([("Rust".to_string(), 100u64)].into_iter().collect())
        }

        async fn pinned_repositories(
            &self,
            _login: &str,
            _first: usize,
        ) -> devcard_core::Result<Vec<RepoSummary>> {
            Ok(Vec::new())
        }
    }

    fn app() -> Router {
        router(AppState::new(Arc::new(StubSource), CardConfig::default()))
    }

    async fn get(uri: &str) -> (StatusCode, String) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_index_without_username() {
        let (status, body) = get("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Enter GitHub username"));
        assert!(!body.contains("aria-busy=\"true\""));
        assert!(!body.contains("load(\""));
    }

    #[tokio::test]
    async fn test_index_with_username_shows_skeleton() {
        let (status, body) = get("/?username=%40octocat").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("aria-busy=\"true\""));
        assert!(body.contains("load(\"octocat\");"));
    }

    #[tokio::test]
    async fn test_index_with_invalid_username_shows_error() {
        let (_, body) = get("/?username=bad%20name").await;
        assert!(body.contains("role=\"alert\""));
        assert!(body.contains(FETCH_ERROR_MESSAGE));
        assert!(!body.contains("Invalid GitHub username"));
    }

    #[tokio::test]
    async fn test_card_fragment() {
        let (status, body) = get("/card/octocat").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h2>The Octocat</h2>"));
        assert!(body.contains("512"));
        // no pinned repos, so the owned repository is featured
        assert!(body.contains("hello-world"));
        assert!(!body.contains("role=\"alert\""));
    }

    #[tokio::test]
    async fn test_card_fragment_failure_suppresses_card() {
        let (status, body) = get("/card/ghost").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains(FETCH_ERROR_MESSAGE));
        assert!(!body.contains("class=\"badge\""));

        let (status, _) = get("/card/broken").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_card_fragment_rejects_invalid_username() {
        let (status, body) = get("/card/-bad-").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains(FETCH_ERROR_MESSAGE));
        assert!(!body.contains("Invalid GitHub username"));
    }

    #[tokio::test]
    async fn test_json_api() {
        let (status, body) = get("/api/devcard/octocat").await;
        assert_eq!(status, StatusCode::OK);
        let card: DevCard = serde_json::from_str(&body).unwrap();
        assert_eq!(card.contributions, Some(512));
        assert_eq!(card.languages[0].name, "Rust");

        let (status, body) = get("/api/devcard/limited").await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert!(body.contains("Rate limited"));

        let (status, body) = get("/api/devcard/broken").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.contains(FETCH_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_healthz() {
        let (status, body) = get("/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }
}
