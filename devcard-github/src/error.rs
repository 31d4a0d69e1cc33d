//! Error types for GitHub operations

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// GitHub REST API error
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    /// HTTP transport error on the GraphQL endpoint
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication error
    #[error("GitHub authentication error: {0}")]
    Auth(String),

    /// User not found
    #[error("GitHub user {0} not found")]
    UserNotFound(String),

    /// Repository not found, as `owner/repo`
    #[error("GitHub repository {0} not found")]
    RepoNotFound(String),

    /// Rate limit exceeded
    #[error("GitHub rate limit exceeded: {0}")]
    RateLimited(String),

    /// GraphQL response carried an errors array
    #[error("GraphQL errors: {}", .0.join(", "))]
    GraphQl(Vec<String>),

    /// Request did not finish in time
    #[error("GitHub request timed out: {0}")]
    Timeout(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl From<Error> for devcard_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Auth(msg) => devcard_core::Error::Auth(msg),
            Error::UserNotFound(login) => devcard_core::Error::NotFound(format!("user {}", login)),
            Error::RepoNotFound(repo) => {
                devcard_core::Error::NotFound(format!("repository {}", repo))
            }
            Error::RateLimited(msg) => devcard_core::Error::RateLimited(msg),
            other => devcard_core::Error::Source(other.to_string()),
        }
    }
}

/// The resource a REST route addresses, used to name a 404
#[derive(Debug, Clone, Copy)]
pub(crate) enum Resource<'a> {
    User(&'a str),
    Repo { owner: &'a str, repo: &'a str },
}

/// Classify a REST error by the HTTP status GitHub answered with
pub(crate) fn classify_api_error(err: octocrab::Error, resource: Resource<'_>) -> Error {
    let details = match &err {
        octocrab::Error::GitHub { source, .. } => {
            Some((source.status_code.as_u16(), source.message.clone()))
        }
        _ => None,
    };
    let Some((status, message)) = details else {
        return Error::Api(err);
    };

    match status {
        404 => match resource {
            Resource::User(login) => Error::UserNotFound(login.to_string()),
            Resource::Repo { owner, repo } => Error::RepoNotFound(format!("{}/{}", owner, repo)),
        },
        401 => Error::Auth(format!("Invalid GitHub token: {}", message)),
        403 | 429 if message.to_lowercase().contains("rate limit") => Error::RateLimited(message),
        _ => Error::Api(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_into_core_error() {
        let core: devcard_core::Error = Error::UserNotFound("ghost".to_string()).into();
        assert!(matches!(core, devcard_core::Error::NotFound(_)));

        let core: devcard_core::Error = Error::Auth("bad".to_string()).into();
        assert!(core.is_auth());

        let core: devcard_core::Error = Error::GraphQl(vec!["a".into(), "b".into()]).into();
        match core {
            devcard_core::Error::Source(msg) => assert_eq!(msg, "GraphQL errors: a, b"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_missing_repository_is_not_a_missing_user() {
        let core: devcard_core::Error = Error::RepoNotFound("octocat/gone".to_string()).into();
        match core {
            devcard_core::Error::NotFound(msg) => assert_eq!(msg, "repository octocat/gone"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_rate_limit_stays_classified() {
        let core: devcard_core::Error = Error::RateLimited("resets soon".to_string()).into();
        assert!(matches!(core, devcard_core::Error::RateLimited(_)));
    }
}
