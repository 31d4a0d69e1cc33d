//! Data shapes for a fetched DevCard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A GitHub user profile as shown on the card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Login handle
    pub login: String,
    /// Display name, if the user set one
    #[serde(default)]
    pub name: Option<String>,
    /// Avatar image URL
    pub avatar_url: String,
    /// Profile page URL
    pub html_url: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Public email, only present when the user exposes it
    #[serde(default)]
    pub email: Option<String>,
    /// Free-form website field, often missing a scheme
    #[serde(default)]
    pub blog: Option<String>,
    #[serde(default)]
    pub twitter_username: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    /// Account creation time
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Name to headline the card with, falling back to the login
    pub fn display_name(&self) -> &str {
        non_blank(&self.name).unwrap_or(&self.login)
    }

    /// Two-letter avatar fallback
    pub fn initials(&self) -> String {
        self.login.chars().take(2).collect::<String>().to_uppercase()
    }

    /// Location, if set and not blank
    pub fn location(&self) -> Option<&str> {
        non_blank(&self.location)
    }

    /// Company, if set and not blank
    pub fn company(&self) -> Option<&str> {
        non_blank(&self.company)
    }

    /// Public email, if set and not blank
    pub fn email(&self) -> Option<&str> {
        non_blank(&self.email)
    }

    /// Website as an absolute URL
    ///
    /// GitHub stores whatever the user typed, so `example.com` becomes
    /// `https://example.com`. Unparseable values are dropped.
    pub fn website(&self) -> Option<String> {
        let blog = non_blank(&self.blog)?;
        let candidate = if blog.contains("://") {
            blog.to_string()
        } else {
            format!("https://{}", blog)
        };
        match url::Url::parse(&candidate) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Some(candidate),
            _ => None,
        }
    }

    /// Twitter handle without a leading `@`
    pub fn twitter_handle(&self) -> Option<&str> {
        non_blank(&self.twitter_username).map(|h| h.trim_start_matches('@'))
    }

    /// Link to the Twitter profile
    pub fn twitter_url(&self) -> Option<String> {
        self.twitter_handle()
            .map(|handle| format!("https://twitter.com/{}", handle))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// A linked social account from `/users/{login}/social_accounts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialAccount {
    pub provider: String,
    pub url: String,
}

/// Find the LinkedIn profile among a user's social accounts
pub fn linkedin_url(accounts: &[SocialAccount]) -> Option<String> {
    accounts
        .iter()
        .find(|a| a.provider.eq_ignore_ascii_case("linkedin"))
        .map(|a| a.url.clone())
}

/// A repository summary, used for both pinned and owned repositories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    pub stars: u32,
    pub forks: u32,
    #[serde(default)]
    pub primary_language: Option<String>,
    /// Whether this repository is a fork of another
    #[serde(default)]
    pub fork: bool,
}

/// A language's slice of the ranked total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub name: String,
    pub bytes: u64,
    /// Share of the ranked total, 0-100
    pub percent: f64,
}

/// Everything the card displays for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevCard {
    pub profile: UserProfile,
    /// Contributions in the last year; `None` when unavailable
    pub contributions: Option<u64>,
    /// Ranked languages, largest first
    pub languages: Vec<LanguageShare>,
    /// Pinned repositories, or top owned repositories when none are pinned
    pub repositories: Vec<RepoSummary>,
    #[serde(default)]
    pub linkedin: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    pub fn profile(login: &str) -> UserProfile {
        UserProfile {
            login: login.to_string(),
            name: None,
            avatar_url: format!("https://avatars.githubusercontent.com/{}", login),
            html_url: format!("https://github.com/{}", login),
            bio: None,
            company: None,
            location: None,
            email: None,
            blog: None,
            twitter_username: None,
            public_repos: 12,
            followers: 34,
            following: 5,
            created_at: Utc.with_ymd_and_hms(2015, 3, 14, 9, 26, 53).unwrap(),
        }
    }

    pub fn repo(name: &str, stars: u32) -> RepoSummary {
        RepoSummary {
            name: name.to_string(),
            description: Some(format!("{} description", name)),
            url: format!("https://github.com/octocat/{}", name),
            stars,
            forks: stars / 2,
            primary_language: Some("Rust".to_string()),
            fork: false,
        }
    }

    pub fn card(login: &str) -> DevCard {
        DevCard {
            profile: profile(login),
            contributions: None,
            languages: Vec::new(),
            repositories: Vec::new(),
            linkedin: None,
            fetched_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }
}
