//! GitHub login validation

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const MAX_LEN: usize = 39;

/// A validated GitHub login
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Parse user input into a login
    ///
    /// Accepts:
    /// - octocat
    /// - @octocat
    /// - https://github.com/octocat (any trailing path is ignored)
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let login = strip_profile_url(trimmed)?;
        let login = login.strip_prefix('@').unwrap_or(login);

        validate(login)?;
        Ok(Self(login.to_string()))
    }

    /// The login as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn strip_profile_url(input: &str) -> Result<&str> {
    if !input.starts_with("https://") && !input.starts_with("http://") {
        return Ok(input);
    }

    let rest = input.split_once("://").map(|(_, r)| r).unwrap_or(input);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    let path = rest
        .strip_prefix("github.com/")
        .ok_or_else(|| Error::InvalidUsername(format!("not a GitHub profile URL: {}", input)))?;

    Ok(path.split(['/', '?', '#']).next().unwrap_or_default())
}

fn validate(login: &str) -> Result<()> {
    if login.is_empty() {
        return Err(Error::InvalidUsername("username is empty".to_string()));
    }
    if login.len() > MAX_LEN {
        return Err(Error::InvalidUsername(format!(
            "{} is longer than {} characters",
            login, MAX_LEN
        )));
    }
    if !login.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(Error::InvalidUsername(format!(
            "{} may only contain letters, digits and hyphens",
            login
        )));
    }
    if login.starts_with('-') || login.ends_with('-') {
        return Err(Error::InvalidUsername(format!(
            "{} cannot begin or end with a hyphen",
            login
        )));
    }
    if login.contains("--") {
        return Err(Error::InvalidUsername(format!(
            "{} cannot contain consecutive hyphens",
            login
        )));
    }
    Ok(())
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}
