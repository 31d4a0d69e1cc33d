//! DevCard GitHub - GitHub integration for DevCard
//!
//! This crate provides the GitHub-backed [`devcard_core::ProfileSource`]:
//! profile, repositories and languages over REST, contributions and pinned
//! repositories over GraphQL.

mod client;
mod error;
mod graphql;
mod rest;
mod source;

#[cfg(test)]
mod testing;

pub use client::GitHubClient;
pub use error::{Error, Result};
