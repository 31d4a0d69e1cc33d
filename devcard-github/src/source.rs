//! [`ProfileSource`] backed by the GitHub API

use async_trait::async_trait;
use devcard_core::{LanguageBytes, ProfileSource, RepoSummary, SocialAccount, UserProfile};

use crate::GitHubClient;

#[async_trait]
impl ProfileSource for GitHubClient {
    async fn user(&self, login: &str) -> devcard_core::Result<UserProfile> {
        Ok(self.get_user(login).await?)
    }

    async fn social_accounts(&self, login: &str) -> devcard_core::Result<Vec<SocialAccount>> {
        Ok(self.get_social_accounts(login).await?)
    }

    async fn total_contributions(&self, login: &str) -> devcard_core::Result<u64> {
        Ok(self.get_total_contributions(login).await?)
    }

    async fn repositories(
        &self,
        login: &str,
        limit: usize,
    ) -> devcard_core::Result<Vec<RepoSummary>> {
        Ok(self.list_repositories(login, limit).await?)
    }

    async fn repo_languages(&self, owner: &str, repo: &str) -> devcard_core::Result<LanguageBytes> {
        Ok(self.get_repo_languages(owner, repo).await?)
    }

    async fn pinned_repositories(
        &self,
        login: &str,
        first: usize,
    ) -> devcard_core::Result<Vec<RepoSummary>> {
        Ok(self.get_pinned_repositories(login, first).await?)
    }
}
