// GitHub API endpoint functions.
// Typed listing of a user's public repositories, most recently updated first.

use std::future::Future;

use crate::error::Result;

use super::client::GitHubClient;
use super::types::Repository;

/// Anything that can list a user's repositories in origin order.
///
/// The loader and revalidator only depend on this seam, so tests can script
/// responses without a network.
pub trait RepoSource {
    fn list_user_repos(
        &mut self,
        user: &str,
        per_page: u32,
    ) -> impl Future<Output = Result<Vec<Repository>>> + Send;
}

/// Parse a `/users/{user}/repos` body.
///
/// Kept apart from the transport so a malformed body maps to `Parse` rather
/// than a network error.
pub fn parse_repositories(body: &[u8]) -> Result<Vec<Repository>> {
    let repos: Vec<Repository> = serde_json::from_slice(body)?;
    Ok(repos)
}

impl GitHubClient {
    /// Get public repositories for a user, sorted by last update.
    pub async fn get_user_repos(&mut self, user: &str, per_page: u32) -> Result<Vec<Repository>> {
        let params = [("sort", "updated"), ("per_page", &per_page.to_string())];
        let response = self
            .get_with_params(&["users", user, "repos"], &params)
            .await?;
        let body = response.bytes().await?;
        parse_repositories(&body)
    }
}

impl RepoSource for GitHubClient {
    async fn list_user_repos(&mut self, user: &str, per_page: u32) -> Result<Vec<Repository>> {
        self.get_user_repos(user, per_page).await
    }
}
