// GitHub API module.
// Client, repository listing, and the source trait the loader depends on.

pub mod client;
pub mod endpoints;
pub mod types;

#[cfg(test)]
pub(crate) mod test_server;

pub use client::{GITHUB_API_BASE, GitHubClient, REQUEST_TIMEOUT};
pub use endpoints::{RepoSource, parse_repositories};
pub use types::{RateLimit, Repository};
