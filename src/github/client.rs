// GitHub API HTTP client.
// Unauthenticated reads with rate limit tracking and status classification.

use std::time::Duration;

use reqwest::{
    Client, Response, Url,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::{debug, warn};

use crate::error::{Result, ShowcaseError};

use super::types::RateLimit;

pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Upper bound on one request, connect through body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// GitHub API client with rate limit tracking.
pub struct GitHubClient {
    client: Client,
    base_url: String,
    rate_limit: RateLimit,
}

impl GitHubClient {
    /// Create a client against the public GitHub API.
    pub fn new() -> Result<Self> {
        Self::with_base_url(GITHUB_API_BASE)
    }

    /// Create a client against an alternate API root (enterprise hosts, local mirrors).
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("showcase"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ShowcaseError::Network)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            rate_limit: RateLimit::default(),
        })
    }

    /// Get the current rate limit information.
    pub fn rate_limit(&self) -> &RateLimit {
        &self.rate_limit
    }

    /// Build an endpoint URL from raw path segments, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ShowcaseError::Config(format!("api base {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| {
                ShowcaseError::Config(format!("api base {} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &mut self,
        segments: &[&str],
        params: &T,
    ) -> Result<Response> {
        let url = self.endpoint(segments)?;
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(ShowcaseError::Network)?;

        self.update_rate_limit(&response);
        self.check_response(response)
    }

    /// Update rate limit from response headers.
    fn update_rate_limit(&mut self, response: &Response) {
        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
        };

        if let Some(limit) = header("x-ratelimit-limit") {
            self.rate_limit.limit = limit;
        }
        if let Some(remaining) = header("x-ratelimit-remaining") {
            self.rate_limit.remaining = remaining;
        }
        if let Some(reset) = header("x-ratelimit-reset") {
            self.rate_limit.reset = reset;
        }
    }

    /// Anything outside 2xx becomes `Http { status }`.
    fn check_response(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status.as_u16() == 403 {
            warn!(
                remaining = self.rate_limit.remaining,
                reset_at = self.rate_limit.reset_at().as_deref().unwrap_or("unknown"),
                "GitHub rate limit reached"
            );
        }
        Err(ShowcaseError::Http {
            status: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::test_server::{Reply, header_value, serve_once};

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = GitHubClient::with_base_url("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
        assert_eq!(*client.rate_limit(), RateLimit::default());
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = GitHubClient::with_base_url("https://api.example.com/v3").unwrap();
        let url = client.endpoint(&["users", "a b", "repos"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v3/users/a%20b/repos");
    }

    #[tokio::test]
    async fn test_forbidden_is_rate_limited_and_tracked() {
        let (base, server) = serve_once(
            Reply::new(403, r#"{"message":"API rate limit exceeded"}"#)
                .header("x-ratelimit-limit", "60")
                .header("x-ratelimit-remaining", "0")
                .header("x-ratelimit-reset", "1735689600"),
        )
        .await;
        let mut client = GitHubClient::with_base_url(&base).unwrap();

        let err = client
            .get_with_params(&["users", "someone", "repos"], &[("per_page", "3")])
            .await
            .unwrap_err();
        assert!(matches!(err, ShowcaseError::Http { status: 403 }));
        assert!(err.is_rate_limited());
        assert_eq!(client.rate_limit().limit, 60);
        assert_eq!(client.rate_limit().remaining, 0);
        assert_eq!(client.rate_limit().reset, 1735689600);

        let head = server.await.unwrap();
        assert_eq!(
            header_value(&head, "accept"),
            Some("application/vnd.github.v3+json")
        );
        assert_eq!(header_value(&head, "user-agent"), Some("showcase"));
    }

    #[tokio::test]
    async fn test_server_error_is_plain_http_error() {
        let (base, server) = serve_once(Reply::new(500, "oops")).await;
        let mut client = GitHubClient::with_base_url(&base).unwrap();

        let err = client
            .get_with_params(&["users", "someone", "repos"], &[("sort", "updated")])
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_rate_limited());
        server.await.unwrap();
    }
}
