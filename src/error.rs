// Error types for showcase.
// Covers origin failures, malformed bodies, session storage, and configuration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShowcaseError {
    #[error("GitHub API responded {status}")]
    Http { status: u16 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("No usable records after filtering")]
    EmptyResult,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl ShowcaseError {
    /// The origin rejected the request because the rate limit was hit.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ShowcaseError::Http { status: 403 })
    }

    /// HTTP status carried by the error, if the origin answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ShowcaseError::Http { status } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ShowcaseError>;
