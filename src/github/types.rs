// GitHub API response types.
// Only the repository fields the showcase actually displays are modeled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public repository as listed by `/users/{user}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: Option<u64>,
    #[serde(default)]
    pub forks_count: Option<u64>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Repository {
    /// Key used for exclusion lists.
    pub fn key(&self) -> &str {
        &self.name
    }

    /// Owner-qualified key when the origin supplied one, otherwise the bare name.
    pub fn qualified_key(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.name)
    }
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}

impl RateLimit {
    /// Reset instant formatted as wall-clock time, if known.
    pub fn reset_at(&self) -> Option<String> {
        if self.reset == 0 {
            return None;
        }
        DateTime::from_timestamp(self.reset as i64, 0).map(|dt| dt.format("%H:%M:%S").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_repository_parses() {
        let repo: Repository = serde_json::from_str(
            r#"{"name":"Python-game","html_url":"https://github.com/x/Python-game"}"#,
        )
        .unwrap();
        assert_eq!(repo.key(), "Python-game");
        assert_eq!(repo.qualified_key(), "Python-game");
        assert!(repo.description.is_none());
        assert!(repo.updated_at.is_none());
    }

    #[test]
    fn test_qualified_key_prefers_full_name() {
        let repo: Repository = serde_json::from_str(
            r#"{
                "name": "Python-game",
                "full_name": "Lama-Raj/Python-game",
                "html_url": "https://github.com/Lama-Raj/Python-game",
                "stargazers_count": 12,
                "updated_at": "2025-01-04T10:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(repo.qualified_key(), "Lama-Raj/Python-game");
        assert_eq!(repo.stargazers_count, Some(12));
    }

    #[test]
    fn test_rate_limit_reset_unknown() {
        assert_eq!(RateLimit::default().reset_at(), None);
    }
}
