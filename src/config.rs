// Configuration loading.
// TOML file first, then environment overrides, then defaults for anything unset.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cache::{FileStore, MemoryStore, SessionStore, paths};
use crate::error::{Result, ShowcaseError};
use crate::github::GITHUB_API_BASE;
use crate::quotes::QUOTES_URL;
use crate::state::{DisplayOverrides, ExclusionSet, IdentitySource, Selection};

const CONFIG_ENV: &str = "SHOWCASE_CONFIG";
const USERNAME_ENV: &str = "GITHUB_USERNAME";
const PROFILE_LINK_ENV: &str = "SHOWCASE_PROFILE_LINK";
const SESSION_ENV: &str = "SHOWCASE_SESSION";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Explicit GitHub username; wins over the profile link.
    #[serde(default)]
    pub username: Option<String>,
    /// Contact link the username can be read from.
    #[serde(default)]
    pub profile_link: Option<String>,
    /// Named session. Unset means an in-memory session for this process.
    #[serde(default)]
    pub session: Option<String>,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
    #[serde(default = "default_fetch_page")]
    pub fetch_page: u32,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_excluded")]
    pub excluded: Vec<String>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_quotes_url")]
    pub quotes_url: String,
    #[serde(default)]
    pub overrides: DisplayOverrides,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: None,
            profile_link: None,
            session: None,
            per_page: default_per_page(),
            fetch_page: default_fetch_page(),
            cache_ttl_secs: default_cache_ttl_secs(),
            excluded: default_excluded(),
            api_base: default_api_base(),
            quotes_url: default_quotes_url(),
            overrides: HashMap::new(),
        }
    }
}

fn default_per_page() -> usize {
    3
}

fn default_fetch_page() -> u32 {
    10
}

fn default_cache_ttl_secs() -> u64 {
    900
}

fn default_excluded() -> Vec<String> {
    vec!["Lama-Raj.github.io".to_string(), "Lama-Raj".to_string()]
}

fn default_api_base() -> String {
    GITHUB_API_BASE.to_string()
}

fn default_quotes_url() -> String {
    QUOTES_URL.to_string()
}

impl Config {
    /// Load from the config file (if any) and the process environment.
    pub fn load() -> Result<Self> {
        let mut config = match config_file() {
            Some(path) if path.exists() => Self::from_path(&path)?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ShowcaseError::Config(e.to_string()))
    }

    /// Overlay environment values. Blank values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(username) = lookup(USERNAME_ENV) {
            self.username = Some(username);
        }
        if let Some(link) = lookup(PROFILE_LINK_ENV) {
            self.profile_link = Some(link);
        }
        if let Some(session) = lookup(SESSION_ENV) {
            self.session = Some(session);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.cache_ttl_secs == 0 {
            return Err(ShowcaseError::Config("cache_ttl_secs must be > 0".to_string()));
        }
        if (self.fetch_page as usize) < self.per_page {
            return Err(ShowcaseError::Config(
                "fetch_page must be at least per_page".to_string(),
            ));
        }
        Ok(())
    }

    /// Identity sources in priority order, ending at the placeholder.
    pub fn identity_sources(&self) -> Vec<IdentitySource> {
        let mut sources = Vec::new();
        if let Some(name) = &self.username {
            sources.push(IdentitySource::Override(name.clone()));
        }
        if let Some(link) = &self.profile_link {
            sources.push(IdentitySource::ProfileLink(link.clone()));
        }
        sources.push(IdentitySource::Placeholder);
        sources
    }

    pub fn selection(&self) -> Selection {
        Selection {
            exclusions: self.excluded.iter().cloned().collect::<ExclusionSet>(),
            limit: self.per_page,
            fetch_page: self.fetch_page,
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Storage for this session: a directory per named session, else memory.
    pub fn session_store(&self) -> Arc<dyn SessionStore> {
        match self.session.as_deref().and_then(paths::session_dir) {
            Some(dir) => {
                debug!(dir = %dir.display(), "using file-backed session");
                Arc::new(FileStore::new(dir))
            }
            None => Arc::new(MemoryStore::new()),
        }
    }
}

fn config_file() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .or_else(paths::config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.per_page, 3);
        assert_eq!(config.fetch_page, 10);
        assert_eq!(config.ttl(), Duration::from_secs(15 * 60));
        assert!(config.selection().exclusions.contains("Lama-Raj.github.io"));
        assert_eq!(config.identity_sources(), vec![IdentitySource::Placeholder]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            username = "octocat"
            per_page = 4

            [overrides.Python-game]
            title = "Battleship"
            tags = ["Python", "Game"]
            "#,
        )
        .unwrap();

        assert_eq!(config.username.as_deref(), Some("octocat"));
        assert_eq!(config.per_page, 4);
        assert_eq!(config.fetch_page, 10);
        assert_eq!(config.api_base, GITHUB_API_BASE);
        let custom = &config.overrides["Python-game"];
        assert_eq!(custom.title.as_deref(), Some("Battleship"));
        assert_eq!(custom.description, None);
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = Config::from_toml("per_page = \"three\"").unwrap_err();
        assert!(matches!(err, ShowcaseError::Config(_)));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = Config::from_toml("username = \"from-file\"").unwrap();
        config.apply_env(env(&[
            ("GITHUB_USERNAME", "from-env"),
            ("SHOWCASE_PROFILE_LINK", "https://github.com/linked"),
            ("SHOWCASE_SESSION", "  "),
        ]));

        assert_eq!(config.username.as_deref(), Some("from-env"));
        assert_eq!(config.session, None);
        assert_eq!(
            config.identity_sources(),
            vec![
                IdentitySource::Override("from-env".to_string()),
                IdentitySource::ProfileLink("https://github.com/linked".to_string()),
                IdentitySource::Placeholder,
            ]
        );
    }

    #[test]
    fn test_validate_rejects_bad_tunables() {
        let mut config = Config::default();
        config.cache_ttl_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.fetch_page = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unnamed_session_is_in_memory() {
        let store = Config::default().session_store();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
