// Project card view model.
// Turns a repository into display text, applying per-repository overrides.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::github::Repository;

const NO_DESCRIPTION: &str = "No description provided.";
const DEFAULT_TAG: &str = "Code";

/// Hand-written presentation for a specific repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOverride {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Overrides keyed by repository name.
pub type DisplayOverrides = HashMap<String, DisplayOverride>;

/// One rendered project card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Last update as `Mon YYYY`.
    pub updated: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub url: String,
}

impl Card {
    pub fn from_repository(repo: &Repository, overrides: &DisplayOverrides) -> Self {
        let custom = overrides.get(&repo.name);

        let title = custom
            .and_then(|c| c.title.clone())
            .unwrap_or_else(|| repo.name.clone());

        let description = custom
            .and_then(|c| c.description.clone())
            .or_else(|| repo.description.clone().filter(|d| !d.trim().is_empty()))
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());

        let tags = match custom {
            Some(c) if !c.tags.is_empty() => c.tags.clone(),
            _ => vec![
                repo.language
                    .clone()
                    .unwrap_or_else(|| DEFAULT_TAG.to_string()),
            ],
        };

        Self {
            title,
            description,
            tags,
            updated: repo.updated_at.map(|dt| dt.format("%b %Y").to_string()),
            stars: repo.stargazers_count.unwrap_or(0),
            forks: repo.forks_count.unwrap_or(0),
            url: repo.html_url.clone(),
        }
    }
}

/// Cards for a whole subset, in subset order.
pub fn build_cards(repos: &[Repository], overrides: &DisplayOverrides) -> Vec<Card> {
    repos
        .iter()
        .map(|repo| Card::from_repository(repo, overrides))
        .collect()
}
