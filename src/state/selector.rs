// Filtering and truncation of fetched repositories.
// Drops excluded names, keeps origin order, and compares subsets by key sequence.

use std::collections::HashSet;

use crate::github::Repository;

/// Repository names that must never be shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    names: HashSet<String>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// How a fetched page becomes a subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub exclusions: ExclusionSet,
    /// Maximum subset length.
    pub limit: usize,
    /// Page size requested from the origin; larger than `limit` so exclusions
    /// do not starve the subset.
    pub fetch_page: u32,
}

impl Selection {
    pub fn apply(&self, repos: Vec<Repository>) -> Vec<Repository> {
        filter_and_pick(repos, &self.exclusions, self.limit)
    }
}

/// Remove excluded repositories, then keep the first `limit` in origin order.
pub fn filter_and_pick(
    repos: Vec<Repository>,
    exclusions: &ExclusionSet,
    limit: usize,
) -> Vec<Repository> {
    repos
        .into_iter()
        .filter(|repo| !exclusions.contains(repo.key()))
        .take(limit)
        .collect()
}

/// Ordered identity keys of a subset.
pub fn key_sequence(repos: &[Repository]) -> Vec<&str> {
    repos.iter().map(Repository::qualified_key).collect()
}

/// Order- and element-sensitive comparison of two subsets.
pub fn same_keys(a: &[Repository], b: &[Repository]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(x, y)| x.qualified_key() == y.qualified_key())
}
