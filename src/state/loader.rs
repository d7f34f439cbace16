// Initial load of recent projects.
// Resolves the identity, serves from cache or fetches, renders, then hands off to revalidation.

use std::fmt;

use tracing::{debug, info, warn};

use crate::cache::SessionCache;
use crate::error::{Result, ShowcaseError};
use crate::github::{RepoSource, Repository};

use super::identity::{Identity, IdentitySource, resolve_identity};
use super::revalidate::{RevalidationHandle, Revalidator};
use super::selector::Selection;
use super::view::Renderer;

const UNCONFIGURED_MESSAGE: &str = "Set GITHUB_USERNAME or a GitHub profile link in the config \
     to enable auto-fetching of repos.";

/// Where the loader is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    ResolvingIdentity,
    CheckingCache,
    Fetching,
    Rendering,
    Scheduled,
    Fallback,
}

/// Why the projects view fell back instead of showing cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No username configured.
    Unconfigured,
    /// Origin answered 403.
    RateLimited,
    /// Any other HTTP, network, or parse failure.
    Failed,
    /// Requests succeeded but nothing survived filtering.
    NoResults { identity: String },
}

impl FallbackReason {
    fn from_error(error: &ShowcaseError, identity: &str) -> Self {
        match error {
            ShowcaseError::EmptyResult => FallbackReason::NoResults {
                identity: identity.to_string(),
            },
            e if e.is_rate_limited() => FallbackReason::RateLimited,
            _ => FallbackReason::Failed,
        }
    }

    /// Text shown to the viewer.
    pub fn message(&self) -> String {
        match self {
            FallbackReason::Unconfigured => UNCONFIGURED_MESSAGE.to_string(),
            FallbackReason::RateLimited => "GitHub rate limit reached. Try again later.".to_string(),
            FallbackReason::Failed => "Unable to load projects from GitHub.".to_string(),
            FallbackReason::NoResults { identity } => {
                format!("No public repositories found for {}.", identity)
            }
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// How the initial load ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Rendered {
        identity: String,
        repos: Vec<Repository>,
        from_cache: bool,
    },
    Fallback(FallbackReason),
}

/// Drives the initial load for one identity.
pub struct Loader<S, R> {
    source: S,
    renderer: R,
    cache: SessionCache,
    identity_sources: Vec<IdentitySource>,
    selection: Selection,
    phase: LoadPhase,
    loaded: Option<(String, Vec<Repository>)>,
}

impl<S: RepoSource, R: Renderer> Loader<S, R> {
    pub fn new(
        source: S,
        renderer: R,
        cache: SessionCache,
        identity_sources: Vec<IdentitySource>,
        selection: Selection,
    ) -> Self {
        Self {
            source,
            renderer,
            cache,
            identity_sources,
            selection,
            phase: LoadPhase::Idle,
            loaded: None,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Run the initial load to either a rendered subset or a fallback view.
    pub async fn initialize(&mut self) -> LoadOutcome {
        self.phase = LoadPhase::ResolvingIdentity;
        let identity = match resolve_identity(&self.identity_sources) {
            Identity::Resolved(name) => name,
            Identity::Unconfigured => return self.fall_back(FallbackReason::Unconfigured),
        };

        self.renderer.render_loading();

        self.phase = LoadPhase::CheckingCache;
        let cached = self
            .cache
            .read(&identity)
            .map(|entry| entry.repos)
            .filter(|repos| !repos.is_empty());
        let from_cache = cached.is_some();

        let repos = match cached {
            Some(repos) => {
                debug!(%identity, count = repos.len(), "serving recent projects from cache");
                repos
            }
            None => match self.fetch_subset(&identity).await {
                Ok(repos) => repos,
                Err(e) => {
                    warn!(%identity, error = %e, "failed to fetch repos");
                    return self.fall_back(FallbackReason::from_error(&e, &identity));
                }
            },
        };

        self.phase = LoadPhase::Rendering;
        info!(%identity, count = repos.len(), from_cache, "rendering recent projects");
        self.renderer.render(&repos);
        self.loaded = Some((identity.clone(), repos.clone()));

        LoadOutcome::Rendered {
            identity,
            repos,
            from_cache,
        }
    }

    /// Fetch and select, retrying once when the first pass comes back empty.
    async fn fetch_subset(&mut self, identity: &str) -> Result<Vec<Repository>> {
        for attempt in 1..=2 {
            self.phase = LoadPhase::Fetching;
            let fetched = self
                .source
                .list_user_repos(identity, self.selection.fetch_page)
                .await?;
            let repos = self.selection.apply(fetched);

            if !repos.is_empty() {
                self.cache.write(identity, &repos);
                return Ok(repos);
            }
            debug!(identity, attempt, "fetch produced no usable repos");
        }
        Err(ShowcaseError::EmptyResult)
    }

    fn fall_back(&mut self, reason: FallbackReason) -> LoadOutcome {
        self.phase = LoadPhase::Fallback;
        warn!(reason = ?reason, "showing fallback instead of recent projects");
        self.renderer.render_fallback(&reason.message());
        LoadOutcome::Fallback(reason)
    }

    /// Hand the rendered subset to a revalidator. Only a successful load is
    /// revalidated; after a fallback this yields `None`.
    pub fn into_revalidator(self) -> Option<Revalidator<S, R>> {
        if !matches!(self.phase, LoadPhase::Rendering | LoadPhase::Scheduled) {
            return None;
        }
        let (identity, current) = self.loaded?;
        Some(Revalidator::new(
            self.source,
            self.renderer,
            self.cache,
            identity,
            self.selection,
            current,
        ))
    }
}

impl<S, R> Loader<S, R>
where
    S: RepoSource + Send + 'static,
    R: Renderer + 'static,
{
    /// Initial load followed by armed revalidation when the load succeeded.
    pub async fn start(mut self) -> Started {
        let outcome = self.initialize().await;
        if self.phase == LoadPhase::Rendering {
            self.phase = LoadPhase::Scheduled;
        }
        let phase = self.phase;

        let revalidation = self.into_revalidator().map(|revalidator| {
            debug!(
                identity = revalidator.identity(),
                period_secs = revalidator.period().as_secs(),
                "revalidation scheduled"
            );
            revalidator.spawn()
        });

        Started {
            outcome,
            phase,
            revalidation,
        }
    }
}

/// A finished initial load and, if it succeeded, its running revalidation.
pub struct Started {
    pub outcome: LoadOutcome,
    /// `Scheduled` or `Fallback`.
    pub phase: LoadPhase,
    pub revalidation: Option<RevalidationHandle>,
}
