// Background revalidation.
// Re-fetches on a fixed period and re-renders only when the subset's keys change.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cache::SessionCache;
use crate::error::ShowcaseError;
use crate::github::{RepoSource, Repository};
use crate::shutdown::stop_requested;

use super::selector::{Selection, key_sequence, same_keys};
use super::view::Renderer;

/// A firing that could not produce a usable subset. Logged and reported to
/// the renderer's console, never shown as an error.
#[derive(Error, Debug)]
pub enum BackgroundFailure {
    #[error("{0}")]
    Fetch(ShowcaseError),

    #[error("origin returned no usable repositories")]
    Empty,
}

/// Result of one revalidation firing.
#[derive(Debug)]
pub enum RevalidationOutcome {
    /// Same keys in the same order; nothing written, nothing rendered.
    Unchanged,
    /// Cache replaced and the new subset rendered.
    Updated(Vec<Repository>),
    /// Firing absorbed; cache and view untouched.
    Failed(BackgroundFailure),
}

impl RevalidationOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, RevalidationOutcome::Updated(_))
    }
}

/// Owns the periodic refresh for one identity.
pub struct Revalidator<S, R> {
    source: S,
    renderer: R,
    cache: SessionCache,
    identity: String,
    selection: Selection,
    /// Last subset handed to the renderer.
    current: Vec<Repository>,
    period: Duration,
}

impl<S: RepoSource, R: Renderer> Revalidator<S, R> {
    pub fn new(
        source: S,
        renderer: R,
        cache: SessionCache,
        identity: String,
        selection: Selection,
        current: Vec<Repository>,
    ) -> Self {
        let period = cache.ttl();
        Self {
            source,
            renderer,
            cache,
            identity,
            selection,
            current,
            period,
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn current(&self) -> &[Repository] {
        &self.current
    }

    /// Run one firing: fetch, select, compare, and update on change.
    pub async fn revalidate_once(&mut self) -> RevalidationOutcome {
        let fetched = match self
            .source
            .list_user_repos(&self.identity, self.selection.fetch_page)
            .await
        {
            Ok(repos) => repos,
            Err(e) => return self.absorb(BackgroundFailure::Fetch(e)),
        };

        let fresh = self.selection.apply(fetched);
        if fresh.is_empty() {
            return self.absorb(BackgroundFailure::Empty);
        }

        // The stored entry is the baseline even past its TTL; it still holds
        // what was last rendered.
        let stored = self.cache.peek(&self.identity).map(|entry| entry.repos);
        let baseline = stored.as_deref().unwrap_or(self.current.as_slice());

        if same_keys(baseline, &fresh) {
            debug!(identity = %self.identity, "revalidation found no change");
            return RevalidationOutcome::Unchanged;
        }

        info!(
            identity = %self.identity,
            before = ?key_sequence(baseline),
            after = ?key_sequence(&fresh),
            "recent projects changed"
        );
        self.cache.write(&self.identity, &fresh);
        self.renderer.render(&fresh);
        self.current = fresh.clone();
        RevalidationOutcome::Updated(fresh)
    }

    fn absorb(&self, failure: BackgroundFailure) -> RevalidationOutcome {
        warn!(identity = %self.identity, error = %failure, "background refresh failed");
        self.renderer.report_background_failure(&failure);
        RevalidationOutcome::Failed(failure)
    }

    /// Fire every period until shutdown. Firings never overlap: a slow fetch
    /// delays the next tick instead of stacking up. A fetch still in flight at
    /// shutdown is dropped.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = stop_requested(&mut shutdown) => break,
            }
            tokio::select! {
                _ = self.revalidate_once() => {}
                _ = stop_requested(&mut shutdown) => break,
            }
        }
        debug!(identity = %self.identity, "revalidation stopped");
    }
}

impl<S, R> Revalidator<S, R>
where
    S: RepoSource + Send + 'static,
    R: Renderer + 'static,
{
    /// Arm the timer on the runtime.
    pub fn spawn(self) -> RevalidationHandle {
        let (shutdown, rx) = watch::channel(false);
        let task = tokio::spawn(self.run(rx));
        RevalidationHandle { shutdown, task }
    }
}

/// Running revalidation task.
pub struct RevalidationHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl RevalidationHandle {
    /// Stop the timer and wait for the task. An in-flight fetch is abandoned.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            warn!(error = %e, "revalidation task ended abnormally");
        }
    }
}
