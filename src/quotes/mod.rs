// Quote of the day.
// Remote list cached for the session, embedded fallbacks, and a midnight refresh.

pub mod picker;
pub mod source;

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::cache::{QUOTES_KEY, SessionCache};
use crate::shutdown::stop_requested;

pub use picker::{date_key, pick_for_date};
pub use source::{QUOTES_URL, QuoteClient, QuoteSource, parse_quotes};

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

impl Quote {
    fn embedded(text: &str, author: &str) -> Self {
        Self {
            text: text.to_string(),
            author: author.to_string(),
        }
    }
}

/// Built-in quotes used when the remote list is unavailable. The first one is
/// the default of last resort.
pub fn fallback_quotes() -> Vec<Quote> {
    vec![
        Quote::embedded(
            "The only way to do great work is to love what you do.",
            "Steve Jobs",
        ),
        Quote::embedded(
            "Strive not to be a success, but rather to be of value.",
            "Albert Einstein",
        ),
        Quote::embedded(
            "The journey of a thousand miles begins with one step.",
            "Lao Tzu",
        ),
        Quote::embedded("What we think, we become.", "Buddha"),
        Quote::embedded(
            "Success usually comes to those who are too busy to be looking for it.",
            "Henry David Thoreau",
        ),
    ]
}

/// Receives the chosen quote.
pub trait QuoteRenderer: Send + Sync {
    fn render_quote(&self, quote: &Quote);
}

impl<R: QuoteRenderer + ?Sized> QuoteRenderer for Arc<R> {
    fn render_quote(&self, quote: &Quote) {
        (**self).render_quote(quote)
    }
}

/// Time until the next local midnight.
pub fn until_next_midnight(now: NaiveDateTime) -> Duration {
    let next = now
        .date()
        .succ_opt()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(now);
    (next - now).to_std().unwrap_or(Duration::ZERO)
}

/// Loads and shows the quote for today.
pub struct QuoteOfTheDay<S, R> {
    source: S,
    renderer: R,
    cache: SessionCache,
    fallbacks: Vec<Quote>,
}

impl<S: QuoteSource, R: QuoteRenderer> QuoteOfTheDay<S, R> {
    pub fn new(source: S, renderer: R, cache: SessionCache) -> Self {
        Self {
            source,
            renderer,
            cache,
            fallbacks: fallback_quotes(),
        }
    }

    /// Session-cached remote list, fetched on first use. The list has no TTL;
    /// it is only written when non-empty. Failures read as `None`.
    pub async fn remote_quotes(&mut self) -> Option<Vec<Quote>> {
        if let Some(cached) = self.cache.read_json::<Vec<Quote>>(QUOTES_KEY) {
            debug!(count = cached.len(), "using session quote list");
            return Some(cached);
        }

        match self.source.fetch_quotes().await {
            Ok(quotes) => {
                if !quotes.is_empty() {
                    self.cache.write_json(QUOTES_KEY, &quotes);
                }
                Some(quotes)
            }
            Err(e) => {
                warn!(error = %e, "remote quote fetch failed");
                None
            }
        }
    }

    /// Pick today's quote and hand it to the renderer.
    pub async fn refresh(&mut self) -> Quote {
        let remote = self.remote_quotes().await.filter(|q| !q.is_empty());
        let candidates = remote.as_deref().unwrap_or(self.fallbacks.as_slice());
        let today = self.cache.clock().today();

        let quote = pick_for_date(candidates, today)
            .or_else(|| self.fallbacks.first())
            .cloned()
            .unwrap_or_else(|| Quote::embedded("", ""));

        info!(date = %date_key(today), author = %quote.author, "quote of the day");
        self.renderer.render_quote(&quote);
        quote
    }

    /// Show today's quote, then refresh just after each local midnight until
    /// shutdown. A fetch still in flight at shutdown is dropped.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        tokio::select! {
            _ = self.refresh() => {}
            _ = stop_requested(&mut shutdown) => return,
        }

        let first =
            until_next_midnight(self.cache.clock().now_local()) + Duration::from_secs(1);
        tokio::select! {
            _ = tokio::time::sleep(first) => {}
            _ = stop_requested(&mut shutdown) => return,
        }

        let mut daily = tokio::time::interval(DAY);
        loop {
            tokio::select! {
                _ = daily.tick() => {}
                _ = stop_requested(&mut shutdown) => break,
            }
            tokio::select! {
                _ = self.refresh() => {}
                _ = stop_requested(&mut shutdown) => break,
            }
        }
        debug!("quote refresher shutting down");
    }
}
