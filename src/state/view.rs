// Renderer seam and the shared view model behind the terminal UI.
// The core pushes finished subsets and messages; the UI loop only reads.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::github::Repository;
use crate::quotes::{Quote, QuoteRenderer};

use super::cards::{Card, DisplayOverrides, build_cards};
use super::revalidate::BackgroundFailure;

/// Presentation collaborator driven by the loader and revalidator.
///
/// Each call replaces whatever was shown before; implementations must not
/// expose a partially updated list.
pub trait Renderer: Send + Sync {
    fn render(&self, repos: &[Repository]);
    fn render_fallback(&self, message: &str);
    fn render_loading(&self);

    /// Background refresh failed. Never shown as an error to the viewer.
    fn report_background_failure(&self, _failure: &BackgroundFailure) {}
}

impl<R: Renderer + ?Sized> Renderer for Arc<R> {
    fn render(&self, repos: &[Repository]) {
        (**self).render(repos)
    }

    fn render_fallback(&self, message: &str) {
        (**self).render_fallback(message)
    }

    fn render_loading(&self) {
        (**self).render_loading()
    }

    fn report_background_failure(&self, failure: &BackgroundFailure) {
        (**self).report_background_failure(failure)
    }
}

/// Loading state for async data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadingState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadingState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadingState::Loaded(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// Console message level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Info,
    Warn,
    Error,
}

/// A console message for the activity log.
#[derive(Debug, Clone)]
pub struct ConsoleMessage {
    pub level: ConsoleLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ConsoleMessage {
    pub fn info(message: impl Into<String>) -> Self {
        Self::at(ConsoleLevel::Info, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::at(ConsoleLevel::Warn, message)
    }

    fn at(level: ConsoleLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Everything the terminal draws.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub projects: LoadingState<Vec<Card>>,
    pub quote: Option<Quote>,
    pub console: Vec<ConsoleMessage>,
    /// Warnings not yet seen on the Console tab.
    pub console_unread: usize,
    pub last_render: Option<DateTime<Utc>>,
}

impl ViewState {
    fn log(&mut self, message: ConsoleMessage) {
        if message.level != ConsoleLevel::Info {
            self.console_unread += 1;
        }
        self.console.push(message);
    }
}

/// Renderer that publishes into a [`ViewState`] shared with the UI loop.
#[derive(Debug, Clone, Default)]
pub struct SharedView {
    state: Arc<Mutex<ViewState>>,
    overrides: Arc<DisplayOverrides>,
}

impl SharedView {
    pub fn new(overrides: DisplayOverrides) -> Self {
        Self {
            state: Arc::default(),
            overrides: Arc::new(overrides),
        }
    }

    /// Lock the view model. A poisoned lock still yields the last state.
    pub fn lock(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> ViewState {
        self.lock().clone()
    }

    pub fn mark_console_read(&self) {
        self.lock().console_unread = 0;
    }
}

impl Renderer for SharedView {
    fn render(&self, repos: &[Repository]) {
        // Cards are built before taking the lock so the swap is a single store
        let cards = build_cards(repos, &self.overrides);
        let mut state = self.lock();
        state.projects = LoadingState::Loaded(cards);
        state.last_render = Some(Utc::now());
        state.log(ConsoleMessage::info(format!(
            "Showing {} recent projects",
            repos.len()
        )));
    }

    fn render_fallback(&self, message: &str) {
        let mut state = self.lock();
        state.projects = LoadingState::Error(message.to_string());
        state.log(ConsoleMessage::warn(message));
    }

    fn render_loading(&self) {
        self.lock().projects = LoadingState::Loading;
    }

    fn report_background_failure(&self, failure: &BackgroundFailure) {
        // Info level: no badge, the viewer keeps the last good cards
        self.lock().log(ConsoleMessage::info(format!(
            "Background refresh skipped: {}",
            failure
        )));
    }
}

impl QuoteRenderer for SharedView {
    fn render_quote(&self, quote: &Quote) {
        self.lock().quote = Some(quote.clone());
    }
}
