// Test doubles for the loader and revalidator.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::github::{RepoSource, Repository};

use super::revalidate::BackgroundFailure;
use super::view::Renderer;

pub fn repo(name: &str) -> Repository {
    Repository {
        name: name.to_string(),
        full_name: Some(format!("someone/{}", name)),
        html_url: format!("https://github.com/someone/{}", name),
        description: None,
        language: None,
        stargazers_count: None,
        forks_count: None,
        updated_at: None,
    }
}

pub fn page(names: &[&str]) -> Result<Vec<Repository>> {
    Ok(names.iter().map(|n| repo(n)).collect())
}

/// Replays scripted responses; repeats the last success when exhausted.
pub struct Scripted {
    responses: VecDeque<Result<Vec<Repository>>>,
    last: Vec<Repository>,
    pub calls: Arc<AtomicUsize>,
}

impl Scripted {
    pub fn new(responses: Vec<Result<Vec<Repository>>>) -> Self {
        Self {
            responses: responses.into(),
            last: Vec::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl RepoSource for Scripted {
    async fn list_user_repos(&mut self, _user: &str, _per_page: u32) -> Result<Vec<Repository>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.responses.pop_front() {
            Some(Ok(repos)) => {
                self.last = repos.clone();
                Ok(repos)
            }
            Some(Err(e)) => Err(e),
            None => Ok(self.last.clone()),
        }
    }
}

/// Records every renderer call.
#[derive(Default)]
pub struct Recorder {
    pub renders: Mutex<Vec<Vec<String>>>,
    pub fallbacks: Mutex<Vec<String>>,
    pub loading: AtomicUsize,
    pub failures: AtomicUsize,
}

impl Recorder {
    pub fn rendered(&self) -> Vec<Vec<String>> {
        self.renders.lock().unwrap().clone()
    }

    pub fn fallback_messages(&self) -> Vec<String> {
        self.fallbacks.lock().unwrap().clone()
    }
}

impl Renderer for Recorder {
    fn render(&self, repos: &[Repository]) {
        self.renders
            .lock()
            .unwrap()
            .push(repos.iter().map(|r| r.name.clone()).collect());
    }

    fn render_fallback(&self, message: &str) {
        self.fallbacks.lock().unwrap().push(message.to_string());
    }

    fn render_loading(&self) {
        self.loading.fetch_add(1, Ordering::SeqCst);
    }

    fn report_background_failure(&self, _failure: &BackgroundFailure) {
        self.failures.fetch_add(1, Ordering::SeqCst);
    }
}
