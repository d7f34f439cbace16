use std::fs::OpenOptions;
use std::io::{self, stdout};
use std::sync::{Arc, Mutex};

use crossterm::{
    ExecutableCommand,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tokio::runtime::Runtime;
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use showcase::app::{App, with_restore};
use showcase::cache::{SessionCache, paths};
use showcase::clock::{Clock, SystemClock};
use showcase::config::Config;
use showcase::github::GitHubClient;
use showcase::quotes::{QuoteClient, QuoteOfTheDay};
use showcase::state::{Loader, SharedView, Started};
use showcase::Result;

fn main() {
    if let Err(e) = run() {
        error!(error = %e, "showcase exited with an error");
        eprintln!("showcase: {}", e);
        std::process::exit(1);
    }
}

/// Log to a file so the terminal view stays clean. Logging is skipped when no
/// cache directory is available.
fn init_logging() {
    let Some(path) = paths::log_path() else {
        return;
    };
    if path
        .parent()
        .is_some_and(|dir| std::fs::create_dir_all(dir).is_err())
    {
        return;
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("showcase=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn run() -> Result<()> {
    init_logging();
    let config = Config::load()?;
    info!(session = ?config.session, "showcase starting");

    let runtime = Runtime::new()?;
    let view = SharedView::new(config.overrides.clone());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let cache = SessionCache::new(config.session_store(), clock, config.ttl());

    // Background work runs on the runtime; the terminal loop owns this thread.
    let loader = Loader::new(
        GitHubClient::with_base_url(&config.api_base)?,
        view.clone(),
        cache.clone(),
        config.identity_sources(),
        config.selection(),
    );
    let loader_task = runtime.spawn(loader.start());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let quotes = QuoteOfTheDay::new(QuoteClient::new(&config.quotes_url)?, view.clone(), cache);
    let quote_task = runtime.spawn(quotes.run(shutdown_rx));

    enable_raw_mode()?;
    let result = with_restore(|| run_tui(view), restore_terminal);

    info!("shutting down");
    let _ = shutdown_tx.send(true);
    runtime.block_on(async {
        // A load still in flight is abandoned; a finished one may own a timer.
        if loader_task.is_finished() {
            match loader_task.await {
                Ok(Started {
                    revalidation: Some(handle),
                    ..
                }) => handle.stop().await,
                Ok(_) => {}
                Err(e) => warn!(error = %e, "initial load task failed"),
            }
        } else {
            loader_task.abort();
        }
        if let Err(e) = quote_task.await {
            warn!(error = %e, "quote task failed");
        }
    });

    result?;
    Ok(())
}

fn run_tui(view: SharedView) -> io::Result<()> {
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    App::new(view).run(&mut terminal)
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
