// App state and main event loop.
// Manages tabs, card selection, and keyboard input handling.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::ListState;

use crate::state::SharedView;
use crate::ui;

/// Active tab in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Projects,
    Quote,
    Console,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Projects, Tab::Quote, Tab::Console];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Projects => "Projects",
            Tab::Quote => "Quote",
            Tab::Console => "Console",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Projects => Tab::Quote,
            Tab::Quote => Tab::Console,
            Tab::Console => Tab::Projects,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Tab::Projects => Tab::Console,
            Tab::Quote => Tab::Projects,
            Tab::Console => Tab::Quote,
        }
    }
}

/// Main application state.
pub struct App {
    /// View model written by the background tasks.
    pub view: SharedView,
    /// Currently active tab.
    pub active_tab: Tab,
    /// Selected project card.
    pub cards_state: ListState,
    /// Whether the app should exit.
    pub should_quit: bool,
}

impl App {
    pub fn new(view: SharedView) -> Self {
        Self {
            view,
            active_tab: Tab::default(),
            cards_state: ListState::default(),
            should_quit: false,
        }
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        while !self.should_quit {
            let state = self.view.snapshot();
            terminal.draw(|frame| ui::draw(frame, self, &state))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => {
                self.active_tab = self.active_tab.next();
                self.clear_console_badge_if_viewing();
            }
            KeyCode::BackTab => {
                self.active_tab = self.active_tab.prev();
                self.clear_console_badge_if_viewing();
            }
            KeyCode::Down | KeyCode::Char('j') if self.active_tab == Tab::Projects => {
                self.select_card(1)
            }
            KeyCode::Up | KeyCode::Char('k') if self.active_tab == Tab::Projects => {
                self.select_card(-1)
            }
            _ => {}
        }
    }

    fn select_card(&mut self, delta: isize) {
        let count = self
            .view
            .lock()
            .projects
            .data()
            .map(Vec::len)
            .unwrap_or(0);
        if count == 0 {
            self.cards_state.select(None);
            return;
        }
        let current = self.cards_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, count as isize - 1);
        self.cards_state.select(Some(next as usize));
    }

    /// Clear console badge when viewing console tab.
    fn clear_console_badge_if_viewing(&mut self) {
        if self.active_tab == Tab::Console {
            self.view.mark_console_read();
        }
    }
}

/// Run `body`, then `restore` whether or not `body` succeeded. The body's
/// error wins when both fail.
pub fn with_restore<T>(
    body: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    let result = body();
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::Repository;
    use crate::state::Renderer;

    fn repo(name: &str) -> Repository {
        Repository {
            name: name.to_string(),
            full_name: None,
            html_url: format!("https://github.com/u/{}", name),
            description: None,
            language: None,
            stargazers_count: None,
            forks_count: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_tab_cycle() {
        let mut app = App::new(SharedView::default());
        assert_eq!(app.active_tab, Tab::Projects);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.active_tab, Tab::Quote);
        app.handle_key(KeyCode::BackTab);
        app.handle_key(KeyCode::BackTab);
        assert_eq!(app.active_tab, Tab::Console);
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_viewing_console_clears_badge() {
        let view = SharedView::default();
        view.render_fallback("Unable to load projects from GitHub.");
        let mut app = App::new(view.clone());
        assert_eq!(view.snapshot().console_unread, 1);

        app.handle_key(KeyCode::BackTab);
        assert_eq!(view.snapshot().console_unread, 0);
    }

    #[test]
    fn test_card_selection_is_clamped() {
        let view = SharedView::default();
        view.render(&[repo("a"), repo("b")]);
        let mut app = App::new(view);

        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Down);
        assert_eq!(app.cards_state.selected(), Some(1));
        app.handle_key(KeyCode::Up);
        app.handle_key(KeyCode::Up);
        assert_eq!(app.cards_state.selected(), Some(0));
    }

    #[test]
    fn test_restore_runs_when_setup_fails() {
        let mut restored = false;
        let result: io::Result<()> = with_restore(
            || Err(io::Error::other("no alternate screen")),
            || {
                restored = true;
                Ok(())
            },
        );
        assert_eq!(result.unwrap_err().to_string(), "no alternate screen");
        assert!(restored);
    }

    #[test]
    fn test_restore_failure_reported_after_clean_run() {
        let result = with_restore(|| Ok(7), || Err(io::Error::other("tty gone")));
        assert_eq!(result.unwrap_err().to_string(), "tty gone");
        assert_eq!(with_restore(|| Ok(7), || Ok(())).unwrap(), 7);
    }
}
