// UI module for rendering the TUI.
// Contains widgets for tabs, project cards, the quote, and the console.

mod list;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};
use crate::state::{ConsoleLevel, ViewState};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App, state: &ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_tabs(frame, app.active_tab, state.console_unread, chunks[0]);

    match app.active_tab {
        Tab::Projects => {
            list::render_cards(frame, &state.projects, &mut app.cards_state, chunks[1])
        }
        Tab::Quote => draw_quote_tab(frame, state, chunks[1]),
        Tab::Console => draw_console_tab(frame, state, chunks[1]),
    }

    draw_status_bar(frame, state, chunks[2]);
}

/// Tab title, with the unread warning count on Console.
fn tab_label(tab: Tab, active: Tab, unread: usize) -> Span<'static> {
    let badged = tab == Tab::Console && unread > 0;
    let title = if badged {
        format!("{} ({})", tab.title(), unread)
    } else {
        tab.title().to_string()
    };

    let style = match (tab == active, badged) {
        (true, _) => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        (false, true) => Style::default().fg(Color::Red),
        (false, false) => Style::default(),
    };
    Span::styled(title, style)
}

/// Tab bar; the Console badge counts warnings not yet seen.
fn draw_tabs(frame: &mut Frame, active: Tab, unread: usize, area: Rect) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| Line::from(tab_label(*tab, active, unread)))
        .collect();
    let selected = Tab::ALL.iter().position(|t| *t == active).unwrap_or(0);

    let bar = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    " showcase ",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .select(selected)
        .divider(Span::raw(" │ "));

    frame.render_widget(bar, area);
}

/// Draw the quote of the day.
fn draw_quote_tab(frame: &mut Frame, state: &ViewState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Quote of the Day ");

    let text = match &state.quote {
        Some(quote) => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("“{}”", quote.text),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("— {}", quote.author),
                Style::default().fg(Color::Cyan),
            )),
        ],
        None => vec![Line::from(Span::styled(
            "⏳ Fetching today's quote...",
            Style::default().fg(Color::Yellow),
        ))],
    };

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}

/// Draw the Console tab with fallbacks and background refresh notes.
fn draw_console_tab(frame: &mut Frame, state: &ViewState, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Console ");

    if state.console.is_empty() {
        let text = Paragraph::new("No messages")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(text, area);
        return;
    }

    // Newest first
    let items: Vec<ListItem> = state
        .console
        .iter()
        .rev()
        .map(|msg| {
            let (icon, color) = match msg.level {
                ConsoleLevel::Error => ("❌", Color::Red),
                ConsoleLevel::Warn => ("⚠️", Color::Yellow),
                ConsoleLevel::Info => ("ℹ️", Color::Cyan),
            };

            let time = list::format_relative_time(&msg.timestamp);

            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", icon)),
                Span::styled(time, Style::default().fg(Color::DarkGray)),
                Span::raw(" "),
                Span::styled(msg.message.clone(), Style::default().fg(color)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Draw the status bar with keybinding hints and last refresh time.
fn draw_status_bar(frame: &mut Frame, state: &ViewState, area: Rect) {
    let mut hints = vec![
        Span::raw(" ↑↓ "),
        Span::styled("Select", Style::default().fg(Color::DarkGray)),
        Span::raw("  Tab "),
        Span::styled("Switch", Style::default().fg(Color::DarkGray)),
        Span::raw("  q "),
        Span::styled("Quit", Style::default().fg(Color::DarkGray)),
    ];

    if let Some(at) = &state.last_render {
        hints.push(Span::styled(
            format!("  Updated {}", list::format_relative_time(at)),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::Quote;
    use crate::state::{Renderer, SharedView};
    use ratatui::backend::TestBackend;

    fn rendered_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_tab_labels() {
        assert_eq!(tab_label(Tab::Console, Tab::Projects, 2).content, "Console (2)");
        assert_eq!(
            tab_label(Tab::Console, Tab::Projects, 2).style.fg,
            Some(Color::Red)
        );
        assert_eq!(tab_label(Tab::Console, Tab::Console, 0).content, "Console");
        assert_eq!(
            tab_label(Tab::Quote, Tab::Quote, 5).style.fg,
            Some(Color::Yellow)
        );
    }

    #[test]
    fn test_draws_fallback_message() {
        let view = SharedView::default();
        view.render_fallback("Unable to load projects from GitHub.");
        let mut app = App::new(view.clone());
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();

        let state = view.snapshot();
        terminal.draw(|f| draw(f, &mut app, &state)).unwrap();

        let text = rendered_text(&terminal);
        assert!(text.contains("Unable to load projects from GitHub."));
        assert!(text.contains("Console (1)"));
    }

    #[test]
    fn test_draws_quote_tab() {
        let view = SharedView::default();
        crate::quotes::QuoteRenderer::render_quote(
            &view,
            &Quote {
                text: "Stay hungry".to_string(),
                author: "Steve Jobs".to_string(),
            },
        );
        let mut app = App::new(view.clone());
        app.active_tab = Tab::Quote;
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();

        let state = view.snapshot();
        terminal.draw(|f| draw(f, &mut app, &state)).unwrap();

        let text = rendered_text(&terminal);
        assert!(text.contains("Stay hungry"));
        assert!(text.contains("Steve Jobs"));
    }
}
