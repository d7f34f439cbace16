// Project card list rendering.
// Styled card views with loading, fallback, and empty states.

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::state::{Card, LoadingState};

/// Format a timestamp as relative time (e.g., "2h ago").
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(*dt);

    if duration.num_days() > 0 {
        format!("{}d ago", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m ago", duration.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(text, area);
}

/// Render a fallback message in place of the cards.
pub fn render_fallback(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Red));
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(text, area);
}

/// Lines making up one card.
fn card_lines(card: &Card) -> Vec<Line<'_>> {
    let mut meta = vec![
        Span::styled(format!("★ {}", card.stars), Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(format!("⑂ {}", card.forks), Style::default().fg(Color::Cyan)),
    ];
    if let Some(updated) = &card.updated {
        meta.push(Span::raw("  "));
        meta.push(Span::styled(
            format!("Updated: {}", updated),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let tags: Vec<Span> = card
        .tags
        .iter()
        .flat_map(|tag| {
            [
                Span::styled(format!("[{}]", tag), Style::default().fg(Color::Magenta)),
                Span::raw(" "),
            ]
        })
        .collect();

    vec![
        Line::from(Span::styled(
            card.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::raw(card.description.as_str())),
        Line::from(tags),
        Line::from(meta),
        Line::from(Span::styled(
            card.url.as_str(),
            Style::default().fg(Color::Blue),
        )),
        Line::from(""),
    ]
}

/// Render the project cards.
pub fn render_cards(
    frame: &mut Frame,
    projects: &LoadingState<Vec<Card>>,
    list_state: &mut ListState,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Recent Projects ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match projects {
        LoadingState::Idle => render_empty(frame, inner, "Starting up"),
        LoadingState::Loading => render_loading(frame, inner, "Loading recent projects"),
        LoadingState::Error(message) => render_fallback(frame, inner, message),
        LoadingState::Loaded(cards) => {
            if cards.is_empty() {
                render_empty(frame, inner, "No projects to show");
            } else {
                let items: Vec<ListItem> = cards
                    .iter()
                    .map(|card| ListItem::new(card_lines(card)))
                    .collect();

                let list_widget = List::new(items)
                    .highlight_style(Style::default().bg(Color::DarkGray))
                    .highlight_symbol("> ");

                frame.render_stateful_widget(list_widget, inner, list_state);
            }
        }
    }
}
