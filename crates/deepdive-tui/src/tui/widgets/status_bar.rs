// Status bar widget: app title, loaded player, and fetch state.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{LoadedView, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![Span::styled(
        " Pitcher Deep Dive ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Rgb(255, 140, 0))
            .add_modifier(Modifier::BOLD),
    )];

    if state.is_loading() {
        spans.push(Span::styled(
            " Loading player data…",
            Style::default().fg(Color::Yellow),
        ));
    } else if let Some(view) = &state.result {
        spans.push(Span::styled(
            format!(" {}", loaded_summary(view)),
            Style::default().fg(Color::White),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// `Gerrit Cole | 2023, 2024 | 3 season rows | updated 14:02:11`
pub fn loaded_summary(view: &LoadedView) -> String {
    let seasons = view
        .seasons
        .iter()
        .map(|y| y.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} | {} | {} season rows | updated {}",
        view.player,
        seasons,
        view.dive.season_count(),
        view.received_at.format("%H:%M:%S")
    )
}
