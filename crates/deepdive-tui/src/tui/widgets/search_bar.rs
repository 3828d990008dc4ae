// Search bar widget: player name input with the season selection hint.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::{Focus, ViewState};

const PLACEHOLDER: &str = "First Last";

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(14),
            Constraint::Length(24),
        ])
        .split(area);

    let focused = state.focus == Focus::Search;
    let border = if focused && !state.is_loading() {
        Style::default().fg(Color::Rgb(255, 140, 0))
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let input = if state.form.name.is_empty() {
        Line::from(Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)))
    } else {
        let mut spans = vec![Span::raw(state.form.name.clone())];
        if focused {
            spans.push(Span::styled("▏", Style::default().fg(Color::Rgb(255, 140, 0))));
        }
        Line::from(spans)
    };
    let paragraph = Paragraph::new(input).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title("Player"),
    );
    frame.render_widget(paragraph, columns[0]);

    let button = Paragraph::new(Line::from(Span::styled(
        button_label(state),
        button_style(state),
    )))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, columns[1]);

    let hint = Paragraph::new(Line::from(Span::styled(
        state.form.selection_hint(),
        Style::default().fg(Color::Gray),
    )))
    .block(Block::default().borders(Borders::NONE).title(" "));
    frame.render_widget(hint, columns[2]);
}

/// "Search", or "Loading…" while a fetch is in flight.
pub fn button_label(state: &ViewState) -> &'static str {
    if state.is_loading() {
        " Loading…"
    } else {
        " Search"
    }
}

/// Dimmed when a submit would be ignored.
fn button_style(state: &ViewState) -> Style {
    if state.is_loading() || state.form.name.trim().is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Rgb(255, 140, 0))
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::test_config;

    #[test]
    fn button_reflects_loading() {
        let mut state = ViewState::new(&test_config());
        assert_eq!(button_label(&state), " Search");
        assert_eq!(button_style(&state).fg, Some(Color::DarkGray));

        state.form.name = "Gerrit Cole".into();
        assert_eq!(button_style(&state).fg, Some(Color::Black));

        state.begin_search(None);
        assert_eq!(button_label(&state), " Loading…");
        assert_eq!(button_style(&state).fg, Some(Color::DarkGray));
    }

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(80, 3);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::new(&test_config());
        state.form.name = "Tarik Skubal".into();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
