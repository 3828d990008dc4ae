// Body placeholders: the empty, loading and no-results screens.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::{Focus, ViewState};

pub fn render_empty(frame: &mut Frame, area: Rect, state: &ViewState) {
    render_lines(frame, area, build_empty_lines(state));
}

pub fn render_loading(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Loading player data…",
            Style::default().fg(Color::Yellow),
        )),
    ];
    render_lines(frame, area, lines);
}

pub fn render_no_results(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No stats for these seasons",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Try different seasons or another player.",
            Style::default().fg(Color::Gray),
        )),
    ];
    render_lines(frame, area, lines);
}

fn render_lines(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

pub fn build_empty_lines(state: &ViewState) -> Vec<Line<'static>> {
    let hint = if state.form.selected().is_empty() {
        "Type the full name, pick seasons, then press Search."
    } else {
        "Type the full name and press Search."
    };
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Search a player to get started",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(hint, Style::default().fg(Color::Gray))),
    ];

    if !state.quick_picks.is_empty() {
        let focused = state.focus == Focus::QuickPicks;
        let mut spans = vec![Span::styled("Try: ", Style::default().fg(Color::DarkGray))];
        for (idx, name) in state.quick_picks.iter().enumerate() {
            let style = if focused && idx == state.quick_pick_cursor {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Rgb(255, 140, 0))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan)
            };
            if idx > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(format!(" {name} "), style));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(spans));
    }
    lines
}
