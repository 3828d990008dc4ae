// Help bar widget: key hints for the focused zone.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{Focus, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = Vec::new();
    for (key, action) in hints(state.focus) {
        spans.push(Span::styled(
            format!(" {key}"),
            Style::default().fg(Color::Rgb(255, 140, 0)),
        ));
        spans.push(Span::styled(
            format!(" {action} "),
            Style::default().fg(Color::Gray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// (key, action) pairs for `focus`.
pub fn hints(focus: Focus) -> Vec<(&'static str, &'static str)> {
    let mut pairs = match focus {
        Focus::Search => vec![("Enter", "Search"), ("Esc", "Clear")],
        Focus::Seasons => vec![
            ("←/→", "Move"),
            ("Space", "Toggle"),
            ("a", "All"),
            ("c", "Clear"),
            ("Enter", "Search"),
        ],
        Focus::QuickPicks => vec![("←/→", "Move"), ("Enter", "Search")],
        Focus::Tables => vec![
            ("↑/↓", "Table"),
            ("←/→", "Column"),
            ("s", "Sort"),
        ],
    };
    pairs.push(("Tab", "Next"));
    if focus == Focus::Search {
        pairs.push(("Ctrl+C", "Quit"));
    } else {
        pairs.push(("q", "Quit"));
    }
    pairs
}
