// Season chips widget: one toggle per available season.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::{Focus, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let focused = state.focus == Focus::Seasons;
    let border = if focused {
        Style::default().fg(Color::Rgb(255, 140, 0))
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let paragraph = Paragraph::new(build_chip_line(state)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title("Seasons"),
    );
    frame.render_widget(paragraph, area);
}

/// Chips in ascending season order followed by the bulk-select hints.
pub fn build_chip_line(state: &ViewState) -> Line<'static> {
    let focused = state.focus == Focus::Seasons;
    let loading = state.is_loading();
    let mut spans = Vec::new();

    for (idx, &season) in state.form.available().iter().enumerate() {
        let selected = state.form.is_selected(season);
        let mut style = if selected {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        if loading {
            style = style.add_modifier(Modifier::DIM);
        }
        if focused && idx == state.season_cursor {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        let label = if selected {
            format!(" {season} ")
        } else {
            format!("[{season}]")
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    spans.push(Span::styled(
        " [a] All  [c] Clear",
        Style::default().fg(Color::DarkGray),
    ));
    Line::from(spans)
}
