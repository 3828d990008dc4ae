// Stat table widget: one category table with header, season rows and the
// totals footer.
//
// Narrow panels show a horizontal window of columns. The season column is
// always pinned; the window slides to keep the column cursor visible.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use deepdive_core::table::DisplayTable;

const COLUMN_GAP: u16 = 1;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    table: &DisplayTable,
    focused: bool,
    cursor: Option<usize>,
) {
    let (title_style, border_style) = if focused {
        (
            Style::default()
                .fg(Color::Rgb(255, 140, 0))
                .add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Rgb(255, 140, 0)),
        )
    } else {
        (
            Style::default().add_modifier(Modifier::BOLD),
            Style::default().fg(Color::DarkGray),
        )
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(format!(" {} ", table.title), title_style));

    let inner_width = area.width.saturating_sub(2);
    let widths = column_widths(table);
    let visible = visible_columns(&widths, inner_width, cursor.unwrap_or(0));

    let labels = table.header_labels();
    let header = Row::new(visible.iter().map(|&idx| {
        let style = if cursor == Some(idx) {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(255, 140, 0))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        Cell::from(labels[idx].clone()).style(style)
    }))
    .style(Style::default().fg(Color::Cyan));

    let mut rows: Vec<Row> = table
        .rows
        .iter()
        .map(|row| Row::new(visible.iter().map(|&idx| Cell::from(row[idx].clone()))))
        .collect();
    rows.push(
        Row::new(
            visible
                .iter()
                .map(|&idx| Cell::from(table.footer.get(idx).cloned().unwrap_or_default())),
        )
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    );

    let constraints: Vec<Constraint> = visible
        .iter()
        .map(|&idx| Constraint::Length(widths[idx]))
        .collect();

    let widget = Table::new(rows, constraints)
        .header(header)
        .column_spacing(COLUMN_GAP)
        .block(block);
    frame.render_widget(widget, area);
}

/// Width of each column: the longest of its header label, cells and footer.
pub fn column_widths(table: &DisplayTable) -> Vec<u16> {
    let labels = table.header_labels();
    (0..table.columns.len())
        .map(|idx| {
            let cells = table
                .rows
                .iter()
                .map(|row| row[idx].chars().count())
                .chain(table.footer.get(idx).map(|f| f.chars().count()));
            let widest = cells
                .chain(std::iter::once(labels[idx].chars().count()))
                .max()
                .unwrap_or(0);
            widest as u16
        })
        .collect()
}

/// Column indices that fit in `available` cells.
///
/// Column 0 is always included. The remaining columns form a contiguous run
/// that contains `cursor` (when it is past column 0), extended to the right
/// first and then to the left.
pub fn visible_columns(widths: &[u16], available: u16, cursor: usize) -> Vec<usize> {
    if widths.is_empty() {
        return Vec::new();
    }
    let cost = |idx: usize| widths[idx] + COLUMN_GAP;
    let mut used = cost(0);
    let anchor = cursor.clamp(1, widths.len().max(2) - 1);
    if anchor >= widths.len() {
        return vec![0];
    }

    let mut start = anchor;
    let mut end = anchor;
    used += cost(anchor);
    while end + 1 < widths.len() && used + cost(end + 1) <= available + COLUMN_GAP {
        end += 1;
        used += cost(end);
    }
    while start > 1 && used + cost(start - 1) <= available + COLUMN_GAP {
        start -= 1;
        used += cost(start);
    }

    std::iter::once(0).chain(start..=end).collect()
}
