// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Search Bar (3 rows)                               |
// +--------------------------------------------------+
// | Season Chips (3 rows)                             |
// +--------------------------------------------------+
// | Message Line (1 row)                              |
// +-------------------------+------------------------+
// | Table                   | Table                  |
// | Table                   | Table                  |
// | Table                   | Table                  |
// +-------------------------+------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Tables per grid row.
pub const GRID_COLUMNS: usize = 2;

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub status_bar: Rect,
    /// Player name input and selection hint.
    pub search_bar: Rect,
    pub season_chips: Rect,
    /// Validation and fetch errors.
    pub message_line: Rect,
    /// Empty/loading/no-results placeholder, or the table grid.
    pub body: Rect,
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(3), // search bar
            Constraint::Length(3), // season chips
            Constraint::Length(1), // message line
            Constraint::Min(6),    // body
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        search_bar: vertical[1],
        season_chips: vertical[2],
        message_line: vertical[3],
        body: vertical[4],
        help_bar: vertical[5],
    }
}

/// Split `area` into `count` cells, `GRID_COLUMNS` per row, filled row by
/// row. A last row with a single table spans the full width.
pub fn table_grid(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let rows = count.div_ceil(GRID_COLUMNS);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    let mut cells = Vec::with_capacity(count);
    for (row_idx, row_area) in row_areas.iter().enumerate() {
        let in_row = (count - row_idx * GRID_COLUMNS).min(GRID_COLUMNS);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, in_row as u32); in_row])
            .split(*row_area);
        cells.extend(columns.iter().copied());
    }
    cells
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_area() -> Rect {
        Rect::new(0, 0, 160, 50)
    }

    #[test]
    fn layout_all_rects_nonzero() {
        let layout = build_layout(test_area());
        let rects = [
            ("status_bar", layout.status_bar),
            ("search_bar", layout.search_bar),
            ("season_chips", layout.season_chips),
            ("message_line", layout.message_line),
            ("body", layout.body),
            ("help_bar", layout.help_bar),
        ];
        for (name, rect) in rects {
            assert!(rect.width > 0 && rect.height > 0, "{name} is empty: {rect:?}");
        }
    }

    #[test]
    fn fixed_rows_have_fixed_heights() {
        let layout = build_layout(test_area());
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.search_bar.height, 3);
        assert_eq!(layout.season_chips.height, 3);
        assert_eq!(layout.message_line.height, 1);
        assert_eq!(layout.help_bar.height, 1);
        assert_eq!(layout.body.height, 50 - 9);
        assert_eq!(layout.help_bar.y, 49);
    }

    #[test]
    fn grid_fills_rows_of_two() {
        let area = Rect::new(0, 0, 100, 30);
        let cells = table_grid(area, 6);
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0].y, cells[1].y);
        assert!(cells[2].y > cells[0].y);
        assert_eq!(cells[0].width, 50);
        assert_eq!(cells[1].x, 50);
    }

    #[test]
    fn grid_odd_count_last_spans_width() {
        let area = Rect::new(0, 0, 100, 30);
        let cells = table_grid(area, 3);
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[2].width, 100);
        assert!(table_grid(area, 0).is_empty());
    }
}
