// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into local ViewState mutations (typing,
// season toggles, focus and sort changes) or into UserCommand messages for
// the TUI loop (searches, quit).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{Focus, ViewState};
use crate::protocol::UserCommand;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the TUI loop has to act (spawn a fetch or
/// quit), `None` when the key was handled locally.
pub fn handle_key(key_event: KeyEvent, state: &mut ViewState) -> Option<UserCommand> {
    // crossterm reports Release events on some platforms.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    match key_event.code {
        KeyCode::Tab => {
            state.cycle_focus(true);
            return None;
        }
        KeyCode::BackTab => {
            state.cycle_focus(false);
            return None;
        }
        _ => {}
    }

    match state.focus {
        Focus::Search => handle_search(key_event, state),
        Focus::Seasons => handle_seasons(key_event, state),
        Focus::QuickPicks => handle_quick_picks(key_event, state),
        Focus::Tables => handle_tables(key_event, state),
    }
}

/// Name input: printable keys edit the name; nothing else quits.
fn handle_search(key_event: KeyEvent, state: &mut ViewState) -> Option<UserCommand> {
    if state.is_loading() {
        return None;
    }
    match key_event.code {
        KeyCode::Enter => state.begin_search(None),
        KeyCode::Backspace => {
            state.form.name.pop();
            None
        }
        KeyCode::Esc => {
            state.form.name.clear();
            None
        }
        KeyCode::Char(c) => {
            state.form.name.push(c);
            None
        }
        _ => None,
    }
}

fn handle_seasons(key_event: KeyEvent, state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Left | KeyCode::Char('h') => state.move_season_cursor(-1),
        KeyCode::Right | KeyCode::Char('l') => state.move_season_cursor(1),
        KeyCode::Char(' ') => state.toggle_season_at_cursor(),
        KeyCode::Char('a') => state.select_all_seasons(),
        KeyCode::Char('c') => state.clear_seasons(),
        KeyCode::Enter => return state.begin_search(None),
        KeyCode::Char('/') => state.focus = Focus::Search,
        KeyCode::Char('q') => return Some(UserCommand::Quit),
        _ => {}
    }
    None
}

fn handle_quick_picks(key_event: KeyEvent, state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Left | KeyCode::Char('h') => state.move_quick_pick_cursor(-1),
        KeyCode::Right | KeyCode::Char('l') => state.move_quick_pick_cursor(1),
        KeyCode::Enter => return state.search_quick_pick(),
        KeyCode::Char('/') => state.focus = Focus::Search,
        KeyCode::Char('q') => return Some(UserCommand::Quit),
        _ => {}
    }
    None
}

fn handle_tables(key_event: KeyEvent, state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => state.cycle_table(-1),
        KeyCode::Down | KeyCode::Char('j') => state.cycle_table(1),
        KeyCode::Left | KeyCode::Char('h') => state.move_column_cursor(-1),
        KeyCode::Right | KeyCode::Char('l') => state.move_column_cursor(1),
        KeyCode::Enter | KeyCode::Char('s') => state.toggle_sort_at_cursor(),
        KeyCode::Char('/') => state.focus = Focus::Search,
        KeyCode::Char('q') => return Some(UserCommand::Quit),
        _ => {}
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
