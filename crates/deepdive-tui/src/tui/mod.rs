// TUI shell: view state, layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState`. Keyboard input mutates it directly or yields a
// `UserCommand`; searches run as spawned fetch tasks that push `UiUpdate`
// messages back over an mpsc channel. The loop applies them and re-renders
// on a fixed tick.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{Event, EventStream};
use deepdive_core::categories::Category;
use deepdive_core::summary::DeepDive;
use deepdive_core::table::{DisplayTable, SortState};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::info;

use crate::client::{self, SummarySource};
use crate::config::Config;
use crate::protocol::{UiUpdate, UserCommand};
use crate::search::SearchForm;

use layout::build_layout;

// ---------------------------------------------------------------------------
// Focus and screen
// ---------------------------------------------------------------------------

/// Which part of the screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Seasons,
    QuickPicks,
    Tables,
}

/// What the body area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Nothing searched yet.
    Empty,
    Loading,
    /// A payload arrived but no category has a single metric.
    NoResults,
    Tables,
}

/// The summary currently on screen.
#[derive(Debug, Clone)]
pub struct LoadedView {
    pub player: String,
    pub seasons: Vec<u16>,
    pub received_at: DateTime<Local>,
    pub dive: DeepDive,
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

pub struct ViewState {
    pub form: SearchForm,
    pub focus: Focus,
    /// Index into `form.available()`.
    pub season_cursor: usize,
    pub quick_picks: Vec<String>,
    pub quick_pick_cursor: usize,
    /// Validation or fetch error shown under the season chips.
    pub error: Option<String>,
    pub result: Option<LoadedView>,
    pub sorts: HashMap<Category, SortState>,
    /// Index into `visible_tables()`.
    pub table_cursor: usize,
    /// Column index within the focused table.
    pub column_cursor: usize,
    in_flight: usize,
    next_generation: u64,
}

impl ViewState {
    pub fn new(config: &Config) -> Self {
        let form = SearchForm::from_config(&config.seasons);
        let season_cursor = form
            .available()
            .iter()
            .position(|&y| y == form.default_season())
            .unwrap_or(0);
        ViewState {
            form,
            focus: Focus::Search,
            season_cursor,
            quick_picks: config.ui.quick_picks.clone(),
            quick_pick_cursor: 0,
            error: None,
            result: None,
            sorts: HashMap::new(),
            table_cursor: 0,
            column_cursor: 0,
            in_flight: 0,
            next_generation: 1,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn screen(&self) -> Screen {
        if self.is_loading() {
            return Screen::Loading;
        }
        match &self.result {
            None => Screen::Empty,
            Some(view) if view.dive.has_any_data() => Screen::Tables,
            Some(_) => Screen::NoResults,
        }
    }

    /// Start a search for `name`, or for the typed name when `None`.
    ///
    /// Returns the command to dispatch, or `None` when a search is already
    /// running or the name is blank (which sets the validation error).
    pub fn begin_search(&mut self, name: Option<&str>) -> Option<UserCommand> {
        if self.is_loading() {
            return None;
        }
        self.error = None;
        if let Some(name) = name {
            self.form.name = name.to_string();
        }
        match self.form.submit() {
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
            Ok(query) => {
                let generation = self.next_generation;
                self.next_generation += 1;
                self.in_flight += 1;
                self.result = None;
                self.sorts.clear();
                self.table_cursor = 0;
                self.column_cursor = 0;
                self.settle_focus();
                Some(UserCommand::Search { query, generation })
            }
        }
    }

    pub fn sort_for(&self, category: Category) -> SortState {
        self.sorts.get(&category).cloned().unwrap_or_default()
    }

    /// Visible tables of the current result, in category order.
    pub fn visible_tables(&self) -> Vec<(Category, DisplayTable)> {
        let Some(view) = &self.result else {
            return Vec::new();
        };
        Category::ALL
            .into_iter()
            .filter_map(|c| {
                view.dive
                    .display_table(c, &self.sort_for(c))
                    .map(|t| (c, t))
            })
            .collect()
    }

    /// Focus targets reachable with Tab in the current screen.
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::Search, Focus::Seasons];
        match self.screen() {
            Screen::Empty if !self.quick_picks.is_empty() => order.push(Focus::QuickPicks),
            Screen::Tables => order.push(Focus::Tables),
            _ => {}
        }
        order
    }

    pub fn cycle_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        let idx = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (idx + 1) % order.len()
        } else {
            (idx + order.len() - 1) % order.len()
        };
        self.focus = order[next];
    }

    /// Drop focus from a target that is no longer on screen.
    fn settle_focus(&mut self) {
        if !self.focus_order().contains(&self.focus) {
            self.focus = Focus::Search;
        }
    }

    pub fn move_season_cursor(&mut self, delta: isize) {
        self.season_cursor = step(self.season_cursor, delta, self.form.available().len());
    }

    pub fn toggle_season_at_cursor(&mut self) {
        if self.is_loading() {
            return;
        }
        if let Some(&season) = self.form.available().get(self.season_cursor) {
            self.form.toggle(season);
        }
    }

    pub fn select_all_seasons(&mut self) {
        if !self.is_loading() {
            self.form.select_all();
        }
    }

    pub fn clear_seasons(&mut self) {
        if !self.is_loading() {
            self.form.clear();
        }
    }

    pub fn move_quick_pick_cursor(&mut self, delta: isize) {
        self.quick_pick_cursor = step(self.quick_pick_cursor, delta, self.quick_picks.len());
    }

    /// Search the quick pick under the cursor.
    pub fn search_quick_pick(&mut self) -> Option<UserCommand> {
        let name = self.quick_picks.get(self.quick_pick_cursor)?.clone();
        self.begin_search(Some(&name))
    }

    /// Move focus between tables, wrapping around.
    pub fn cycle_table(&mut self, delta: isize) {
        let count = self.visible_tables().len();
        if count == 0 {
            return;
        }
        let next = (self.table_cursor as isize + delta).rem_euclid(count as isize);
        self.table_cursor = next as usize;
        self.clamp_column_cursor();
    }

    pub fn move_column_cursor(&mut self, delta: isize) {
        let columns = self.focused_column_count();
        self.column_cursor = step(self.column_cursor, delta, columns);
    }

    /// Sort the focused table by the column under the cursor.
    pub fn toggle_sort_at_cursor(&mut self) {
        let tables = self.visible_tables();
        let Some((category, table)) = tables.get(self.table_cursor) else {
            return;
        };
        let Some(column) = table.columns.get(self.column_cursor) else {
            return;
        };
        self.sorts.entry(*category).or_default().toggle(&column.key);
    }

    fn focused_column_count(&self) -> usize {
        self.visible_tables()
            .get(self.table_cursor)
            .map(|(_, t)| t.columns.len())
            .unwrap_or(0)
    }

    fn clamp_column_cursor(&mut self) {
        let columns = self.focused_column_count();
        self.column_cursor = self.column_cursor.min(columns.saturating_sub(1));
    }
}

/// Move `cursor` by `delta` within `0..len`, clamping at both ends.
fn step(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let moved = cursor as isize + delta;
    moved.clamp(0, len as isize - 1) as usize
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a fetch outcome. Outcomes are never discarded: whichever resolves
/// last owns the result slot.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    state.in_flight = state.in_flight.saturating_sub(1);
    match update {
        UiUpdate::SummaryLoaded(loaded) => {
            let dive = DeepDive::from_summary(&loaded.payload);
            info!(
                player = %loaded.player,
                generation = loaded.generation,
                seasons = dive.season_count(),
                has_data = dive.has_any_data(),
                "summary loaded"
            );
            state.result = Some(LoadedView {
                player: loaded.player,
                seasons: loaded.seasons,
                received_at: loaded.received_at,
                dive,
            });
            state.table_cursor = 0;
            state.clamp_column_cursor();
        }
        UiUpdate::FetchFailed {
            player,
            message,
            generation,
        } => {
            info!(%player, generation, "showing fetch error");
            state.error = Some(message);
        }
    }
    state.settle_focus();
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::search_bar::render(frame, layout.search_bar, state);
    widgets::season_chips::render(frame, layout.season_chips, state);
    widgets::message_line::render(frame, layout.message_line, state);

    match state.screen() {
        Screen::Empty => widgets::placeholder::render_empty(frame, layout.body, state),
        Screen::Loading => widgets::placeholder::render_loading(frame, layout.body),
        Screen::NoResults => widgets::placeholder::render_no_results(frame, layout.body),
        Screen::Tables => {
            let tables = state.visible_tables();
            let cells = layout::table_grid(layout.body, tables.len());
            for (idx, ((_, table), area)) in tables.iter().zip(cells).enumerate() {
                let focused = state.focus == Focus::Tables && idx == state.table_cursor;
                let cursor = focused.then_some(state.column_cursor);
                widgets::stat_table::render(frame, area, table, focused, cursor);
            }
        }
    }

    widgets::help_bar::render(frame, layout.help_bar, state);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook that restores the terminal.
/// 3. Runs an async select loop: fetch results, keyboard input, render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(config: &Config, source: Arc<dyn SummarySource>) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::new(config);
    let (ui_tx, mut ui_rx) = mpsc::channel::<UiUpdate>(32);
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(config.ui.tick_ms));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            // Fetch results. The loop holds a sender, so this never closes.
            Some(update) = ui_rx.recv() => {
                apply_ui_update(&mut view_state, update);
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        match input::handle_key(key_event, &mut view_state) {
                            Some(UserCommand::Quit) => break,
                            Some(UserCommand::Search { query, generation }) => {
                                tokio::spawn(client::fetch_and_report(
                                    Arc::clone(&source),
                                    query,
                                    generation,
                                    ui_tx.clone(),
                                ));
                            }
                            None => {}
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, SeasonsConfig, UiConfig};
    use crate::protocol::LoadedSummary;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;
    use serde_json::{json, Value};

    pub(crate) fn test_config() -> Config {
        Config {
            api: ApiConfig {
                base_url: "http://stats.local".into(),
            },
            seasons: SeasonsConfig {
                available: (2017..=2025).collect(),
                default: 2025,
            },
            ui: UiConfig::default(),
        }
    }

    fn loaded(payload: Value, generation: u64) -> UiUpdate {
        UiUpdate::SummaryLoaded(Box::new(LoadedSummary {
            player: "Gerrit Cole".into(),
            seasons: vec![2024],
            payload,
            received_at: Local::now(),
            generation,
        }))
    }

    fn two_seasons() -> Value {
        json!({
            "fangraphs": [
                { "season": "2023", "data": { "IP": 209.0, "ERA": 2.63, "FIP": 3.16, "K%": 0.27, "BB%": 0.06 } },
                { "season": "2024", "data": { "IP": 95.0, "ERA": 3.41, "FIP": 3.56, "K%": 0.25, "BB%": 0.08 } }
            ]
        })
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn render_to_text(state: &ViewState) -> String {
        let backend = TestBackend::new(140, 48);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render_frame(frame, state)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    // -- initial state --

    #[test]
    fn new_state_is_empty() {
        let state = ViewState::new(&test_config());
        assert_eq!(state.screen(), Screen::Empty);
        assert_eq!(state.focus, Focus::Search);
        assert_eq!(state.form.selected(), vec![2025]);
        assert_eq!(state.season_cursor, 8);
        assert!(state.error.is_none());
        assert!(!state.is_loading());
        assert!(state.visible_tables().is_empty());
    }

    // -- begin_search --

    #[test]
    fn blank_name_sets_validation_error() {
        let mut state = ViewState::new(&test_config());
        state.form.name = "   ".into();
        assert!(state.begin_search(None).is_none());
        assert_eq!(state.error.as_deref(), Some("Enter a player name"));
        assert!(!state.is_loading());
    }

    #[test]
    fn search_enters_loading_and_numbers_generations() {
        let mut state = ViewState::new(&test_config());
        state.error = Some("old".into());
        let cmd = state.begin_search(Some("gerrit cole")).unwrap();
        match cmd {
            UserCommand::Search { query, generation } => {
                assert_eq!(generation, 1);
                assert_eq!(query.name.first, "Gerrit");
                assert_eq!(query.seasons, vec![2025]);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(state.error.is_none());
        assert_eq!(state.screen(), Screen::Loading);

        // Disabled while loading.
        assert!(state.begin_search(Some("corbin burnes")).is_none());
        state.toggle_season_at_cursor();
        assert_eq!(state.form.selected(), vec![2025]);
    }

    #[test]
    fn quick_pick_sets_name_and_searches() {
        let mut state = ViewState::new(&test_config());
        state.move_quick_pick_cursor(1);
        let cmd = state.search_quick_pick().unwrap();
        assert_eq!(state.form.name, "Corbin Burnes");
        assert!(matches!(cmd, UserCommand::Search { .. }));
    }

    // -- apply_ui_update --

    #[test]
    fn loaded_summary_shows_tables() {
        let mut state = ViewState::new(&test_config());
        state.begin_search(Some("Gerrit Cole"));
        apply_ui_update(&mut state, loaded(two_seasons(), 1));

        assert_eq!(state.screen(), Screen::Tables);
        let titles: Vec<String> = state
            .visible_tables()
            .into_iter()
            .map(|(_, t)| t.title)
            .collect();
        assert_eq!(titles, vec!["Production", "Strike Throwing", "Run Prevention"]);
    }

    #[test]
    fn season_only_payload_shows_no_results() {
        let mut state = ViewState::new(&test_config());
        state.begin_search(Some("Gerrit Cole"));
        let payload = json!({ "fangraphs": [{ "season": "2025", "data": { "Season": "2025" } }] });
        apply_ui_update(&mut state, loaded(payload, 1));
        assert_eq!(state.screen(), Screen::NoResults);
    }

    #[test]
    fn failure_sets_error_and_clears_loading() {
        let mut state = ViewState::new(&test_config());
        state.begin_search(Some("Gerrit Cole"));
        apply_ui_update(
            &mut state,
            UiUpdate::FetchFailed {
                player: "Gerrit Cole".into(),
                message: "connection refused".into(),
                generation: 1,
            },
        );
        assert!(!state.is_loading());
        assert_eq!(state.error.as_deref(), Some("connection refused"));
        assert_eq!(state.screen(), Screen::Empty);
    }

    #[test]
    fn last_resolved_response_wins() {
        let mut state = ViewState::new(&test_config());
        state.begin_search(Some("Gerrit Cole"));
        apply_ui_update(&mut state, loaded(two_seasons(), 2));
        apply_ui_update(&mut state, loaded(json!({}), 1));
        assert_eq!(state.screen(), Screen::NoResults);
    }

    // -- focus and sorting --

    #[test]
    fn focus_cycle_depends_on_screen() {
        let mut state = ViewState::new(&test_config());
        assert_eq!(
            state.focus_order(),
            vec![Focus::Search, Focus::Seasons, Focus::QuickPicks]
        );
        state.cycle_focus(false);
        assert_eq!(state.focus, Focus::QuickPicks);

        state.begin_search(Some("Gerrit Cole"));
        apply_ui_update(&mut state, loaded(two_seasons(), 1));
        // QuickPicks vanished with the empty screen.
        assert_eq!(state.focus, Focus::Search);
        state.cycle_focus(true);
        state.cycle_focus(true);
        assert_eq!(state.focus, Focus::Tables);
        state.cycle_focus(true);
        assert_eq!(state.focus, Focus::Search);
    }

    #[test]
    fn sort_toggles_on_focused_column() {
        let mut state = ViewState::new(&test_config());
        state.begin_search(Some("Gerrit Cole"));
        apply_ui_update(&mut state, loaded(two_seasons(), 1));
        state.focus = Focus::Tables;

        // Production columns: season, IP, ERA
        state.move_column_cursor(2);
        state.toggle_sort_at_cursor();
        let tables = state.visible_tables();
        let production = &tables[0].1;
        assert_eq!(production.column("season").unwrap(), vec!["2024", "2023"]);
        assert!(production.header_labels().contains(&"ERA ▼".to_string()));

        state.toggle_sort_at_cursor();
        let tables = state.visible_tables();
        assert_eq!(tables[0].1.column("season").unwrap(), vec!["2023", "2024"]);

        // Other tables keep their own sort.
        assert!(tables[1].1.sort.key().is_none());
    }

    #[test]
    fn table_cursor_wraps_and_clamps_columns() {
        let mut state = ViewState::new(&test_config());
        state.begin_search(Some("Gerrit Cole"));
        apply_ui_update(&mut state, loaded(two_seasons(), 1));

        state.cycle_table(-1);
        assert_eq!(state.table_cursor, 2);
        state.cycle_table(1);
        assert_eq!(state.table_cursor, 0);

        state.cycle_table(1);
        // Strike Throwing: season, Kp, BBp, KMinusBB
        state.move_column_cursor(10);
        assert_eq!(state.column_cursor, 3);
        state.cycle_table(1);
        // Run Prevention: season, ERA, FIP
        assert_eq!(state.column_cursor, 2);
    }

    #[test]
    fn new_search_resets_sorts() {
        let mut state = ViewState::new(&test_config());
        state.begin_search(Some("Gerrit Cole"));
        apply_ui_update(&mut state, loaded(two_seasons(), 1));
        state.move_column_cursor(1);
        state.toggle_sort_at_cursor();
        assert!(!state.sorts.is_empty());

        state.begin_search(None);
        assert!(state.sorts.is_empty());
        assert_eq!(state.column_cursor, 0);
    }

    // -- rendering --

    #[test]
    fn renders_empty_state_with_quick_picks() {
        let state = ViewState::new(&test_config());
        let text = render_to_text(&state);
        assert!(text.contains("Search a player to get started"));
        assert!(text.contains("Tarik Skubal"));
        assert!(text.contains("1 seasons"));
    }

    #[test]
    fn renders_tables_and_footer() {
        let mut state = ViewState::new(&test_config());
        state.begin_search(Some("Gerrit Cole"));
        apply_ui_update(&mut state, loaded(two_seasons(), 1));
        let text = render_to_text(&state);
        assert!(text.contains("Production"));
        assert!(text.contains("Strike Throwing"));
        assert!(text.contains("Totals"));
        assert!(text.contains("304.0"));
        assert!(text.contains("Gerrit Cole"));
    }

    #[test]
    fn renders_loading_and_no_results() {
        let mut state = ViewState::new(&test_config());
        state.begin_search(Some("Gerrit Cole"));
        assert!(render_to_text(&state).contains("Loading"));

        apply_ui_update(&mut state, loaded(json!({ "fangraphs": [] }), 1));
        assert!(render_to_text(&state).contains("No stats for these seasons"));
    }
}
