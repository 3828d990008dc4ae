// Messages between the TUI loop and background fetch tasks.

use chrono::{DateTime, Local};
use serde_json::Value;

use crate::search::SummaryQuery;

/// Commands produced by keyboard input for the TUI loop to act on.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Fetch a summary. `generation` numbers submissions in order.
    Search {
        query: SummaryQuery,
        generation: u64,
    },
    Quit,
}

/// Results pushed back to the TUI loop by fetch tasks.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    SummaryLoaded(Box<LoadedSummary>),
    FetchFailed {
        player: String,
        message: String,
        generation: u64,
    },
}

/// A decoded summary response and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedSummary {
    /// Display name of the player that was searched.
    pub player: String,
    pub seasons: Vec<u16>,
    pub payload: Value,
    pub received_at: DateTime<Local>,
    pub generation: u64,
}
