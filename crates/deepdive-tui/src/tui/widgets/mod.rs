// TUI widget modules for each screen zone.

pub mod help_bar;
pub mod message_line;
pub mod placeholder;
pub mod search_bar;
pub mod season_chips;
pub mod stat_table;
pub mod status_bar;
