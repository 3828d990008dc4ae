// Library root: re-exports all modules so integration tests can drive the
// search flow without a terminal.

pub mod client;
pub mod config;
pub mod protocol;
pub mod search;
pub mod tui;
