// Statistics normalization and table shaping for pitcher season summaries.

pub mod categories;
pub mod fields;
pub mod format;
pub mod projection;
pub mod summary;
pub mod table;
