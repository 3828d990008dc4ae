// Season summary payload decoding and the six-category deep dive.
//
// The upstream payload has no enforced schema. Anything that is not an
// object with a `fangraphs` array decodes to zero season entries, which the
// shell reports as "no results" rather than an error.

use serde_json::Value;
use tracing::debug;

use crate::categories::Category;
use crate::fields::RawSeasonRecord;
use crate::projection::{
    self, ContactQualityRow, MetricRow, PitchMixRow, ProductionRow, RunPreventionRow,
    StrikeThrowingRow, ValueRow,
};
use crate::table::{shape_table, DisplayTable, SortState};

/// Field of the summary payload holding per-season provider rows.
pub const SEASON_ROWS_FIELD: &str = "fangraphs";

/// One season as supplied by the provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeasonEntry {
    pub season: String,
    pub data: RawSeasonRecord,
}

impl SeasonEntry {
    /// Decode one element of the `fangraphs` array.
    ///
    /// The season label comes from the entry's `season`, then from the
    /// record's own `Season` field, then defaults to empty.
    pub fn from_json(value: &Value) -> Self {
        let data_value = value.get("data").unwrap_or(&Value::Null);
        let season = value
            .get("season")
            .and_then(season_label)
            .or_else(|| data_value.get("Season").and_then(season_label))
            .unwrap_or_default();

        SeasonEntry {
            season,
            data: RawSeasonRecord::from_json(data_value),
        }
    }
}

fn season_label(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Decode every season entry of a summary payload, keeping payload order.
pub fn season_entries(payload: &Value) -> Vec<SeasonEntry> {
    match payload.get(SEASON_ROWS_FIELD) {
        Some(Value::Array(rows)) => rows.iter().map(SeasonEntry::from_json).collect(),
        _ => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// DeepDive
// ---------------------------------------------------------------------------

/// All six category projections of one summary payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeepDive {
    pub production: Vec<ProductionRow>,
    pub strike_throwing: Vec<StrikeThrowingRow>,
    pub run_prevention: Vec<RunPreventionRow>,
    pub contact_quality: Vec<ContactQualityRow>,
    pub pitch_mix: Vec<PitchMixRow>,
    pub value: Vec<ValueRow>,
}

impl DeepDive {
    pub fn from_entries(entries: &[SeasonEntry]) -> Self {
        DeepDive {
            production: projection::project_all(entries, projection::production),
            strike_throwing: projection::project_all(entries, projection::strike_throwing),
            run_prevention: projection::project_all(entries, projection::run_prevention),
            contact_quality: projection::project_all(entries, projection::contact_quality),
            pitch_mix: projection::project_all(entries, projection::pitch_mix),
            value: projection::project_all(entries, projection::value),
        }
    }

    pub fn from_summary(payload: &Value) -> Self {
        let entries = season_entries(payload);
        debug!(seasons = entries.len(), "projecting season summary");
        Self::from_entries(&entries)
    }

    /// Number of season rows (identical across categories).
    pub fn season_count(&self) -> usize {
        self.production.len()
    }

    /// Whether any category has at least one resolved metric. When false the
    /// shell shows its "no stats for these seasons" state.
    pub fn has_any_data(&self) -> bool {
        fn any<R: MetricRow>(rows: &[R]) -> bool {
            rows.iter().any(|r| r.has_any_metric())
        }
        any(&self.production)
            || any(&self.strike_throwing)
            || any(&self.run_prevention)
            || any(&self.contact_quality)
            || any(&self.pitch_mix)
            || any(&self.value)
    }

    /// Shape and render one category's table, or `None` when it is hidden.
    pub fn display_table(&self, category: Category, sort: &SortState) -> Option<DisplayTable> {
        let columns = category.columns();
        let options = category.options();
        let title = category.title();

        macro_rules! shape {
            ($rows:expr) => {
                shape_table($rows, &columns, &options, sort).map(|view| view.display(title))
            };
        }

        match category {
            Category::Production => shape!(&self.production),
            Category::StrikeThrowing => shape!(&self.strike_throwing),
            Category::RunPrevention => shape!(&self.run_prevention),
            Category::ContactQuality => shape!(&self.contact_quality),
            Category::PitchMix => shape!(&self.pitch_mix),
            Category::Value => shape!(&self.value),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
