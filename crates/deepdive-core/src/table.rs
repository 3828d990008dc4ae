// Table shaping: column/row pruning, visibility, footer aggregates, sort.
//
// A `TableView` is recomputed from scratch every time rows, columns, or sort
// state change. Nothing here mutates its inputs.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use crate::format::{format_cell, percent_scale, CellKind};
use crate::projection::MetricRow;

/// Key of the season label column. It is never pruned and never aggregated.
pub const SEASON_KEY: &str = "season";

/// Label shown in the first footer cell.
pub const FOOTER_LABEL: &str = "Totals";

// ---------------------------------------------------------------------------
// Column schema and options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub key: String,
    pub label: String,
    pub kind: Option<CellKind>,
}

impl ColumnSpec {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        ColumnSpec {
            key: key.into(),
            label: label.into(),
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: CellKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn is_season(&self) -> bool {
        self.key == SEASON_KEY
    }
}

/// Label-to-key redirect used when a footer cell has no aggregate under its
/// own key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterAlias {
    by_label: HashMap<String, String>,
}

impl FooterAlias {
    pub fn new<I, L, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, K)>,
        L: Into<String>,
        K: Into<String>,
    {
        FooterAlias {
            by_label: pairs
                .into_iter()
                .map(|(l, k)| (l.into(), k.into()))
                .collect(),
        }
    }

    pub fn empty() -> Self {
        FooterAlias {
            by_label: HashMap::new(),
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.by_label.get(label).map(String::as_str)
    }
}

impl Default for FooterAlias {
    fn default() -> Self {
        FooterAlias::new([
            ("BB%", "BBp"),
            ("K%", "Kp"),
            ("K-BB%", "KMinusBB"),
            ("CSW%", "CSWp"),
            ("SwStr%", "SwStrPct"),
            ("Zone%", "ZonePct"),
        ])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    /// Columns whose footer shows the sum of present values.
    pub sum_keys: Vec<String>,
    /// Columns whose footer shows the mean of present values.
    pub average_keys: Vec<String>,
    /// Hide sparse columns and empty rows.
    pub auto_prune: bool,
    pub min_non_empty_per_column: usize,
    /// Fewer surviving data columns than this hides the whole table.
    pub min_data_columns: usize,
    pub footer_alias: FooterAlias,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            sum_keys: Vec::new(),
            average_keys: Vec::new(),
            auto_prune: true,
            min_non_empty_per_column: 1,
            min_data_columns: 2,
            footer_alias: FooterAlias::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Sort state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Interactive sort selection for one table. Starts unsorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    key: Option<String>,
    direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        SortState {
            key: None,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortState {
    pub fn by(key: impl Into<String>, direction: SortDirection) -> Self {
        SortState {
            key: Some(key.into()),
            direction,
        }
    }

    /// Select a column: a new column sorts descending, the current column
    /// flips direction.
    pub fn toggle(&mut self, key: &str) {
        if self.key.as_deref() == Some(key) {
            self.direction = self.direction.flipped();
        } else {
            self.key = Some(key.to_string());
            self.direction = SortDirection::Descending;
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Direction if the table is currently sorted by `key`.
    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        (self.key.as_deref() == Some(key)).then_some(self.direction)
    }
}

// ---------------------------------------------------------------------------
// TableView
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum FooterCell {
    Label(String),
    Value(Option<f64>),
}

/// The shaped table: surviving columns, surviving rows in display order,
/// footer cells aligned with `columns`, and the sort it was built with.
#[derive(Debug, Clone)]
pub struct TableView<'r, R> {
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<&'r R>,
    pub footer: Vec<FooterCell>,
    pub sort: SortState,
    pub aggregates: HashMap<String, f64>,
}

/// Shape `rows` against `columns`. Returns `None` when the table should not
/// be shown at all: no rows survive pruning, or fewer than
/// `options.min_data_columns` data columns do.
pub fn shape_table<'r, R: MetricRow>(
    rows: &'r [R],
    columns: &[ColumnSpec],
    options: &TableOptions,
    sort: &SortState,
) -> Option<TableView<'r, R>> {
    let visible_columns = prune_columns(rows, columns, options);
    let data_keys: Vec<&str> = visible_columns
        .iter()
        .filter(|c| !c.is_season())
        .map(|c| c.key.as_str())
        .collect();

    let kept_rows: Vec<&R> = if options.auto_prune {
        rows.iter()
            .filter(|r| data_keys.iter().any(|k| has_value(*r, k)))
            .collect()
    } else {
        rows.iter().collect()
    };

    if kept_rows.is_empty() || data_keys.len() < options.min_data_columns {
        debug!(
            rows = kept_rows.len(),
            data_columns = data_keys.len(),
            "table hidden"
        );
        return None;
    }

    let aggregates = aggregate(&kept_rows, options);
    let footer = build_footer(&visible_columns, &aggregates, &options.footer_alias);
    let sorted_rows = sort_rows(kept_rows, &visible_columns, sort);

    Some(TableView {
        columns: visible_columns,
        rows: sorted_rows,
        footer,
        sort: sort.clone(),
        aggregates,
    })
}

fn has_value<R: MetricRow>(row: &R, key: &str) -> bool {
    row.metric(key).is_some_and(f64::is_finite)
}

fn prune_columns<R: MetricRow>(
    rows: &[R],
    columns: &[ColumnSpec],
    options: &TableOptions,
) -> Vec<ColumnSpec> {
    if !options.auto_prune {
        return columns.to_vec();
    }
    columns
        .iter()
        .filter(|c| {
            c.is_season()
                || rows.iter().filter(|r| has_value(*r, &c.key)).count()
                    >= options.min_non_empty_per_column
        })
        .cloned()
        .collect()
}

fn present_values<R: MetricRow>(rows: &[&R], key: &str) -> Vec<f64> {
    rows.iter()
        .filter_map(|r| r.metric(key))
        .filter(|v| v.is_finite())
        .collect()
}

/// Sums first, then averages; a key listed in both ends up averaged. Keys
/// with no present value get no aggregate.
fn aggregate<R: MetricRow>(rows: &[&R], options: &TableOptions) -> HashMap<String, f64> {
    let mut totals = HashMap::new();
    for key in &options.sum_keys {
        let values = present_values(rows, key);
        if !values.is_empty() {
            totals.insert(key.clone(), values.iter().sum());
        }
    }
    for key in &options.average_keys {
        let values = present_values(rows, key);
        if values.is_empty() {
            totals.remove(key);
        } else {
            totals.insert(key.clone(), values.iter().sum::<f64>() / values.len() as f64);
        }
    }
    totals
}

fn build_footer(
    columns: &[ColumnSpec],
    aggregates: &HashMap<String, f64>,
    alias: &FooterAlias,
) -> Vec<FooterCell> {
    columns
        .iter()
        .enumerate()
        .map(|(idx, c)| {
            if idx == 0 {
                return FooterCell::Label(FOOTER_LABEL.to_string());
            }
            let value = aggregates.get(&c.key).copied().or_else(|| {
                alias
                    .get(&c.label)
                    .and_then(|key| aggregates.get(key).copied())
            });
            FooterCell::Value(value)
        })
        .collect()
}

/// Comparable value for a cell. Percentages are normalized to 0-100 so
/// fractional and whole encodings rank together; absent sinks to -inf.
fn sort_value<R: MetricRow>(row: &R, key: &str, kind: Option<CellKind>) -> f64 {
    let raw = if key == SEASON_KEY {
        row.season().trim().parse::<f64>().ok()
    } else {
        row.metric(key)
    };
    match raw.filter(|v| v.is_finite()) {
        None => f64::NEG_INFINITY,
        Some(v) if kind == Some(CellKind::Percentage) => percent_scale(v),
        Some(v) => v,
    }
}

fn sort_rows<'r, R: MetricRow>(
    mut rows: Vec<&'r R>,
    columns: &[ColumnSpec],
    sort: &SortState,
) -> Vec<&'r R> {
    let Some(key) = sort.key() else {
        return rows;
    };
    let kind = columns.iter().find(|c| c.key == key).and_then(|c| c.kind);
    let direction = sort.direction();

    rows.sort_by(|a, b| {
        let ordering: Ordering = sort_value(*a, key, kind).total_cmp(&sort_value(*b, key, kind));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    rows
}

impl<'r, R: MetricRow> TableView<'r, R> {
    /// Number of non-season columns.
    pub fn data_column_count(&self) -> usize {
        self.columns.iter().filter(|c| !c.is_season()).count()
    }

    /// Display text of one cell. The season column shows the raw label.
    pub fn cell_text(&self, row: &R, column: &ColumnSpec) -> String {
        if column.is_season() {
            row.season().to_string()
        } else {
            format_cell(&column.label, row.metric(&column.key), column.kind)
        }
    }

    pub fn footer_text(&self, idx: usize) -> String {
        match (self.footer.get(idx), self.columns.get(idx)) {
            (Some(FooterCell::Label(label)), _) => label.clone(),
            (Some(FooterCell::Value(value)), Some(column)) => {
                format_cell(&column.label, *value, column.kind)
            }
            _ => String::new(),
        }
    }

    /// Flatten the view into display strings.
    pub fn display(&self, title: &str) -> DisplayTable {
        DisplayTable {
            title: title.to_string(),
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .map(|r| self.columns.iter().map(|c| self.cell_text(r, c)).collect())
                .collect(),
            footer: (0..self.columns.len()).map(|i| self.footer_text(i)).collect(),
            sort: self.sort.clone(),
        }
    }
}

/// A shaped table rendered to strings, detached from the row type.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayTable {
    pub title: String,
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<Vec<String>>,
    pub footer: Vec<String>,
    pub sort: SortState,
}

impl DisplayTable {
    /// Header labels with the sort arrow on the sorted column.
    pub fn header_labels(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| match self.sort.direction_for(&c.key) {
                Some(direction) => format!("{} {}", c.label, direction.arrow()),
                None => c.label.clone(),
            })
            .collect()
    }

    /// Column values of `key` in display order.
    pub fn column(&self, key: &str) -> Option<Vec<&str>> {
        let idx = self.columns.iter().position(|c| c.key == key)?;
        Some(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }

    pub fn footer_for(&self, key: &str) -> Option<&str> {
        let idx = self.columns.iter().position(|c| c.key == key)?;
        self.footer.get(idx).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal row type with free-form metrics.
    #[derive(Debug, Clone)]
    struct TestRow {
        season: String,
        metrics: Vec<(&'static str, Option<f64>)>,
    }

    const TEST_KEYS: &[&str] = &["A", "B", "C", "Kp"];

    impl MetricRow for TestRow {
        fn season(&self) -> &str {
            &self.season
        }
        fn metric(&self, key: &str) -> Option<f64> {
            self.metrics
                .iter()
                .find(|(k, _)| *k == key)
                .and_then(|(_, v)| *v)
        }
        fn metric_keys(&self) -> &'static [&'static str] {
            TEST_KEYS
        }
    }

    fn row(season: &str, metrics: &[(&'static str, Option<f64>)]) -> TestRow {
        TestRow {
            season: season.to_string(),
            metrics: metrics.to_vec(),
        }
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new(SEASON_KEY, "season"),
            ColumnSpec::new("A", "A"),
            ColumnSpec::new("B", "B"),
            ColumnSpec::new("C", "C"),
        ]
    }

    fn seasons<R: MetricRow>(view: &TableView<'_, R>) -> Vec<String> {
        view.rows.iter().map(|r| r.season().to_string()).collect()
    }

    // -- pruning --

    #[test]
    fn empty_columns_are_pruned() {
        let rows = vec![
            row("2023", &[("A", Some(1.0)), ("B", Some(2.0))]),
            row("2024", &[("A", Some(3.0)), ("C", None)]),
        ];
        let view = shape_table(&rows, &columns(), &TableOptions::default(), &SortState::default())
            .unwrap();
        let keys: Vec<&str> = view.columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec![SEASON_KEY, "A", "B"]);
    }

    #[test]
    fn min_non_empty_per_column_threshold() {
        let rows = vec![
            row("2023", &[("A", Some(1.0)), ("B", Some(2.0)), ("C", Some(1.0))]),
            row("2024", &[("A", Some(3.0)), ("B", Some(2.0))]),
        ];
        let options = TableOptions {
            min_non_empty_per_column: 2,
            ..TableOptions::default()
        };
        let view = shape_table(&rows, &columns(), &options, &SortState::default()).unwrap();
        assert_eq!(view.data_column_count(), 2);
        assert!(view.columns.iter().all(|c| c.key != "C"));
    }

    #[test]
    fn empty_rows_are_pruned() {
        let rows = vec![
            row("2022", &[]),
            row("2023", &[("A", Some(1.0)), ("B", Some(2.0))]),
            row("2024", &[("C", None)]),
        ];
        let view = shape_table(&rows, &columns(), &TableOptions::default(), &SortState::default())
            .unwrap();
        assert_eq!(seasons(&view), vec!["2023"]);
    }

    #[test]
    fn non_finite_counts_as_empty() {
        let rows = vec![row(
            "2023",
            &[("A", Some(1.0)), ("B", Some(f64::NAN)), ("C", Some(f64::INFINITY))],
        )];
        let options = TableOptions {
            min_data_columns: 1,
            ..TableOptions::default()
        };
        let view = shape_table(&rows, &columns(), &options, &SortState::default()).unwrap();
        assert_eq!(view.data_column_count(), 1);
    }

    #[test]
    fn auto_prune_off_keeps_everything() {
        let rows = vec![row("2022", &[]), row("2023", &[("A", Some(1.0))])];
        let options = TableOptions {
            auto_prune: false,
            ..TableOptions::default()
        };
        let view = shape_table(&rows, &columns(), &options, &SortState::default()).unwrap();
        assert_eq!(view.columns.len(), 4);
        assert_eq!(view.rows.len(), 2);
    }

    // -- visibility --

    #[test]
    fn hidden_when_too_few_data_columns() {
        let rows: Vec<TestRow> = (0..10)
            .map(|i| row(&format!("{}", 2010 + i), &[("A", Some(i as f64))]))
            .collect();
        assert!(
            shape_table(&rows, &columns(), &TableOptions::default(), &SortState::default())
                .is_none()
        );
    }

    #[test]
    fn hidden_when_no_rows() {
        let rows: Vec<TestRow> = Vec::new();
        assert!(
            shape_table(&rows, &columns(), &TableOptions::default(), &SortState::default())
                .is_none()
        );
    }

    #[test]
    fn hidden_when_rows_carry_only_season() {
        let rows = vec![row("2024", &[]), row("2025", &[])];
        assert!(
            shape_table(&rows, &columns(), &TableOptions::default(), &SortState::default())
                .is_none()
        );
    }

    // -- aggregation --

    #[test]
    fn sum_excludes_absent_values() {
        let rows = vec![
            row("2022", &[("A", Some(5.0)), ("B", Some(1.0))]),
            row("2023", &[("A", None), ("B", Some(1.0))]),
            row("2024", &[("A", Some(3.0)), ("B", Some(1.0))]),
        ];
        let options = TableOptions {
            sum_keys: vec!["A".into()],
            average_keys: vec!["B".into()],
            ..TableOptions::default()
        };
        let view = shape_table(&rows, &columns(), &options, &SortState::default()).unwrap();
        assert_eq!(view.aggregates.get("A"), Some(&8.0));
        assert_eq!(view.aggregates.get("B"), Some(&1.0));
    }

    #[test]
    fn average_excludes_absent_values() {
        let rows = vec![
            row("2022", &[("A", Some(4.0)), ("B", Some(1.0))]),
            row("2023", &[("A", None), ("B", Some(1.0))]),
            row("2024", &[("A", Some(2.0)), ("B", Some(1.0))]),
        ];
        let options = TableOptions {
            average_keys: vec!["A".into()],
            ..TableOptions::default()
        };
        let view = shape_table(&rows, &columns(), &options, &SortState::default()).unwrap();
        assert_eq!(view.aggregates.get("A"), Some(&3.0));
    }

    #[test]
    fn aggregate_undefined_without_values() {
        let rows = vec![row("2022", &[("A", Some(4.0)), ("B", Some(1.0))])];
        let options = TableOptions {
            sum_keys: vec!["C".into()],
            average_keys: vec!["Missing".into()],
            ..TableOptions::default()
        };
        let view = shape_table(&rows, &columns(), &options, &SortState::default()).unwrap();
        assert!(view.aggregates.is_empty());
    }

    #[test]
    fn aggregates_only_cover_surviving_rows() {
        let rows = vec![
            row("2022", &[("A", Some(4.0)), ("B", Some(1.0))]),
            row("2023", &[("C", None)]),
        ];
        let options = TableOptions {
            sum_keys: vec!["A".into()],
            ..TableOptions::default()
        };
        let view = shape_table(&rows, &columns(), &options, &SortState::default()).unwrap();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.aggregates.get("A"), Some(&4.0));
    }

    // -- footer --

    #[test]
    fn footer_first_cell_is_label() {
        let rows = vec![row("2022", &[("A", Some(4.0)), ("B", Some(1.0))])];
        let options = TableOptions {
            sum_keys: vec!["A".into()],
            ..TableOptions::default()
        };
        let view = shape_table(&rows, &columns(), &options, &SortState::default()).unwrap();
        assert_eq!(view.footer[0], FooterCell::Label(FOOTER_LABEL.to_string()));
        assert_eq!(view.footer[1], FooterCell::Value(Some(4.0)));
        assert_eq!(view.footer[2], FooterCell::Value(None));
        assert_eq!(view.footer_text(0), "Totals");
        assert_eq!(view.footer_text(1), "4.0");
        assert_eq!(view.footer_text(2), "");
    }

    #[test]
    fn footer_alias_redirects_by_label() {
        let rows = vec![row("2022", &[("A", Some(4.0)), ("Kp", Some(0.3))])];
        let cols = vec![
            ColumnSpec::new(SEASON_KEY, "season"),
            ColumnSpec::new("A", "A"),
            ColumnSpec::new("KRate", "K%").with_kind(CellKind::Percentage),
            ColumnSpec::new("Kp", "Kp"),
        ];
        let options = TableOptions {
            average_keys: vec!["Kp".into()],
            auto_prune: false,
            ..TableOptions::default()
        };
        let view = shape_table(&rows, &cols, &options, &SortState::default()).unwrap();
        // "KRate" has no aggregate of its own; its label "K%" redirects to "Kp".
        assert_eq!(view.footer[2], FooterCell::Value(Some(0.3)));
        assert_eq!(view.footer_text(2), "30.0%");
    }

    #[test]
    fn footer_alias_is_substitutable() {
        let rows = vec![row("2022", &[("A", Some(4.0)), ("B", Some(2.0))])];
        let cols = vec![
            ColumnSpec::new(SEASON_KEY, "season"),
            ColumnSpec::new("A", "Alpha"),
            ColumnSpec::new("B", "Beta"),
        ];
        let options = TableOptions {
            sum_keys: vec!["B".into()],
            footer_alias: FooterAlias::new([("Alpha", "B")]),
            ..TableOptions::default()
        };
        let view = shape_table(&rows, &cols, &options, &SortState::default()).unwrap();
        assert_eq!(view.footer[1], FooterCell::Value(Some(2.0)));

        let options = TableOptions {
            footer_alias: FooterAlias::empty(),
            ..options
        };
        let view = shape_table(&rows, &cols, &options, &SortState::default()).unwrap();
        assert_eq!(view.footer[1], FooterCell::Value(None));
    }

    // -- sorting --

    #[test]
    fn toggle_starts_descending_then_flips() {
        let mut sort = SortState::default();
        assert_eq!(sort.key(), None);
        sort.toggle("A");
        assert_eq!(sort.key(), Some("A"));
        assert_eq!(sort.direction(), SortDirection::Descending);
        sort.toggle("A");
        assert_eq!(sort.direction(), SortDirection::Ascending);
        sort.toggle("A");
        assert_eq!(sort.direction(), SortDirection::Descending);
        sort.toggle("B");
        assert_eq!(sort.key(), Some("B"));
        assert_eq!(sort.direction(), SortDirection::Descending);
    }

    #[test]
    fn unsorted_keeps_input_order() {
        let rows = vec![
            row("2024", &[("A", Some(1.0)), ("B", Some(1.0))]),
            row("2022", &[("A", Some(3.0)), ("B", Some(1.0))]),
            row("2023", &[("A", Some(2.0)), ("B", Some(1.0))]),
        ];
        let view = shape_table(&rows, &columns(), &TableOptions::default(), &SortState::default())
            .unwrap();
        assert_eq!(seasons(&view), vec!["2024", "2022", "2023"]);
    }

    #[test]
    fn absent_values_sink_when_descending() {
        let rows = vec![
            row("2022", &[("A", None), ("B", Some(1.0))]),
            row("2023", &[("A", Some(2.0)), ("B", Some(1.0))]),
            row("2024", &[("A", Some(5.0)), ("B", Some(1.0))]),
        ];
        let desc = SortState::by("A", SortDirection::Descending);
        let view = shape_table(&rows, &columns(), &TableOptions::default(), &desc).unwrap();
        assert_eq!(seasons(&view), vec!["2024", "2023", "2022"]);

        let asc = SortState::by("A", SortDirection::Ascending);
        let view = shape_table(&rows, &columns(), &TableOptions::default(), &asc).unwrap();
        assert_eq!(seasons(&view), vec!["2022", "2023", "2024"]);
    }

    #[test]
    fn percentage_sort_normalizes_mixed_scales() {
        let rows = vec![
            row("2022", &[("A", Some(25.0)), ("B", Some(1.0))]),
            row("2023", &[("A", Some(0.35)), ("B", Some(1.0))]),
            row("2024", &[("A", Some(0.25)), ("B", Some(1.0))]),
            row("2025", &[("A", Some(12.0)), ("B", Some(1.0))]),
        ];
        let cols = vec![
            ColumnSpec::new(SEASON_KEY, "season"),
            ColumnSpec::new("A", "K%").with_kind(CellKind::Percentage),
            ColumnSpec::new("B", "B"),
        ];
        let sort = SortState::by("A", SortDirection::Descending);
        let view = shape_table(&rows, &cols, &TableOptions::default(), &sort).unwrap();
        // 0.25 and 25 tie; the stable sort keeps their input order.
        assert_eq!(seasons(&view), vec!["2023", "2022", "2024", "2025"]);
        let a = &view.columns[1];
        assert_eq!(view.cell_text(view.rows[1], a), "25.0%");
        assert_eq!(view.cell_text(view.rows[2], a), "25.0%");
    }

    #[test]
    fn season_column_sorts_numerically() {
        let rows = vec![
            row("2019", &[("A", Some(1.0)), ("B", Some(1.0))]),
            row("2024", &[("A", Some(1.0)), ("B", Some(1.0))]),
            row("career", &[("A", Some(1.0)), ("B", Some(1.0))]),
            row("2021", &[("A", Some(1.0)), ("B", Some(1.0))]),
        ];
        let sort = SortState::by(SEASON_KEY, SortDirection::Descending);
        let view = shape_table(&rows, &columns(), &TableOptions::default(), &sort).unwrap();
        assert_eq!(seasons(&view), vec!["2024", "2021", "2019", "career"]);
    }

    // -- display --

    #[test]
    fn display_table_flattens_cells() {
        let rows = vec![
            row("2023", &[("A", Some(1.5)), ("B", None)]),
            row("2024", &[("A", Some(3.0)), ("B", Some(2.0))]),
        ];
        let options = TableOptions {
            sum_keys: vec!["A".into()],
            ..TableOptions::default()
        };
        let sort = SortState::by("A", SortDirection::Descending);
        let table = shape_table(&rows, &columns(), &options, &sort)
            .unwrap()
            .display("Test");
        assert_eq!(table.title, "Test");
        assert_eq!(table.header_labels(), vec!["season", "A ▼", "B"]);
        assert_eq!(table.column(SEASON_KEY).unwrap(), vec!["2024", "2023"]);
        assert_eq!(table.column("B").unwrap(), vec!["2.0", ""]);
        assert_eq!(table.footer_for(SEASON_KEY), Some("Totals"));
        assert_eq!(table.footer_for("A"), Some("4.5"));
    }
}
