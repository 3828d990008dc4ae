// Field resolution over loosely-keyed provider records.
//
// Provider field names drift between seasons and API versions ("K%" vs
// "K %" vs "SO%"), and values arrive as numbers, numeric-looking strings, or
// nulls. Everything messy about the upstream schema is contained here so the
// category projections can stay declarative alias tables.

use regex::Regex;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Raw values and records
// ---------------------------------------------------------------------------

/// A single provider value, reduced to the shapes the projections care about.
///
/// Booleans, arrays, and nested objects collapse into `Null`: the key is still
/// present (so alias lookup stops there) but it never yields a number.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Null,
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_f64().map_or(FieldValue::Null, FieldValue::Number),
            Value::String(s) => FieldValue::Text(s.clone()),
            _ => FieldValue::Null,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

/// One season's worth of provider fields, in payload order.
///
/// Order matters: fuzzy lookups scan keys front to back and take the first
/// match, so the record keeps the order the keys were decoded in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSeasonRecord {
    fields: Vec<(String, FieldValue)>,
}

impl RawSeasonRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a JSON object. Anything that is not an object
    /// produces an empty record.
    pub fn from_json(value: &Value) -> Self {
        let fields = match value {
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| (k.clone(), FieldValue::from(v)))
                .collect(),
            _ => Vec::new(),
        };
        Self { fields }
    }

    /// Insert a field, replacing the value in place if the key already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Exact-key lookup.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Numeric coercion
// ---------------------------------------------------------------------------

/// Coerce a provider value into a finite number.
///
/// Numbers pass through when finite. Strings are cleaned up first (see
/// [`parse_text`]). Nulls and everything else are absent.
pub fn parse_number(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Number(n) if n.is_finite() => Some(*n),
        FieldValue::Number(_) | FieldValue::Null => None,
        FieldValue::Text(s) => parse_text(s),
    }
}

/// Parse a messy numeric string such as `"1,234"`, `"$12.5m"`, `"29.1 %"`,
/// `"N/A"`, or `"–"`.
///
/// Cleanup runs in a fixed order: drop thousands separators and spaces,
/// fold dash-like characters to `-`, drop `$`, drop a trailing million
/// suffix, blank out missing-value markers, drop a trailing `%`.
pub fn parse_text(raw: &str) -> Option<f64> {
    let mut cleaned: String = raw
        .chars()
        .filter(|c| *c != ',' && *c != ' ' && *c != '$')
        .map(|c| if is_dash(c) { '-' } else { c })
        .collect();

    strip_million_suffix(&mut cleaned);

    if is_missing_marker(&cleaned) {
        cleaned.clear();
    }
    if cleaned.ends_with('%') {
        cleaned.pop();
    }

    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn is_dash(c: char) -> bool {
    matches!(
        c,
        '\u{2010}'..='\u{2015}' | '\u{2212}' | '\u{FE58}' | '\u{FE63}' | '\u{FF0D}'
    )
}

fn strip_million_suffix(s: &mut String) {
    let lower = s.to_ascii_lowercase();
    for suffix in ["millions", "million", "m"] {
        if lower.ends_with(suffix) {
            s.truncate(s.len() - suffix.len());
            return;
        }
    }
}

fn is_missing_marker(s: &str) -> bool {
    ["n/a", "na", "null"]
        .iter()
        .any(|marker| s.eq_ignore_ascii_case(marker))
}

// ---------------------------------------------------------------------------
// Key lookup
// ---------------------------------------------------------------------------

/// Return the value of the first candidate key present in the record.
///
/// Exact matches win over case-insensitive ones: every candidate is tried
/// exactly before any candidate is tried case-insensitively. A key that is
/// present with a null value still counts as found.
pub fn pick<'a>(record: &'a RawSeasonRecord, candidates: &[&str]) -> Option<&'a FieldValue> {
    candidates
        .iter()
        .find_map(|c| record.get(c))
        .or_else(|| {
            candidates.iter().find_map(|c| {
                let wanted = c.to_lowercase();
                record
                    .iter()
                    .find(|(k, _)| k.to_lowercase() == wanted)
                    .map(|(_, v)| v)
            })
        })
}

/// `parse_number(pick(record, candidates))`.
pub fn numeric(record: &RawSeasonRecord, candidates: &[&str]) -> Option<f64> {
    pick(record, candidates).and_then(parse_number)
}

/// Lowercase a key and strip everything that is not `[a-z0-9]`.
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Shape-based lookup against normalized keys.
///
/// For each pattern in order, the first key (in record order) whose
/// normalized form matches is parsed; a number is returned immediately,
/// otherwise the next pattern is tried.
pub fn numeric_fuzzy(record: &RawSeasonRecord, patterns: &[&Regex]) -> Option<f64> {
    patterns.iter().find_map(|pattern| {
        record
            .iter()
            .find(|(k, _)| pattern.is_match(&normalize_key(k)))
            .and_then(|(_, v)| parse_number(v))
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
