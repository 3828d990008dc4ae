// Search form: player name entry, season selection, and query building.

use std::collections::BTreeSet;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Url;
use thiserror::Error;

use crate::config::SeasonsConfig;

/// Origin plus mount point of the summary proxy route.
const PROXY_ORIGIN: &str = "http://localhost/api";

/// Characters left bare in a name segment: alphanumerics plus `-_.!~*'()`.
/// Everything else, including `/ & + : @ = , ;`, is escaped.
const NAME_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Enter a player name")]
    EmptyName,
}

// ---------------------------------------------------------------------------
// Player names
// ---------------------------------------------------------------------------

/// A player name split into the two path segments the provider expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerName {
    pub first: String,
    pub last: String,
}

impl PlayerName {
    pub fn display(&self) -> String {
        if self.last.is_empty() {
            self.first.clone()
        } else {
            format!("{} {}", self.first, self.last)
        }
    }
}

/// Split free text into first and last name.
///
/// Whitespace runs collapse to single spaces; the first token is the first
/// name and everything after it is the last name ("de la Rosa" stays one
/// last name). Each part is capitalized as a whole: first character upper,
/// the rest lower.
pub fn split_name(input: &str) -> PlayerName {
    let mut tokens = input.split_whitespace();
    let first = tokens.next().unwrap_or_default();
    let last = tokens.collect::<Vec<_>>().join(" ");
    PlayerName {
        first: title_case(first),
        last: title_case(&last),
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => {
            let mut out: String = c.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// SummaryQuery
// ---------------------------------------------------------------------------

/// A validated search: who, and which seasons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryQuery {
    pub name: PlayerName,
    /// Ascending, deduplicated, never empty.
    pub seasons: Vec<u16>,
}

impl SummaryQuery {
    /// `seasons=2024&seasons=2025`
    pub fn query_string(&self) -> String {
        self.seasons
            .iter()
            .map(|y| format!("seasons={y}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// `{base}/pitchers/{first}/{last}/summary?seasons=...`, or `None` when
    /// `base` cannot carry a path (`mailto:` and the like).
    ///
    /// Names are percent-encoded as single path segments, so spaces, slashes
    /// and accents never split or corrupt the path.
    pub fn summary_url(&self, base: &Url) -> Option<Url> {
        if base.cannot_be_a_base() {
            return None;
        }
        let mut url = base.clone();
        let prefix = base.path().trim_end_matches('/');
        let path = format!(
            "{prefix}/pitchers/{}/{}/summary",
            utf8_percent_encode(&self.name.first, NAME_SEGMENT),
            utf8_percent_encode(&self.name.last, NAME_SEGMENT)
        );
        url.set_path(&path);
        url.set_query(Some(&self.query_string()));
        Some(url)
    }

    /// Relative proxy path: `/api/pitchers/{first}/{last}/summary?seasons=...`.
    pub fn proxy_path(&self) -> String {
        let Ok(base) = Url::parse(PROXY_ORIGIN) else {
            return String::new();
        };
        match self.summary_url(&base) {
            Some(url) => match url.query() {
                Some(q) => format!("{}?{q}", url.path()),
                None => url.path().to_string(),
            },
            None => String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// SearchForm
// ---------------------------------------------------------------------------

/// Editable search state: the name being typed and the selected seasons.
#[derive(Debug, Clone)]
pub struct SearchForm {
    pub name: String,
    selected: BTreeSet<u16>,
    available: Vec<u16>,
    default_season: u16,
}

impl SearchForm {
    /// Empty name, only the default season selected.
    pub fn new(available: Vec<u16>, default_season: u16) -> Self {
        SearchForm {
            name: String::new(),
            selected: BTreeSet::from([default_season]),
            available,
            default_season,
        }
    }

    pub fn from_config(seasons: &SeasonsConfig) -> Self {
        Self::new(seasons.available.clone(), seasons.default)
    }

    pub fn available(&self) -> &[u16] {
        &self.available
    }

    pub fn default_season(&self) -> u16 {
        self.default_season
    }

    /// Selected seasons, ascending.
    pub fn selected(&self) -> Vec<u16> {
        self.selected.iter().copied().collect()
    }

    pub fn is_selected(&self, season: u16) -> bool {
        self.selected.contains(&season)
    }

    pub fn toggle(&mut self, season: u16) {
        if !self.selected.remove(&season) {
            self.selected.insert(season);
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.available.iter().copied().collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// `"3 seasons"` or `"No seasons selected"`.
    pub fn selection_hint(&self) -> String {
        match self.selected.len() {
            0 => "No seasons selected".to_string(),
            n => format!("{n} seasons"),
        }
    }

    /// Validate the typed name and build a query.
    pub fn submit(&self) -> Result<SummaryQuery, SearchError> {
        self.query_for(&self.name)
    }

    /// Build a query for `name` with the current season selection. An empty
    /// selection queries the default season alone.
    pub fn query_for(&self, name: &str) -> Result<SummaryQuery, SearchError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(SearchError::EmptyName);
        }
        let seasons = if self.selected.is_empty() {
            vec![self.default_season]
        } else {
            self.selected()
        };
        Ok(SummaryQuery {
            name: split_name(trimmed),
            seasons,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
