// Metric projection: raw season records to typed per-category rows.
//
// Each category is an alias table: a metric key plus the provider spellings
// it may arrive under. Only three metrics are derived rather than looked up:
// K-BB% (from K% and BB%), the pitch-mix shares (fuzzy key fallback), and
// Dollars (fuzzy key fallback).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::fields::{numeric, numeric_fuzzy, RawSeasonRecord};
use crate::summary::SeasonEntry;

// ---------------------------------------------------------------------------
// MetricRow
// ---------------------------------------------------------------------------

/// A per-season row of named metrics.
///
/// Every metric is either a finite number or absent; absent is never zero.
pub trait MetricRow {
    /// Season label as supplied by the provider.
    fn season(&self) -> &str;

    /// Value of the metric stored under `key`, if the key belongs to this row
    /// type and the metric resolved.
    fn metric(&self, key: &str) -> Option<f64>;

    /// All metric keys of this row type, in declaration order.
    fn metric_keys(&self) -> &'static [&'static str];

    /// True when at least one metric resolved to a finite number.
    fn has_any_metric(&self) -> bool {
        self.metric_keys()
            .iter()
            .any(|k| self.metric(k).is_some_and(f64::is_finite))
    }
}

macro_rules! metric_row {
    (
        $(#[$meta:meta])*
        $name:ident { $($field:ident => $key:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            pub season: String,
            $(pub $field: Option<f64>,)+
        }

        impl $name {
            pub const KEYS: &'static [&'static str] = &[$($key),+];
        }

        impl MetricRow for $name {
            fn season(&self) -> &str {
                &self.season
            }

            fn metric(&self, key: &str) -> Option<f64> {
                match key {
                    $($key => self.$field,)+
                    _ => None,
                }
            }

            fn metric_keys(&self) -> &'static [&'static str] {
                Self::KEYS
            }
        }
    };
}

metric_row! {
    /// Workload and results: innings, games, decisions, ERA/WHIP.
    ProductionRow {
        ip => "IP",
        g => "G",
        gs => "GS",
        w => "W",
        l => "L",
        sv => "SV",
        hld => "HLD",
        cg => "CG",
        sho => "SHO",
        tbf => "TBF",
        pitches => "Pitches",
        era => "ERA",
        whip => "WHIP",
    }
}

metric_row! {
    /// Strikeout/walk rates and plate-discipline numbers.
    StrikeThrowingRow {
        k_per9 => "Kper9",
        bb_per9 => "BBper9",
        k_pct => "Kp",
        bb_pct => "BBp",
        k_minus_bb => "KMinusBB",
        csw_pct => "CSWp",
        swstr_pct => "SwStrPct",
        zone_pct => "ZonePct",
        contact_pct => "ContactPct",
        o_swing_pct => "O_SwingPct",
    }
}

metric_row! {
    /// ERA estimators, league-adjusted minus stats, and run-prevention rates.
    RunPreventionRow {
        era => "ERA",
        fip => "FIP",
        xfip => "xFIP",
        siera => "SIERA",
        era_minus => "ERAminus",
        fip_minus => "FIPminus",
        xfip_minus => "xFIPminus",
        hr_per9 => "HRper9",
        hr_per_fb => "HRperFB",
        lob_pct => "LOBPct",
        gb_pct => "GBpct",
        hard_hit_pct => "HardHitPct",
    }
}

metric_row! {
    /// Batted-ball profile.
    ContactQualityRow {
        babip => "BABIP",
        ld_pct => "LDpct",
        gb_pct => "GBpct",
        fb_pct => "FBpct",
        iffb_pct => "IFFBpct",
        pull_pct => "PullPct",
        cent_pct => "CentPct",
        oppo_pct => "OppoPct",
    }
}

metric_row! {
    /// Usage share per pitch type.
    PitchMixRow {
        ff_pct => "FFpct",
        fs_pct => "FSpct",
        ft_pct => "FTpct",
        si_pct => "SIpct",
        sl_pct => "SLpct",
        cu_pct => "CUpct",
        ch_pct => "CHpct",
        kc_pct => "KCpct",
        cs_pct => "CSpct",
    }
}

metric_row! {
    /// Wins above replacement and other value measures.
    ValueRow {
        war => "WAR",
        ra9_war => "RA9_WAR",
        rar => "RAR",
        wpa => "WPA",
        re24 => "RE24",
        shutdowns => "Shutdowns",
        meltdowns => "Meltdowns",
        dollars => "Dollars",
    }
}

// ---------------------------------------------------------------------------
// Fuzzy fallback patterns
// ---------------------------------------------------------------------------

fn key_pattern(source: &str) -> Regex {
    Regex::new(source).unwrap_or_else(|e| panic!("invalid key pattern {source:?}: {e}"))
}

static FF_KEY: Lazy<Regex> = Lazy::new(|| key_pattern("ff(pct)?$"));
static FS_KEY: Lazy<Regex> = Lazy::new(|| key_pattern("fs(pct)?$"));
static FT_KEY: Lazy<Regex> = Lazy::new(|| key_pattern("ft(pct)?$"));
static SI_KEY: Lazy<Regex> = Lazy::new(|| key_pattern("si(pct)?$"));
static SL_KEY: Lazy<Regex> = Lazy::new(|| key_pattern("sl(pct)?$"));
static CU_KEY: Lazy<Regex> = Lazy::new(|| key_pattern("(cu|cb)(pct)?$"));
static CH_KEY: Lazy<Regex> = Lazy::new(|| key_pattern("ch(pct)?$"));
static KC_KEY: Lazy<Regex> = Lazy::new(|| key_pattern("kc(pct)?$"));
static CS_KEY: Lazy<Regex> = Lazy::new(|| key_pattern("cs(pct)?$"));
static DOLLARS_KEY: Lazy<Regex> = Lazy::new(|| key_pattern("^dollars?$"));

/// Alias lookup first, then the fuzzy pattern when the alias lookup is absent.
fn numeric_or_fuzzy(d: &RawSeasonRecord, candidates: &[&str], fallback: &Regex) -> Option<f64> {
    numeric(d, candidates).or_else(|| numeric_fuzzy(d, &[fallback]))
}

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

pub fn production(entry: &SeasonEntry) -> ProductionRow {
    let d = &entry.data;
    ProductionRow {
        season: entry.season.clone(),
        ip: numeric(d, &["IP"]),
        g: numeric(d, &["G"]),
        gs: numeric(d, &["GS"]),
        w: numeric(d, &["W"]),
        l: numeric(d, &["L"]),
        sv: numeric(d, &["SV"]),
        hld: numeric(d, &["HLD", "Holds"]),
        cg: numeric(d, &["CG"]),
        sho: numeric(d, &["SHO"]),
        tbf: numeric(d, &["TBF", "BF"]),
        pitches: numeric(d, &["Pitches", "Pit"]),
        era: numeric(d, &["ERA"]),
        whip: numeric(d, &["WHIP"]),
    }
}

/// K-BB% is taken from the provider when present, otherwise derived as the
/// percentage-point difference K% - BB%.
pub fn strike_throwing(entry: &SeasonEntry) -> StrikeThrowingRow {
    let d = &entry.data;
    let k_pct = numeric(d, &["K%", "SO%", "K %", "SO %"]);
    let bb_pct = numeric(d, &["BB%", "BB %"]);
    let k_minus_bb = numeric(d, &["K-BB%", "K-BB %"]).or_else(|| match (k_pct, bb_pct) {
        (Some(k), Some(bb)) => Some(k - bb),
        _ => None,
    });

    StrikeThrowingRow {
        season: entry.season.clone(),
        k_per9: numeric(d, &["K/9", "K9", "SO/9"]),
        bb_per9: numeric(d, &["BB/9", "BB9", "Walks/9"]),
        k_pct,
        bb_pct,
        k_minus_bb,
        csw_pct: numeric(d, &["CSW%", "CSW %"]),
        swstr_pct: numeric(d, &["SwStr%", "SwStr %", "Whiff%", "Whiff %"]),
        zone_pct: numeric(d, &["Zone%", "Zone %"]),
        contact_pct: numeric(d, &["Contact%", "Contact %"]),
        o_swing_pct: numeric(d, &["O-Swing%", "O-Swing %", "Chase%", "Chase %"]),
    }
}

pub fn run_prevention(entry: &SeasonEntry) -> RunPreventionRow {
    let d = &entry.data;
    RunPreventionRow {
        season: entry.season.clone(),
        era: numeric(d, &["ERA"]),
        fip: numeric(d, &["FIP"]),
        xfip: numeric(d, &["xFIP"]),
        siera: numeric(d, &["SIERA"]),
        era_minus: numeric(d, &["ERA-", "ERAminus"]),
        fip_minus: numeric(d, &["FIP-", "FIPminus"]),
        xfip_minus: numeric(d, &["xFIP-", "xFIPminus"]),
        hr_per9: numeric(d, &["HR/9", "HR9"]),
        hr_per_fb: numeric(d, &["HR/FB", "HRperFB"]),
        lob_pct: numeric(d, &["LOB%", "LOB %", "Strand%"]),
        gb_pct: numeric(d, &["GB%", "GB %"]),
        hard_hit_pct: numeric(d, &["HardHit%", "HardHit %", "Hard%"]),
    }
}

pub fn contact_quality(entry: &SeasonEntry) -> ContactQualityRow {
    let d = &entry.data;
    ContactQualityRow {
        season: entry.season.clone(),
        babip: numeric(d, &["BABIP"]),
        ld_pct: numeric(d, &["LD%", "LD %"]),
        gb_pct: numeric(d, &["GB%", "GB %"]),
        fb_pct: numeric(d, &["FB%", "FB %"]),
        iffb_pct: numeric(d, &["IFFB%", "IFFB %"]),
        pull_pct: numeric(d, &["Pull%", "Pull %"]),
        cent_pct: numeric(d, &["Cent%", "Cent %", "Center%"]),
        oppo_pct: numeric(d, &["Oppo%", "Oppo %", "Opp%"]),
    }
}

/// Pitch shares fall back to shape matching on the pitch abbreviation
/// (`pfx_FF`, `FF% (sc)`, ...) when no listed alias resolves.
pub fn pitch_mix(entry: &SeasonEntry) -> PitchMixRow {
    let d = &entry.data;
    PitchMixRow {
        season: entry.season.clone(),
        ff_pct: numeric_or_fuzzy(
            d,
            &["FF%", "FF %", "FourSeam%", "Four-seam%", "Four Seam%"],
            &FF_KEY,
        ),
        fs_pct: numeric_or_fuzzy(d, &["FS%", "FS %", "Splitter%", "Split%"], &FS_KEY),
        ft_pct: numeric_or_fuzzy(d, &["FT%", "FT %", "TwoSeam%", "Two Seam%"], &FT_KEY),
        si_pct: numeric_or_fuzzy(d, &["SI%", "SI %", "Sinker%"], &SI_KEY),
        sl_pct: numeric_or_fuzzy(d, &["SL%", "SL %", "Slider%", "Sl%"], &SL_KEY),
        cu_pct: numeric_or_fuzzy(
            d,
            &["CU%", "CU %", "Curve%", "CB%", "Curveball%"],
            &CU_KEY,
        ),
        ch_pct: numeric_or_fuzzy(d, &["CH%", "CH %", "Change%", "CHG%"], &CH_KEY),
        kc_pct: numeric_or_fuzzy(
            d,
            &["KC%", "KC %", "Knuckle%", "KnuckleCurve%"],
            &KC_KEY,
        ),
        cs_pct: numeric_or_fuzzy(d, &["CS%", "CS %", "Circle%"], &CS_KEY),
    }
}

pub fn value(entry: &SeasonEntry) -> ValueRow {
    let d = &entry.data;
    ValueRow {
        season: entry.season.clone(),
        war: numeric(d, &["WAR"]),
        ra9_war: numeric(d, &["RA9-WAR", "RA9 WAR", "RA9_WAR"]),
        rar: numeric(d, &["RAR"]),
        wpa: numeric(d, &["WPA"]),
        re24: numeric(d, &["RE24"]),
        shutdowns: numeric(d, &["SD", "Shutdowns"]),
        meltdowns: numeric(d, &["MD", "Meltdowns"]),
        dollars: numeric_or_fuzzy(d, &["Dollars", "Dollars (millions)"], &DOLLARS_KEY),
    }
}

/// Apply one projection to every entry, keeping season order.
pub fn project_all<R>(entries: &[SeasonEntry], project: fn(&SeasonEntry) -> R) -> Vec<R> {
    entries.iter().map(project).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
