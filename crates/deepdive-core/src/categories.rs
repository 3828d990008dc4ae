// Statistical categories: table titles, column schemas, and footer rules.

use crate::format::CellKind;
use crate::table::{ColumnSpec, TableOptions, SEASON_KEY};

/// The six statistical groupings shown for a pitcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Production,
    StrikeThrowing,
    RunPrevention,
    ContactQuality,
    PitchMix,
    Value,
}

impl Category {
    /// Display order.
    pub const ALL: [Category; 6] = [
        Category::Production,
        Category::StrikeThrowing,
        Category::RunPrevention,
        Category::ContactQuality,
        Category::PitchMix,
        Category::Value,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Category::Production => "Production",
            Category::StrikeThrowing => "Strike Throwing",
            Category::RunPrevention => "Run Prevention",
            Category::ContactQuality => "Batted Ball & Contact",
            Category::PitchMix => "Pitch Mix",
            Category::Value => "Value",
        }
    }

    /// Declared columns, season first.
    pub fn columns(self) -> Vec<ColumnSpec> {
        use CellKind::{Integer as Int, Percentage as Pct, ThreeDecimal as Dec3};

        let specs: &[(&str, &str, Option<CellKind>)] = match self {
            Category::Production => &[
                ("IP", "IP", None),
                ("G", "G", Some(Int)),
                ("GS", "GS", Some(Int)),
                ("W", "W", Some(Int)),
                ("L", "L", Some(Int)),
                ("SV", "SV", Some(Int)),
                ("HLD", "HLD", Some(Int)),
                ("CG", "CG", Some(Int)),
                ("SHO", "SHO", Some(Int)),
                ("TBF", "TBF", Some(Int)),
                ("Pitches", "Pitches", Some(Int)),
                ("ERA", "ERA", None),
                ("WHIP", "WHIP", None),
            ],
            Category::StrikeThrowing => &[
                ("Kper9", "K/9", None),
                ("BBper9", "BB/9", None),
                ("Kp", "K%", Some(Pct)),
                ("BBp", "BB%", Some(Pct)),
                ("KMinusBB", "K-BB%", Some(Pct)),
                ("CSWp", "CSW%", Some(Pct)),
                ("SwStrPct", "SwStr%", Some(Pct)),
                ("ZonePct", "Zone%", Some(Pct)),
                ("ContactPct", "Contact%", Some(Pct)),
                ("O_SwingPct", "O-Swing%", Some(Pct)),
            ],
            Category::RunPrevention => &[
                ("ERA", "ERA", None),
                ("FIP", "FIP", None),
                ("xFIP", "xFIP", None),
                ("SIERA", "SIERA", None),
                ("ERAminus", "ERA-", None),
                ("FIPminus", "FIP-", None),
                ("xFIPminus", "xFIP-", None),
                ("HRper9", "HR/9", None),
                ("HRperFB", "HR/FB", Some(Pct)),
                ("LOBPct", "LOB%", Some(Pct)),
                ("GBpct", "GB%", Some(Pct)),
                ("HardHitPct", "HardHit%", Some(Pct)),
            ],
            Category::ContactQuality => &[
                ("BABIP", "BABIP", Some(Dec3)),
                ("LDpct", "LD%", Some(Pct)),
                ("GBpct", "GB%", Some(Pct)),
                ("FBpct", "FB%", Some(Pct)),
                ("IFFBpct", "IFFB%", Some(Pct)),
                ("PullPct", "Pull%", Some(Pct)),
                ("CentPct", "Cent%", Some(Pct)),
                ("OppoPct", "Oppo%", Some(Pct)),
            ],
            Category::PitchMix => &[
                ("FFpct", "FF%", Some(Pct)),
                ("FSpct", "FS%", Some(Pct)),
                ("FTpct", "FT%", Some(Pct)),
                ("SIpct", "SI%", Some(Pct)),
                ("SLpct", "SL%", Some(Pct)),
                ("CUpct", "CU%", Some(Pct)),
                ("CHpct", "CH%", Some(Pct)),
                ("KCpct", "KC%", Some(Pct)),
                ("CSpct", "CS%", Some(Pct)),
            ],
            Category::Value => &[
                ("WAR", "WAR", None),
                ("RA9_WAR", "RA9-WAR", None),
                ("RAR", "RAR", None),
                ("WPA", "WPA", None),
                ("RE24", "RE24", None),
                ("Shutdowns", "SD", Some(Int)),
                ("Meltdowns", "MD", Some(Int)),
                ("Dollars", "Dollars", None),
            ],
        };

        std::iter::once(ColumnSpec::new(SEASON_KEY, "season"))
            .chain(specs.iter().map(|(key, label, kind)| ColumnSpec {
                key: (*key).to_string(),
                label: (*label).to_string(),
                kind: *kind,
            }))
            .collect()
    }

    /// Footer aggregation for the category. Counting stats are summed;
    /// rates and estimators are averaged.
    pub fn options(self) -> TableOptions {
        let (sum_keys, average_keys): (&[&str], &[&str]) = match self {
            Category::Production => (
                &[
                    "IP", "G", "GS", "W", "L", "SV", "HLD", "CG", "SHO", "TBF", "Pitches",
                ],
                &["ERA", "WHIP"],
            ),
            Category::StrikeThrowing => (
                &[],
                &[
                    "Kper9", "BBper9", "Kp", "BBp", "KMinusBB", "CSWp", "SwStrPct", "ZonePct",
                    "ContactPct", "O_SwingPct",
                ],
            ),
            Category::RunPrevention => (
                &[],
                &[
                    "ERA", "FIP", "xFIP", "SIERA", "ERAminus", "FIPminus", "xFIPminus", "HRper9",
                    "HRperFB", "LOBPct", "GBpct", "HardHitPct",
                ],
            ),
            Category::ContactQuality => (
                &[],
                &[
                    "BABIP", "LDpct", "GBpct", "FBpct", "IFFBpct", "PullPct", "CentPct", "OppoPct",
                ],
            ),
            Category::PitchMix => (
                &[],
                &[
                    "FFpct", "FSpct", "FTpct", "SIpct", "SLpct", "CUpct", "CHpct", "KCpct", "CSpct",
                ],
            ),
            Category::Value => (
                &[
                    "WAR", "RA9_WAR", "RAR", "WPA", "RE24", "Shutdowns", "Meltdowns", "Dollars",
                ],
                &[],
            ),
        };

        TableOptions {
            sum_keys: sum_keys.iter().map(|k| k.to_string()).collect(),
            average_keys: average_keys.iter().map(|k| k.to_string()).collect(),
            ..TableOptions::default()
        }
    }
}
