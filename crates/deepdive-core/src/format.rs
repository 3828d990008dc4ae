// Cell formatting for metric tables.

/// How a column's numbers should be rendered.
///
/// `PlainNumber` carries no rule of its own: like an unspecified kind, it
/// defers to the label-based inference in [`format_cell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Percentage,
    ThreeDecimal,
    PlainNumber,
    Integer,
}

const TWO_DECIMAL_LABELS: &[&str] = &["ERA", "FIP", "xFIP", "SIERA", "WHIP"];
const THREE_DECIMAL_LABELS: &[&str] = &["AVG", "OBP", "SLG", "wOBA", "xwOBA"];

/// Render a cell value for display.
///
/// Absent values render as an empty string. An explicit percentage,
/// three-decimal, or integer kind always wins; otherwise the label decides:
/// percent-looking labels get the percentage rule, run estimators get two
/// decimals, slash-line rates get three, and everything else gets one.
pub fn format_cell(label: &str, value: Option<f64>, kind: Option<CellKind>) -> String {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return String::new();
    };

    match kind {
        Some(CellKind::Percentage) => return format_percentage(v),
        Some(CellKind::ThreeDecimal) => return fixed(v, 3),
        Some(CellKind::Integer) => return fixed(v, 0),
        Some(CellKind::PlainNumber) | None => {}
    }

    if is_percentage_label(label) {
        format_percentage(v)
    } else if TWO_DECIMAL_LABELS.contains(&label) {
        fixed(v, 2)
    } else if THREE_DECIMAL_LABELS.contains(&label) {
        fixed(v, 3)
    } else {
        fixed(v, 1)
    }
}

/// Bring a percentage onto the 0-100 scale. Providers mix fractional
/// (`0.29`) and whole (`29`) encodings, so anything with magnitude at most 1
/// is read as a fraction.
pub fn percent_scale(v: f64) -> f64 {
    if v.abs() <= 1.0 {
        v * 100.0
    } else {
        v
    }
}

/// `29.0%` style rendering of a fractional or whole percentage.
pub fn format_percentage(v: f64) -> String {
    format!("{}%", fixed(percent_scale(v), 1))
}

/// Whether a column label reads as a percentage (`K%`, `ZonePct`, `StrandRate`).
pub fn is_percentage_label(label: &str) -> bool {
    if label.contains('%') {
        return true;
    }
    let lower = label.to_ascii_lowercase();
    lower.ends_with("pct") || lower.ends_with("rate")
}

/// Extra digits printed past the rounding position when looking for a tie.
/// A double near a tie at three decimals differs from it by far more than
/// 10^-25, so a tail of `5` and zeros this long is an exact tie.
const TIE_GUARD_DIGITS: usize = 25;

/// Fixed-point rendering with ties rounded away from zero (`0.25` -> `0.3`).
fn fixed(v: f64, decimals: usize) -> String {
    // Collapse negative zero so "-0.0" never shows up for an exact zero.
    let v = if v == 0.0 { 0.0 } else { v };
    round_tie_away(v, decimals).unwrap_or_else(|| format!("{v:.decimals$}"))
}

/// `Some` only when `v` sits exactly halfway between two `decimals`-digit
/// values; `format!` rounds those to even.
fn round_tie_away(v: f64, decimals: usize) -> Option<String> {
    let exact = format!("{:.*}", decimals + TIE_GUARD_DIGITS, v.abs());
    let (whole, frac) = exact.split_once('.')?;
    let (kept, tail) = frac.split_at(decimals);
    let mut tail = tail.chars();
    if tail.next() != Some('5') || !tail.all(|c| c == '0') {
        return None;
    }

    let mut digits: Vec<u8> = whole.bytes().chain(kept.bytes()).collect();
    let mut idx = digits.len();
    loop {
        if idx == 0 {
            digits.insert(0, b'1');
            break;
        }
        idx -= 1;
        if digits[idx] == b'9' {
            digits[idx] = b'0';
        } else {
            digits[idx] += 1;
            break;
        }
    }

    let point = digits.len() - decimals;
    let mut out = String::with_capacity(digits.len() + 2);
    if v < 0.0 {
        out.push('-');
    }
    out.extend(digits[..point].iter().map(|&b| b as char));
    if decimals > 0 {
        out.push('.');
        out.extend(digits[point..].iter().map(|&b| b as char));
    }
    Some(out)
}
