//! Amount parsing and display.
//!
//! Source amounts arrive in mixed locales (`1,234.56`, `1.234,56`, `$2,000`).
//! The separator heuristic below is intentionally literal: a single separator
//! followed by exactly three trailing digits is read as a thousands mark.

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("leading number regex is valid")
});

/// Parse a raw amount string. Unparseable input yields `0.0`.
pub fn parse_amount(value: &str) -> f64 {
    let mut s: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();
    if s.is_empty() {
        return 0.0;
    }

    match (s.rfind(','), s.rfind('.')) {
        (Some(comma), Some(dot)) => {
            if comma > dot {
                s = s.replace('.', "").replacen(',', ".", 1);
            } else {
                s = s.replace(',', "");
            }
        }
        (Some(_), None) => {
            s = if has_three_digit_tail(&s, ',') {
                s.replace(',', "")
            } else {
                s.replacen(',', ".", 1)
            };
        }
        (None, Some(_)) => {
            if has_three_digit_tail(&s, '.') {
                s = s.replace('.', "");
            }
        }
        (None, None) => {}
    }

    parse_leading_float(&s)
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Parse the longest leading decimal number, ignoring trailing junk.
pub fn parse_leading_float(s: &str) -> Option<f64> {
    LEADING_NUMBER
        .find(s.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// `s` ends with `sep` followed by exactly three digits.
fn has_three_digit_tail(s: &str, sep: char) -> bool {
    let bytes = s.as_bytes();
    let n = bytes.len();
    n >= 4 && bytes[n - 4] == sep as u8 && bytes[n - 3..].iter().all(u8::is_ascii_digit)
}

/// Full US currency display with no fractional digits, e.g. `$1,234,568`.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let rounded = value.abs().round();
    let digits = format!("{:.0}", rounded);
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${}", sign, group_thousands(&digits))
}

/// Compact display scaled to B/M/K, e.g. `$1.5M`, `$950`.
pub fn format_amount_compact(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let abs = value.abs();
    let (short, suffix) = if abs >= 1e9 {
        (value / 1e9, "B")
    } else if abs >= 1e6 {
        (value / 1e6, "M")
    } else if abs >= 1e3 {
        (value / 1e3, "K")
    } else {
        (value, "")
    };
    let rounded = (short * 10.0 + 0.5).floor() / 10.0;
    let formatted = if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    };
    format!("${}{}", formatted, suffix)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
