//! Date parsing for grant date columns.

use chrono::{DateTime, Datelike, Days, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// `YYYY` or `YYYY-MM`, read as the first day of that period.
static ISO_YEAR_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})(?:-(\d{2}))?$").expect("iso year regex is valid"));

/// Month name and year with no day, e.g. `March 2021`.
const MONTH_YEAR_FORMATS: &[&str] = &["%d %B %Y", "%d %b %Y"];

const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d %Y",
    "%b %d %Y",
];

/// Parse a raw date into UTC millis.
///
/// Three-part `/` or `-` separated values are read as month-day-year and
/// normalized like a calendar (month 13 rolls into the next year, day 0 is
/// the last day of the previous month). Anything else goes through a general
/// parse. Returns `None` when neither path yields a date.
pub fn parse_date(value: &str) -> Option<i64> {
    if value.is_empty() {
        return None;
    }
    let parts: Vec<&str> = value.split(['/', '-']).collect();
    if let [m, d, y] = parts.as_slice() {
        return month_day_year(m, d, y);
    }
    parse_general(value)
}

fn month_day_year(m: &str, d: &str, y: &str) -> Option<i64> {
    let month = date_component(m)?;
    let day = date_component(d)?;
    let mut year = date_component(y)?;
    if (0..=99).contains(&year) {
        year += 1900;
    }

    let month_index = month - 1;
    let year = year.checked_add(month_index.div_euclid(12))?;
    let month0 = month_index.rem_euclid(12) as u32;

    let first = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month0 + 1, 1)?;
    let offset = day - 1;
    let date = if offset >= 0 {
        first.checked_add_days(Days::new(offset as u64))?
    } else {
        first.checked_sub_days(Days::new(offset.unsigned_abs()))?
    };
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}

/// Numeric date component. Blank counts as zero; fractions are truncated.
fn date_component(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0);
    }
    let n = raw.parse::<f64>().ok().filter(|n| n.is_finite())?;
    let n = n.trunc();
    if n.abs() > 1e9 {
        return None;
    }
    Some(n as i64)
}

fn parse_general(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Some(caps) = ISO_YEAR_MONTH.captures(value) {
        let year = caps[1].parse().ok()?;
        let month = caps.get(2).map_or(Some(1), |m| m.as_str().parse().ok())?;
        return utc_midnight(NaiveDate::from_ymd_opt(year, month, 1)?);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.timestamp_millis());
    }
    // chrono's %d and %Y can split "2021" into day 20 and year 21, so the
    // parsed year must equal the trailing year token.
    let year = trailing_year(value)?;
    let first_of_month = format!("1 {}", value);
    let candidates = FALLBACK_DATE_FORMATS
        .iter()
        .map(|fmt| NaiveDate::parse_from_str(value, fmt))
        .chain(
            MONTH_YEAR_FORMATS
                .iter()
                .map(|fmt| NaiveDate::parse_from_str(&first_of_month, fmt)),
        );
    for date in candidates.flatten() {
        if date.year() == year {
            return utc_midnight(date);
        }
    }
    None
}

/// Last whitespace or comma separated token, when it is a year of at least
/// four digits.
fn trailing_year(value: &str) -> Option<i32> {
    let token = value
        .rsplit(|c: char| c.is_whitespace() || c == ',')
        .next()?;
    if token.len() < 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

fn utc_midnight(date: NaiveDate) -> Option<i64> {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> i64 {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap()
    }

    #[test]
    fn test_month_day_year_slash_and_dash() {
        assert_eq!(parse_date("03/15/2021"), Some(ymd(2021, 3, 15)));
        assert_eq!(parse_date("3-5-2019"), Some(ymd(2019, 3, 5)));
    }

    #[test]
    fn test_calendar_overflow_is_normalized() {
        assert_eq!(parse_date("13/1/2020"), Some(ymd(2021, 1, 1)));
        assert_eq!(parse_date("3/0/2020"), Some(ymd(2020, 2, 29)));
        assert_eq!(parse_date("2/30/2021"), Some(ymd(2021, 3, 2)));
    }

    #[test]
    fn test_two_digit_years_are_twentieth_century() {
        assert_eq!(parse_date("1/2/99"), Some(ymd(1999, 1, 2)));
    }

    #[test]
    fn test_iso_date_is_read_as_month_day_year() {
        // m=2021 d=3 y=05: 1905 plus 2020 months lands in May 2073.
        assert_eq!(parse_date("2021-03-05"), Some(ymd(2073, 5, 3)));
    }

    #[test]
    fn test_invalid_three_part_dates() {
        assert_eq!(parse_date("aa/bb/cc"), None);
        assert_eq!(parse_date("2021-03-05T10:00:00Z"), None);
    }

    #[test]
    fn test_general_fallback() {
        assert_eq!(parse_date("March 5, 2021"), Some(ymd(2021, 3, 5)));
        assert_eq!(parse_date("5 Mar 2021"), Some(ymd(2021, 3, 5)));
        assert_eq!(
            parse_date("Fri, 05 Mar 2021 00:00:00 +0000"),
            Some(ymd(2021, 3, 5))
        );
        assert_eq!(
            parse_date("2021-03-05T10:00:00-05:00"),
            Some(ymd(2021, 3, 5) + 15 * 3_600_000)
        );
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_month_and_year_without_day() {
        assert_eq!(parse_date("March 2021"), Some(ymd(2021, 3, 1)));
        assert_eq!(parse_date("Sep 2019"), Some(ymd(2019, 9, 1)));
    }

    #[test]
    fn test_iso_year_and_year_month() {
        assert_eq!(parse_date("2021"), Some(ymd(2021, 1, 1)));
        assert_eq!(parse_date("2021-03"), Some(ymd(2021, 3, 1)));
        assert_eq!(parse_date("2021-13"), None);
    }

    #[test]
    fn test_short_year_is_rejected() {
        assert_eq!(parse_date("March 5 21"), None);
        assert_eq!(parse_date("March 5, 21"), None);
        assert_eq!(parse_date("March 5 2021"), Some(ymd(2021, 3, 5)));
    }
}
