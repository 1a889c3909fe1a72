//! Sort Engine Module
//! Typed, stable sorting of records for the detail table.

use super::records::Record;
use crate::normalize::{parse_amount, parse_date, parse_leading_float};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How a column's raw text is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Amount,
    Date,
    Number,
}

/// Display metadata for one detail column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub label: String,
    pub key: String,
    #[serde(rename = "type")]
    pub kind: ColumnType,
}

impl ColumnSpec {
    pub fn new(label: &str, key: &str, kind: ColumnType) -> Self {
        Self {
            label: label.to_string(),
            key: key.to_string(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Header arrow for the active column.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// Current detail sort: one per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: &str, direction: SortDirection) -> Self {
        Self {
            key: key.to_string(),
            direction,
        }
    }

    /// Same key flips direction; a new key starts ascending.
    pub fn toggle(&mut self, key: &str) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key.to_string();
            self.direction = SortDirection::Asc;
        }
    }
}

impl Default for SortState {
    fn default() -> Self {
        Self::new(super::columns::COUNTRY_NAME, SortDirection::Asc)
    }
}

/// Extracted comparison key. `None` from `extract` means missing.
#[derive(Debug, Clone, PartialEq)]
enum SortValue {
    Text(String),
    Number(f64),
}

impl SortValue {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Number(a), SortValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            _ => Ordering::Equal,
        }
    }
}

fn extract(record: &Record, column: &ColumnSpec) -> Option<SortValue> {
    let raw = record.field(&column.key);
    match column.kind {
        ColumnType::Amount => Some(SortValue::Number(parse_amount(raw))),
        ColumnType::Date => parse_date(raw).map(|ts| SortValue::Number(ts as f64)),
        ColumnType::Number => parse_leading_float(raw)
            .filter(|n| n.is_finite())
            .map(SortValue::Number),
        ColumnType::Text => Some(SortValue::Text(raw.to_lowercase())),
    }
}

/// Return a sorted copy of `records`.
///
/// Missing values always sort last, whatever the direction; ties keep their
/// input order. When `state.key` names no column the first column is used.
pub fn sort_rows(records: &[Record], columns: &[ColumnSpec], state: &SortState) -> Vec<Record> {
    let Some(column) = columns
        .iter()
        .find(|c| c.key == state.key)
        .or_else(|| columns.first())
    else {
        return records.to_vec();
    };

    let mut keyed: Vec<(Option<SortValue>, &Record)> =
        records.iter().map(|r| (extract(r, column), r)).collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ord = a.compare(b);
            match state.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        }
    });

    keyed.into_iter().map(|(_, r)| r.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, amount: &str, date: &str) -> Record {
        [("Name", name), ("Amount", amount), ("Date", date)]
            .into_iter()
            .collect()
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new("Name", "Name", ColumnType::Text),
            ColumnSpec::new("Amount", "Amount", ColumnType::Amount),
            ColumnSpec::new("Date", "Date", ColumnType::Date),
        ]
    }

    fn names(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.field("Name")).collect()
    }

    #[test]
    fn test_text_sort_is_case_insensitive() {
        let records = vec![rec("beta", "", ""), rec("Alpha", "", ""), rec("gamma", "", "")];
        let out = sort_rows(&records, &columns(), &SortState::new("Name", SortDirection::Asc));
        assert_eq!(names(&out), vec!["Alpha", "beta", "gamma"]);
        let out = sort_rows(&records, &columns(), &SortState::new("Name", SortDirection::Desc));
        assert_eq!(names(&out), vec!["gamma", "beta", "Alpha"]);
    }

    #[test]
    fn test_amount_sort_uses_parsed_values() {
        let records = vec![
            rec("a", "$2,000", ""),
            rec("b", "950", ""),
            rec("c", "1.234,56", ""),
        ];
        let out = sort_rows(&records, &columns(), &SortState::new("Amount", SortDirection::Asc));
        assert_eq!(names(&out), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_missing_dates_sort_last_in_both_directions() {
        let records = vec![
            rec("none", "", "n/a"),
            rec("early", "", "01/02/2010"),
            rec("late", "", "12/31/2020"),
        ];
        let asc = sort_rows(&records, &columns(), &SortState::new("Date", SortDirection::Asc));
        assert_eq!(names(&asc), vec!["early", "late", "none"]);
        let desc = sort_rows(&records, &columns(), &SortState::new("Date", SortDirection::Desc));
        assert_eq!(names(&desc), vec!["late", "early", "none"]);
    }

    #[test]
    fn test_two_missing_values_keep_input_order() {
        let records = vec![rec("x", "", ""), rec("y", "", "bad"), rec("z", "", "1/1/2000")];
        let out = sort_rows(&records, &columns(), &SortState::new("Date", SortDirection::Desc));
        assert_eq!(names(&out), vec!["z", "x", "y"]);
    }

    #[test]
    fn test_number_column_treats_unparseable_as_missing() {
        let records = vec![rec("-", "", ""), rec("10", "", ""), rec("9.5x", "", "")];
        let columns = vec![ColumnSpec::new("Rank", "Name", ColumnType::Number)];
        let out = sort_rows(&records, &columns, &SortState::new("Name", SortDirection::Asc));
        assert_eq!(names(&out), vec!["9.5x", "10", "-"]);
    }

    #[test]
    fn test_number_column_reads_exponents() {
        let records = vec![rec("1e5", "", ""), rec("2000", "", ""), rec("3E2", "", "")];
        let columns = vec![ColumnSpec::new("Rank", "Name", ColumnType::Number)];
        let out = sort_rows(&records, &columns, &SortState::new("Name", SortDirection::Asc));
        assert_eq!(names(&out), vec!["3E2", "2000", "1e5"]);
    }

    #[test]
    fn test_equal_keys_are_stable() {
        let records = vec![rec("1", "5", ""), rec("2", "5", ""), rec("3", "1", "")];
        let out = sort_rows(&records, &columns(), &SortState::new("Amount", SortDirection::Desc));
        assert_eq!(names(&out), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_unknown_key_falls_back_to_first_column() {
        let records = vec![rec("b", "", ""), rec("a", "", "")];
        let out = sort_rows(&records, &columns(), &SortState::new("Nope", SortDirection::Asc));
        assert_eq!(names(&out), vec!["a", "b"]);
        assert_eq!(names(&sort_rows(&records, &[], &SortState::default())), vec!["b", "a"]);
    }

    #[test]
    fn test_toggle_flips_then_resets_on_new_key() {
        let mut state = SortState::default();
        state.toggle("Country name");
        assert_eq!(state.direction, SortDirection::Desc);
        state.toggle("Country name");
        assert_eq!(state.direction, SortDirection::Asc);
        state.toggle("Country name");
        state.toggle("Region");
        assert_eq!(state, SortState::new("Region", SortDirection::Asc));
    }

    #[test]
    fn test_sorting_does_not_touch_input() {
        let records = vec![rec("b", "", ""), rec("a", "", "")];
        let _ = sort_rows(&records, &columns(), &SortState::new("Name", SortDirection::Asc));
        assert_eq!(names(&records), vec!["b", "a"]);
    }
}
