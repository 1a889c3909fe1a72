//! Statistics Calculator Module
//! Group counts and summary totals over filtered grant records.

use crate::data::{columns, DataProcessor, Record};
use crate::normalize::{parse_amount, Role};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Label substituted for empty or missing group values.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// One aggregation row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub count: usize,
}

/// Counts and totals shown above the tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub active: usize,
    pub closed: usize,
    pub other: usize,
    pub solo: usize,
    pub shared: usize,
    pub amount: f64,
}

/// Stateless aggregation helpers.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Count records per trimmed `key` value.
    ///
    /// Sorted by count descending, then label ascending.
    pub fn count_by(records: &[Record], key: &str) -> Vec<Bucket> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in records {
            let value = record.field(key).trim();
            let label = if value.is_empty() { UNKNOWN_LABEL } else { value };
            *counts.entry(label).or_insert(0) += 1;
        }

        let mut buckets: Vec<Bucket> = counts
            .into_iter()
            .map(|(label, count)| Bucket {
                label: label.to_string(),
                count,
            })
            .collect();
        buckets.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| locale_cmp(&a.label, &b.label))
        });
        buckets
    }

    /// Sum of parsed `Grant amount` values.
    pub fn total_amount(records: &[Record]) -> f64 {
        records
            .iter()
            .map(|r| parse_amount(r.field(columns::GRANT_AMOUNT)))
            .sum()
    }

    /// Status and role breakdown over already status-filtered records.
    pub fn status_counts(processor: &DataProcessor, records: &[Record]) -> StatusCounts {
        let status_is = |record: &Record, status: &str| {
            record.field(columns::GRANT_STATUS).trim().to_lowercase() == status
        };
        let active = records.iter().filter(|r| status_is(r, "active")).count();
        let closed = records.iter().filter(|r| status_is(r, "closed")).count();

        let mut solo = 0;
        let mut shared = 0;
        for record in records {
            match processor.role_of(record) {
                Some(Role::Solo) => solo += 1,
                Some(Role::Shared) => shared += 1,
                None => {}
            }
        }

        StatusCounts {
            total: records.len(),
            active,
            closed,
            other: records.len().saturating_sub(active + closed),
            solo,
            shared,
            amount: Self::total_amount(records),
        }
    }
}

/// Label order: base letters first, ignoring accents and case. Ties break on
/// the unaccented form first, then lower case before upper case.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let (a_lower, b_lower) = (a.to_lowercase(), b.to_lowercase());
    fold_accents(&a_lower)
        .cmp(&fold_accents(&b_lower))
        .then_with(|| a_lower.nfd().cmp(b_lower.nfd()))
        .then_with(|| b.cmp(a))
}

/// Decompose and drop combining marks, so `é` compares as `e`.
fn fold_accents(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(country: &str) -> Record {
        [(columns::COUNTRY_NAME, country)].into_iter().collect()
    }

    #[test]
    fn test_count_by_orders_by_count_then_label() {
        let records = vec![
            rec("Chad"),
            rec("nepal"),
            rec("Benin"),
            rec("Chad"),
            rec(" "),
            rec("Benin"),
            rec("Angola"),
        ];
        let buckets = StatsCalculator::count_by(&records, columns::COUNTRY_NAME);
        let pairs: Vec<(&str, usize)> = buckets
            .iter()
            .map(|b| (b.label.as_str(), b.count))
            .collect();
        assert_eq!(
            pairs,
            vec![("Benin", 2), ("Chad", 2), ("Angola", 1), ("nepal", 1), ("Unknown", 1)]
        );
        let total: usize = buckets.iter().map(|b| b.count).sum();
        assert_eq!(total, records.len());
    }

    #[test]
    fn test_missing_field_counts_as_unknown() {
        let records = vec![Record::default(), rec("Chad")];
        let buckets = StatsCalculator::count_by(&records, "Region");
        assert_eq!(
            buckets,
            vec![Bucket {
                label: "Unknown".into(),
                count: 2
            }]
        );
    }

    #[test]
    fn test_values_are_trimmed_before_grouping() {
        let records = vec![rec(" Chad"), rec("Chad ")];
        let buckets = StatsCalculator::count_by(&records, columns::COUNTRY_NAME);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].count, 2);
    }

    #[test]
    fn test_locale_cmp() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_accented_labels_sort_with_their_base_letter() {
        let records = vec![
            rec("Senegal"),
            rec("Cuba"),
            rec("São Tomé and Príncipe"),
            rec("Côte d'Ivoire"),
        ];
        let labels: Vec<String> = StatsCalculator::count_by(&records, columns::COUNTRY_NAME)
            .into_iter()
            .map(|b| b.label)
            .collect();
        assert_eq!(
            labels,
            vec!["Côte d'Ivoire", "Cuba", "São Tomé and Príncipe", "Senegal"]
        );
        assert_eq!(locale_cmp("e", "é"), Ordering::Less);
        assert_eq!(locale_cmp("é", "f"), Ordering::Less);
    }

    #[test]
    fn test_status_counts() {
        let grant = |status: &str, agent: &str, amount: &str| -> Record {
            [
                (columns::GRANT_STATUS, status),
                (columns::GRANT_AGENT, agent),
                (columns::GRANT_AMOUNT, amount),
            ]
            .into_iter()
            .collect()
        };
        let records = vec![
            grant("Active", "UNESCO", "1,000"),
            grant("closed ", "UNESCO, UNDP", "2.500"),
            grant("Pipeline", "UNESCO", "n/a"),
        ];
        let counts = StatsCalculator::status_counts(&DataProcessor::default(), &records);
        assert_eq!(counts.total, 3);
        assert_eq!(counts.active, 1);
        assert_eq!(counts.closed, 1);
        assert_eq!(counts.other, 1);
        assert_eq!(counts.solo, 2);
        assert_eq!(counts.shared, 1);
        assert_eq!(counts.amount, 3500.0);
    }
}
