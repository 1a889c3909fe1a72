//! Geographic dataset for the country map.

use crate::data::{columns, Record};
use crate::stats::{Bucket, StatsCalculator};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// Source label → canonical map name. `None` keeps the label off the map.
static MAP_NAME_FIXES: Lazy<HashMap<&'static str, Option<&'static str>>> = Lazy::new(|| {
    HashMap::from([
        ("Cote d'Ivoire", Some("Ivory Coast")),
        ("Congo, Republic of", Some("Republic of the Congo")),
        ("Congo, Democratic Republic of", Some("Democratic Republic of the Congo")),
        ("Viet Nam", Some("Vietnam")),
        ("West Bank and Gaza", Some("Palestine")),
        ("Yemen, Republic of", Some("Yemen")),
        ("Tanzania - Mainland", Some("Tanzania")),
        ("Tanzania - Zanzibar", Some("Tanzania")),
        ("Pakistan - Balochistan", Some("Pakistan")),
        ("Global", None),
    ])
});

/// Result of looking a label up in the fix table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapName<'a> {
    Renamed(&'static str),
    Excluded,
    Unchanged(&'a str),
}

impl<'a> MapName<'a> {
    pub fn lookup(label: &'a str) -> Self {
        match MAP_NAME_FIXES.get(label) {
            Some(Some(fixed)) => MapName::Renamed(*fixed),
            Some(None) => MapName::Excluded,
            None if label.is_empty() => MapName::Excluded,
            None => MapName::Unchanged(label),
        }
    }

    pub fn name(&self) -> Option<&'a str> {
        match *self {
            MapName::Renamed(fixed) => Some(fixed),
            MapName::Unchanged(label) => Some(label),
            MapName::Excluded => None,
        }
    }
}

/// One plotted country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeoPoint {
    pub country: String,
    pub count: usize,
    /// Label as it appeared in the source.
    pub raw: String,
}

impl GeoPoint {
    /// Hover text, e.g. `Viet Nam: 3`.
    pub fn hover_text(&self) -> String {
        format!("{}: {}", self.raw, self.count)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeoDataset {
    pub title: String,
    pub points: Vec<GeoPoint>,
    pub excluded: Vec<String>,
    /// Line shown under the map.
    pub caption: String,
}

impl GeoDataset {
    /// Build the map dataset from filtered records.
    ///
    /// Renamed labels keep separate points (two Tanzania rows stay two rows),
    /// in bucket order.
    pub fn from_records(records: &[Record], title: String) -> Self {
        let buckets = StatsCalculator::count_by(records, columns::COUNTRY_NAME);
        Self::from_buckets(&buckets, title)
    }

    pub fn from_buckets(buckets: &[Bucket], title: String) -> Self {
        let mut points = Vec::new();
        let mut excluded = Vec::new();
        for bucket in buckets {
            match MapName::lookup(&bucket.label).name() {
                Some(country) => points.push(GeoPoint {
                    country: country.to_string(),
                    count: bucket.count,
                    raw: bucket.label.clone(),
                }),
                None => excluded.push(bucket.label.clone()),
            }
        }

        let caption = if points.is_empty() {
            "No country data available for the map.".to_string()
        } else if excluded.is_empty() {
            String::new()
        } else {
            format!("Excluded from map: {}", excluded.join(", "))
        };

        Self {
            title,
            points,
            excluded,
            caption,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(label: &str, count: usize) -> Bucket {
        Bucket {
            label: label.to_string(),
            count,
        }
    }

    #[test]
    fn test_lookup_is_tri_state() {
        assert_eq!(MapName::lookup("Viet Nam"), MapName::Renamed("Vietnam"));
        assert_eq!(MapName::lookup("Global"), MapName::Excluded);
        assert_eq!(MapName::lookup("Chad"), MapName::Unchanged("Chad"));
        assert_eq!(MapName::lookup("Chad").name(), Some("Chad"));
    }

    #[test]
    fn test_dataset_renames_and_excludes() {
        let buckets = vec![
            bucket("Global", 4),
            bucket("Tanzania - Mainland", 2),
            bucket("Chad", 1),
            bucket("Tanzania - Zanzibar", 1),
        ];
        let geo = GeoDataset::from_buckets(&buckets, "map".into());
        let countries: Vec<&str> = geo.points.iter().map(|p| p.country.as_str()).collect();
        assert_eq!(countries, vec!["Tanzania", "Chad", "Tanzania"]);
        assert_eq!(geo.points[0].hover_text(), "Tanzania - Mainland: 2");
        assert_eq!(geo.excluded, vec!["Global".to_string()]);
        assert_eq!(geo.caption, "Excluded from map: Global");
    }

    #[test]
    fn test_empty_map_caption() {
        let geo = GeoDataset::from_buckets(&[bucket("Global", 3)], String::new());
        assert!(geo.is_empty());
        assert_eq!(geo.caption, "No country data available for the map.");
        let geo = GeoDataset::from_buckets(&[bucket("Chad", 3)], String::new());
        assert_eq!(geo.caption, "");
    }
}
