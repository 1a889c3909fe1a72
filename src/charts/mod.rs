//! Charts module - Map dataset preparation

mod geo;

pub use geo::{GeoDataset, GeoPoint, MapName};
