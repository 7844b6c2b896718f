use serde::Serialize;
use std::collections::BTreeSet;

use crate::domain::Category;

/// A POI classified from its OSM tags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedPoi {
    pub name: String,
    /// (lat, lon) as received from Overpass
    pub coordinates: (f64, f64),
    /// Raw `key:value` of the last recognized tag key present on the feature
    pub categories: String,
    /// Deduplicated category labels
    pub custom: BTreeSet<Category>,
}

impl ClassifiedPoi {
    pub fn new(
        name: String,
        coordinates: (f64, f64),
        categories: String,
        custom: BTreeSet<Category>,
    ) -> Self {
        Self {
            name,
            coordinates,
            categories,
            custom,
        }
    }
}

/// A POI with categories already assigned by the provider (ORS).
///
/// No local classification is applied; `categories` is the provider's
/// `category_ids` payload passed through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderPoi {
    pub name: String,
    /// (lon, lat) as the provider sends point coordinates
    pub coordinates: (f64, f64),
    pub categories: serde_json::Value,
}

impl ProviderPoi {
    pub fn new(name: String, coordinates: (f64, f64), categories: serde_json::Value) -> Self {
        Self {
            name,
            coordinates,
            categories,
        }
    }
}
