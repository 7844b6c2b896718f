//! The two collection pipelines. Each performs exactly one blocking request,
//! then hands the payload to the parser; they share no state beyond the
//! read-only category table.

use anyhow::Result;

use crate::api;
use crate::classify::CategoryTable;
use crate::config::{self, OrsConfig, OverpassConfig};
use crate::domain::{ClassifiedPoi, ProviderPoi};
use crate::osm;

/// Overpass pipeline: query POIs within a radius of a point and classify
/// them locally.
///
/// Transport failures and non-200 statuses are not fatal: a diagnostic is
/// printed and an empty result returned.
pub fn overpass_nearby(
    center: (f64, f64),
    radius_m: u32,
    table: &CategoryTable,
    config: &OverpassConfig,
) -> Vec<ClassifiedPoi> {
    match api::overpass::fetch_pois(center, radius_m, config) {
        Ok(response) => osm::parse_overpass_pois(&response, table),
        Err(e) => {
            eprintln!("Error during Overpass query: {e:#}");
            Vec::new()
        }
    }
}

/// ORS pipeline: bounding-box POI search with provider-assigned categories
/// passed through verbatim.
///
/// The API key comes from the configured secret file; a missing key or a
/// failed request aborts this call with an error.
pub fn ors_nearby(
    origin: (f64, f64),
    step_lat: f64,
    step_lon: f64,
    config: &OrsConfig,
) -> Result<Vec<ProviderPoi>> {
    let key = config::read_ors_api_key(&config.key_file)?;
    let response = api::ors::fetch_pois(origin, step_lat, step_lon, &key, config)?;
    Ok(osm::parse_ors_pois(&response))
}
