use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::config::OverpassConfig;

const USER_AGENT: &str = "hoodscout/0.1.0 (https://github.com/shantanugoel/hoodscout)";

/// Tag keys requested from Overpass. A superset of the recognized
/// classification keys; nodes matched through the extra keys still classify
/// through whatever recognized tags they carry.
pub const QUERY_KEYS: [&str; 20] = [
    "amenity",
    "shop",
    "tourism",
    "building",
    "club",
    "education",
    "highway",
    "landcover",
    "historic",
    "landuse",
    "leisure",
    "man_made",
    "natural",
    "office",
    "place",
    "public_transport",
    "waterway",
    "attraction",
    "playground",
    "healthcare",
];

/// Raw Overpass API response
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    pub elements: Vec<Element>,
}

/// A single element from Overpass (node or way)
#[derive(Debug, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub type_: String,
    pub id: u64,
    #[serde(default)]
    pub nodes: Option<Vec<u64>>,
    #[serde(default)]
    pub tags: Option<HashMap<String, String>>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

/// Build the Overpass QL query requesting tagged nodes around a point.
///
/// # Arguments
/// * `center` - (lat, lon) center point
/// * `radius_m` - Radius in meters
pub fn build_query(center: (f64, f64), radius_m: u32) -> String {
    let (lat, lon) = center;

    let mut query = String::from("[out:json];\n(\n");
    for key in QUERY_KEYS {
        query.push_str(&format!(
            "  node[\"{key}\"](around:{radius_m},{lat},{lon});\n"
        ));
    }
    query.push_str(");\nout body;\n>;\nout skel qt;");
    query
}

/// Fetch POI nodes around a point from the Overpass API.
///
/// Single attempt, no retries; the query travels in the `data` query-string
/// parameter of a GET request. Transport errors and non-200 statuses are
/// returned to the caller as errors.
pub fn fetch_pois(
    center: (f64, f64),
    radius_m: u32,
    config: &OverpassConfig,
) -> Result<OverpassResponse> {
    let query = build_query(center, radius_m);

    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("Failed to create HTTP client")?;

    let response = client
        .get(&config.url)
        .query(&[("data", query.as_str())])
        .send()
        .context("Failed to send request to Overpass API")?;

    let status = response.status();
    if status.as_u16() != 200 {
        bail!("Overpass API returned error status: {}", status);
    }

    response
        .json()
        .context("Failed to parse Overpass JSON response")
}
