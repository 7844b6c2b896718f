use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::OrsConfig;

const USER_AGENT: &str = "hoodscout/0.1.0 (https://github.com/shantanugoel/hoodscout)";
const ACCEPT: &str = "application/json, application/geo+json, application/gpx+xml, img/png; charset=utf-8";

/// Body of an OpenRouteService POI search.
#[derive(Debug, Serialize)]
pub struct PoiRequest {
    request: &'static str,
    geometry: RequestGeometry,
}

#[derive(Debug, Serialize)]
struct RequestGeometry {
    bbox: [[f64; 2]; 2],
    geojson: PointGeometry,
    buffer: u32,
}

#[derive(Debug, Serialize)]
struct PointGeometry {
    #[serde(rename = "type")]
    type_: &'static str,
    coordinates: [f64; 2],
}

impl PoiRequest {
    /// Bounding-box search rectangle from an origin and two step deltas.
    ///
    /// The origin arrives as (lat, lon) and is swapped into the lon/lat order
    /// ORS expects; the far corner adds the deltas to the swapped origin.
    pub fn new(origin: (f64, f64), step_lat: f64, step_lon: f64) -> Self {
        let (lat, lon) = origin;
        let near_corner = [lon, lat];
        let far_corner = [lon + step_lon, lat + step_lat];

        PoiRequest {
            request: "pois",
            geometry: RequestGeometry {
                bbox: [near_corner, far_corner],
                geojson: PointGeometry {
                    type_: "Point",
                    coordinates: near_corner,
                },
                buffer: 200,
            },
        }
    }
}

/// GeoJSON-shaped OpenRouteService response.
///
/// Fields a feature may legitimately lack are Options; the parser skips such
/// features instead of failing the pipeline.
#[derive(Debug, Deserialize)]
pub struct OrsResponse {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Properties {
    #[serde(default)]
    pub osm_tags: Option<OsmTags>,
    #[serde(default)]
    pub category_ids: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OsmTags {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    /// (lon, lat)
    pub coordinates: (f64, f64),
}

/// Search OpenRouteService for POIs within the rectangle spanned by the
/// origin and the step deltas.
///
/// Requires an API key (`Authorization` header). Single attempt; transport
/// errors and non-success statuses are returned as errors.
pub fn fetch_pois(
    origin: (f64, f64),
    step_lat: f64,
    step_lon: f64,
    api_key: &str,
    config: &OrsConfig,
) -> Result<OrsResponse> {
    let body = PoiRequest::new(origin, step_lat, step_lon);

    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("Failed to create HTTP client")?;

    let response = client
        .post(&config.url)
        .header("Accept", ACCEPT)
        .header("Authorization", api_key)
        .json(&body)
        .send()
        .context("Failed to send request to OpenRouteService")?;

    if !response.status().is_success() {
        bail!(
            "OpenRouteService returned error status: {}",
            response.status()
        );
    }

    response
        .json()
        .context("Failed to parse OpenRouteService JSON response")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let request = PoiRequest::new((55.748, 48.746), 0.02, 0.03);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["request"], json!("pois"));
        assert_eq!(body["geometry"]["buffer"], json!(200));
        assert_eq!(
            body["geometry"]["geojson"],
            json!({"type": "Point", "coordinates": [48.746, 55.748]})
        );

        // origin swapped to lon/lat, far corner offset by the steps
        let bbox = &body["geometry"]["bbox"];
        assert_eq!(bbox[0], json!([48.746, 55.748]));
        assert!((bbox[1][0].as_f64().unwrap() - 48.776).abs() < 1e-9);
        assert!((bbox[1][1].as_f64().unwrap() - 55.768).abs() < 1e-9);
    }

    #[test]
    fn test_parse_ors_response() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [48.75, 55.75]},
                    "properties": {
                        "osm_id": 123,
                        "osm_tags": {"name": "Central Market"},
                        "category_ids": {"518": {"category_name": "marketplace", "category_group": "shops"}}
                    }
                },
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [48.76, 55.76]},
                    "properties": {"osm_id": 456}
                }
            ]
        }"#;

        let response: OrsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.features.len(), 2);

        let first = &response.features[0];
        assert_eq!(
            first.properties.osm_tags.as_ref().unwrap().name.as_deref(),
            Some("Central Market")
        );
        assert_eq!(first.geometry.as_ref().unwrap().coordinates, (48.75, 55.75));
        assert!(first.properties.category_ids.is_some());

        let second = &response.features[1];
        assert!(second.properties.osm_tags.is_none());
        assert!(second.properties.category_ids.is_none());
    }
}
