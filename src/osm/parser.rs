use crate::api::ors::OrsResponse;
use crate::api::overpass::OverpassResponse;
use crate::classify::CategoryTable;
use crate::domain::{ClassifiedPoi, ProviderPoi};

/// Parse an Overpass response into classified POIs.
///
/// # Algorithm
/// 1. Keep `node` elements that carry coordinates and tags
/// 2. Classify each element's tag set against the category table
/// 3. Drop elements whose category set comes back empty
pub fn parse_overpass_pois(
    response: &OverpassResponse,
    table: &CategoryTable,
) -> Vec<ClassifiedPoi> {
    let mut pois = Vec::new();

    for element in &response.elements {
        if element.type_ != "node" {
            continue;
        }

        let (lat, lon) = match (element.lat, element.lon) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => continue,
        };

        let tags = match &element.tags {
            Some(t) => t,
            None => continue,
        };

        if let Some(poi) = table.classify_poi(tags, (lat, lon)) {
            pois.push(poi);
        }
    }

    pois
}

/// Parse an ORS response into provider-categorized POIs.
///
/// Features missing any of name, category ids, or coordinates are skipped;
/// the rest pass the provider's categories through untouched.
pub fn parse_ors_pois(response: &OrsResponse) -> Vec<ProviderPoi> {
    let mut pois = Vec::new();

    for feature in &response.features {
        let name = match feature
            .properties
            .osm_tags
            .as_ref()
            .and_then(|tags| tags.name.clone())
        {
            Some(name) => name,
            None => continue,
        };

        let categories = match &feature.properties.category_ids {
            Some(categories) => categories.clone(),
            None => continue,
        };

        let coordinates = match &feature.geometry {
            Some(geometry) => geometry.coordinates,
            None => continue,
        };

        pois.push(ProviderPoi::new(name, coordinates, categories));
    }

    pois
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::overpass::Element;
    use crate::domain::Category;
    use std::collections::HashMap;

    fn tag_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn node(id: u64, lat: f64, lon: f64, tags: Option<HashMap<String, String>>) -> Element {
        Element {
            type_: "node".to_string(),
            id,
            nodes: None,
            tags,
            lat: Some(lat),
            lon: Some(lon),
        }
    }

    #[test]
    fn test_parse_overpass_pois() {
        let response = OverpassResponse {
            elements: vec![
                node(
                    1,
                    55.74,
                    48.74,
                    Some(tag_map(&[("amenity", "cafe"), ("name", "Coffee Corner")])),
                ),
                // way elements never classify
                Element {
                    type_: "way".to_string(),
                    id: 2,
                    nodes: Some(vec![1, 3]),
                    tags: Some(tag_map(&[("leisure", "park")])),
                    lat: None,
                    lon: None,
                },
                // tagless node
                node(3, 55.75, 48.75, None),
                // tagged but nothing maps
                node(4, 55.76, 48.76, Some(tag_map(&[("highway", "bus_stop")]))),
            ],
        };

        let pois = parse_overpass_pois(&response, CategoryTable::builtin());
        assert_eq!(pois.len(), 1);
        assert_eq!(pois[0].name, "Coffee Corner");
        assert_eq!(pois[0].coordinates, (55.74, 48.74));
        assert_eq!(pois[0].categories, "amenity:cafe");
        assert!(pois[0].custom.contains(&Category::CafeStreet));
    }

    #[test]
    fn test_parse_ors_pois_skips_incomplete_features() {
        let json = r#"{
            "features": [
                {
                    "geometry": {"type": "Point", "coordinates": [48.75, 55.75]},
                    "properties": {
                        "osm_tags": {"name": "Central Market"},
                        "category_ids": {"518": {"category_name": "marketplace"}}
                    }
                },
                {
                    "geometry": {"type": "Point", "coordinates": [48.76, 55.76]},
                    "properties": {"category_ids": {"518": {}}}
                },
                {
                    "geometry": {"type": "Point", "coordinates": [48.77, 55.77]},
                    "properties": {"osm_tags": {"name": "No categories"}}
                },
                {
                    "properties": {
                        "osm_tags": {"name": "No geometry"},
                        "category_ids": {"518": {}}
                    }
                }
            ]
        }"#;

        let response: OrsResponse = serde_json::from_str(json).unwrap();
        let pois = parse_ors_pois(&response);

        assert_eq!(pois.len(), 1);
        assert_eq!(pois[0].name, "Central Market");
        assert_eq!(pois[0].coordinates, (48.75, 55.75));
        assert_eq!(pois[0].categories["518"]["category_name"], "marketplace");
    }
}
