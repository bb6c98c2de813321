use route_index::DistanceMarker;
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, Serialize)]
struct MarkerProperties {
    distance_m: f64,
    label: String,
}

/// Markers as a GeoJSON `FeatureCollection` of points for the overlay layer.
pub fn markers_to_geojson_value(markers: &[DistanceMarker]) -> Value {
    let features: Vec<Value> = markers
        .iter()
        .map(|m| {
            let properties = MarkerProperties {
                distance_m: m.distance_m,
                label: m.label(),
            };
            json!({
                "type": "Feature",
                "properties": properties,
                "geometry": {
                    "type": "Point",
                    "coordinates": [m.position.lon_deg, m.position.lat_deg],
                },
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

pub fn markers_to_geojson_string(markers: &[DistanceMarker]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&markers_to_geojson_value(markers))
}

pub fn markers_to_geojson_string_pretty(
    markers: &[DistanceMarker],
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&markers_to_geojson_value(markers))
}
