//! Elevation profile features as produced by the routing engine.
//!
//! Positions carry extra trailing components after `[lon, lat]`:
//! `[lon, lat, distance]` or `[lon, lat, elevation, distance]`. The cumulative
//! distance is always the last component once there are three or more.

use route_index::{ProfileGeometry, ProfileVertex};
use serde_json::Value;
use tracing::trace;

use crate::geojson::{as_array, as_object, coordinates, position, type_name};

#[derive(Debug)]
pub enum ProfileGeoJsonError {
    Json { reason: String },
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for ProfileGeoJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileGeoJsonError::Json { reason } => write!(f, "JSON parse error: {reason}"),
            ProfileGeoJsonError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            ProfileGeoJsonError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for ProfileGeoJsonError {}

pub fn profile_from_geojson_str(
    payload: &str,
) -> Result<Vec<ProfileGeometry>, ProfileGeoJsonError> {
    let value: Value = serde_json::from_str(payload).map_err(|e| ProfileGeoJsonError::Json {
        reason: e.to_string(),
    })?;
    profile_from_geojson_value(&value)
}

/// Parse every feature geometry of a profile `FeatureCollection`.
///
/// Features with a `null` geometry are dropped.
pub fn profile_from_geojson_value(
    value: &Value,
) -> Result<Vec<ProfileGeometry>, ProfileGeoJsonError> {
    let obj = value
        .as_object()
        .ok_or(ProfileGeoJsonError::NotAFeatureCollection)?;
    if obj.get("type").and_then(|v| v.as_str()) != Some("FeatureCollection") {
        return Err(ProfileGeoJsonError::NotAFeatureCollection);
    }
    let features = obj
        .get("features")
        .and_then(|v| v.as_array())
        .ok_or(ProfileGeoJsonError::NotAFeatureCollection)?;

    let mut out = Vec::with_capacity(features.len());
    for (index, feature) in features.iter().enumerate() {
        let invalid = |reason: String| ProfileGeoJsonError::InvalidFeature { index, reason };
        let feat_obj = as_object(feature, "feature").map_err(invalid)?;
        let feat_type = type_name(feat_obj, "feature").map_err(invalid)?;
        if feat_type != "Feature" {
            return Err(invalid(format!("unexpected feature type: {feat_type}")));
        }
        match feat_obj.get("geometry") {
            Some(Value::Null) => trace!(index, "profile feature without geometry"),
            Some(geometry) => out.push(parse_geometry(geometry).map_err(invalid)?),
            None => return Err(invalid("feature missing geometry".to_string())),
        }
    }
    Ok(out)
}

fn parse_geometry(value: &Value) -> Result<ProfileGeometry, String> {
    let obj = as_object(value, "geometry")?;
    let ty = type_name(obj, "geometry")?;
    let coords = coordinates(obj)?;

    match ty {
        "Point" => Ok(ProfileGeometry::Point(parse_vertex(coords)?)),
        "MultiPoint" => Ok(ProfileGeometry::MultiPoint(parse_vertices(coords)?)),
        "LineString" => Ok(ProfileGeometry::LineString(parse_vertices(coords)?)),
        "MultiLineString" => Ok(ProfileGeometry::MultiLineString(parse_nested(coords)?)),
        "Polygon" => Ok(ProfileGeometry::Polygon(parse_nested(coords)?)),
        "MultiPolygon" => {
            let polys = as_array(coords, "MultiPolygon coordinates")?;
            let mut out = Vec::with_capacity(polys.len());
            for poly in polys {
                out.push(parse_nested(poly)?);
            }
            Ok(ProfileGeometry::MultiPolygon(out))
        }
        other => Err(format!("unsupported geometry type: {other}")),
    }
}

fn parse_vertex(value: &Value) -> Result<ProfileVertex, String> {
    let (coordinate, parts) = position(value)?;
    let (elevation_m, distance_m) = match parts.len() {
        0..=2 => (None, None),
        3 => (None, parts[2].as_f64()),
        n => (parts[2].as_f64(), parts[n - 1].as_f64()),
    };
    Ok(ProfileVertex::new(coordinate, elevation_m, distance_m))
}

fn parse_vertices(value: &Value) -> Result<Vec<ProfileVertex>, String> {
    let arr = as_array(value, "coordinates")?;
    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        out.push(parse_vertex(item)?);
    }
    Ok(out)
}

fn parse_nested(value: &Value) -> Result<Vec<Vec<ProfileVertex>>, String> {
    let arr = as_array(value, "coordinates")?;
    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        out.push(parse_vertices(item)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{ProfileGeoJsonError, profile_from_geojson_str};
    use foundation::Coordinate;
    use pretty_assertions::assert_eq;
    use route_index::{GeometryKind, ProfileVertex, find_nearest_by_distance};

    const PROFILE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"name": "start"},
             "geometry": {"type": "Point", "coordinates": [8.0, 47.0, 400.0, 0.0]}},
            {"type": "Feature", "properties": {},
             "geometry": {"type": "LineString", "coordinates": [
                [8.00, 47.00, 400.0, 0.0],
                [8.01, 47.00, 410.0, 760.0],
                [8.02, 47.00, null, 1520.0],
                [8.03, 47.00, 430.0]
             ]}},
            {"type": "Feature", "properties": {}, "geometry": null},
            {"type": "Feature", "properties": {},
             "geometry": {"type": "LineString", "coordinates": [
                [9.00, 46.00, 0.0],
                [9.01, 46.00],
                [9.02, 46.00, 500.0]
             ]}}
        ]
    }"#;

    #[test]
    fn parses_vertices_with_trailing_distance() {
        let features = profile_from_geojson_str(PROFILE).unwrap();
        assert_eq!(features.len(), 3);
        assert_eq!(features[0].kind(), GeometryKind::Point);

        let line = features[1].line_vertices().unwrap();
        assert_eq!(
            line[1],
            ProfileVertex::new(Coordinate::new(47.0, 8.01), Some(410.0), Some(760.0))
        );
        assert_eq!(line[2].elevation_m, None);
        assert_eq!(line[2].distance_m, Some(1520.0));
        // Three components: the last one is the distance.
        assert_eq!(line[3].distance_m, Some(430.0));
        assert_eq!(line[3].elevation_m, None);

        let second = features[2].line_vertices().unwrap();
        assert_eq!(second[1].distance_m, None);
    }

    #[test]
    fn hover_lookup_over_parsed_profile() {
        let features = profile_from_geojson_str(PROFILE).unwrap();
        assert_eq!(
            find_nearest_by_distance(Some(700.0), &features),
            Some(Coordinate::new(47.0, 8.01))
        );
        // Both lines share one search space.
        assert_eq!(
            find_nearest_by_distance(Some(480.0), &features),
            Some(Coordinate::new(46.0, 9.02))
        );
    }

    #[test]
    fn rejects_non_collections_and_unknown_geometries() {
        assert!(matches!(
            profile_from_geojson_str(r#"{"type":"Feature"}"#),
            Err(ProfileGeoJsonError::NotAFeatureCollection)
        ));
        let payload = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","geometry":{"type":"Circle","coordinates":[0,0]}}]}"#;
        let err = profile_from_geojson_str(payload).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid feature at index 0: unsupported geometry type: Circle"
        );
    }
}
