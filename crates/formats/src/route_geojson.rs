use foundation::Coordinate;
use serde_json::Value;

use crate::geojson::{as_array, as_object, coordinates, position, type_name};

#[derive(Debug)]
pub enum RouteGeoJsonError {
    Json { reason: String },
    NoLineString,
    InvalidGeometry { reason: String },
}

impl std::fmt::Display for RouteGeoJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteGeoJsonError::Json { reason } => write!(f, "JSON parse error: {reason}"),
            RouteGeoJsonError::NoLineString => {
                write!(f, "expected a LineString or MultiLineString route geometry")
            }
            RouteGeoJsonError::InvalidGeometry { reason } => {
                write!(f, "invalid route geometry: {reason}")
            }
        }
    }
}

impl std::error::Error for RouteGeoJsonError {}

/// Read a route polyline from GeoJSON text.
///
/// Accepts a bare geometry, a `Feature`, or a `FeatureCollection` (first line
/// feature wins). `MultiLineString` legs are joined in order.
pub fn route_from_geojson_str(payload: &str) -> Result<Vec<Coordinate>, RouteGeoJsonError> {
    let value: Value = serde_json::from_str(payload).map_err(|e| RouteGeoJsonError::Json {
        reason: e.to_string(),
    })?;
    route_from_geojson_value(&value)
}

pub fn route_from_geojson_value(value: &Value) -> Result<Vec<Coordinate>, RouteGeoJsonError> {
    let invalid = |reason: String| RouteGeoJsonError::InvalidGeometry { reason };
    let obj = as_object(value, "route").map_err(invalid)?;
    let ty = type_name(obj, "route").map_err(invalid)?;

    match ty {
        "FeatureCollection" => {
            let features = obj
                .get("features")
                .and_then(|v| v.as_array())
                .ok_or_else(|| invalid("FeatureCollection missing features".to_string()))?;
            for feature in features {
                match route_from_geojson_value(feature) {
                    Err(RouteGeoJsonError::NoLineString) => continue,
                    other => return other,
                }
            }
            Err(RouteGeoJsonError::NoLineString)
        }
        "Feature" => match obj.get("geometry") {
            Some(Value::Null) | None => Err(RouteGeoJsonError::NoLineString),
            Some(geometry) => route_from_geojson_value(geometry),
        },
        "LineString" => line_coords(coordinates(obj).map_err(invalid)?).map_err(invalid),
        "MultiLineString" => {
            let coords = coordinates(obj).map_err(invalid)?;
            let lines = as_array(coords, "MultiLineString coordinates").map_err(invalid)?;
            let mut out = Vec::new();
            for line in lines {
                out.extend(line_coords(line).map_err(invalid)?);
            }
            Ok(out)
        }
        _ => Err(RouteGeoJsonError::NoLineString),
    }
}

fn line_coords(value: &Value) -> Result<Vec<Coordinate>, String> {
    let arr = as_array(value, "LineString coordinates")?;
    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        out.push(position(item)?.0);
    }
    Ok(out)
}
