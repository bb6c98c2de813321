//! Small helpers shared by the GeoJSON readers.

use foundation::Coordinate;
use serde_json::{Map, Value};

pub(crate) fn as_object<'a>(
    value: &'a Value,
    what: &str,
) -> Result<&'a Map<String, Value>, String> {
    value
        .as_object()
        .ok_or_else(|| format!("{what} must be an object"))
}

pub(crate) fn type_name<'a>(obj: &'a Map<String, Value>, what: &str) -> Result<&'a str, String> {
    obj.get("type")
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("{what} missing type"))
}

pub(crate) fn coordinates<'a>(obj: &'a Map<String, Value>) -> Result<&'a Value, String> {
    obj.get("coordinates")
        .ok_or("geometry missing coordinates".to_string())
}

pub(crate) fn as_array<'a>(value: &'a Value, what: &str) -> Result<&'a Vec<Value>, String> {
    value
        .as_array()
        .ok_or_else(|| format!("{what} must be an array"))
}

/// Leading `[lon, lat]` of a position plus its raw components.
pub(crate) fn position(value: &Value) -> Result<(Coordinate, &[Value]), String> {
    let arr = as_array(value, "position")?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0]
        .as_f64()
        .ok_or("position lon must be a number".to_string())?;
    let lat = arr[1]
        .as_f64()
        .ok_or("position lat must be a number".to_string())?;
    Ok((Coordinate::new(lat, lon), arr.as_slice()))
}
