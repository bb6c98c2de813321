//! Nominatim `format=json` responses.

use foundation::Coordinate;
use serde::Deserialize;
use tracing::debug;

use crate::result::{GeocodeError, Place};

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReverseResponse {
    Error { error: String },
    Place(NominatimPlace),
}

pub(crate) fn parse_search(body: &str) -> Result<Vec<Place>, GeocodeError> {
    let raw: Vec<NominatimPlace> =
        serde_json::from_str(body).map_err(|e| GeocodeError::Json(e.to_string()))?;
    raw.into_iter()
        .enumerate()
        .map(|(index, p)| to_place(index, p))
        .collect()
}

/// Nominatim answers a reverse lookup without a hit with `{"error": ...}`.
pub(crate) fn parse_reverse(body: &str) -> Result<Vec<Place>, GeocodeError> {
    let raw: ReverseResponse =
        serde_json::from_str(body).map_err(|e| GeocodeError::Json(e.to_string()))?;
    match raw {
        ReverseResponse::Error { error } => {
            debug!(%error, "reverse lookup without a hit");
            Ok(Vec::new())
        }
        ReverseResponse::Place(p) => Ok(vec![to_place(0, p)?]),
    }
}

fn to_place(index: usize, p: NominatimPlace) -> Result<Place, GeocodeError> {
    let parse = |field: &str, v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|x| x.is_finite())
            .ok_or_else(|| GeocodeError::InvalidCoordinate {
                index,
                reason: format!("{field} {v:?} is not a number"),
            })
    };
    let lat = parse("lat", &p.lat)?;
    let lon = parse("lon", &p.lon)?;

    let (head, tail) = match p.display_name.split_once(", ") {
        Some((head, tail)) => (head.to_string(), tail.to_string()),
        None => (p.display_name.clone(), String::new()),
    };
    let (title, description) = match p.name.filter(|n| !n.is_empty()) {
        // Named places keep the full address as description.
        Some(name) if name != head => (name, p.display_name),
        _ => (head, tail),
    };

    Ok(Place {
        title,
        description,
        coordinate: Coordinate::new(lat, lon),
    })
}
