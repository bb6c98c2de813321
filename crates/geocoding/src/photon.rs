//! Photon responses: a GeoJSON `FeatureCollection` of points with address
//! parts in the feature properties. Forward and reverse share the format.

use foundation::Coordinate;
use serde::Deserialize;

use crate::result::{GeocodeError, Place};

#[derive(Debug, Deserialize)]
struct PhotonResponse {
    #[serde(default)]
    features: Vec<PhotonFeature>,
}

#[derive(Debug, Deserialize)]
struct PhotonFeature {
    geometry: PhotonGeometry,
    #[serde(default)]
    properties: PhotonProperties,
}

#[derive(Debug, Deserialize)]
struct PhotonGeometry {
    coordinates: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct PhotonProperties {
    name: Option<String>,
    street: Option<String>,
    housenumber: Option<String>,
    postcode: Option<String>,
    city: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

pub(crate) fn parse(body: &str) -> Result<Vec<Place>, GeocodeError> {
    let raw: PhotonResponse =
        serde_json::from_str(body).map_err(|e| GeocodeError::Json(e.to_string()))?;
    raw.features
        .into_iter()
        .enumerate()
        .map(|(index, f)| to_place(index, f))
        .collect()
}

fn to_place(index: usize, f: PhotonFeature) -> Result<Place, GeocodeError> {
    let &[lon, lat, ..] = f.geometry.coordinates.as_slice() else {
        return Err(GeocodeError::InvalidCoordinate {
            index,
            reason: "expected [lon, lat]".to_string(),
        });
    };

    let props = f.properties;
    let street = match (non_empty(props.street), non_empty(props.housenumber)) {
        (Some(s), Some(n)) => Some(format!("{s} {n}")),
        (s, _) => s,
    };
    let locality = match (non_empty(props.postcode), non_empty(props.city)) {
        (Some(p), Some(c)) => Some(format!("{p} {c}")),
        (p, c) => c.or(p),
    };

    let region = non_empty(props.state);
    let country = non_empty(props.country);
    let mut parts: Vec<String> = [street, locality, region, country]
        .into_iter()
        .flatten()
        .collect();
    let title = match non_empty(props.name) {
        Some(name) => name,
        None if !parts.is_empty() => parts.remove(0),
        None => String::new(),
    };

    Ok(Place {
        title,
        description: parts.join(", "),
        coordinate: Coordinate::new(lat, lon),
    })
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::result::GeocodeError;
    use foundation::Coordinate;
    use pretty_assertions::assert_eq;

    #[test]
    fn named_feature_lists_address_parts() {
        let body = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature",
             "geometry": {"type": "Point", "coordinates": [13.3777, 52.5163]},
             "properties": {"name": "Brandenburger Tor", "street": "Pariser Platz",
                            "postcode": "10117", "city": "Berlin", "country": "Deutschland",
                            "osm_key": "tourism"}}
        ]}"#;
        let places = parse(body).unwrap();
        assert_eq!(places[0].title, "Brandenburger Tor");
        assert_eq!(places[0].description, "Pariser Platz, 10117 Berlin, Deutschland");
        assert_eq!(places[0].coordinate, Coordinate::new(52.5163, 13.3777));
    }

    #[test]
    fn unnamed_address_uses_street_as_title() {
        let body = r#"{"features": [
            {"geometry": {"coordinates": [8.54, 47.37]},
             "properties": {"street": "Bahnhofstrasse", "housenumber": "1",
                            "city": "Zürich", "state": "Zürich", "name": ""}}
        ]}"#;
        let places = parse(body).unwrap();
        assert_eq!(places[0].title, "Bahnhofstrasse 1");
        assert_eq!(places[0].description, "Zürich, Zürich");
    }

    #[test]
    fn empty_collection_has_no_places() {
        assert!(parse(r#"{"type": "FeatureCollection", "features": []}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn short_coordinates_are_rejected() {
        let body = r#"{"features": [{"geometry": {"coordinates": [8.54]}}]}"#;
        assert!(matches!(
            parse(body),
            Err(GeocodeError::InvalidCoordinate { index: 0, .. })
        ));
    }
}
