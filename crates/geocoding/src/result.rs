use foundation::Coordinate;
use serde::{Deserialize, Serialize};

/// Provider-independent search result shown in the place picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeResult {
    pub title: String,
    pub description: String,
    pub selected: bool,
    /// Location of the matched address.
    pub address_coordinate: Coordinate,
    /// Point the search started from: the query for reverse lookups,
    /// otherwise the address itself.
    pub source_coordinate: Coordinate,
    /// Where the result is drawn on the map.
    pub display_coordinate: Coordinate,
    pub key: usize,
    pub address_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodeError {
    Json(String),
    InvalidCoordinate { index: usize, reason: String },
}

impl std::fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeocodeError::Json(msg) => write!(f, "malformed geocoder response: {msg}"),
            GeocodeError::InvalidCoordinate { index, reason } => {
                write!(f, "invalid coordinate in result {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for GeocodeError {}

/// A provider hit reduced to what the common shape needs.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Place {
    pub title: String,
    pub description: String,
    pub coordinate: Coordinate,
}

pub(crate) fn into_results(places: Vec<Place>, query: Option<Coordinate>) -> Vec<GeocodeResult> {
    places
        .into_iter()
        .enumerate()
        .map(|(index, place)| GeocodeResult {
            title: place.title,
            description: place.description,
            selected: false,
            address_coordinate: place.coordinate,
            source_coordinate: query.unwrap_or(place.coordinate),
            display_coordinate: place.coordinate,
            key: index,
            address_index: index,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{GeocodeResult, Place, into_results};
    use foundation::Coordinate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn serializes_in_camel_case() {
        let c = Coordinate::new(1.0, 2.0);
        let r = GeocodeResult {
            title: "A".to_string(),
            description: "B".to_string(),
            selected: false,
            address_coordinate: c,
            source_coordinate: c,
            display_coordinate: c,
            key: 0,
            address_index: 0,
        };
        let v = serde_json::to_value(&r).unwrap();
        let point = json!({"lat_deg": 1.0, "lon_deg": 2.0});
        assert_eq!(
            v,
            json!({
                "title": "A",
                "description": "B",
                "selected": false,
                "addressCoordinate": point,
                "sourceCoordinate": point,
                "displayCoordinate": point,
                "key": 0,
                "addressIndex": 0
            })
        );
    }

    #[test]
    fn reverse_results_keep_the_query_as_source() {
        let query = Coordinate::new(10.0, 10.0);
        let places = vec![
            Place {
                title: "first".to_string(),
                description: String::new(),
                coordinate: Coordinate::new(10.001, 10.0),
            },
            Place {
                title: "second".to_string(),
                description: String::new(),
                coordinate: Coordinate::new(10.002, 10.0),
            },
        ];
        let results = into_results(places, Some(query));
        assert_eq!(results[1].key, 1);
        assert_eq!(results[1].address_index, 1);
        assert_eq!(results[1].source_coordinate, query);
        assert_eq!(results[1].display_coordinate, Coordinate::new(10.002, 10.0));
        assert!(!results[0].selected);
    }
}
