use foundation::Coordinate;
use tracing::{debug, info};

use crate::config::GeocoderConfig;
use crate::result::{GeocodeError, GeocodeResult, into_results};
use crate::{nominatim, photon};

/// Geocoding service in use, chosen once at startup.
///
/// The public Nominatim instance serves unless a self-hosted endpoint is
/// configured, in which case that endpoint is expected to speak Photon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocoderBackend {
    Nominatim,
    Photon { endpoint: String },
}

impl GeocoderBackend {
    pub fn from_config(config: &GeocoderConfig) -> Self {
        let backend = match &config.endpoint {
            Some(endpoint) => GeocoderBackend::Photon {
                endpoint: endpoint.clone(),
            },
            None => GeocoderBackend::Nominatim,
        };
        info!(backend = backend.name(), "selected geocoder");
        backend
    }

    pub fn name(&self) -> &'static str {
        match self {
            GeocoderBackend::Nominatim => "nominatim",
            GeocoderBackend::Photon { .. } => "photon",
        }
    }

    /// Normalize the body of a forward (text) search response.
    pub fn normalize_forward(&self, body: &str) -> Result<Vec<GeocodeResult>, GeocodeError> {
        let places = match self {
            GeocoderBackend::Nominatim => nominatim::parse_search(body)?,
            GeocoderBackend::Photon { .. } => photon::parse(body)?,
        };
        debug!(backend = self.name(), results = places.len(), "normalized forward search");
        Ok(into_results(places, None))
    }

    /// Normalize the body of a reverse search issued for `query`.
    pub fn normalize_reverse(
        &self,
        body: &str,
        query: Coordinate,
    ) -> Result<Vec<GeocodeResult>, GeocodeError> {
        let places = match self {
            GeocoderBackend::Nominatim => nominatim::parse_reverse(body)?,
            GeocoderBackend::Photon { .. } => photon::parse(body)?,
        };
        debug!(backend = self.name(), results = places.len(), "normalized reverse search");
        Ok(into_results(places, Some(query)))
    }
}

#[cfg(test)]
mod tests {
    use super::GeocoderBackend;
    use crate::config::GeocoderConfig;
    use foundation::Coordinate;
    use pretty_assertions::assert_eq;

    #[test]
    fn endpoint_presence_selects_backend() {
        assert_eq!(
            GeocoderBackend::from_config(&GeocoderConfig::default()),
            GeocoderBackend::Nominatim
        );
        let cfg = GeocoderConfig::from_endpoint(Some("http://localhost:2322".to_string()));
        assert_eq!(
            GeocoderBackend::from_config(&cfg),
            GeocoderBackend::Photon {
                endpoint: "http://localhost:2322".to_string()
            }
        );
    }

    #[test]
    fn both_backends_produce_the_same_shape() {
        let nominatim = GeocoderBackend::Nominatim
            .normalize_forward(
                r#"[{"lat": "47.37", "lon": "8.54", "display_name": "Zürich, Schweiz"}]"#,
            )
            .unwrap();
        let photon = GeocoderBackend::Photon {
            endpoint: "http://localhost:2322".to_string(),
        }
        .normalize_forward(
            r#"{"features": [{"geometry": {"coordinates": [8.54, 47.37]},
                "properties": {"name": "Zürich", "country": "Schweiz"}}]}"#,
        )
        .unwrap();
        assert_eq!(nominatim, photon);
        assert_eq!(nominatim[0].source_coordinate, Coordinate::new(47.37, 8.54));
    }

    #[test]
    fn reverse_search_records_query_point() {
        let query = Coordinate::new(47.3701, 8.5402);
        let results = GeocoderBackend::Nominatim
            .normalize_reverse(
                r#"{"lat": "47.37", "lon": "8.54", "display_name": "Zürich, Schweiz"}"#,
                query,
            )
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source_coordinate, query);
        assert_eq!(results[0].address_coordinate, Coordinate::new(47.37, 8.54));
    }
}
