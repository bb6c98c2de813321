use std::env;

/// Environment variable naming a self-hosted geocoder endpoint.
pub const GEOCODER_URL_ENV: &str = "GEOCODER_URL";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeocoderConfig {
    /// Base URL of a configured geocoding service, if any.
    pub endpoint: Option<String>,
}

impl GeocoderConfig {
    pub fn from_env() -> Self {
        Self::from_endpoint(env::var(GEOCODER_URL_ENV).ok())
    }

    /// Blank values count as unset.
    pub fn from_endpoint(endpoint: Option<String>) -> Self {
        let endpoint = endpoint
            .map(|e| e.trim().trim_end_matches('/').to_string())
            .filter(|e| !e.is_empty());
        Self { endpoint }
    }
}
