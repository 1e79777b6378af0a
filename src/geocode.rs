//! Reverse geocoding for region names

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Region name substituted when reverse geocoding fails.
pub const REGION_NAME_PLACEHOLDER: &str = "Unknown region";

/// Fixed timeout for geocoding lookups. The imagery service gets no
/// timeout, but a slow geocoder must not hold a finished result hostage.
const GEOCODE_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves a human-readable name for a coordinate.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Returns a display name for the given latitude/longitude.
    async fn region_name(&self, lat: f64, lon: f64) -> Result<String>;
}

/// Nominatim-style reverse geocoding client.
pub struct NominatimClient {
    http: Client,
    base_url: String,
}

impl NominatimClient {
    /// Creates a geocoding client for the given endpoint.
    pub fn new(base_url: &str) -> Result<Self> {
        // Nominatim's usage policy requires an identifying User-Agent.
        let http = Client::builder()
            .timeout(GEOCODE_TIMEOUT)
            .user_agent(concat!("snowline/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(NominatimClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Nominatim answers unresolvable coordinates with HTTP 200 and an
/// error body, so `display_name` has to stay optional here.
#[derive(Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

#[async_trait]
impl ReverseGeocoder for NominatimClient {
    async fn region_name(&self, lat: f64, lon: f64) -> Result<String> {
        let response = self
            .http
            .get(format!("{}/reverse", self.base_url))
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let payload: ReverseResponse = response.json().await?;
        payload
            .display_name
            .ok_or_else(|| Error::Geocode(format!("no display name for {lat},{lon}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_response_with_display_name() {
        let payload: ReverseResponse =
            serde_json::from_str(r#"{"place_id":42,"display_name":"Zermatt, Visp, Valais"}"#)
                .unwrap();
        assert_eq!(payload.display_name.as_deref(), Some("Zermatt, Visp, Valais"));
    }

    #[test]
    fn test_reverse_response_with_error_body() {
        let payload: ReverseResponse =
            serde_json::from_str(r#"{"error":"Unable to geocode"}"#).unwrap();
        assert_eq!(payload.display_name, None);
    }

    #[test]
    fn test_client_construction() {
        let client = NominatimClient::new("https://nominatim.openstreetmap.org/").unwrap();
        assert_eq!(client.base_url, "https://nominatim.openstreetmap.org");
    }
}
