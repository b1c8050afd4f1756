use crate::constants::USER_AGENT;
use crate::error::{AppError, Result};
use crate::models::Coordinates;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLocation {
    /// Short name for the location field, e.g. "Jaipur"
    pub label: String,
    pub display_name: String,
    pub coordinates: Coordinates,
}

#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse(&self, coordinates: &Coordinates) -> Result<ResolvedLocation>;
}

/// Client for a Nominatim-compatible `/reverse` endpoint.
#[derive(Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(NominatimClient { client, base_url })
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimClient {
    async fn reverse(&self, coordinates: &Coordinates) -> Result<ResolvedLocation> {
        let url = format!("{}/reverse", self.base_url);

        tracing::debug!(
            lat = coordinates.lat,
            lng = coordinates.lng,
            "Reverse geocoding request"
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "json".to_string()),
                ("lat", coordinates.lat.to_string()),
                ("lon", coordinates.lng.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Geocoding(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(status = %status, "Geocoder HTTP error {}", status);
            return Err(AppError::Geocoding(format!("HTTP {}", status)));
        }

        let body: NominatimReverseResponse = response
            .json()
            .await
            .map_err(|e| AppError::Geocoding(format!("Failed to parse response: {}", e)))?;

        if let Some(error) = body.error {
            return Err(AppError::Geocoding(error));
        }

        let display_name = body
            .display_name
            .ok_or_else(|| AppError::Geocoding("No address found".to_string()))?;

        let label = location_label(&display_name)
            .ok_or_else(|| AppError::Geocoding("Empty address returned".to_string()))?;

        Ok(ResolvedLocation {
            label,
            display_name,
            coordinates: *coordinates,
        })
    }
}

// Nominatim reports "Unable to geocode" in an `error` field with HTTP 200
#[derive(Debug, Deserialize)]
struct NominatimReverseResponse {
    display_name: Option<String>,
    error: Option<String>,
}

/// First comma-separated segment of a display name, trimmed.
pub fn location_label(display_name: &str) -> Option<String> {
    display_name
        .split(',')
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_label() {
        assert_eq!(
            location_label("Jaipur, Jaipur Tehsil, Rajasthan, 302001, India").as_deref(),
            Some("Jaipur")
        );
        assert_eq!(location_label("  Paris ").as_deref(), Some("Paris"));
        assert_eq!(location_label(""), None);
        assert_eq!(location_label(" , France"), None);
    }

    #[test]
    fn test_response_shapes() {
        let ok: NominatimReverseResponse =
            serde_json::from_str(r#"{"place_id": 1, "display_name": "Louvre, Paris"}"#).unwrap();
        assert_eq!(ok.display_name.as_deref(), Some("Louvre, Paris"));

        let err: NominatimReverseResponse =
            serde_json::from_str(r#"{"error": "Unable to geocode"}"#).unwrap();
        assert!(err.display_name.is_none());
        assert_eq!(err.error.as_deref(), Some("Unable to geocode"));
    }
}
