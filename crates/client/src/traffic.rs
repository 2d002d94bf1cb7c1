//! Client for the traffic-flow API.

use citylens_core::traffic::TrafficSensorReading;

use crate::error::ClientError;
use crate::fetch::upstream_error;

/// Typed client for the traffic-flow service. The latest-readings
/// endpoint is unauthenticated, so this client never touches tokens.
#[derive(Debug, Clone)]
pub struct TrafficApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl TrafficApiClient {
    /// Create a client for the service at `base_url` (no trailing
    /// slash required).
    pub fn new(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, http }
    }

    /// `GET /traffic-flow/traffic/latest` -- the full current snapshot.
    pub async fn latest(&self) -> Result<Vec<TrafficSensorReading>, ClientError> {
        let url = format!("{}/traffic-flow/traffic/latest", self.base_url);
        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            return Err(upstream_error(response, "Failed to fetch traffic data").await);
        }
        Ok(response.json().await?)
    }
}
