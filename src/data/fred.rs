//! FRED API integration: series observations over a date range.
//!
//! The client only knows a base URL. Pointing it at the FRED host or at a
//! forwarding proxy (`/api/fred`) is a configuration choice, not a code path.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{DateRange, RawObservation, format_date_for_api};
use crate::error::{AppError, SeriesError};

pub const DEFAULT_BASE_URL: &str = "https://api.stlouisfed.org/fred";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can produce raw observations for a series and date range.
///
/// `FredClient` is the production implementation; tests substitute in-memory
/// sources so the pipeline can be driven without a network.
pub trait ObservationSource: Sync {
    fn fetch_series(&self, series_id: &str, range: DateRange) -> Result<Vec<RawObservation>, SeriesError>;

    /// Convenience wrapper validating `start <= end` before any I/O.
    fn fetch_between(
        &self,
        series_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawObservation>, SeriesError> {
        let range = DateRange::new(start, end)?;
        self.fetch_series(series_id, range)
    }
}

/// Connection settings for the observations endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FredConfig {
    /// Root of the API, e.g. `https://api.stlouisfed.org/fred` or `http://localhost:7071/api/fred`.
    pub base_url: String,
    /// Optional: a proxy may attach the key on its side.
    pub api_key: Option<String>,
}

impl FredConfig {
    /// Read `FRED_BASE_URL` / `FRED_API_KEY` (after loading `.env`).
    ///
    /// `base_url_override` (from the CLI) wins over the environment.
    pub fn from_env(base_url_override: Option<&str>) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let base_url = base_url_override
            .map(str::to_string)
            .or_else(|| std::env::var("FRED_BASE_URL").ok())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_key = std::env::var("FRED_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let config = Self { base_url, api_key };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.api_key.is_none() && self.talks_to_fred_directly() {
            return Err(AppError::new(
                2,
                "Missing FRED_API_KEY in environment (.env). Set it, or point FRED_BASE_URL at a proxy that adds it.",
            ));
        }
        Ok(())
    }

    fn talks_to_fred_directly(&self) -> bool {
        self.base_url.contains("api.stlouisfed.org")
    }

    fn observations_url(&self) -> String {
        format!("{}/series/observations", self.base_url.trim_end_matches('/'))
    }
}

pub struct FredClient {
    client: Client,
    config: FredConfig,
}

impl FredClient {
    pub fn new(config: FredConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::new(4, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn from_env(base_url_override: Option<&str>) -> Result<Self, AppError> {
        Self::new(FredConfig::from_env(base_url_override)?)
    }
}

impl ObservationSource for FredClient {
    fn fetch_series(&self, series_id: &str, range: DateRange) -> Result<Vec<RawObservation>, SeriesError> {
        let start = format_date_for_api(range.start());
        let end = format_date_for_api(range.end());
        debug!(series_id, %start, %end, "fetching observations");

        let mut req = self.client.get(self.config.observations_url()).query(&[
            ("series_id", series_id),
            ("file_type", "json"),
            ("observation_start", start.as_str()),
            ("observation_end", end.as_str()),
        ]);
        if let Some(key) = &self.config.api_key {
            req = req.query(&[("api_key", key.as_str())]);
        }

        let resp = req.send().map_err(|e| {
            warn!(series_id, error = %e, "FRED request failed");
            SeriesError::fetch(series_id, e.status().map(|s| s.as_u16()), e.to_string())
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            let message = error_message_from_body(&body)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "request rejected".to_string());
            warn!(series_id, status = status.as_u16(), %message, "FRED returned an error status");
            return Err(SeriesError::fetch(series_id, Some(status.as_u16()), message));
        }

        let body: ObservationsResponse = resp.json().map_err(|e| {
            SeriesError::fetch(series_id, Some(status.as_u16()), format!("failed to decode response: {e}"))
        })?;

        debug!(series_id, count = body.observations.len(), "received observations");
        Ok(body.observations)
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    #[serde(default)]
    observations: Vec<RawObservation>,
}

/// Error payloads we know how to read: FRED's own and the proxy's `{ error }`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error_message: Option<String>,
    error: Option<String>,
}

fn error_message_from_body(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .error_message
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
}
