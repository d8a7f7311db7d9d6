//! Stateless request builder and envelope parser for the beacon API.
//!
//! # Design
//! `BeaconClient` holds only the base URL and default headers. Each endpoint
//! is split into a `build_*` method producing an `HttpRequest` and a
//! `parse_*` method consuming an `HttpResponse`. All envelope handling lives
//! in `open_envelope`, so every endpoint unwraps and fails the same way.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::config::ClientConfig;
use crate::error::{ApiError, FALLBACK_MESSAGE};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{BeaconRecord, DailyStats, Envelope, HourlyStats, Page, QueryParams};

pub const LIST_PATH: &str = "/getBeacon";
pub const HOURLY_PATH: &str = "/getBeaconByHour";
pub const DAILY_PATH: &str = "/getBeaconByDay";

#[derive(Debug, Clone)]
pub struct BeaconClient {
    base_url: String,
    default_headers: Vec<(String, String)>,
}

impl BeaconClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            default_headers: config.default_headers.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_beacons(&self, params: &QueryParams) -> HttpRequest {
        self.get(LIST_PATH, &params.to_pairs())
    }

    pub fn build_hourly_stats(&self) -> HttpRequest {
        self.get(HOURLY_PATH, &[])
    }

    pub fn build_daily_stats(&self) -> HttpRequest {
        self.get(DAILY_PATH, &[])
    }

    pub fn parse_list_beacons(&self, response: HttpResponse) -> Result<Vec<BeaconRecord>, ApiError> {
        let envelope = open_envelope(&response)?;
        decode_data(envelope.data, response.status)
    }

    /// Like `parse_list_beacons`, but keeps the envelope's pagination fields.
    pub fn parse_beacon_page(&self, response: HttpResponse) -> Result<Page<BeaconRecord>, ApiError> {
        let envelope = open_envelope(&response)?;
        Ok(Page {
            items: decode_data(envelope.data, response.status)?,
            page: envelope.page,
            limit: envelope.limit,
            total: envelope.total,
        })
    }

    pub fn parse_hourly_stats(&self, response: HttpResponse) -> Result<HourlyStats, ApiError> {
        let envelope = open_envelope(&response)?;
        decode_data(envelope.data, response.status)
    }

    pub fn parse_daily_stats(&self, response: HttpResponse) -> Result<DailyStats, ApiError> {
        let envelope = open_envelope(&response)?;
        decode_data(envelope.data, response.status)
    }

    fn get(&self, path: &str, query: &[(&str, String)]) -> HttpRequest {
        let mut url = format!("{}{path}", self.base_url);
        if !query.is_empty() {
            let encoded = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())))
                .finish();
            url.push('?');
            url.push_str(&encoded);
        }
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: self.default_headers.clone(),
        }
    }
}

/// Validate the HTTP status and the envelope code, returning the envelope
/// only when both signal success.
///
/// Bodies that are not an envelope surface `FALLBACK_MESSAGE`; the serde
/// detail only goes to the log.
fn open_envelope(response: &HttpResponse) -> Result<Envelope, ApiError> {
    let parsed = serde_json::from_str::<Envelope>(&response.body);

    if !response.is_success() {
        return Err(match parsed {
            Ok(envelope) if !envelope.is_success() => ApiError::application(envelope.code, envelope.message()),
            _ => ApiError::transport(format!("HTTP {}", response.status), Some(response.status)),
        });
    }

    let envelope = parsed.map_err(|e| {
        warn!(status = response.status, error = %e, body = %response.body, "response is not an envelope");
        ApiError::transport(FALLBACK_MESSAGE, Some(response.status))
    })?;
    debug!(code = envelope.code, body = %response.body, "beacon response");

    if !envelope.is_success() {
        return Err(ApiError::application(envelope.code, envelope.message()));
    }
    Ok(envelope)
}

fn decode_data<D: DeserializeOwned>(data: Value, status: u16) -> Result<D, ApiError> {
    serde_json::from_value(data).map_err(|e| {
        warn!(status, error = %e, "unexpected envelope data");
        ApiError::transport(FALLBACK_MESSAGE, Some(status))
    })
}
