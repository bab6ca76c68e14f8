//! REE APIDATOS client for daily PVPC prices.
//!
//! The upstream response is a JSON:API-style envelope whose `included` array
//! carries one entry per price indicator. Only the PVPC indicator is used;
//! its values arrive in EUR/MWh with full RFC 3339 timestamps. This module
//! narrows that dynamic shape down to a validated [`PriceSeries`] so the
//! optimizer never sees the upstream schema.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, Timelike};
use serde::Deserialize;

use crate::config::SourceConfig;
use crate::error::AdvisorError;
use crate::prices::PriceSeries;

/// Response envelope from the APIDATOS price endpoint.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    included: Vec<Indicator>,
}

/// One price indicator in the `included` array.
#[derive(Debug, Deserialize)]
struct Indicator {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    id: String,
    attributes: IndicatorAttributes,
}

#[derive(Debug, Deserialize)]
struct IndicatorAttributes {
    #[serde(default)]
    values: Vec<HourlyValue>,
}

/// One hourly sample: price in EUR/MWh plus its local timestamp.
#[derive(Debug, Deserialize)]
struct HourlyValue {
    value: f32,
    datetime: String,
}

/// HTTP client for the REE APIDATOS real-time market price endpoint.
#[derive(Debug, Clone)]
pub struct PvpcClient {
    http: reqwest::Client,
    base_url: String,
}

impl PvpcClient {
    /// Builds a client from source configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::InvalidPriceData`] if the underlying HTTP
    /// client cannot be constructed.
    pub fn new(cfg: &SourceConfig) -> Result<Self, AdvisorError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| AdvisorError::InvalidPriceData(format!("http client: {e}")))?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches and validates the PVPC series for one calendar day.
    ///
    /// Fetch failures, missing days, and malformed payloads are all input
    /// validation failures from the advisor's point of view.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::InvalidPriceData`] on any HTTP, timeout, or
    /// payload problem.
    pub async fn fetch_day(&self, date: NaiveDate) -> Result<PriceSeries, AdvisorError> {
        let url = format!("{}/mercados/precios-mercados-tiempo-real", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("start_date", format!("{date}T00:00")),
                ("end_date", format!("{date}T23:59")),
                ("time_trunc", "hour".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AdvisorError::InvalidPriceData(format!("REE API request: {e}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AdvisorError::InvalidPriceData(format!(
                "no price data available for {date}"
            )));
        }
        if !status.is_success() {
            return Err(AdvisorError::InvalidPriceData(format!(
                "REE API error: {status}"
            )));
        }

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| AdvisorError::InvalidPriceData(format!("REE API payload: {e}")))?;

        let points = parse_pvpc_points(&body, date)?;
        PriceSeries::build(date, points)
    }
}

/// Extracts sorted `(hour, EUR/kWh)` pairs for the PVPC indicator.
///
/// Hours come from each sample's timestamp. On a daylight-saving fall-back
/// day the repeated local hour appears twice upstream; only the first
/// occurrence is kept so the series' uniqueness invariant holds.
fn parse_pvpc_points(
    body: &ApiResponse,
    date: NaiveDate,
) -> Result<Vec<(u32, f32)>, AdvisorError> {
    if body.included.is_empty() {
        return Err(AdvisorError::InvalidPriceData(format!(
            "no price data available for {date}"
        )));
    }

    let indicator = body
        .included
        .iter()
        .find(|item| item.kind == "PVPC" || item.id.contains("PVPC"))
        .filter(|item| !item.attributes.values.is_empty())
        .ok_or_else(|| {
            AdvisorError::InvalidPriceData(format!("no PVPC data available for {date}"))
        })?;

    let mut points: Vec<(u32, f32)> = Vec::with_capacity(indicator.attributes.values.len());
    for sample in &indicator.attributes.values {
        let timestamp = DateTime::parse_from_rfc3339(&sample.datetime).map_err(|e| {
            AdvisorError::InvalidPriceData(format!(
                "bad timestamp \"{}\": {e}",
                sample.datetime
            ))
        })?;
        let hour = timestamp.hour();
        if points.iter().any(|&(h, _)| h == hour) {
            continue;
        }
        // Upstream prices are EUR/MWh.
        points.push((hour, sample.value / 1000.0));
    }

    points.sort_by_key(|&(h, _)| h);
    Ok(points)
}
