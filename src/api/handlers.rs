//! Request handlers for the API endpoints.

use std::sync::{Arc, PoisonError};

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use chrono::{Local, NaiveDate};

use super::AppState;
use super::types::{
    BestWindowQuery, BestWindowResponse, ErrorResponse, PricesQuery, PricesResponse,
};
use crate::error::AdvisorError;
use crate::optimizer::WindowOptimizer;
use crate::prices::PriceSeries;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Returns a day's prices with min/max/average.
///
/// `GET /prices` → 200 + `PricesResponse` JSON
/// `GET /prices?date=YYYY-MM-DD` → 200 for that day
pub async fn get_prices(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PricesQuery>,
) -> Result<Json<PricesResponse>, ApiError> {
    let date = query.date.unwrap_or_else(|| Local::now().date_naive());
    let series = load_series(&state, date).await?;
    Ok(Json(PricesResponse::from(&series)))
}

/// Returns the cheapest charging window for a duration and energy amount.
///
/// `GET /best-window?date=YYYY-MM-DD&hours=N&energy_kwh=X` → 200 + JSON
/// Missing `hours` derives the duration from energy and charger power;
/// missing `energy_kwh` falls back to the configured default.
pub async fn get_best_window(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BestWindowQuery>,
) -> Result<Json<BestWindowResponse>, ApiError> {
    let date = query.date.unwrap_or_else(|| Local::now().date_naive());
    let series = load_series(&state, date).await?;

    let energy_kwh = query
        .energy_kwh
        .unwrap_or(state.config.charger.default_energy_kwh);
    let duration_hours = match query.hours {
        Some(h) => h,
        None => WindowOptimizer::duration_for_energy(energy_kwh, state.config.charger.power_kw)
            .min(series.len()),
    };

    let window = WindowOptimizer::find_best_window(&series, duration_hours, energy_kwh)
        .map_err(reject)?;
    Ok(Json(BestWindowResponse::from(&window)))
}

/// Looks up the series for `date` in the cache, fetching upstream on a miss.
///
/// The cache lock is never held across the fetch await point.
async fn load_series(state: &AppState, date: NaiveDate) -> Result<PriceSeries, ApiError> {
    let cached = state
        .cache
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(date);
    if let Some(series) = cached {
        return Ok(series);
    }

    let series = state.client.fetch_day(date).await.map_err(reject)?;
    state
        .cache
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(date, series.clone());
    Ok(series)
}

/// Maps advisor errors onto HTTP statuses: bad requests are the caller's
/// fault, price-data failures point upstream.
fn reject(err: AdvisorError) -> ApiError {
    let status = match err {
        AdvisorError::InvalidPriceData(_) => StatusCode::BAD_GATEWAY,
        AdvisorError::HourNotFound(_)
        | AdvisorError::InvalidDuration { .. }
        | AdvisorError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}
