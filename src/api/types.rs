//! API query and response types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::optimizer::ChargingWindow;
use crate::prices::PriceSeries;
use crate::report;

/// Query parameters for `/prices`.
#[derive(Debug, Deserialize)]
pub struct PricesQuery {
    /// Day to query; defaults to today.
    pub date: Option<NaiveDate>,
}

/// Query parameters for `/best-window`.
#[derive(Debug, Deserialize)]
pub struct BestWindowQuery {
    /// Day to query; defaults to today.
    pub date: Option<NaiveDate>,
    /// Charging duration in whole hours; defaults to a value derived from
    /// the energy amount and configured charger power.
    pub hours: Option<usize>,
    /// Energy to charge in kWh; defaults to the configured amount.
    pub energy_kwh: Option<f32>,
}

/// One hourly price formatted for display.
#[derive(Debug, Serialize)]
pub struct HourlyPrice {
    /// Clock time, `HH:00`.
    pub hour: String,
    /// Unit price in EUR per kWh.
    pub price_eur_kwh: f32,
}

/// Response body for `/prices`.
#[derive(Debug, Serialize)]
pub struct PricesResponse {
    /// Day the prices apply to.
    pub date: NaiveDate,
    /// All hourly prices in clock order.
    pub hourly_prices: Vec<HourlyPrice>,
    /// Cheapest hourly price of the day (EUR/kWh).
    pub min_price: f32,
    /// Most expensive hourly price of the day (EUR/kWh).
    pub max_price: f32,
    /// Mean hourly price of the day (EUR/kWh).
    pub average_price: f32,
}

impl From<&PriceSeries> for PricesResponse {
    fn from(series: &PriceSeries) -> Self {
        let stats = series.stats();
        Self {
            date: series.date(),
            hourly_prices: series
                .points()
                .iter()
                .map(|p| HourlyPrice {
                    hour: report::clock_time(p.hour),
                    price_eur_kwh: p.price_eur_kwh,
                })
                .collect(),
            min_price: stats.min_eur_kwh,
            max_price: stats.max_eur_kwh,
            average_price: stats.average_eur_kwh,
        }
    }
}

/// Response body for `/best-window`.
#[derive(Debug, Serialize)]
pub struct BestWindowResponse {
    /// Day the recommendation applies to.
    pub date: NaiveDate,
    /// Window start, `HH:00`.
    pub start_time: String,
    /// Window end (exclusive), `HH:00`.
    pub end_time: String,
    /// Window length in whole hours.
    pub duration_hours: usize,
    /// Energy the charge is assumed to draw (kWh).
    pub energy_kwh: f32,
    /// Mean unit price over the window (EUR/kWh).
    pub average_price_eur_kwh: f32,
    /// Cost of the charge in the recommended window (EUR).
    pub total_cost_eur: f32,
    /// Cost of the same charge in the most expensive window (EUR).
    pub peak_window_cost_eur: f32,
    /// Absolute savings versus the peak window (EUR).
    pub savings_eur: f32,
    /// Savings as a percentage of the peak cost.
    pub savings_percent: f32,
    /// Human-readable recommendation sentence.
    pub explanation: String,
}

impl From<&ChargingWindow> for BestWindowResponse {
    fn from(w: &ChargingWindow) -> Self {
        Self {
            date: w.date,
            start_time: report::clock_time(w.start_hour),
            end_time: report::clock_time(w.end_hour),
            duration_hours: w.duration_hours,
            energy_kwh: w.energy_kwh,
            average_price_eur_kwh: w.average_price_eur_kwh,
            total_cost_eur: w.total_cost_eur,
            peak_window_cost_eur: w.peak_window_cost_eur,
            savings_eur: w.savings_eur,
            savings_percent: w.savings_percent,
            explanation: report::explanation(w),
        }
    }
}

/// Error response body for 4xx/5xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
