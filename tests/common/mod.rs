//! Shared test fixtures for integration tests.

use charge_advisor::prices::PriceSeries;
use chrono::NaiveDate;

/// Hourly winter-day price curve: cheap overnight, evening peak at 18:00.
pub const WINTER_DAY_PRICES: [f32; 24] = [
    0.10, 0.10, 0.10, 0.10, 0.10, 0.10, 0.10, 0.25, 0.30, 0.28, 0.20, 0.18, 0.15, 0.15, 0.18,
    0.22, 0.28, 0.35, 0.40, 0.38, 0.30, 0.22, 0.15, 0.12,
];

/// The day all fixtures use.
pub fn query_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date")
}

/// Full 24-hour series with the winter-day price curve.
pub fn winter_day_series() -> PriceSeries {
    PriceSeries::build(
        query_date(),
        WINTER_DAY_PRICES
            .iter()
            .enumerate()
            .map(|(h, &p)| (h as u32, p)),
    )
    .expect("fixture series should be valid")
}
