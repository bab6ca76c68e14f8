//! Minimum-cost charging-window selection and savings metrics.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::AdvisorError;
use crate::prices::PriceSeries;

/// The recommended charging window plus its comparison metrics.
///
/// Produced once per optimization call and returned by value; nothing here
/// is persisted or shared.
#[derive(Debug, Clone, Serialize)]
pub struct ChargingWindow {
    /// Day the recommendation applies to.
    pub date: NaiveDate,
    /// Hour of the first point in the window.
    pub start_hour: u32,
    /// Exclusive end hour (one past the last point's hour).
    pub end_hour: u32,
    /// Window length in whole hours.
    pub duration_hours: usize,
    /// Energy the charge is assumed to draw (kWh).
    pub energy_kwh: f32,
    /// Mean unit price over the window (EUR/kWh).
    pub average_price_eur_kwh: f32,
    /// Cost of drawing `energy_kwh` at the window's average price (EUR).
    pub total_cost_eur: f32,
    /// Cost of the same charge in the most expensive equal-length window (EUR).
    pub peak_window_cost_eur: f32,
    /// `peak_window_cost_eur - total_cost_eur`.
    pub savings_eur: f32,
    /// Savings as a percentage of the peak cost, 0 when the peak cost is 0.
    pub savings_percent: f32,
}

/// Selects the cheapest contiguous window over a [`PriceSeries`].
///
/// A pure function of its inputs: no I/O, no locks, no retained state.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowOptimizer;

impl WindowOptimizer {
    /// Finds the minimum-cost contiguous window of `duration_hours` entries
    /// and computes savings versus the most expensive equal-length window.
    ///
    /// Ties on the minimum (or maximum) sum resolve to the earliest-starting
    /// window, so identical inputs always produce identical recommendations
    /// and equally cheap charging starts sooner.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::InvalidRequest`] if `duration_hours` is zero
    /// or exceeds the series length, or if `energy_kwh` is not positive.
    pub fn find_best_window(
        series: &PriceSeries,
        duration_hours: usize,
        energy_kwh: f32,
    ) -> Result<ChargingWindow, AdvisorError> {
        if duration_hours < 1 || duration_hours > series.len() {
            return Err(AdvisorError::InvalidRequest(format!(
                "duration must be between 1 and {} hours, got {duration_hours}",
                series.len()
            )));
        }
        if !(energy_kwh > 0.0) {
            return Err(AdvisorError::InvalidRequest(format!(
                "energy must be > 0 kWh, got {energy_kwh}"
            )));
        }

        // Validation above guarantees the duration is in range.
        let mut windows = series.sliding_windows(duration_hours)?;
        let first = windows.next().ok_or_else(|| {
            AdvisorError::InvalidRequest("series produced no candidate windows".to_string())
        })?;

        let mut best = first;
        let mut peak = first;
        for w in windows {
            // Strict comparisons keep the earliest window on ties.
            if w.sum_eur_kwh < best.sum_eur_kwh {
                best = w;
            }
            if w.sum_eur_kwh > peak.sum_eur_kwh {
                peak = w;
            }
        }

        let average_price_eur_kwh = best.sum_eur_kwh / duration_hours as f32;
        let total_cost_eur = average_price_eur_kwh * energy_kwh;
        let peak_window_cost_eur = peak.sum_eur_kwh / duration_hours as f32 * energy_kwh;
        let savings_eur = peak_window_cost_eur - total_cost_eur;
        let savings_percent = if peak_window_cost_eur > 0.0 {
            savings_eur / peak_window_cost_eur * 100.0
        } else {
            0.0
        };

        Ok(ChargingWindow {
            date: series.date(),
            start_hour: best.start_hour(),
            end_hour: best.end_hour(),
            duration_hours,
            energy_kwh,
            average_price_eur_kwh,
            total_cost_eur,
            peak_window_cost_eur,
            savings_eur,
            savings_percent,
        })
    }

    /// Derives a whole-hour charging duration from an energy amount and
    /// charger power, rounding to the nearest hour with a floor of 1.
    pub fn duration_for_energy(energy_kwh: f32, charger_power_kw: f32) -> usize {
        if charger_power_kw <= 0.0 {
            return 1;
        }
        ((energy_kwh / charger_power_kw) + 0.5).floor().max(1.0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date")
    }

    fn series_from(prices: &[f32]) -> PriceSeries {
        PriceSeries::build(
            day(),
            prices.iter().enumerate().map(|(h, &p)| (h as u32, p)),
        )
        .expect("valid series")
    }

    #[test]
    fn picks_the_cheapest_window() {
        let s = series_from(&[0.30, 0.20, 0.05, 0.06, 0.25, 0.40]);
        let w = WindowOptimizer::find_best_window(&s, 2, 10.0).expect("valid request");
        assert_eq!(w.start_hour, 2);
        assert_eq!(w.end_hour, 4);
        assert!((w.average_price_eur_kwh - 0.055).abs() < 1e-6);
    }

    #[test]
    fn min_tie_breaks_to_earliest_start() {
        // Windows [0,1] and [3,4] both sum to 0.20.
        let s = series_from(&[0.10, 0.10, 0.50, 0.10, 0.10]);
        let w = WindowOptimizer::find_best_window(&s, 2, 10.0).expect("valid request");
        assert_eq!(w.start_hour, 0);
    }

    #[test]
    fn rerun_is_deterministic() {
        let s = series_from(&[0.2, 0.2, 0.2, 0.2, 0.2, 0.2]);
        let a = WindowOptimizer::find_best_window(&s, 3, 8.0).expect("valid request");
        let b = WindowOptimizer::find_best_window(&s, 3, 8.0).expect("valid request");
        assert_eq!(a.start_hour, b.start_hour);
        assert_eq!(a.total_cost_eur, b.total_cost_eur);
    }

    #[test]
    fn cost_scales_with_energy() {
        let s = series_from(&[0.10, 0.10, 0.30, 0.30]);
        let w = WindowOptimizer::find_best_window(&s, 2, 50.0).expect("valid request");
        // avg 0.10 EUR/kWh * 50 kWh
        assert!((w.total_cost_eur - 5.0).abs() < 1e-4);
        // peak window is hours 2-3 at avg 0.30
        assert!((w.peak_window_cost_eur - 15.0).abs() < 1e-4);
        assert!((w.savings_eur - 10.0).abs() < 1e-4);
    }

    #[test]
    fn savings_percent_within_bounds() {
        let s = series_from(&[0.12, 0.08, 0.40, 0.35, 0.10, 0.09]);
        for d in 1..=s.len() {
            let w = WindowOptimizer::find_best_window(&s, d, 10.0).expect("valid request");
            assert!(
                (0.0..=100.0).contains(&w.savings_percent),
                "duration {d} gave {}%",
                w.savings_percent
            );
        }
    }

    #[test]
    fn full_length_window_has_zero_savings() {
        let s = series_from(&[0.10, 0.20, 0.30]);
        let w = WindowOptimizer::find_best_window(&s, 3, 10.0).expect("valid request");
        assert_eq!(w.start_hour, 0);
        assert_eq!(w.end_hour, 3);
        assert_eq!(w.savings_eur, 0.0);
        assert_eq!(w.savings_percent, 0.0);
    }

    #[test]
    fn all_equal_prices_have_zero_savings() {
        let s = series_from(&[0.15; 8]);
        let w = WindowOptimizer::find_best_window(&s, 3, 10.0).expect("valid request");
        assert_eq!(w.savings_eur, 0.0);
        assert_eq!(w.savings_percent, 0.0);
    }

    #[test]
    fn all_zero_prices_have_zero_percent() {
        let s = series_from(&[0.0; 5]);
        let w = WindowOptimizer::find_best_window(&s, 2, 10.0).expect("valid request");
        assert_eq!(w.peak_window_cost_eur, 0.0);
        assert_eq!(w.savings_percent, 0.0);
    }

    #[test]
    fn zero_duration_is_invalid() {
        let s = series_from(&[0.1, 0.2]);
        let err = WindowOptimizer::find_best_window(&s, 0, 10.0).unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidRequest(_)));
    }

    #[test]
    fn oversized_duration_is_invalid() {
        let s = series_from(&[0.1; 24]);
        let err = WindowOptimizer::find_best_window(&s, 25, 10.0).unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidRequest(_)));
    }

    #[test]
    fn non_positive_energy_is_invalid() {
        let s = series_from(&[0.1, 0.2, 0.3]);
        for bad in [0.0, -5.0, f32::NAN] {
            let err = WindowOptimizer::find_best_window(&s, 2, bad).unwrap_err();
            assert!(matches!(err, AdvisorError::InvalidRequest(_)));
        }
    }

    #[test]
    fn boundary_hours_come_from_points_not_indices() {
        // Partial series with a gap: hours 10,11,20,21.
        let s = PriceSeries::build(
            day(),
            vec![(10, 0.30), (11, 0.30), (20, 0.05), (21, 0.05)],
        )
        .expect("valid series");
        let w = WindowOptimizer::find_best_window(&s, 2, 10.0).expect("valid request");
        assert_eq!(w.start_hour, 20);
        assert_eq!(w.end_hour, 22);
    }

    #[test]
    fn duration_for_energy_rounds_to_nearest_hour() {
        // Original charger rule: 7.4 kW AC charger.
        assert_eq!(WindowOptimizer::duration_for_energy(10.0, 7.4), 1);
        assert_eq!(WindowOptimizer::duration_for_energy(15.0, 7.4), 2);
        assert_eq!(WindowOptimizer::duration_for_energy(50.0, 7.4), 7);
        assert_eq!(WindowOptimizer::duration_for_energy(0.5, 7.4), 1);
    }
}
