//! End-to-end optimization over a realistic 24-hour price day.

mod common;

use charge_advisor::error::AdvisorError;
use charge_advisor::optimizer::WindowOptimizer;
use charge_advisor::prices::PriceSeries;
use charge_advisor::report;

#[test]
fn winter_day_six_hour_charge() {
    let series = common::winter_day_series();
    let window = WindowOptimizer::find_best_window(&series, 6, 50.0)
        .expect("request should be valid");

    // Cheapest 6-hour run is the overnight block starting at midnight.
    assert_eq!(window.start_hour, 0);
    assert_eq!(window.end_hour, 6);
    assert!((window.average_price_eur_kwh - 0.10).abs() < 1e-4);
    assert!((window.total_cost_eur - 5.0).abs() < 1e-3);

    // Evening peak: the most expensive 6-hour run sums to 1.93 EUR/kWh.
    assert!((window.peak_window_cost_eur - 16.083).abs() < 1e-2);
    assert!((window.savings_eur - 11.083).abs() < 1e-2);
    assert!((window.savings_percent - 68.9).abs() < 0.5);
}

#[test]
fn best_window_is_never_beaten_by_any_candidate() {
    let series = common::winter_day_series();
    for duration in 1..=series.len() {
        let window = WindowOptimizer::find_best_window(&series, duration, 10.0)
            .expect("request should be valid");
        let best_sum = window.average_price_eur_kwh * duration as f32;

        for candidate in series
            .sliding_windows(duration)
            .expect("duration is in range")
        {
            assert!(
                best_sum <= candidate.sum_eur_kwh + 1e-4,
                "duration {duration}: window starting at hour {} beats the recommendation",
                candidate.start_hour()
            );
        }
    }
}

#[test]
fn full_day_window_has_no_savings() {
    let series = common::winter_day_series();
    let window = WindowOptimizer::find_best_window(&series, 24, 50.0)
        .expect("request should be valid");

    assert_eq!(window.start_hour, 0);
    assert_eq!(window.end_hour, 24);
    assert_eq!(window.savings_eur, 0.0);
    assert_eq!(window.savings_percent, 0.0);
}

#[test]
fn out_of_range_durations_are_rejected() {
    let series = common::winter_day_series();

    let zero = WindowOptimizer::find_best_window(&series, 0, 50.0).unwrap_err();
    assert!(matches!(zero, AdvisorError::InvalidRequest(_)));

    let oversized = WindowOptimizer::find_best_window(&series, 25, 50.0).unwrap_err();
    assert!(matches!(oversized, AdvisorError::InvalidRequest(_)));
}

#[test]
fn dst_short_day_is_optimized_like_any_other() {
    // Spring-forward day: 23 points, hour 2 missing.
    let series = PriceSeries::build(
        common::query_date(),
        (0..24u32)
            .filter(|&h| h != 2)
            .map(|h| (h, common::WINTER_DAY_PRICES[h as usize])),
    )
    .expect("valid series");
    assert_eq!(series.len(), 23);

    let window = WindowOptimizer::find_best_window(&series, 23, 10.0)
        .expect("request should be valid");
    assert_eq!(window.savings_eur, 0.0);

    let short = WindowOptimizer::find_best_window(&series, 6, 10.0)
        .expect("request should be valid");
    // The overnight block is still cheapest; its entries span the missing
    // hour, so the exclusive end comes from the actual boundary point.
    assert_eq!(short.start_hour, 0);
    assert_eq!(short.end_hour, 7);
}

#[test]
fn recommendation_formats_clock_times() {
    let series = common::winter_day_series();
    let window = WindowOptimizer::find_best_window(&series, 6, 50.0)
        .expect("request should be valid");

    let rendered = format!("{window}");
    assert!(rendered.contains("00:00 to 06:00"));

    let text = report::explanation(&window);
    assert!(text.contains("50 kWh"));
    assert!(text.contains("00:00 to 06:00"));
}
