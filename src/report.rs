//! Human-readable formatting of price reports and recommendations.

use std::fmt;

use crate::optimizer::ChargingWindow;
use crate::prices::PriceSeries;

/// Formats an hour-of-day as `HH:00` clock time.
pub fn clock_time(hour: u32) -> String {
    format!("{hour:02}:00")
}

/// Renders the full daily price table with min/max/average footer.
pub fn format_daily_prices(series: &PriceSeries) -> String {
    let mut out = String::new();
    out.push_str(&format!("PVPC prices for {}\n", series.date()));
    for p in series.points() {
        out.push_str(&format!(
            "  {}  {:.4} EUR/kWh\n",
            clock_time(p.hour),
            p.price_eur_kwh
        ));
    }
    let stats = series.stats();
    out.push_str(&format!(
        "  min {:.4}  max {:.4}  avg {:.4} EUR/kWh",
        stats.min_eur_kwh, stats.max_eur_kwh, stats.average_eur_kwh
    ));
    out
}

/// One-sentence recommendation in the style of the advisor's tool output.
pub fn explanation(window: &ChargingWindow) -> String {
    if window.duration_hours == 1 {
        format!(
            "Recommended charging time: {}. With {} kWh consumption, cost will be {:.2} EUR \
             (price: {:.4} EUR/kWh).",
            clock_time(window.start_hour),
            window.energy_kwh,
            window.total_cost_eur,
            window.average_price_eur_kwh
        )
    } else {
        format!(
            "Recommended charging period: {} to {}. With {} kWh consumption, cost will be \
             {:.2} EUR (average price: {:.4} EUR/kWh), saving {:.2} EUR ({:.1}%) versus the \
             most expensive {}-hour window.",
            clock_time(window.start_hour),
            clock_time(window.end_hour),
            window.energy_kwh,
            window.total_cost_eur,
            window.average_price_eur_kwh,
            window.savings_eur,
            window.savings_percent,
            window.duration_hours
        )
    }
}

impl fmt::Display for ChargingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Charging recommendation for {} ---", self.date)?;
        writeln!(
            f,
            "Window:         {} to {} ({} h)",
            clock_time(self.start_hour),
            clock_time(self.end_hour),
            self.duration_hours
        )?;
        writeln!(f, "Average price:  {:.4} EUR/kWh", self.average_price_eur_kwh)?;
        writeln!(
            f,
            "Total cost:     {:.2} EUR for {} kWh",
            self.total_cost_eur, self.energy_kwh
        )?;
        writeln!(f, "Peak window:    {:.2} EUR", self.peak_window_cost_eur)?;
        write!(
            f,
            "Savings:        {:.2} EUR ({:.1}%)",
            self.savings_eur, self.savings_percent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::WindowOptimizer;
    use crate::prices::PriceSeries;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date")
    }

    fn sample_window() -> ChargingWindow {
        let s = PriceSeries::build(day(), (0..6).map(|h| (h, 0.10 + 0.05 * h as f32)))
            .expect("valid series");
        WindowOptimizer::find_best_window(&s, 3, 20.0).expect("valid request")
    }

    #[test]
    fn clock_time_zero_pads() {
        assert_eq!(clock_time(3), "03:00");
        assert_eq!(clock_time(22), "22:00");
    }

    #[test]
    fn daily_report_lists_every_hour_and_stats() {
        let s = PriceSeries::build(day(), vec![(0, 0.10), (1, 0.25), (2, 0.15)])
            .expect("valid series");
        let report = format_daily_prices(&s);
        assert!(report.contains("2024-01-15"));
        assert!(report.contains("00:00"));
        assert!(report.contains("02:00"));
        assert!(report.contains("min 0.1000"));
        assert!(report.contains("max 0.2500"));
    }

    #[test]
    fn display_includes_window_and_savings() {
        let w = sample_window();
        let s = format!("{w}");
        assert!(s.contains("00:00 to 03:00"));
        assert!(s.contains("Savings:"));
    }

    #[test]
    fn explanation_mentions_period_and_cost() {
        let w = sample_window();
        let text = explanation(&w);
        assert!(text.contains("00:00 to 03:00"));
        assert!(text.contains("20 kWh"));
    }

    #[test]
    fn single_hour_explanation_has_no_period() {
        let s = PriceSeries::build(day(), vec![(4, 0.10), (5, 0.30)]).expect("valid series");
        let w = WindowOptimizer::find_best_window(&s, 1, 10.0).expect("valid request");
        let text = explanation(&w);
        assert!(text.contains("Recommended charging time: 04:00"));
    }
}
