//! Validated hourly price series for one calendar day.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::AdvisorError;

/// One hour's unit price.
///
/// `hour` is the local hour-of-day the price applies to. It is not capped at
/// 23: daylight-saving days and partial-day data are carried as ordinary
/// variable-length series, so the only requirements are uniqueness within a
/// series and a non-negative price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    /// Hour of day the price applies to.
    pub hour: u32,
    /// Unit price in EUR per kWh.
    pub price_eur_kwh: f32,
}

/// Min/max/average unit price over a full series.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PriceStats {
    /// Cheapest hourly price (EUR/kWh).
    pub min_eur_kwh: f32,
    /// Most expensive hourly price (EUR/kWh).
    pub max_eur_kwh: f32,
    /// Mean hourly price (EUR/kWh).
    pub average_eur_kwh: f32,
}

/// Immutable, validated sequence of hourly prices for a single day.
///
/// Points are held sorted by hour ascending. Construction enforces the
/// invariants the optimizer relies on: non-empty, unique hours, no negative
/// prices. A series is built once per query and discarded afterwards; it is
/// never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct PriceSeries {
    date: NaiveDate,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series from `(hour, price)` pairs in any order.
    ///
    /// Sorts by hour and validates. Series shorter or longer than 24 entries
    /// are accepted; gaps between hours are allowed (partial-day data).
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::InvalidPriceData`] if the input is empty,
    /// contains a duplicate hour, or contains a negative price.
    pub fn build(
        date: NaiveDate,
        points: impl IntoIterator<Item = (u32, f32)>,
    ) -> Result<Self, AdvisorError> {
        let mut points: Vec<PricePoint> = points
            .into_iter()
            .map(|(hour, price_eur_kwh)| PricePoint {
                hour,
                price_eur_kwh,
            })
            .collect();

        if points.is_empty() {
            return Err(AdvisorError::InvalidPriceData(format!(
                "no price points for {date}"
            )));
        }

        points.sort_by_key(|p| p.hour);

        for pair in points.windows(2) {
            if pair[0].hour == pair[1].hour {
                return Err(AdvisorError::InvalidPriceData(format!(
                    "duplicate hour {} for {date}",
                    pair[0].hour
                )));
            }
        }
        for p in &points {
            if p.price_eur_kwh < 0.0 {
                return Err(AdvisorError::InvalidPriceData(format!(
                    "negative price {} EUR/kWh at hour {}",
                    p.price_eur_kwh, p.hour
                )));
            }
        }

        Ok(Self { date, points })
    }

    /// The calendar day this series covers.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Number of price points in the series.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// A valid series is never empty; kept for idiomatic pairing with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The points in hour-ascending order.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Unit price for a specific hour.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::HourNotFound`] if the series has no point for
    /// that hour.
    pub fn price_at(&self, hour: u32) -> Result<f32, AdvisorError> {
        self.points
            .binary_search_by_key(&hour, |p| p.hour)
            .map(|i| self.points[i].price_eur_kwh)
            .map_err(|_| AdvisorError::HourNotFound(hour))
    }

    /// Min, max, and average unit price over the whole day.
    pub fn stats(&self) -> PriceStats {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0_f32;
        for p in &self.points {
            min = min.min(p.price_eur_kwh);
            max = max.max(p.price_eur_kwh);
            sum += p.price_eur_kwh;
        }
        PriceStats {
            min_eur_kwh: min,
            max_eur_kwh: max,
            average_eur_kwh: sum / self.points.len() as f32,
        }
    }

    /// Lazily enumerates every contiguous window of `duration_hours`
    /// consecutive *entries* (consecutive in series order, which may span
    /// clock-hour gaps in partial data) together with its summed price.
    ///
    /// The iterator borrows the series and can be recreated at will; it
    /// maintains a running sum, subtracting the departing point and adding
    /// the entering one rather than re-summing each window.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::InvalidDuration`] if `duration_hours` is zero
    /// or exceeds the series length.
    pub fn sliding_windows(&self, duration_hours: usize) -> Result<SlidingWindows<'_>, AdvisorError> {
        if duration_hours < 1 || duration_hours > self.points.len() {
            return Err(AdvisorError::InvalidDuration {
                duration: duration_hours,
                len: self.points.len(),
            });
        }
        Ok(SlidingWindows {
            points: &self.points,
            duration: duration_hours,
            next_start: 0,
            rolling_sum: None,
        })
    }
}

/// One candidate charging window: a contiguous slice of the series plus its
/// pre-summed price.
#[derive(Debug, Clone, Copy)]
pub struct PriceWindow<'a> {
    /// Index of the first point within the series.
    pub start_index: usize,
    /// The window's points, in hour order.
    pub points: &'a [PricePoint],
    /// Sum of the unit prices in the window (EUR/kWh).
    pub sum_eur_kwh: f32,
}

impl PriceWindow<'_> {
    /// Hour of the first point in the window.
    pub fn start_hour(&self) -> u32 {
        self.points[0].hour
    }

    /// Exclusive end hour: one past the last point's hour.
    pub fn end_hour(&self) -> u32 {
        self.points[self.points.len() - 1].hour + 1
    }
}

/// Iterator over contiguous fixed-length windows of a [`PriceSeries`].
#[derive(Debug, Clone)]
pub struct SlidingWindows<'a> {
    points: &'a [PricePoint],
    duration: usize,
    next_start: usize,
    rolling_sum: Option<f32>,
}

impl<'a> Iterator for SlidingWindows<'a> {
    type Item = PriceWindow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next_start;
        if start + self.duration > self.points.len() {
            return None;
        }

        let sum = match self.rolling_sum {
            None => self.points[..self.duration]
                .iter()
                .map(|p| p.price_eur_kwh)
                .sum(),
            Some(prev) => {
                // Slide by one: drop the departing point, add the entering one.
                prev - self.points[start - 1].price_eur_kwh
                    + self.points[start + self.duration - 1].price_eur_kwh
            }
        };
        self.rolling_sum = Some(sum);
        self.next_start += 1;

        Some(PriceWindow {
            start_index: start,
            points: &self.points[start..start + self.duration],
            sum_eur_kwh: sum,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.points.len() + 1)
            .saturating_sub(self.duration)
            .saturating_sub(self.next_start);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SlidingWindows<'_> {}
