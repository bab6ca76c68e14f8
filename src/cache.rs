//! In-process per-date cache of fetched price series.

use std::collections::HashMap;

use chrono::{Local, NaiveDate};

use crate::prices::PriceSeries;

/// Caches one [`PriceSeries`] per requested calendar date.
///
/// Entries are stamped with the local day on which they were stored; the
/// first access on a later local day drops everything, since PVPC data for
/// "today" and "tomorrow" rolls over at midnight. The cache lives entirely
/// outside the optimization core, which only ever receives a built series.
#[derive(Debug, Default)]
pub struct PriceCache {
    entries: HashMap<NaiveDate, PriceSeries>,
    filled_on: Option<NaiveDate>,
}

impl PriceCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached series for `date`, if still valid today.
    pub fn get(&mut self, date: NaiveDate) -> Option<PriceSeries> {
        self.get_as_of(date, Local::now().date_naive())
    }

    /// Stores a series for `date`.
    pub fn insert(&mut self, date: NaiveDate, series: PriceSeries) {
        self.insert_as_of(date, series, Local::now().date_naive());
    }

    /// Clock-injected lookup; `today` is the current local day.
    pub fn get_as_of(&mut self, date: NaiveDate, today: NaiveDate) -> Option<PriceSeries> {
        self.expire_if_stale(today);
        self.entries.get(&date).cloned()
    }

    /// Clock-injected insert; `today` is the current local day.
    pub fn insert_as_of(&mut self, date: NaiveDate, series: PriceSeries, today: NaiveDate) {
        self.expire_if_stale(today);
        self.entries.insert(date, series);
        self.filled_on = Some(today);
    }

    /// Number of cached dates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache currently holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn expire_if_stale(&mut self, today: NaiveDate) {
        if self.filled_on.is_some_and(|day| day != today) {
            self.entries.clear();
            self.filled_on = None;
        }
    }
}
