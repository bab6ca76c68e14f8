//! Cheapest-window advisor for EV charging on Spanish PVPC hourly prices.

#[cfg(feature = "api")]
pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod optimizer;
/// Validated hourly price series and sliding-window enumeration.
pub mod prices;
pub mod report;
pub mod source;
