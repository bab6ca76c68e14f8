//! Error taxonomy shared across the advisor.

use std::error::Error;
use std::fmt;

/// All failures the advisor can surface.
///
/// Every variant is a local validation failure raised synchronously at the
/// point of construction or call; nothing here is transient or retried.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvisorError {
    /// Price input was empty, contained duplicate hours or negative prices,
    /// or the upstream source produced no usable data for the day.
    InvalidPriceData(String),
    /// A lookup asked for an hour the series does not contain.
    HourNotFound(u32),
    /// Window duration outside `1..=series length`.
    InvalidDuration { duration: usize, len: usize },
    /// Optimization request with an out-of-range duration or energy amount.
    InvalidRequest(String),
}

impl fmt::Display for AdvisorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPriceData(msg) => write!(f, "invalid price data: {msg}"),
            Self::HourNotFound(hour) => write!(f, "no price for hour {hour}"),
            Self::InvalidDuration { duration, len } => write!(
                f,
                "invalid window duration {duration}h for a series of {len} price points"
            ),
            Self::InvalidRequest(msg) => write!(f, "invalid request: {msg}"),
        }
    }
}

impl Error for AdvisorError {}
