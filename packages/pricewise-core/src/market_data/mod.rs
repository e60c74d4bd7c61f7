//! Market data provider abstraction.
//!
//! [`MarketDataProvider`] is the boundary between the analysis core and
//! wherever price history and fundamentals come from. [`JsonFileProvider`]
//! serves them from an offline dataset of one JSON file per ticker.

mod file;
mod resample;

pub use file::{JsonFileProvider, TickerDataset};
pub use resample::resample;

use crate::types::{FundamentalSnapshot, Interval, PriceSeries};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Price history query for one ticker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesRequest {
    /// Ticker symbol
    pub ticker: String,
    /// First date included
    pub start: NaiveDate,
    /// First date excluded
    pub end: NaiveDate,
    /// Sampling interval
    pub interval: Interval,
}

impl SeriesRequest {
    /// Build a request, rejecting empty ranges (`start >= end`).
    pub fn new(ticker: &str, start: NaiveDate, end: NaiveDate, interval: Interval) -> Result<Self> {
        if start >= end {
            return Err(Error::InvalidInput(format!(
                "start date {} must be before end date {}",
                start, end
            )));
        }

        Ok(Self {
            ticker: ticker.to_uppercase(),
            start,
            end,
            interval,
        })
    }

    /// Whether `date` falls inside `[start, end)`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

/// Source of price history and fundamentals.
pub trait MarketDataProvider {
    /// Bars for the requested ticker, range and interval, oldest first.
    fn fetch_series(&self, request: &SeriesRequest) -> Result<PriceSeries>;

    /// Latest fundamentals for `ticker`.
    fn fundamentals(&self, ticker: &str) -> Result<FundamentalSnapshot>;
}
