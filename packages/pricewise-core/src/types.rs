//! Core data types for the pricewise analysis core.

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single OHLCV bar for one sampling interval.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceBar {
    /// Session date the bar opens on
    #[serde(rename = "date")]
    pub timestamp: NaiveDate,
    /// Opening price
    pub open: f64,
    /// Highest price during the interval
    pub high: f64,
    /// Lowest price during the interval
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Volume traded during the interval
    pub volume: f64,
}

impl PriceBar {
    /// Create a bar from its OHLCV fields.
    pub fn new(timestamp: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Sampling interval of a price series.
///
/// Parses from and displays as the market-data codes `1d`, `1wk` and `1mo`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Interval {
    #[default]
    #[serde(rename = "1d")]
    Daily,
    #[serde(rename = "1wk")]
    Weekly,
    #[serde(rename = "1mo")]
    Monthly,
}

impl Interval {
    /// All supported intervals, finest first.
    pub const ALL: [Interval; 3] = [Interval::Daily, Interval::Weekly, Interval::Monthly];

    /// The market-data code for this interval.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "1d",
            Interval::Weekly => "1wk",
            Interval::Monthly => "1mo",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1d" => Ok(Interval::Daily),
            "1wk" => Ok(Interval::Weekly),
            "1mo" => Ok(Interval::Monthly),
            other => Err(Error::InvalidInput(format!(
                "unknown interval '{}', expected one of 1d, 1wk, 1mo",
                other
            ))),
        }
    }
}

/// Ordered bars for one ticker over one queried range and interval.
///
/// Timestamps are strictly increasing; [`PriceSeries::new`] enforces this.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PriceSeries {
    /// Ticker symbol (uppercase)
    pub ticker: String,
    /// Sampling interval of every bar
    pub interval: Interval,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series, rejecting bars that are not in strictly increasing date order.
    pub fn new(ticker: &str, interval: Interval, bars: Vec<PriceBar>) -> Result<Self> {
        if let Some(pair) = bars.windows(2).find(|w| w[0].timestamp >= w[1].timestamp) {
            return Err(Error::InvalidInput(format!(
                "bars for {} are not strictly increasing: {} followed by {}",
                ticker.to_uppercase(),
                pair[0].timestamp,
                pair[1].timestamp
            )));
        }

        Ok(Self {
            ticker: ticker.to_uppercase(),
            interval,
            bars,
        })
    }

    /// All bars, oldest first.
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// Closing prices, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Volumes, oldest first.
    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    /// Most recent closing price, if any bar exists.
    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    /// Date of the oldest bar.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.timestamp)
    }

    /// Date of the newest bar.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.timestamp)
    }

    /// Number of bars.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// True when the series has no bars.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// A dividend payment from a ticker's dividend history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Dividend {
    /// Ex-dividend date
    pub date: NaiveDate,
    /// Amount paid per share
    pub amount: f64,
}

/// Fundamental fields for one ticker. Absent data is `None`, never zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct FundamentalSnapshot {
    /// Book value per share
    pub book_value_per_share: Option<f64>,
    /// Trailing twelve-month earnings per share
    pub trailing_eps: Option<f64>,
    /// Amount of the latest entry in the dividend history
    pub most_recent_dividend_per_share: Option<f64>,
}

impl FundamentalSnapshot {
    /// Build a snapshot, taking the dividend from the chronologically last history entry.
    ///
    /// The entry counts no matter how old it is.
    pub fn new(
        book_value_per_share: Option<f64>,
        trailing_eps: Option<f64>,
        dividends: &[Dividend],
    ) -> Self {
        Self {
            book_value_per_share: book_value_per_share.filter(|v| v.is_finite()),
            trailing_eps: trailing_eps.filter(|v| v.is_finite()),
            most_recent_dividend_per_share: latest_dividend(dividends),
        }
    }
}

fn latest_dividend(dividends: &[Dividend]) -> Option<f64> {
    if dividends.windows(2).any(|w| w[0].date > w[1].date) {
        tracing::warn!("dividend history is not sorted by date, using the latest entry");
    }

    dividends
        .iter()
        .filter(|d| d.amount.is_finite())
        .max_by_key(|d| d.date)
        .map(|d| d.amount)
}

/// Buy/hold/sell recommendation derived from price and moving averages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TradeSignal {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for TradeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TradeSignal::Buy => "buy",
            TradeSignal::Sell => "sell",
            TradeSignal::Hold => "hold",
        };
        f.write_str(label)
    }
}

/// API response wrapper for success cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bar(day: u32, close: f64) -> PriceBar {
        PriceBar::new(date(2024, 1, day), close, close, close, close, 1000.0)
    }

    #[test]
    fn test_series_new_uppercases_ticker() {
        let series = PriceSeries::new("petr4.sa", Interval::Daily, vec![bar(2, 10.0)]).unwrap();
        assert_eq!(series.ticker, "PETR4.SA");
        assert_eq!(series.last_close(), Some(10.0));
    }

    #[test]
    fn test_series_rejects_unordered_bars() {
        let result = PriceSeries::new("VALE3.SA", Interval::Daily, vec![bar(3, 10.0), bar(2, 11.0)]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));

        let duplicate = PriceSeries::new("VALE3.SA", Interval::Daily, vec![bar(2, 10.0), bar(2, 11.0)]);
        assert!(matches!(duplicate, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_empty_series() {
        let series = PriceSeries::new("VALE3.SA", Interval::Daily, Vec::new()).unwrap();
        assert!(series.is_empty());
        assert!(series.last_close().is_none());
        assert!(series.first_date().is_none());
    }

    #[test]
    fn test_interval_parse_and_display() {
        assert_eq!("1d".parse::<Interval>().unwrap(), Interval::Daily);
        assert_eq!(" 1WK ".parse::<Interval>().unwrap(), Interval::Weekly);
        assert_eq!("1mo".parse::<Interval>().unwrap(), Interval::Monthly);
        assert!("5m".parse::<Interval>().is_err());

        for interval in Interval::ALL {
            assert_eq!(interval.to_string().parse::<Interval>().unwrap(), interval);
        }
    }

    #[test]
    fn test_interval_serde_codes() {
        assert_eq!(serde_json::to_string(&Interval::Weekly).unwrap(), "\"1wk\"");
        let parsed: Interval = serde_json::from_str("\"1mo\"").unwrap();
        assert_eq!(parsed, Interval::Monthly);
    }

    #[test]
    fn test_snapshot_takes_last_dividend_regardless_of_age() {
        let history = vec![
            Dividend { date: date(2015, 3, 1), amount: 0.40 },
            Dividend { date: date(2016, 9, 1), amount: 0.75 },
        ];
        let snapshot = FundamentalSnapshot::new(Some(10.0), Some(2.0), &history);
        assert_eq!(snapshot.most_recent_dividend_per_share, Some(0.75));
    }

    #[test]
    fn test_snapshot_unsorted_dividends() {
        let history = vec![
            Dividend { date: date(2023, 9, 1), amount: 0.90 },
            Dividend { date: date(2023, 3, 1), amount: 0.50 },
        ];
        let snapshot = FundamentalSnapshot::new(None, None, &history);
        assert_eq!(snapshot.most_recent_dividend_per_share, Some(0.90));
    }

    #[test]
    fn test_snapshot_missing_fields() {
        let snapshot = FundamentalSnapshot::new(None, Some(f64::NAN), &[]);
        assert!(snapshot.book_value_per_share.is_none());
        assert!(snapshot.trailing_eps.is_none());
        assert!(snapshot.most_recent_dividend_per_share.is_none());
    }

    #[test]
    fn test_trade_signal_serde() {
        assert_eq!(serde_json::to_string(&TradeSignal::Buy).unwrap(), "\"buy\"");
        assert_eq!(TradeSignal::Hold.to_string(), "hold");
    }

    #[test]
    fn test_api_response() {
        let response: ApiResponse<String> = ApiResponse::ok("test".to_string());
        assert!(response.ok);
        assert_eq!(response.data, Some("test".to_string()));

        let err_response: ApiResponse<String> = ApiResponse::err("error");
        assert!(!err_response.ok);
        assert_eq!(err_response.error, Some("error".to_string()));
    }
}
