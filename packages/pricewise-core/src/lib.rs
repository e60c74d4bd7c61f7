//! Pricewise Core - stock analysis library.
//!
//! This crate provides the computational core of the pricewise stock analyzer:
//!
//! - **Technical indicators**: SMA, plus MACD and Bollinger overlays via `ta`
//! - **Trade signal**: buy/hold/sell from the last close against two SMAs
//! - **Valuation**: Graham fair value and Bazin ceiling price
//! - **Cost basis**: weighted average price after a new purchase
//! - **Market data**: provider trait with an offline JSON dataset implementation
//!
//! Data that is naturally absent (no EPS, too little history) comes back as
//! `None`; malformed input and zero-quantity averages are [`Error`]s.
//!
//! # Example
//!
//! ```rust
//! use pricewise_core::portfolio::weighted_average_price;
//! use pricewise_core::valuation::{bazin_ceiling_price, graham_fair_value, DEFAULT_BAZIN_YIELD};
//!
//! let graham = graham_fair_value(Some(10.0), Some(2.0));
//! let bazin = bazin_ceiling_price(None, DEFAULT_BAZIN_YIELD);
//! assert!(graham.is_some());
//! assert!(bazin.is_none());
//!
//! let average = weighted_average_price(&[10.0], &[100.0], 10.0, 100.0).unwrap();
//! assert_eq!(average, 10.0);
//! ```

pub mod analysis;
pub mod config;
pub mod indicators;
pub mod market_data;
pub mod portfolio;
pub mod signal;
pub mod types;
pub mod valuation;

// Re-export commonly used types
pub use types::{
    ApiResponse, Dividend, FundamentalSnapshot, Interval, PriceBar, PriceSeries, TradeSignal,
};

// Re-export main functionality
pub use analysis::{analyze, run_analysis, AnalysisReport};
pub use config::Config;
pub use indicators::{bollinger_bands, latest_sma, macd, sma, BollingerBands, Macd};
pub use market_data::{JsonFileProvider, MarketDataProvider, SeriesRequest};
pub use portfolio::{weighted_average_price, Holding, Lot};
pub use signal::{classify, trade_signal, SignalWindows};
pub use valuation::{bazin_ceiling_price, format_brl, graham_fair_value, Valuation};

/// Error types for pricewise-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Division by zero: total quantity is zero")]
    DivisionByZero,

    #[error("Unknown ticker: {0}")]
    UnknownTicker(String),

    #[error("Indicator error: {0}")]
    Indicator(String),
}

/// Result type for pricewise-core operations.
pub type Result<T> = std::result::Result<T, Error>;
