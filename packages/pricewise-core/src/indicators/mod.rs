//! Technical indicators for price-chart overlays.
//!
//! - **SMA**: Simple Moving Average, computed here
//! - **MACD**: Moving Average Convergence Divergence, via `ta`
//! - **Bollinger Bands**: volatility bands around a moving average, via `ta`
//!
//! Positions without enough history are `None` in every output series.

mod overlay;
mod sma;

pub use overlay::{bollinger_bands, macd, BollingerBands, BollingerParams, Macd, MacdParams};
pub use sma::{latest_sma, sma, DEFAULT_SMA_WINDOW};
