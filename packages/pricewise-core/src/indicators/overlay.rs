//! MACD and Bollinger Band overlays backed by the `ta` crate.
//!
//! The numeric work is done by `ta`; these wrappers only feed closes through
//! the streaming indicators and mark warm-up positions as missing.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use ta::indicators::{BollingerBands as TaBollingerBands, MovingAverageConvergenceDivergence};
use ta::Next;

/// MACD periods.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MacdParams {
    /// Fast EMA period
    pub fast: usize,
    /// Slow EMA period
    pub slow: usize,
    /// Signal line EMA period
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

/// Bollinger Band settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BollingerParams {
    /// Moving average window
    pub window: usize,
    /// Band width in standard deviations
    pub std_dev: f64,
}

impl Default for BollingerParams {
    fn default() -> Self {
        Self {
            window: 20,
            std_dev: 2.0,
        }
    }
}

/// MACD result.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Macd {
    /// MACD line (fast EMA - slow EMA), missing until the slow EMA has a full window
    pub macd_line: Vec<Option<f64>>,
    /// Signal line (EMA of MACD line), missing until its own window is full
    pub signal_line: Vec<Option<f64>>,
}

/// Bollinger Bands result.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BollingerBands {
    /// Upper band
    pub high: Vec<Option<f64>>,
    /// Lower band
    pub low: Vec<Option<f64>>,
}

/// Calculate MACD line and signal line.
///
/// # Arguments
///
/// * `closes` - Closing prices, oldest first
/// * `params` - Fast, slow and signal periods (typically 12/26/9)
///
/// # Errors
///
/// Returns [`Error::Indicator`] when `ta` rejects the periods (e.g. a zero period).
pub fn macd(closes: &[f64], params: &MacdParams) -> Result<Macd> {
    let mut indicator =
        MovingAverageConvergenceDivergence::new(params.fast, params.slow, params.signal)
            .map_err(|e| Error::Indicator(format!("MACD {:?}: {:?}", params, e)))?;

    let line_ready = params.slow.saturating_sub(1);
    let signal_ready = line_ready + params.signal.saturating_sub(1);

    let mut macd_line = Vec::with_capacity(closes.len());
    let mut signal_line = Vec::with_capacity(closes.len());

    for (i, &close) in closes.iter().enumerate() {
        let out = indicator.next(close);
        macd_line.push((i >= line_ready).then_some(out.macd));
        signal_line.push((i >= signal_ready).then_some(out.signal));
    }

    Ok(Macd {
        macd_line,
        signal_line,
    })
}

/// Calculate Bollinger high and low bands.
///
/// # Arguments
///
/// * `closes` - Closing prices, oldest first
/// * `params` - Window (typically 20) and width in standard deviations (typically 2.0)
///
/// # Errors
///
/// Returns [`Error::Indicator`] when `ta` rejects the settings.
pub fn bollinger_bands(closes: &[f64], params: &BollingerParams) -> Result<BollingerBands> {
    let mut indicator = TaBollingerBands::new(params.window, params.std_dev)
        .map_err(|e| Error::Indicator(format!("Bollinger {:?}: {:?}", params, e)))?;

    let ready = params.window.saturating_sub(1);
    let mut high = Vec::with_capacity(closes.len());
    let mut low = Vec::with_capacity(closes.len());

    for (i, &close) in closes.iter().enumerate() {
        let out = indicator.next(close);
        high.push((i >= ready).then_some(out.upper));
        low.push((i >= ready).then_some(out.lower));
    }

    Ok(BollingerBands { high, low })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn wave(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + (i as f64).sin() * 5.0).collect()
    }

    #[test]
    fn test_macd_lengths_and_warmup() {
        let data = wave(60);
        let result = macd(&data, &MacdParams::default()).unwrap();

        assert_eq!(result.macd_line.len(), 60);
        assert_eq!(result.signal_line.len(), 60);

        assert!(result.macd_line[..25].iter().all(|v| v.is_none()));
        assert!(result.macd_line[25..].iter().all(|v| v.is_some()));

        // 26 + 9 - 2
        assert!(result.signal_line[..33].iter().all(|v| v.is_none()));
        assert!(result.signal_line[33..].iter().all(|v| v.is_some()));
    }

    #[test]
    fn test_macd_flat_series_is_zero() {
        let data = vec![50.0; 40];
        let result = macd(&data, &MacdParams::default()).unwrap();

        assert_relative_eq!(result.macd_line[39].unwrap(), 0.0, epsilon = 1e-9);
        assert_relative_eq!(result.signal_line[39].unwrap(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_macd_rejects_zero_period() {
        let params = MacdParams {
            fast: 0,
            ..Default::default()
        };
        assert!(matches!(macd(&wave(10), &params), Err(Error::Indicator(_))));
    }

    #[test]
    fn test_bollinger_bands() {
        let data: Vec<f64> = (0..30).map(|i| 100.0 + (i as f64) * 0.5).collect();
        let bb = bollinger_bands(&data, &BollingerParams::default()).unwrap();

        assert_eq!(bb.high.len(), 30);
        assert!(bb.high[18].is_none());
        assert!(bb.low[18].is_none());

        let high = bb.high[25].unwrap();
        let low = bb.low[25].unwrap();
        assert!(high > low);
    }

    #[test]
    fn test_bollinger_flat_series_collapses() {
        let data = vec![20.0; 25];
        let bb = bollinger_bands(&data, &BollingerParams::default()).unwrap();

        assert_relative_eq!(bb.high[24].unwrap(), 20.0, epsilon = 1e-9);
        assert_relative_eq!(bb.low[24].unwrap(), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_closes() {
        let result = macd(&[], &MacdParams::default()).unwrap();
        assert!(result.macd_line.is_empty());

        let bb = bollinger_bands(&[], &BollingerParams::default()).unwrap();
        assert!(bb.high.is_empty());
    }
}
