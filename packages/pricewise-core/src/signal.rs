//! Buy/hold/sell heuristic comparing the last close to two moving averages.

use crate::indicators::latest_sma;
use crate::types::TradeSignal;
use serde::{Deserialize, Serialize};

/// SMA windows compared against the last close.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SignalWindows {
    /// Short SMA window
    pub short_window: usize,
    /// Long SMA window
    pub long_window: usize,
}

impl Default for SignalWindows {
    fn default() -> Self {
        Self {
            short_window: 20,
            long_window: 50,
        }
    }
}

/// Classify the last close against the short and long SMA.
///
/// Buy when the close is strictly above both averages, sell when strictly below
/// both, hold otherwise (including any tie).
pub fn classify(last_close: f64, sma_short: f64, sma_long: f64) -> TradeSignal {
    if last_close > sma_short && last_close > sma_long {
        TradeSignal::Buy
    } else if last_close < sma_short && last_close < sma_long {
        TradeSignal::Sell
    } else {
        TradeSignal::Hold
    }
}

/// Derive the trade signal for a close series.
///
/// Returns `None` when the series is too short for the long window (or the
/// latest close is missing); the caller decides how to show that.
///
/// # Example
///
/// ```rust
/// use pricewise_core::signal::{trade_signal, SignalWindows};
/// use pricewise_core::TradeSignal;
///
/// let rising: Vec<f64> = (1..=60).map(|i| i as f64).collect();
/// assert_eq!(trade_signal(&rising, &SignalWindows::default()), Some(TradeSignal::Buy));
///
/// assert_eq!(trade_signal(&rising[..49], &SignalWindows::default()), None);
/// ```
pub fn trade_signal(closes: &[f64], windows: &SignalWindows) -> Option<TradeSignal> {
    let last = closes.last().copied().filter(|c| c.is_finite())?;
    let (sma_short, sma_long) = latest_sma_pair(closes, windows);

    Some(classify(last, sma_short?, sma_long?))
}

/// Latest short and long SMA values the signal compares against.
pub fn latest_sma_pair(closes: &[f64], windows: &SignalWindows) -> (Option<f64>, Option<f64>) {
    (
        latest_sma(closes, windows.short_window),
        latest_sma(closes, windows.long_window),
    )
}
