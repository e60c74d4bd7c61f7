//! One ticker query end to end: price history, indicators, valuation and signal.

use crate::config::Config;
use crate::indicators::{bollinger_bands, macd, sma, BollingerBands, Macd};
use crate::market_data::{MarketDataProvider, SeriesRequest};
use crate::signal::trade_signal;
use crate::types::{FundamentalSnapshot, Interval, PriceBar, PriceSeries, TradeSignal};
use crate::valuation::{format_brl, Valuation};
use crate::Result;
use chrono::NaiveDate;
use serde::Serialize;

/// Display strings for the scalar results; missing values read "N/A".
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportSummary {
    pub last_close: String,
    pub graham_fair_value: String,
    pub bazin_ceiling_price: String,
    pub signal: String,
}

/// Everything derived for one ticker query.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Ticker symbol
    pub ticker: String,
    /// Sampling interval of `bars`
    pub interval: Interval,
    /// Date of the first bar
    pub first_date: Option<NaiveDate>,
    /// Date of the last bar
    pub last_date: Option<NaiveDate>,
    /// Price history, oldest first
    pub bars: Vec<PriceBar>,
    /// Window of `sma`
    pub sma_window: usize,
    /// SMA of closes, aligned with `bars`
    pub sma: Vec<Option<f64>>,
    /// MACD overlay, aligned with `bars`
    pub macd: Macd,
    /// Bollinger overlay, aligned with `bars`
    pub bollinger: BollingerBands,
    /// Fundamentals used for valuation
    pub fundamentals: FundamentalSnapshot,
    /// Graham and Bazin estimates
    pub valuation: Valuation,
    /// Latest close
    pub last_close: Option<f64>,
    /// Trade signal, `None` with insufficient history
    pub signal: Option<TradeSignal>,
    pub summary: ReportSummary,
}

/// Derive indicators, valuation and signal for an already fetched series.
pub fn analyze(
    series: &PriceSeries,
    fundamentals: FundamentalSnapshot,
    config: &Config,
) -> Result<AnalysisReport> {
    let closes = series.closes();

    let sma_values = sma(&closes, config.sma_window);
    let macd_values = macd(&closes, &config.macd)?;
    let bollinger = bollinger_bands(&closes, &config.bollinger)?;

    let valuation = Valuation::from_snapshot(&fundamentals, config.valuation.bazin_yield);
    let signal = trade_signal(&closes, &config.signal);
    let last_close = series.last_close();

    if signal.is_none() {
        tracing::debug!(
            "{}: {} bars, not enough for the {}-period signal",
            series.ticker,
            series.len(),
            config.signal.long_window
        );
    }

    let summary = ReportSummary {
        last_close: format_brl(last_close),
        graham_fair_value: format_brl(valuation.graham_fair_value),
        bazin_ceiling_price: format_brl(valuation.bazin_ceiling_price),
        signal: signal
            .map(|s| s.to_string())
            .unwrap_or_else(|| "N/A".to_string()),
    };

    Ok(AnalysisReport {
        ticker: series.ticker.clone(),
        interval: series.interval,
        first_date: series.first_date(),
        last_date: series.last_date(),
        bars: series.bars().to_vec(),
        sma_window: config.sma_window,
        sma: sma_values,
        macd: macd_values,
        bollinger,
        fundamentals,
        valuation,
        last_close,
        signal,
        summary,
    })
}

/// Fetch the series and fundamentals for `request` and analyze them.
pub fn run_analysis<P>(provider: &P, request: &SeriesRequest, config: &Config) -> Result<AnalysisReport>
where
    P: MarketDataProvider + ?Sized,
{
    let series = provider.fetch_series(request)?;
    let fundamentals = provider.fundamentals(&request.ticker)?;

    tracing::debug!(
        "analyzing {} bars of {} ({}) from {} to {}",
        series.len(),
        request.ticker,
        request.interval,
        request.start,
        request.end
    );

    analyze(&series, fundamentals, config)
}
