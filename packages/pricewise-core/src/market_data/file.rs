//! Offline market data served from `<data_dir>/<TICKER>.json` files.

use super::{resample, MarketDataProvider, SeriesRequest};
use crate::types::{Dividend, FundamentalSnapshot, PriceBar, PriceSeries};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk contents for one ticker: daily bars, fundamentals and dividend history.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TickerDataset {
    /// Daily bars
    pub bars: Vec<PriceBar>,
    /// Book value per share
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_value_per_share: Option<f64>,
    /// Trailing twelve-month EPS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailing_eps: Option<f64>,
    /// Dividend history
    #[serde(default)]
    pub dividends: Vec<Dividend>,
}

/// Provider reading one JSON [`TickerDataset`] per ticker from a directory.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    data_dir: PathBuf,
}

impl JsonFileProvider {
    /// Create a provider over `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Get the dataset directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the dataset file for `ticker`.
    pub fn dataset_path(&self, ticker: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", ticker.to_uppercase()))
    }

    /// Load the dataset for `ticker`.
    pub fn load(&self, ticker: &str) -> Result<TickerDataset> {
        let path = self.dataset_path(ticker);
        if !path.exists() {
            return Err(Error::UnknownTicker(format!(
                "{} (no dataset at {})",
                ticker.to_uppercase(),
                path.display()
            )));
        }

        let content = fs::read_to_string(&path)?;
        let dataset: TickerDataset = serde_json::from_str(&content)?;
        tracing::debug!(
            "loaded {} bars and {} dividends from {}",
            dataset.bars.len(),
            dataset.dividends.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Write the dataset for `ticker`, creating the directory if needed.
    pub fn store(&self, ticker: &str, dataset: &TickerDataset) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        let content = serde_json::to_string_pretty(dataset)?;
        fs::write(self.dataset_path(ticker), content)?;
        Ok(())
    }
}

impl MarketDataProvider for JsonFileProvider {
    fn fetch_series(&self, request: &SeriesRequest) -> Result<PriceSeries> {
        let dataset = self.load(&request.ticker)?;

        let mut bars: Vec<PriceBar> = dataset
            .bars
            .into_iter()
            .filter(|b| request.contains(b.timestamp))
            .collect();
        bars.sort_by_key(|b| b.timestamp);

        let bars = resample(&bars, request.interval);
        PriceSeries::new(&request.ticker, request.interval, bars)
    }

    fn fundamentals(&self, ticker: &str) -> Result<FundamentalSnapshot> {
        let dataset = self.load(ticker)?;
        Ok(FundamentalSnapshot::new(
            dataset.book_value_per_share,
            dataset.trailing_eps,
            &dataset.dividends,
        ))
    }
}
