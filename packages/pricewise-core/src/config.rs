//! Runtime configuration: ticker list, indicator windows and valuation rate.
//!
//! Loaded from TOML. Every field is optional and falls back to the defaults
//! below, so an absent config file means "use the defaults".

use crate::indicators::{BollingerParams, MacdParams, DEFAULT_SMA_WINDOW};
use crate::signal::SignalWindows;
use crate::types::Interval;
use crate::valuation::DEFAULT_BAZIN_YIELD;
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// B3 tickers offered when no list is configured.
pub const DEFAULT_TICKERS: &[&str] = &[
    "ABEV3.SA", "BBAS3.SA", "BBDC3.SA", "BBDC4.SA", "BBSE3.SA", "BRAP4.SA", "BRFS3.SA",
    "BRKM5.SA", "BRML3.SA", "BRSR6.SA", "CCRO3.SA", "CIEL3.SA", "CMIG4.SA", "CSAN3.SA",
    "CSNA3.SA", "CYRE3.SA", "ECOR3.SA", "EGIE3.SA", "ELET3.SA", "ELET6.SA", "EMBR3.SA",
    "ENBR3.SA", "ENEV3.SA", "ENGI11.SA", "EQTL3.SA", "EZTC3.SA", "FLRY3.SA", "GGBR4.SA",
    "GOAU4.SA", "GOLL4.SA", "HAPV3.SA", "HYPE3.SA", "ITSA4.SA", "ITUB4.SA", "JBSS3.SA",
    "KLBN11.SA", "LAME4.SA", "LREN3.SA", "MGLU3.SA", "MRFG3.SA", "MRVE3.SA", "MULT3.SA",
    "NTCO3.SA", "PCAR3.SA", "PETR3.SA", "PETR4.SA", "QUAL3.SA", "RADL3.SA", "RAIL3.SA",
    "RENT3.SA", "SANB11.SA", "SBSP3.SA", "SULA11.SA", "SUZB3.SA", "TAEE11.SA", "TIMP3.SA",
    "UGPA3.SA", "USIM5.SA", "VALE3.SA", "VIVT3.SA", "VVAR3.SA", "WEGE3.SA", "YDUQ3.SA",
];

/// Valuation settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValuationConfig {
    /// Target dividend yield for the Bazin ceiling price
    pub bazin_yield: f64,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            bazin_yield: DEFAULT_BAZIN_YIELD,
        }
    }
}

/// Full configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Tickers that may be analyzed
    pub tickers: Vec<String>,
    /// Exchange suffix appended to bare ticker codes (e.g. `PETR4` -> `PETR4.SA`)
    pub ticker_suffix: String,
    /// Window of the charted SMA series
    pub sma_window: usize,
    /// Windows for the trade signal
    pub signal: SignalWindows,
    /// MACD periods
    pub macd: MacdParams,
    /// Bollinger Band settings
    pub bollinger: BollingerParams,
    /// Valuation settings
    pub valuation: ValuationConfig,
    /// Dataset directory for the file provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Interval used when a query does not name one
    pub default_interval: Interval,
    /// Start date used when a query does not name one
    pub default_start: NaiveDate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tickers: DEFAULT_TICKERS.iter().map(|t| t.to_string()).collect(),
            ticker_suffix: ".SA".to_string(),
            sma_window: DEFAULT_SMA_WINDOW,
            signal: SignalWindows::default(),
            macd: MacdParams::default(),
            bollinger: BollingerParams::default(),
            valuation: ValuationConfig::default(),
            data_dir: None,
            default_interval: Interval::Daily,
            default_start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
        }
    }
}

impl Config {
    /// Get the default config file path.
    ///
    /// Default path: `~/.pricewise/config.toml`
    /// Can be overridden with `PRICEWISE_CONFIG` environment variable.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var("PRICEWISE_CONFIG") {
            return PathBuf::from(path);
        }

        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".pricewise/config.toml"))
            .unwrap_or_else(|| PathBuf::from("pricewise.toml"))
    }

    /// Get the default dataset directory (`~/.pricewise/data`).
    pub fn default_data_dir() -> PathBuf {
        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".pricewise/data"))
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    /// Load from the default path, then apply `PRICEWISE_DATA_DIR`.
    pub fn load() -> Result<Self> {
        Self::load_with_env(&Self::default_path())
    }

    /// Load from `path`, then apply `PRICEWISE_DATA_DIR`.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let config = Self::load_from_path(path)?;
        Ok(config.with_data_dir_override(env::var_os("PRICEWISE_DATA_DIR").map(PathBuf::from)))
    }

    fn with_data_dir_override(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            tracing::debug!("data_dir overridden to {}", dir.display());
            self.data_dir = Some(dir);
        }
        self
    }

    /// Load from a specific path. A missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.tickers = config
            .tickers
            .iter()
            .map(|t| t.trim().to_uppercase())
            .filter(|t| !t.is_empty())
            .collect();
        config.validate()?;
        Ok(config)
    }

    /// Check windows, rates and the ticker list.
    pub fn validate(&self) -> Result<()> {
        if self.tickers.is_empty() {
            return Err(Error::InvalidInput("ticker list is empty".to_string()));
        }
        if self.sma_window == 0 {
            return Err(Error::InvalidInput("sma_window must be positive".to_string()));
        }
        if self.signal.short_window == 0 || self.signal.short_window >= self.signal.long_window {
            return Err(Error::InvalidInput(format!(
                "signal windows must satisfy 0 < short ({}) < long ({})",
                self.signal.short_window, self.signal.long_window
            )));
        }
        if self.macd.fast == 0 || self.macd.signal == 0 || self.macd.fast >= self.macd.slow {
            return Err(Error::InvalidInput(format!(
                "MACD periods must satisfy 0 < fast ({}) < slow ({}) and signal ({}) > 0",
                self.macd.fast, self.macd.slow, self.macd.signal
            )));
        }
        if self.bollinger.window == 0
            || !(self.bollinger.std_dev.is_finite() && self.bollinger.std_dev > 0.0)
        {
            return Err(Error::InvalidInput(format!(
                "Bollinger window ({}) and std_dev ({}) must be positive",
                self.bollinger.window, self.bollinger.std_dev
            )));
        }
        if !(self.valuation.bazin_yield.is_finite() && self.valuation.bazin_yield > 0.0) {
            return Err(Error::InvalidInput(format!(
                "bazin_yield ({}) must be a positive rate",
                self.valuation.bazin_yield
            )));
        }
        Ok(())
    }

    /// Configured dataset directory, or the default one.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(Self::default_data_dir)
    }

    /// Resolve user input to a configured ticker.
    ///
    /// Matching is case-insensitive. Input that names a configured ticker as
    /// typed wins; otherwise a bare code gets the exchange suffix, so `petr4`
    /// resolves to `PETR4.SA`.
    pub fn resolve_ticker(&self, input: &str) -> Result<String> {
        let typed = input.trim().to_uppercase();
        if let Some(found) = self.find_ticker(&typed) {
            return Ok(found);
        }

        let suffix = self.ticker_suffix.to_uppercase();
        if !suffix.is_empty() && !typed.ends_with(&suffix) {
            if let Some(found) = self.find_ticker(&format!("{}{}", typed, suffix)) {
                return Ok(found);
            }
        }

        Err(Error::UnknownTicker(input.trim().to_string()))
    }

    fn find_ticker(&self, ticker: &str) -> Option<String> {
        self.tickers
            .iter()
            .find(|t| t.eq_ignore_ascii_case(ticker))
            .map(|t| t.to_uppercase())
    }
}
