//! Pricewise CLI - stock analysis and average-price calculator.
//!
//! Every command prints an `ApiResponse` JSON envelope on stdout; logs go to stderr.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use pricewise_core::{
    analysis::run_analysis,
    config::Config,
    market_data::{JsonFileProvider, SeriesRequest},
    portfolio::{parse_number_list, parse_price_list, parse_quantity_list, weighted_average_price},
    signal::{latest_sma_pair, trade_signal},
    valuation::{format_brl, Valuation},
    ApiResponse, FundamentalSnapshot, Interval,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "pricewise")]
#[command(about = "Pricewise CLI - stock charts, indicators, valuation and average price")]
#[command(version)]
struct Cli {
    /// Config file (defaults to PRICEWISE_CONFIG or ~/.pricewise/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the configured tickers
    Tickers,
    /// Analyze a ticker: history, indicators, valuation and signal
    Analyze {
        /// Ticker symbol (the exchange suffix may be omitted)
        #[arg(short, long)]
        ticker: String,
        /// First date included (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<NaiveDate>,
        /// First date excluded (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        end: Option<NaiveDate>,
        /// Sampling interval: 1d, 1wk or 1mo
        #[arg(short, long)]
        interval: Option<Interval>,
        /// Dataset directory
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Recompute the average price after a new purchase
    Average {
        /// Prior prices, comma-separated
        #[arg(short, long, default_value = "")]
        prices: String,
        /// Prior quantities, comma-separated
        #[arg(short, long, default_value = "")]
        quantities: String,
        /// Price of the new purchase
        #[arg(long, default_value = "0.0")]
        price: f64,
        /// Quantity of the new purchase
        #[arg(long, default_value = "0")]
        quantity: f64,
    },
    /// Graham fair value and Bazin ceiling price from manual inputs
    Valuation {
        /// Book value per share
        #[arg(long)]
        book_value: Option<f64>,
        /// Trailing earnings per share
        #[arg(long)]
        eps: Option<f64>,
        /// Most recent dividend per share
        #[arg(long)]
        dividend: Option<f64>,
    },
    /// Buy/hold/sell signal for a list of closes
    Signal {
        /// Closing prices, oldest first, comma-separated
        #[arg(short, long)]
        closes: String,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    let cli = Cli::parse();

    let result = load_config(cli.config).and_then(|config| match cli.command {
        Commands::Tickers => handle_tickers(&config),
        Commands::Analyze {
            ticker,
            start,
            end,
            interval,
            data_dir,
        } => handle_analyze(&config, &ticker, start, end, interval, data_dir),
        Commands::Average {
            prices,
            quantities,
            price,
            quantity,
        } => handle_average(&prices, &quantities, price, quantity),
        Commands::Valuation {
            book_value,
            eps,
            dividend,
        } => handle_valuation(&config, book_value, eps, dividend),
        Commands::Signal { closes } => handle_signal(&config, &closes),
    });

    let (output, code) = match result {
        Ok(data) => (serde_json::to_string_pretty(&ApiResponse::ok(data))?, ExitCode::SUCCESS),
        Err(e) => {
            tracing::error!("{}", e);
            (
                serde_json::to_string_pretty(&ApiResponse::<()>::err(e.to_string()))?,
                ExitCode::FAILURE,
            )
        }
    };

    println!("{}", output);
    Ok(code)
}

fn load_config(path: Option<PathBuf>) -> pricewise_core::Result<Config> {
    match path {
        Some(path) => Config::load_with_env(&path),
        None => Config::load(),
    }
}

fn handle_tickers(config: &Config) -> pricewise_core::Result<Value> {
    Ok(json!({
        "tickers": config.tickers,
        "count": config.tickers.len(),
    }))
}

fn handle_analyze(
    config: &Config,
    ticker: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    interval: Option<Interval>,
    data_dir: Option<PathBuf>,
) -> pricewise_core::Result<Value> {
    let ticker = config.resolve_ticker(ticker)?;
    let request = SeriesRequest::new(
        &ticker,
        start.unwrap_or(config.default_start),
        end.unwrap_or_else(|| Local::now().date_naive()),
        interval.unwrap_or(config.default_interval),
    )?;

    let provider = JsonFileProvider::new(data_dir.unwrap_or_else(|| config.data_dir()));
    tracing::info!(
        "analyzing {} from {} ({})",
        ticker,
        provider.data_dir().display(),
        request.interval
    );

    let report = run_analysis(&provider, &request, config)?;
    Ok(serde_json::to_value(report)?)
}

fn handle_average(
    prices: &str,
    quantities: &str,
    price: f64,
    quantity: f64,
) -> pricewise_core::Result<Value> {
    let prior_prices = parse_price_list(prices)?;
    let prior_quantities = parse_quantity_list(quantities)?;
    let average = weighted_average_price(&prior_prices, &prior_quantities, price, quantity)?;

    Ok(json!({
        "average_price": average,
        "formatted": format_brl(Some(average)),
        "total_quantity": prior_quantities.iter().sum::<f64>() + quantity,
    }))
}

fn handle_valuation(
    config: &Config,
    book_value: Option<f64>,
    eps: Option<f64>,
    dividend: Option<f64>,
) -> pricewise_core::Result<Value> {
    let snapshot = FundamentalSnapshot {
        book_value_per_share: book_value,
        trailing_eps: eps,
        most_recent_dividend_per_share: dividend,
    };
    let valuation = Valuation::from_snapshot(&snapshot, config.valuation.bazin_yield);

    Ok(json!({
        "valuation": valuation,
        "bazin_yield": config.valuation.bazin_yield,
        "summary": {
            "graham_fair_value": format_brl(valuation.graham_fair_value),
            "bazin_ceiling_price": format_brl(valuation.bazin_ceiling_price),
        },
    }))
}

fn handle_signal(config: &Config, closes: &str) -> pricewise_core::Result<Value> {
    let closes = parse_number_list(closes)?;
    let signal = trade_signal(&closes, &config.signal);
    let (sma_short, sma_long) = latest_sma_pair(&closes, &config.signal);

    Ok(json!({
        "signal": signal,
        "last_close": closes.last(),
        "sma_short": sma_short,
        "sma_long": sma_long,
        "short_window": config.signal.short_window,
        "long_window": config.signal.long_window,
    }))
}
