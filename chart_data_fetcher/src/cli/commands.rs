use std::path::PathBuf;

use clap::Parser;

use crate::models::period::Period;

/// Pull candlestick price data from the Poloniex public API and save it as CSV.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// A Poloniex currency pair. Use --pairs to list them
    #[arg(long, default_value = "USDT_LTC")]
    pub currency_pair: String,

    /// Candle length in seconds: 300, 900, 1800, 7200, 14400 or 86400
    #[arg(long, default_value_t = Period::FourHours)]
    pub period: Period,

    /// Output CSV path. Defaults to $HOME/<PAIR>_<PERIOD>.csv
    #[arg(long)]
    pub dest: Option<PathBuf>,

    /// Start date (YYYY-MM-DD, UTC). Defaults to 30 days ago
    #[arg(long)]
    pub start_date: Option<String>,

    /// End date (YYYY-MM-DD, UTC). Defaults to now
    #[arg(long)]
    pub end_date: Option<String>,

    /// Print the known currency pairs and exit
    #[arg(long)]
    pub pairs: bool,

    /// Path to a TOML settings file (endpoint, timeout, retry bounds)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
