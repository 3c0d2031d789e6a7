//! Fetches historical candlestick (OHLCV) data for a currency pair from the Poloniex
//! public API, normalizes it, and writes it as CSV or hands it back in memory.

#[cfg(feature = "cli")]
pub mod cli;
pub mod errors;
pub mod fetcher;
pub mod io;
pub mod models;
pub mod providers;
pub mod retry;
pub mod settings;

pub use errors::Error;
pub use fetcher::{ChartDataFetcher, RunOutcome};
