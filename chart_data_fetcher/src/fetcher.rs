//! The fetch → parse → normalize → persist pipeline.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{
    errors::Error,
    io::{csv_file::CsvSink, sink::DataSink},
    models::{
        candle::{CandleSeries, normalize},
        fetch_config::{ConfigError, FetchConfig},
    },
    providers::{ChartDataProvider, poloniex::PoloniexProvider},
    retry::{RetryPolicy, retry},
    settings::Settings,
};

/// What a successful [`ChartDataFetcher::run`] produced.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The series was written to this path.
    Saved(PathBuf),
    /// The series, handed back without touching the filesystem.
    InMemory(CandleSeries),
}

impl RunOutcome {
    pub fn into_series(self) -> Option<CandleSeries> {
        match self {
            RunOutcome::InMemory(series) => Some(series),
            RunOutcome::Saved(_) => None,
        }
    }
}

pub struct ChartDataFetcher<P = PoloniexProvider> {
    provider: P,
    retry_policy: RetryPolicy,
}

impl ChartDataFetcher<PoloniexProvider> {
    /// A fetcher talking to the exchange described by `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self, Error> {
        let provider = PoloniexProvider::new(settings)?;
        Ok(Self::new(provider, settings.retry_policy()))
    }
}

impl<P: ChartDataProvider> ChartDataFetcher<P> {
    pub fn new(provider: P, retry_policy: RetryPolicy) -> Self {
        Self {
            provider,
            retry_policy,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Runs the whole pipeline, retrying it from the network call on transient failures.
    ///
    /// With `save`, the series is written to `config.destination` (which must be set) and
    /// the path is returned. Without it, the series is returned in memory.
    pub async fn run(&self, config: &FetchConfig, save: bool) -> Result<RunOutcome, Error> {
        let destination = match (save, &config.destination) {
            (true, Some(path)) => Some(path.as_path()),
            (true, None) => return Err(ConfigError::MissingDestination.into()),
            (false, _) => None,
        };

        if !config.currency_pair.is_known() {
            warn!(pair = %config.currency_pair, "currency pair is not in the known pair list");
        }
        info!(
            pair = %config.currency_pair,
            period = %config.period,
            start = config.start_timestamp(),
            end = config.end_timestamp(),
            "fetching chart data"
        );

        let outcome = retry(
            &self.retry_policy,
            |attempt| self.run_once(config, destination, attempt),
            Error::is_retryable,
        )
        .await?;

        match &outcome {
            RunOutcome::Saved(path) => info!(path = %path.display(), "chart data saved"),
            RunOutcome::InMemory(series) => info!(rows = series.len(), "chart data fetched"),
        }
        Ok(outcome)
    }

    async fn run_once(
        &self,
        config: &FetchConfig,
        destination: Option<&Path>,
        attempt: u32,
    ) -> Result<RunOutcome, Error> {
        debug!(attempt, "starting attempt");

        let raw = self.provider.fetch_candles(config).await?;
        let series = normalize(&config.currency_pair, config.period, &raw)?;
        debug!(attempt, rows = series.len(), "chart data normalized");

        match destination {
            Some(path) => {
                let written = CsvSink::new(path).write(&series).await?;
                Ok(RunOutcome::Saved(written))
            }
            None => Ok(RunOutcome::InMemory(series)),
        }
    }
}
