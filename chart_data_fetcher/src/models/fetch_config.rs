use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{currency_pair::CurrencyPair, period::Period};

/// Wire value the exchange accepts as "no upper bound".
pub const UNBOUNDED_END_TIMESTAMP: i64 = 9_999_999_999;

/// Start of the range when the caller gives no start date.
pub const DEFAULT_START_DATE: &str = "2015-01-01";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid date '{input}', expected YYYY-MM-DD: {source}")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("A destination path is required to save chart data")]
    MissingDestination,
}

/// Upper end of the requested time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndBound {
    At(DateTime<Utc>),
    /// Everything from the start onwards, including candles not yet closed at request time.
    Unbounded,
}

impl EndBound {
    pub fn timestamp(&self) -> i64 {
        match self {
            EndBound::At(end) => end.timestamp(),
            EndBound::Unbounded => UNBOUNDED_END_TIMESTAMP,
        }
    }
}

/// Everything needed to issue one chart data request. Built once per invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    pub currency_pair: CurrencyPair,

    /// Start of the requested range (inclusive, UTC midnight of the start date).
    pub start: DateTime<Utc>,

    pub end: EndBound,

    pub period: Period,

    /// Where [`ChartDataFetcher::run`](crate::fetcher::ChartDataFetcher::run) writes the CSV
    /// when asked to save.
    pub destination: Option<PathBuf>,
}

impl FetchConfig {
    /// Builds a config from loosely-typed caller input.
    ///
    /// * a missing `currency_pair` falls back to [`CurrencyPair::default`];
    /// * a missing `start_date` falls back to [`DEFAULT_START_DATE`];
    /// * a missing `end_date` leaves the range open ([`EndBound::Unbounded`]), not "now";
    /// * a missing `period` falls back to [`Period::default`].
    pub fn new(
        currency_pair: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
        period: Option<Period>,
        destination: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let currency_pair = currency_pair.map(CurrencyPair::new).unwrap_or_default();
        let start = parse_date(start_date.unwrap_or(DEFAULT_START_DATE))?;
        let end = match end_date {
            Some(date) => EndBound::At(parse_date(date)?),
            None => EndBound::Unbounded,
        };

        Ok(Self {
            currency_pair,
            start,
            end,
            period: period.unwrap_or_default(),
            destination,
        })
    }

    pub fn start_timestamp(&self) -> i64 {
        self.start.timestamp()
    }

    pub fn end_timestamp(&self) -> i64 {
        self.end.timestamp()
    }
}

/// Parses a `YYYY-MM-DD` calendar date as midnight UTC.
pub fn parse_date(input: &str) -> Result<DateTime<Utc>, ConfigError> {
    let date = NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|source| {
        ConfigError::InvalidDate {
            input: input.to_string(),
            source,
        }
    })?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}
