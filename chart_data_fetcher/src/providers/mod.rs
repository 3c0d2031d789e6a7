//! Provider abstraction for chart data sources.
//!
//! [`ChartDataProvider`] is the seam between the fetch pipeline and a concrete exchange.
//! A provider turns a [`FetchConfig`] into the raw candles the exchange returned, surfacing
//! transport and API failures as [`ProviderError`]. Normalizing and persisting those candles
//! is left to the caller.
//!
//! The trait is async and object safe, so callers can hold a `Box<dyn ChartDataProvider>`
//! or swap in a test double.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use chart_data_fetcher::models::{candle::RawCandle, fetch_config::FetchConfig};
//! use chart_data_fetcher::providers::{ChartDataProvider, ProviderError};
//!
//! struct EmptyProvider;
//!
//! #[async_trait]
//! impl ChartDataProvider for EmptyProvider {
//!     async fn fetch_candles(
//!         &self,
//!         _config: &FetchConfig,
//!     ) -> Result<Vec<RawCandle>, ProviderError> {
//!         Ok(vec![])
//!     }
//! }
//! ```

pub mod poloniex;

use async_trait::async_trait;
use reqwest::StatusCode;
use snafu::{Backtrace, Snafu};

use crate::models::{
    candle::RawCandle,
    currency_pair::{CurrencyPair, known_pairs},
    fetch_config::FetchConfig,
};

/// Fetches raw candlestick data for one request.
#[async_trait]
pub trait ChartDataProvider: Send + Sync {
    /// Fetches the candles described by `config`, in whatever order the source returns them.
    async fn fetch_candles(&self, config: &FetchConfig) -> Result<Vec<RawCandle>, ProviderError>;
}

#[async_trait]
impl<P: ChartDataProvider + ?Sized> ChartDataProvider for Box<P> {
    async fn fetch_candles(&self, config: &FetchConfig) -> Result<Vec<RawCandle>, ProviderError> {
        (**self).fetch_candles(config).await
    }
}

/// Errors that can occur during the creation of a provider instance.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    #[snafu(display("Invalid base URL '{url}': {message}"))]
    InvalidBaseUrl {
        url: String,
        message: String,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `ChartDataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// The request never produced a response (connection failure, timeout, DNS).
    #[snafu(display("API request failed: {source}"))]
    Request {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The server answered with a non-success status and no API error payload.
    #[snafu(display("API returned HTTP {status}: {body}"))]
    HttpStatus {
        status: StatusCode,
        body: String,
        backtrace: Backtrace,
    },

    /// The exchange rejected the currency pair.
    #[snafu(display(
        "{pair} is not a valid currency pair. You must use one of:\n{}",
        known_pairs().collect::<Vec<_>>().join(", ")
    ))]
    InvalidCurrencyPair {
        pair: CurrencyPair,
        backtrace: Backtrace,
    },

    /// The exchange returned an error payload other than an invalid pair.
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The body was not JSON, or not the candle schema.
    #[snafu(display("Malformed API response: {source}"))]
    MalformedResponse {
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// A candle carried a timestamp outside the representable calendar range.
    #[snafu(display("Candle timestamp {date} is out of range"))]
    InvalidTimestamp { date: i64, backtrace: Backtrace },
}

impl ProviderError {
    /// Whether trying the same request again may succeed.
    ///
    /// Transport failures, throttling, server errors and garbled bodies are transient.
    /// Anything the exchange rejected on its merits is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Request { source, .. } => !source.is_builder(),
            ProviderError::HttpStatus { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            ProviderError::MalformedResponse { .. } => true,
            ProviderError::InvalidCurrencyPair { .. }
            | ProviderError::Api { .. }
            | ProviderError::InvalidTimestamp { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProvider;
    struct FailingProvider;

    #[async_trait]
    impl ChartDataProvider for FixedProvider {
        async fn fetch_candles(&self, _config: &FetchConfig) -> Result<Vec<RawCandle>, ProviderError> {
            Ok(vec![RawCandle {
                date: 1_405_699_200,
                high: 2.0,
                low: 1.0,
                open: 1.5,
                close: 1.8,
                volume: 10.0,
                quote_volume: 6.0,
                weighted_average: 1.6,
            }])
        }
    }

    #[async_trait]
    impl ChartDataProvider for FailingProvider {
        async fn fetch_candles(&self, config: &FetchConfig) -> Result<Vec<RawCandle>, ProviderError> {
            InvalidCurrencyPairSnafu {
                pair: config.currency_pair.clone(),
            }
            .fail()
        }
    }

    fn get_provider(name: &str) -> Box<dyn ChartDataProvider> {
        if name == "fixed" {
            Box::new(FixedProvider)
        } else {
            Box::new(FailingProvider)
        }
    }

    #[tokio::test]
    async fn test_dynamic_provider() {
        let config = FetchConfig::new(None, None, None, None, None).unwrap();

        let candles = get_provider("fixed").fetch_candles(&config).await.unwrap();
        assert_eq!(candles.len(), 1);

        let err = get_provider("failing").fetch_candles(&config).await.unwrap_err();
        assert!(!err.is_retryable());
    }

    #[test]
    fn invalid_pair_message_lists_every_known_pair() {
        let err = InvalidCurrencyPairSnafu {
            pair: CurrencyPair::new("FOO_BAR"),
        }
        .build();
        let message = err.to_string();

        assert!(message.starts_with("FOO_BAR is not a valid currency pair."));
        assert!(known_pairs().all(|pair| message.contains(pair)));
    }

    #[test]
    fn status_classification() {
        let status = |code: StatusCode| {
            HttpStatusSnafu {
                status: code,
                body: "",
            }
            .build()
        };

        assert!(status(StatusCode::BAD_GATEWAY).is_retryable());
        assert!(status(StatusCode::TOO_MANY_REQUESTS).is_retryable());
        assert!(!status(StatusCode::NOT_FOUND).is_retryable());
        assert!(!ApiSnafu { message: "nope" }.build().is_retryable());
    }
}
