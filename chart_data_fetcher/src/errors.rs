use thiserror::Error;

use crate::io::sink::SinkError;
use crate::models::fetch_config::ConfigError;
use crate::providers::{ProviderError, ProviderInitError};

/// The unified error type for the `chart_data_fetcher` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// An error originating from the data provider (network, API, payload).
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The provider could not be created.
    #[error("Provider initialization error: {0}")]
    ProviderInit(#[from] ProviderInitError),

    /// An error writing the output (e.g., file I/O).
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// The fetch request itself is unusable.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Whether running the pipeline again may succeed. Only transient provider failures are.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Provider(e) => e.is_retryable(),
            Error::ProviderInit(_) | Error::Sink(_) | Error::Config(_) => false,
        }
    }
}
