use async_trait::async_trait;
use reqwest::{Client, Url};
use snafu::ResultExt;
use tracing::debug;

use crate::{
    models::{candle::RawCandle, fetch_config::FetchConfig},
    providers::{
        ChartDataProvider, ClientBuildSnafu, HttpStatusSnafu, InvalidBaseUrlSnafu, ProviderError,
        ProviderInitError, RequestSnafu,
        poloniex::{
            params::build_request_url,
            response::{is_error_envelope, parse_response},
        },
    },
    settings::Settings,
};

pub const DEFAULT_BASE_URL: &str = "https://poloniex.com/public";

pub struct PoloniexProvider {
    client: Client,
    base_url: Url,
}

impl PoloniexProvider {
    /// Creates a provider for the endpoint and request timeout in `settings`.
    pub fn new(settings: &Settings) -> Result<Self, ProviderInitError> {
        let base_url = Url::parse(&settings.base_url).map_err(|e| {
            InvalidBaseUrlSnafu {
                url: settings.base_url.as_str(),
                message: e.to_string(),
            }
            .build()
        })?;

        let client = Client::builder()
            .timeout(settings.request_timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self { client, base_url })
    }

    pub fn build_request_url(&self, config: &FetchConfig) -> Url {
        build_request_url(&self.base_url, config)
    }

    /// Issues the GET and returns the body text.
    ///
    /// A non-success status fails with [`ProviderError::HttpStatus`] unless the body is an
    /// API error envelope, which is handed back so the caller can report the API's own error.
    pub async fn fetch_raw(&self, url: &Url) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .context(RequestSnafu)?;

        let status = response.status();
        let body = response.text().await.context(RequestSnafu)?;

        if !status.is_success() && !is_error_envelope(&body) {
            return Err(HttpStatusSnafu { status, body }.build());
        }

        debug!(%status, bytes = body.len(), "chart data response received");
        Ok(body)
    }
}

#[async_trait]
impl ChartDataProvider for PoloniexProvider {
    async fn fetch_candles(&self, config: &FetchConfig) -> Result<Vec<RawCandle>, ProviderError> {
        let url = self.build_request_url(config);
        debug!(%url, "requesting chart data");

        let body = self.fetch_raw(&url).await?;
        parse_response(&body, &config.currency_pair)
    }
}

