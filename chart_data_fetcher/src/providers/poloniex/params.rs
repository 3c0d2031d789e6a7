use reqwest::Url;

use crate::models::fetch_config::FetchConfig;

/// Name of the public API command serving candlestick history.
pub const CHART_DATA_COMMAND: &str = "returnChartData";

/// Query parameters for a chart data request, in the order they are sent.
pub fn construct_params(config: &FetchConfig) -> Vec<(&'static str, String)> {
    vec![
        ("command", CHART_DATA_COMMAND.to_string()),
        ("currencyPair", config.currency_pair.to_string()),
        ("start", config.start_timestamp().to_string()),
        ("end", config.end_timestamp().to_string()),
        ("period", config.period.as_secs().to_string()),
    ]
}

/// Builds the full request URL. Any query already present on `base_url` is replaced.
///
/// The pair is sent as given; the exchange decides whether it is valid.
pub fn build_request_url(base_url: &Url, config: &FetchConfig) -> Url {
    let mut url = base_url.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(construct_params(config));
    url
}
