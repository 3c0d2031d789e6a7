use serde_json::Value;
use snafu::ResultExt;

use crate::models::{candle::RawCandle, currency_pair::CurrencyPair};
use crate::providers::{ApiSnafu, InvalidCurrencyPairSnafu, MalformedResponseSnafu, ProviderError};

/// Error text the exchange sends for a pair it does not list.
pub const INVALID_PAIR_ERROR: &str = "Invalid currency pair.";

/// Parses a chart data response body.
///
/// A successful response is a JSON array of candles. Any JSON object is an error
/// envelope, normally `{"error": "..."}`.
pub fn parse_response(body: &str, currency_pair: &CurrencyPair) -> Result<Vec<RawCandle>, ProviderError> {
    let value: Value = serde_json::from_str(body).context(MalformedResponseSnafu)?;

    let Value::Object(envelope) = value else {
        return serde_json::from_value(value).context(MalformedResponseSnafu);
    };

    match envelope.get("error").and_then(Value::as_str) {
        Some(INVALID_PAIR_ERROR) => InvalidCurrencyPairSnafu {
            pair: currency_pair.clone(),
        }
        .fail(),
        Some(message) => ApiSnafu { message }.fail(),
        None => ApiSnafu {
            message: format!("unexpected response object: {}", Value::Object(envelope.clone())),
        }
        .fail(),
    }
}

/// Whether `body` is an error envelope rather than data.
pub fn is_error_envelope(body: &str) -> bool {
    matches!(serde_json::from_str::<Value>(body), Ok(Value::Object(_)))
}
