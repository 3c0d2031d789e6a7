//! Candlestick records: the raw shape the exchange returns and the normalized shape written out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snafu::OptionExt;

use crate::models::{currency_pair::CurrencyPair, period::Period};
use crate::providers::{InvalidTimestampSnafu, ProviderError};

/// Column names of the output file, in order.
pub const CSV_HEADER: [&str; 8] = [
    "datetime_utc",
    "open",
    "high",
    "low",
    "close",
    "quoteVolume",
    "volume",
    "weightedAverage",
];

/// One candle exactly as the chart data endpoint returns it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCandle {
    /// Interval start, unix seconds.
    pub date: i64,
    pub high: f64,
    pub low: f64,
    pub open: f64,
    pub close: f64,
    /// Volume in the base (first) currency of the pair.
    pub volume: f64,
    /// Volume in the quote (second) currency of the pair.
    pub quote_volume: f64,
    pub weighted_average: f64,
}

/// A normalized candle. Field order is the column order of the output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    #[serde(with = "csv_datetime")]
    pub datetime_utc: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(rename = "quoteVolume")]
    pub quote_volume: f64,
    pub volume: f64,
    #[serde(rename = "weightedAverage")]
    pub weighted_average: f64,
}

/// All candles for one pair and period, ascending by `datetime_utc`.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleSeries {
    pub currency_pair: CurrencyPair,
    pub period: Period,
    pub candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }
}

/// Converts raw candles into a [`CandleSeries`] sorted by time.
///
/// The exchange does not promise any order, so the sort is always applied. It is stable:
/// candles sharing a timestamp keep their input order, which makes the result a pure
/// function of `raw`.
pub fn normalize(
    currency_pair: &CurrencyPair,
    period: Period,
    raw: &[RawCandle],
) -> Result<CandleSeries, ProviderError> {
    let mut candles = raw
        .iter()
        .map(|rc| {
            let datetime_utc = DateTime::from_timestamp(rc.date, 0)
                .context(InvalidTimestampSnafu { date: rc.date })?;
            Ok::<_, ProviderError>(Candle {
                datetime_utc,
                open: rc.open,
                high: rc.high,
                low: rc.low,
                close: rc.close,
                quote_volume: rc.quote_volume,
                volume: rc.volume,
                weighted_average: rc.weighted_average,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    candles.sort_by_key(|candle| candle.datetime_utc);

    Ok(CandleSeries {
        currency_pair: currency_pair.clone(),
        period,
        candles,
    })
}

/// `YYYY-MM-DD HH:MM:SS` in UTC, the datetime layout of the output file.
pub(crate) mod csv_datetime {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&dt.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(D::Error::custom)
    }
}
