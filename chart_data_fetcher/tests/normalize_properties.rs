use chart_data_fetcher::models::{
    candle::{RawCandle, normalize},
    currency_pair::CurrencyPair,
    period::Period,
};
use proptest::prelude::*;

fn raw_candle() -> impl Strategy<Value = RawCandle> {
    (0i64..4_000_000_000, 0.0f64..100_000.0, 0.0f64..1e9).prop_map(|(date, price, volume)| {
        RawCandle {
            date,
            high: price * 1.01,
            low: price * 0.99,
            open: price,
            close: price,
            volume,
            quote_volume: volume / 2.0,
            weighted_average: price,
        }
    })
}

proptest! {
    #[test]
    fn output_is_sorted_whatever_the_input_order(raw in prop::collection::vec(raw_candle(), 0..64)) {
        let series = normalize(&CurrencyPair::default(), Period::FiveMinutes, &raw).unwrap();

        prop_assert_eq!(series.len(), raw.len());
        prop_assert!(series.candles.windows(2).all(|w| w[0].datetime_utc <= w[1].datetime_utc));
    }

    #[test]
    fn normalize_is_deterministic(raw in prop::collection::vec(raw_candle(), 0..64)) {
        let pair = CurrencyPair::default();

        let first = normalize(&pair, Period::OneDay, &raw).unwrap();
        let second = normalize(&pair, Period::OneDay, &raw).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn reversed_input_gives_the_same_timestamps(mut raw in prop::collection::vec(raw_candle(), 0..64)) {
        let pair = CurrencyPair::default();
        let forward = normalize(&pair, Period::OneDay, &raw).unwrap();
        raw.reverse();
        let backward = normalize(&pair, Period::OneDay, &raw).unwrap();

        let times = |s: &chart_data_fetcher::models::candle::CandleSeries| {
            s.candles.iter().map(|c| c.datetime_utc).collect::<Vec<_>>()
        };
        prop_assert_eq!(times(&forward), times(&backward));
    }
}
