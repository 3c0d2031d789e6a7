pub mod candle;
pub mod currency_pair;
pub mod fetch_config;
pub mod period;
