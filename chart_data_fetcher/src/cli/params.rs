use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use shared_utils::env::{MissingEnvVarError, get_env_var};

use crate::models::{
    currency_pair::CurrencyPair,
    fetch_config::{ConfigError, DATE_FORMAT, EndBound, FetchConfig},
    period::Period,
};

use super::commands::Cli;

/// How far back the CLI reaches when no start date is given.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;

pub fn default_start_date(now: DateTime<Utc>) -> String {
    (now - Duration::days(DEFAULT_LOOKBACK_DAYS))
        .format(DATE_FORMAT)
        .to_string()
}

/// `{home}/{PAIR}_{PERIOD}.csv`
pub fn default_destination(home: &Path, pair: &CurrencyPair, period: Period) -> PathBuf {
    home.join(format!("{pair}_{period}.csv"))
}

pub fn home_dir() -> Result<PathBuf, MissingEnvVarError> {
    get_env_var("HOME")
        .or_else(|_| get_env_var("USERPROFILE"))
        .map(PathBuf::from)
}

/// Turns parsed flags into a [`FetchConfig`].
///
/// Unlike the library default, the CLI never leaves the end open: without `--end-date`
/// the range ends at `now`.
pub fn build_fetch_config(cli: &Cli, home: &Path, now: DateTime<Utc>) -> Result<FetchConfig, ConfigError> {
    let pair = CurrencyPair::new(&cli.currency_pair);
    let start_date = cli
        .start_date
        .clone()
        .unwrap_or_else(|| default_start_date(now));
    let destination = cli
        .dest
        .clone()
        .unwrap_or_else(|| default_destination(home, &pair, cli.period));

    let mut config = FetchConfig::new(
        Some(pair.as_str()),
        Some(&start_date),
        cli.end_date.as_deref(),
        Some(cli.period),
        Some(destination),
    )?;
    if cli.end_date.is_none() {
        config.end = EndBound::At(now);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use clap::Parser;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn start_defaults_to_thirty_days_back() {
        assert_eq!(default_start_date(now()), "2024-02-14");
    }

    #[test]
    fn destination_is_named_after_pair_and_period() {
        let path = default_destination(
            Path::new("/home/trader"),
            &CurrencyPair::new("usdt_ltc"),
            Period::FourHours,
        );
        assert_eq!(path, PathBuf::from("/home/trader/USDT_LTC_14400.csv"));
    }

    #[test]
    fn config_from_default_flags() {
        let cli = Cli::try_parse_from(["chart-data-fetcher"]).unwrap();

        let config = build_fetch_config(&cli, Path::new("/home/trader"), now()).unwrap();

        assert_eq!(config.currency_pair.as_str(), "USDT_LTC");
        assert_eq!(config.start, Utc.with_ymd_and_hms(2024, 2, 14, 0, 0, 0).unwrap());
        assert_eq!(config.end, EndBound::At(now()));
        assert_eq!(
            config.destination,
            Some(PathBuf::from("/home/trader/USDT_LTC_14400.csv"))
        );
    }

    #[test]
    fn explicit_flags_win() {
        let cli = Cli::try_parse_from([
            "chart-data-fetcher",
            "--dest",
            "out.csv",
            "--start-date",
            "2017-01-01",
            "--end-date",
            "2017-02-01",
        ])
        .unwrap();

        let config = build_fetch_config(&cli, Path::new("/home/trader"), now()).unwrap();

        assert_eq!(config.destination, Some(PathBuf::from("out.csv")));
        assert_eq!(
            config.end,
            EndBound::At(Utc.with_ymd_and_hms(2017, 2, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn bad_date_flag_is_a_config_error() {
        let cli = Cli::try_parse_from(["chart-data-fetcher", "--start-date", "last week"]).unwrap();

        assert!(build_fetch_config(&cli, Path::new("/tmp"), now()).is_err());
    }
}
