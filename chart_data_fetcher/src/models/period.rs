use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Invalid period {seconds}s: valid values are 300, 900, 1800, 7200, 14400 and 86400")]
    Unsupported { seconds: u32 },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

/// Candlestick interval accepted by the chart data endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Period {
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    TwoHours,
    #[default]
    FourHours,
    OneDay,
}

impl Period {
    pub const ALL: [Period; 6] = [
        Period::FiveMinutes,
        Period::FifteenMinutes,
        Period::ThirtyMinutes,
        Period::TwoHours,
        Period::FourHours,
        Period::OneDay,
    ];

    /// Interval length in seconds, as sent on the wire.
    pub fn as_secs(self) -> u32 {
        match self {
            Period::FiveMinutes => 300,
            Period::FifteenMinutes => 900,
            Period::ThirtyMinutes => 1800,
            Period::TwoHours => 7200,
            Period::FourHours => 14400,
            Period::OneDay => 86400,
        }
    }
}

impl TryFrom<u32> for Period {
    type Error = PeriodError;

    fn try_from(seconds: u32) -> Result<Self, Self::Error> {
        Period::ALL
            .into_iter()
            .find(|period| period.as_secs() == seconds)
            .ok_or(PeriodError::Unsupported { seconds })
    }
}

impl From<Period> for u32 {
    fn from(period: Period) -> Self {
        period.as_secs()
    }
}

impl FromStr for Period {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let seconds = s.trim().parse::<u32>().map_err(|e| PeriodError::InvalidInput {
            message: format!("'{s}' is not a number of seconds ({e})"),
        })?;
        Period::try_from(seconds)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_secs())
    }
}
