use std::path::PathBuf;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::candle::CandleSeries;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// The destination could not be created, written or replaced.
    #[snafu(display("I/O error on {}: {source}", path.display()))]
    Io {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// A record could not be encoded to, or decoded from, CSV.
    #[snafu(display("CSV error on {}: {source}", path.display()))]
    Csv {
        path: PathBuf,
        source: ::csv::Error,
        backtrace: Backtrace,
    },
}

#[async_trait]
pub trait DataSink {
    /// The type of output returned after a successful write operation.
    ///
    /// A file sink returns the path it wrote; other sinks may return a row count.
    type Output;

    /// Writes `series` to the destination, replacing whatever a previous write left there.
    async fn write(&self, series: &CandleSeries) -> Result<Self::Output, SinkError>;
}
