//! CSV output: one header row, one row per candle, no index column.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use snafu::ResultExt;
use tempfile::{Builder, NamedTempFile};
use tracing::debug;

use crate::io::sink::{CsvSnafu, DataSink, IoSnafu, SinkError};
use crate::models::candle::{CSV_HEADER, Candle, CandleSeries};

#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Writes a [`CandleSeries`] to a CSV file.
///
/// Rows go to a temporary file next to the destination, which is then renamed over it.
/// Readers never observe a half-written file and repeated writes replace, never append.
/// An existing destination keeps its permissions; a new one gets `0o644` less the umask.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Temp file in `dir` carrying the permissions the destination should end up with.
    fn temp_file_in(&self, dir: &Path) -> Result<NamedTempFile, SinkError> {
        let existing = fs::metadata(&self.path).ok().map(|meta| meta.permissions());

        let mut builder = Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(NEW_FILE_MODE));
        }
        let tmp = builder.tempfile_in(dir).context(IoSnafu { path: dir })?;

        // explicit set bypasses the umask
        if let Some(permissions) = existing {
            tmp.as_file()
                .set_permissions(permissions)
                .context(IoSnafu { path: &self.path })?;
        }
        Ok(tmp)
    }

    fn write_file(&self, series: &CandleSeries) -> Result<(), SinkError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let tmp = self.temp_file_in(dir)?;

        {
            let mut writer = ::csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(tmp.as_file());
            writer
                .write_record(CSV_HEADER)
                .context(CsvSnafu { path: &self.path })?;
            for candle in &series.candles {
                writer.serialize(candle).context(CsvSnafu { path: &self.path })?;
            }
            writer.flush().context(IoSnafu { path: &self.path })?;
        }
        tmp.as_file().sync_all().context(IoSnafu { path: &self.path })?;

        tmp.persist(&self.path)
            .map_err(|e| e.error)
            .context(IoSnafu { path: &self.path })?;
        Ok(())
    }
}

#[async_trait]
impl DataSink for CsvSink {
    type Output = PathBuf;

    async fn write(&self, series: &CandleSeries) -> Result<PathBuf, SinkError> {
        self.write_file(series)?;
        debug!(rows = series.len(), path = %self.path.display(), "csv written");
        Ok(self.path.clone())
    }
}

/// Reads a file written by [`CsvSink`] back into candles, in file order.
pub fn read_candles(path: &Path) -> Result<Vec<Candle>, SinkError> {
    let mut reader = ::csv::Reader::from_path(path).context(CsvSnafu { path })?;
    reader
        .deserialize()
        .collect::<Result<Vec<Candle>, _>>()
        .context(CsvSnafu { path })
}
