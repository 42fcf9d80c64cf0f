//! Persisted two-column series store
//!
//! The store is a CSV file with a `Date,Value` header. Its location is always supplied
//! by the caller; nothing in the crate assumes a fixed path.

use crate::data::{TimeSeries, DATE_COLUMN, DATE_FORMAT, VALUE_COLUMN};
use crate::error::Result;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File-backed store for a single daily series
#[derive(Debug, Clone)]
pub struct SeriesStore {
    path: PathBuf,
}

impl SeriesStore {
    /// Create a store for the file at `path` (the file need not exist yet)
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether the backing file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the whole series
    pub fn load(&self) -> Result<TimeSeries> {
        let file = File::open(&self.path)?;
        let series = TimeSeries::load(file)?;
        debug!(path = %self.path.display(), points = series.len(), "loaded series");
        Ok(series)
    }

    /// Replace the stored series with `series`
    pub fn save(&self, series: &TimeSeries) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record([DATE_COLUMN, VALUE_COLUMN])?;
        for point in series.points() {
            writer.write_record([
                point.date.format(DATE_FORMAT).to_string(),
                point.value.to_string(),
            ])?;
        }
        writer.flush()?;
        debug!(path = %self.path.display(), points = series.len(), "saved series");
        Ok(())
    }

    /// Truncate the store to its header-only form
    pub fn clear(&self) -> Result<()> {
        self.save(&TimeSeries::default())
    }
}
