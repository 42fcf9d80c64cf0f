//! Daily time series data handling

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// ISO calendar date format used by the persisted series
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Name of the date column in persisted and tabular representations
pub const DATE_COLUMN: &str = "Date";
/// Name of the value column in persisted and tabular representations
pub const VALUE_COLUMN: &str = "Value";

const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// One observation of a daily series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Calendar day of the observation
    pub date: NaiveDate,
    /// Observed (or forecast) value
    pub value: f64,
}

impl DataPoint {
    /// Create a new data point
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Ordered daily series of `(date, value)` pairs.
///
/// Dates are strictly increasing. Historical points are never edited in place;
/// the only mutation besides a full [`replace`](TimeSeries::replace) is appending.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeries {
    points: Vec<DataPoint>,
}

impl TimeSeries {
    /// Create a series from points that are already in date order
    pub fn new(points: Vec<DataPoint>) -> Result<Self> {
        validate_order(&points)?;
        Ok(Self { points })
    }

    /// Create a series from `(date, value)` pairs
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(date, value)| DataPoint::new(date, value))
                .collect(),
        )
    }

    /// Parse two-column `date,value` rows, skipping a header row if one is present.
    ///
    /// Only a first row whose two fields are column names (letters, digits, `_`) counts
    /// as a header; any other unparseable first row is a format error.
    ///
    /// A row that does not have exactly two fields, carries a date that is not ISO
    /// `YYYY-MM-DD`, or carries a value that is not a finite number fails with
    /// [`ForecastError::FormatError`].
    pub fn load<R: Read>(source: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(source);

        let mut points = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(index as u64 + 1);

            if record.len() != 2 {
                return Err(ForecastError::FormatError(format!(
                    "line {}: expected 2 fields (date,value), found {}",
                    line,
                    record.len()
                )));
            }

            let (date_field, value_field) = (&record[0], &record[1]);
            if index == 0 && is_header(date_field, value_field) {
                continue;
            }

            let date = NaiveDate::parse_from_str(date_field, DATE_FORMAT).map_err(|e| {
                ForecastError::FormatError(format!(
                    "line {}: invalid date '{}': {}",
                    line, date_field, e
                ))
            })?;
            let value = value_field
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    ForecastError::FormatError(format!(
                        "line {}: value '{}' is not numeric",
                        line, value_field
                    ))
                })?;

            points.push(DataPoint::new(date, value));
        }

        Self::new(points)
    }

    /// Swap in a new sequence of points.
    ///
    /// The new points are validated first; on failure the current points are untouched.
    pub fn replace(&mut self, points: Vec<DataPoint>) -> Result<()> {
        validate_order(&points)?;
        self.points = points;
        Ok(())
    }

    /// Remove every point
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Append a point dated after the current last point
    pub fn push(&mut self, date: NaiveDate, value: f64) -> Result<()> {
        if let Some(last) = self.points.last() {
            if date <= last.date {
                return Err(ForecastError::DataError(format!(
                    "cannot append {} after {}: dates must be strictly increasing",
                    date, last.date
                )));
            }
        }
        self.points.push(DataPoint::new(date, value));
        Ok(())
    }

    /// The last `n` points, or every point when `n` exceeds the length
    pub fn tail(&self, n: usize) -> &[DataPoint] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }

    /// Values of the last `n` points
    pub fn tail_values(&self, n: usize) -> Vec<f64> {
        self.tail(n).iter().map(|p| p.value).collect()
    }

    /// A new series holding the first `n` points
    pub fn head(&self, n: usize) -> TimeSeries {
        let end = n.min(self.points.len());
        TimeSeries {
            points: self.points[..end].to_vec(),
        }
    }

    /// Points dated on or before `as_of`
    pub fn up_to(&self, as_of: NaiveDate) -> &[DataPoint] {
        let end = self.points.partition_point(|p| p.date <= as_of);
        &self.points[..end]
    }

    /// Value on `date`, or on the closest earlier date
    pub fn value_at_or_before(&self, date: NaiveDate) -> Option<f64> {
        self.up_to(date).last().map(|p| p.value)
    }

    /// Get all points
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    /// Get the values as a vector
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Get the dates as a vector
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// First point, if any
    pub fn first(&self) -> Option<&DataPoint> {
        self.points.first()
    }

    /// Last point, if any
    pub fn last(&self) -> Option<&DataPoint> {
        self.points.last()
    }

    /// Check if the time series is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get the length of the time series
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Convert to a two-column DataFrame (`Date` as ISO strings, `Value` as f64)
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let dates: Vec<String> = self
            .points
            .iter()
            .map(|p| p.date.format(DATE_FORMAT).to_string())
            .collect();
        let values = self.values();

        let df = DataFrame::new(vec![
            Series::new(DATE_COLUMN, dates),
            Series::new(VALUE_COLUMN, values),
        ])?;
        Ok(df)
    }

    /// Build a series from a DataFrame with `Date` and `Value` columns.
    ///
    /// `Date` may be an ISO string column or a polars `Date` column; `Value` may be any
    /// numeric type.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let date_col = df.column(DATE_COLUMN)?;
        let dates: Vec<Option<NaiveDate>> = match date_col.dtype() {
            DataType::Utf8 => date_col
                .utf8()?
                .into_iter()
                .map(|opt| {
                    opt.map(|s| {
                        NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| {
                            ForecastError::FormatError(format!("invalid date '{}': {}", s, e))
                        })
                    })
                    .transpose()
                })
                .collect::<Result<_>>()?,
            DataType::Date => date_col
                .cast(&DataType::Int32)?
                .i32()?
                .into_iter()
                .map(|opt| {
                    opt.and_then(|days| {
                        NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE)
                    })
                })
                .collect(),
            other => {
                return Err(ForecastError::DataError(format!(
                    "Column '{}' has unsupported type {}",
                    DATE_COLUMN, other
                )))
            }
        };

        let value_col = df.column(VALUE_COLUMN)?.cast(&DataType::Float64)?;
        let values: Vec<Option<f64>> = value_col.f64()?.into_iter().collect();

        let mut points = Vec::with_capacity(dates.len());
        for (row, (date, value)) in dates.into_iter().zip(values).enumerate() {
            match (date, value) {
                (Some(date), Some(value)) => points.push(DataPoint::new(date, value)),
                _ => {
                    return Err(ForecastError::DataError(format!(
                        "Row {} has a missing date or value",
                        row
                    )))
                }
            }
        }

        Self::new(points)
    }
}

/// A leading row is a header when neither field reads as data
/// A header row names its columns: both fields are identifiers such as `Date,Value`
fn is_header(date_field: &str, value_field: &str) -> bool {
    is_column_name(date_field) && is_column_name(value_field)
}

fn is_column_name(field: &str) -> bool {
    let mut chars = field.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic())
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == ' ')
}

fn validate_order(points: &[DataPoint]) -> Result<()> {
    if let Some(w) = points.windows(2).find(|w| w[1].date <= w[0].date) {
        return Err(ForecastError::DataError(format!(
            "dates must be strictly increasing: {} follows {}",
            w[1].date, w[0].date
        )));
    }
    Ok(())
}
