//! Column access and date coercion helpers shared by the transformations

use crate::error::{FeatureError, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use polars::prelude::*;

/// Datetime formats tried, in order, for string date columns
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Date-only formats tried, in order, for string date columns
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Unit used for normalized date columns
pub const NORMALIZED_TIME_UNIT: TimeUnit = TimeUnit::Milliseconds;

/// Look up a column, mapping absence to [`FeatureError::ColumnNotFound`]
pub fn require_column<'a>(df: &'a DataFrame, column_name: &str) -> Result<&'a Series> {
    df.column(column_name)
        .map_err(|_| FeatureError::ColumnNotFound(column_name.to_string()))
}

/// Look up a column that must hold numbers
pub fn require_numeric_column<'a>(df: &'a DataFrame, column_name: &str) -> Result<&'a Series> {
    let col = require_column(df, column_name)?;

    if !col.dtype().is_numeric() {
        return Err(FeatureError::DataError(format!(
            "Column '{}' must be numeric, got {}",
            column_name,
            col.dtype()
        )));
    }

    Ok(col)
}

/// Coerce a column to nullable datetimes
///
/// Accepts string, `Date` and `Datetime` columns. `Datetime` values are read
/// as stored, without any time-zone conversion. Any non-null value that
/// cannot be read, including one outside chrono's date range, fails the
/// whole column.
pub fn column_as_datetimes(
    df: &DataFrame,
    column_name: &str,
) -> Result<Vec<Option<NaiveDateTime>>> {
    let col = require_column(df, column_name)?;

    match col.dtype() {
        DataType::Utf8 => col
            .utf8()?
            .into_iter()
            .map(|opt| opt.map(|s| parse_datetime(column_name, s)).transpose())
            .collect(),
        DataType::Date => col
            .date()?
            .into_iter()
            .map(|opt| {
                opt.map(|days| {
                    epoch()
                        .checked_add_signed(Duration::days(days as i64))
                        .ok_or_else(|| out_of_range(column_name, days as i64))
                })
                .transpose()
            })
            .collect(),
        DataType::Datetime(unit, _) => {
            let unit = *unit;
            col.datetime()?
                .into_iter()
                .map(|opt| {
                    opt.map(|ts| from_timestamp(ts, unit).ok_or_else(|| out_of_range(column_name, ts)))
                        .transpose()
                })
                .collect()
        }
        DataType::Null => Ok(vec![None; col.len()]),
        other => Err(FeatureError::DateParse {
            column: column_name.to_string(),
            value: format!("unsupported dtype {}", other),
        }),
    }
}

/// Build a `Datetime(ms)` series from nullable datetimes
pub fn datetime_series(name: &str, values: &[Option<NaiveDateTime>]) -> Result<Series> {
    let millis: Vec<Option<i64>> = values
        .iter()
        .map(|opt| opt.map(|dt| (dt - epoch()).num_milliseconds()))
        .collect();

    let series = Series::new(name, millis).cast(&DataType::Datetime(NORMALIZED_TIME_UNIT, None))?;
    Ok(series)
}

/// Parse a single date string into a datetime
///
/// Date-only values land on midnight. RFC 3339 values with an offset keep
/// their wall-clock time.
pub fn parse_datetime(column_name: &str, raw: &str) -> Result<NaiveDateTime> {
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(midnight(date));
        }
    }

    Err(FeatureError::DateParse {
        column: column_name.to_string(),
        value: raw.to_string(),
    })
}

fn from_timestamp(ts: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let offset = match unit {
        TimeUnit::Nanoseconds => Duration::nanoseconds(ts),
        TimeUnit::Microseconds => Duration::microseconds(ts),
        TimeUnit::Milliseconds => Duration::milliseconds(ts),
    };
    epoch().checked_add_signed(offset)
}

fn out_of_range(column_name: &str, raw: i64) -> FeatureError {
    FeatureError::DateParse {
        column: column_name.to_string(),
        value: format!("{} is outside the supported date range", raw),
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    NaiveDateTime::new(date, chrono::NaiveTime::default())
}

fn epoch() -> NaiveDateTime {
    midnight(NaiveDate::default())
}
