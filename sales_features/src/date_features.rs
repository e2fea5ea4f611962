//! Calendar-derived features for a date column
//!
//! The extractor normalizes the date column to `Datetime(ms)` and appends one
//! column per calendar attribute. Holiday and business-day flags come from the
//! injected [`BusinessCalendar`].

use crate::config::DateFeatureConfig;
use crate::data::{column_as_datetimes, datetime_series};
use crate::error::Result;
use biz_calendar::BusinessCalendar;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use log::debug;
use polars::prelude::*;

/// Names of the columns added by [`DateFeatureExtractor`], in insertion order
pub const FEATURE_COLUMNS: [&str; 12] = [
    "year",
    "month",
    "day",
    "day_of_week",
    "day_of_year",
    "week_of_year",
    "quarter",
    "is_leap_year",
    "is_month_start",
    "is_month_end",
    "is_holiday",
    "is_bizdays",
];

/// Calendar attributes of a single date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFeatures {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    /// 0 = Monday .. 6 = Sunday
    pub day_of_week: i32,
    /// 1-based
    pub day_of_year: i32,
    /// ISO week number
    pub week_of_year: i32,
    pub quarter: i32,
    pub is_leap_year: bool,
    pub is_month_start: bool,
    pub is_month_end: bool,
    pub is_holiday: bool,
    pub is_bizdays: bool,
}

impl DateFeatures {
    /// Compute the attributes of `date` against `calendar`
    pub fn compute<C: BusinessCalendar + ?Sized>(date: NaiveDate, calendar: &C) -> Self {
        let month = date.month();

        Self {
            year: date.year(),
            month: month as i32,
            day: date.day() as i32,
            day_of_week: date.weekday().num_days_from_monday() as i32,
            day_of_year: date.ordinal() as i32,
            week_of_year: date.iso_week().week() as i32,
            quarter: ((month - 1) / 3 + 1) as i32,
            is_leap_year: NaiveDate::from_ymd_opt(date.year(), 2, 29).is_some(),
            is_month_start: date.day() == 1,
            is_month_end: date.succ_opt().map_or(true, |next| next.month() != month),
            is_holiday: calendar.is_holiday(date),
            is_bizdays: calendar.is_business_day(date),
        }
    }
}

/// Appends calendar features for a date column
#[derive(Debug, Clone)]
pub struct DateFeatureExtractor<C: BusinessCalendar> {
    calendar: C,
}

impl<C: BusinessCalendar> DateFeatureExtractor<C> {
    /// Create an extractor backed by `calendar`
    pub fn new(calendar: C) -> Self {
        Self { calendar }
    }

    /// The calendar used for holiday and business-day flags
    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    /// Return a copy of `df` with the date column normalized and features appended
    pub fn extract(&self, df: &DataFrame, date_column: &str) -> Result<DataFrame> {
        let mut out = df.clone();
        self.extract_in_place(&mut out, date_column)?;
        Ok(out)
    }

    /// [`extract`](Self::extract) with the column name taken from a config
    pub fn extract_with_config(
        &self,
        df: &DataFrame,
        config: &DateFeatureConfig,
    ) -> Result<DataFrame> {
        self.extract(df, &config.date_column)
    }

    /// Normalize the date column and append features directly on `df`
    ///
    /// Nothing is written unless every value of the column can be read.
    pub fn extract_in_place(&self, df: &mut DataFrame, date_column: &str) -> Result<()> {
        let dates = column_as_datetimes(df, date_column)?;
        debug!(
            "extracting date features from '{}' ({} rows, calendar {})",
            date_column,
            dates.len(),
            self.calendar.name()
        );

        let features: Vec<Option<DateFeatures>> = dates
            .iter()
            .map(|opt| opt.map(|dt| self.features_for(dt)))
            .collect();

        let mut columns = vec![datetime_series(date_column, &dates)?];
        columns.extend(feature_series(&features));

        for column in columns {
            df.with_column(column)?;
        }
        Ok(())
    }

    fn features_for(&self, dt: NaiveDateTime) -> DateFeatures {
        DateFeatures::compute(dt.date(), &self.calendar)
    }
}

fn feature_series(features: &[Option<DateFeatures>]) -> Vec<Series> {
    let int_column = |name: &str, get: fn(&DateFeatures) -> i32| {
        let values: Vec<Option<i32>> = features.iter().map(|f| f.as_ref().map(get)).collect();
        Series::new(name, values)
    };
    let bool_column = |name: &str, get: fn(&DateFeatures) -> bool| {
        let values: Vec<Option<bool>> = features.iter().map(|f| f.as_ref().map(get)).collect();
        Series::new(name, values)
    };

    vec![
        int_column("year", |f| f.year),
        int_column("month", |f| f.month),
        int_column("day", |f| f.day),
        int_column("day_of_week", |f| f.day_of_week),
        int_column("day_of_year", |f| f.day_of_year),
        int_column("week_of_year", |f| f.week_of_year),
        int_column("quarter", |f| f.quarter),
        bool_column("is_leap_year", |f| f.is_leap_year),
        bool_column("is_month_start", |f| f.is_month_start),
        bool_column("is_month_end", |f| f.is_month_end),
        bool_column("is_holiday", |f| f.is_holiday),
        bool_column("is_bizdays", |f| f.is_bizdays),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use biz_calendar::Calendar;
    use rstest::rstest;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_compute_month_boundaries() {
        let cal = Calendar::load("weekends").unwrap();

        let end_feb = DateFeatures::compute(ymd(2024, 2, 29), &cal);
        assert!(end_feb.is_month_end);
        assert!(!end_feb.is_month_start);
        assert_eq!(end_feb.day_of_year, 60);

        let new_year_eve = DateFeatures::compute(ymd(2023, 12, 31), &cal);
        assert!(new_year_eve.is_month_end);
        assert_eq!(new_year_eve.quarter, 4);
        assert_eq!(new_year_eve.day_of_year, 365);
    }

    #[rstest]
    #[case(ymd(2021, 1, 3), 53)] // ISO week belongs to 2020
    #[case(ymd(2021, 1, 4), 1)]
    #[case(ymd(2024, 12, 30), 1)] // ISO week belongs to 2025
    #[case(ymd(2024, 6, 15), 24)]
    fn test_iso_week(#[case] date: NaiveDate, #[case] week: i32) {
        let cal = Calendar::load("actual").unwrap();
        assert_eq!(DateFeatures::compute(date, &cal).week_of_year, week);
    }

    #[test]
    fn test_feature_series_names_match_constant() {
        let cal = Calendar::load("weekends").unwrap();
        let series = feature_series(&[Some(DateFeatures::compute(ymd(2024, 1, 1), &cal)), None]);
        let names: Vec<&str> = series.iter().map(|s| s.name()).collect();
        assert_eq!(names, FEATURE_COLUMNS.to_vec());
        assert!(series.iter().all(|s| s.len() == 2 && s.null_count() == 1));
    }
}
