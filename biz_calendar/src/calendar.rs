//! Holiday-list calendar with a configurable weekend

use crate::{named, BusinessCalendar, CalendarError, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use log::{debug, info};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// A business-day calendar defined by a set of holidays and non-working weekdays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    /// Name of the calendar definition
    name: String,
    /// Holiday dates, including those that fall on weekends
    holidays: BTreeSet<NaiveDate>,
    /// Days of the week that are never business days
    weekend: Vec<Weekday>,
}

/// On-disk calendar definition, as written by the bizdays tooling
#[derive(Debug, Deserialize)]
struct CalendarDefinition {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    holidays: Vec<String>,
    #[serde(default = "default_weekdays")]
    weekdays: Vec<String>,
}

fn default_weekdays() -> Vec<String> {
    vec!["Saturday".to_string(), "Sunday".to_string()]
}

impl Calendar {
    /// Create a calendar from holidays and non-working weekdays
    pub fn new<I>(name: &str, holidays: I, weekend: Vec<Weekday>) -> Result<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut weekend_days = weekend;
        weekend_days.sort_by_key(|d| d.num_days_from_monday());
        weekend_days.dedup();

        if weekend_days.len() == 7 {
            return Err(CalendarError::Invalid(format!(
                "calendar '{}' has no working weekdays",
                name
            )));
        }

        Ok(Self {
            name: name.to_string(),
            holidays: holidays.into_iter().collect(),
            weekend: weekend_days,
        })
    }

    /// Load a built-in calendar by name (`ANBIMA`, `weekends`, `actual`)
    pub fn load(name: &str) -> Result<Self> {
        let calendar = named::builtin(name)?;
        info!(
            "loaded calendar {} with {} holidays",
            calendar.name,
            calendar.holidays.len()
        );
        Ok(calendar)
    }

    /// Parse a JSON calendar definition
    ///
    /// The expected shape is
    /// `{"name": "...", "holidays": ["2024-01-01", ...], "weekdays": ["Saturday", "Sunday"]}`.
    /// A missing `weekdays` key defaults to Saturday and Sunday.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let definition: CalendarDefinition = serde_json::from_str(json)?;

        let holidays = definition
            .holidays
            .iter()
            .map(|s| parse_date(s))
            .collect::<Result<Vec<_>>>()?;
        let weekend = definition
            .weekdays
            .iter()
            .map(|s| parse_weekday(s))
            .collect::<Result<Vec<_>>>()?;

        let name = definition.name.unwrap_or_else(|| "custom".to_string());
        Self::new(&name, holidays, weekend)
    }

    /// Load a JSON calendar definition from a file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        debug!("parsing calendar definition {}", path.as_ref().display());
        Self::from_json_str(&content)
    }

    /// Load a plain holiday list, one `YYYY-MM-DD` date per line
    ///
    /// Blank lines and lines starting with `#` are skipped. The weekend is
    /// Saturday and Sunday.
    pub fn from_holidays_file<P: AsRef<Path>>(name: &str, path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;

        let holidays = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(parse_date)
            .collect::<Result<Vec<_>>>()?;

        Self::new(name, holidays, vec![Weekday::Sat, Weekday::Sun])
    }

    /// Non-working days of the week
    pub fn weekend(&self) -> &[Weekday] {
        &self.weekend
    }

    /// Whether the date falls on a non-working weekday
    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.weekend.contains(&date.weekday())
    }

    /// First business day on or after `date`
    pub fn following(&self, date: NaiveDate) -> NaiveDate {
        let mut current = date;
        while !self.is_business_day(current) {
            current += Duration::days(1);
        }
        current
    }

    /// Last business day on or before `date`
    pub fn preceding(&self, date: NaiveDate) -> NaiveDate {
        let mut current = date;
        while !self.is_business_day(current) {
            current -= Duration::days(1);
        }
        current
    }

    /// Number of business days in `(from, to]`; negative when `to` is before `from`
    pub fn bizdays(&self, from: NaiveDate, to: NaiveDate) -> i64 {
        let (start, end, sign) = if from <= to {
            (from, to, 1)
        } else {
            (to, from, -1)
        };

        let count = start
            .iter_days()
            .skip(1)
            .take_while(|d| *d <= end)
            .filter(|d| self.is_business_day(*d))
            .count() as i64;

        sign * count
    }

    /// Move `n` business days away from `date`
    ///
    /// A non-business starting date is first rolled in the direction of travel.
    pub fn add_bizdays(&self, date: NaiveDate, n: i64) -> NaiveDate {
        let step = if n >= 0 { 1 } else { -1 };
        let mut current = if n >= 0 {
            self.following(date)
        } else {
            self.preceding(date)
        };

        let mut remaining = n.abs();
        while remaining > 0 {
            current += Duration::days(step);
            if self.is_business_day(current) {
                remaining -= 1;
            }
        }
        current
    }
}

impl BusinessCalendar for Calendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn holidays(&self) -> &BTreeSet<NaiveDate> {
        &self.holidays
    }

    fn is_business_day(&self, date: NaiveDate) -> bool {
        !self.is_weekend(date) && !self.holidays.contains(&date)
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| CalendarError::Parse(format!("invalid holiday date '{}': {}", s, e)))
}

fn parse_weekday(s: &str) -> Result<Weekday> {
    s.trim()
        .parse::<Weekday>()
        .map_err(|_| CalendarError::Parse(format!("invalid weekday '{}'", s)))
}
