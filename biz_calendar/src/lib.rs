//! # Biz Calendar
//!
//! Business-day calendars used to flag holidays and working days.
//! A calendar is built once (from a built-in name, a JSON definition or a
//! holiday list) and then shared read-only.
//!
//! ```
//! use biz_calendar::{BusinessCalendar, Calendar};
//! use chrono::NaiveDate;
//!
//! let cal = Calendar::load("ANBIMA").unwrap();
//! let carnival = NaiveDate::from_ymd_opt(2024, 2, 13).unwrap();
//! assert!(cal.is_holiday(carnival));
//! assert!(!cal.is_business_day(carnival));
//! ```

use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

pub mod calendar;
pub mod named;

pub use calendar::Calendar;

/// Errors that can occur while building or loading a calendar
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Unknown calendar: {0}")]
    UnknownCalendar(String),

    #[error("Invalid calendar: {0}")]
    Invalid(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for calendar operations
pub type Result<T> = std::result::Result<T, CalendarError>;

/// Read-only view of a business-day calendar
pub trait BusinessCalendar: Send + Sync {
    /// Name of the calendar definition
    fn name(&self) -> &str;

    /// All holidays known to the calendar
    fn holidays(&self) -> &BTreeSet<NaiveDate>;

    /// Whether the date is a listed holiday
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays().contains(&date)
    }

    /// Whether the date is a working day (not a weekend day and not a holiday)
    fn is_business_day(&self, date: NaiveDate) -> bool;
}

impl<T: BusinessCalendar + ?Sized> BusinessCalendar for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn holidays(&self) -> &BTreeSet<NaiveDate> {
        (**self).holidays()
    }

    fn is_holiday(&self, date: NaiveDate) -> bool {
        (**self).is_holiday(date)
    }

    fn is_business_day(&self, date: NaiveDate) -> bool {
        (**self).is_business_day(date)
    }
}

impl<T: BusinessCalendar + ?Sized> BusinessCalendar for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn holidays(&self) -> &BTreeSet<NaiveDate> {
        (**self).holidays()
    }

    fn is_holiday(&self, date: NaiveDate) -> bool {
        (**self).is_holiday(date)
    }

    fn is_business_day(&self, date: NaiveDate) -> bool {
        (**self).is_business_day(date)
    }
}
