//! Built-in named calendars
//!
//! `ANBIMA` is generated from the Brazilian national holiday rules instead of
//! a shipped holiday file. The range matches the published ANBIMA list.

use crate::{Calendar, CalendarError, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// First year covered by the generated ANBIMA holiday list
pub const ANBIMA_FIRST_YEAR: i32 = 2001;
/// Last year covered by the generated ANBIMA holiday list
pub const ANBIMA_LAST_YEAR: i32 = 2078;

/// Year from which Black Consciousness Day (Nov 20) is a national holiday
const BLACK_CONSCIOUSNESS_FROM: i32 = 2024;

/// Fixed-date national holidays as (month, day)
const FIXED_HOLIDAYS: [(u32, u32); 8] = [
    (1, 1),   // Confraternização Universal
    (4, 21),  // Tiradentes
    (5, 1),   // Dia do Trabalho
    (9, 7),   // Independência
    (10, 12), // Nossa Senhora Aparecida
    (11, 2),  // Finados
    (11, 15), // Proclamação da República
    (12, 25), // Natal
];

/// Easter-relative holidays as day offsets from Easter Sunday
const EASTER_OFFSETS: [i64; 4] = [
    -48, // Carnival Monday
    -47, // Carnival Tuesday
    -2,  // Good Friday
    60,  // Corpus Christi
];

/// Resolve a built-in calendar by name, case-insensitively
pub fn builtin(name: &str) -> Result<Calendar> {
    match name.to_ascii_lowercase().as_str() {
        "anbima" => anbima(),
        "weekends" => Calendar::new("weekends", Vec::new(), vec![Weekday::Sat, Weekday::Sun]),
        "actual" => Calendar::new("actual", Vec::new(), Vec::new()),
        _ => Err(CalendarError::UnknownCalendar(name.to_string())),
    }
}

/// Brazilian financial-market calendar
pub fn anbima() -> Result<Calendar> {
    let holidays = (ANBIMA_FIRST_YEAR..=ANBIMA_LAST_YEAR).flat_map(anbima_holidays);
    Calendar::new("ANBIMA", holidays, vec![Weekday::Sat, Weekday::Sun])
}

/// All ANBIMA holidays in one year, weekend dates included
pub fn anbima_holidays(year: i32) -> Vec<NaiveDate> {
    let mut holidays: Vec<NaiveDate> = FIXED_HOLIDAYS
        .iter()
        .filter_map(|&(m, d)| NaiveDate::from_ymd_opt(year, m, d))
        .collect();

    if year >= BLACK_CONSCIOUSNESS_FROM {
        holidays.extend(NaiveDate::from_ymd_opt(year, 11, 20));
    }

    if let Some(easter) = easter_sunday(year) {
        holidays.extend(
            EASTER_OFFSETS
                .iter()
                .map(|&offset| easter + Duration::days(offset)),
        );
    }

    holidays.sort();
    holidays
}

/// Gregorian Easter Sunday (anonymous Gregorian algorithm)
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    let easter = NaiveDate::from_ymd_opt(year, month as u32, day as u32)?;
    debug_assert_eq!(easter.weekday(), Weekday::Sun);
    Some(easter)
}
