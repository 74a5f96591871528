//! Calendar month arithmetic on plain dates.
//!
//! Month shifts are computed on an explicit month index instead of adding
//! day counts, and a day that does not exist in the target month is clamped
//! to that month's last day.

use chrono::{Datelike, NaiveDate};

use crate::errors::{LedgerError, Result};

/// shift `date` by `months` calendar months, keeping the day of month
///
/// 2024-01-31 shifted by one month is 2024-02-29.
pub fn add_months(date: NaiveDate, months: i32) -> Result<NaiveDate> {
    let index = date.month0() as i64 + months as i64;
    let year = date.year() as i64 + index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;

    let year = i32::try_from(year).map_err(|_| out_of_range(date, months))?;
    clamped_date(year, month, date.day()).ok_or_else(|| out_of_range(date, months))
}

/// date on `day` of the given month, clamped to the month's last day
pub fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let last = days_in_month(year, month)?;
    NaiveDate::from_ymd_opt(year, month, day.clamp(1, last))
}

/// number of days in a month; `None` for a month outside 1..=12
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => Some(if is_leap_year(year) { 29 } else { 28 }),
        _ => None,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn out_of_range(date: NaiveDate, months: i32) -> LedgerError {
    LedgerError::invalid_input(format!(
        "shifting {} by {} months leaves the supported calendar",
        date, months
    ))
}
