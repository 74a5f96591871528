use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::calendar::clamped_date;
use crate::config::CycleConfig;
use crate::errors::{LedgerError, Result};

/// due date of the first installment of a purchase made on `purchase_date`
///
/// A purchase before the closing day is due on the due day of the same
/// month; on or after the closing day it is due the following month. A due
/// day past the end of the target month falls on that month's last day.
pub fn resolve_base_due_date(purchase_date: NaiveDate, cfg: &CycleConfig) -> Result<NaiveDate> {
    cfg.validate().map_err(|e| LedgerError::invalid_input(e.to_string()))?;

    let (mut year, mut month) = (purchase_date.year(), purchase_date.month());
    if purchase_date.day() >= cfg.closing_day() {
        month += 1;
        if month > 12 {
            month = 1;
            year = year.checked_add(1).ok_or_else(|| overflow(purchase_date))?;
        }
    }

    let due = clamped_date(year, month, cfg.due_day()).ok_or_else(|| overflow(purchase_date))?;
    debug!(%purchase_date, %due, closing_day = cfg.closing_day(), "resolved base due date");
    Ok(due)
}

fn overflow(purchase_date: NaiveDate) -> LedgerError {
    LedgerError::invalid_input(format!("no due date representable for purchase on {}", purchase_date))
}
