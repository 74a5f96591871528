use tracing::{debug, warn};

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};

/// split `total` into `count` amounts that add up to it exactly
///
/// The total is taken in cents; every slice gets the same base amount and
/// the leftover cents go one each to the first slices, so 10.00 over three
/// installments is 3.34, 3.33, 3.33.
pub fn split(total: Money, count: u32) -> Result<Vec<Money>> {
    if count < 1 {
        return Err(LedgerError::invalid_input("installment count must be at least 1"));
    }
    if !total.is_positive() {
        return Err(LedgerError::invalid_input(format!("total must be positive, got {}", total)));
    }

    let total_minor = total
        .to_minor()
        .ok_or_else(|| LedgerError::invalid_input(format!("total {} is too large to split", total)))?;
    let n = count as i64;
    let base = total_minor / n;
    let remainder = total_minor % n;

    if base == 0 {
        warn!(%total, count, "some installments receive no amount");
    }

    let amounts: Vec<Money> = (0..n)
        .map(|i| Money::from_minor(if i < remainder { base + 1 } else { base }))
        .collect();

    debug!(%total, count, first = %amounts[0], "split total into installments");
    Ok(amounts)
}
