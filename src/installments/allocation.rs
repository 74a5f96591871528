use tracing::debug;

use crate::calendar::add_months;
use crate::config::CycleConfig;
use crate::cycle::resolve_base_due_date;
use crate::errors::Result;
use crate::installments::split::split;
use crate::installments::{Installment, Purchase};

/// expand a purchase into its dated installments
///
/// Installment `i` (1-based) is due `i - 1` months after the base due date
/// of the purchase and carries the `i`-th slice of the split total.
pub fn allocate(purchase: &Purchase, cfg: &CycleConfig) -> Result<Vec<Installment>> {
    purchase.validate()?;

    let base_due = resolve_base_due_date(purchase.date, cfg)?;
    let amounts = split(purchase.total_amount, purchase.installment_count)?;

    let installments = amounts
        .into_iter()
        .enumerate()
        .map(|(i, amount)| -> Result<Installment> {
            let index = i as u32 + 1;
            Ok(Installment {
                id: purchase.purchase_id.installment_id(index),
                purchase_id: purchase.purchase_id.clone(),
                date: purchase.date,
                description: purchase.description.clone(),
                category: purchase.category.clone(),
                amount,
                installment_index: index,
                installment_count: purchase.installment_count,
                due_date: add_months(base_due, i as i32)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        purchase_id = %purchase.purchase_id,
        count = installments.len(),
        %base_due,
        "allocated purchase"
    );
    Ok(installments)
}
