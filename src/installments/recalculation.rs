use tracing::debug;

use crate::calendar::add_months;
use crate::config::CycleConfig;
use crate::cycle::resolve_base_due_date;
use crate::errors::{LedgerError, Result};
use crate::installments::Installment;

/// re-derive every due date under `cfg`
///
/// Each record keeps its purchase date and installment index, so the due
/// date is rebuilt from those alone. Amounts, ids and descriptions are left
/// as stored; the order of the input is preserved.
pub fn recalculate_all(installments: &[Installment], cfg: &CycleConfig) -> Result<Vec<Installment>> {
    let mut changed = 0usize;

    let recalculated = installments
        .iter()
        .map(|installment| -> Result<Installment> {
            let base_due = resolve_base_due_date(installment.date, cfg)?;
            let offset = i32::try_from(installment.installment_index.max(1) - 1).map_err(|_| {
                LedgerError::invalid_input(format!(
                    "installment {} has index {} beyond any representable due date",
                    installment.id, installment.installment_index
                ))
            })?;
            let due_date = add_months(base_due, offset)?;
            if due_date != installment.due_date {
                changed += 1;
            }
            Ok(Installment {
                due_date,
                ..installment.clone()
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(total = recalculated.len(), changed, "recalculated due dates");
    Ok(recalculated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;
    use crate::installments::allocate;
    use crate::installments::Purchase;
    use crate::types::{Category, PurchaseId};
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stored() -> Vec<Installment> {
        let cfg = CycleConfig::default();
        let a = Purchase {
            purchase_id: PurchaseId::from("a"),
            date: ymd(2024, 3, 10),
            description: "Sofa".to_string(),
            category: Category::Housing,
            total_amount: Money::from_major(1000),
            installment_count: 3,
        };
        let b = Purchase {
            purchase_id: PurchaseId::from("b"),
            date: ymd(2024, 3, 20),
            description: "Cinema".to_string(),
            category: Category::Leisure,
            total_amount: Money::from_major(45),
            installment_count: 1,
        };
        let mut all = allocate(&a, &cfg).unwrap();
        all.extend(allocate(&b, &cfg).unwrap());
        all
    }

    #[test]
    fn test_empty_is_noop() {
        assert!(recalculate_all(&[], &CycleConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn test_same_config_changes_nothing() {
        let before = stored();
        let after = recalculate_all(&before, &CycleConfig::default()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_new_cycle_moves_only_due_dates() {
        let before = stored();
        let cfg = CycleConfig::new(8, 15).unwrap();
        let after = recalculate_all(&before, &cfg).unwrap();

        assert_eq!(after.len(), before.len());
        // purchase a on the 10th is now past closing: april, may, june on the 15th
        assert_eq!(after[0].due_date, ymd(2024, 4, 15));
        assert_eq!(after[1].due_date, ymd(2024, 5, 15));
        assert_eq!(after[2].due_date, ymd(2024, 6, 15));
        assert_eq!(after[3].due_date, ymd(2024, 4, 15));

        for (old, new) in before.iter().zip(&after) {
            assert_eq!(old.id, new.id);
            assert_eq!(old.amount, new.amount);
            assert_eq!(old.description, new.description);
            assert_eq!(old.installment_index, new.installment_index);
        }
    }

    #[test]
    fn test_idempotent() {
        let cfg = CycleConfig::new(3, 28).unwrap();
        let once = recalculate_all(&stored(), &cfg).unwrap();
        let twice = recalculate_all(&once, &cfg).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let mut records = stored();
        records[0].installment_index = 3_000_000_000;
        let err = recalculate_all(&records, &CycleConfig::default()).unwrap_err();
        assert!(err.to_string().contains("3000000000"), "{}", err);

        records[0].installment_index = u32::MAX;
        assert!(recalculate_all(&records, &CycleConfig::default()).is_err());
    }

    #[test]
    fn test_repairs_stale_due_date() {
        let mut records = stored();
        records[1].due_date = ymd(1999, 1, 1);
        let fixed = recalculate_all(&records, &CycleConfig::default()).unwrap();
        assert_eq!(fixed[1].due_date, ymd(2024, 4, 24));
    }
}
