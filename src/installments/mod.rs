pub mod allocation;
pub mod recalculation;
pub mod split;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::invoice::{invoice_key, InvoiceKey};
use crate::types::{Category, PurchaseField, PurchaseId};

pub use allocation::allocate;
pub use recalculation::recalculate_all;
pub use split::split;

/// upper bound accepted for the installment count of one purchase
pub const MAX_INSTALLMENTS: u32 = 120;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// a card purchase before it is expanded into installments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub purchase_id: PurchaseId,
    pub date: NaiveDate,
    pub description: String,
    pub category: Category,
    pub total_amount: Money,
    pub installment_count: u32,
}

impl Purchase {
    /// new purchase with a generated id
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        category: Category,
        total_amount: Money,
        installment_count: u32,
    ) -> Self {
        Self {
            purchase_id: PurchaseId::generate(),
            date,
            description: description.into(),
            category,
            total_amount,
            installment_count,
        }
    }

    /// check business rules before allocation
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(LedgerError::validation(PurchaseField::Description, "description is empty"));
        }
        if !self.total_amount.is_positive() {
            return Err(LedgerError::validation(
                PurchaseField::TotalAmount,
                format!("total amount must be positive, got {}", self.total_amount),
            ));
        }
        if self.total_amount.to_minor().is_none() {
            return Err(LedgerError::validation(
                PurchaseField::TotalAmount,
                format!("total amount {} is too large", self.total_amount),
            ));
        }
        if self.installment_count < 1 {
            return Err(LedgerError::validation(
                PurchaseField::InstallmentCount,
                "at least one installment is required",
            ));
        }
        if self.installment_count > MAX_INSTALLMENTS {
            return Err(LedgerError::validation(
                PurchaseField::InstallmentCount,
                format!("at most {} installments are supported", MAX_INSTALLMENTS),
            ));
        }
        Ok(())
    }
}

/// raw purchase input as typed into a form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseForm {
    pub date: String,
    pub description: String,
    pub category: String,
    pub total_amount: String,
    pub installment_count: String,
}

impl PurchaseForm {
    /// parse and validate the form into a purchase with the given id
    ///
    /// Fields are checked in form order: date, description, total amount,
    /// installment count. The first failing field is reported.
    pub fn parse(&self, purchase_id: PurchaseId) -> Result<Purchase> {
        let date = self.date.trim();
        if date.is_empty() {
            return Err(LedgerError::validation(PurchaseField::Date, "purchase date is required"));
        }
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|e| {
            LedgerError::validation(PurchaseField::Date, format!("'{}' is not a YYYY-MM-DD date: {}", date, e))
        })?;

        let description = self.description.trim();
        if description.is_empty() {
            return Err(LedgerError::validation(PurchaseField::Description, "description is empty"));
        }

        let total_amount = parse_amount(&self.total_amount)?;

        let installment_count: u32 = self.installment_count.trim().parse().map_err(|_| {
            LedgerError::validation(
                PurchaseField::InstallmentCount,
                format!("'{}' is not a whole number of installments", self.installment_count.trim()),
            )
        })?;

        let purchase = Purchase {
            purchase_id,
            date,
            description: description.to_string(),
            category: Category::from(self.category.clone()),
            total_amount,
            installment_count,
        };
        purchase.validate()?;
        Ok(purchase)
    }
}

fn parse_amount(raw: &str) -> Result<Money> {
    let raw = raw.trim();
    let normalized = if raw.contains(',') && !raw.contains('.') {
        raw.replace(',', ".")
    } else {
        raw.to_string()
    };

    let amount = Money::from_str_exact(&normalized).map_err(|_| {
        LedgerError::validation(PurchaseField::TotalAmount, format!("'{}' is not a valid amount", raw))
    })?;
    if !amount.is_positive() {
        return Err(LedgerError::validation(
            PurchaseField::TotalAmount,
            format!("total amount must be positive, got {}", raw),
        ));
    }
    Ok(amount)
}

/// one persisted slice of a purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub id: String,
    pub purchase_id: PurchaseId,
    pub date: NaiveDate,
    pub description: String,
    pub category: Category,
    pub amount: Money,
    #[serde(default = "first")]
    pub installment_index: u32,
    #[serde(default = "first")]
    pub installment_count: u32,
    #[serde(with = "due_date_format")]
    pub due_date: NaiveDate,
}

fn first() -> u32 {
    1
}

impl Installment {
    /// invoice this installment is billed on
    pub fn invoice_key(&self) -> Result<InvoiceKey> {
        invoice_key(self.due_date)
    }

    /// whether the purchase was split at all
    pub fn is_split(&self) -> bool {
        self.installment_count > 1
    }
}

/// due dates are written as plain dates and read from plain dates or
/// full RFC 3339 timestamps
mod due_date_format {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        if let Ok(date) = NaiveDate::parse_from_str(&s, DATE_FORMAT) {
            return Ok(date);
        }
        DateTime::parse_from_rfc3339(&s)
            .map(|ts| ts.date_naive())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn form() -> PurchaseForm {
        PurchaseForm {
            date: "2024-03-05".to_string(),
            description: "  Groceries ".to_string(),
            category: "Food".to_string(),
            total_amount: "100.00".to_string(),
            installment_count: "3".to_string(),
        }
    }

    #[test]
    fn test_form_parses() {
        let purchase = form().parse(PurchaseId::from("p1")).unwrap();
        assert_eq!(purchase.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(purchase.description, "Groceries");
        assert_eq!(purchase.category, Category::Food);
        assert_eq!(purchase.total_amount, Money::from_major(100));
        assert_eq!(purchase.installment_count, 3);
    }

    #[test]
    fn test_form_accepts_comma_decimal() {
        let mut f = form();
        f.total_amount = "59,90".to_string();
        let purchase = f.parse(PurchaseId::from("p1")).unwrap();
        assert_eq!(purchase.total_amount, Money::from_decimal(dec!(59.90)));
    }

    fn assert_rejects(mutate: impl FnOnce(&mut PurchaseForm), field: PurchaseField) {
        let mut f = form();
        mutate(&mut f);
        let err = f.parse(PurchaseId::from("p1")).unwrap_err();
        assert_eq!(err.field(), Some(field), "{:?}", f);
    }

    #[test]
    fn test_form_reports_failing_field() {
        assert_rejects(|f| f.date.clear(), PurchaseField::Date);
        assert_rejects(|f| f.date = "05/03/2024".to_string(), PurchaseField::Date);
        assert_rejects(|f| f.description = "   ".to_string(), PurchaseField::Description);
        assert_rejects(|f| f.total_amount = "abc".to_string(), PurchaseField::TotalAmount);
        assert_rejects(|f| f.total_amount = "0".to_string(), PurchaseField::TotalAmount);
        assert_rejects(|f| f.total_amount = "-3".to_string(), PurchaseField::TotalAmount);
        assert_rejects(
            |f| f.total_amount = "1000000000000000000000000000".to_string(),
            PurchaseField::TotalAmount,
        );
        assert_rejects(
            |f| f.total_amount = "79228162514264337593543950335".to_string(),
            PurchaseField::TotalAmount,
        );
        assert_rejects(|f| f.installment_count = "0".to_string(), PurchaseField::InstallmentCount);
        assert_rejects(|f| f.installment_count = "two".to_string(), PurchaseField::InstallmentCount);
        assert_rejects(|f| f.installment_count = "500".to_string(), PurchaseField::InstallmentCount);
    }

    #[test]
    fn test_date_is_checked_before_description() {
        let f = PurchaseForm::default();
        let err = f.parse(PurchaseId::from("p1")).unwrap_err();
        assert_eq!(err.field(), Some(PurchaseField::Date));
    }

    #[test]
    fn test_installment_record_shape() {
        let installment = Installment {
            id: "p1-2".to_string(),
            purchase_id: PurchaseId::from("p1"),
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            description: "Groceries".to_string(),
            category: Category::Food,
            amount: Money::from_decimal(dec!(33.33)),
            installment_index: 2,
            installment_count: 3,
            due_date: NaiveDate::from_ymd_opt(2024, 4, 24).unwrap(),
        };

        let value = serde_json::to_value(&installment).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "p1-2",
                "purchaseId": "p1",
                "date": "2024-03-05",
                "description": "Groceries",
                "category": "Food",
                "amount": 33.33,
                "installmentIndex": 2,
                "installmentCount": 3,
                "dueDate": "2024-04-24"
            })
        );
    }

    #[test]
    fn test_reads_legacy_timestamps_and_defaults() {
        let json = r#"{
            "id": "p9-1",
            "purchaseId": "p9",
            "date": "2024-03-05",
            "description": "Pharmacy",
            "category": "Health",
            "amount": 42.5,
            "dueDate": "2024-03-24T03:00:00.000Z"
        }"#;

        let installment: Installment = serde_json::from_str(json).unwrap();
        assert_eq!(installment.due_date, NaiveDate::from_ymd_opt(2024, 3, 24).unwrap());
        assert_eq!(installment.installment_index, 1);
        assert_eq!(installment.installment_count, 1);
        assert_eq!(installment.amount, Money::from_minor(4250));
        assert!(!installment.is_split());
    }
}
