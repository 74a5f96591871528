use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::calendar::clamped_date;
use crate::config::CycleConfig;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::installments::Installment;

/// year and month of an invoice's due date
///
/// Orders chronologically and renders as zero-padded `YYYY-MM`, so the
/// string form sorts the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InvoiceKey {
    year: i32,
    month: u32,
}

impl InvoiceKey {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(LedgerError::invalid_input(format!("month must be between 1 and 12, got {}", month)));
        }
        if !(0..=9999).contains(&year) {
            return Err(LedgerError::invalid_input(format!("year {} cannot form a YYYY-MM key", year)));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for InvoiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for InvoiceKey {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || LedgerError::invalid_input(format!("'{}' is not a YYYY-MM invoice key", s));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        InvoiceKey::new(year, month)
    }
}

impl TryFrom<String> for InvoiceKey {
    type Error = LedgerError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<InvoiceKey> for String {
    fn from(key: InvoiceKey) -> Self {
        key.to_string()
    }
}

/// invoice a due date belongs to
///
/// Keys cover the years 0 through 9999; a due date outside that range has no
/// `YYYY-MM` form and is rejected.
pub fn invoice_key(due_date: NaiveDate) -> Result<InvoiceKey> {
    InvoiceKey::new(due_date.year(), due_date.month())
}

/// display label of an invoice, e.g. `Due 24/03/2024`
///
/// The date is rebuilt from the key and the configured due day, clamped to
/// the end of shorter months.
pub fn invoice_label(key: &InvoiceKey, cfg: &CycleConfig) -> String {
    match clamped_date(key.year, key.month, cfg.due_day()) {
        Some(due) => format!("Due {}", due.format("%d/%m/%Y")),
        None => format!("Due {}", key),
    }
}

/// running total of one invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub key: InvoiceKey,
    pub label: String,
    pub total: Money,
    pub installment_count: usize,
}

/// totals per invoice, oldest invoice first
pub fn summarize(installments: &[Installment], cfg: &CycleConfig) -> Result<Vec<InvoiceSummary>> {
    let mut totals: BTreeMap<InvoiceKey, (Money, usize)> = BTreeMap::new();
    for installment in installments {
        let key = installment.invoice_key()?;
        let entry = totals.entry(key).or_insert((Money::ZERO, 0));
        entry.0 = entry.0.checked_add(installment.amount).ok_or_else(|| {
            LedgerError::invalid_input(format!("total of invoice {} exceeds the supported amount", key))
        })?;
        entry.1 += 1;
    }

    Ok(totals
        .into_iter()
        .map(|(key, (total, installment_count))| InvoiceSummary {
            key,
            label: invoice_label(&key, cfg),
            total,
            installment_count,
        })
        .collect())
}

/// which installments to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvoiceFilter {
    #[default]
    All,
    Invoice(InvoiceKey),
}

impl InvoiceFilter {
    pub fn matches(&self, installment: &Installment) -> bool {
        match self {
            InvoiceFilter::All => true,
            InvoiceFilter::Invoice(key) => {
                (installment.due_date.year(), installment.due_date.month()) == (key.year, key.month)
            }
        }
    }

    /// keep the filter if its invoice still exists, otherwise fall back to all
    pub fn retain_or_all(self, keys: &[InvoiceKey]) -> Self {
        match self {
            InvoiceFilter::Invoice(key) if !keys.contains(&key) => InvoiceFilter::All,
            other => other,
        }
    }
}

/// matching installments ordered by due date, then installment index
pub fn filter_installments(installments: &[Installment], filter: InvoiceFilter) -> Vec<Installment> {
    let mut selected: Vec<Installment> = installments
        .iter()
        .filter(|installment| filter.matches(installment))
        .cloned()
        .collect();
    selected.sort_by(|a, b| {
        a.due_date
            .cmp(&b.due_date)
            .then(a.installment_index.cmp(&b.installment_index))
    });
    selected
}
