pub mod calendar;
pub mod config;
pub mod cycle;
pub mod decimal;
pub mod errors;
pub mod installments;
pub mod invoice;
pub mod ledger;
pub mod store;
pub mod types;

// re-export key types
pub use calendar::add_months;
pub use config::CycleConfig;
pub use cycle::resolve_base_due_date;
pub use decimal::Money;
pub use errors::{LedgerError, Result};
pub use installments::{allocate, recalculate_all, split, Installment, Purchase, PurchaseForm};
pub use invoice::{
    filter_installments, invoice_key, invoice_label, summarize, InvoiceFilter, InvoiceKey,
    InvoiceSummary,
};
pub use ledger::Ledger;
pub use store::{ConfigStore, InstallmentStore, JsonFileStore, MemoryStore};
pub use types::{Category, PurchaseField, PurchaseId};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
