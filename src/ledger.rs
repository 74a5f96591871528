use hourglass_rs::SafeTimeProvider;
use tracing::{info, warn};

use crate::config::CycleConfig;
use crate::cycle::resolve_base_due_date;
use crate::errors::Result;
use crate::installments::{allocate, recalculate_all, Installment, Purchase, PurchaseForm};
use crate::invoice::{filter_installments, invoice_key, summarize, InvoiceFilter, InvoiceKey, InvoiceSummary};
use crate::store::{ConfigStore, InstallmentStore};
use crate::types::PurchaseId;

/// card ledger backed by a store
///
/// Every mutation loads the stored records, computes the new list in full
/// and only then writes it back, so a failed operation leaves the store as
/// it was.
pub struct Ledger<S> {
    store: S,
    config: CycleConfig,
}

impl<S: InstallmentStore + ConfigStore> Ledger<S> {
    /// open ledger, using the default cycle when none is stored
    pub fn open(store: S) -> Result<Self> {
        let config = store.load_config()?.unwrap_or_default();
        Ok(Self { store, config })
    }

    pub fn config(&self) -> CycleConfig {
        self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// all stored installments in storage order
    pub fn installments(&self) -> Result<Vec<Installment>> {
        self.store.load()
    }

    /// allocate a purchase and append its installments
    pub fn add_purchase(&mut self, purchase: &Purchase) -> Result<Vec<Installment>> {
        let created = allocate(purchase, &self.config)?;

        let mut all = self.store.load()?;
        all.extend(created.iter().cloned());
        self.store.save(&all)?;

        info!(
            purchase_id = %purchase.purchase_id,
            total = %purchase.total_amount,
            installments = created.len(),
            "purchase added"
        );
        Ok(created)
    }

    /// parse a form under a fresh id and add the purchase
    pub fn record(&mut self, form: &PurchaseForm) -> Result<Vec<Installment>> {
        let purchase = form.parse(PurchaseId::generate())?;
        self.add_purchase(&purchase)
    }

    /// delete every installment of a purchase, returning how many were removed
    pub fn remove_purchase(&mut self, purchase_id: &PurchaseId) -> Result<usize> {
        let all = self.store.load()?;
        let before = all.len();
        let kept: Vec<Installment> = all
            .into_iter()
            .filter(|installment| installment.purchase_id != *purchase_id)
            .collect();
        let removed = before - kept.len();

        if removed > 0 {
            self.store.save(&kept)?;
        }
        info!(%purchase_id, removed, "purchase removed");
        Ok(removed)
    }

    /// delete every stored installment
    pub fn clear(&mut self) -> Result<()> {
        self.store.clear()?;
        info!("ledger cleared");
        Ok(())
    }

    /// switch to a new billing cycle and move all due dates accordingly
    ///
    /// Installments are written first and the cycle last; when the cycle
    /// cannot be written the previous due dates are put back.
    pub fn update_config(&mut self, config: CycleConfig) -> Result<usize> {
        config.validate()?;
        let previous = self.store.load()?;
        let recalculated = recalculate_all(&previous, &config)?;

        self.store.save(&recalculated)?;
        if let Err(e) = self.store.save_config(config) {
            if let Err(restore) = self.store.save(&previous) {
                warn!(error = %restore, "could not restore due dates after failed cycle update");
            }
            return Err(e);
        }
        self.config = config;

        info!(
            closing_day = config.closing_day(),
            due_day = config.due_day(),
            installments = recalculated.len(),
            "billing cycle updated"
        );
        Ok(recalculated.len())
    }

    /// re-derive due dates under the current cycle
    pub fn recalculate(&mut self) -> Result<usize> {
        let all = self.store.load()?;
        if all.is_empty() {
            return Ok(0);
        }
        let recalculated = recalculate_all(&all, &self.config)?;
        self.store.save(&recalculated)?;
        info!(installments = recalculated.len(), "due dates recalculated");
        Ok(recalculated.len())
    }

    /// running totals per invoice, oldest first
    pub fn invoices(&self) -> Result<Vec<InvoiceSummary>> {
        summarize(&self.store.load()?, &self.config)
    }

    /// installments of one invoice (or all), in display order
    pub fn installments_for(&self, filter: InvoiceFilter) -> Result<Vec<Installment>> {
        Ok(filter_installments(&self.store.load()?, filter))
    }

    /// invoice a purchase made today would be billed on
    pub fn current_invoice(&self, time: &SafeTimeProvider) -> Result<InvoiceKey> {
        let today = time.now().date_naive();
        let due = resolve_base_due_date(today, &self.config)?;
        invoice_key(due)
    }
}
