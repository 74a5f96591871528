/// json store - persist purchases, change the cycle, list invoices
use card_invoice_rs::{CycleConfig, InvoiceFilter, JsonFileStore, Ledger, PurchaseForm};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let dir = std::env::temp_dir().join("card-invoice-demo");
    let mut ledger = Ledger::open(JsonFileStore::open(&dir)?)?;
    ledger.clear()?;

    ledger.record(&PurchaseForm {
        date: "2024-03-05".to_string(),
        description: "Laptop".to_string(),
        category: "Shopping".to_string(),
        total_amount: "4999,90".to_string(),
        installment_count: "10".to_string(),
    })?;
    ledger.record(&PurchaseForm {
        date: "2024-03-18".to_string(),
        description: "Groceries".to_string(),
        category: "Food".to_string(),
        total_amount: "312.47".to_string(),
        installment_count: "1".to_string(),
    })?;

    println!("=== invoices ===");
    for invoice in ledger.invoices()? {
        println!("{}  {:>10}  {}", invoice.key, invoice.total, invoice.label);
    }

    ledger.update_config(CycleConfig::new(1, 10)?)?;

    println!("\n=== after moving the cycle to closing 1 / due 10 ===");
    for installment in ledger.installments_for(InvoiceFilter::All)? {
        println!(
            "{}  {:<10} {}/{}  {}",
            installment.due_date,
            installment.description,
            installment.installment_index,
            installment.installment_count,
            installment.amount
        );
    }

    println!("\nstored in {}", dir.display());
    Ok(())
}
