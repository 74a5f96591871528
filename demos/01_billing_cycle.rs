/// billing cycle - how the closing day decides the invoice
use card_invoice_rs::chrono::{NaiveDate, TimeZone, Utc};
use card_invoice_rs::{
    invoice_key, invoice_label, resolve_base_due_date, CycleConfig, Ledger, MemoryStore,
    SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = CycleConfig::default();
    println!("=== closing day {}, due day {} ===\n", cfg.closing_day(), cfg.due_day());

    for day in [10, 16, 17, 20] {
        let purchase_date = NaiveDate::from_ymd_opt(2024, 3, day).ok_or("bad date")?;
        let due = resolve_base_due_date(purchase_date, &cfg)?;
        let key = invoice_key(due)?;
        println!("bought {}  ->  invoice {} ({})", purchase_date, key, invoice_label(&key, &cfg));
    }

    // short months clamp the due day
    let late = CycleConfig::new(20, 31)?;
    let due = resolve_base_due_date(NaiveDate::from_ymd_opt(2024, 1, 25).ok_or("bad date")?, &late)?;
    println!("\ndue day 31 after a january 25 purchase: {}", due);

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 3, 16, 9, 0, 0).unwrap(),
    ));
    let ledger = Ledger::open(MemoryStore::new())?;
    println!("open invoice on {}: {}", time.now().date_naive(), ledger.current_invoice(&time)?);

    Ok(())
}
