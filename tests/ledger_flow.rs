use card_invoice_rs::chrono::NaiveDate;
use card_invoice_rs::{
    CycleConfig, InvoiceFilter, JsonFileStore, Ledger, Money, PurchaseForm, PurchaseId,
};

fn form(date: &str, description: &str, total: &str, count: &str) -> PurchaseForm {
    PurchaseForm {
        date: date.to_string(),
        description: description.to_string(),
        category: "Shopping".to_string(),
        total_amount: total.to_string(),
        installment_count: count.to_string(),
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn ledger_survives_reopen_and_cycle_change() {
    let dir = tempfile::tempdir().unwrap();

    let tv = {
        let mut ledger = Ledger::open(JsonFileStore::open(dir.path()).unwrap()).unwrap();
        let tv = ledger.record(&form("2024-03-05", "TV", "100.00", "3")).unwrap();
        ledger.record(&form("2024-03-18", "Books", "45.90", "1")).unwrap();
        tv[0].purchase_id.clone()
    };

    let mut ledger = Ledger::open(JsonFileStore::open(dir.path()).unwrap()).unwrap();
    assert_eq!(ledger.installments().unwrap().len(), 4);

    let totals: Vec<(String, Money)> = ledger
        .invoices()
        .unwrap()
        .into_iter()
        .map(|s| (s.key.to_string(), s.total))
        .collect();
    assert_eq!(
        totals,
        vec![
            ("2024-03".to_string(), Money::from_minor(3334)),
            ("2024-04".to_string(), Money::from_minor(3333 + 4590)),
            ("2024-05".to_string(), Money::from_minor(3333)),
        ]
    );

    ledger.update_config(CycleConfig::new(1, 10).unwrap()).unwrap();
    drop(ledger);

    let mut ledger = Ledger::open(JsonFileStore::open(dir.path()).unwrap()).unwrap();
    assert_eq!(ledger.config(), CycleConfig::new(1, 10).unwrap());

    let listed = ledger.installments_for(InvoiceFilter::All).unwrap();
    let due: Vec<NaiveDate> = listed.iter().map(|i| i.due_date).collect();
    assert_eq!(
        due,
        vec![ymd(2024, 4, 10), ymd(2024, 4, 10), ymd(2024, 5, 10), ymd(2024, 6, 10)]
    );
    let amounts: Money = listed.iter().map(|i| i.amount).sum();
    assert_eq!(amounts, Money::from_minor(10000 + 4590));

    assert_eq!(ledger.remove_purchase(&tv).unwrap(), 3);
    let left = ledger.installments().unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].description, "Books");
    assert_ne!(left[0].purchase_id, tv);
    assert_eq!(ledger.remove_purchase(&PurchaseId::from("unknown")).unwrap(), 0);
}

#[test]
fn rejected_form_is_not_stored() {
    let dir = tempfile::tempdir().unwrap();
    let mut ledger = Ledger::open(JsonFileStore::open(dir.path()).unwrap()).unwrap();

    assert!(ledger.record(&form("", "Nothing", "10", "1")).is_err());
    assert!(ledger.record(&form("2024-01-01", "", "10", "1")).is_err());
    assert!(ledger.record(&form("2024-01-01", "Zero", "0", "1")).is_err());
    assert!(ledger.record(&form("2024-01-01", "None", "10", "0")).is_err());
    assert!(ledger.installments().unwrap().is_empty());
}
