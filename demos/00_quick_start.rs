/// quick start - split one purchase into installments
use card_invoice_rs::chrono::NaiveDate;
use card_invoice_rs::{allocate, Category, CycleConfig, Money, Purchase};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let purchase = Purchase::new(
        NaiveDate::from_ymd_opt(2024, 3, 5).ok_or("bad date")?,
        "Headphones",
        Category::Shopping,
        Money::from_major(100),
        3,
    );

    for installment in allocate(&purchase, &CycleConfig::default())? {
        println!(
            "{}/{}  {}  due {}",
            installment.installment_index,
            installment.installment_count,
            installment.amount,
            installment.due_date
        );
    }

    Ok(())
}
