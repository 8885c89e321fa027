//! The reference sale scenario, line by line
//!
//! Opening stock of 50 units at cost 100, then a sale of 10 units at
//! sell price 200 with a 50 discount, 5% VAT, and 1000 paid up front.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use inventory_ledger::utils::MemoryStorage;
use inventory_ledger::{AccountingEngine, EntryType, SaleRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 Inventory Ledger - Sale Journal Walkthrough\n");

    let mut engine = AccountingEngine::new(MemoryStorage::new());

    let product = engine
        .create_product(
            "Sample Product".to_string(),
            BigDecimal::from(100),
            BigDecimal::from(200),
            50,
        )
        .await?;
    println!("📦 Opening stock: 50 units at cost ₹100 (value ₹5,000)\n");

    let sale = engine
        .create_sale(SaleRequest {
            product_id: product.id,
            quantity: 10,
            discount: Some(BigDecimal::from(50)),
            vat_rate: Some(BigDecimal::from(5)),
            paid_amount: BigDecimal::from(1000),
            sale_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        })
        .await?;

    println!("💰 Sale breakdown:");
    println!("  Quantity:       {}", sale.quantity);
    println!("  Unit Price:     ₹{}", sale.unit_price);
    println!("  Subtotal:       ₹{}", sale.subtotal);
    println!("  Discount:       ₹{}", sale.discount);
    println!("  VAT ({}%):       ₹{}", sale.vat_rate, sale.vat_amount);
    println!("  Total:          ₹{}", sale.total_amount);
    println!("  Paid:           ₹{}", sale.paid_amount);
    println!("  Due:            ₹{}", sale.due_amount);

    println!("\n📒 Derived journal (posting order):");
    let mut entries = engine.list_journal_entries(None).await?;
    entries.retain(|e| e.sale_id == Some(sale.id));
    for entry in &entries {
        println!(
            "  {} {:>4} {:<20} {} ₹{}",
            entry.entry_number,
            entry.account_code,
            entry.account_name,
            match entry.entry_type {
                EntryType::Debit => "DR",
                EntryType::Credit => "CR",
            },
            entry.amount
        );
    }

    let totals = inventory_ledger::journal_totals(&entries);
    println!("\n  Debits total ₹{}", totals.total_debits);
    println!("  Credits total ₹{}", totals.total_credits);
    println!(
        "  Balanced: {}",
        if totals.is_balanced { "✅ Yes" } else { "❌ No" }
    );

    println!(
        "\n📦 Stock after sale: {} units",
        engine.current_stock(product.id).await?
    );

    Ok(())
}
