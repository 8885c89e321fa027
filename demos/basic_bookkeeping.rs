//! Basic bookkeeping usage example

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use inventory_ledger::utils::MemoryStorage;
use inventory_ledger::{AccountingEngine, SaleRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 Inventory Ledger - Basic Bookkeeping Example\n");

    // Create an engine with in-memory storage
    let mut engine = AccountingEngine::new(MemoryStorage::new());

    // 1. Create products with opening stock
    println!("📦 Creating Products...");
    let chair = engine
        .create_product(
            "Office Chair".to_string(),
            BigDecimal::from(1500),
            BigDecimal::from(2500),
            20,
        )
        .await?;
    println!(
        "  ✓ {} (cost ₹{}, sells ₹{}, opening {})",
        chair.name, chair.purchase_price, chair.sell_price, chair.opening_stock
    );

    let desk = engine
        .create_product(
            "Standing Desk".to_string(),
            BigDecimal::from(6000),
            BigDecimal::from(9000),
            8,
        )
        .await?;
    println!(
        "  ✓ {} (cost ₹{}, sells ₹{}, opening {})",
        desk.name, desk.purchase_price, desk.sell_price, desk.opening_stock
    );
    println!();

    // 2. Record business activity
    println!("💰 Recording Business Activity...\n");

    let sale = engine
        .create_sale(SaleRequest {
            product_id: chair.id,
            quantity: 4,
            discount: Some(BigDecimal::from(500)),
            vat_rate: Some(BigDecimal::from(5)),
            paid_amount: BigDecimal::from(5000),
            sale_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        })
        .await?;
    println!(
        "  ✓ Sold 4 chairs: subtotal ₹{}, VAT ₹{}, total ₹{}, due ₹{}",
        sale.subtotal, sale.vat_amount, sale.total_amount, sale.due_amount
    );

    engine
        .record_purchase(
            chair.id,
            10,
            BigDecimal::from(1450),
            NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
            Some("Restock from supplier".to_string()),
        )
        .await?;
    println!("  ✓ Restocked 10 chairs");

    engine
        .create_expense(
            "Shop rent".to_string(),
            BigDecimal::from(8000),
            NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
            Some("rent".to_string()),
        )
        .await?;
    println!("  ✓ Paid shop rent of ₹8,000");

    println!(
        "\n📦 Chairs on hand: {}",
        engine.current_stock(chair.id).await?
    );

    // 3. Inspect the derived journal
    println!("\n📒 Journal Entries (newest first):");
    let entries = engine.list_journal_entries(None).await?;
    for entry in &entries {
        println!(
            "  {} | {} {} ₹{} | {}",
            entry.entry_number,
            entry.account_code,
            match entry.entry_type {
                inventory_ledger::EntryType::Debit => "DR",
                inventory_ledger::EntryType::Credit => "CR",
            },
            entry.amount,
            entry.description
        );
    }

    let totals = inventory_ledger::journal_totals(&entries);
    println!(
        "\n  Total Debits:  ₹{}\n  Total Credits: ₹{}\n  Balanced: {}",
        totals.total_debits,
        totals.total_credits,
        if totals.is_balanced { "✅ Yes" } else { "❌ No" }
    );

    // 4. Generate the financial report
    let summary = engine
        .financial_report(
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        )
        .await?;

    println!("\n📈 Financial Report for March 2026:");
    println!("  Total Sales:    ₹{}", summary.total_sales);
    println!("  Total Discount: ₹{}", summary.total_discount);
    println!("  Total VAT:      ₹{}", summary.total_vat);
    println!("  Total Expenses: ₹{}", summary.total_expenses);
    println!("  COGS:           ₹{}", summary.cogs_total);
    println!("  Gross Profit:   ₹{}", summary.gross_profit);
    println!("  Net Profit:     ₹{}", summary.net_profit);

    println!("\n  Per-day breakdown:");
    for day in &summary.daily {
        println!(
            "    {} | sales ₹{} | expenses ₹{} | net ₹{}",
            day.date, day.sales_total, day.expenses_total, day.net
        );
    }

    println!("\n🎉 Example completed successfully!");
    Ok(())
}
