//! Integration tests for inventory-ledger

use std::collections::HashSet;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use uuid::Uuid;

use inventory_ledger::utils::MemoryStorage;
use inventory_ledger::{
    journal_totals, AccountingEngine, EntryType, JournalEntry, LedgerError, Sale, SaleRequest,
};

fn money(text: &str) -> BigDecimal {
    text.parse().unwrap()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
}

fn march() -> (NaiveDate, NaiveDate) {
    (date(1), date(31))
}

async fn engine_with_product(
    opening_stock: u32,
) -> (AccountingEngine<MemoryStorage>, inventory_ledger::Product) {
    let mut engine = AccountingEngine::new(MemoryStorage::new());
    let product = engine
        .create_product(
            "Sample Product".to_string(),
            BigDecimal::from(100),
            BigDecimal::from(200),
            opening_stock,
        )
        .await
        .unwrap();
    (engine, product)
}

fn entries_for_sale(entries: &[JournalEntry], sale: &Sale) -> Vec<JournalEntry> {
    entries
        .iter()
        .filter(|e| e.sale_id == Some(sale.id))
        .cloned()
        .collect()
}

#[tokio::test]
async fn test_opening_stock_event() {
    let (engine, product) = engine_with_product(50).await;

    assert_eq!(engine.current_stock(product.id).await.unwrap(), 50);

    let entries = engine.list_journal_entries(None).await.unwrap();
    assert_eq!(entries.len(), 2);

    let debit = &entries[0];
    let credit = &entries[1];
    assert_eq!(debit.account_code, "1200");
    assert_eq!(debit.entry_type, EntryType::Debit);
    assert_eq!(debit.amount, BigDecimal::from(5000));
    assert_eq!(credit.account_code, "3000");
    assert_eq!(credit.entry_type, EntryType::Credit);
    assert_eq!(credit.amount, BigDecimal::from(5000));

    let totals = journal_totals(&entries);
    assert!(totals.is_balanced);
}

#[tokio::test]
async fn test_reference_sale_scenario() {
    // purchase 100, sell 200, opening 50; sale of 10 with discount 50,
    // VAT 5%, paid 1000
    let (mut engine, product) = engine_with_product(50).await;

    let sale = engine
        .create_sale(SaleRequest {
            product_id: product.id,
            quantity: 10,
            discount: Some(BigDecimal::from(50)),
            vat_rate: Some(BigDecimal::from(5)),
            paid_amount: BigDecimal::from(1000),
            sale_date: date(1),
        })
        .await
        .unwrap();

    assert_eq!(sale.unit_price, BigDecimal::from(200));
    assert_eq!(sale.subtotal, BigDecimal::from(2000));
    assert_eq!(sale.vat_amount, money("97.50"));
    assert_eq!(sale.total_amount, money("2047.50"));
    assert_eq!(sale.due_amount, money("1047.50"));

    let all = engine.list_journal_entries(Some(march())).await.unwrap();
    let entries = entries_for_sale(&all, &sale);
    assert_eq!(entries.len(), 7);

    // fixed posting order; same-day listing keeps creation order
    let expected: Vec<(&str, EntryType, BigDecimal)> = vec![
        ("5000", EntryType::Debit, BigDecimal::from(1000)),
        ("1200", EntryType::Credit, BigDecimal::from(1000)),
        // revenue is credited at the gross subtotal; the discount
        // below stays a contra-revenue debit, which is what makes the
        // event balance
        ("4000", EntryType::Credit, BigDecimal::from(2000)),
        ("2200", EntryType::Credit, money("97.50")),
        ("1300", EntryType::Debit, money("1047.50")),
        ("1000", EntryType::Debit, BigDecimal::from(1000)),
        ("4100", EntryType::Debit, BigDecimal::from(50)),
    ];
    for (entry, (code, entry_type, amount)) in entries.iter().zip(&expected) {
        assert_eq!(&entry.account_code, code);
        assert_eq!(&entry.entry_type, entry_type);
        assert_eq!(&entry.amount, amount);
    }

    let totals = journal_totals(&entries);
    assert!(totals.is_balanced);
    assert_eq!(totals.total_debits, money("3097.50"));
    assert_eq!(totals.total_credits, money("3097.50"));

    assert_eq!(engine.current_stock(product.id).await.unwrap(), 40);
}

#[tokio::test]
async fn test_balance_law_across_conditional_combinations() {
    // every combination of discount on/off, VAT on/off, and unpaid /
    // partially paid / fully paid must balance exactly
    for discount_on in [false, true] {
        for vat_on in [false, true] {
            for payment in ["none", "partial", "full"] {
                let (mut engine, product) = engine_with_product(50).await;

                let discount = if discount_on {
                    Some(BigDecimal::from(50))
                } else {
                    None
                };
                let vat_rate = if vat_on {
                    Some(BigDecimal::from(5))
                } else {
                    None
                };

                // compute the expected total to derive the paid amount
                let subtotal = BigDecimal::from(10) * BigDecimal::from(200);
                let after_discount = &subtotal
                    - discount.clone().unwrap_or_else(|| BigDecimal::from(0));
                let vat = if vat_on {
                    money("0.05") * &after_discount
                } else {
                    BigDecimal::from(0)
                };
                let total = &after_discount + &vat;

                let paid_amount = match payment {
                    "none" => BigDecimal::from(0),
                    "partial" => BigDecimal::from(500),
                    _ => total.clone(),
                };

                let sale = engine
                    .create_sale(SaleRequest {
                        product_id: product.id,
                        quantity: 10,
                        discount,
                        vat_rate,
                        paid_amount,
                        sale_date: date(2),
                    })
                    .await
                    .unwrap();

                let all = engine.list_journal_entries(Some(march())).await.unwrap();
                let entries = entries_for_sale(&all, &sale);
                let totals = journal_totals(&entries);
                assert!(
                    totals.is_balanced,
                    "unbalanced for discount={discount_on} vat={vat_on} payment={payment}: \
                     debits {} credits {}",
                    totals.total_debits, totals.total_credits
                );
            }
        }
    }
}

#[tokio::test]
async fn test_conditional_lines_are_omitted() {
    let (mut engine, product) = engine_with_product(50).await;

    // no VAT, no discount, fully paid: only COGS pair, revenue, cash
    let sale = engine
        .create_sale(SaleRequest {
            product_id: product.id,
            quantity: 2,
            discount: None,
            vat_rate: None,
            paid_amount: BigDecimal::from(400),
            sale_date: date(3),
        })
        .await
        .unwrap();

    assert_eq!(sale.due_amount, BigDecimal::from(0));

    let all = engine.list_journal_entries(Some(march())).await.unwrap();
    let entries = entries_for_sale(&all, &sale);
    let codes: Vec<&str> = entries.iter().map(|e| e.account_code.as_str()).collect();
    assert_eq!(codes, vec!["5000", "1200", "4000", "1000"]);
    assert!(!codes.contains(&"2200"), "no VAT Payable line expected");
    assert!(!codes.contains(&"1300"), "no Accounts Receivable line expected");
    assert!(!codes.contains(&"4100"), "no Sales Discount line expected");

    // fully unpaid: Accounts Receivable replaces Cash
    let unpaid = engine
        .create_sale(SaleRequest {
            product_id: product.id,
            quantity: 2,
            discount: None,
            vat_rate: None,
            paid_amount: BigDecimal::from(0),
            sale_date: date(3),
        })
        .await
        .unwrap();

    let all = engine.list_journal_entries(Some(march())).await.unwrap();
    let codes: Vec<String> = entries_for_sale(&all, &unpaid)
        .iter()
        .map(|e| e.account_code.clone())
        .collect();
    assert_eq!(codes, vec!["5000", "1200", "4000", "1300"]);
}

#[tokio::test]
async fn test_insufficient_stock_writes_nothing() {
    let (mut engine, product) = engine_with_product(5).await;

    let err = engine
        .create_sale(SaleRequest {
            product_id: product.id,
            quantity: 8,
            discount: None,
            vat_rate: None,
            paid_amount: BigDecimal::from(0),
            sale_date: date(4),
        })
        .await
        .unwrap_err();

    match err {
        LedgerError::InsufficientStock {
            requested,
            available,
        } => {
            assert_eq!(requested, 8);
            assert_eq!(available, 5);
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    assert_eq!(engine.current_stock(product.id).await.unwrap(), 5);
    assert!(engine.list_sales(None).await.unwrap().is_empty());
    // only the opening-stock pair exists
    assert_eq!(engine.list_journal_entries(None).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_entry_numbers_unique_across_interleaved_events() {
    let (mut engine, product) = engine_with_product(100).await;

    for day in 1..=5 {
        engine
            .create_sale(SaleRequest {
                product_id: product.id,
                quantity: 3,
                discount: Some(BigDecimal::from(10)),
                vat_rate: Some(BigDecimal::from(5)),
                paid_amount: BigDecimal::from(100),
                sale_date: date(day),
            })
            .await
            .unwrap();
        engine
            .create_expense(
                format!("Courier run {day}"),
                BigDecimal::from(40),
                date(day),
                None,
            )
            .await
            .unwrap();
    }

    let entries = engine.list_journal_entries(None).await.unwrap();
    let numbers: HashSet<&str> = entries.iter().map(|e| e.entry_number.as_str()).collect();
    assert_eq!(numbers.len(), entries.len());

    let ids: HashSet<u64> = entries.iter().map(|e| e.id).collect();
    assert_eq!(ids.len(), entries.len());
}

#[tokio::test]
async fn test_expense_journal_pair() {
    let mut engine = AccountingEngine::new(MemoryStorage::new());

    let expense = engine
        .create_expense(
            "Shop rent".to_string(),
            BigDecimal::from(800),
            date(10),
            Some("rent".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(expense.category, "rent");

    let entries = engine.list_journal_entries(None).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].account_code, "6000");
    assert_eq!(entries[0].entry_type, EntryType::Debit);
    assert_eq!(entries[1].account_code, "1000");
    assert_eq!(entries[1].entry_type, EntryType::Credit);
    assert!(journal_totals(&entries).is_balanced);
}

#[tokio::test]
async fn test_validation_failures_write_nothing() {
    let (mut engine, product) = engine_with_product(50).await;

    // discount greater than the subtotal
    let err = engine
        .create_sale(SaleRequest {
            product_id: product.id,
            quantity: 1,
            discount: Some(BigDecimal::from(201)),
            vat_rate: None,
            paid_amount: BigDecimal::from(0),
            sale_date: date(5),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    // VAT rate above 100
    let err = engine
        .create_sale(SaleRequest {
            product_id: product.id,
            quantity: 1,
            discount: None,
            vat_rate: Some(BigDecimal::from(101)),
            paid_amount: BigDecimal::from(0),
            sale_date: date(5),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    // overpayment
    let err = engine
        .create_sale(SaleRequest {
            product_id: product.id,
            quantity: 1,
            discount: None,
            vat_rate: None,
            paid_amount: BigDecimal::from(500),
            sale_date: date(5),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    // unknown product
    let err = engine
        .create_sale(SaleRequest {
            product_id: Uuid::new_v4(),
            quantity: 1,
            discount: None,
            vat_rate: None,
            paid_amount: BigDecimal::from(0),
            sale_date: date(5),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::ProductNotFound(_)));

    assert!(engine.list_sales(None).await.unwrap().is_empty());
    assert_eq!(engine.current_stock(product.id).await.unwrap(), 50);
    assert_eq!(engine.list_journal_entries(None).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_financial_report() {
    let (mut engine, product) = engine_with_product(50).await;

    engine
        .create_sale(SaleRequest {
            product_id: product.id,
            quantity: 10,
            discount: Some(BigDecimal::from(50)),
            vat_rate: Some(BigDecimal::from(5)),
            paid_amount: BigDecimal::from(1000),
            sale_date: date(1),
        })
        .await
        .unwrap();
    engine
        .create_sale(SaleRequest {
            product_id: product.id,
            quantity: 5,
            discount: None,
            vat_rate: None,
            paid_amount: BigDecimal::from(1000),
            sale_date: date(2),
        })
        .await
        .unwrap();
    engine
        .create_expense("Electricity".to_string(), BigDecimal::from(300), date(2), None)
        .await
        .unwrap();

    let (start, end) = march();
    let summary = engine.financial_report(start, end).await.unwrap();

    assert_eq!(summary.total_sales, money("3047.50"));
    assert_eq!(summary.total_discount, BigDecimal::from(50));
    assert_eq!(summary.total_vat, money("97.50"));
    assert_eq!(summary.total_paid, BigDecimal::from(2000));
    assert_eq!(summary.total_due, money("1047.50"));
    assert_eq!(summary.total_expenses, BigDecimal::from(300));
    // 15 units at the current purchase price of 100
    assert_eq!(summary.cogs_total, BigDecimal::from(1500));
    assert_eq!(summary.gross_profit, money("1497.50"));
    assert_eq!(summary.net_profit, money("1197.50"));

    // per-day breakdown, newest first
    assert_eq!(summary.daily.len(), 2);
    assert_eq!(summary.daily[0].date, date(2));
    assert_eq!(summary.daily[0].sales_total, BigDecimal::from(1000));
    assert_eq!(summary.daily[0].expenses_total, BigDecimal::from(300));
    assert_eq!(summary.daily[0].net, BigDecimal::from(700));
    assert_eq!(summary.daily[1].date, date(1));
    assert_eq!(summary.daily[1].net, money("2047.50"));

    // identical arguments with no intervening writes: identical result
    let again = engine.financial_report(start, end).await.unwrap();
    assert_eq!(summary, again);
}

#[tokio::test]
async fn test_purchase_restock() {
    let (mut engine, product) = engine_with_product(50).await;

    engine
        .record_purchase(
            product.id,
            20,
            BigDecimal::from(110),
            date(6),
            Some("Restock from supplier".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(engine.current_stock(product.id).await.unwrap(), 70);

    let history = engine.stock_history(product.id).await.unwrap();
    assert_eq!(history.len(), 2); // opening + purchase
    assert_eq!(history[1].total_amount, BigDecimal::from(2200));

    // restocking writes no journal lines
    assert_eq!(engine.list_journal_entries(None).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_journal_listing_order() {
    let (mut engine, product) = engine_with_product(50).await;

    engine
        .create_sale(SaleRequest {
            product_id: product.id,
            quantity: 1,
            discount: None,
            vat_rate: None,
            paid_amount: BigDecimal::from(200),
            sale_date: date(10),
        })
        .await
        .unwrap();
    engine
        .create_expense("Packaging".to_string(), BigDecimal::from(60), date(12), None)
        .await
        .unwrap();
    engine
        .create_expense("Fuel".to_string(), BigDecimal::from(40), date(10), None)
        .await
        .unwrap();

    let entries = engine.list_journal_entries(Some(march())).await.unwrap();

    // newest date first, then id ascending within a day
    let keys: Vec<(NaiveDate, u64)> = entries.iter().map(|e| (e.entry_date, e.id)).collect();
    let mut expected = keys.clone();
    expected.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    assert_eq!(keys, expected);
    assert_eq!(entries[0].entry_date, date(12));
}

#[tokio::test]
async fn test_dashboard_counters() {
    let (mut engine, product) = engine_with_product(50).await;
    engine
        .create_product(
            "Second Product".to_string(),
            BigDecimal::from(10),
            BigDecimal::from(20),
            5,
        )
        .await
        .unwrap();

    engine
        .create_sale(SaleRequest {
            product_id: product.id,
            quantity: 4,
            discount: None,
            vat_rate: None,
            paid_amount: BigDecimal::from(800),
            sale_date: date(15),
        })
        .await
        .unwrap();
    engine
        .create_expense("Tea".to_string(), BigDecimal::from(30), date(15), None)
        .await
        .unwrap();

    let stats = engine.dashboard(date(15)).await.unwrap();
    assert_eq!(stats.total_products, 2);
    assert_eq!(stats.total_stock, 51); // 50 - 4 + 5
    assert_eq!(stats.today_sales, BigDecimal::from(800));
    assert_eq!(stats.today_expenses, BigDecimal::from(30));

    // a different day sees no activity
    let quiet = engine.dashboard(date(16)).await.unwrap();
    assert_eq!(quiet.today_sales, BigDecimal::from(0));
    assert_eq!(quiet.today_expenses, BigDecimal::from(0));
}

#[tokio::test]
async fn test_entities_serialize_round_trip() {
    let (mut engine, product) = engine_with_product(50).await;

    let sale = engine
        .create_sale(SaleRequest {
            product_id: product.id,
            quantity: 10,
            discount: Some(BigDecimal::from(50)),
            vat_rate: Some(BigDecimal::from(5)),
            paid_amount: BigDecimal::from(1000),
            sale_date: date(1),
        })
        .await
        .unwrap();

    let json = serde_json::to_string(&sale).unwrap();
    let back: Sale = serde_json::from_str(&json).unwrap();
    assert_eq!(sale, back);

    let entries = engine.list_journal_entries(Some(march())).await.unwrap();
    let json = serde_json::to_string(&entries).unwrap();
    let back: Vec<JournalEntry> = serde_json::from_str(&json).unwrap();
    assert_eq!(entries, back);
}
