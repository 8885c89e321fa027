//! Financial reporting: date-range summaries, daily breakdowns, and
//! dashboard counters
//!
//! Everything here is a pure function of already-persisted rows; the
//! write path never depends on it.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use crate::types::*;

/// Net result for a single calendar date within a report range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBreakdown {
    pub date: NaiveDate,
    pub sales_total: BigDecimal,
    pub expenses_total: BigDecimal,
    /// sales_total - expenses_total
    pub net: BigDecimal,
}

/// Summary of sales, expenses, and profit over an inclusive date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_sales: BigDecimal,
    pub total_expenses: BigDecimal,
    pub total_discount: BigDecimal,
    pub total_vat: BigDecimal,
    pub total_paid: BigDecimal,
    pub total_due: BigDecimal,
    /// Cost of goods sold, recomputed from the current product
    /// purchase price rather than the historical journal amount
    pub cogs_total: BigDecimal,
    /// total_sales - total_discount - cogs_total
    pub gross_profit: BigDecimal,
    /// gross_profit - total_expenses
    pub net_profit: BigDecimal,
    /// Per-day results over the union of dates present in sales or
    /// expenses, newest first
    pub daily: Vec<DailyBreakdown>,
}

/// Overview counters for a dashboard surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_products: usize,
    /// Sum of on-hand quantities across all products
    pub total_stock: i64,
    pub today_sales: BigDecimal,
    pub today_expenses: BigDecimal,
}

/// Debit/credit totals over a set of journal entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalTotals {
    pub total_debits: BigDecimal,
    pub total_credits: BigDecimal,
    pub is_balanced: bool,
}

/// Sum debit and credit amounts over journal entries, for audit display
pub fn journal_totals(entries: &[JournalEntry]) -> JournalTotals {
    let total_debits: BigDecimal = entries
        .iter()
        .filter(|e| e.entry_type == EntryType::Debit)
        .map(|e| &e.amount)
        .sum();
    let total_credits: BigDecimal = entries
        .iter()
        .filter(|e| e.entry_type == EntryType::Credit)
        .map(|e| &e.amount)
        .sum();
    let is_balanced = total_debits == total_credits;

    JournalTotals {
        total_debits,
        total_credits,
        is_balanced,
    }
}

/// Build a financial summary from sales and expenses in range.
///
/// `purchase_prices` maps each sold product to its current purchase
/// price and must cover every product referenced by `sales`.
pub fn build_summary(
    start_date: NaiveDate,
    end_date: NaiveDate,
    sales: &[Sale],
    expenses: &[Expense],
    purchase_prices: &HashMap<Uuid, BigDecimal>,
) -> LedgerResult<FinancialSummary> {
    let total_sales: BigDecimal = sales.iter().map(|s| &s.total_amount).sum();
    let total_discount: BigDecimal = sales.iter().map(|s| &s.discount).sum();
    let total_vat: BigDecimal = sales.iter().map(|s| &s.vat_amount).sum();
    let total_paid: BigDecimal = sales.iter().map(|s| &s.paid_amount).sum();
    let total_due: BigDecimal = sales.iter().map(|s| &s.due_amount).sum();
    let total_expenses: BigDecimal = expenses.iter().map(|e| &e.amount).sum();

    let mut cogs_total = BigDecimal::from(0);
    for sale in sales {
        let price = purchase_prices
            .get(&sale.product_id)
            .ok_or(LedgerError::ProductNotFound(sale.product_id))?;
        cogs_total += round_money(&(BigDecimal::from(sale.quantity) * price));
    }

    let gross_profit = &total_sales - &total_discount - &cogs_total;
    let net_profit = &gross_profit - &total_expenses;

    // union of dates present in either set, newest first
    let mut days: BTreeMap<NaiveDate, (BigDecimal, BigDecimal)> = BTreeMap::new();
    for sale in sales {
        let day = days
            .entry(sale.sale_date)
            .or_insert_with(|| (BigDecimal::from(0), BigDecimal::from(0)));
        day.0 += &sale.total_amount;
    }
    for expense in expenses {
        let day = days
            .entry(expense.expense_date)
            .or_insert_with(|| (BigDecimal::from(0), BigDecimal::from(0)));
        day.1 += &expense.amount;
    }

    let daily = days
        .into_iter()
        .rev()
        .map(|(date, (sales_total, expenses_total))| {
            let net = &sales_total - &expenses_total;
            DailyBreakdown {
                date,
                sales_total,
                expenses_total,
                net,
            }
        })
        .collect();

    Ok(FinancialSummary {
        start_date,
        end_date,
        total_sales,
        total_expenses,
        total_discount,
        total_vat,
        total_paid,
        total_due,
        cogs_total,
        gross_profit,
        net_profit,
        daily,
    })
}
