//! Core types and data structures for the inventory ledger

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Round an amount to the fixed 2-decimal currency precision.
///
/// Every derived monetary figure (subtotal, VAT, totals) passes through
/// this before it is stored or compared, so the balance law can be
/// checked with exact equality instead of a rounding tolerance.
pub fn round_money(amount: &BigDecimal) -> BigDecimal {
    amount.with_scale_round(2, RoundingMode::HalfUp)
}

/// Types of entries in double-entry bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit entry - increases Assets and Expenses, decreases Liabilities, Equity, and Income
    Debit,
    /// Credit entry - increases Liabilities, Equity, and Income, decreases Assets and Expenses
    Credit,
}

/// The fixed chart of accounts.
///
/// The mapping from account code to name and normal balance side is not
/// user-configurable; every journal line posts against one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Account {
    /// 1000 - Cash
    Cash,
    /// 1200 - Inventory
    Inventory,
    /// 1300 - Accounts Receivable
    AccountsReceivable,
    /// 2200 - VAT Payable
    VatPayable,
    /// 3000 - Opening Stock Equity
    OpeningStockEquity,
    /// 4000 - Sales Revenue
    SalesRevenue,
    /// 4100 - Sales Discount (contra-revenue)
    SalesDiscount,
    /// 5000 - Cost of Goods Sold
    CostOfGoodsSold,
    /// 6000 - Expenses
    Expenses,
}

impl Account {
    /// Numeric account code as it appears on journal entries
    pub fn code(&self) -> &'static str {
        match self {
            Account::Cash => "1000",
            Account::Inventory => "1200",
            Account::AccountsReceivable => "1300",
            Account::VatPayable => "2200",
            Account::OpeningStockEquity => "3000",
            Account::SalesRevenue => "4000",
            Account::SalesDiscount => "4100",
            Account::CostOfGoodsSold => "5000",
            Account::Expenses => "6000",
        }
    }

    /// Human-readable account name
    pub fn name(&self) -> &'static str {
        match self {
            Account::Cash => "Cash",
            Account::Inventory => "Inventory",
            Account::AccountsReceivable => "Accounts Receivable",
            Account::VatPayable => "VAT Payable",
            Account::OpeningStockEquity => "Opening Stock Equity",
            Account::SalesRevenue => "Sales Revenue",
            Account::SalesDiscount => "Sales Discount",
            Account::CostOfGoodsSold => "Cost of Goods Sold",
            Account::Expenses => "Expenses",
        }
    }

    /// Returns the normal balance side for this account
    pub fn normal_balance(&self) -> EntryType {
        match self {
            Account::Cash
            | Account::Inventory
            | Account::AccountsReceivable
            | Account::SalesDiscount
            | Account::CostOfGoodsSold
            | Account::Expenses => EntryType::Debit,
            Account::VatPayable | Account::OpeningStockEquity | Account::SalesRevenue => {
                EntryType::Credit
            }
        }
    }

    /// The full chart, in account-code order
    pub fn chart() -> [Account; 9] {
        [
            Account::Cash,
            Account::Inventory,
            Account::AccountsReceivable,
            Account::VatPayable,
            Account::OpeningStockEquity,
            Account::SalesRevenue,
            Account::SalesDiscount,
            Account::CostOfGoodsSold,
            Account::Expenses,
        ]
    }
}

/// A product tracked in inventory.
///
/// Prices and opening stock are fixed at creation; later stock movement
/// goes through [`StockTransaction`] rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier for the product
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Unit cost price
    pub purchase_price: BigDecimal,
    /// Unit selling price
    pub sell_price: BigDecimal,
    /// Quantity on hand when the product was first recorded
    pub opening_stock: u32,
}

impl Product {
    /// Create a new product with a fresh identifier
    pub fn new(
        name: String,
        purchase_price: BigDecimal,
        sell_price: BigDecimal,
        opening_stock: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            purchase_price: round_money(&purchase_price),
            sell_price: round_money(&sell_price),
            opening_stock,
        }
    }
}

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockTransactionKind {
    /// Audit record of the initial quantity; not summed into current stock
    Opening,
    /// Stock in
    Purchase,
    /// Stock out
    Sale,
}

/// One immutable row of a product's stock movement history.
///
/// Quantity is always stored positive; the kind determines direction.
/// Rows are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockTransaction {
    pub id: Uuid,
    pub product_id: Uuid,
    pub kind: StockTransactionKind,
    pub quantity: u32,
    pub unit_price: BigDecimal,
    /// quantity x unit_price
    pub total_amount: BigDecimal,
    pub transaction_date: NaiveDate,
    pub note: Option<String>,
}

impl StockTransaction {
    /// Create a new stock transaction row
    pub fn new(
        product_id: Uuid,
        kind: StockTransactionKind,
        quantity: u32,
        unit_price: BigDecimal,
        transaction_date: NaiveDate,
        note: Option<String>,
    ) -> Self {
        let total_amount = round_money(&(BigDecimal::from(quantity) * &unit_price));
        Self {
            id: Uuid::new_v4(),
            product_id,
            kind,
            quantity,
            unit_price,
            total_amount,
            transaction_date,
            note,
        }
    }
}

/// A completed sale.
///
/// All monetary fields are fixed at creation; `unit_price` is the
/// product's sell price snapshotted at sale time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: u32,
    /// Sell price per unit at the moment of sale
    pub unit_price: BigDecimal,
    /// quantity x unit_price
    pub subtotal: BigDecimal,
    pub discount: BigDecimal,
    /// VAT percentage applied to the discounted subtotal
    pub vat_rate: BigDecimal,
    pub vat_amount: BigDecimal,
    /// (subtotal - discount) + vat_amount
    pub total_amount: BigDecimal,
    pub paid_amount: BigDecimal,
    /// total_amount - paid_amount
    pub due_amount: BigDecimal,
    pub sale_date: NaiveDate,
}

/// A cash expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub description: String,
    pub amount: BigDecimal,
    pub expense_date: NaiveDate,
    pub category: String,
}

impl Expense {
    /// Create a new expense; the category defaults to `"general"`
    pub fn new(
        description: String,
        amount: BigDecimal,
        expense_date: NaiveDate,
        category: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description,
            amount: round_money(&amount),
            expense_date,
            category: category.unwrap_or_else(|| "general".to_string()),
        }
    }
}

/// One line of the double-entry journal.
///
/// Append-only and immutable. The `id` is the global entry sequence, so
/// ascending id equals creation order within a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Global sequence number, unique and monotonically assigned
    pub id: u64,
    /// Human-readable unique entry number, e.g. `JE-20260805-0001`
    pub entry_number: String,
    pub entry_date: NaiveDate,
    pub description: String,
    pub entry_type: EntryType,
    /// Always positive
    pub amount: BigDecimal,
    pub account_code: String,
    pub account_name: String,
    /// Originating sale, when the entry belongs to a sale event
    pub sale_id: Option<Uuid>,
    /// Product involved in the originating event
    pub product_id: Option<Uuid>,
}

/// Errors that can occur in the inventory ledger
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: i64 },
    #[error("product not found: {0}")]
    ProductNotFound(Uuid),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
