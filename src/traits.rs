//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::types::*;

/// Every row derived from one business event, committed as a unit.
///
/// The accounting engine builds the complete set of rows for an event
/// (opening stock, sale, expense, or a bare stock movement) and hands
/// them to the storage backend in a single call. The backend must
/// persist all of them or none - a failure on any row leaves no orphan
/// journal or stock rows behind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventCommit {
    pub product: Option<Product>,
    pub sale: Option<Sale>,
    pub expense: Option<Expense>,
    pub stock_transaction: Option<StockTransaction>,
    pub journal_entries: Vec<JournalEntry>,
}

/// Storage abstraction for the inventory ledger
///
/// This trait allows the core to work with any storage backend
/// (PostgreSQL, MySQL, SQLite, in-memory, etc.) by implementing these
/// methods. Mutating methods take `&mut self`; combined with the
/// engine's own exclusive borrow this serializes writes, so a stock
/// check and the commit that follows it cannot interleave with another
/// writer.
#[async_trait]
pub trait InventoryStorage: Send + Sync {
    /// Get a product by id
    async fn get_product(&self, product_id: Uuid) -> LedgerResult<Option<Product>>;

    /// List all products
    async fn list_products(&self) -> LedgerResult<Vec<Product>>;

    /// All stock transaction rows for a product, in insertion order
    async fn stock_transactions(&self, product_id: Uuid) -> LedgerResult<Vec<StockTransaction>>;

    /// Atomically advance and return the persistent journal-entry
    /// sequence.
    ///
    /// Each call reflects every number already handed out, including
    /// ones allocated earlier within the same event. Gaps left by an
    /// event that later failed to commit are harmless; reuse is not.
    async fn next_entry_sequence(&mut self) -> LedgerResult<u64>;

    /// Persist all rows of one business event, atomically.
    ///
    /// Implementations must wrap this in a single storage transaction:
    /// either every row in `commit` becomes visible or none do.
    async fn commit_event(&mut self, commit: EventCommit) -> LedgerResult<()>;

    /// Sales with `sale_date` in the inclusive range
    async fn sales_between(&self, start: NaiveDate, end: NaiveDate) -> LedgerResult<Vec<Sale>>;

    /// Expenses with `expense_date` in the inclusive range
    async fn expenses_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> LedgerResult<Vec<Expense>>;

    /// Journal entries, optionally restricted to an inclusive date range
    async fn journal_entries(
        &self,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> LedgerResult<Vec<JournalEntry>>;
}
