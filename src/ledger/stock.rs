//! Stock ledger: per-product movement history and on-hand quantity

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::traits::{EventCommit, InventoryStorage};
use crate::types::*;
use crate::utils::validation;

/// Derive the on-hand quantity from a product and its movement history.
///
/// `opening_stock` on the product is the single source of truth for the
/// initial quantity; `Opening`-kind rows exist for audit display only
/// and are deliberately excluded from the sum so the figure is never
/// double counted.
pub fn on_hand(product: &Product, transactions: &[StockTransaction]) -> i64 {
    let purchased: i64 = transactions
        .iter()
        .filter(|t| t.kind == StockTransactionKind::Purchase)
        .map(|t| i64::from(t.quantity))
        .sum();
    let sold: i64 = transactions
        .iter()
        .filter(|t| t.kind == StockTransactionKind::Sale)
        .map(|t| i64::from(t.quantity))
        .sum();

    i64::from(product.opening_stock) + purchased - sold
}

/// Stock ledger for a storage backend.
///
/// Appends immutable movement rows and answers current-stock queries.
/// There is no update or delete; corrections are new rows.
pub struct StockLedger<S: InventoryStorage> {
    pub(crate) storage: S,
}

impl<S: InventoryStorage> StockLedger<S> {
    /// Create a new stock ledger over the given storage backend
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Current on-hand quantity for a product
    pub async fn current_stock(&self, product_id: Uuid) -> LedgerResult<i64> {
        let product = self
            .storage
            .get_product(product_id)
            .await?
            .ok_or(LedgerError::ProductNotFound(product_id))?;
        let transactions = self.storage.stock_transactions(product_id).await?;
        Ok(on_hand(&product, &transactions))
    }

    /// Full movement history for a product, oldest first
    pub async fn history(&self, product_id: Uuid) -> LedgerResult<Vec<StockTransaction>> {
        if self.storage.get_product(product_id).await?.is_none() {
            return Err(LedgerError::ProductNotFound(product_id));
        }
        self.storage.stock_transactions(product_id).await
    }

    /// Append one immutable stock transaction row.
    ///
    /// The quantity must be at least 1 and the product must exist.
    /// `Opening` and `Sale` rows are normally produced by the
    /// accounting engine's event processors, which also derive the
    /// matching journal lines; this direct path records plain stock
    /// movement such as a purchase restock.
    pub async fn record_transaction(
        &mut self,
        product_id: Uuid,
        kind: StockTransactionKind,
        quantity: u32,
        unit_price: BigDecimal,
        transaction_date: NaiveDate,
        note: Option<String>,
    ) -> LedgerResult<StockTransaction> {
        validation::validate_quantity(quantity)?;
        validation::validate_price(&unit_price)?;
        if self.storage.get_product(product_id).await?.is_none() {
            return Err(LedgerError::ProductNotFound(product_id));
        }

        let row = StockTransaction::new(
            product_id,
            kind,
            quantity,
            unit_price,
            transaction_date,
            note,
        );
        self.storage
            .commit_event(EventCommit {
                stock_transaction: Some(row.clone()),
                ..EventCommit::default()
            })
            .await?;

        tracing::debug!(
            product_id = %product_id,
            kind = ?kind,
            quantity,
            "recorded stock transaction"
        );
        Ok(row)
    }
}
