//! In-memory storage implementation for testing

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development.
///
/// Clones share the same underlying state, mirroring how a pooled
/// database handle behaves. `commit_event` inserts every row under one
/// write pass, so an event is never partially visible.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
    stock_transactions: Arc<RwLock<Vec<StockTransaction>>>,
    sales: Arc<RwLock<HashMap<Uuid, Sale>>>,
    expenses: Arc<RwLock<HashMap<Uuid, Expense>>>,
    journal: Arc<RwLock<Vec<JournalEntry>>>,
    entry_sequence: Arc<RwLock<u64>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
            stock_transactions: Arc::new(RwLock::new(Vec::new())),
            sales: Arc::new(RwLock::new(HashMap::new())),
            expenses: Arc::new(RwLock::new(HashMap::new())),
            journal: Arc::new(RwLock::new(Vec::new())),
            entry_sequence: Arc::new(RwLock::new(0)),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.products.write().unwrap().clear();
        self.stock_transactions.write().unwrap().clear();
        self.sales.write().unwrap().clear();
        self.expenses.write().unwrap().clear();
        self.journal.write().unwrap().clear();
        *self.entry_sequence.write().unwrap() = 0;
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventoryStorage for MemoryStorage {
    async fn get_product(&self, product_id: Uuid) -> LedgerResult<Option<Product>> {
        Ok(self.products.read().unwrap().get(&product_id).cloned())
    }

    async fn list_products(&self) -> LedgerResult<Vec<Product>> {
        Ok(self.products.read().unwrap().values().cloned().collect())
    }

    async fn stock_transactions(&self, product_id: Uuid) -> LedgerResult<Vec<StockTransaction>> {
        Ok(self
            .stock_transactions
            .read()
            .unwrap()
            .iter()
            .filter(|t| t.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn next_entry_sequence(&mut self) -> LedgerResult<u64> {
        let mut sequence = self.entry_sequence.write().unwrap();
        *sequence += 1;
        Ok(*sequence)
    }

    async fn commit_event(&mut self, commit: EventCommit) -> LedgerResult<()> {
        // hold every write lock for the duration so readers observe the
        // event all-or-nothing
        let mut products = self.products.write().unwrap();
        let mut stock_transactions = self.stock_transactions.write().unwrap();
        let mut sales = self.sales.write().unwrap();
        let mut expenses = self.expenses.write().unwrap();
        let mut journal = self.journal.write().unwrap();

        if let Some(product) = commit.product {
            products.insert(product.id, product);
        }
        if let Some(sale) = commit.sale {
            sales.insert(sale.id, sale);
        }
        if let Some(expense) = commit.expense {
            expenses.insert(expense.id, expense);
        }
        if let Some(row) = commit.stock_transaction {
            stock_transactions.push(row);
        }
        journal.extend(commit.journal_entries);

        Ok(())
    }

    async fn sales_between(&self, start: NaiveDate, end: NaiveDate) -> LedgerResult<Vec<Sale>> {
        Ok(self
            .sales
            .read()
            .unwrap()
            .values()
            .filter(|s| s.sale_date >= start && s.sale_date <= end)
            .cloned()
            .collect())
    }

    async fn expenses_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> LedgerResult<Vec<Expense>> {
        Ok(self
            .expenses
            .read()
            .unwrap()
            .values()
            .filter(|e| e.expense_date >= start && e.expense_date <= end)
            .cloned()
            .collect())
    }

    async fn journal_entries(
        &self,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> LedgerResult<Vec<JournalEntry>> {
        Ok(self
            .journal
            .read()
            .unwrap()
            .iter()
            .filter(|entry| match range {
                Some((start, end)) => entry.entry_date >= start && entry.entry_date <= end,
                None => true,
            })
            .cloned()
            .collect())
    }
}
