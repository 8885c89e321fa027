//! The accounting engine: turns business events into balanced journal
//! batches, stock rows, and persisted records

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::HashMap;
use uuid::Uuid;

use crate::ledger::journal::JournalBatch;
use crate::ledger::stock::{self, StockLedger};
use crate::report::{self, DashboardStats, FinancialSummary};
use crate::tax::VatBreakdown;
use crate::traits::{EventCommit, InventoryStorage};
use crate::types::*;
use crate::utils::validation;

/// Parameters for recording a sale
#[derive(Debug, Clone)]
pub struct SaleRequest {
    pub product_id: Uuid,
    pub quantity: u32,
    /// Flat discount off the subtotal; defaults to zero
    pub discount: Option<BigDecimal>,
    /// VAT percentage on the discounted subtotal; defaults to zero
    pub vat_rate: Option<BigDecimal>,
    pub paid_amount: BigDecimal,
    pub sale_date: NaiveDate,
}

/// The accounting engine.
///
/// Each entry point is one atomic state transition: it validates its
/// input, derives every row the event implies (entity, stock movement,
/// journal lines), proves the journal batch balances, and commits the
/// whole set through a single storage call. A failure anywhere leaves
/// nothing written.
///
/// Write methods take `&mut self`. The exclusive borrow is the
/// serialization the sale path relies on: the stock-sufficiency check
/// and the decrementing commit cannot interleave with another sale of
/// the same product. Reads (`current_stock`, reports, listings) take
/// `&self` and may run concurrently with each other.
pub struct AccountingEngine<S: InventoryStorage> {
    storage: S,
    stock: StockLedger<S>,
}

impl<S: InventoryStorage + Clone> AccountingEngine<S> {
    /// Create a new engine over the given storage backend
    pub fn new(storage: S) -> Self {
        Self {
            stock: StockLedger::new(storage.clone()),
            storage,
        }
    }

    // Write path

    /// Create a product, deriving the opening-stock event when
    /// `opening_stock` is greater than zero.
    pub async fn create_product(
        &mut self,
        name: String,
        purchase_price: BigDecimal,
        sell_price: BigDecimal,
        opening_stock: u32,
    ) -> LedgerResult<Product> {
        validation::validate_product_name(&name)?;
        validation::validate_price(&purchase_price)?;
        validation::validate_price(&sell_price)?;

        let product = Product::new(name, purchase_price, sell_price, opening_stock);
        let commit = self.process_opening_stock(&product).await?;
        self.storage.commit_event(commit).await?;

        tracing::info!(product_id = %product.id, opening_stock, "created product");
        Ok(product)
    }

    /// Build the rows for a product-creation event.
    ///
    /// With no opening stock this is just the product row. Otherwise it
    /// adds an `Opening` stock transaction for audit history and a
    /// debit Inventory / credit Opening Stock Equity pair valued at
    /// opening_stock x purchase_price. A zero-valued pair (free stock)
    /// is skipped entirely rather than written as zero-amount lines.
    async fn process_opening_stock(&mut self, product: &Product) -> LedgerResult<EventCommit> {
        let mut commit = EventCommit {
            product: Some(product.clone()),
            ..EventCommit::default()
        };
        if product.opening_stock == 0 {
            return Ok(commit);
        }

        let recorded_on = chrono::Utc::now().date_naive();
        let amount = round_money(
            &(BigDecimal::from(product.opening_stock) * &product.purchase_price),
        );

        commit.stock_transaction = Some(StockTransaction::new(
            product.id,
            StockTransactionKind::Opening,
            product.opening_stock,
            product.purchase_price.clone(),
            recorded_on,
            Some("Opening Stock".to_string()),
        ));

        if amount > BigDecimal::from(0) {
            let description = format!("Opening Stock - {}", product.name);
            let batch = JournalBatch::new()
                .debit(Account::Inventory, amount.clone(), description.clone())
                .credit(Account::OpeningStockEquity, amount, description);
            batch.validate()?;
            commit.journal_entries = self
                .finalize(batch, recorded_on, None, Some(product.id))
                .await?;
        }

        Ok(commit)
    }

    /// Record a sale.
    ///
    /// Validates quantity, discount, VAT rate, and paid amount, checks
    /// stock sufficiency, snapshots the sell price, and derives the
    /// stock movement plus journal lines in fixed posting order:
    /// COGS debit, Inventory credit, Sales Revenue credit at the gross
    /// subtotal, then conditionally VAT Payable, Accounts Receivable,
    /// Cash, and Sales Discount. Lines whose amount would be zero are
    /// omitted, never written as zeros.
    ///
    /// Revenue is credited gross and the discount stays a separate
    /// contra-revenue debit, so the batch balances exactly:
    /// debits = cogs + due + paid + discount and
    /// credits = cogs + subtotal + vat are algebraically equal.
    pub async fn create_sale(&mut self, request: SaleRequest) -> LedgerResult<Sale> {
        let SaleRequest {
            product_id,
            quantity,
            discount,
            vat_rate,
            paid_amount,
            sale_date,
        } = request;

        let discount = round_money(&discount.unwrap_or_else(|| BigDecimal::from(0)));
        let vat_rate = vat_rate.unwrap_or_else(|| BigDecimal::from(0));
        let paid_amount = round_money(&paid_amount);

        validation::validate_quantity(quantity)?;
        validation::validate_non_negative(&discount, "discount")?;
        validation::validate_non_negative(&paid_amount, "paid amount")?;

        let product = self
            .storage
            .get_product(product_id)
            .await?
            .ok_or(LedgerError::ProductNotFound(product_id))?;

        let available = self.stock.current_stock(product_id).await?;
        if available < i64::from(quantity) {
            return Err(LedgerError::InsufficientStock {
                requested: quantity,
                available,
            });
        }

        let subtotal = round_money(&(BigDecimal::from(quantity) * &product.sell_price));
        validation::validate_discount(&discount, &subtotal)?;
        let after_discount = &subtotal - &discount;

        let vat = VatBreakdown::calculate(after_discount, vat_rate.clone())?;
        let total_amount = vat.total_amount.clone();
        validation::validate_paid_amount(&paid_amount, &total_amount)?;
        let due_amount = &total_amount - &paid_amount;

        let sale = Sale {
            id: Uuid::new_v4(),
            product_id,
            quantity,
            unit_price: product.sell_price.clone(),
            subtotal: subtotal.clone(),
            discount: discount.clone(),
            vat_rate,
            vat_amount: vat.vat_amount.clone(),
            total_amount,
            paid_amount: paid_amount.clone(),
            due_amount: due_amount.clone(),
            sale_date,
        };

        let stock_row = StockTransaction::new(
            product_id,
            StockTransactionKind::Sale,
            quantity,
            product.sell_price.clone(),
            sale_date,
            Some("Sale to Customer".to_string()),
        );

        let cogs = round_money(&(BigDecimal::from(quantity) * &product.purchase_price));
        let zero = BigDecimal::from(0);

        let mut batch = JournalBatch::new();
        if cogs > zero {
            batch = batch
                .debit(
                    Account::CostOfGoodsSold,
                    cogs.clone(),
                    format!("COGS - Sale #{} - {}", sale.id, product.name),
                )
                .credit(
                    Account::Inventory,
                    cogs,
                    format!("Inventory Reduction - Sale #{} - {}", sale.id, product.name),
                );
        }
        if subtotal > zero {
            batch = batch.credit(
                Account::SalesRevenue,
                subtotal,
                format!("Sales Revenue - Sale #{} - {}", sale.id, product.name),
            );
        }
        if vat.vat_amount > zero {
            batch = batch.credit(
                Account::VatPayable,
                vat.vat_amount,
                format!("VAT Payable - Sale #{}", sale.id),
            );
        }
        if due_amount > zero {
            batch = batch.debit(
                Account::AccountsReceivable,
                due_amount,
                format!("Accounts Receivable - Sale #{}", sale.id),
            );
        }
        if paid_amount > zero {
            batch = batch.debit(
                Account::Cash,
                paid_amount,
                format!("Cash Received - Sale #{}", sale.id),
            );
        }
        if discount > zero {
            batch = batch.debit(
                Account::SalesDiscount,
                discount,
                format!("Sales Discount - Sale #{}", sale.id),
            );
        }

        let journal_entries = if batch.lines().is_empty() {
            Vec::new()
        } else {
            batch.validate()?;
            self.finalize(batch, sale_date, Some(sale.id), Some(product_id))
                .await?
        };

        self.storage
            .commit_event(EventCommit {
                sale: Some(sale.clone()),
                stock_transaction: Some(stock_row),
                journal_entries,
                ..EventCommit::default()
            })
            .await?;

        tracing::info!(sale_id = %sale.id, total = %sale.total_amount, "recorded sale");
        Ok(sale)
    }

    /// Record a cash expense with its debit Expenses / credit Cash pair.
    ///
    /// A zero-amount expense stores the row without journal lines.
    pub async fn create_expense(
        &mut self,
        description: String,
        amount: BigDecimal,
        expense_date: NaiveDate,
        category: Option<String>,
    ) -> LedgerResult<Expense> {
        validation::validate_description(&description)?;
        validation::validate_non_negative(&amount, "amount")?;

        let expense = Expense::new(description, amount, expense_date, category);

        let journal_entries = if expense.amount > BigDecimal::from(0) {
            let batch = JournalBatch::new()
                .debit(
                    Account::Expenses,
                    expense.amount.clone(),
                    format!("Expense - {}", expense.description),
                )
                .credit(
                    Account::Cash,
                    expense.amount.clone(),
                    format!("Cash Payment - {}", expense.description),
                );
            batch.validate()?;
            self.finalize(batch, expense_date, None, None).await?
        } else {
            Vec::new()
        };

        self.storage
            .commit_event(EventCommit {
                expense: Some(expense.clone()),
                journal_entries,
                ..EventCommit::default()
            })
            .await?;

        tracing::info!(expense_id = %expense.id, amount = %expense.amount, "recorded expense");
        Ok(expense)
    }

    /// Record a purchase restock for a product.
    ///
    /// Appends a `Purchase` stock row; purchases carry no journal
    /// derivation in this scope.
    pub async fn record_purchase(
        &mut self,
        product_id: Uuid,
        quantity: u32,
        unit_price: BigDecimal,
        transaction_date: NaiveDate,
        note: Option<String>,
    ) -> LedgerResult<StockTransaction> {
        self.stock
            .record_transaction(
                product_id,
                StockTransactionKind::Purchase,
                quantity,
                unit_price,
                transaction_date,
                note,
            )
            .await
    }

    /// Assign sequence numbers to a validated batch and turn it into
    /// persistable entries. Each line pulls the next number from the
    /// storage counter, so numbers handed out earlier in the same event
    /// are already reflected.
    async fn finalize(
        &mut self,
        batch: JournalBatch,
        entry_date: NaiveDate,
        sale_id: Option<Uuid>,
        product_id: Option<Uuid>,
    ) -> LedgerResult<Vec<JournalEntry>> {
        let lines = batch.into_lines();
        let mut entries = Vec::with_capacity(lines.len());
        for line in lines {
            let sequence = self.storage.next_entry_sequence().await?;
            entries.push(line.into_entry(sequence, entry_date, sale_id, product_id));
        }
        Ok(entries)
    }

    // Read path

    /// Get a product by id
    pub async fn get_product(&self, product_id: Uuid) -> LedgerResult<Option<Product>> {
        self.storage.get_product(product_id).await
    }

    /// List all products
    pub async fn list_products(&self) -> LedgerResult<Vec<Product>> {
        self.storage.list_products().await
    }

    /// Current on-hand quantity for a product
    pub async fn current_stock(&self, product_id: Uuid) -> LedgerResult<i64> {
        self.stock.current_stock(product_id).await
    }

    /// Stock movement history for a product, oldest first
    pub async fn stock_history(&self, product_id: Uuid) -> LedgerResult<Vec<StockTransaction>> {
        self.stock.history(product_id).await
    }

    /// Sales in the optional inclusive range, newest first
    pub async fn list_sales(
        &self,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> LedgerResult<Vec<Sale>> {
        let (start, end) = range.unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
        let mut sales = self.storage.sales_between(start, end).await?;
        sales.sort_by(|a, b| b.sale_date.cmp(&a.sale_date));
        Ok(sales)
    }

    /// Journal entries in the optional inclusive range, ordered
    /// entry_date descending then id ascending, so same-day entries
    /// read in creation order.
    pub async fn list_journal_entries(
        &self,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> LedgerResult<Vec<JournalEntry>> {
        let mut entries = self.storage.journal_entries(range).await?;
        entries.sort_by(|a, b| b.entry_date.cmp(&a.entry_date).then(a.id.cmp(&b.id)));
        Ok(entries)
    }

    /// Financial summary over the inclusive date range.
    ///
    /// Read-only; identical arguments with no intervening writes yield
    /// identical results.
    pub async fn financial_report(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> LedgerResult<FinancialSummary> {
        let sales = self.storage.sales_between(start_date, end_date).await?;
        let expenses = self.storage.expenses_between(start_date, end_date).await?;

        let mut purchase_prices: HashMap<Uuid, BigDecimal> = HashMap::new();
        for sale in &sales {
            if !purchase_prices.contains_key(&sale.product_id) {
                let product = self
                    .storage
                    .get_product(sale.product_id)
                    .await?
                    .ok_or(LedgerError::ProductNotFound(sale.product_id))?;
                purchase_prices.insert(product.id, product.purchase_price);
            }
        }

        report::build_summary(start_date, end_date, &sales, &expenses, &purchase_prices)
    }

    /// Overview counters for a dashboard surface
    pub async fn dashboard(&self, today: NaiveDate) -> LedgerResult<DashboardStats> {
        let products = self.storage.list_products().await?;
        let mut total_stock: i64 = 0;
        for product in &products {
            let transactions = self.storage.stock_transactions(product.id).await?;
            total_stock += stock::on_hand(product, &transactions);
        }

        let today_sales = self
            .storage
            .sales_between(today, today)
            .await?
            .iter()
            .map(|s| &s.total_amount)
            .sum();
        let today_expenses = self
            .storage
            .expenses_between(today, today)
            .await?
            .iter()
            .map(|e| &e.amount)
            .sum();

        Ok(DashboardStats {
            total_products: products.len(),
            total_stock,
            today_sales,
            today_expenses,
        })
    }
}
