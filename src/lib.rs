//! # Inventory Ledger
//!
//! A small-business inventory and bookkeeping core: it tracks products
//! and stock levels, records sales with discount/VAT computation, logs
//! cash expenses, and derives a balanced double-entry journal and
//! financial report from those events.
//!
//! ## Features
//!
//! - **Accounting engine**: each business event (opening stock, sale,
//!   expense) becomes a balanced set of journal lines plus a stock
//!   transaction, committed atomically
//! - **Stock ledger**: append-only per-product movement history with
//!   derived on-hand quantities
//! - **Fixed chart of accounts**: nine accounts with enforced normal
//!   balance sides
//! - **VAT calculations**: percentage VAT on the discounted subtotal,
//!   with forward and reverse breakdowns
//! - **Financial reporting**: date-range summaries, per-day nets, and
//!   dashboard counters
//! - **Storage abstraction**: database-agnostic design with
//!   trait-based storage
//!
//! ## Quick Start
//!
//! ```rust
//! use inventory_ledger::{AccountingEngine, SaleRequest};
//! use inventory_ledger::utils::MemoryStorage;
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut engine = AccountingEngine::new(MemoryStorage::new());
//!
//! let product = engine
//!     .create_product(
//!         "Sample Product".to_string(),
//!         BigDecimal::from(100),
//!         BigDecimal::from(200),
//!         50,
//!     )
//!     .await?;
//!
//! let sale = engine
//!     .create_sale(SaleRequest {
//!         product_id: product.id,
//!         quantity: 10,
//!         discount: Some(BigDecimal::from(50)),
//!         vat_rate: Some(BigDecimal::from(5)),
//!         paid_amount: BigDecimal::from(1000),
//!         sale_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
//!     })
//!     .await?;
//!
//! assert_eq!(sale.due_amount.to_string(), "1047.50");
//! # Ok(())
//! # }
//! ```

pub mod ledger;
pub mod report;
pub mod tax;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use ledger::*;
pub use report::*;
pub use tax::vat::*;
pub use traits::*;
pub use types::*;
