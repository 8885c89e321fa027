//! Journal batch construction and balance enforcement

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::ledger::numbering;
use crate::types::*;

/// One not-yet-numbered line of a journal batch
#[derive(Debug, Clone, PartialEq)]
pub struct JournalLine {
    pub account: Account,
    pub entry_type: EntryType,
    pub amount: BigDecimal,
    pub description: String,
}

impl JournalLine {
    /// Finalize this line into a persistable journal entry
    pub fn into_entry(
        self,
        sequence: u64,
        entry_date: NaiveDate,
        sale_id: Option<Uuid>,
        product_id: Option<Uuid>,
    ) -> JournalEntry {
        JournalEntry {
            id: sequence,
            entry_number: numbering::entry_number(sequence, entry_date),
            entry_date,
            description: self.description,
            entry_type: self.entry_type,
            amount: self.amount,
            account_code: self.account.code().to_string(),
            account_name: self.account.name().to_string(),
            sale_id,
            product_id,
        }
    }
}

/// The ordered set of journal lines derived from a single business
/// event.
///
/// Lines are appended in the fixed order the event processor defines;
/// that order only affects assigned entry numbers, never amounts.
/// [`JournalBatch::validate`] enforces the double-entry balance law
/// before anything reaches storage - an unbalanced batch is a
/// construction bug, not recoverable input.
#[derive(Debug, Clone, Default)]
pub struct JournalBatch {
    lines: Vec<JournalLine>,
}

impl JournalBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Append a debit line
    pub fn debit(mut self, account: Account, amount: BigDecimal, description: String) -> Self {
        self.lines.push(JournalLine {
            account,
            entry_type: EntryType::Debit,
            amount,
            description,
        });
        self
    }

    /// Append a credit line
    pub fn credit(mut self, account: Account, amount: BigDecimal, description: String) -> Self {
        self.lines.push(JournalLine {
            account,
            entry_type: EntryType::Credit,
            amount,
            description,
        });
        self
    }

    /// Lines accumulated so far
    pub fn lines(&self) -> &[JournalLine] {
        &self.lines
    }

    /// Calculate total debits
    pub fn total_debits(&self) -> BigDecimal {
        self.lines
            .iter()
            .filter(|l| l.entry_type == EntryType::Debit)
            .map(|l| &l.amount)
            .sum()
    }

    /// Calculate total credits
    pub fn total_credits(&self) -> BigDecimal {
        self.lines
            .iter()
            .filter(|l| l.entry_type == EntryType::Credit)
            .map(|l| &l.amount)
            .sum()
    }

    /// Check if the batch is balanced (debits = credits)
    pub fn is_balanced(&self) -> bool {
        self.total_debits() == self.total_credits()
    }

    /// Validate the batch before it is committed.
    ///
    /// Requires at least a debit/credit pair, strictly positive
    /// amounts, and exact balance.
    pub fn validate(&self) -> LedgerResult<()> {
        if self.lines.len() < 2 {
            return Err(LedgerError::Validation(
                "journal batch must have at least two lines for double-entry bookkeeping"
                    .to_string(),
            ));
        }

        for line in &self.lines {
            if line.amount <= BigDecimal::from(0) {
                return Err(LedgerError::Validation(format!(
                    "journal line amounts must be positive, got {} on account {}",
                    line.amount,
                    line.account.code()
                )));
            }
        }

        if !self.is_balanced() {
            return Err(LedgerError::Validation(format!(
                "journal batch is not balanced: debits = {}, credits = {}",
                self.total_debits(),
                self.total_credits()
            )));
        }

        Ok(())
    }

    /// Consume the batch, yielding its lines in posting order
    pub fn into_lines(self) -> Vec<JournalLine> {
        self.lines
    }
}
