//! Journal entry numbering

use chrono::NaiveDate;

/// Prefix carried by every journal entry number
pub const ENTRY_NUMBER_PREFIX: &str = "JE";

/// Format a journal entry number from the persistent sequence and the
/// entry date.
///
/// The date component leads so that lexicographic order of numbers
/// follows entry-date order for audit display; the sequence breaks ties
/// within a day in creation order. The sequence itself comes from
/// [`crate::traits::InventoryStorage::next_entry_sequence`], which is the
/// sole authority on uniqueness - this function is pure formatting.
pub fn entry_number(sequence: u64, entry_date: NaiveDate) -> String {
    format!(
        "{}-{}-{:04}",
        ENTRY_NUMBER_PREFIX,
        entry_date.format("%Y%m%d"),
        sequence
    )
}
