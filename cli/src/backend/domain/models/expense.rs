//! Domain model for a single recorded expense.

use chrono::NaiveDateTime;

/// Timestamp format used in ledger records (entry-creation time).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One committed expense entry.
///
/// The calendar date an expense belongs to is the partition key and is
/// carried alongside the record, not inside it. The `timestamp` is the
/// moment the entry was recorded, which need not match the expense date.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    /// Sequential id, unique within the record's date partition.
    /// Assigned as the partition's current maximum plus one and never
    /// reused.
    pub id: u32,
    pub item_name: String,
    pub timestamp: NaiveDateTime,
    /// Amount paid, always positive, stored with two decimal places
    pub amount: f64,
}

impl ExpenseRecord {
    /// Render the entry-creation timestamp in the ledger wire format.
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}
