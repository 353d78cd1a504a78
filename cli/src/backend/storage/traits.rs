//! # Storage Traits
//!
//! Storage abstraction traits that let the domain layer work against
//! different persistence backends. The shipped backend keeps everything in
//! plain text files; tests may substitute their own implementations.

use chrono::NaiveDate;

use crate::backend::domain::errors::TrackerResult;
use crate::backend::domain::models::expense::ExpenseRecord;

/// Interface for the single persisted balance slot.
pub trait BalanceStore: Send + Sync {
    /// Read the current balance. Fails with `CorruptBalance` when the slot
    /// is missing or does not parse; the degrade policy belongs to the
    /// caller.
    fn read_balance(&self) -> TrackerResult<f64>;

    /// Overwrite the slot with the new balance, formatted to exactly two
    /// decimal places.
    fn write_balance(&self, new_balance: f64) -> TrackerResult<()>;

    /// Write the first-run default balance when no slot exists yet.
    /// Never overwrites an existing value.
    fn initialize_if_absent(&self) -> TrackerResult<()>;
}

/// Interface for the append-only, date-partitioned expense ledger.
pub trait LedgerStore: Send + Sync {
    /// Next sequential id for the given date's partition: the maximum
    /// existing id plus one, or 1 when the partition does not exist.
    fn next_id(&self, date: NaiveDate) -> TrackerResult<u32>;

    /// Append one record to the date's partition, creating the partition
    /// on first write. Existing lines are never rewritten or reordered.
    fn append(&self, date: NaiveDate, record: &ExpenseRecord) -> TrackerResult<()>;

    /// Enumerate every parseable record across all partitions. Partition
    /// order is directory-enumeration order; within a partition, insertion
    /// order. Malformed lines are skipped, not reported.
    fn scan_all(&self) -> TrackerResult<Vec<(NaiveDate, ExpenseRecord)>>;
}

/// Factory trait for storage connections.
///
/// Abstracts the concrete connection type and provides constructors for
/// the repositories, so services can be written once against any backend.
pub trait Connection: Send + Sync + Clone {
    type BalanceRepository: BalanceStore + Clone;
    type LedgerRepository: LedgerStore + Clone;

    fn create_balance_repository(&self) -> Self::BalanceRepository;
    fn create_ledger_repository(&self) -> Self::LedgerRepository;
}
