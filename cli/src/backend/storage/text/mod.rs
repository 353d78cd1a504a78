//! # Text File Storage
//!
//! Plain-text persistence for the expense tracker:
//!
//! - `balance.txt`: the single balance slot, a two-decimal number
//! - `expenses_<YYYY-MM-DD>.txt`: one append-only partition per date,
//!   pipe-delimited records `id|item_name|timestamp|amount`
//! - `archives/`: reserved storage area, provisioned but unused
//!
//! Implements the storage traits so the domain layer never touches file
//! paths directly.

pub mod balance_repository;
pub mod connection;
pub mod ledger_repository;

#[cfg(test)]
pub mod test_utils;

pub use balance_repository::{BalanceRepository, DEFAULT_BALANCE};
pub use connection::TextConnection;
pub use ledger_repository::LedgerRepository;
