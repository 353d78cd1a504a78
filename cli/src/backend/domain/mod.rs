//! # Domain Module
//!
//! Business logic for the expense tracker, independent of any terminal or
//! storage mechanism.
//!
//! - **balance_service**: balance reads (with the corrupt-slot degrade
//!   policy), add-funds workflow, first-run initialization
//! - **expense_service**: the balance–ledger coordinator: add-expense
//!   workflow, totals, search
//! - **validation**: pure input validation for dates, item names and
//!   amounts; retry loops belong to the presentation layer
//! - **commands**: domain-internal command and result types
//! - **models**: domain entities
//! - **errors**: the tracker error taxonomy

pub mod balance_service;
pub mod commands;
pub mod errors;
pub mod expense_service;
pub mod models;
pub mod validation;

pub use balance_service::BalanceService;
pub use errors::{TrackerError, TrackerResult};
pub use expense_service::ExpenseService;
pub use validation::ExpenseValidator;
