//! # Backend Module
//!
//! Everything below the terminal: domain services, storage and the io
//! layer that renders domain results for the menu.
//!
//! The layering mirrors a small hexagonal cut:
//!
//! ```text
//! Menu (terminal prompts, tables)
//!     ↓
//! IO Layer (mappers, shared DTOs)
//!     ↓
//! Domain Layer (services, validation, commands)
//!     ↓
//! Storage Layer (balance slot + ledger partitions on disk)
//! ```

pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use log::info;

use crate::backend::domain::{BalanceService, ExpenseService, ExpenseValidator, TrackerResult};
use crate::backend::storage::TextConnection;

/// Application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub balance_service: BalanceService<TextConnection>,
    pub expense_service: ExpenseService<TextConnection>,
    pub validator: ExpenseValidator,
}

/// Initialize the backend against the default data directory.
pub fn initialize_backend() -> TrackerResult<AppState> {
    let connection = TextConnection::new_default()?;
    initialize_with_connection(connection)
}

/// Initialize the backend against an explicit connection. Ensures the
/// on-disk layout and the first-run balance exist.
pub fn initialize_with_connection(connection: TextConnection) -> TrackerResult<AppState> {
    info!(
        "setting up storage in {}",
        connection.base_directory().display()
    );
    connection.ensure_layout()?;
    let connection = Arc::new(connection);

    let balance_service = BalanceService::new(Arc::clone(&connection));
    balance_service.initialize_if_absent()?;
    let expense_service = ExpenseService::new(connection, balance_service.clone());

    Ok(AppState {
        balance_service,
        expense_service,
        validator: ExpenseValidator::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::commands::expenses::{SubmitExpenseCommand, SubmitExpenseOutcome};
    use crate::backend::storage::text::test_utils::TestEnvironment;

    #[test]
    fn test_full_flow() {
        let env = TestEnvironment::new().unwrap();
        let state = initialize_with_connection(env.connection.clone()).unwrap();

        assert!(env.base_directory().join("archives").is_dir());
        assert_eq!(state.balance_service.current_balance(), 1000.00);

        let outcome = state
            .expense_service
            .submit_expense(SubmitExpenseCommand {
                date: "2025-11-07".to_string(),
                item_name: "Coffee".to_string(),
                amount: 4.50,
                confirmed: true,
            })
            .unwrap();
        assert!(matches!(
            outcome,
            SubmitExpenseOutcome::Committed {
                expense_id: 1,
                ..
            }
        ));

        let report = state.expense_service.balance_report().unwrap();
        assert_eq!(report.current_balance, 995.50);
        assert!((report.total_expenses - 4.50).abs() < 1e-9);
    }

    #[test]
    fn test_initialization_is_idempotent() {
        let env = TestEnvironment::new().unwrap();

        let state = initialize_with_connection(env.connection.clone()).unwrap();
        state.balance_service.write_balance(250.00).unwrap();

        // A second startup over the same directory must not reset state.
        let state = initialize_with_connection(env.connection.clone()).unwrap();
        assert_eq!(state.balance_service.current_balance(), 250.00);
    }
}
