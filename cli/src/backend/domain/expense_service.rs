//! Expense service: the add-expense workflow plus ledger-derived queries.
//!
//! This is the coordinator between the balance slot and the ledger. The
//! add-expense workflow walks validate → funds check → confirmation →
//! commit; the first two gates never mutate state, so a rejected or
//! cancelled submission leaves both stores untouched.

use std::sync::Arc;

use chrono::Local;
use log::info;

use crate::backend::domain::balance_service::BalanceService;
use crate::backend::domain::commands::expenses::{
    BalanceReportResult, ExpenseMatch, SubmitExpenseCommand, SubmitExpenseOutcome,
};
use crate::backend::domain::errors::{TrackerError, TrackerResult};
use crate::backend::domain::models::expense::ExpenseRecord;
use crate::backend::domain::validation::ExpenseValidator;
use crate::backend::storage::traits::{Connection, LedgerStore};

/// Absolute tolerance for amount searches, absorbing two-decimal rounding.
const AMOUNT_TOLERANCE: f64 = 0.01;

#[derive(Clone)]
pub struct ExpenseService<C: Connection> {
    ledger_repository: C::LedgerRepository,
    balance_service: BalanceService<C>,
    validator: ExpenseValidator,
}

impl<C: Connection> ExpenseService<C> {
    pub fn new(connection: Arc<C>, balance_service: BalanceService<C>) -> Self {
        let ledger_repository = connection.create_ledger_repository();
        Self {
            ledger_repository,
            balance_service,
            validator: ExpenseValidator::new(),
        }
    }

    /// Run the add-expense workflow.
    ///
    /// The balance is re-read at the funds gate so the freshest value
    /// decides, and an over-budget submission is rejected even when the
    /// command carries a confirmation. On commit, the ledger append and
    /// the balance write are sequential, not transactional: a failure
    /// between them leaves the ledger ahead of the balance slot.
    pub fn submit_expense(
        &self,
        command: SubmitExpenseCommand,
    ) -> TrackerResult<SubmitExpenseOutcome> {
        let date = self
            .validator
            .validate_date(&command.date)
            .map_err(|e| TrackerError::InvalidInput(self.validator.get_error_message(&e)))?;
        let item_name = self
            .validator
            .validate_item_name(&command.item_name)
            .map_err(|e| TrackerError::InvalidInput(self.validator.get_error_message(&e)))?;
        let amount = self
            .validator
            .validate_amount_value(command.amount)
            .map_err(|e| TrackerError::InvalidInput(self.validator.get_error_message(&e)))?;

        let available = self.balance_service.current_balance();
        if amount > available {
            info!(
                "rejecting expense '{}': required {:.2}, available {:.2}",
                item_name, amount, available
            );
            return Ok(SubmitExpenseOutcome::Rejected {
                available,
                required: amount,
            });
        }

        if !command.confirmed {
            return Ok(SubmitExpenseOutcome::Cancelled);
        }

        let expense_id = self.ledger_repository.next_id(date)?;
        let record = ExpenseRecord {
            id: expense_id,
            item_name,
            timestamp: Local::now().naive_local(),
            amount,
        };
        self.ledger_repository.append(date, &record)?;

        let new_balance = available - amount;
        self.balance_service.write_balance(new_balance)?;
        info!(
            "recorded expense #{} on {} for {:.2}, new balance {:.2}",
            expense_id, date, amount, new_balance
        );

        Ok(SubmitExpenseOutcome::Committed {
            expense_id,
            new_balance,
        })
    }

    /// Sum of every recorded expense. Recomputed by a full partition scan
    /// on every call; partitions are expected to stay small.
    pub fn total_expenses(&self) -> TrackerResult<f64> {
        let entries = self.ledger_repository.scan_all()?;
        Ok(entries.iter().map(|(_, record)| record.amount).sum())
    }

    /// Case-insensitive substring search on item names.
    pub fn search_by_name(&self, term: &str) -> TrackerResult<Vec<ExpenseMatch>> {
        let needle = term.trim().to_lowercase();
        let matches = self
            .ledger_repository
            .scan_all()?
            .into_iter()
            .filter(|(_, record)| record.item_name.to_lowercase().contains(&needle))
            .map(|(date, record)| ExpenseMatch { date, record })
            .collect();
        Ok(matches)
    }

    /// Search by amount within the rounding tolerance.
    pub fn search_by_amount(&self, value: f64) -> TrackerResult<Vec<ExpenseMatch>> {
        let matches = self
            .ledger_repository
            .scan_all()?
            .into_iter()
            .filter(|(_, record)| (record.amount - value).abs() < AMOUNT_TOLERANCE)
            .map(|(date, record)| ExpenseMatch { date, record })
            .collect();
        Ok(matches)
    }

    /// Balance figures for the report screen. `available_balance` equals
    /// the persisted balance; `total_expenses` is derived from the ledger.
    pub fn balance_report(&self) -> TrackerResult<BalanceReportResult> {
        let current_balance = self.balance_service.current_balance();
        let total_expenses = self.total_expenses()?;
        Ok(BalanceReportResult {
            current_balance,
            total_expenses,
            available_balance: current_balance,
        })
    }
}
