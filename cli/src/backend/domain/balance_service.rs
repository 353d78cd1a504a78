//! Balance service: reads, writes and first-run initialization of the
//! persisted balance slot.

use std::sync::Arc;

use log::{info, warn};

use crate::backend::domain::commands::funds::{AddFundsCommand, AddFundsResult};
use crate::backend::domain::errors::{TrackerError, TrackerResult};
use crate::backend::storage::traits::{BalanceStore, Connection};

#[derive(Clone)]
pub struct BalanceService<C: Connection> {
    balance_repository: C::BalanceRepository,
}

impl<C: Connection> BalanceService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let balance_repository = connection.create_balance_repository();
        Self { balance_repository }
    }

    /// Write the first-run default balance when no slot exists yet.
    pub fn initialize_if_absent(&self) -> TrackerResult<()> {
        self.balance_repository.initialize_if_absent()
    }

    /// Current balance, with the degrade policy applied: a missing or
    /// unreadable slot counts as 0.00 instead of aborting the session.
    pub fn current_balance(&self) -> f64 {
        match self.balance_repository.read_balance() {
            Ok(balance) => balance,
            Err(e) => {
                warn!("could not read balance, treating as 0.00: {}", e);
                0.0
            }
        }
    }

    /// Overwrite the persisted balance.
    pub fn write_balance(&self, new_balance: f64) -> TrackerResult<()> {
        self.balance_repository.write_balance(new_balance)
    }

    /// Add money to the balance. No ledger interaction.
    pub fn add_funds(&self, command: AddFundsCommand) -> TrackerResult<AddFundsResult> {
        if !command.amount.is_finite() || command.amount <= 0.0 {
            return Err(TrackerError::InvalidInput(
                "amount to add must be a positive number".to_string(),
            ));
        }

        let new_balance = self.current_balance() + command.amount;
        self.balance_repository.write_balance(new_balance)?;
        info!(
            "added {:.2} to balance, new balance {:.2}",
            command.amount, new_balance
        );

        Ok(AddFundsResult {
            new_balance,
            amount_added: command.amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::text::test_utils::TestEnvironment;
    use crate::backend::storage::text::{TextConnection, DEFAULT_BALANCE};

    fn setup() -> (BalanceService<TextConnection>, TestEnvironment) {
        let env = TestEnvironment::new().unwrap();
        let service = BalanceService::new(Arc::new(env.connection.clone()));
        service.initialize_if_absent().unwrap();
        (service, env)
    }

    #[test]
    fn test_first_run_starts_at_default_balance() {
        let (service, _env) = setup();

        assert_eq!(service.current_balance(), DEFAULT_BALANCE);
    }

    #[test]
    fn test_add_funds_increases_balance() {
        let (service, _env) = setup();

        let result = service
            .add_funds(AddFundsCommand { amount: 50.0 })
            .unwrap();

        assert_eq!(result.new_balance, DEFAULT_BALANCE + 50.0);
        assert_eq!(service.current_balance(), DEFAULT_BALANCE + 50.0);
    }

    #[test]
    fn test_add_funds_rejects_non_positive_amounts() {
        let (service, _env) = setup();

        for amount in [0.0, -10.0, f64::NAN] {
            let result = service.add_funds(AddFundsCommand { amount });
            assert!(matches!(result, Err(TrackerError::InvalidInput(_))));
        }
        assert_eq!(service.current_balance(), DEFAULT_BALANCE);
    }

    #[test]
    fn test_corrupt_slot_degrades_to_zero() {
        let (service, env) = setup();

        std::fs::write(env.connection.balance_file_path(), "garbage").unwrap();

        assert_eq!(service.current_balance(), 0.0);
    }
}
