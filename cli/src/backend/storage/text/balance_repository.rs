//! Text-file balance repository.

use std::fs;

use log::info;

use super::connection::TextConnection;
use crate::backend::domain::errors::{TrackerError, TrackerResult};
use crate::backend::storage::traits::BalanceStore;

/// Balance written on first run, before any funds are added.
pub const DEFAULT_BALANCE: f64 = 1000.00;

/// Stores the balance as the sole content of `balance.txt`: one decimal
/// number with exactly two fractional digits, no surrounding metadata.
#[derive(Clone)]
pub struct BalanceRepository {
    connection: TextConnection,
}

impl BalanceRepository {
    pub fn new(connection: TextConnection) -> Self {
        Self { connection }
    }
}

impl BalanceStore for BalanceRepository {
    fn read_balance(&self) -> TrackerResult<f64> {
        let path = self.connection.balance_file_path();
        if !path.exists() {
            return Err(TrackerError::CorruptBalance(format!(
                "missing balance file {}",
                path.display()
            )));
        }
        let contents = fs::read_to_string(&path)?;
        contents
            .trim()
            .parse::<f64>()
            .map_err(|_| TrackerError::CorruptBalance(format!("unparsable value {:?}", contents.trim())))
    }

    fn write_balance(&self, new_balance: f64) -> TrackerResult<()> {
        let path = self.connection.balance_file_path();
        fs::write(&path, format!("{:.2}", new_balance))?;
        Ok(())
    }

    fn initialize_if_absent(&self) -> TrackerResult<()> {
        let path = self.connection.balance_file_path();
        if path.exists() {
            return Ok(());
        }
        info!("initializing balance file with default {:.2}", DEFAULT_BALANCE);
        self.write_balance(DEFAULT_BALANCE)
    }
}
