//! Test utilities for the text storage backend.
//!
//! RAII-based cleanup guarantees test data is removed even when a test
//! panics.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::balance_repository::BalanceRepository;
use super::connection::TextConnection;
use super::ledger_repository::LedgerRepository;
use crate::backend::domain::errors::TrackerResult;

/// Test environment that cleans up its data directory on drop.
pub struct TestEnvironment {
    /// Kept alive so the directory survives until the environment drops
    _temp_dir: TempDir,
    pub connection: TextConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> TrackerResult<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = TextConnection::new(&base_path)?;
        connection.ensure_layout()?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }
}

/// Helper bundling both repositories over one test environment.
pub struct RepositoryTestHelper {
    pub env: TestEnvironment,
    pub balance_repo: BalanceRepository,
    pub ledger_repo: LedgerRepository,
}

impl RepositoryTestHelper {
    pub fn new() -> TrackerResult<Self> {
        let env = TestEnvironment::new()?;
        let balance_repo = BalanceRepository::new(env.connection.clone());
        let ledger_repo = LedgerRepository::new(env.connection.clone());

        Ok(RepositoryTestHelper {
            env,
            balance_repo,
            ledger_repo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_cleanup() -> TrackerResult<()> {
        let base_path;

        {
            let env = TestEnvironment::new()?;
            base_path = env.base_directory().to_path_buf();
            assert!(base_path.exists());
            std::fs::write(base_path.join("probe.txt"), "probe")?;
        } // env drops here

        assert!(!base_path.exists());
        Ok(())
    }
}
