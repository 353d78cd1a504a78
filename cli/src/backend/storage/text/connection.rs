//! Data-directory management for the text file backend.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::info;

use crate::backend::domain::errors::TrackerResult;
use crate::backend::storage::traits::Connection;

/// Environment variable overriding the data directory location.
pub const DATA_DIR_ENV: &str = "EXPENSE_TRACKER_DATA_DIR";

const BALANCE_FILE: &str = "balance.txt";
const PARTITION_PREFIX: &str = "expenses_";
const PARTITION_SUFFIX: &str = ".txt";
const ARCHIVES_DIR: &str = "archives";

/// TextConnection manages file paths inside the data directory and ensures
/// the expected layout exists.
#[derive(Clone)]
pub struct TextConnection {
    base_directory: PathBuf,
}

impl TextConnection {
    /// Create a connection rooted at the given directory, creating it if
    /// needed.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> TrackerResult<Self> {
        let base_path = base_directory.as_ref().to_path_buf();
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }
        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in the default data directory.
    ///
    /// `EXPENSE_TRACKER_DATA_DIR` wins when set; otherwise the tracker
    /// lives in `Documents/Expense Tracker` under the user's home.
    pub fn new_default() -> TrackerResult<Self> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            info!("using data directory from {}: {}", DATA_DIR_ENV, dir);
            return Self::new(dir);
        }

        let home_dir = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "could not determine home directory",
            )
        })?;
        let data_dir = home_dir.join("Documents").join("Expense Tracker");
        info!("using default data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    /// Ensure the on-disk layout exists: the base directory and the
    /// reserved `archives/` area. The balance slot itself is initialized
    /// by the balance repository.
    pub fn ensure_layout(&self) -> TrackerResult<()> {
        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory)?;
        }
        let archives = self.base_directory.join(ARCHIVES_DIR);
        if !archives.exists() {
            fs::create_dir_all(&archives)?;
        }
        Ok(())
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the balance slot.
    pub fn balance_file_path(&self) -> PathBuf {
        self.base_directory.join(BALANCE_FILE)
    }

    /// Path of the partition file for one calendar date.
    pub fn partition_file_path(&self, date: NaiveDate) -> PathBuf {
        self.base_directory.join(format!(
            "{}{}{}",
            PARTITION_PREFIX,
            date.format("%Y-%m-%d"),
            PARTITION_SUFFIX
        ))
    }

    /// Enumerate existing partition files as `(date, path)` pairs, in
    /// directory-enumeration order. Files that do not match the partition
    /// naming convention are ignored.
    pub fn list_partition_files(&self) -> TrackerResult<Vec<(NaiveDate, PathBuf)>> {
        let mut partitions = Vec::new();
        if !self.base_directory.exists() {
            return Ok(partitions);
        }
        for entry in fs::read_dir(&self.base_directory)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(stem) = file_name
                .strip_prefix(PARTITION_PREFIX)
                .and_then(|s| s.strip_suffix(PARTITION_SUFFIX))
            else {
                continue;
            };
            if let Ok(date) = NaiveDate::parse_from_str(stem, "%Y-%m-%d") {
                partitions.push((date, path));
            }
        }
        Ok(partitions)
    }
}

impl Connection for TextConnection {
    type BalanceRepository = super::balance_repository::BalanceRepository;
    type LedgerRepository = super::ledger_repository::LedgerRepository;

    fn create_balance_repository(&self) -> Self::BalanceRepository {
        super::balance_repository::BalanceRepository::new(self.clone())
    }

    fn create_ledger_repository(&self) -> Self::LedgerRepository {
        super::ledger_repository::LedgerRepository::new(self.clone())
    }
}
