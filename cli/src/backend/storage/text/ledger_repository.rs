//! Text-file ledger repository.
//!
//! Each calendar date owns one append-only partition file. A record is a
//! single pipe-delimited line: `id|item_name|timestamp|amount`, timestamp
//! `YYYY-MM-DD HH:MM:SS`, amount with two decimal places, no header.
//! Scans skip malformed lines instead of failing: one corrupt line must
//! not take down the totals or the search screens.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::info;

use super::connection::TextConnection;
use crate::backend::domain::errors::TrackerResult;
use crate::backend::domain::models::expense::{ExpenseRecord, TIMESTAMP_FORMAT};
use crate::backend::storage::traits::LedgerStore;

const RECORD_FIELDS: usize = 4;

#[derive(Clone)]
pub struct LedgerRepository {
    connection: TextConnection,
}

impl LedgerRepository {
    pub fn new(connection: TextConnection) -> Self {
        Self { connection }
    }

    fn reader(path: &Path) -> TrackerResult<csv::Reader<BufReader<File>>> {
        let file = File::open(path)?;
        Ok(ReaderBuilder::new()
            .delimiter(b'|')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(BufReader::new(file)))
    }

    /// Parse one partition line. Returns `None` for malformed lines:
    /// fewer than four fields, or an unparsable id, timestamp or amount.
    fn parse_record(record: &StringRecord) -> Option<ExpenseRecord> {
        if record.len() < RECORD_FIELDS {
            return None;
        }
        let id = record.get(0)?.trim().parse::<u32>().ok()?;
        let item_name = record.get(1)?.to_string();
        let timestamp =
            NaiveDateTime::parse_from_str(record.get(2)?.trim(), TIMESTAMP_FORMAT).ok()?;
        let amount = record.get(3)?.trim().parse::<f64>().ok()?;
        Some(ExpenseRecord {
            id,
            item_name,
            timestamp,
            amount,
        })
    }
}

impl LedgerStore for LedgerRepository {
    fn next_id(&self, date: NaiveDate) -> TrackerResult<u32> {
        let path = self.connection.partition_file_path(date);
        if !path.exists() {
            return Ok(1);
        }

        let mut max_id = 0u32;
        let mut reader = Self::reader(&path)?;
        for result in reader.records() {
            // Unreadable lines do not block id assignment.
            let Ok(record) = result else { continue };
            if let Some(id) = record.get(0).and_then(|f| f.trim().parse::<u32>().ok()) {
                max_id = max_id.max(id);
            }
        }
        Ok(max_id + 1)
    }

    fn append(&self, date: NaiveDate, record: &ExpenseRecord) -> TrackerResult<()> {
        let path = self.connection.partition_file_path(date);
        let file = OpenOptions::new().append(true).create(true).open(&path)?;

        let mut writer = WriterBuilder::new()
            .delimiter(b'|')
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(BufWriter::new(file));
        writer.write_record([
            record.id.to_string().as_str(),
            record.item_name.as_str(),
            record.formatted_timestamp().as_str(),
            format!("{:.2}", record.amount).as_str(),
        ])?;
        writer.flush()?;

        info!(
            "appended expense #{} ({}) to partition {}",
            record.id, record.item_name, date
        );
        Ok(())
    }

    fn scan_all(&self) -> TrackerResult<Vec<(NaiveDate, ExpenseRecord)>> {
        let mut entries = Vec::new();
        for (date, path) in self.connection.list_partition_files()? {
            let mut reader = Self::reader(&path)?;
            for result in reader.records() {
                let Ok(record) = result else { continue };
                if let Some(expense) = Self::parse_record(&record) {
                    entries.push((date, expense));
                }
            }
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::text::test_utils::TestEnvironment;

    fn record(id: u32, item_name: &str, amount: f64) -> ExpenseRecord {
        ExpenseRecord {
            id,
            item_name: item_name.to_string(),
            timestamp: NaiveDateTime::parse_from_str("2025-11-07 09:15:00", TIMESTAMP_FORMAT)
                .unwrap(),
            amount,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_next_id_starts_at_one_for_missing_partition() -> TrackerResult<()> {
        let env = TestEnvironment::new()?;
        let repo = LedgerRepository::new(env.connection.clone());

        assert_eq!(repo.next_id(date(2025, 11, 7))?, 1);
        Ok(())
    }

    #[test]
    fn test_next_id_increments_per_partition() -> TrackerResult<()> {
        let env = TestEnvironment::new()?;
        let repo = LedgerRepository::new(env.connection.clone());
        let day = date(2025, 11, 7);
        let other_day = date(2025, 11, 8);

        repo.append(day, &record(1, "Coffee", 4.50))?;
        repo.append(day, &record(2, "Tea", 3.00))?;

        assert_eq!(repo.next_id(day)?, 3);
        // Partitions assign ids independently.
        assert_eq!(repo.next_id(other_day)?, 1);
        Ok(())
    }

    #[test]
    fn test_next_id_survives_repository_reinstantiation() -> TrackerResult<()> {
        let env = TestEnvironment::new()?;
        let day = date(2025, 11, 7);

        {
            let repo = LedgerRepository::new(env.connection.clone());
            repo.append(day, &record(1, "Coffee", 4.50))?;
        }

        // A fresh repository over the same directory models a restart.
        let repo = LedgerRepository::new(env.connection.clone());
        assert_eq!(repo.next_id(day)?, 2);
        Ok(())
    }

    #[test]
    fn test_next_id_skips_malformed_id_fields() -> TrackerResult<()> {
        let env = TestEnvironment::new()?;
        let repo = LedgerRepository::new(env.connection.clone());
        let day = date(2025, 11, 7);

        std::fs::write(
            env.connection.partition_file_path(day),
            "1|Coffee|2025-11-07 09:15:00|4.50\nnot-an-id|Tea|2025-11-07 10:00:00|3.00\n7|Cake|2025-11-07 11:00:00|5.25\n",
        )?;

        assert_eq!(repo.next_id(day)?, 8);
        Ok(())
    }

    #[test]
    fn test_append_wire_format() -> TrackerResult<()> {
        let env = TestEnvironment::new()?;
        let repo = LedgerRepository::new(env.connection.clone());
        let day = date(2025, 11, 7);

        repo.append(day, &record(1, "Coffee", 4.5))?;

        let raw = std::fs::read_to_string(env.connection.partition_file_path(day))?;
        assert_eq!(raw, "1|Coffee|2025-11-07 09:15:00|4.50\n");
        Ok(())
    }

    #[test]
    fn test_append_preserves_existing_lines() -> TrackerResult<()> {
        let env = TestEnvironment::new()?;
        let repo = LedgerRepository::new(env.connection.clone());
        let day = date(2025, 11, 7);

        repo.append(day, &record(1, "Coffee", 4.50))?;
        repo.append(day, &record(2, "Tea", 3.00))?;

        let raw = std::fs::read_to_string(env.connection.partition_file_path(day))?;
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("1|Coffee|"));
        assert!(lines[1].starts_with("2|Tea|"));
        Ok(())
    }

    #[test]
    fn test_scan_all_skips_malformed_lines() -> TrackerResult<()> {
        let env = TestEnvironment::new()?;
        let repo = LedgerRepository::new(env.connection.clone());
        let day = date(2025, 11, 7);

        std::fs::write(
            env.connection.partition_file_path(day),
            "1|Coffee|2025-11-07 09:15:00|4.50\nbroken|line\n2|Tea|2025-11-07 10:00:00|3.00\n",
        )?;

        let entries = repo.scan_all()?;
        assert_eq!(entries.len(), 2);
        let total: f64 = entries.iter().map(|(_, r)| r.amount).sum();
        assert!((total - 7.50).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn test_scan_all_skips_unparsable_amounts_and_timestamps() -> TrackerResult<()> {
        let env = TestEnvironment::new()?;
        let repo = LedgerRepository::new(env.connection.clone());
        let day = date(2025, 11, 7);

        std::fs::write(
            env.connection.partition_file_path(day),
            "1|Coffee|2025-11-07 09:15:00|4.50\n2|Tea|2025-11-07 10:00:00|lots\n3|Cake|whenever|5.25\n",
        )?;

        let entries = repo.scan_all()?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].1.item_name, "Coffee");
        Ok(())
    }

    #[test]
    fn test_scan_all_covers_every_partition() -> TrackerResult<()> {
        let helper = crate::backend::storage::text::test_utils::RepositoryTestHelper::new()?;
        let repo = &helper.ledger_repo;

        repo.append(date(2025, 11, 7), &record(1, "Coffee", 4.50))?;
        repo.append(date(2025, 11, 8), &record(1, "Lunch", 12.00))?;
        repo.append(date(2025, 12, 1), &record(1, "Book", 20.00))?;

        let entries = repo.scan_all()?;
        assert_eq!(entries.len(), 3);
        let total: f64 = entries.iter().map(|(_, r)| r.amount).sum();
        assert!((total - 36.50).abs() < 1e-9);
        Ok(())
    }
}
