//! JSONL data directory provider
//!
//! Layout:
//! - `customers.jsonl`: one customer object per line
//! - `orders*.jsonl`: one or more order shards, one order object per line

use crate::types::{Customer, Dataset, Order, Result, RevtrackError};
use fs2::FileExt;
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::{validated, DatasetProvider};

const CUSTOMERS_FILE: &str = "customers.jsonl";
const ORDER_SHARD_PATTERN: &str = "orders*.jsonl";

/// Provider for a directory of JSONL files
pub struct JsonlProvider {
    data_dir: PathBuf,
}

impl JsonlProvider {
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn customers_path(&self) -> PathBuf {
        self.data_dir.join(CUSTOMERS_FILE)
    }

    /// Order shard files, sorted by path
    fn order_shards(&self) -> Vec<PathBuf> {
        let pattern = self.data_dir.join(ORDER_SHARD_PATTERN);
        let mut shards: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())
            .map(|paths| paths.filter_map(|e| e.ok()).filter(|p| p.is_file()).collect())
            .unwrap_or_default();
        shards.sort();
        shards
    }

    fn read_customers(&self) -> Result<Vec<Customer>> {
        let path = self.customers_path();
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no customers file");
            return Ok(Vec::new());
        }
        parse_file(&path)
    }

    /// Parse order shards in parallel using rayon
    fn read_orders(&self, shards: &[PathBuf]) -> Result<Vec<Order>> {
        let per_shard: Vec<Vec<Order>> = shards
            .par_iter()
            .map(|shard| parse_file::<Order>(shard))
            .collect::<Result<_>>()?;
        Ok(per_shard.into_iter().flatten().collect())
    }
}

impl DatasetProvider for JsonlProvider {
    fn name(&self) -> &str {
        "jsonl"
    }

    fn list_customers(&self) -> Result<Vec<Customer>> {
        self.read_customers()
    }

    fn list_orders(&self) -> Result<Vec<Order>> {
        self.read_orders(&self.order_shards())
    }

    /// Read every file under a shared lock held until both relations are parsed
    fn snapshot(&self) -> Result<Dataset> {
        let shards = self.order_shards();
        let mut locked: Vec<PathBuf> = shards.clone();
        let customers_path = self.customers_path();
        if customers_path.is_file() {
            locked.push(customers_path);
        }

        let _guard = ReadGuard::acquire(&locked)?;
        let customers = self.read_customers()?;
        let orders = self.read_orders(&shards)?;
        validated(self.name(), customers, orders)
    }
}

/// Shared locks on a set of files, released on drop
struct ReadGuard {
    files: Vec<File>,
}

impl ReadGuard {
    fn acquire(paths: &[PathBuf]) -> Result<Self> {
        let mut guard = Self {
            files: Vec::with_capacity(paths.len()),
        };
        for path in paths {
            let file = File::open(path)?;
            FileExt::lock_shared(&file).map_err(|e| {
                RevtrackError::Io(std::io::Error::new(
                    e.kind(),
                    format!("failed to lock {}: {}", path.display(), e),
                ))
            })?;
            // Pushed only once locked, so drop unlocks exactly what we hold
            guard.files.push(file);
        }
        Ok(guard)
    }
}

impl Drop for ReadGuard {
    fn drop(&mut self) {
        for file in &self.files {
            let _ = FileExt::unlock(file);
        }
    }
}

/// Parse one JSONL file. Blank lines are skipped; any malformed line fails
/// the whole file with its 1-based line number.
fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();

    for (idx, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        // Convert to mutable bytes for simd-json
        let mut line_bytes = line.into_bytes();
        let record: T = simd_json::from_slice(&mut line_bytes).map_err(|e| {
            RevtrackError::Parse(format!("{}:{}: {}", path.display(), idx + 1, e))
        })?;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_parse_fixture_customers() {
        let provider = JsonlProvider::with_data_dir(PathBuf::from("tests/fixtures/sample"));
        let customers = provider.list_customers().unwrap();
        assert_eq!(customers.len(), 4);
        assert_eq!(customers[0].id, 1);
        assert_eq!(customers[0].segment, "Consumer");
        assert_eq!(customers[0].signup_date.to_string(), "2023-11-02");
    }

    #[test]
    fn test_order_shards_sorted() {
        let provider = JsonlProvider::with_data_dir(PathBuf::from("tests/fixtures/sample"));
        let names: Vec<String> = provider
            .order_shards()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["orders-2024q2.jsonl", "orders.jsonl"]);
    }

    #[test]
    fn test_amount_from_number_or_string() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "orders.jsonl",
            concat!(
                r#"{"id":1,"customer_id":1,"order_date":"2024-01-05","amount":15.5}"#,
                "\n",
                r#"{"id":2,"customer_id":1,"order_date":"2024-01-06","amount":"0.10"}"#,
                "\n"
            ),
        );

        let provider = JsonlProvider::with_data_dir(tmp.path().to_path_buf());
        let orders = provider.list_orders().unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].amount, dec!(15.5));
        assert_eq!(orders[1].amount, dec!(0.10));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "customers.jsonl",
            concat!(
                "\n",
                r#"{"id":1,"name":"A","email":"a@x.com","signup_date":"2024-01-01","segment":"Consumer"}"#,
                "\n\n"
            ),
        );

        let provider = JsonlProvider::with_data_dir(tmp.path().to_path_buf());
        assert_eq!(provider.list_customers().unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_line_reports_position() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "orders.jsonl",
            concat!(
                r#"{"id":1,"customer_id":1,"order_date":"2024-01-05","amount":1}"#,
                "\n",
                r#"{"id":2,"customer_id":1,"order_date":"not-a-date","amount":1}"#,
                "\n"
            ),
        );

        let provider = JsonlProvider::with_data_dir(tmp.path().to_path_buf());
        let err = provider.list_orders().unwrap_err();
        assert!(matches!(err, RevtrackError::Parse(_)));
        assert!(err.to_string().contains("orders.jsonl:2"));
    }

    #[test]
    fn test_snapshot_rejects_negative_amount() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "orders.jsonl",
            r#"{"id":1,"customer_id":1,"order_date":"2024-01-05","amount":-3.00}"#,
        );

        let provider = JsonlProvider::with_data_dir(tmp.path().to_path_buf());
        let err = provider.snapshot().unwrap_err();
        assert!(matches!(err, RevtrackError::Validation(_)));
    }

    #[test]
    fn test_snapshot_releases_locks() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "orders.jsonl",
            r#"{"id":1,"customer_id":1,"order_date":"2024-01-05","amount":1}"#,
        );

        let provider = JsonlProvider::with_data_dir(tmp.path().to_path_buf());
        provider.snapshot().unwrap();

        // A writer can take the exclusive lock once the snapshot is done
        let file = File::open(tmp.path().join("orders.jsonl")).unwrap();
        assert!(FileExt::try_lock_exclusive(&file).is_ok());
        FileExt::unlock(&file).unwrap();
    }

    #[test]
    fn test_snapshot_releases_locks_on_error() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "orders.jsonl", "{broken");

        let provider = JsonlProvider::with_data_dir(tmp.path().to_path_buf());
        assert!(provider.snapshot().is_err());

        let file = File::open(tmp.path().join("orders.jsonl")).unwrap();
        assert!(FileExt::try_lock_exclusive(&file).is_ok());
        FileExt::unlock(&file).unwrap();
    }
}
