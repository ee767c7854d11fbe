mod render;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::Config;
use crate::providers::{DatasetProvider, JsonlProvider};
use crate::services::{Aggregator, CustomerDirectory};
use crate::types::{Dataset, Result, RevtrackError};

/// Revenue and customer value metrics over customer/order datasets
#[derive(Parser)]
#[command(name = "revtrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding customers.jsonl and orders*.jsonl
    #[arg(long, global = true, env = "REVTRACK_DATA_DIR", value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Dataset totals (default)
    Summary,

    /// Revenue per customer segment
    Segments,

    /// Revenue per calendar month
    Monthly,

    /// Lifetime value of every customer with orders
    Ltv,

    /// Highest lifetime value customers
    Top {
        /// Number of customers to show
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },

    /// List customers with their orders
    Customers {
        /// Maximum number of customers
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show one customer with its orders
    Customer {
        /// Customer ID
        id: u64,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let config = Config::load(self.data_dir.clone())?;
        tracing::debug!(data_dir = %config.data_dir.display(), "resolved config");

        let provider = JsonlProvider::with_data_dir(config.data_dir.clone());
        let dataset = provider.snapshot()?;

        let command = self.command.unwrap_or(Commands::Summary);
        let output = execute(&command, &dataset, &config, self.json)?;

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(output.as_bytes())?;
        Ok(())
    }
}

/// Run one command against a snapshot and return the rendered output
fn execute(command: &Commands, dataset: &Dataset, config: &Config, json: bool) -> Result<String> {
    match command {
        Commands::Summary => {
            let summary = Aggregator::summary(dataset);
            emit(&summary, json, render::summary)
        }
        Commands::Segments => {
            let rows = Aggregator::revenue_by_segment(dataset);
            emit(&rows, json, |r| render::segments(r))
        }
        Commands::Monthly => {
            let rows = Aggregator::revenue_by_month(dataset);
            emit(&rows, json, |r| render::months(r))
        }
        Commands::Ltv => {
            let rows = Aggregator::customer_lifetime_value(dataset);
            emit(&rows, json, |r| render::customer_values(r))
        }
        Commands::Top { limit } => {
            let rows = Aggregator::top_customers(dataset, limit.unwrap_or(config.top_limit))?;
            emit(&rows, json, |r| render::customer_values(r))
        }
        Commands::Customers { limit } => {
            let rows = CustomerDirectory::list(dataset, limit.unwrap_or(config.customer_limit));
            emit(&rows, json, |r| render::customers(r))
        }
        Commands::Customer { id } => {
            let detail = CustomerDirectory::get(dataset, *id)?;
            emit(&detail, json, render::customer)
        }
    }
}

fn emit<T: Serialize>(value: &T, json: bool, text: impl Fn(&T) -> String) -> Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(value)
            .map_err(|e| RevtrackError::Parse(e.to_string()))?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(text(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Dataset, Config) {
        let data_dir = PathBuf::from("tests/fixtures/sample");
        let dataset = JsonlProvider::with_data_dir(data_dir.clone())
            .snapshot()
            .unwrap();
        let config = Config {
            data_dir,
            top_limit: 5,
            customer_limit: 50,
        };
        (dataset, config)
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_from(["revtrack"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_parse_top_with_limit() {
        let cli = Cli::try_parse_from(["revtrack", "top", "--limit", "3"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Top { limit: Some(3) }));
    }

    #[test]
    fn test_cli_parse_top_negative_limit() {
        let cli = Cli::try_parse_from(["revtrack", "top", "--limit", "-2"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Top { limit: Some(-2) }));
    }

    #[test]
    fn test_cli_parse_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["revtrack", "segments", "--json", "--data-dir", "/tmp/d"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/d")));
        assert_eq!(cli.command, Some(Commands::Segments));
    }

    #[test]
    fn test_cli_parse_customer_id() {
        let cli = Cli::try_parse_from(["revtrack", "customer", "42"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Customer { id: 42 }));
    }

    #[test]
    fn test_execute_segments_json() {
        let (ds, config) = fixture();
        let out = execute(&Commands::Segments, &ds, &config, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value[0]["segment"], "Consumer");
        assert_eq!(value[0]["total_revenue"].as_f64(), Some(25.5));
        assert_eq!(value.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_execute_top_uses_config_default() {
        let (ds, mut config) = fixture();
        config.top_limit = 2;
        let out = execute(&Commands::Top { limit: None }, &ds, &config, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["customer_id"], 2);
        assert_eq!(rows[0]["customer_name"], "Bob Tanaka");
        assert_eq!(rows[1]["customer_id"], 3);
    }

    #[test]
    fn test_execute_top_negative_limit_errors() {
        let (ds, config) = fixture();
        let err = execute(&Commands::Top { limit: Some(-1) }, &ds, &config, false).unwrap_err();
        assert!(matches!(err, RevtrackError::InvalidArgument(_)));
    }

    #[test]
    fn test_execute_unknown_customer_errors() {
        let (ds, config) = fixture();
        let err = execute(&Commands::Customer { id: 999 }, &ds, &config, false).unwrap_err();
        assert!(matches!(err, RevtrackError::NotFound(_)));
    }

    #[test]
    fn test_execute_monthly_text() {
        let (ds, config) = fixture();
        let out = execute(&Commands::Monthly, &ds, &config, false).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[1].starts_with("2024-01"));
        assert!(lines[1].ends_with("130.40"));
        assert!(lines[5].starts_with("2024-05"));
        assert!(lines[5].ends_with("92.35"));
    }
}
