//! Runtime configuration
//!
//! Precedence: `--data-dir` flag > `REVTRACK_DATA_DIR` (both via clap) >
//! `~/.revtrack/config.json` > built-in defaults.

use crate::services::{DEFAULT_CUSTOMER_LIMIT, DEFAULT_TOP_LIMIT};
use crate::types::{Result, RevtrackError};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";

/// On-disk config file; every key optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub data_dir: Option<PathBuf>,
    pub top_limit: Option<i64>,
    pub customer_limit: Option<usize>,
}

impl FileConfig {
    /// Load from `path`; a missing file is an empty config
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| RevtrackError::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub top_limit: i64,
    pub customer_limit: usize,
}

impl Config {
    /// Resolve from the user's home directory (`~/.revtrack`)
    pub fn load(data_dir_override: Option<PathBuf>) -> Result<Self> {
        let home = BaseDirs::new().map(|d| d.home_dir().join(".revtrack"));

        match home {
            Some(home) => Self::load_from(&home, data_dir_override),
            None => {
                let data_dir = data_dir_override.ok_or_else(|| {
                    RevtrackError::Config(
                        "Cannot determine home directory; pass --data-dir".into(),
                    )
                })?;
                tracing::warn!("home directory unknown; ignoring config file");
                Ok(Self::resolve(None, FileConfig::default(), Some(data_dir)))
            }
        }
    }

    /// Resolve against an explicit revtrack home (used by tests)
    pub fn load_from(home: &Path, data_dir_override: Option<PathBuf>) -> Result<Self> {
        let file = FileConfig::load(&home.join(CONFIG_FILE))?;
        Ok(Self::resolve(Some(home), file, data_dir_override))
    }

    fn resolve(
        home: Option<&Path>,
        file: FileConfig,
        data_dir_override: Option<PathBuf>,
    ) -> Self {
        let data_dir = data_dir_override
            .or(file.data_dir)
            .or_else(|| home.map(|h| h.join("data")))
            .unwrap_or_else(|| PathBuf::from("data"));

        Self {
            data_dir,
            top_limit: file.top_limit.unwrap_or(DEFAULT_TOP_LIMIT),
            customer_limit: file.customer_limit.unwrap_or(DEFAULT_CUSTOMER_LIMIT),
        }
    }
}
