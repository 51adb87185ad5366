//! Link store backend configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which link store implementation to construct at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-process map. Contents are lost on restart.
    #[default]
    Memory,
    /// Single JSON snapshot file rewritten on every mutation.
    File,
    /// PostgreSQL via the `database` section.
    Postgres,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::File => write!(f, "file"),
            Self::Postgres => write!(f, "postgres"),
        }
    }
}

/// Top-level store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend type.
    #[serde(default)]
    pub backend: StoreBackend,
    /// File backend settings.
    #[serde(default)]
    pub file: FileStoreConfig,
}

/// File backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileStoreConfig {
    /// Path of the JSON snapshot file. Created if missing.
    #[serde(default = "default_file_path")]
    pub path: String,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            path: default_file_path(),
        }
    }
}

fn default_file_path() -> String {
    "links.json".to_string()
}
