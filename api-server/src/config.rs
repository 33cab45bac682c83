//! Environment-driven server configuration

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const DATA_DIR_VAR: &str = "ORGANIZADOR_DATA_DIR";
pub const BIND_ADDR_VAR: &str = "ORGANIZADOR_BIND_ADDR";

const DEFAULT_DATA_DIR: &str = ".organizador-data";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8081";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var} value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the task file
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let data_dir = var(DATA_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let raw_addr = var(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: BIND_ADDR_VAR,
                value: raw_addr.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            data_dir,
            bind_addr,
        })
    }

    /// Path of the JSON file backing the task store
    pub fn tasks_path(&self) -> PathBuf {
        self.data_dir.join("tarefas.json")
    }
}
