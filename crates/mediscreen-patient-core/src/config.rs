//! Runtime configuration.
//!
//! Resolved once at process startup and passed into services, so request
//! handling never reads process-wide environment variables.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::db::Database;
use crate::service::PatientService;
use crate::store::{DynStore, MemoryStore, StoreResult};

pub const STORE_ENV: &str = "MEDISCREEN_STORE";
pub const DB_PATH_ENV: &str = "MEDISCREEN_DB_PATH";
pub const REST_ADDR_ENV: &str = "MEDISCREEN_REST_ADDR";

pub const DEFAULT_DB_PATH: &str = "mediscreen-patient.db";
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:8081";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("MEDISCREEN_STORE must be 'sqlite' or 'memory', got '{0}'")]
    UnknownStore(String),

    #[error("MEDISCREEN_REST_ADDR is not a valid socket address: '{0}'")]
    InvalidRestAddr(String),

    #[error("MEDISCREEN_DB_PATH cannot be empty")]
    EmptyDbPath,
}

/// Which record store backs the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite(PathBuf),
    Memory,
}

impl StoreBackend {
    /// Open the configured store behind a service.
    pub fn open(&self) -> StoreResult<PatientService<DynStore>> {
        let store: DynStore = match self {
            StoreBackend::Sqlite(path) => Box::new(Database::open(path)?),
            StoreBackend::Memory => Box::new(MemoryStore::new()),
        };
        Ok(PatientService::new(store))
    }
}

/// Service configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    store: StoreBackend,
    rest_addr: SocketAddr,
}

impl ServiceConfig {
    /// Build from raw environment values. `None` means the variable is unset.
    pub fn from_env_values(
        store: Option<String>,
        db_path: Option<String>,
        rest_addr: Option<String>,
    ) -> Result<Self, ConfigError> {
        let store = match store.as_deref().map(str::trim) {
            None | Some("") => "sqlite".to_string(),
            Some(value) => value.to_ascii_lowercase(),
        };

        let store = match store.as_str() {
            "sqlite" => {
                let path = db_path.unwrap_or_else(|| DEFAULT_DB_PATH.into());
                if path.trim().is_empty() {
                    return Err(ConfigError::EmptyDbPath);
                }
                StoreBackend::Sqlite(PathBuf::from(path))
            }
            "memory" => StoreBackend::Memory,
            _ => return Err(ConfigError::UnknownStore(store.clone())),
        };

        let rest_addr = rest_addr.unwrap_or_else(|| DEFAULT_REST_ADDR.into());
        let rest_addr: SocketAddr = rest_addr
            .parse()
            .map_err(|_| ConfigError::InvalidRestAddr(rest_addr))?;

        Ok(Self { store, rest_addr })
    }

    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_values(
            std::env::var(STORE_ENV).ok(),
            std::env::var(DB_PATH_ENV).ok(),
            std::env::var(REST_ADDR_ENV).ok(),
        )
    }

    pub fn store(&self) -> &StoreBackend {
        &self.store
    }

    pub fn db_path(&self) -> Option<&Path> {
        match &self.store {
            StoreBackend::Sqlite(path) => Some(path),
            StoreBackend::Memory => None,
        }
    }

    pub fn rest_addr(&self) -> SocketAddr {
        self.rest_addr
    }
}
