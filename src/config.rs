// src/config.rs

use std::env;
use std::fs;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::inventory::SnapshotStore;
use crate::table::state::DEFAULT_PAGE_SIZE;

pub const CONFIG_ENV: &str = "INVENTORY_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid bind address '{0}'")]
    Bind(String),
}

/// Settings shared by the server and the scrape job.
///
/// Every field has a default, so a missing config file is not an error.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Search-inventory model slug, also the snapshot base filename.
    pub model: String,
    pub zipcode: String,
    /// Search radius in miles.
    pub radius: u32,
    pub data_dir: PathBuf,
    pub bind: String,
    pub max_workers: usize,
    pub default_page_size: usize,
    pub inventory_url: String,
    pub graphql_url: String,
    pub max_scrape_pages: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "corollahybrid".to_string(),
            zipcode: "90210".to_string(),
            radius: 50,
            data_dir: PathBuf::from("public"),
            bind: "127.0.0.1:3000".to_string(),
            max_workers: 8,
            default_page_size: DEFAULT_PAGE_SIZE,
            inventory_url: "https://www.toyota.com/search-inventory/model".to_string(),
            graphql_url: "https://api.search-inventory.toyota.com/graphql".to_string(),
            max_scrape_pages: 50,
        }
    }
}

impl Config {
    /// Loads `path`, or `$INVENTORY_CONFIG`, or `config.json`.
    ///
    /// Only an explicitly named file has to exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));

        let (path, required) = match explicit {
            Some(path) => (path, true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if !required && e.kind() == io::ErrorKind::NotFound => {
                info!("No {} found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };

        let config = Self::from_json(&text).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;
        info!(path = %path.display(), model = %config.model, "Loaded config");
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .parse()
            .map_err(|_| ConfigError::Bind(self.bind.clone()))
    }

    pub fn snapshot_store(&self) -> SnapshotStore {
        SnapshotStore::new(&self.data_dir, &self.model)
    }
}
