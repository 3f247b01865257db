//! CLI command implementations
//!
//! `init` writes a default config and creates the data directories.
//! `start` loads the config, opens the journal-backed store, wires the
//! engine and registry, and enters the serving loop.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::assets::{AssetRegistry, InMemoryAssetStore, LocalBackend};
use crate::content::{JournalStore, VersioningEngine};
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::Logger;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory (required); holds the section journal and blobs
    pub data_dir: String,

    /// Blob directory override (default: `<data_dir>/blobs`)
    #[serde(default)]
    pub blob_dir: Option<String>,

    /// HTTP server settings
    #[serde(default)]
    pub http: HttpServerConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> CliResult<()> {
        if self.data_dir.is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }
        Ok(())
    }

    /// Get data directory as Path
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    /// Get blob directory, defaulting under the data directory
    pub fn blob_path(&self) -> PathBuf {
        match &self.blob_dir {
            Some(dir) => PathBuf::from(dir),
            None => self.data_path().join("blobs"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: "./sectiondb-data".to_string(),
            blob_dir: None,
            http: HttpServerConfig::default(),
        }
    }
}

/// Parse arguments and dispatch to the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Init { config } => init(&config),
        Command::Start { config } => start(&config),
    }
}

/// Initialize a config file and the data directories it names
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::already_initialized(format!(
            "Config file already exists: {}",
            config_path.display()
        )));
    }

    // Place the data directory next to the config file
    let data_dir = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("sectiondb-data");
    let config = Config {
        data_dir: data_dir.display().to_string(),
        ..Default::default()
    };
    let encoded = serde_json::to_string_pretty(&config)
        .map_err(|e| CliError::config_error(format!("Failed to encode config: {}", e)))?;
    fs::write(config_path, encoded)?;

    fs::create_dir_all(config.data_path())?;
    fs::create_dir_all(config.blob_path())?;

    Logger::info(
        "INIT_COMPLETE",
        &[
            ("config", config_path.display().to_string().as_str()),
            ("data_dir", config.data_dir.as_str()),
        ],
    );
    Ok(())
}

/// Boot the stores, engine, and registry, then serve until shutdown
pub fn start(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;

    let store = JournalStore::open(config.data_path())
        .map_err(|e| CliError::boot_failed(format!("Failed to open section store: {}", e)))?;
    let engine = Arc::new(VersioningEngine::new(Arc::new(store)));

    let backend = Arc::new(LocalBackend::new(config.blob_path()));
    let metadata = Arc::new(InMemoryAssetStore::new());
    let registry = Arc::new(AssetRegistry::new(backend, metadata));

    let server = HttpServer::new(config.http.clone(), engine, registry);

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to start runtime: {}", e)))?;
    runtime
        .block_on(server.start())
        .map_err(|e| CliError::boot_failed(format!("Server failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_config_and_dirs() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("sectiondb.json");

        init(&config_path).unwrap();

        assert!(config_path.exists());
        let config = Config::load(&config_path).unwrap();
        assert!(config.data_path().exists());
        assert!(config.blob_path().exists());
    }

    #[test]
    fn test_init_twice_fails() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("sectiondb.json");

        init(&config_path).unwrap();
        let result = init(&config_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_defaults() {
        let config: Config = serde_json::from_str(r#"{"data_dir": "/tmp/x"}"#).unwrap();
        assert_eq!(config.blob_path(), PathBuf::from("/tmp/x/blobs"));
        assert_eq!(config.http.port, 8700);
    }

    #[test]
    fn test_config_rejects_empty_data_dir() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        fs::write(&path, r#"{"data_dir": ""}"#).unwrap();
        assert!(Config::load(&path).is_err());
    }
}
