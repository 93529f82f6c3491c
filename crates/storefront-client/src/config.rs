//! # Storefront Configuration
//!
//! Where the fixture lives and where local state is kept.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_FIXTURE_PATH=assets/db.json                             │
//! │     STOREFRONT_STORAGE_BACKEND=memory                                  │
//! │     STOREFRONT_STORAGE_PATH=/tmp/storage.json                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.storefront.storefront/ (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     fixture at assets/db.json, file storage in the data dir            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [fixture]
//! path = "assets/db.json"
//!
//! [storage]
//! backend = "file"  # file | memory
//! path = "/home/me/.local/share/storefront/storage.json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};

const CONFIG_FILE_NAME: &str = "storefront.toml";
const STORAGE_FILE_NAME: &str = "storage.json";
const FALLBACK_STORAGE_PATH: &str = "storefront-storage.json";

// =============================================================================
// Storage Backend
// =============================================================================

/// Which key-value store backs persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// A JSON document on disk. Survives restarts.
    #[default]
    File,

    /// Process memory only. Everything is forgotten on exit.
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::File => write!(f, "file"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "disk" => Ok(StorageBackend::File),
            "memory" | "mem" => Ok(StorageBackend::Memory),
            other => Err(ClientError::InvalidConfig(format!(
                "Unknown storage backend: '{}'. Valid options: file, memory",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureSettings {
    /// Path of the static JSON document with users and products.
    #[serde(default = "default_fixture_path")]
    pub path: PathBuf,
}

fn default_fixture_path() -> PathBuf {
    PathBuf::from("assets/db.json")
}

impl Default for FixtureSettings {
    fn default() -> Self {
        FixtureSettings {
            path: default_fixture_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Storage document for the file backend. Ignored for `memory`.
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_storage_path() -> PathBuf {
    directories::ProjectDirs::from("com", "storefront", "storefront")
        .map(|dirs| dirs.data_dir().join(STORAGE_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_STORAGE_PATH))
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            backend: StorageBackend::default(),
            path: default_storage_path(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub fixture: FixtureSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

impl StorefrontConfig {
    /// Configuration that keeps nothing on disk, reading the given fixture.
    pub fn in_memory(fixture_path: impl Into<PathBuf>) -> Self {
        StorefrontConfig {
            fixture: FixtureSettings {
                path: fixture_path.into(),
            },
            storage: StorageSettings {
                backend: StorageBackend::Memory,
                path: default_storage_path(),
            },
        }
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| ClientError::ConfigLoadFailed(e.to_string()))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Storefront config saved");
        Ok(())
    }

    pub fn validate(&self) -> ClientResult<()> {
        if self.fixture.path.as_os_str().is_empty() {
            return Err(ClientError::InvalidConfig(
                "fixture.path must not be empty".into(),
            ));
        }

        if self.storage.backend == StorageBackend::File && self.storage.path.as_os_str().is_empty()
        {
            return Err(ClientError::InvalidConfig(
                "storage.path is required for the file backend".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("STOREFRONT_FIXTURE_PATH") {
            debug!(path = %path, "Overriding fixture path from environment");
            self.fixture.path = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("STOREFRONT_STORAGE_PATH") {
            debug!(path = %path, "Overriding storage path from environment");
            self.storage.path = PathBuf::from(path);
        }

        if let Ok(backend) = std::env::var("STOREFRONT_STORAGE_BACKEND") {
            match backend.parse() {
                Ok(parsed) => self.storage.backend = parsed,
                Err(_) => warn!(backend = %backend, "Unknown storage backend in environment"),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parsing() {
        assert_eq!("file".parse::<StorageBackend>().unwrap(), StorageBackend::File);
        assert_eq!("MEMORY".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert!("redis".parse::<StorageBackend>().unwrap_err().is_config_error());
        assert_eq!(StorageBackend::Memory.to_string(), "memory");
    }

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.fixture.path, PathBuf::from("assets/db.json"));
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert!(config.storage.path.ends_with(STORAGE_FILE_NAME)
            || config.storage.path.ends_with(FALLBACK_STORAGE_PATH));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = StorefrontConfig::default();

        config.fixture.path = PathBuf::new();
        assert!(config.validate().is_err());

        config.fixture.path = PathBuf::from("db.json");
        config.storage.path = PathBuf::new();
        assert!(config.validate().is_err());

        // The memory backend has no use for a path.
        config.storage.backend = StorageBackend::Memory;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [storage]
            backend = "memory"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.fixture.path, PathBuf::from("assets/db.json"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = StorefrontConfig::in_memory("fixtures/shop.json");
        config.storage.path = dir.path().join("state.json");
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[fixture]"));
        assert!(contents.contains("[storage]"));

        let parsed: StorefrontConfig = toml::from_str(&contents).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[storage\nbackend = 1").unwrap();

        let err = StorefrontConfig::load(Some(path.clone())).unwrap_err();
        assert!(err.is_config_error());
    }
}
