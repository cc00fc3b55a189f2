//! Configuration file handling.
//!
//! The configuration file is stored at `$RENTAL_LEDGER_HOME/config.json`. It says where the CSV
//! exports and the cache live, how the cache and invalid rows are handled, and optionally
//! overrides the registry of spreadsheets per year.

use crate::cache::{Cache, CacheMode};
use crate::sources::{Sources, YearSource};
use crate::{utils, Result, ValidationPolicy};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "rental-ledger";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DATA_DIR: &str = "data";
const CACHE_DIR: &str = ".cache";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$RENTAL_LEDGER_HOME` and from there it loads `config.json`. Relative directories
/// in the file are resolved against the home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    data_dir: PathBuf,
    cache_dir: PathBuf,
    sources: Sources,
}

impl Config {
    /// Creates the home directory, the data and cache directories and a `config.json` with
    /// default settings.
    ///
    /// # Errors
    /// - Returns an error if a `config.json` already exists or if any file operation fails.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the rental-ledger home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!("A config file already exists at '{}'", config_path.display())
        }
        let config_file = ConfigFile::default();
        config_file.save(&config_path).await?;

        let config = Self::from_parts(root, config_path, config_file)?;
        utils::make_dir(&config.data_dir).await?;
        utils::make_dir(&config.cache_dir).await?;
        Ok(config)
    }

    /// This will
    /// - validate that the home directory and the config file exist
    /// - load the config file
    /// - validate that the data directory exists
    /// - return the loaded configuration object
    pub async fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The rental-ledger home directory is missing")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;
        let config = Self::from_parts(root, config_path, config_file)?;
        if !config.data_dir.is_dir() {
            bail!(
                "The data directory is missing '{}'",
                config.data_dir.display()
            )
        }
        Ok(config)
    }

    fn from_parts(root: PathBuf, config_path: PathBuf, config_file: ConfigFile) -> Result<Self> {
        let sources = match &config_file.sources {
            Some(list) => Sources::new(list.iter().cloned())
                .context("Invalid sources in the config file")?,
            None => Sources::default(),
        };
        Ok(Self {
            data_dir: resolve(&root, &config_file.data_dir),
            cache_dir: resolve(&root, &config_file.cache_dir),
            root,
            config_path,
            config_file,
            sources,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Where the CSV exports of the spreadsheets are read from.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn cache_mode(&self) -> CacheMode {
        self.config_file.cache_mode
    }

    pub fn validation_policy(&self) -> ValidationPolicy {
        self.config_file.validation_policy
    }

    pub fn sources(&self) -> &Sources {
        &self.sources
    }

    /// The raw-grid cache in the configured directory and mode.
    pub fn cache(&self) -> Cache {
        Cache::new(&self.cache_dir, self.cache_mode())
    }
}

/// Returns `p` if it is absolute, otherwise `p` joined onto `root`.
fn resolve(root: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        return p.to_path_buf();
    }
    root.join(p)
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "rental-ledger",
///   "config_version": 1,
///   "data_dir": "data",
///   "cache_dir": ".cache",
///   "cache_mode": "read_through",
///   "validation_policy": "abort"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "rental-ledger"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Directory of the CSV exports, relative to the home directory or absolute
    #[serde(default = "default_data_dir")]
    data_dir: PathBuf,

    /// Directory of the raw-grid cache, relative to the home directory or absolute
    #[serde(default = "default_cache_dir")]
    cache_dir: PathBuf,

    #[serde(default)]
    cache_mode: CacheMode,

    #[serde(default)]
    validation_policy: ValidationPolicy,

    /// Replaces the built-in registry of spreadsheets per year when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sources: Option<Vec<YearSource>>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DATA_DIR)
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(CACHE_DIR)
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            data_dir: default_data_dir(),
            cache_dir: default_cache_dir(),
            cache_mode: CacheMode::default(),
            validation_policy: ValidationPolicy::default(),
            sources: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it belongs to another app.
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::ExpenseFormat;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("ledger_home");

        let config = Config::create(&home_dir).await.unwrap();

        assert!(config.config_path().is_file());
        assert!(config.data_dir().is_dir());
        assert!(config.cache_dir().is_dir());
        assert!(config.data_dir().ends_with(DATA_DIR));
        assert_eq!(config.cache_mode(), CacheMode::ReadThrough);
        assert_eq!(config.validation_policy(), ValidationPolicy::Abort);
        assert_eq!(config.sources(), &Sources::default());
    }

    #[tokio::test]
    async fn test_config_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path()).await.unwrap();
        let err = Config::create(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_config_load() {
        let dir = TempDir::new().unwrap();
        let created = Config::create(dir.path()).await.unwrap();
        let loaded = Config::load(dir.path()).await.unwrap();
        assert_eq!(created.root(), loaded.root());
        assert_eq!(created.config_file, loaded.config_file);
        assert_eq!(created.cache().dir(), loaded.cache_dir());
    }

    #[tokio::test]
    async fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(dir.path().join("nope")).await.is_err());
    }

    #[tokio::test]
    async fn test_config_load_missing_data_dir() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path()).await.unwrap();
        tokio::fs::remove_dir(config.data_dir()).await.unwrap();
        let err = Config::load(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("data directory is missing"));
    }

    #[tokio::test]
    async fn test_config_file_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let original = ConfigFile {
            cache_mode: CacheMode::Required,
            validation_policy: ValidationPolicy::Collect,
            data_dir: PathBuf::from("/srv/exports"),
            ..ConfigFile::default()
        };
        original.save(&config_path).await.unwrap();
        let loaded = ConfigFile::load(&config_path).await.unwrap();
        assert_eq!(original, loaded);
    }

    #[tokio::test]
    async fn test_config_file_load_with_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "app_name": "rental-ledger",
            "config_version": 1
        }"#;
        utils::write(&config_path, json).await.unwrap();

        let config = ConfigFile::load(&config_path).await.unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "app_name": "wrong_app",
            "config_version": 1
        }"#;
        utils::write(&config_path, json).await.unwrap();

        let result = ConfigFile::load(&config_path).await;
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[tokio::test]
    async fn test_config_sources_override() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path()).await.unwrap();
        let json = r#"{
            "app_name": "rental-ledger",
            "config_version": 1,
            "data_dir": "exports",
            "sources": [
                {"year": 2026, "spreadsheet_id": "new-book", "rentals_sheet": "Rentals 26",
                 "expenses_sheet": "Ledger", "expenses_format": "multi_year"}
            ]
        }"#;
        utils::write(config.config_path(), json).await.unwrap();
        utils::make_dir(dir.path().join("exports")).await.unwrap();

        let config = Config::load(dir.path()).await.unwrap();
        assert_eq!(config.sources().years(), vec![2026]);
        let source = config.sources().get(2026).unwrap();
        assert_eq!(source.expenses_format, ExpenseFormat::MultiYear);
        assert!(config.data_dir().ends_with("exports"));
    }

    #[test]
    fn test_config_file_serialization_omits_sources() {
        let json = serde_json::to_string(&ConfigFile::default()).unwrap();
        assert!(!json.contains("sources"));
        assert!(json.contains("\"cache_mode\":\"read_through\""));
    }
}
